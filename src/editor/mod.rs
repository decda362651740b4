// src/editor/mod.rs
pub mod buffer;
pub mod cursor;
pub mod mode;
pub mod render;
pub mod selection;
pub mod snapshot;
pub mod state;
pub mod window;

pub use buffer::Text;
pub use cursor::Position;
pub use mode::{Mode, SelectionShape};
pub use snapshot::EditorSnapshot;
pub use state::{Clipboard, Editor};
pub use window::Window;
