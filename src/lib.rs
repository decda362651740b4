// src/lib.rs
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod terminal;
pub mod text;

pub use editor::{Editor, Mode, Position, Text};
pub use error::{Error, Result};
