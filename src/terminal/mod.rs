// src/terminal/mod.rs
//
// Contract between the editor and whatever drives the screen. The editor
// only ever sees abstract keys and draws through `Screen`.

use std::io;
use std::time::Duration;

use crate::text::Str;

pub mod driver;
pub mod recorder;

pub use driver::CrosstermTerminal;
pub use recorder::Recorder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A literal character, never a control character.
    Char(char),
    Enter,
    Backspace,
    Delete,
    Escape,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
}

impl Key {
    /// Character keys only; control characters are not keys.
    pub fn from_char(ch: char) -> Option<Key> {
        (ch >= ' ' && ch != '\u{7f}').then_some(Key::Char(ch))
    }

    pub fn printable(&self) -> Option<char> {
        match *self {
            Key::Char(ch) if ch >= ' ' => Some(ch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub rows: usize,
    pub cols: usize,
}

impl Size {
    pub fn new(rows: usize, cols: usize) -> Self {
        Size { rows, cols }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    Resize(Size),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    Hidden,
    Block,
    Bar,
    Underline,
}

pub trait EventSource {
    /// Next input event, or `None` if nothing arrived within `timeout`.
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

/// Draw primitives. Coordinates are zero-based, row first.
pub trait Screen {
    fn move_to(&mut self, row: usize, col: usize) -> io::Result<()>;
    fn set_foreground(&mut self, color: Rgb) -> io::Result<()>;
    fn set_background(&mut self, color: Rgb) -> io::Result<()>;
    fn clear_to_end_of_line(&mut self) -> io::Result<()>;
    fn set_cursor_shape(&mut self, shape: CursorShape) -> io::Result<()>;
    fn print(&mut self, text: Str<'_>) -> io::Result<()>;
    fn size(&self) -> io::Result<Size>;
    fn flush(&mut self) -> io::Result<()>;
}

/// Wall-clock time in seconds.
pub fn clock() -> f64 {
    let now = chrono::Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) * 1e-9
}
