// src/editor/mode.rs
use serde::Serialize;

use crate::terminal::CursorShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Mode {
    Normal,
    Insert,
    /// Overwrites characters until escape.
    Replace,
    /// Overwrites a single character, then back to normal.
    ReplaceOnce,
    SelectChar,
    SelectLine,
}

/// How a selection (or a clipboard fragment) covers the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SelectionShape {
    /// From one character position to another, both inclusive.
    Char,
    /// Whole lines, columns ignored.
    Line,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Replace => "REPLACE",
            Mode::ReplaceOnce => "REPLACE-ONCE",
            Mode::SelectChar => "SELECT",
            Mode::SelectLine => "SELECT-LINE",
        }
    }

    /// Three-column tag shown in the status row.
    pub fn status_label(&self) -> &'static str {
        match self {
            Mode::Normal => " N ",
            Mode::Insert => " I ",
            Mode::Replace | Mode::ReplaceOnce => " R ",
            Mode::SelectChar => " V ",
            Mode::SelectLine => "V-L",
        }
    }

    pub fn selection_shape(&self) -> Option<SelectionShape> {
        match self {
            Mode::SelectChar => Some(SelectionShape::Char),
            Mode::SelectLine => Some(SelectionShape::Line),
            _ => None,
        }
    }

    /// Whether the cursor may rest just past the last character of a line.
    pub fn allows_past_end(&self) -> bool {
        matches!(self, Mode::Insert | Mode::Replace)
    }

    pub fn cursor_shape(&self) -> CursorShape {
        match self {
            Mode::Insert => CursorShape::Bar,
            Mode::Replace | Mode::ReplaceOnce => CursorShape::Underline,
            _ => CursorShape::Block,
        }
    }
}

impl SelectionShape {
    pub fn mode(&self) -> Mode {
        match self {
            SelectionShape::Char => Mode::SelectChar,
            SelectionShape::Line => Mode::SelectLine,
        }
    }
}
