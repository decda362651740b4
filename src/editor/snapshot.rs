// src/editor/snapshot.rs
use serde::Serialize;

use super::cursor::Position;
use super::mode::{Mode, SelectionShape};

/// Plain copy of the editor state, for tests and for the exit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorSnapshot {
    pub mode: Mode,
    pub cursor: Position,
    pub anchor: Position,
    pub top_left: Position,
    pub lines: Vec<String>,
    pub clipboard: Option<ClipboardSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipboardSnapshot {
    pub shape: SelectionShape,
    pub lines: Vec<String>,
}

impl EditorSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
