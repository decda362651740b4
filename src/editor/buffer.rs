// src/editor/buffer.rs
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::text::{LineList, Str, StrBuf};

const NEWLINE: &str = "\n";

/// A file's lines plus where they came from.
#[derive(Debug, Clone)]
pub struct Text {
    path: PathBuf,
    name: StrBuf,
    lines: LineList,
    trailing_newline: bool,
}

impl Text {
    /// Loads `path`. A missing or unreadable file gives an empty text that
    /// will still be saved back to `path`.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let content = StrBuf::read_file(path);
        Self::from_content(path, content.view())
    }

    pub fn from_content(path: impl AsRef<Path>, content: Str<'_>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = StrBuf::from(path.display().to_string().as_str());
        // every piece is copied into the list, nothing borrows `content`
        let lines: LineList = content.split(Str::new(NEWLINE)).into_iter().collect();
        let trailing_newline = content.as_bytes().last() == Some(&b'\n');
        tracing::debug!(path = %path.display(), lines = lines.len(), trailing_newline, "text loaded");
        Text {
            path,
            name,
            lines,
            trailing_newline,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> Str<'_> {
        self.name.view()
    }

    pub fn lines(&self) -> &LineList {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut LineList {
        &mut self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<Str<'_>> {
        self.lines.get(index)
    }

    /// Length in characters of line `index`; 0 when there is no such line.
    pub fn line_len(&self, index: usize) -> usize {
        self.line(index).map_or(0, |line| line.len())
    }

    pub fn line_mut(&mut self, index: usize) -> Option<&mut StrBuf> {
        self.lines.seek(index as isize);
        self.lines.current_mut()
    }

    /// Whole file content as it would be written.
    pub fn contents(&self) -> StrBuf {
        let mut out = self.lines.join(Str::new(NEWLINE));
        if self.trailing_newline {
            out.append(Str::new(NEWLINE));
        }
        out
    }

    pub fn try_save(&self) -> Result<()> {
        self.contents().view().try_write_file(&self.path)
    }

    /// Writes the text back to its file; failures are logged and dropped.
    pub fn save(&self) {
        self.contents().view().write_file(&self.path);
    }
}
