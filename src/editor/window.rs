// src/editor/window.rs
//
// A window shows part of one text on a rectangle of the screen and owns
// the cursor and the selection anchor. Motions move the cursor freely; the
// editor clamps and rescrolls once per key.

use super::buffer::Text;
use super::cursor::Position;
use crate::terminal::Size;
use crate::text::Str;

/// Columns taken by the line number in front of each row.
pub const GUTTER: usize = 6;

const WORD_SEPARATORS: &str = " ";

#[derive(Debug, Clone)]
pub struct Window {
    text: Text,
    origin: Position,
    size: Size,
    top_left: Position,
    cursor: Position,
    anchor: Position,
}

impl Window {
    pub fn new(text: Text, size: Size) -> Self {
        Window {
            text,
            origin: Position::default(),
            size,
            top_left: Position::default(),
            cursor: Position::default(),
            anchor: Position::default(),
        }
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut Text {
        &mut self.text
    }

    /// Screen cell of the window's top-left corner.
    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Text position shown in the window's top-left cell.
    pub fn top_left(&self) -> Position {
        self.top_left
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Position) {
        self.cursor = cursor;
    }

    pub fn anchor(&self) -> Position {
        self.anchor
    }

    pub fn resize(&mut self, size: Size) {
        tracing::debug!(rows = size.rows, cols = size.cols, "window resized");
        self.size = size;
    }

    /// Rows available for text; the last row is the status line.
    pub fn text_rows(&self) -> usize {
        self.size.rows.saturating_sub(1)
    }

    pub fn text_cols(&self) -> usize {
        self.size.cols.saturating_sub(GUTTER)
    }

    fn current_line(&self) -> Str<'_> {
        self.text.line(self.cursor.line).unwrap_or_default()
    }

    // a window always shows at least one (possibly empty) line
    fn ensure_line(&mut self) {
        if self.text.line_count() == 0 {
            self.text.lines_mut().insert_before(Str::default());
        }
    }

    // motions

    pub fn cursor_left(&mut self) {
        self.cursor.col = self.cursor.col.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor.col += 1;
    }

    pub fn cursor_up(&mut self) {
        self.cursor.line = self.cursor.line.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        self.cursor.line += 1;
    }

    fn page(&self) -> usize {
        self.size.rows * 3 / 4
    }

    pub fn cursor_page_up(&mut self) {
        self.cursor.line = self.cursor.line.saturating_sub(self.page());
    }

    pub fn cursor_page_down(&mut self) {
        self.cursor.line += self.page();
    }

    pub fn cursor_line_start(&mut self) {
        self.cursor.col = 0;
    }

    /// Just past the last character; normal mode clamping pulls it back.
    pub fn cursor_line_end(&mut self) {
        self.cursor.col = self.current_line().len();
    }

    pub fn cursor_text_start(&mut self) {
        self.cursor.line = 0;
    }

    pub fn cursor_text_end(&mut self) {
        self.cursor.line = self.text.line_count().saturating_sub(1);
    }

    /// Start of the next word: the first non-space after a space, looking
    /// on the following lines when this one has no more words.
    pub fn cursor_word_start_forward(&mut self) {
        let space = Str::new(WORD_SEPARATORS);
        let (mut line, mut from) = match self.current_line().find_any(self.cursor.col as isize, space) {
            Some(pos) => (self.cursor.line, pos),
            None => (self.cursor.line + 1, 0),
        };
        while let Some(text) = self.text.line(line) {
            if let Some(col) = text.find_not_any(from as isize, space) {
                self.cursor = Position::new(line, col);
                return;
            }
            line += 1;
            from = 0;
        }
    }

    /// Start of the word before the cursor, or of the word under it when
    /// the cursor is past its first character.
    pub fn cursor_word_start_backward(&mut self) {
        let space = Str::new(WORD_SEPARATORS);
        let mut line = self.cursor.line;
        let mut found = match self.cursor.col {
            0 => None,
            col => self.current_line().rfind_not_any(col as isize - 1, space),
        };
        while found.is_none() {
            if line == 0 {
                return;
            }
            line -= 1;
            found = self.text.line(line).and_then(|text| text.rfind_not_any(-1, space));
        }
        let Some(word_end) = found else { return };
        let text = self.text.line(line).unwrap_or_default();
        let start = text.rfind_any(word_end as isize, space).map_or(0, |pos| pos + 1);
        self.cursor = Position::new(line, start);
    }

    /// Last character of the current or next word.
    pub fn cursor_word_end_forward(&mut self) {
        let space = Str::new(WORD_SEPARATORS);
        let mut line = self.cursor.line;
        let from = self.cursor.col + 1;
        let mut found = match self.text.line(line) {
            Some(text) if from < text.len() => text.find_not_any(from as isize, space),
            _ => None,
        };
        while found.is_none() {
            line += 1;
            match self.text.line(line) {
                Some(text) => found = text.find_not_any(0, space),
                None => return,
            }
        }
        let Some(word_start) = found else { return };
        let text = self.text.line(line).unwrap_or_default();
        let end = text.find_any(word_start as isize, space).unwrap_or(text.len());
        self.cursor = Position::new(line, end - 1);
    }

    // settling

    /// Pulls the cursor back inside the text. With `past_end` the column may
    /// sit one after the last character.
    pub fn clamp_cursor_to_text(&mut self, past_end: bool) {
        self.ensure_line();
        let last_line = self.text.line_count() - 1;
        self.cursor.line = self.cursor.line.min(last_line);
        let len = self.current_line().len();
        let last_col = if past_end { len } else { len.saturating_sub(1) };
        self.cursor.col = self.cursor.col.min(last_col);
    }

    /// Moves the viewport the least needed to show the cursor.
    pub fn scroll_to_cursor(&mut self) {
        if self.top_left.line > self.cursor.line {
            self.top_left.line = self.cursor.line;
        }
        if self.top_left.col > self.cursor.col {
            self.top_left.col = self.cursor.col;
        }
        let last_line = self.top_left.line + self.size.rows.saturating_sub(2);
        if last_line < self.cursor.line {
            self.top_left.line = self.cursor.line.saturating_sub(self.size.rows.saturating_sub(2));
        }
        let last_col = self.top_left.col + self.size.cols.saturating_sub(GUTTER + 1);
        if last_col < self.cursor.col {
            self.top_left.col = self.cursor.col.saturating_sub(self.size.cols.saturating_sub(GUTTER + 1));
        }
    }

    // anchor

    pub fn set_anchor(&mut self) {
        self.anchor = self.cursor;
    }

    pub fn swap_anchor(&mut self) {
        std::mem::swap(&mut self.anchor, &mut self.cursor);
    }

    // editing

    /// Inserts an empty line below the cursor line.
    pub fn open_line_below(&mut self) {
        self.ensure_line();
        let lines = self.text.lines_mut();
        lines.seek(self.cursor.line as isize);
        lines.insert_after(Str::default());
    }

    /// Inserts an empty line above the cursor line; the cursor ends up on it.
    pub fn open_line_above(&mut self) {
        let lines = self.text.lines_mut();
        lines.seek(self.cursor.line as isize);
        lines.insert_before(Str::default());
    }

    /// Moves everything from the cursor on into a new line below.
    pub fn split_line(&mut self) {
        self.ensure_line();
        let col = self.cursor.col as isize;
        let lines = self.text.lines_mut();
        lines.seek(self.cursor.line as isize);
        let Some(line) = lines.current_mut() else { return };
        let len = line.len() as isize;
        let tail = line.view().slice(col, len).to_buf();
        line.remove_range(col, len);
        lines.push_after(tail);
    }

    /// Appends the line below to the cursor line.
    pub fn join_lines(&mut self) {
        let lines = self.text.lines_mut();
        lines.seek(self.cursor.line as isize + 1);
        let Some(next) = lines.remove() else { return };
        if let Some(line) = self.text.line_mut(self.cursor.line) {
            line.append(next.view());
        }
    }

    pub fn remove_char(&mut self) {
        let col = self.cursor.col as isize;
        if let Some(line) = self.text.line_mut(self.cursor.line) {
            line.remove_range(col, 1);
        }
    }

    /// Backspace: removes the character left of the cursor, if any.
    pub fn remove_char_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor_left();
            self.remove_char();
        }
    }

    /// Overwrites the character under the cursor; at the end of the line
    /// the character is appended.
    pub fn replace_char(&mut self, ch: char) {
        self.ensure_line();
        let col = self.cursor.col as isize;
        let mut buf = [0u8; 4];
        let with = Str::from_parts(ch.encode_utf8(&mut buf), 1);
        if let Some(line) = self.text.line_mut(self.cursor.line) {
            line.replace_range(col, 1, with, Str::default());
        }
    }

    /// Inserts `ch` just before the cursor character.
    pub fn insert_char(&mut self, ch: char) {
        self.ensure_line();
        let col = self.cursor.col as isize;
        let mut buf = [0u8; 4];
        let with = Str::from_parts(ch.encode_utf8(&mut buf), 1);
        if let Some(line) = self.text.line_mut(self.cursor.line) {
            line.insert(col, with);
        }
    }
}
