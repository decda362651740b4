// src/editor/selection.rs
//
// The selection is everything between the anchor and the cursor, both
// ends included. In line shape it covers whole lines and columns are
// ignored.

use super::cursor::Position;
use super::mode::SelectionShape;
use super::window::Window;
use crate::text::{LineList, Str, StrBuf};

impl Window {
    /// Selection ends, earlier one first.
    pub fn selection_bounds(&self) -> (Position, Position) {
        Position::ordered(self.anchor(), self.cursor())
    }

    pub fn copy_selection(&self, shape: SelectionShape) -> LineList {
        let (start, end) = self.selection_bounds();
        let text = self.text();
        let lines = text.lines();

        if shape == SelectionShape::Line {
            return lines
                .iter_from(start.line)
                .take(end.line - start.line + 1)
                .collect();
        }

        let first = text.line(start.line).unwrap_or_default();
        if start.line == end.line {
            let span = first.slice(start.col as isize, (end.col - start.col + 1) as isize);
            return std::iter::once(span).collect();
        }

        let last = text.line(end.line).unwrap_or_default();
        let head = first.slice(start.col as isize, first.len() as isize);
        let interior = lines.iter_from(start.line + 1).take(end.line - start.line - 1);
        let tail = last.slice(0, end.col as isize + 1);
        std::iter::once(head).chain(interior).chain(std::iter::once(tail)).collect()
    }

    /// Removes the selection; the cursor goes to where it started.
    pub fn delete_selection(&mut self, shape: SelectionShape) {
        let (start, end) = self.selection_bounds();

        if shape == SelectionShape::Line {
            self.remove_lines(start.line, end.line);
            let col = self.cursor().col;
            self.set_cursor(Position::new(start.line, col));
            return;
        }

        self.set_cursor(start);
        if start.line == end.line {
            if let Some(line) = self.text_mut().line_mut(start.line) {
                line.remove_range(start.col as isize, (end.col - start.col + 1) as isize);
            }
            return;
        }

        // what follows the selection on its last line joins its first line
        let rest = self
            .text()
            .line(end.line)
            .map(|last| last.slice(end.col as isize + 1, last.len() as isize).to_buf())
            .unwrap_or_default();
        if let Some(first) = self.text_mut().line_mut(start.line) {
            let len = first.len() as isize;
            first.replace_range(start.col as isize, len, rest.view(), Str::default());
        }
        self.remove_lines(start.line + 1, end.line);
    }

    // removes lines `first..=last`
    fn remove_lines(&mut self, first: usize, last: usize) {
        let lines = self.text_mut().lines_mut();
        lines.seek(first as isize);
        for _ in first..=last {
            if lines.remove().is_none() {
                break;
            }
        }
    }

    /// Inserts `fragment` before the cursor line (line shape) or before the
    /// cursor character (char shape).
    pub fn paste_before(&mut self, fragment: &LineList, shape: SelectionShape) {
        let cursor = self.cursor();
        let has_line = self.text().line(cursor.line).is_some();
        if shape == SelectionShape::Line || fragment.is_empty() || !has_line {
            self.paste_lines_before(cursor.line, fragment);
            return;
        }

        let col = cursor.col as isize;
        let lines = self.text_mut().lines_mut();
        lines.seek(cursor.line as isize);
        let Some(line) = lines.current_mut() else { return };
        let first = fragment.get(0).unwrap_or_default();
        if fragment.len() == 1 {
            line.insert(col, first);
            return;
        }

        // split the cursor line around the fragment
        let len = line.len() as isize;
        let rest = line.view().slice(col, len).to_buf();
        line.replace_range(col, len, first, Str::default());
        for piece in fragment.iter().skip(1).take(fragment.len() - 2) {
            lines.insert_after(piece);
        }
        let mut last = StrBuf::copy(fragment.get(fragment.len() - 1).unwrap_or_default());
        last.append(rest.view());
        lines.push_after(last);
    }

    /// Like `paste_before`, but after the cursor line or character. A line
    /// paste moves the cursor onto the first pasted line.
    pub fn paste_after(&mut self, fragment: &LineList, shape: SelectionShape) {
        match shape {
            SelectionShape::Line => {
                let cursor = self.cursor();
                let lines = self.text_mut().lines_mut();
                lines.seek(cursor.line as isize);
                for piece in fragment.iter() {
                    lines.insert_after(piece);
                }
                self.cursor_down();
            }
            SelectionShape::Char => {
                self.cursor_right();
                self.paste_before(fragment, shape);
            }
        }
    }

    fn paste_lines_before(&mut self, line: usize, fragment: &LineList) {
        let lines = self.text_mut().lines_mut();
        lines.seek(line as isize);
        let mut pieces = fragment.iter();
        if let Some(first) = pieces.next() {
            lines.insert_before(first);
        }
        for piece in pieces {
            lines.insert_after(piece);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::buffer::Text;
    use crate::terminal::Size;

    fn window(content: &str) -> Window {
        Window::new(Text::from_content("t.txt", Str::new(content)), Size::new(10, 40))
    }

    fn select(window: &mut Window, anchor: Position, cursor: Position) {
        window.set_cursor(anchor);
        window.set_anchor();
        window.set_cursor(cursor);
    }

    fn strings(lines: &LineList) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    fn round_trip(content: &str, anchor: Position, cursor: Position, shape: SelectionShape) -> Vec<String> {
        let mut w = window(content);
        select(&mut w, anchor, cursor);
        let copied = w.copy_selection(shape);
        w.delete_selection(shape);
        w.paste_before(&copied, shape);
        strings(w.text().lines())
    }

    #[test]
    fn test_copy_char_single_line() {
        let mut w = window("hello world");
        select(&mut w, Position::new(0, 6), Position::new(0, 2));
        assert_eq!(strings(&w.copy_selection(SelectionShape::Char)), vec!["llo w"]);
    }

    #[test]
    fn test_copy_char_multi_line() {
        let mut w = window("abc\ndef\nghi\njkl");
        select(&mut w, Position::new(0, 1), Position::new(2, 1));
        assert_eq!(strings(&w.copy_selection(SelectionShape::Char)), vec!["bc", "def", "gh"]);
    }

    #[test]
    fn test_copy_lines_ignores_columns() {
        let mut w = window("abc\ndef\nghi\njkl");
        select(&mut w, Position::new(2, 2), Position::new(1, 0));
        assert_eq!(strings(&w.copy_selection(SelectionShape::Line)), vec!["def", "ghi"]);
    }

    #[test]
    fn test_delete_char_multi_line() {
        let mut w = window("abc\ndef\nghi\njkl");
        select(&mut w, Position::new(2, 1), Position::new(0, 1));
        w.delete_selection(SelectionShape::Char);
        assert_eq!(strings(w.text().lines()), vec!["ai", "jkl"]);
        assert_eq!(w.cursor(), Position::new(0, 1));
    }

    #[test]
    fn test_delete_lines() {
        let mut w = window("abc\ndef\nghi\njkl");
        select(&mut w, Position::new(1, 0), Position::new(2, 2));
        w.delete_selection(SelectionShape::Line);
        assert_eq!(strings(w.text().lines()), vec!["abc", "jkl"]);
        assert_eq!(w.cursor(), Position::new(1, 2));
    }

    #[test]
    fn test_round_trips() {
        let content = "um dois\ntrês quatro\ncinco\nseis";
        let original: Vec<String> = content.split('\n').map(String::from).collect();
        let cases = [
            (Position::new(1, 2), Position::new(1, 7), SelectionShape::Char),
            (Position::new(0, 3), Position::new(2, 2), SelectionShape::Char),
            (Position::new(3, 1), Position::new(1, 0), SelectionShape::Char),
            (Position::new(2, 0), Position::new(2, 4), SelectionShape::Line),
            (Position::new(1, 3), Position::new(3, 0), SelectionShape::Line),
            (Position::new(0, 0), Position::new(3, 3), SelectionShape::Line),
        ];
        for (anchor, cursor, shape) in cases {
            assert_eq!(
                round_trip(content, anchor, cursor, shape),
                original,
                "{:?} {:?} {:?}",
                anchor,
                cursor,
                shape
            );
        }
    }

    #[test]
    fn test_paste_after_lines() {
        let mut w = window("a\nd");
        let fragment: LineList = ["b", "c"].iter().map(|s| Str::new(s)).collect();
        w.paste_after(&fragment, SelectionShape::Line);
        assert_eq!(strings(w.text().lines()), vec!["a", "b", "c", "d"]);
        assert_eq!(w.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_paste_after_chars() {
        let mut w = window("ad");
        let fragment: LineList = ["bc"].iter().map(|s| Str::new(s)).collect();
        w.paste_after(&fragment, SelectionShape::Char);
        assert_eq!(strings(w.text().lines()), vec!["abcd"]);
    }

    #[test]
    fn test_paste_chars_into_empty_text_pastes_lines() {
        let mut w = window("");
        let fragment: LineList = ["x", "y"].iter().map(|s| Str::new(s)).collect();
        w.paste_before(&fragment, SelectionShape::Char);
        assert_eq!(strings(w.text().lines()), vec!["x", "y"]);
    }

    #[test]
    fn test_paste_empty_fragment_is_noop() {
        let mut w = window("abc");
        w.paste_before(&LineList::new(), SelectionShape::Char);
        assert_eq!(strings(w.text().lines()), vec!["abc"]);
    }
}
