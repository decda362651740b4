// src/editor/state.rs
//
// Modal key dispatch. Each mode has its own handler; after any key the
// cursor is pulled back into the text and the viewport follows it.

use std::io;
use std::path::Path;

use super::buffer::Text;
use super::mode::{Mode, SelectionShape};
use super::snapshot::{ClipboardSnapshot, EditorSnapshot};
use super::window::Window;
use crate::terminal::{CursorShape, Event, Key, Screen, Size};
use crate::text::LineList;

/// Most recently copied text and the shape it was copied with.
#[derive(Debug, Clone)]
pub struct Clipboard {
    pub lines: LineList,
    pub shape: SelectionShape,
}

#[derive(Debug, Clone)]
pub struct Editor {
    mode: Mode,
    window: Window,
    clipboard: Option<Clipboard>,
    quit: bool,
}

impl Editor {
    pub fn new(text: Text, size: Size) -> Self {
        let mut window = Window::new(text, size);
        window.clamp_cursor_to_text(false);
        Editor {
            mode: Mode::Normal,
            window,
            clipboard: None,
            quit: false,
        }
    }

    pub fn open(path: impl AsRef<Path>, size: Size) -> Self {
        Self::new(Text::open(path), size)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(size) => {
                self.window.resize(size);
                self.window.scroll_to_cursor();
            }
        }
    }

    pub fn handle_key(&mut self, key: Key) {
        tracing::trace!(?key, mode = self.mode.as_str(), "key");
        match self.mode {
            Mode::Normal => self.handle_normal(key),
            Mode::Insert => self.handle_insert(key),
            Mode::Replace => self.handle_replace(key),
            Mode::ReplaceOnce => self.handle_replace_once(key),
            Mode::SelectChar | Mode::SelectLine => self.handle_select(key),
        }
        self.window.clamp_cursor_to_text(self.mode.allows_past_end());
        self.window.scroll_to_cursor();
    }

    fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            tracing::debug!(from = self.mode.as_str(), to = mode.as_str(), "mode change");
            self.mode = mode;
        }
    }

    // arrows and the other named movement keys, available in every mode
    // but replace-once
    fn arrow_motion(&mut self, key: Key) -> bool {
        let w = &mut self.window;
        match key {
            Key::Right => w.cursor_right(),
            Key::Left => w.cursor_left(),
            Key::Up => w.cursor_up(),
            Key::Down => w.cursor_down(),
            Key::PageUp => w.cursor_page_up(),
            Key::PageDown => w.cursor_page_down(),
            Key::End => w.cursor_line_end(),
            Key::Home => w.cursor_line_start(),
            _ => return false,
        }
        true
    }

    // letter motions, only where letters are not text
    fn motion(&mut self, key: Key) -> bool {
        if self.arrow_motion(key) {
            return true;
        }
        let Key::Char(ch) = key else { return false };
        let w = &mut self.window;
        match ch {
            'h' => w.cursor_left(),
            'j' => w.cursor_down(),
            'k' => w.cursor_up(),
            'l' | ' ' => w.cursor_right(),
            '0' | '^' => w.cursor_line_start(),
            '$' => w.cursor_line_end(),
            'g' => w.cursor_text_start(),
            'G' => w.cursor_text_end(),
            'w' | 'W' => w.cursor_word_start_forward(),
            'b' | 'B' => w.cursor_word_start_backward(),
            'e' | 'E' => w.cursor_word_end_forward(),
            _ => return false,
        }
        true
    }

    fn handle_normal(&mut self, key: Key) {
        if self.motion(key) {
            return;
        }
        match key {
            Key::Char('q') => self.quit = true,
            Key::Char('Z') => {
                self.window.text().save();
                self.quit = true;
            }
            Key::Char('i') => self.set_mode(Mode::Insert),
            Key::Char('a') => {
                self.window.cursor_right();
                self.set_mode(Mode::Insert);
            }
            Key::Char('A') => {
                self.window.cursor_line_end();
                self.set_mode(Mode::Insert);
            }
            Key::Char('I') => {
                self.window.cursor_line_start();
                self.set_mode(Mode::Insert);
            }
            Key::Char('o') => {
                self.window.open_line_below();
                self.window.cursor_down();
                self.window.cursor_line_start();
                self.set_mode(Mode::Insert);
            }
            Key::Char('O') => {
                self.window.open_line_above();
                self.window.cursor_line_start();
                self.set_mode(Mode::Insert);
            }
            Key::Char('v') => {
                self.window.set_anchor();
                self.set_mode(Mode::SelectChar);
            }
            Key::Char('V') => {
                self.window.set_anchor();
                self.set_mode(Mode::SelectLine);
            }
            Key::Char('r') => self.set_mode(Mode::ReplaceOnce),
            Key::Char('R') => self.set_mode(Mode::Replace),
            Key::Char('J') => {
                self.window.cursor_line_end();
                self.window.join_lines();
            }
            Key::Char('x') | Key::Delete => self.window.remove_char(),
            Key::Char('p') => {
                if let Some(clipboard) = &self.clipboard {
                    self.window.paste_after(&clipboard.lines, clipboard.shape);
                }
            }
            Key::Char('P') => {
                if let Some(clipboard) = &self.clipboard {
                    self.window.paste_before(&clipboard.lines, clipboard.shape);
                }
            }
            _ => {}
        }
    }

    fn handle_insert(&mut self, key: Key) {
        if self.arrow_motion(key) {
            return;
        }
        match key {
            Key::Escape => self.set_mode(Mode::Normal),
            Key::Enter => {
                self.window.split_line();
                self.window.cursor_down();
                self.window.cursor_line_start();
            }
            Key::Backspace => self.window.remove_char_left(),
            Key::Delete => self.window.remove_char(),
            _ => {
                if let Some(ch) = key.printable() {
                    self.window.insert_char(ch);
                    self.window.cursor_right();
                }
            }
        }
    }

    fn handle_replace(&mut self, key: Key) {
        if key == Key::Escape {
            self.set_mode(Mode::Normal);
            return;
        }
        if self.arrow_motion(key) {
            return;
        }
        if let Some(ch) = key.printable() {
            self.window.replace_char(ch);
            self.window.cursor_right();
        }
    }

    fn handle_replace_once(&mut self, key: Key) {
        if let Some(ch) = key.printable() {
            self.window.replace_char(ch);
        }
        self.set_mode(Mode::Normal);
    }

    fn handle_select(&mut self, key: Key) {
        if self.motion(key) {
            return;
        }
        let Some(shape) = self.mode.selection_shape() else { return };
        match key {
            Key::Char('v') => self.toggle_select(SelectionShape::Char),
            Key::Char('V') => self.toggle_select(SelectionShape::Line),
            Key::Char('o') => self.window.swap_anchor(),
            Key::Char('y') => self.copy_selection(shape),
            Key::Char('c') => {
                self.copy_selection(shape);
                self.window.delete_selection(shape);
                self.set_mode(Mode::Insert);
            }
            Key::Char('d') | Key::Char('x') => {
                self.copy_selection(shape);
                self.window.delete_selection(shape);
                self.set_mode(Mode::Normal);
            }
            Key::Char('p') | Key::Char('P') => {
                self.window.delete_selection(shape);
                if let Some(clipboard) = &self.clipboard {
                    self.window.paste_before(&clipboard.lines, clipboard.shape);
                }
                self.set_mode(Mode::Normal);
            }
            Key::Escape => self.set_mode(Mode::Normal),
            _ => {}
        }
    }

    // pressing the key of the current shape leaves selection
    fn toggle_select(&mut self, shape: SelectionShape) {
        if self.mode == shape.mode() {
            self.set_mode(Mode::Normal);
        } else {
            self.set_mode(shape.mode());
        }
    }

    fn copy_selection(&mut self, shape: SelectionShape) {
        let lines = self.window.copy_selection(shape);
        tracing::debug!(?shape, lines = lines.len(), "selection copied");
        self.clipboard = Some(Clipboard { lines, shape });
    }

    /// Draws the whole screen. The cursor stays hidden while drawing.
    pub fn render(&self, screen: &mut impl Screen) -> io::Result<()> {
        screen.set_cursor_shape(CursorShape::Hidden)?;
        self.window.render(screen, self.mode)?;
        screen.set_cursor_shape(self.mode.cursor_shape())?;
        screen.flush()
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        let strings = |lines: &LineList| lines.iter().map(|l| l.to_string()).collect::<Vec<_>>();
        EditorSnapshot {
            mode: self.mode,
            cursor: self.window.cursor(),
            anchor: self.window.anchor(),
            top_left: self.window.top_left(),
            lines: strings(self.window.text().lines()),
            clipboard: self.clipboard.as_ref().map(|clipboard| ClipboardSnapshot {
                shape: clipboard.shape,
                lines: strings(&clipboard.lines),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::cursor::Position;
    use crate::text::Str;

    fn editor(content: &str) -> Editor {
        Editor::new(Text::from_content("t.txt", Str::new(content)), Size::new(10, 40))
    }

    fn type_keys(editor: &mut Editor, keys: &str) {
        for ch in keys.chars() {
            editor.handle_key(Key::Char(ch));
        }
    }

    fn lines(editor: &Editor) -> Vec<String> {
        editor.snapshot().lines
    }

    #[test]
    fn test_append_then_escape_clamps() {
        let mut ed = editor("abc\ndef");
        type_keys(&mut ed, "ll");
        assert_eq!(ed.window().cursor(), Position::new(0, 2));
        type_keys(&mut ed, "a");
        assert_eq!(ed.mode(), Mode::Insert);
        assert_eq!(ed.window().cursor(), Position::new(0, 3));
        type_keys(&mut ed, "X");
        assert_eq!(lines(&ed), vec!["abcX", "def"]);
        assert_eq!(ed.window().cursor(), Position::new(0, 4));
        ed.handle_key(Key::Escape);
        assert_eq!(ed.mode(), Mode::Normal);
        assert_eq!(ed.window().cursor(), Position::new(0, 3));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut ed = editor("abc");
        let before = ed.snapshot();
        type_keys(&mut ed, "%&*");
        ed.handle_key(Key::Insert);
        ed.handle_key(Key::Enter);
        assert_eq!(ed.snapshot(), before);
    }

    #[test]
    fn test_insert_enter_and_backspace() {
        let mut ed = editor("abcd");
        type_keys(&mut ed, "lli");
        ed.handle_key(Key::Enter);
        assert_eq!(lines(&ed), vec!["ab", "cd"]);
        assert_eq!(ed.window().cursor(), Position::new(1, 0));
        // backspace does not join lines
        ed.handle_key(Key::Backspace);
        assert_eq!(lines(&ed), vec!["ab", "cd"]);
        ed.handle_key(Key::Right);
        ed.handle_key(Key::Backspace);
        assert_eq!(lines(&ed), vec!["ab", "d"]);
    }

    #[test]
    fn test_letters_are_text_in_insert_mode() {
        let mut ed = editor("");
        type_keys(&mut ed, "ihjkl");
        assert_eq!(lines(&ed), vec!["hjkl"]);
        assert_eq!(ed.window().cursor(), Position::new(0, 4));
    }

    #[test]
    fn test_replace_mode() {
        let mut ed = editor("abc");
        type_keys(&mut ed, "lRxyz");
        assert_eq!(lines(&ed), vec!["axyz"]);
        ed.handle_key(Key::Escape);
        assert_eq!(ed.mode(), Mode::Normal);
        assert_eq!(ed.window().cursor(), Position::new(0, 3));
    }

    #[test]
    fn test_replace_once() {
        let mut ed = editor("abc");
        type_keys(&mut ed, "rZ");
        assert_eq!(lines(&ed), vec!["Zbc"]);
        assert_eq!(ed.mode(), Mode::Normal);
        ed.handle_key(Key::Char('r'));
        ed.handle_key(Key::Left);
        assert_eq!(ed.mode(), Mode::Normal);
        assert_eq!(lines(&ed), vec!["Zbc"]);
    }

    #[test]
    fn test_open_lines() {
        let mut ed = editor("one\ntwo");
        type_keys(&mut ed, "oX");
        assert_eq!(lines(&ed), vec!["one", "X", "two"]);
        ed.handle_key(Key::Escape);
        type_keys(&mut ed, "OY");
        assert_eq!(lines(&ed), vec!["one", "Y", "X", "two"]);
        assert_eq!(ed.window().cursor(), Position::new(1, 1));
    }

    #[test]
    fn test_join_and_delete() {
        let mut ed = editor("ab\ncd");
        type_keys(&mut ed, "J");
        assert_eq!(lines(&ed), vec!["abcd"]);
        assert_eq!(ed.window().cursor(), Position::new(0, 2));
        type_keys(&mut ed, "x");
        ed.handle_key(Key::Delete);
        assert_eq!(lines(&ed), vec!["ab"]);
        assert_eq!(ed.window().cursor(), Position::new(0, 1));
    }

    #[test]
    fn test_yank_and_paste_lines() {
        let mut ed = editor("a\nb\nc");
        type_keys(&mut ed, "Vjy");
        assert_eq!(ed.mode(), Mode::SelectLine);
        ed.handle_key(Key::Escape);
        type_keys(&mut ed, "Gp");
        assert_eq!(lines(&ed), vec!["a", "b", "c", "a", "b"]);
        assert_eq!(ed.window().cursor(), Position::new(3, 0));
        type_keys(&mut ed, "gP");
        assert_eq!(lines(&ed), vec!["a", "b", "a", "b", "c", "a", "b"]);
    }

    #[test]
    fn test_cut_chars_and_paste() {
        let mut ed = editor("hello world");
        type_keys(&mut ed, "vllld");
        assert_eq!(lines(&ed), vec!["o world"]);
        assert_eq!(ed.mode(), Mode::Normal);
        type_keys(&mut ed, "$p");
        assert_eq!(lines(&ed), vec!["o worldhell"]);
    }

    #[test]
    fn test_change_selection_enters_insert() {
        let mut ed = editor("abc def");
        type_keys(&mut ed, "wvec");
        assert_eq!(ed.mode(), Mode::Insert);
        type_keys(&mut ed, "xyz");
        assert_eq!(lines(&ed), vec!["abc xyz"]);
    }

    #[test]
    fn test_paste_over_selection() {
        let mut ed = editor("one two");
        type_keys(&mut ed, "vey");
        ed.handle_key(Key::Escape);
        type_keys(&mut ed, "wvep");
        assert_eq!(lines(&ed), vec!["one one"]);
        assert_eq!(ed.mode(), Mode::Normal);
    }

    #[test]
    fn test_select_toggles() {
        let mut ed = editor("abc");
        type_keys(&mut ed, "vV");
        assert_eq!(ed.mode(), Mode::SelectLine);
        type_keys(&mut ed, "v");
        assert_eq!(ed.mode(), Mode::SelectChar);
        type_keys(&mut ed, "v");
        assert_eq!(ed.mode(), Mode::Normal);
    }

    #[test]
    fn test_swap_anchor_in_selection() {
        let mut ed = editor("abcdef");
        type_keys(&mut ed, "lvllo");
        assert_eq!(ed.window().cursor(), Position::new(0, 1));
        assert_eq!(ed.window().anchor(), Position::new(0, 3));
    }

    #[test]
    fn test_paste_without_clipboard_does_nothing() {
        let mut ed = editor("abc");
        type_keys(&mut ed, "pP");
        assert_eq!(lines(&ed), vec!["abc"]);
    }

    #[test]
    fn test_quit() {
        let mut ed = editor("abc");
        assert!(!ed.should_quit());
        type_keys(&mut ed, "q");
        assert!(ed.should_quit());
    }

    #[test]
    fn test_resize_rescrolls() {
        let content = (0..30).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut ed = editor(&content);
        type_keys(&mut ed, "G");
        assert_eq!(ed.window().top_left().line, 21);
        ed.handle_event(Event::Resize(Size::new(20, 40)));
        assert_eq!(ed.window().size(), Size::new(20, 40));
        assert_eq!(ed.window().top_left().line, 21);
        assert_eq!(ed.window().cursor(), Position::new(29, 0));
    }
}
