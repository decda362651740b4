// src/terminal/driver.rs
use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, SetCursorStyle, Show},
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use super::{CursorShape, Event, EventSource, Key, Rgb, Screen, Size};
use crate::text::Str;

/// Raw-mode terminal on stdout. The previous terminal state comes back when
/// this is dropped.
pub struct CrosstermTerminal {
    out: Stdout,
}

impl CrosstermTerminal {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        // from here on dropping the value puts the terminal back
        let mut terminal = CrosstermTerminal { out: io::stdout() };
        execute!(terminal.out, EnterAlternateScreen, Clear(ClearType::All))?;
        Ok(terminal)
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            SetCursorStyle::DefaultUserShape,
            Show,
            LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
    }
}

fn translate_key(key: KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => None,
        KeyCode::Char(ch) => Key::from_char(ch),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::Insert => Some(Key::Insert),
        _ => None,
    }
}

impl EventSource for CrosstermTerminal {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let translated = match event::read()? {
            TermEvent::Key(key) => translate_key(key).map(Event::Key),
            TermEvent::Resize(cols, rows) => {
                Some(Event::Resize(Size::new(rows as usize, cols as usize)))
            }
            _ => None,
        };
        Ok(translated)
    }
}

fn color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

fn coord(value: usize) -> u16 {
    value.min(u16::MAX as usize) as u16
}

impl Screen for CrosstermTerminal {
    fn move_to(&mut self, row: usize, col: usize) -> io::Result<()> {
        queue!(self.out, MoveTo(coord(col), coord(row)))
    }

    fn set_foreground(&mut self, rgb: Rgb) -> io::Result<()> {
        queue!(self.out, SetForegroundColor(color(rgb)))
    }

    fn set_background(&mut self, rgb: Rgb) -> io::Result<()> {
        queue!(self.out, SetBackgroundColor(color(rgb)))
    }

    fn clear_to_end_of_line(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::UntilNewLine))
    }

    fn set_cursor_shape(&mut self, shape: CursorShape) -> io::Result<()> {
        match shape {
            CursorShape::Hidden => queue!(self.out, Hide),
            CursorShape::Block => queue!(self.out, SetCursorStyle::SteadyBlock, Show),
            CursorShape::Bar => queue!(self.out, SetCursorStyle::SteadyBar, Show),
            CursorShape::Underline => queue!(self.out, SetCursorStyle::SteadyUnderScore, Show),
        }
    }

    fn print(&mut self, text: Str<'_>) -> io::Result<()> {
        queue!(self.out, Print(text.as_str()))
    }

    fn size(&self) -> io::Result<Size> {
        let (cols, rows) = crossterm::terminal::size()?;
        Ok(Size::new(rows as usize, cols as usize))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
