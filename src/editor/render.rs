// src/editor/render.rs
use std::io;

use super::cursor::Position;
use super::mode::{Mode, SelectionShape};
use super::window::{Window, GUTTER};
use crate::terminal::{Rgb, Screen};
use crate::text::Str;

const FILLER: &str = "~";

/// Background and foreground of one screen region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colors {
    pub background: Rgb,
    pub foreground: Rgb,
}

pub const OUTER: Colors = Colors { background: Rgb(20, 20, 20), foreground: Rgb(60, 80, 80) };
pub const OUTER_SELECTED: Colors = Colors { background: Rgb(20, 20, 20), foreground: Rgb(175, 200, 200) };
pub const TEXT: Colors = Colors { background: Rgb(0, 0, 0), foreground: Rgb(200, 230, 230) };
pub const TEXT_SELECTED: Colors = Colors { background: Rgb(40, 40, 40), foreground: Rgb(200, 230, 230) };
pub const STATUS: Colors = Colors { background: Rgb(175, 200, 200), foreground: Rgb(50, 20, 20) };

fn set_colors(screen: &mut impl Screen, colors: Colors) -> io::Result<()> {
    screen.set_background(colors.background)?;
    screen.set_foreground(colors.foreground)
}

impl Window {
    /// Draws the visible lines, the status row, and leaves the terminal
    /// cursor over the text cursor.
    pub fn render(&self, screen: &mut impl Screen, mode: Mode) -> io::Result<()> {
        let origin = self.origin();
        let top = self.top_left().line;
        let mut lines = self.text().lines().iter_from(top);

        for row in 0..self.text_rows() {
            screen.move_to(origin.line + row, origin.col)?;
            match lines.next() {
                Some(line) => self.render_line(screen, top + row, line, mode)?,
                None => {
                    set_colors(screen, OUTER)?;
                    screen.print(Str::new(FILLER))?;
                }
            }
            screen.clear_to_end_of_line()?;
        }

        self.render_status(screen, mode)?;

        let cursor = self.cursor();
        let top_left = self.top_left();
        screen.move_to(
            origin.line + cursor.line.saturating_sub(top_left.line),
            origin.col + GUTTER + cursor.col.saturating_sub(top_left.col),
        )
    }

    fn render_line(&self, screen: &mut impl Screen, number: usize, line: Str<'_>, mode: Mode) -> io::Result<()> {
        let gutter = format!("{:5} ", (number + 1) % 100_000);
        let on_cursor = number == self.cursor().line;
        set_colors(screen, if on_cursor { OUTER_SELECTED } else { OUTER })?;
        screen.print(Str::new(&gutter))?;

        let left = self.top_left().col;
        let right = (left + self.text_cols()).min(line.len());
        if left >= right {
            return Ok(());
        }
        let (from, to) = match self.selected_span(number, mode) {
            Some((from, to)) => (from.clamp(left, right), to.clamp(left, right)),
            None => (right, right),
        };
        for (start, end, colors) in [(left, from, TEXT), (from, to, TEXT_SELECTED), (to, right, TEXT)] {
            if start < end {
                set_colors(screen, colors)?;
                screen.print(line.slice(start as isize, (end - start) as isize))?;
            }
        }
        Ok(())
    }

    /// Selected columns of line `number` as a half-open range.
    fn selected_span(&self, number: usize, mode: Mode) -> Option<(usize, usize)> {
        let shape = mode.selection_shape()?;
        let (start, end) = self.selection_bounds();
        if number < start.line || number > end.line {
            return None;
        }
        if shape == SelectionShape::Line {
            return Some((0, usize::MAX));
        }
        let from = if number == start.line { start.col } else { 0 };
        let to = if number == end.line { end.col + 1 } else { usize::MAX };
        Some((from, to))
    }

    fn render_status(&self, screen: &mut impl Screen, mode: Mode) -> io::Result<()> {
        let origin = self.origin();
        let Position { line, col } = self.cursor();
        screen.move_to(origin.line + self.text_rows(), origin.col)?;
        set_colors(screen, STATUS)?;
        let status = format!(" {} | {}:{} | ", mode.status_label(), line + 1, col + 1);
        screen.print(Str::new(&status))?;
        screen.print(self.text().name())?;
        screen.clear_to_end_of_line()
    }
}
