// src/terminal/recorder.rs
//
// In-memory `Screen` for headless runs and tests: keeps a character grid
// plus the list of primitives it received.

use std::io;

use super::{CursorShape, Rgb, Screen, Size};
use crate::text::Str;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    MoveTo(usize, usize),
    Foreground(Rgb),
    Background(Rgb),
    ClearToEndOfLine,
    CursorShape(CursorShape),
    Print(String),
    Flush,
}

#[derive(Debug, Clone)]
pub struct Recorder {
    size: Size,
    grid: Vec<Vec<char>>,
    row: usize,
    col: usize,
    foreground: Option<Rgb>,
    background: Option<Rgb>,
    // background color of every cell that was printed
    paint: Vec<Vec<Option<Rgb>>>,
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new(size: Size) -> Self {
        Recorder {
            size,
            grid: vec![Vec::new(); size.rows],
            row: 0,
            col: 0,
            foreground: None,
            background: None,
            paint: vec![Vec::new(); size.rows],
            ops: Vec::new(),
        }
    }

    pub fn resize(&mut self, size: Size) {
        *self = Recorder::new(size);
    }

    /// Text on `row`, trailing blanks removed.
    pub fn row_text(&self, row: usize) -> String {
        self.grid
            .get(row)
            .map(|cells| cells.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    pub fn rows(&self) -> Vec<String> {
        (0..self.size.rows).map(|row| self.row_text(row)).collect()
    }

    /// Background color the cell at (`row`, `col`) was printed with.
    pub fn background_at(&self, row: usize, col: usize) -> Option<Rgb> {
        self.paint.get(row)?.get(col).copied().flatten()
    }

    pub fn foreground(&self) -> Option<Rgb> {
        self.foreground
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn last_cursor_shape(&self) -> Option<CursorShape> {
        self.ops.iter().rev().find_map(|op| match op {
            DrawOp::CursorShape(shape) => Some(*shape),
            _ => None,
        })
    }
}

impl Screen for Recorder {
    fn move_to(&mut self, row: usize, col: usize) -> io::Result<()> {
        self.row = row;
        self.col = col;
        self.ops.push(DrawOp::MoveTo(row, col));
        Ok(())
    }

    fn set_foreground(&mut self, color: Rgb) -> io::Result<()> {
        self.foreground = Some(color);
        self.ops.push(DrawOp::Foreground(color));
        Ok(())
    }

    fn set_background(&mut self, color: Rgb) -> io::Result<()> {
        self.background = Some(color);
        self.ops.push(DrawOp::Background(color));
        Ok(())
    }

    fn clear_to_end_of_line(&mut self) -> io::Result<()> {
        if let Some(cells) = self.grid.get_mut(self.row) {
            cells.truncate(self.col);
        }
        if let Some(cells) = self.paint.get_mut(self.row) {
            cells.truncate(self.col);
        }
        self.ops.push(DrawOp::ClearToEndOfLine);
        Ok(())
    }

    fn set_cursor_shape(&mut self, shape: CursorShape) -> io::Result<()> {
        self.ops.push(DrawOp::CursorShape(shape));
        Ok(())
    }

    fn print(&mut self, text: Str<'_>) -> io::Result<()> {
        for ch in text.chars() {
            if self.row < self.size.rows && self.col < self.size.cols {
                let cells = &mut self.grid[self.row];
                let paint = &mut self.paint[self.row];
                if cells.len() <= self.col {
                    cells.resize(self.col + 1, ' ');
                    paint.resize(self.col + 1, None);
                }
                cells[self.col] = ch;
                paint[self.col] = self.background;
            }
            self.col += 1;
        }
        self.ops.push(DrawOp::Print(text.to_string()));
        Ok(())
    }

    fn size(&self) -> io::Result<Size> {
        Ok(self.size)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.ops.push(DrawOp::Flush);
        Ok(())
    }
}
