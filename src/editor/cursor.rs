// src/editor/cursor.rs
use serde::Serialize;

/// Zero-based (line, column) in characters. Ordering is line first, then
/// column. Nothing keeps a position inside the text; the window clamps it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(line: usize, col: usize) -> Self {
        Position { line, col }
    }

    /// The two positions, earlier one first.
    pub fn ordered(a: Position, b: Position) -> (Position, Position) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_major_order() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(2, 1) < Position::new(2, 3));
        let (a, b) = Position::ordered(Position::new(3, 0), Position::new(1, 7));
        assert_eq!(a, Position::new(1, 7));
        assert_eq!(b, Position::new(3, 0));
    }
}
