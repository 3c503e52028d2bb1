use std::fmt;
use std::str::FromStr;

use crate::board::BOARD_SIZE;
use crate::error::{ParsePositionError, RulesError};

/// A cell on the board, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: u8, // 0-7
    pub col: u8, // 0-7 (a-h)
}

impl Position {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Like [`Position::new`] but accepts signed input from a UI layer and
    /// reports the offending coordinates.
    pub fn try_new(row: i32, col: i32) -> Result<Self, RulesError> {
        let in_range = |v: i32| (0..BOARD_SIZE as i32).contains(&v);
        if in_range(row) && in_range(col) {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(RulesError::OutOfBounds { row, col })
        }
    }

    pub fn from_algebraic(notation: &str) -> Option<Self> {
        let mut chars = notation.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file.to_ascii_lowercase(), rank),
            _ => return None,
        };

        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }

        Some(Self {
            row: (rank as u8) - b'1',
            col: (file as u8) - b'a',
        })
    }

    /// Row-major index in `0..64`.
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// All 64 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE as u8).flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Position { row, col }))
    }

    pub fn is_corner(self) -> bool {
        is_rim(self.row) && is_rim(self.col)
    }

    /// On the outer ring, corners included.
    pub fn is_edge(self) -> bool {
        is_rim(self.row) || is_rim(self.col)
    }

    /// Touches a corner (including diagonally) without being one.
    pub fn is_corner_adjacent(self) -> bool {
        const LAST: i32 = BOARD_SIZE as i32 - 1;
        [(0, 0), (0, LAST), (LAST, 0), (LAST, LAST)]
            .iter()
            .any(|&(cr, cc)| {
                let dr = (self.row as i32 - cr).abs();
                let dc = (self.col as i32 - cc).abs();
                dr <= 1 && dc <= 1 && (dr, dc) != (0, 0)
            })
    }
}

fn is_rim(v: u8) -> bool {
    v == 0 || v as usize == BOARD_SIZE - 1
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s.trim()).ok_or_else(|| ParsePositionError(s.to_string()))
    }
}
