use thiserror::Error;

use crate::{Position, Side};

/// Reasons a move is rejected by the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("cell ({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },
    #[error("cell {0} is already occupied")]
    Occupied(Position),
    #[error("{side} at {position} would not capture anything")]
    NoCapture { side: Side, position: Position },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid board coordinate {0:?}, expected a1..h8")]
pub struct ParsePositionError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("expected 8 rows, found {0}")]
    RowCount(usize),
    #[error("row {row} has {len} cells, expected 8")]
    RowLength { row: usize, len: usize },
    #[error("unexpected cell character {0:?}")]
    Cell(char),
}
