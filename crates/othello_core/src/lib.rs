// Core Othello rules: board state, legality, captures and scoring
pub mod board;
pub mod error;
pub mod moves;
pub mod position;
pub mod side;

// Re-export main types for convenience
pub use board::{Board, Score, BOARD_SIZE};
pub use error::{ParseBoardError, ParsePositionError, RulesError};
pub use moves::{Direction, Move};
pub use position::Position;
pub use side::{Outcome, Side};
