pub mod ai;
pub mod evaluation;
pub mod search;

pub use ai::{Difficulty, OthelloAI, ParseDifficultyError};
pub use evaluation::{evaluate, POSITION_WEIGHTS};
pub use search::{minimax_exhaustive, search_best_move, SearchReport, HARD_SEARCH_DEPTH};
