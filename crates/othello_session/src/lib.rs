// Game session: turn order, passes, undo history and AI dispatch
pub mod config;
pub mod error;
pub mod history;
pub mod session;
pub mod stats;
mod worker;

pub use config::{GameMode, SessionConfig};
pub use error::SessionError;
pub use history::{History, HistoryEntry};
pub use session::{GameSession, MoveOutcome, Phase};
pub use stats::GameStats;

pub use othello_core::{Board, Move, Outcome, Position, Score, Side};
pub use othello_engine::Difficulty;
