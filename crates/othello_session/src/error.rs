use othello_core::{RulesError, Side};
use thiserror::Error;

/// Requests the session refused. None of these leave the game state modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] RulesError),
    #[error("the game is over")]
    GameOver,
    #[error("{0} is played by the AI")]
    NotHumanTurn(Side),
    #[error("{0} is not played by the AI")]
    NotAiTurn(Side),
    #[error("the AI is still thinking")]
    SearchInFlight,
    #[error("no AI search is running")]
    NoSearchPending,
    #[error("nothing to undo")]
    EmptyHistory,
    #[error("the AI search ended without an answer")]
    SearchAborted,
}

impl SessionError {
    /// Requests made at the wrong moment (as opposed to bad moves or an empty
    /// history).
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            SessionError::GameOver
                | SessionError::NotHumanTurn(_)
                | SessionError::NotAiTurn(_)
                | SessionError::SearchInFlight
                | SessionError::NoSearchPending
        )
    }
}
