//! Session configuration: who plays which side and how strong the AI is.

use othello_core::Side;
use othello_engine::{Difficulty, HARD_SEARCH_DEPTH};

/// Which sides accept moves from a human and which are played by the AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// One human against the AI, which plays `ai_side`.
    HumanVsAi { ai_side: Side },
    /// Two humans sharing the board.
    HumanVsHuman,
}

impl GameMode {
    pub fn is_ai(&self, side: Side) -> bool {
        matches!(self, GameMode::HumanVsAi { ai_side } if *ai_side == side)
    }

    pub fn is_human(&self, side: Side) -> bool {
        !self.is_ai(side)
    }

    pub fn ai_side(&self) -> Option<Side> {
        match self {
            GameMode::HumanVsAi { ai_side } => Some(*ai_side),
            GameMode::HumanVsHuman => None,
        }
    }
}

impl Default for GameMode {
    /// The AI takes Black and therefore opens the game.
    fn default() -> Self {
        GameMode::HumanVsAi { ai_side: Side::Black }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    /// Show legal moves to human players.
    pub hints: bool,
    /// Plies searched on Hard.
    pub search_depth: u8,
    /// Seed for every random choice the AI makes; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            difficulty: Difficulty::Medium,
            hints: false,
            search_depth: HARD_SEARCH_DEPTH,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_hints(mut self, hints: bool) -> Self {
        self.hints = hints;
        self
    }

    pub fn with_search_depth(mut self, depth: u8) -> Self {
        self.search_depth = depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_decides_who_is_human() {
        let mode = GameMode::HumanVsAi { ai_side: Side::White };
        assert!(mode.is_ai(Side::White));
        assert!(mode.is_human(Side::Black));
        assert_eq!(mode.ai_side(), Some(Side::White));

        let pvp = GameMode::HumanVsHuman;
        assert!(Side::ALL.iter().all(|&s| pvp.is_human(s)));
        assert_eq!(pvp.ai_side(), None);
    }

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.mode, GameMode::HumanVsAi { ai_side: Side::Black });
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.search_depth, 4);
        assert!(!config.hints);

        let config = config.with_hints(true).with_seed(5).with_difficulty(Difficulty::Hard);
        assert!(config.hints);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.difficulty, Difficulty::Hard);
    }
}
