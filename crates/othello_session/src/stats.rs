use othello_core::Outcome;

use crate::GameMode;

/// Running tally of finished games, kept in memory for the session lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameStats {
    pub games_played: u32,
    pub human_wins: u32,
    pub ai_wins: u32,
    pub draws: u32,
}

impl GameStats {
    /// Counts a finished game. Wins and draws are only attributed when a
    /// human played the AI.
    pub fn record(&mut self, mode: GameMode, outcome: Outcome) {
        self.games_played += 1;

        let Some(ai_side) = mode.ai_side() else {
            return;
        };
        match outcome {
            Outcome::Win(side) if side == ai_side => self.ai_wins += 1,
            Outcome::Win(_) => self.human_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }
}
