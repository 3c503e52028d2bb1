use std::fmt;
use std::str::FromStr;
use std::sync::atomic::AtomicBool;

use log::{debug, warn};
use once_cell::sync::Lazy;
use othello_core::{Board, Move, Position, Side};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::search::{search_best_move, search_best_move_cancellable, HARD_SEARCH_DEPTH};

const MIN_DEPTH: u8 = 1;
const MAX_DEPTH: u8 = 8;
const EASY_CORNER_CHANCE: f64 = 0.2; // How often Easy grabs a legal corner

// Medium heuristic weights
const CORNER_BONUS: i32 = 100;
const EDGE_BONUS: i32 = 10;
const NEAR_CORNER_PENALTY: i32 = -50;
const OPPONENT_MOBILITY_PENALTY: i32 = 5;

// Static part of the Medium score for every cell. A corner only gets the
// corner bonus, not the edge bonus on top.
static SQUARE_BONUS: Lazy<[[i32; 8]; 8]> = Lazy::new(|| {
    let mut table = [[0; 8]; 8];
    for pos in Position::all() {
        let mut bonus = 0;
        if pos.is_corner() {
            bonus += CORNER_BONUS;
        } else if pos.is_edge() {
            bonus += EDGE_BONUS;
        }
        if pos.is_corner_adjacent() {
            bonus += NEAR_CORNER_PENALTY;
        }
        table[pos.row as usize][pos.col as usize] = bonus;
    }
    table
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    /// Random moves, with an occasional grab at a corner.
    Easy,
    /// One-ply heuristic: square class, flips and opponent mobility.
    #[default]
    Medium,
    /// Depth-limited minimax with alpha-beta pruning.
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Maps the numeric levels 1..=3 used by front ends.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => f.write_str("easy"),
            Difficulty::Medium => f.write_str("medium"),
            Difficulty::Hard => f.write_str("hard"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty {0:?}, expected easy, medium or hard")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Difficulty::Easy),
            "medium" | "2" => Ok(Difficulty::Medium),
            "hard" | "3" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Move selector for one side of the board. Owns its random source so a seeded
/// AI replays the same game.
#[derive(Debug, Clone)]
pub struct OthelloAI {
    max_depth: u8,
    rng: StdRng,
}

impl OthelloAI {
    pub fn new() -> Self {
        Self {
            max_depth: HARD_SEARCH_DEPTH,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            max_depth: HARD_SEARCH_DEPTH,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Overrides the Hard search depth.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth.clamp(MIN_DEPTH, MAX_DEPTH);
        self
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Chooses a move for `side`, or `None` when `side` has to pass.
    pub fn select_move(&mut self, board: &Board, side: Side, difficulty: Difficulty) -> Option<Move> {
        let moves = board.legal_moves(side);
        if moves.is_empty() {
            return None;
        }

        debug!("{difficulty} AI choosing among {} moves for {side}", moves.len());
        let chosen = match difficulty {
            Difficulty::Easy => self.easy_move(&moves),
            Difficulty::Medium => medium_move(board, side, &moves),
            Difficulty::Hard => search_best_move(board, side, self.max_depth).best_move,
        };
        self.validated(board, side, chosen, &moves)
    }

    /// Like [`OthelloAI::select_move`], but a Hard search stops as soon as
    /// `cancel` is raised. A cancelled search yields `None`.
    pub fn select_move_cancellable(
        &mut self,
        board: &Board,
        side: Side,
        difficulty: Difficulty,
        cancel: &AtomicBool,
    ) -> Option<Move> {
        if difficulty != Difficulty::Hard {
            return self.select_move(board, side, difficulty);
        }

        let moves = board.legal_moves(side);
        if moves.is_empty() {
            return None;
        }
        let report = search_best_move_cancellable(board, side, self.max_depth, cancel)?;
        self.validated(board, side, report.best_move, &moves)
    }

    /// Dispatch by numeric level. Unknown levels play a uniformly random
    /// legal move.
    pub fn select_move_for_level(&mut self, board: &Board, side: Side, level: u8) -> Option<Move> {
        match Difficulty::from_level(level) {
            Some(difficulty) => self.select_move(board, side, difficulty),
            None => {
                debug!("unknown AI level {level}, playing randomly");
                self.random_move(&board.legal_moves(side))
            }
        }
    }

    fn easy_move(&mut self, moves: &[Move]) -> Option<Move> {
        let corners: Vec<Move> = moves.iter().copied().filter(|m| m.is_corner()).collect();
        if !corners.is_empty() && self.rng.gen_bool(EASY_CORNER_CHANCE) {
            return corners.choose(&mut self.rng).copied();
        }
        self.random_move(moves)
    }

    fn random_move(&mut self, moves: &[Move]) -> Option<Move> {
        moves.choose(&mut self.rng).copied()
    }

    // The strategies only ever pick from `moves`; anything else is an engine bug,
    // so fall back to the first legal move rather than hand back garbage.
    fn validated(&self, board: &Board, side: Side, chosen: Option<Move>, moves: &[Move]) -> Option<Move> {
        match chosen {
            Some(mv) if board.is_legal(side, mv) => Some(mv),
            other => {
                warn!("AI produced {other:?} for {side}, falling back to first legal move");
                moves.first().copied()
            }
        }
    }
}

impl Default for OthelloAI {
    fn default() -> Self {
        Self::new()
    }
}

/// Medium heuristic score of playing `mv` for `side`.
pub fn medium_score(board: &Board, side: Side, mv: Move) -> i32 {
    let mut score = SQUARE_BONUS[mv.row as usize][mv.col as usize];
    score += board.flip_count(side, mv) as i32;

    if let Ok(next) = board.apply_move(side, mv) {
        let replies = next.legal_moves_iter(side.opposite()).count() as i32;
        score -= replies * OPPONENT_MOBILITY_PENALTY;
    }

    score
}

/// Highest Medium score among `moves`; ties go to the earliest move.
pub fn medium_move(board: &Board, side: Side, moves: &[Move]) -> Option<Move> {
    let mut best: Option<(Move, i32)> = None;
    for &mv in moves {
        let score = medium_score(board, side, mv);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mv, score));
        }
    }
    best.map(|(mv, _)| mv)
}
