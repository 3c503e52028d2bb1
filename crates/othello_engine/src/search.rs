// Fixed-depth minimax with alpha-beta pruning over owned board copies
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use othello_core::{Board, Move, Side};

use crate::evaluation::evaluate;

// Search parameters
pub const HARD_SEARCH_DEPTH: u8 = 4; // Plies searched by the Hard AI
const MAXIMIZER: Side = Side::Black; // Scores are always from Black's side
const ALPHA_INIT: i32 = i32::MIN;
const BETA_INIT: i32 = i32::MAX;

/// Outcome of a search from the root position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: Option<Move>,
    /// Minimax value of the root from Black's point of view.
    pub score: i32,
    pub nodes: u64,
    pub leaves: u64,
}

#[derive(Debug, Clone, Copy)]
struct Node {
    score: i32,
    best_move: Option<Move>,
}

/// Raised from deep inside the tree when the caller asked us to stop.
#[derive(Debug)]
struct Cancelled;

struct Searcher<'a> {
    prune: bool,
    cancel: Option<&'a AtomicBool>,
    nodes: u64,
    leaves: u64,
}

impl<'a> Searcher<'a> {
    fn new(prune: bool, cancel: Option<&'a AtomicBool>) -> Self {
        Self {
            prune,
            cancel,
            nodes: 0,
            leaves: 0,
        }
    }

    fn leaf(&mut self, board: &Board) -> Node {
        self.leaves += 1;
        Node {
            score: evaluate(board, MAXIMIZER),
            best_move: None,
        }
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        to_move: Side,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<Node, Cancelled> {
        if self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(Cancelled);
        }
        self.nodes += 1;

        if depth == 0 {
            return Ok(self.leaf(board));
        }

        let moves = board.legal_moves(to_move);
        if moves.is_empty() {
            if !board.has_any_move(to_move.opposite()) {
                return Ok(self.leaf(board));
            }
            // A pass costs a ply but places nothing.
            let passed = self.minimax(board, depth - 1, to_move.opposite(), alpha, beta)?;
            return Ok(Node {
                score: passed.score,
                best_move: None,
            });
        }

        let maximizing = to_move == MAXIMIZER;
        let mut best = Node {
            score: if maximizing { ALPHA_INIT } else { BETA_INIT },
            best_move: None,
        };

        for mv in moves {
            let child = match board.apply_move(to_move, mv) {
                Ok(child) => child,
                Err(_) => continue,
            };
            let score = self
                .minimax(&child, depth - 1, to_move.opposite(), alpha, beta)?
                .score;

            if maximizing {
                if score > best.score || best.best_move.is_none() {
                    best = Node { score, best_move: Some(mv) };
                }
                alpha = alpha.max(best.score);
            } else {
                if score < best.score || best.best_move.is_none() {
                    best = Node { score, best_move: Some(mv) };
                }
                beta = beta.min(best.score);
            }

            if self.prune && beta <= alpha {
                break;
            }
        }

        Ok(best)
    }

    fn run(mut self, board: &Board, side: Side, depth: u8) -> Option<SearchReport> {
        let root = self
            .minimax(board, depth, side, ALPHA_INIT, BETA_INIT)
            .ok()?;
        Some(SearchReport {
            best_move: root.best_move,
            score: root.score,
            nodes: self.nodes,
            leaves: self.leaves,
        })
    }
}

/// Alpha-beta search for `side` to `depth` plies. Black maximises and White
/// minimises, so the root picks the extreme that favours `side`. Among equal
/// scores the first move in row-major order wins.
pub fn search_best_move(board: &Board, side: Side, depth: u8) -> SearchReport {
    let report = Searcher::new(true, None)
        .run(board, side, depth)
        .unwrap_or(SearchReport {
            best_move: None,
            score: evaluate(board, MAXIMIZER),
            nodes: 0,
            leaves: 0,
        });
    debug!(
        "alpha-beta depth {depth} for {side}: {:?} score {} ({} nodes, {} leaves)",
        report.best_move.map(|m| m.to_string()),
        report.score,
        report.nodes,
        report.leaves
    );
    report
}

/// Same as [`search_best_move`] but gives up as soon as `cancel` is raised,
/// returning `None`.
pub fn search_best_move_cancellable(
    board: &Board,
    side: Side,
    depth: u8,
    cancel: &AtomicBool,
) -> Option<SearchReport> {
    let report = Searcher::new(true, Some(cancel)).run(board, side, depth);
    match &report {
        Some(r) => debug!(
            "alpha-beta depth {depth} for {side}: {:?} score {} ({} nodes)",
            r.best_move.map(|m| m.to_string()),
            r.score,
            r.nodes
        ),
        None => debug!("search for {side} cancelled"),
    }
    report
}

/// Plain minimax without pruning. Slow; it exists to check that pruning never
/// changes the chosen move.
pub fn minimax_exhaustive(board: &Board, side: Side, depth: u8) -> SearchReport {
    Searcher::new(false, None)
        .run(board, side, depth)
        .unwrap_or(SearchReport {
            best_move: None,
            score: evaluate(board, MAXIMIZER),
            nodes: 0,
            leaves: 0,
        })
}
