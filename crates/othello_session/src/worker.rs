// Background AI search: one rayon task per request, answered over a channel.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvError, TryRecvError};
use std::sync::Arc;

use log::debug;
use othello_core::{Board, Move, Side};
use othello_engine::{Difficulty, OthelloAI};

/// Handle to a search running on the rayon pool. Dropping the handle discards
/// whatever the search eventually produces.
pub(crate) struct PendingSearch {
    side: Side,
    cancel: Arc<AtomicBool>,
    result: Receiver<Option<Move>>,
}

impl PendingSearch {
    /// Starts searching a private copy of `board`.
    pub(crate) fn spawn(board: Board, side: Side, difficulty: Difficulty, depth: u8, seed: u64) -> Self {
        let cancel = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();
        let flag = Arc::clone(&cancel);

        rayon::spawn(move || {
            let mut ai = OthelloAI::with_seed(seed).with_depth(depth);
            let choice = ai.select_move_cancellable(&board, side, difficulty, &flag);
            if flag.load(Ordering::Relaxed) {
                debug!("discarding cancelled search for {side}");
                return;
            }
            // The session may have moved on and dropped the receiver.
            let _ = tx.send(choice);
        });

        Self {
            side,
            cancel,
            result: rx,
        }
    }

    pub(crate) fn side(&self) -> Side {
        self.side
    }

    pub(crate) fn try_result(&self) -> Result<Option<Move>, TryRecvError> {
        self.result.try_recv()
    }

    pub(crate) fn wait(&self) -> Result<Option<Move>, RecvError> {
        self.result.recv()
    }

    pub(crate) fn cancel(self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}
