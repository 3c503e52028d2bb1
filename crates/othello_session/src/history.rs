use othello_core::{Board, Move, Side};

/// Snapshot taken just before a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub board: Board,
    pub to_move: Side,
    /// The move that was played from this snapshot.
    pub mv: Move,
}

/// Undo stack. Restoring an entry is a full state restore, never an inverse
/// move computation.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moves played so far, oldest first.
    pub fn moves(&self) -> impl Iterator<Item = (Side, Move)> + '_ {
        self.entries.iter().map(|e| (e.to_move, e.mv))
    }
}
