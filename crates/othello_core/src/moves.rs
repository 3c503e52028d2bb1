use crate::{Board, Position, Side};

/// A move is the cell a disc is placed on. It only has meaning together with
/// the side making it and the board it is applied to.
pub type Move = Position;

/// One of the eight compass offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub d_row: i8,
    pub d_col: i8,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::new(-1, -1),
        Direction::new(-1, 0),
        Direction::new(-1, 1),
        Direction::new(0, -1),
        Direction::new(0, 1),
        Direction::new(1, -1),
        Direction::new(1, 0),
        Direction::new(1, 1),
    ];

    const fn new(d_row: i8, d_col: i8) -> Self {
        Self { d_row, d_col }
    }

    /// The neighbour of `pos` in this direction, or `None` past the edge.
    pub fn step(self, pos: Position) -> Option<Position> {
        let row = pos.row as i32 + self.d_row as i32;
        let col = pos.col as i32 + self.d_col as i32;
        if row < 0 || col < 0 {
            return None;
        }
        Position::new(row as u8, col as u8)
    }
}

/// Walks outward from `origin` along `direction`, collecting opposing discs.
/// The run only counts when it is non-empty and closed by a disc of `side`;
/// running into an empty cell or off the board yields an empty run.
pub(crate) fn scan_run(board: &Board, side: Side, origin: Position, direction: Direction) -> Vec<Position> {
    let opponent = side.opposite();
    let mut run = Vec::new();
    let mut current = direction.step(origin);

    while let Some(pos) = current {
        match board.get(pos) {
            Some(s) if s == opponent => run.push(pos),
            Some(_) if !run.is_empty() => return run,
            _ => break,
        }
        current = direction.step(pos);
    }

    run.clear();
    run
}

/// Allocation-free variant of [`scan_run`] used on hot paths: returns the
/// run length, zero when the direction does not capture.
pub(crate) fn run_length(board: &Board, side: Side, origin: Position, direction: Direction) -> usize {
    let opponent = side.opposite();
    let mut len = 0;
    let mut current = direction.step(origin);

    while let Some(pos) = current {
        match board.get(pos) {
            Some(s) if s == opponent => len += 1,
            Some(_) => return len,
            None => return 0,
        }
        current = direction.step(pos);
    }

    0
}
