use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::error::{ParseBoardError, RulesError};
use crate::moves::{run_length, scan_run};
use crate::{Direction, Move, Outcome, Position, Side};

pub const BOARD_SIZE: usize = 8;

type Cells = [[Option<Side>; BOARD_SIZE]; BOARD_SIZE];

/// Disc counts for both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub black: u32,
    pub white: u32,
}

impl Score {
    pub fn count(&self, side: Side) -> u32 {
        match side {
            Side::Black => self.black,
            Side::White => self.white,
        }
    }

    pub fn total(&self) -> u32 {
        self.black + self.white
    }

    /// The side with more discs wins; equal counts are a draw.
    pub fn outcome(&self) -> Outcome {
        use std::cmp::Ordering;
        match self.black.cmp(&self.white) {
            Ordering::Greater => Outcome::Win(Side::Black),
            Ordering::Less => Outcome::Win(Side::White),
            Ordering::Equal => Outcome::Draw,
        }
    }
}

/// 8x8 grid of discs. A plain value: copying a board never aliases the original,
/// and every rule below is a pure function of `self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Cells,
}

impl Board {
    /// The canonical opening: White on d4/e5, Black on e4/d5.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    fn setup_initial_position(&mut self) {
        self.cells[3][3] = Some(Side::White);
        self.cells[3][4] = Some(Side::Black);
        self.cells[4][3] = Some(Side::Black);
        self.cells[4][4] = Some(Side::White);
    }

    /// Disc at `pos`; `None` for an empty cell or a coordinate off the board.
    pub fn get(&self, pos: Position) -> Option<Side> {
        self.cells
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
            .copied()
            .flatten()
    }

    /// Overwrites a single cell without applying any rule. Meant for building
    /// fixtures; game play goes through [`Board::apply_move`].
    pub fn set(&mut self, pos: Position, disc: Option<Side>) {
        if let Some(cell) = self
            .cells
            .get_mut(pos.row as usize)
            .and_then(|row| row.get_mut(pos.col as usize))
        {
            *cell = disc;
        }
    }

    /// Row-major view of all 64 cells.
    pub fn rows(&self) -> &[[Option<Side>; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Opposing discs that a disc of `side` placed at `mv` would bracket along
    /// `direction`. Empty when that direction captures nothing.
    pub fn capture_run(&self, side: Side, mv: Move, direction: Direction) -> Vec<Position> {
        scan_run(self, side, mv, direction)
    }

    /// Every disc flipped by playing `mv`, grouped by direction in
    /// [`Direction::ALL`] order.
    pub fn flips(&self, side: Side, mv: Move) -> Vec<Position> {
        Direction::ALL
            .iter()
            .flat_map(|&dir| scan_run(self, side, mv, dir))
            .collect()
    }

    /// Number of discs `mv` would flip, without allocating.
    pub fn flip_count(&self, side: Side, mv: Move) -> usize {
        Direction::ALL
            .iter()
            .map(|&dir| run_length(self, side, mv, dir))
            .sum()
    }

    pub fn is_legal(&self, side: Side, mv: Move) -> bool {
        Position::new(mv.row, mv.col).is_some()
            && self.get(mv).is_none()
            && Direction::ALL
                .iter()
                .any(|&dir| run_length(self, side, mv, dir) > 0)
    }

    /// Legal moves for `side` in row-major order.
    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        self.legal_moves_iter(side).collect()
    }

    pub fn legal_moves_iter(&self, side: Side) -> impl Iterator<Item = Move> + '_ {
        Position::all().filter(move |&pos| self.is_legal(side, pos))
    }

    pub fn has_any_move(&self, side: Side) -> bool {
        self.legal_moves_iter(side).next().is_some()
    }

    /// Returns the board after `side` plays `mv`. `self` is left untouched, so
    /// an illegal move never corrupts the caller's board.
    pub fn apply_move(&self, side: Side, mv: Move) -> Result<Board, RulesError> {
        let mv = Position::try_new(mv.row as i32, mv.col as i32)?;
        if self.get(mv).is_some() {
            return Err(RulesError::Occupied(mv));
        }

        let flipped = self.flips(side, mv);
        if flipped.is_empty() {
            return Err(RulesError::NoCapture { side, position: mv });
        }

        let mut next = *self;
        next.set(mv, Some(side));
        for &pos in &flipped {
            next.set(pos, Some(side));
        }
        trace!("{side} plays {mv}, flipping {} disc(s)", flipped.len());

        Ok(next)
    }

    pub fn count(&self, side: Side) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Some(side))
            .count() as u32
    }

    pub fn empty_count(&self) -> u32 {
        self.cells.iter().flatten().filter(|cell| cell.is_none()).count() as u32
    }

    pub fn score(&self) -> Score {
        Score {
            black: self.count(Side::Black),
            white: self.count(Side::White),
        }
    }

    /// True iff neither side can move. A full board is one such case but not
    /// the only one.
    pub fn is_terminal(&self) -> bool {
        !self.has_any_move(Side::Black) && !self.has_any_move(Side::White)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let c = cell.map_or('.', Side::symbol);
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Parses the format produced by `Display`: eight lines of `B`, `W` or `.`.
/// Blank lines and surrounding whitespace are ignored.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != BOARD_SIZE {
            return Err(ParseBoardError::RowCount(rows.len()));
        }

        let mut board = Board::empty();
        for (r, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != BOARD_SIZE {
                return Err(ParseBoardError::RowLength { row: r, len });
            }
            for (c, ch) in line.chars().enumerate() {
                board.cells[r][c] = match ch {
                    'B' | 'b' => Some(Side::Black),
                    'W' | 'w' => Some(Side::White),
                    '.' => None,
                    other => return Err(ParseBoardError::Cell(other)),
                };
            }
        }
        Ok(board)
    }
}
