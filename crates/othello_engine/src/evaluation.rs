use othello_core::{Board, Position, Side};

// Positional weights per cell. Corners are the only cells that can never be
// flipped back, so they dominate; the X- and C-squares next to them hand the
// corner to the opponent and are penalised. Edges are mildly good, the
// interior slightly bad (interior discs give the opponent mobility).
pub const POSITION_WEIGHTS: [[i32; 8]; 8] = [
    [100, -20, 10,  5,  5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [ 10,  -2, -1, -1, -1, -1,  -2,  10],
    [  5,  -2, -1, -1, -1, -1,  -2,   5],
    [  5,  -2, -1, -1, -1, -1,  -2,   5],
    [ 10,  -2, -1, -1, -1, -1,  -2,  10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10,  5,  5, 10, -20, 100],
];

/// Static evaluation of `board` from `side`'s point of view: the weights of
/// `side`'s discs minus the weights of the opponent's discs.
pub fn evaluate(board: &Board, side: Side) -> i32 {
    let mut score = 0;

    for (r, row) in board.rows().iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            match cell {
                Some(s) if *s == side => score += POSITION_WEIGHTS[r][c],
                Some(_) => score -= POSITION_WEIGHTS[r][c],
                None => {}
            }
        }
    }

    score
}

/// Weight of a single cell.
pub fn position_weight(pos: Position) -> i32 {
    POSITION_WEIGHTS[pos.row as usize][pos.col as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_symmetric() {
        for r in 0..8 {
            for c in 0..8 {
                assert_eq!(POSITION_WEIGHTS[r][c], POSITION_WEIGHTS[c][r]);
                assert_eq!(POSITION_WEIGHTS[r][c], POSITION_WEIGHTS[7 - r][c]);
                assert_eq!(POSITION_WEIGHTS[r][c], POSITION_WEIGHTS[r][7 - c]);
            }
        }
    }

    #[test]
    fn opening_position_is_balanced() {
        let board = Board::new();
        assert_eq!(evaluate(&board, Side::Black), 0);
        assert_eq!(evaluate(&board, Side::White), 0);
    }

    #[test]
    fn evaluation_is_zero_sum() {
        let mut board = Board::empty();
        board.set(Position::new(0, 0).unwrap(), Some(Side::Black));
        board.set(Position::new(1, 1).unwrap(), Some(Side::White));
        board.set(Position::new(0, 3).unwrap(), Some(Side::White));

        assert_eq!(evaluate(&board, Side::Black), 100 + 50 - 5);
        assert_eq!(evaluate(&board, Side::White), -(100 + 50 - 5));
    }

    #[test]
    fn corner_outweighs_everything_next_to_it() {
        let corner = Position::new(7, 7).unwrap();
        assert_eq!(position_weight(corner), 100);
        assert_eq!(position_weight(Position::new(6, 6).unwrap()), -50);
        assert_eq!(position_weight(Position::new(7, 6).unwrap()), -20);
        assert_eq!(position_weight(Position::new(4, 4).unwrap()), -1);
    }
}
