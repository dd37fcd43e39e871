//! Static position evaluation

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::game::{Board, PieceColor};

/// Value of one piece before positional weighting
pub const PIECE_VALUE: i32 = 300;

/// Positional weights for black, indexed `[y][x]`. Black starts at the top.
pub const BLACK_WEIGHTS: [[i32; 6]; 6] = [
    [50, 100, 100, 100, 100, 50],
    [100, 120, 150, 150, 120, 100],
    [100, 150, 120, 120, 150, 100],
    [110, 160, 130, 130, 160, 110],
    [110, 130, 160, 160, 130, 110],
    [50, 100, 100, 100, 100, 50],
];

/// Positional weights for red: black's table mirrored top to bottom
pub const RED_WEIGHTS: [[i32; 6]; 6] = [
    [50, 100, 100, 100, 100, 50],
    [110, 130, 160, 160, 130, 110],
    [110, 160, 130, 130, 160, 110],
    [100, 150, 120, 120, 150, 100],
    [100, 120, 150, 150, 120, 100],
    [50, 100, 100, 100, 100, 50],
];

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    pub piece_value: i32,
    pub red_weights: [[i32; 6]; 6],
    pub black_weights: [[i32; 6]; 6],
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            piece_value: PIECE_VALUE,
            red_weights: RED_WEIGHTS,
            black_weights: BLACK_WEIGHTS,
        }
    }
}

impl Heuristics {
    fn weight(&self, color: PieceColor, pos: Position) -> i32 {
        let (row, col) = pos.index();
        match color {
            PieceColor::Red => self.red_weights[row][col],
            PieceColor::Black => self.black_weights[row][col],
            PieceColor::Empty => 0,
        }
    }

    /// Material plus positional weight of one side
    pub fn side_value(&self, board: &Board, color: PieceColor) -> i32 {
        board
            .pieces(color)
            .map(|pos| self.piece_value + self.weight(color, pos))
            .sum()
    }
}

/// Evaluate from `color`'s perspective: positive favours `color`
pub fn evaluate(board: &Board, color: PieceColor, heuristics: &Heuristics) -> i32 {
    if !color.is_piece() {
        return 0;
    }
    heuristics.side_value(board, color) - heuristics.side_value(board, color.opponent())
}
