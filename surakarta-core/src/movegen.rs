//! Move and capture generation

use rustc_hash::FxHashSet;

use crate::action::Action;
use crate::board::{Direction, Position, CARDINALS, DIRECTIONS};
use crate::capture::resolve_capture_path;
use crate::game::{Board, PieceColor};

/// Directions the piece at `pos` may step in, in [`DIRECTIONS`] order
pub fn legal_moves(board: &Board, pos: Position, color: PieceColor) -> Vec<Direction> {
    DIRECTIONS
        .into_iter()
        .filter(|&dir| board.can_move(pos, dir, color))
        .collect()
}

/// Capturable enemy positions in [`CARDINALS`] order, without duplicates.
///
/// Empty unless it is `color`'s turn and `pos` is a non-corner cell holding
/// one of its pieces.
pub fn capture_targets(board: &Board, pos: Position, color: PieceColor) -> Vec<Position> {
    if board.check_turn(pos, color).is_err() || pos.is_corner() {
        return Vec::new();
    }

    let mut targets = Vec::with_capacity(CARDINALS.len());
    for dir in CARDINALS {
        if let Some(target) = resolve_capture_path(board, pos, dir, color, 0) {
            if !target.is_corner() && !targets.contains(&target) {
                targets.push(target);
            }
        }
    }
    targets
}

/// Capturable enemy positions as a set
pub fn legal_captures(board: &Board, pos: Position, color: PieceColor) -> FxHashSet<Position> {
    capture_targets(board, pos, color).into_iter().collect()
}

/// Every action available to the side to move.
///
/// Cells are visited row-major; for each cell captures come first, then
/// simple moves. Evaluators rely on this order for reproducible tie-breaks.
pub fn legal_actions(board: &Board) -> Vec<Action> {
    let Some(color) = board.side_to_move() else {
        return Vec::new();
    };

    let mut actions = Vec::new();
    for origin in board.pieces(color) {
        for target in capture_targets(board, origin, color) {
            actions.push(Action::Capture { color, origin, target });
        }
        for direction in legal_moves(board, origin, color) {
            actions.push(Action::Move { color, origin, direction });
        }
    }
    actions
}
