//! Players that can drive a game, and the capture-first random player

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::action::Action;
use crate::ai::GreedyAI;
use crate::board::{Direction, Position};
use crate::game::{Board, PieceColor};
use crate::movegen::{capture_targets, legal_moves};

/// Anything that picks actions for one color
pub trait Player: Send {
    fn color(&self) -> PieceColor;

    /// Action for the current position, `None` when it is not this player's
    /// turn or there is nothing to play
    fn choose(&mut self, board: &Board) -> Option<Action>;

    /// Choose and play on `board`
    fn next_step(&mut self, board: &mut Board) -> Option<Action> {
        let action = self.choose(board)?;
        if !board.apply_action(&action) {
            tracing::warn!(%action, "chosen action was rejected by the board");
            return None;
        }
        Some(action)
    }
}

impl Player for GreedyAI {
    fn color(&self) -> PieceColor {
        GreedyAI::color(self)
    }

    fn choose(&mut self, board: &Board) -> Option<Action> {
        GreedyAI::choose(self, board)
    }
}

// ============================================================================
// RANDOM PLAYER
// ============================================================================

/// Captures whenever it can, otherwise steps at random.
///
/// A piece is drawn first and then one of its options, so pieces with many
/// options are not favoured.
pub struct RandomAI {
    color: PieceColor,
    rng: ChaCha8Rng,
}

impl RandomAI {
    pub fn new(color: PieceColor) -> Self {
        Self {
            color,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(color: PieceColor, seed: u64) -> Self {
        Self {
            color,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomAI {
    fn color(&self) -> PieceColor {
        self.color
    }

    fn choose(&mut self, board: &Board) -> Option<Action> {
        if board.side_to_move() != Some(self.color) {
            return None;
        }

        let mut capturers: Vec<(Position, Vec<Position>)> = Vec::new();
        let mut movers: Vec<(Position, Vec<Direction>)> = Vec::new();
        for origin in board.pieces(self.color) {
            let targets = capture_targets(board, origin, self.color);
            if !targets.is_empty() {
                capturers.push((origin, targets));
            }
            let directions = legal_moves(board, origin, self.color);
            if !directions.is_empty() {
                movers.push((origin, directions));
            }
        }

        let color = self.color;
        if let Some((origin, targets)) = capturers.choose(&mut self.rng) {
            let target = *targets.choose(&mut self.rng)?;
            return Some(Action::Capture { color, origin: *origin, target });
        }
        let (origin, directions) = movers.choose(&mut self.rng)?;
        let direction = *directions.choose(&mut self.rng)?;
        Some(Action::Move { color, origin: *origin, direction })
    }
}
