//! Greedy one-ply AI

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::action::Action;
use crate::config::AiConfig;
use crate::eval::evaluate;
use crate::game::{Board, GameStatus, PieceColor};
use crate::movegen::legal_actions;

/// A candidate action with the score of the position it leads to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredAction {
    pub action: Action,
    pub score: i32,
}

// ============================================================================
// GREEDY AI
// ============================================================================

/// Picks the action whose resulting position evaluates best for its side.
///
/// Every candidate is played on its own copy of the board; the live board is
/// only read. Ties go to the first candidate in [`legal_actions`] order unless
/// random tie-breaking is configured.
pub struct GreedyAI {
    color: PieceColor,
    config: AiConfig,
    rng: ChaCha8Rng,
}

impl GreedyAI {
    pub fn new(color: PieceColor) -> Self {
        Self::with_config(color, AiConfig::default())
    }

    pub fn with_config(color: PieceColor, config: AiConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { color, config, rng }
    }

    pub fn color(&self) -> PieceColor {
        self.color
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Has no effect on play, see [`AiConfig::search_depth`]
    pub fn search_depth(&self) -> u32 {
        self.config.search_depth
    }

    pub fn set_search_depth(&mut self, depth: u32) {
        self.config.set_search_depth(depth);
    }

    /// Status in which this AI is allowed to act
    pub fn moving_status(&self) -> Option<GameStatus> {
        GameStatus::to_move(self.color)
    }

    /// Score every action available to the side to move, in enumeration order
    pub fn score_actions(&self, board: &Board) -> Vec<ScoredAction> {
        let Some(side) = board.side_to_move() else {
            return Vec::new();
        };

        legal_actions(board)
            .into_iter()
            .filter_map(|action| {
                let mut scratch = *board;
                if !scratch.apply_action(&action) {
                    return None;
                }
                let base = evaluate(&scratch, side, &self.config.heuristics);
                let score = if action.is_capture() {
                    base * self.config.capture_weight
                } else {
                    base
                };
                Some(ScoredAction { action, score })
            })
            .collect()
    }

    /// Best action for the current position, if it is this AI's turn
    pub fn choose(&mut self, board: &Board) -> Option<Action> {
        if Some(board.status()) != self.moving_status() {
            return None;
        }

        let candidates = self.score_actions(board);
        let best = self.select(&candidates)?;

        tracing::debug!(
            color = %self.color,
            action = %best.action,
            score = best.score,
            candidates = candidates.len(),
            "greedy choice"
        );

        Some(best.action)
    }

    /// Linear scan for the highest score
    fn select(&mut self, candidates: &[ScoredAction]) -> Option<ScoredAction> {
        let mut best = *candidates.first()?;
        let mut ties = 1u32;

        for candidate in &candidates[1..] {
            if candidate.score > best.score {
                best = *candidate;
                ties = 1;
            } else if candidate.score == best.score && self.config.random_tie_break {
                // Reservoir sampling keeps each tied candidate with equal probability
                ties += 1;
                if self.rng.gen_range(0..ties) == 0 {
                    best = *candidate;
                }
            }
        }

        Some(best)
    }
}

// ============================================================================
// TESTS
// ============================================================================
