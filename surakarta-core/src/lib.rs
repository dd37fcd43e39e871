//! Surakarta Core - Game engine and AI
//!
//! This crate provides the core game logic for Surakarta:
//! - Board geometry (6x6 grid, compass directions, corners)
//! - Board state, turn tracking and move/capture legality
//! - Capture path resolution around the corner arcs
//! - Move and capture generation
//! - Static evaluation, a greedy one-ply AI and a capture-first random player

pub mod board;
pub mod game;
pub mod capture;
pub mod movegen;
pub mod action;
pub mod eval;
pub mod ai;
pub mod player;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{Direction, Horizontal, Position, Vertical, BOARD_SIZE, CARDINALS, DIRECTIONS};
pub use game::{Board, GameStatus, PieceColor};
pub use capture::{resolve_capture_path, Arc, ARC_TABLE};
pub use movegen::{capture_targets, legal_actions, legal_captures, legal_moves};
pub use action::Action;
pub use eval::{evaluate, Heuristics, PIECE_VALUE};
pub use ai::{GreedyAI, ScoredAction};
pub use player::{Player, RandomAI};
pub use config::AiConfig;
pub use error::{LayoutError, ParseActionError, RuleViolation};
