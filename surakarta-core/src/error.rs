//! Error types
//!
//! Rule violations are ordinary outcomes of asking the board to do something
//! illegal. The boolean board API swallows them; the `try_*` variants report
//! which rule was broken.

use thiserror::Error;

/// Why a move or capture was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("position is off the board")]
    OutOfBounds,
    #[error("it is not this side's turn")]
    WrongTurn,
    #[error("game is not in progress")]
    WrongStatus,
    #[error("origin does not hold a piece of the acting color")]
    NoOwnership,
    #[error("destination is occupied")]
    Blocked,
    #[error("corners cannot take part in a capture")]
    CornerExclusion,
    #[error("no capturable piece along any arc path")]
    NoPath,
}

/// Failure to read action notation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseActionError {
    #[error("empty action")]
    Empty,
    #[error("unknown action kind: {0}")]
    UnknownKind(String),
    #[error("expected {expected} fields, got {got}")]
    FieldCount { expected: usize, got: usize },
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("invalid direction: {0}")]
    InvalidDirection(String),
    #[error("acting color must be red or black")]
    NoColor,
}

/// Failure to build a board from a text layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("row {row} has {len} cells, expected 6")]
    RowLength { row: usize, len: usize },
    #[error("unknown cell '{cell}' in row {row}")]
    UnknownCell { row: usize, cell: char },
}
