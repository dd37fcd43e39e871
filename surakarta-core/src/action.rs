//! Actions and their text notation
//!
//! - simple move: `m <x> <y> <letters>`, letters from `l r u d` (`m 2 4 ru`)
//! - capture: `e <x> <y> <tx> <ty>` (`e 5 2 0 2`)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Direction, Position};
use crate::error::ParseActionError;
use crate::game::PieceColor;

/// A legal-looking action. Legality is decided by the board when applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Move {
        color: PieceColor,
        origin: Position,
        direction: Direction,
    },
    Capture {
        color: PieceColor,
        origin: Position,
        target: Position,
    },
}

impl Action {
    /// Simple move from `origin` to the adjacent `target`
    pub fn step(color: PieceColor, origin: Position, target: Position) -> Option<Action> {
        let dx = target.x.checked_sub(origin.x)?;
        let dy = target.y.checked_sub(origin.y)?;
        let direction = Direction::from_delta(dx, dy)?;
        Some(Action::Move { color, origin, direction })
    }

    pub fn color(&self) -> PieceColor {
        match *self {
            Action::Move { color, .. } | Action::Capture { color, .. } => color,
        }
    }

    pub fn origin(&self) -> Position {
        match *self {
            Action::Move { origin, .. } | Action::Capture { origin, .. } => origin,
        }
    }

    /// Cell the piece ends up on
    pub fn target(&self) -> Position {
        match *self {
            Action::Move { origin, direction, .. } => origin.step(direction),
            Action::Capture { target, .. } => target,
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(self, Action::Capture { .. })
    }

    /// Read an action in notation form on behalf of `color`
    pub fn parse(text: &str, color: PieceColor) -> Result<Action, ParseActionError> {
        if !color.is_piece() {
            return Err(ParseActionError::NoColor);
        }

        let fields: Vec<&str> = text.split_whitespace().collect();
        let kind = *fields.first().ok_or(ParseActionError::Empty)?;

        match kind {
            "m" => {
                expect_fields(&fields, 4)?;
                let origin = parse_position(fields[1], fields[2])?;
                let direction = Direction::from_letters(fields[3])
                    .ok_or_else(|| ParseActionError::InvalidDirection(fields[3].to_string()))?;
                Ok(Action::Move { color, origin, direction })
            }
            "e" => {
                expect_fields(&fields, 5)?;
                let origin = parse_position(fields[1], fields[2])?;
                let target = parse_position(fields[3], fields[4])?;
                Ok(Action::Capture { color, origin, target })
            }
            other => Err(ParseActionError::UnknownKind(other.to_string())),
        }
    }
}

fn expect_fields(fields: &[&str], expected: usize) -> Result<(), ParseActionError> {
    if fields.len() != expected {
        return Err(ParseActionError::FieldCount { expected, got: fields.len() });
    }
    Ok(())
}

/// Parse a coordinate pair. Off-board values are accepted here and rejected by the board.
pub(crate) fn parse_position(x: &str, y: &str) -> Result<Position, ParseActionError> {
    let coord = |s: &str| {
        s.parse::<i8>()
            .map_err(|_| ParseActionError::InvalidCoordinate(s.to_string()))
    };
    Ok(Position::new(coord(x)?, coord(y)?))
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move { origin, direction, .. } => {
                write!(f, "m {} {} {}", origin.x, origin.y, direction.letters())
            }
            Action::Capture { origin, target, .. } => {
                write!(f, "e {} {} {} {}", origin.x, origin.y, target.x, target.y)
            }
        }
    }
}
