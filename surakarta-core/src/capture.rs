//! Capture path resolution along the arc tracks
//!
//! A capturing piece looks along a row or column. When its line of sight runs
//! off the board through lane 1-4 of an edge it follows the painted arc and
//! comes back onto the board along a perpendicular lane. Lanes 1 and 4 make
//! up the small circuit, lanes 2 and 3 the large one. The first occupied cell
//! on that path decides the outcome, and an enemy piece only counts once the
//! path has gone round at least one arc.

use crate::board::{Direction, Position};
use crate::game::{Board, PieceColor};

/// One arc of the board: a ray leaving through `exit` comes back from
/// `reentry` travelling `heading`. Both cells lie just outside the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arc {
    pub exit: Position,
    pub reentry: Position,
    pub heading: Direction,
}

const fn arc(exit: (i8, i8), reentry: (i8, i8), heading: Direction) -> Arc {
    Arc {
        exit: Position::new(exit.0, exit.1),
        reentry: Position::new(reentry.0, reentry.1),
        heading,
    }
}

/// Every way off the board that leads onto a track
pub const ARC_TABLE: [Arc; 16] = [
    // left edge
    arc((-1, 1), (1, -1), Direction::DOWN),
    arc((-1, 2), (2, -1), Direction::DOWN),
    arc((-1, 3), (2, 6), Direction::UP),
    arc((-1, 4), (1, 6), Direction::UP),
    // right edge
    arc((6, 1), (4, -1), Direction::DOWN),
    arc((6, 2), (3, -1), Direction::DOWN),
    arc((6, 3), (3, 6), Direction::UP),
    arc((6, 4), (4, 6), Direction::UP),
    // top edge
    arc((1, -1), (-1, 1), Direction::RIGHT),
    arc((2, -1), (-1, 2), Direction::RIGHT),
    arc((3, -1), (6, 2), Direction::LEFT),
    arc((4, -1), (6, 1), Direction::LEFT),
    // bottom edge
    arc((1, 6), (-1, 4), Direction::RIGHT),
    arc((2, 6), (-1, 3), Direction::RIGHT),
    arc((3, 6), (6, 3), Direction::LEFT),
    arc((4, 6), (6, 4), Direction::LEFT),
];

/// A full lap of either circuit crosses four arcs
pub const MAX_ARC_CROSSINGS: u8 = 4;

/// Arc entered by stepping off the board onto `exit`
pub fn arc_at(exit: Position) -> Option<&'static Arc> {
    ARC_TABLE.iter().find(|arc| arc.exit == exit)
}

/// Nearest enemy piece reachable from `origin` by looking along `direction`.
///
/// `arcs_crossed` is the number of arcs already behind the ray; callers
/// starting a fresh search pass 0. Returns `None` when the ray is blocked by
/// a friendly piece, ends in a corner, meets an enemy before crossing any
/// arc, or leaves the board where there is no arc.
pub fn resolve_capture_path(
    board: &Board,
    origin: Position,
    direction: Direction,
    color: PieceColor,
    arcs_crossed: u8,
) -> Option<Position> {
    if !color.is_piece() || !origin.is_valid() || origin.is_corner() || !direction.is_cardinal() {
        return None;
    }

    let mut cursor = origin;
    let mut heading = direction;
    let mut arcs = arcs_crossed;
    let mut laps = 0u8;

    loop {
        let next = cursor.step(heading);

        if !next.is_valid() {
            let arc = arc_at(next)?;
            laps += 1;
            if laps > MAX_ARC_CROSSINGS {
                return None;
            }
            arcs = arcs.saturating_add(1);
            cursor = arc.reentry;
            heading = arc.heading;
            continue;
        }

        match board.cell(next) {
            PieceColor::Empty if next.is_corner() => return None,
            PieceColor::Empty => cursor = next,
            occupant if occupant == color => return None,
            _ => return (arcs > 0).then_some(next),
        }
    }
}
