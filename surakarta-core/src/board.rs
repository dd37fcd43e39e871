//! Square board geometry: positions, directions and corners

use serde::{Deserialize, Serialize};

/// Board side length
pub const BOARD_SIZE: i8 = 6;

/// Largest valid coordinate
const MAX_COORD: i8 = BOARD_SIZE - 1;

/// Grid coordinates. `x` grows to the right, `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Check if this position is on the board
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }

    /// One of the four corner cells. The arc tracks never pass through these.
    pub fn is_corner(&self) -> bool {
        (self.x == 0 || self.x == MAX_COORD) && (self.y == 0 || self.y == MAX_COORD)
    }

    /// The neighbouring position in `direction`. May be off the board.
    /// Saturates at the `i8` limits, which are off the board anyway.
    pub fn step(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Row-major index into a 36-cell array
    pub(crate) fn index(&self) -> (usize, usize) {
        (self.y as usize, self.x as usize)
    }

    /// All on-board positions in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Position::new(x, y)))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Vertical component of a direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vertical {
    None,
    Up,
    Down,
}

/// Horizontal component of a direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizontal {
    None,
    Left,
    Right,
}

/// A compass direction made of two independent axes.
///
/// `Direction { vertical: None, horizontal: None }` is representable but is
/// not part of [`DIRECTIONS`] and never names a legal move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

impl Direction {
    pub const UP: Direction = Direction::new(Vertical::Up, Horizontal::None);
    pub const DOWN: Direction = Direction::new(Vertical::Down, Horizontal::None);
    pub const LEFT: Direction = Direction::new(Vertical::None, Horizontal::Left);
    pub const RIGHT: Direction = Direction::new(Vertical::None, Horizontal::Right);
    pub const UP_LEFT: Direction = Direction::new(Vertical::Up, Horizontal::Left);
    pub const UP_RIGHT: Direction = Direction::new(Vertical::Up, Horizontal::Right);
    pub const DOWN_LEFT: Direction = Direction::new(Vertical::Down, Horizontal::Left);
    pub const DOWN_RIGHT: Direction = Direction::new(Vertical::Down, Horizontal::Right);

    pub const fn new(vertical: Vertical, horizontal: Horizontal) -> Self {
        Self { vertical, horizontal }
    }

    /// Offset (dx, dy) of a single step
    pub fn delta(&self) -> (i8, i8) {
        let dx = match self.horizontal {
            Horizontal::None => 0,
            Horizontal::Left => -1,
            Horizontal::Right => 1,
        };
        let dy = match self.vertical {
            Vertical::None => 0,
            Vertical::Up => -1,
            Vertical::Down => 1,
        };
        (dx, dy)
    }

    /// Direction of a single-step offset, if it is one
    pub fn from_delta(dx: i8, dy: i8) -> Option<Direction> {
        let horizontal = match dx {
            -1 => Horizontal::Left,
            0 => Horizontal::None,
            1 => Horizontal::Right,
            _ => return None,
        };
        let vertical = match dy {
            -1 => Vertical::Up,
            0 => Vertical::None,
            1 => Vertical::Down,
            _ => return None,
        };
        let direction = Direction::new(vertical, horizontal);
        direction.is_step().then_some(direction)
    }

    /// Exactly one axis is set
    pub fn is_cardinal(&self) -> bool {
        (self.vertical == Vertical::None) != (self.horizontal == Horizontal::None)
    }

    /// At least one axis is set
    pub fn is_step(&self) -> bool {
        self.vertical != Vertical::None || self.horizontal != Horizontal::None
    }

    /// Notation letters, horizontal first: "l", "ru", "d"
    pub fn letters(&self) -> String {
        let mut s = String::with_capacity(2);
        match self.horizontal {
            Horizontal::Left => s.push('l'),
            Horizontal::Right => s.push('r'),
            Horizontal::None => {}
        }
        match self.vertical {
            Vertical::Up => s.push('u'),
            Vertical::Down => s.push('d'),
            Vertical::None => {}
        }
        s
    }

    /// Parse notation letters in any order. Contradictory or repeated axes are rejected.
    pub fn from_letters(letters: &str) -> Option<Direction> {
        let mut vertical = Vertical::None;
        let mut horizontal = Horizontal::None;
        for c in letters.chars() {
            match c.to_ascii_lowercase() {
                'u' if vertical == Vertical::None => vertical = Vertical::Up,
                'd' if vertical == Vertical::None => vertical = Vertical::Down,
                'l' if horizontal == Horizontal::None => horizontal = Horizontal::Left,
                'r' if horizontal == Horizontal::None => horizontal = Horizontal::Right,
                _ => return None,
            }
        }
        let direction = Direction::new(vertical, horizontal);
        direction.is_step().then_some(direction)
    }
}

/// The 8 step directions, in row-major order of the 3x3 neighbourhood
pub const DIRECTIONS: [Direction; 8] = [
    Direction::UP_LEFT,
    Direction::UP,
    Direction::UP_RIGHT,
    Direction::LEFT,
    Direction::RIGHT,
    Direction::DOWN_LEFT,
    Direction::DOWN,
    Direction::DOWN_RIGHT,
];

/// Capture rays run along these only
pub const CARDINALS: [Direction; 4] = [
    Direction::LEFT,
    Direction::RIGHT,
    Direction::UP,
    Direction::DOWN,
];
