//! Board state, turn tracking and the two state-changing operations

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::board::{Direction, Position, BOARD_SIZE};
use crate::error::{LayoutError, RuleViolation};
use crate::movegen;

// ============================================================================
// CONSTANTS
// ============================================================================

const SIZE: usize = BOARD_SIZE as usize;

/// Rows filled with black pieces at the start
const BLACK_HOME_ROWS: usize = 2;

/// First row filled with red pieces at the start
const RED_HOME_START: usize = 4;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Content of a grid cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceColor {
    #[default]
    Empty,
    Red,
    Black,
}

impl PieceColor {
    /// The other side. `Empty` has no opponent and maps to itself.
    pub fn opponent(self) -> Self {
        match self {
            PieceColor::Red => PieceColor::Black,
            PieceColor::Black => PieceColor::Red,
            PieceColor::Empty => PieceColor::Empty,
        }
    }

    pub fn is_piece(self) -> bool {
        self != PieceColor::Empty
    }

    fn symbol(self) -> char {
        match self {
            PieceColor::Empty => '-',
            PieceColor::Red => 'R',
            PieceColor::Black => 'B',
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceColor::Empty => "empty",
            PieceColor::Red => "red",
            PieceColor::Black => "black",
        };
        f.write_str(name)
    }
}

/// Game status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Before the first game starts
    #[default]
    Paused,
    RedToMove,
    BlackToMove,
    RedWon,
    BlackWon,
}

impl GameStatus {
    /// The "to move" status of a color
    pub fn to_move(color: PieceColor) -> Option<GameStatus> {
        match color {
            PieceColor::Red => Some(GameStatus::RedToMove),
            PieceColor::Black => Some(GameStatus::BlackToMove),
            PieceColor::Empty => None,
        }
    }

    /// Color whose turn it is, if the game is in progress
    pub fn side_to_move(self) -> Option<PieceColor> {
        match self {
            GameStatus::RedToMove => Some(PieceColor::Red),
            GameStatus::BlackToMove => Some(PieceColor::Black),
            _ => None,
        }
    }

    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::RedWon | GameStatus::BlackWon)
    }

    pub fn winner(self) -> Option<PieceColor> {
        match self {
            GameStatus::RedWon => Some(PieceColor::Red),
            GameStatus::BlackWon => Some(PieceColor::Black),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameStatus::Paused => "paused",
            GameStatus::RedToMove => "red's turn",
            GameStatus::BlackToMove => "black's turn",
            GameStatus::RedWon => "red won",
            GameStatus::BlackWon => "black won",
        };
        f.write_str(text)
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Board state (copy to experiment)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Grid indexed `[y][x]`
    cells: [[PieceColor; SIZE]; SIZE],
    status: GameStatus,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Initial formation, paused until [`Board::new_game`] is called
    pub fn new() -> Self {
        Self {
            cells: initial_cells(),
            status: GameStatus::Paused,
        }
    }

    /// Initial formation with red to move
    pub fn started() -> Self {
        let mut board = Self::new();
        board.new_game();
        board
    }

    /// Build a board from six text rows (`B`, `R`, `-` or `.`), top row first.
    /// Whitespace inside a row is ignored.
    pub fn from_layout(rows: [&str; SIZE], status: GameStatus) -> Result<Self, LayoutError> {
        let mut cells = [[PieceColor::Empty; SIZE]; SIZE];
        for (y, row) in rows.iter().enumerate() {
            let symbols: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != SIZE {
                return Err(LayoutError::RowLength { row: y, len: symbols.len() });
            }
            for (x, &c) in symbols.iter().enumerate() {
                cells[y][x] = match c {
                    'B' | 'b' => PieceColor::Black,
                    'R' | 'r' => PieceColor::Red,
                    '-' | '.' => PieceColor::Empty,
                    other => return Err(LayoutError::UnknownCell { row: y, cell: other }),
                };
            }
        }
        Ok(Self { cells, status })
    }

    /// Reset to the initial formation and give red the first move
    pub fn new_game(&mut self) {
        self.cells = initial_cells();
        self.status = GameStatus::RedToMove;
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Game status
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Cell content, `None` for positions off the board
    pub fn piece_at(&self, pos: Position) -> Option<PieceColor> {
        pos.is_valid().then(|| self.cell(pos))
    }

    /// Cell content of an on-board position
    pub(crate) fn cell(&self, pos: Position) -> PieceColor {
        let (row, col) = pos.index();
        self.cells[row][col]
    }

    /// Number of pieces of a color
    pub fn count(&self, color: PieceColor) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == color).count()
    }

    /// Positions holding `color`, row-major
    pub fn pieces(&self, color: PieceColor) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(move |&pos| self.cell(pos) == color)
    }

    /// Color whose turn it is
    pub fn side_to_move(&self) -> Option<PieceColor> {
        self.status.side_to_move()
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn winner(&self) -> Option<PieceColor> {
        self.status.winner()
    }

    // ========================================================================
    // LEGALITY
    // ========================================================================

    /// Shared preconditions for both moves and captures: the game is running,
    /// it is `color`'s turn and `pos` holds one of its pieces.
    pub(crate) fn check_turn(&self, pos: Position, color: PieceColor) -> Result<(), RuleViolation> {
        if !color.is_piece() {
            return Err(RuleViolation::NoOwnership);
        }
        if !pos.is_valid() {
            return Err(RuleViolation::OutOfBounds);
        }
        let side = self.status.side_to_move().ok_or(RuleViolation::WrongStatus)?;
        if side != color {
            return Err(RuleViolation::WrongTurn);
        }
        if self.cell(pos) != color {
            return Err(RuleViolation::NoOwnership);
        }
        Ok(())
    }

    /// Destination of a legal simple move
    pub(crate) fn check_move(
        &self,
        origin: Position,
        direction: Direction,
        color: PieceColor,
    ) -> Result<Position, RuleViolation> {
        self.check_turn(origin, color)?;
        let dest = origin.step(direction);
        if !direction.is_step() || !dest.is_valid() {
            return Err(RuleViolation::OutOfBounds);
        }
        if self.cell(dest) != PieceColor::Empty {
            return Err(RuleViolation::Blocked);
        }
        Ok(dest)
    }

    /// Whether a simple move would be accepted
    pub fn can_move(&self, origin: Position, direction: Direction, color: PieceColor) -> bool {
        self.check_move(origin, direction, color).is_ok()
    }

    /// Directions the piece at `pos` may step in
    pub fn legal_moves(&self, pos: Position, color: PieceColor) -> Vec<Direction> {
        movegen::legal_moves(self, pos, color)
    }

    /// Enemy positions the piece at `pos` may capture
    pub fn legal_captures(&self, pos: Position, color: PieceColor) -> FxHashSet<Position> {
        movegen::legal_captures(self, pos, color)
    }

    // ========================================================================
    // STATE CHANGES
    // ========================================================================

    /// Step one piece onto an empty neighbour. Returns the destination.
    pub fn try_move(
        &mut self,
        origin: Position,
        direction: Direction,
        color: PieceColor,
    ) -> Result<Position, RuleViolation> {
        let dest = self.check_move(origin, direction, color)?;
        self.relocate(origin, dest, color);
        Ok(dest)
    }

    /// Capture the enemy piece at `target` along an arc path
    pub fn try_capture(
        &mut self,
        origin: Position,
        target: Position,
        color: PieceColor,
    ) -> Result<(), RuleViolation> {
        if !target.is_valid() {
            return Err(RuleViolation::OutOfBounds);
        }
        self.check_turn(origin, color)?;
        if origin.is_corner() || target.is_corner() {
            return Err(RuleViolation::CornerExclusion);
        }
        if !movegen::capture_targets(self, origin, color).contains(&target) {
            return Err(RuleViolation::NoPath);
        }
        self.relocate(origin, target, color);
        Ok(())
    }

    pub fn try_action(&mut self, action: &Action) -> Result<(), RuleViolation> {
        match *action {
            Action::Move { color, origin, direction } => {
                self.try_move(origin, direction, color).map(|_| ())
            }
            Action::Capture { color, origin, target } => self.try_capture(origin, target, color),
        }
    }

    pub fn apply_move(
        &mut self,
        origin: Position,
        direction: Direction,
        color: PieceColor,
    ) -> bool {
        match self.try_move(origin, direction, color) {
            Ok(_) => true,
            Err(violation) => {
                tracing::trace!(%origin, ?direction, %color, %violation, "move rejected");
                false
            }
        }
    }

    pub fn apply_capture(&mut self, origin: Position, target: Position, color: PieceColor) -> bool {
        match self.try_capture(origin, target, color) {
            Ok(()) => true,
            Err(violation) => {
                tracing::trace!(%origin, %target, %color, %violation, "capture rejected");
                false
            }
        }
    }

    pub fn apply_action(&mut self, action: &Action) -> bool {
        match self.try_action(action) {
            Ok(()) => true,
            Err(violation) => {
                tracing::trace!(%action, %violation, "action rejected");
                false
            }
        }
    }

    fn relocate(&mut self, from: Position, to: Position, color: PieceColor) {
        let (fy, fx) = from.index();
        let (ty, tx) = to.index();
        self.cells[ty][tx] = color;
        self.cells[fy][fx] = PieceColor::Empty;
        self.refresh_status();
    }

    /// Recount pieces after a mutation: an empty side loses, otherwise the turn passes
    fn refresh_status(&mut self) {
        let red = self.count(PieceColor::Red);
        let black = self.count(PieceColor::Black);

        self.status = if red == 0 {
            GameStatus::BlackWon
        } else if black == 0 {
            GameStatus::RedWon
        } else {
            match self.status {
                GameStatus::RedToMove => GameStatus::BlackToMove,
                GameStatus::BlackToMove => GameStatus::RedToMove,
                other => other,
            }
        };
    }
}

fn initial_cells() -> [[PieceColor; SIZE]; SIZE] {
    let mut cells = [[PieceColor::Empty; SIZE]; SIZE];
    for (y, row) in cells.iter_mut().enumerate() {
        let color = if y < BLACK_HOME_ROWS {
            PieceColor::Black
        } else if y < RED_HOME_START {
            PieceColor::Empty
        } else {
            PieceColor::Red
        };
        row.fill(color);
    }
    cells
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for x in 0..SIZE {
            write!(f, " {x}")?;
        }
        writeln!(f)?;
        for (y, row) in self.cells.iter().enumerate() {
            write!(f, "{y}")?;
            for cell in row {
                write!(f, " {}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        write!(f, "status: {}", self.status)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i8, y: i8) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_new_game() {
        let board = Board::started();
        assert_eq!(board.status(), GameStatus::RedToMove);
        assert_eq!(board.piece_at(pos(0, 0)), Some(PieceColor::Black));
        assert_eq!(board.piece_at(pos(0, 5)), Some(PieceColor::Red));
        assert_eq!(board.piece_at(pos(2, 2)), Some(PieceColor::Empty));
        assert_eq!(board.count(PieceColor::Red), 12);
        assert_eq!(board.count(PieceColor::Black), 12);
    }

    #[test]
    fn test_fresh_board_is_paused() {
        let mut board = Board::new();
        assert_eq!(board.status(), GameStatus::Paused);
        assert!(!board.apply_move(pos(0, 4), Direction::UP, PieceColor::Red));
        assert_eq!(
            board.try_move(pos(0, 4), Direction::UP, PieceColor::Red),
            Err(RuleViolation::WrongStatus)
        );
    }

    #[test]
    fn test_piece_at_off_board() {
        let board = Board::started();
        assert_eq!(board.piece_at(pos(-1, 0)), None);
        assert_eq!(board.piece_at(pos(0, 6)), None);
    }

    #[test]
    fn test_simple_move_flips_turn() {
        let mut board = Board::started();
        assert!(board.apply_move(pos(1, 4), Direction::UP_RIGHT, PieceColor::Red));
        assert_eq!(board.piece_at(pos(2, 3)), Some(PieceColor::Red));
        assert_eq!(board.piece_at(pos(1, 4)), Some(PieceColor::Empty));
        assert_eq!(board.status(), GameStatus::BlackToMove);
    }

    #[test]
    fn test_move_rejections() {
        let mut board = Board::started();
        let before = board;

        assert_eq!(
            board.try_move(pos(0, 1), Direction::DOWN, PieceColor::Black),
            Err(RuleViolation::WrongTurn)
        );
        assert_eq!(
            board.try_move(pos(2, 2), Direction::UP, PieceColor::Red),
            Err(RuleViolation::NoOwnership)
        );
        assert_eq!(
            board.try_move(pos(0, 5), Direction::UP, PieceColor::Red),
            Err(RuleViolation::Blocked)
        );
        assert_eq!(
            board.try_move(pos(0, 4), Direction::LEFT, PieceColor::Red),
            Err(RuleViolation::OutOfBounds)
        );
        assert_eq!(
            board.try_move(pos(6, 4), Direction::LEFT, PieceColor::Red),
            Err(RuleViolation::OutOfBounds)
        );
        assert_eq!(
            board.try_move(pos(0, 4), Direction::UP, PieceColor::Empty),
            Err(RuleViolation::NoOwnership)
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_rejection_is_idempotent() {
        let mut board = Board::started();
        let before = board;
        for _ in 0..5 {
            assert!(!board.apply_move(pos(3, 5), Direction::UP, PieceColor::Red));
            assert!(!board.apply_capture(pos(3, 4), pos(3, 1), PieceColor::Red));
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_capture_through_arcs() {
        let mut board = Board::from_layout(
            ["------", "------", "B-----", "------", "------", "------"],
            GameStatus::RedToMove,
        )
        .unwrap();
        // Second black piece off the outer circuit, so the capture does not end the game
        board.cells[1][1] = PieceColor::Black;
        board.cells[2][5] = PieceColor::Red;

        assert!(board.apply_capture(pos(5, 2), pos(0, 2), PieceColor::Red));
        assert_eq!(board.piece_at(pos(0, 2)), Some(PieceColor::Red));
        assert_eq!(board.piece_at(pos(5, 2)), Some(PieceColor::Empty));
        assert_eq!(board.status(), GameStatus::BlackToMove);
    }

    #[test]
    fn test_winning_capture_skips_turn_flip() {
        let mut board = Board::from_layout(
            ["------", "------", "B----R", "------", "------", "------"],
            GameStatus::RedToMove,
        )
        .unwrap();
        assert!(board.apply_capture(pos(5, 2), pos(0, 2), PieceColor::Red));
        assert_eq!(board.status(), GameStatus::RedWon);
        assert_eq!(board.winner(), Some(PieceColor::Red));
        assert_eq!(board.count(PieceColor::Black), 0);

        // Nothing moves once the game is over
        assert_eq!(
            board.try_move(pos(0, 2), Direction::DOWN, PieceColor::Red),
            Err(RuleViolation::WrongStatus)
        );
    }

    #[test]
    fn test_capture_rejections() {
        let mut board = Board::from_layout(
            ["------", "------", "B----R", "------", "------", "R----B"],
            GameStatus::RedToMove,
        )
        .unwrap();
        let before = board;

        assert_eq!(
            board.try_capture(pos(0, 5), pos(5, 5), PieceColor::Red),
            Err(RuleViolation::CornerExclusion)
        );
        assert_eq!(
            board.try_capture(pos(5, 2), pos(5, 5), PieceColor::Red),
            Err(RuleViolation::CornerExclusion)
        );
        assert_eq!(
            board.try_capture(pos(5, 2), pos(6, 2), PieceColor::Red),
            Err(RuleViolation::OutOfBounds)
        );
        assert_eq!(
            board.try_capture(pos(5, 2), pos(3, 3), PieceColor::Red),
            Err(RuleViolation::NoPath)
        );
        assert_eq!(
            board.try_capture(pos(0, 2), pos(5, 2), PieceColor::Black),
            Err(RuleViolation::WrongTurn)
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut board = Board::started();
        let mv = Action::Move {
            color: PieceColor::Red,
            origin: pos(2, 4),
            direction: Direction::UP,
        };
        assert!(board.apply_action(&mv));
        assert_eq!(board.piece_at(pos(2, 3)), Some(PieceColor::Red));
        // Same action again is now black's turn
        assert!(!board.apply_action(&mv));
    }

    #[test]
    fn test_layout_errors() {
        let err = Board::from_layout(
            ["------", "-----", "------", "------", "------", "------"],
            GameStatus::Paused,
        )
        .unwrap_err();
        assert_eq!(err, LayoutError::RowLength { row: 1, len: 5 });

        let err = Board::from_layout(
            ["------", "------", "--x---", "------", "------", "------"],
            GameStatus::Paused,
        )
        .unwrap_err();
        assert_eq!(err, LayoutError::UnknownCell { row: 2, cell: 'x' });
    }

    #[test]
    fn test_display() {
        let text = Board::started().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  0 1 2 3 4 5");
        assert_eq!(lines[1], "0 B B B B B B");
        assert_eq!(lines[3], "2 - - - - - -");
        assert_eq!(lines[6], "5 R R R R R R");
        assert_eq!(lines[7], "status: red's turn");
    }
}
