//! Small value types shared by the board and the game state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of rows (and columns) on an Othello board.
pub const BOARD_SIZE: u8 = 8;

// ---------------------------------------------------------------------------
// Color / Cell / Winner
// ---------------------------------------------------------------------------

/// A piece color. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Returns the other color.
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => write!(f, "black"),
            Self::White => write!(f, "white"),
        }
    }
}

/// The content of a single board square.
///
/// Serialized in lowercase (`"empty"`, `"black"`, `"white"`) so a board
/// snapshot reads the same way clients render it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// Returns `true` if a piece of `color` sits on this cell.
    pub fn holds(self, color: Color) -> bool {
        self == Self::from(color)
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Self::Black,
            Color::White => Self::White,
        }
    }
}

/// The outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Black,
    White,
    Draw,
}

impl From<Color> for Winner {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Self::Black,
            Color::White => Self::White,
        }
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A board coordinate. On-board positions have `row` and `col` in `0..=7`.
///
/// The fields are public because positions arrive from the wire; code that
/// builds them locally should prefer [`Position::new`]. The engine treats an
/// off-board position as an illegal move, never as a panic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Returns the position, or `None` if it lies off the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        let pos = Self { row, col };
        pos.is_on_board().then_some(pos)
    }

    /// Returns `true` if both coordinates are in `0..=7`.
    pub fn is_on_board(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Steps one square in the direction `(d_row, d_col)`.
    ///
    /// Returns `None` once the step would leave the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Self::new(row, col)
    }

    /// Iterates over all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Self { row, col }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
