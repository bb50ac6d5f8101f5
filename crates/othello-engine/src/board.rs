//! The 8×8 grid and the capture scan.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Cell, Color, Position, BOARD_SIZE};

/// The eight compass directions as `(d_row, d_col)`, clockwise from north.
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

const SIZE: usize = BOARD_SIZE as usize;

/// An 8×8 Othello board, indexed as `cells[row][col]`.
///
/// `Board` is a plain 64-byte `Copy` value, so every game-state transition
/// works on its own copy and never aliases a previous state's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; SIZE]; SIZE],
        }
    }

    /// The standard opening: a white/black cross on the four center squares.
    pub fn opening() -> Self {
        let mut board = Self::empty();
        board.cells[3][3] = Cell::White;
        board.cells[3][4] = Cell::Black;
        board.cells[4][3] = Cell::Black;
        board.cells[4][4] = Cell::White;
        board
    }

    /// Returns the cell at `pos`, or `None` if `pos` is off the board.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.cells
            .get(usize::from(pos.row))?
            .get(usize::from(pos.col))
            .copied()
    }

    /// Overwrites the cell at `pos`. Off-board positions are ignored.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(slot) = self
            .cells
            .get_mut(usize::from(pos.row))
            .and_then(|row| row.get_mut(usize::from(pos.col)))
        {
            *slot = cell;
        }
    }

    /// Counts the pieces of `color`.
    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.holds(color))
            .count()
    }

    /// Counts the non-empty cells.
    pub fn occupied(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell != Cell::Empty)
            .count()
    }

    /// Returns `true` once every square holds a piece.
    pub fn is_full(&self) -> bool {
        self.occupied() == SIZE * SIZE
    }

    /// Returns every opponent piece that `color` would flip by playing at
    /// `pos`, direction by direction.
    ///
    /// Empty if `pos` is occupied or off the board, or if no direction
    /// captures anything.
    pub fn captures(&self, pos: Position, color: Color) -> Vec<Position> {
        if self.get(pos) != Some(Cell::Empty) {
            return Vec::new();
        }
        DIRECTIONS
            .iter()
            .flat_map(|&dir| self.flanked_run(pos, color, dir))
            .collect()
    }

    /// Returns `true` if `color` may place a piece at `pos`: the cell is
    /// empty and at least one direction captures an opponent piece.
    pub fn is_legal(&self, pos: Position, color: Color) -> bool {
        self.get(pos) == Some(Cell::Empty)
            && DIRECTIONS
                .iter()
                .any(|&dir| !self.flanked_run(pos, color, dir).is_empty())
    }

    /// All legal moves for `color`, in row-major order.
    pub fn legal_moves(&self, color: Color) -> Vec<Position> {
        Position::all().filter(|&pos| self.is_legal(pos, color)).collect()
    }

    /// Returns `true` if `color` has at least one legal move.
    pub fn has_legal_move(&self, color: Color) -> bool {
        Position::all().any(|pos| self.is_legal(pos, color))
    }

    /// Scans outward from `from` (exclusive) along one direction.
    ///
    /// Returns the run of opponent pieces if it is closed off by a piece
    /// of `color`; an empty run if the scan hits an empty cell, leaves the
    /// board, or meets `color` immediately.
    fn flanked_run(
        &self,
        from: Position,
        color: Color,
        (d_row, d_col): (i8, i8),
    ) -> Vec<Position> {
        let opponent = color.opponent();
        let mut run = Vec::new();
        let mut cursor = from.offset(d_row, d_col);

        while let Some(pos) = cursor {
            match self.get(pos) {
                Some(cell) if cell.holds(opponent) => run.push(pos),
                Some(cell) if cell.holds(color) => return run,
                _ => break,
            }
            cursor = pos.offset(d_row, d_col);
        }

        Vec::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..SIZE {
            write!(f, " {col}")?;
        }
        writeln!(f)?;
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{row}")?;
            for cell in cells {
                let symbol = match cell {
                    Cell::Empty => '.',
                    Cell::Black => '●',
                    Cell::White => '○',
                };
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
