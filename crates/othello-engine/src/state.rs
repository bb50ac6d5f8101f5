//! `GameState` and its transitions.
//!
//! A game moves through a small state machine:
//!
//! ```text
//! InProgress(black) ──move|skip──→ InProgress(white) ──move|skip──→ ...
//!        │                                                     │
//!        └────────── surrender / nobody can move / full ───────┴──→ Finished(winner)
//! ```
//!
//! `Finished` is terminal. Every transition takes `&self` and returns a new
//! `GameState`; the receiver is never modified.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{Board, Color, EngineError, Position, Winner};

/// A complete, self-consistent snapshot of one game.
///
/// Scores and `valid_moves` are derived from the board and recomputed on
/// every transition, so they can never drift from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current_player: Color,
    black_score: usize,
    white_score: usize,
    game_over: bool,
    winner: Option<Winner>,
    valid_moves: Vec<Position>,
    last_move: Option<Position>,
}

impl GameState {
    /// Creates the canonical opening position with black to move.
    pub fn new() -> Self {
        Self::from_board(Board::opening(), Color::Black)
    }

    /// Builds a consistent state from an arbitrary board.
    ///
    /// Scores and legal moves are computed from `board`, and the
    /// end-of-game check runs immediately, so a position where neither
    /// side can move comes back already finished.
    pub fn from_board(board: Board, current_player: Color) -> Self {
        let mut state = Self {
            board,
            current_player,
            black_score: 0,
            white_score: 0,
            game_over: false,
            winner: None,
            valid_moves: Vec::new(),
            last_move: None,
        };
        state.recompute();
        state
    }

    /// Places the current player's piece at `position`.
    ///
    /// # Errors
    /// - [`EngineError::GameFinished`] if the game is over
    /// - [`EngineError::InvalidMove`] if `position` is not in `valid_moves`
    pub fn apply_move(&self, position: Position) -> Result<Self, EngineError> {
        self.apply_move_with_captures(position).map(|(state, _)| state)
    }

    /// Like [`apply_move`](Self::apply_move), but also returns the opponent
    /// pieces that were flipped.
    pub fn apply_move_with_captures(
        &self,
        position: Position,
    ) -> Result<(Self, Vec<Position>), EngineError> {
        if self.game_over {
            return Err(EngineError::GameFinished);
        }
        if !self.valid_moves.contains(&position) {
            return Err(EngineError::InvalidMove(position));
        }

        let mover = self.current_player;
        let captured = self.board.captures(position, mover);

        let mut board = self.board;
        board.set(position, mover.into());
        for &pos in &captured {
            board.set(pos, mover.into());
        }

        let mut next = Self::from_board(board, mover.opponent());
        next.last_move = Some(position);
        Ok((next, captured))
    }

    /// Passes the turn to the opponent.
    ///
    /// Only allowed when the current player has no legal move.
    ///
    /// # Errors
    /// - [`EngineError::GameFinished`] if the game is over
    /// - [`EngineError::SkipNotAllowed`] if a legal move exists
    pub fn skip_turn(&self) -> Result<Self, EngineError> {
        if self.game_over {
            return Err(EngineError::GameFinished);
        }
        if !self.valid_moves.is_empty() {
            return Err(EngineError::SkipNotAllowed {
                available: self.valid_moves.len(),
            });
        }

        let mut next = Self::from_board(self.board, self.current_player.opponent());
        next.last_move = self.last_move;
        Ok(next)
    }

    /// Ends the game immediately with `color` losing. Always succeeds.
    ///
    /// Only `game_over` and `winner` change: `valid_moves` still lists the
    /// moves of the player to move, so check [`is_game_over`](Self::is_game_over)
    /// before offering them.
    pub fn surrender(&self, color: Color) -> Self {
        let mut next = self.clone();
        next.game_over = true;
        next.winner = Some(color.opponent().into());
        next
    }

    /// Returns `true` if the current player may place a piece at `position`.
    pub fn is_legal_move(&self, position: Position) -> bool {
        self.board.is_legal(position, self.current_player)
    }

    /// Enumerates the current player's legal moves in row-major order.
    pub fn legal_moves(&self) -> Vec<Position> {
        self.board.legal_moves(self.current_player)
    }

    /// The board as of this state.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The color to move next.
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// Number of black pieces on the board.
    pub fn black_score(&self) -> usize {
        self.black_score
    }

    /// Number of white pieces on the board.
    pub fn white_score(&self) -> usize {
        self.white_score
    }

    /// Returns the piece count for `color`.
    pub fn score(&self, color: Color) -> usize {
        match color {
            Color::Black => self.black_score,
            Color::White => self.white_score,
        }
    }

    /// Returns `true` once the game has ended by position or surrender.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The winner, set only once the game is over.
    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    /// Cached legal moves of the current player, row-major.
    pub fn valid_moves(&self) -> &[Position] {
        &self.valid_moves
    }

    /// The most recent placement; kept across skips.
    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    /// Refreshes every derived field from the board and current player.
    fn recompute(&mut self) {
        self.black_score = self.board.count(Color::Black);
        self.white_score = self.board.count(Color::White);
        self.valid_moves = self.board.legal_moves(self.current_player);
        self.check_game_over();
    }

    /// Ends the game if the board is full or neither side can move.
    ///
    /// One side being stuck is not enough: that player passes instead.
    fn check_game_over(&mut self) {
        let nobody_can_move = self.valid_moves.is_empty()
            && !self.board.has_legal_move(self.current_player.opponent());

        if self.board.is_full() || nobody_can_move {
            self.game_over = true;
            self.winner = Some(match self.black_score.cmp(&self.white_score) {
                Ordering::Greater => Winner::Black,
                Ordering::Less => Winner::White,
                Ordering::Equal => Winner::Draw,
            });
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
