//! Error types for the rules engine.

use crate::Position;

/// Why the engine refused a transition.
///
/// Engine operations borrow the current [`GameState`](crate::GameState)
/// and never mutate it, so on any of these errors the caller still holds
/// the untouched prior state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The position is not in the current player's legal moves.
    #[error("{0} is not a legal move")]
    InvalidMove(Position),

    /// A skip was requested while the current player can still move.
    #[error("cannot skip turn: {available} legal move(s) available")]
    SkipNotAllowed { available: usize },

    /// The game already ended (no moves left, full board, or surrender).
    #[error("game is already finished")]
    GameFinished,
}
