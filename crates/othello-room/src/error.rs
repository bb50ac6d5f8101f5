//! Error types for the room layer.

use othello_engine::EngineError;

use crate::{PlayerId, RoomId};

/// Errors that can occur during room operations.
///
/// Every variant means "nothing was changed": the room, its roster and its
/// game state are exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist (never created, emptied, or swept).
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The actor holds no seat (or, for chat, no spectator slot) here.
    #[error("player {0} is not in room {1}")]
    NotAParticipant(PlayerId, RoomId),

    /// The actor is seated, but the other color is to move.
    #[error("it is not player {0}'s turn in room {1}")]
    NotYourTurn(PlayerId, RoomId),

    /// The engine refused the move or skip.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
