//! Room configuration and the derived room status.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RoomConfig
// ---------------------------------------------------------------------------

/// Settings shared by every room a [`RoomManager`](crate::RoomManager) owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// How long a finished room may stay silent before the sweep deletes it.
    /// Measured from the last chat message, or from creation if none.
    pub retention: Duration,

    /// Display name used for chat messages sent by spectators.
    pub spectator_label: String,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            retention: Duration::from_secs(24 * 60 * 60),
            spectator_label: "Spectator".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// RoomStatus
// ---------------------------------------------------------------------------

/// Where a room is in its lifecycle, derived from its roster and game.
///
/// ```text
/// Waiting ──(second player joins)──→ InProgress ──(game over)──→ Finished
///    │                                                            ↑
///    └─────────────────(creator surrenders)───────────────────────┘
/// ```
///
/// - **Waiting**: a seat is still free and the game is not over.
///   Listed as available.
/// - **InProgress**: all seats taken, game running.
/// - **Finished**: the game ended. Eligible for the retention sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    Waiting,
    InProgress,
    Finished,
}

impl RoomStatus {
    /// Returns `true` if a new player would get a seat (not a spectator slot).
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Waiting)
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "Waiting"),
            Self::InProgress => write!(f, "InProgress"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}
