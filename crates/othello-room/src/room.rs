//! The room data model: roster, spectators, chat log and game.
//!
//! A [`Room`] handed out by the [`RoomManager`](crate::RoomManager) is a
//! snapshot. Changing it does nothing to the room in the table; commands go
//! back through the manager.

use chrono::{DateTime, Utc};
use othello_engine::{Color, GameState};
use serde::{Deserialize, Serialize};

use crate::{PlayerId, RoomId, RoomStatus};

/// Seats with a color. Anyone joining a full room becomes a spectator.
pub const SEATS: usize = 2;

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: Color,
}

/// One chat line. Never edited after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub player_id: PlayerId,
    pub player_name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// One game instance plus everyone watching or playing it.
///
/// Invariants kept by the manager:
/// - at most [`SEATS`] players, holding distinct colors
/// - `spectators` holds no duplicates and never a seated player
/// - `messages` only grows, in timestamp order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub game_state: GameState,
    pub players: Vec<Player>,
    pub spectators: Vec<PlayerId>,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// A fresh room with the creator seated as black.
    pub(crate) fn new(
        id: RoomId,
        creator_id: PlayerId,
        creator_name: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            game_state: GameState::new(),
            players: vec![Player {
                id: creator_id,
                name: creator_name,
                color: Color::Black,
            }],
            spectators: Vec::new(),
            messages: Vec::new(),
            created_at: now,
        }
    }

    /// Looks up a seated player.
    pub fn player(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == player_id)
    }

    /// Returns `true` if `player_id` is watching without a seat.
    pub fn is_spectator(&self, player_id: &PlayerId) -> bool {
        self.spectators.contains(player_id)
    }

    /// Returns `true` for seated players and spectators alike.
    pub fn is_participant(&self, player_id: &PlayerId) -> bool {
        self.player(player_id).is_some() || self.is_spectator(player_id)
    }

    /// No players and no spectators left.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.spectators.is_empty()
    }

    /// Both seats are taken.
    pub fn is_full(&self) -> bool {
        self.players.len() >= SEATS
    }

    /// Lifecycle status derived from the roster and the game.
    pub fn status(&self) -> RoomStatus {
        if self.game_state.is_game_over() {
            RoomStatus::Finished
        } else if self.is_full() {
            RoomStatus::InProgress
        } else {
            RoomStatus::Waiting
        }
    }

    /// The color a newcomer would get: opposite the seated player, or
    /// black if nobody is seated.
    pub(crate) fn open_color(&self) -> Color {
        self.players
            .first()
            .map_or(Color::Black, |p| p.color.opponent())
    }

    /// Time of the last chat message, or creation time if the room is silent.
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.messages
            .last()
            .map_or(self.created_at, |m| m.timestamp)
    }
}
