//! Room manager: owns every room and applies commands to them.
//!
//! # Concurrency note
//!
//! `RoomManager` is a plain `HashMap` with `&mut self` commands and no
//! locking of its own. The server wraps the whole table in one mutex, so a
//! command runs lookup, authorization and mutation as one step and the
//! periodic sweep can never interleave with it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use othello_engine::{Color, Position};

use crate::{ChatMessage, Player, PlayerId, Room, RoomConfig, RoomError, RoomId};

/// Manages all rooms for the life of the process.
///
/// ## Lifecycle
///
/// ```text
/// create_room() ──→ join_room() ──→ make_move() / skip_turn() ... ──→ game over
///                                                                     │
///        leave_room() empties it ──→ deleted                          │
///        cleanup_rooms() after the retention window ──→ deleted ←─────┘
/// ```
///
/// Every method returns a cloned [`Room`] snapshot; nothing outside the
/// manager holds a reference into the table.
#[derive(Debug)]
pub struct RoomManager {
    rooms: HashMap<RoomId, Room>,
    config: RoomConfig,
}

impl RoomManager {
    /// Creates an empty manager with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RoomConfig::default())
    }

    /// Creates an empty manager with the given configuration.
    pub fn with_config(config: RoomConfig) -> Self {
        Self {
            rooms: HashMap::new(),
            config,
        }
    }

    /// Returns the configuration rooms are managed with.
    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    /// Creates a room with a fresh game and the creator seated as black.
    pub fn create_room(
        &mut self,
        creator_id: PlayerId,
        creator_name: impl Into<String>,
    ) -> Room {
        let mut room_id = RoomId::generate();
        while self.rooms.contains_key(&room_id) {
            room_id = RoomId::generate();
        }

        tracing::info!(%room_id, player_id = %creator_id, "room created");
        let room = Room::new(room_id.clone(), creator_id, creator_name.into(), Utc::now());
        self.rooms.insert(room_id, room.clone());
        room
    }

    /// Rooms with a free seat whose game has not ended.
    pub fn list_available_rooms(&self) -> Vec<Room> {
        self.rooms
            .values()
            .filter(|room| room.status().is_joinable())
            .cloned()
            .collect()
    }

    /// Returns a snapshot of one room.
    pub fn get_room(&self, room_id: &RoomId) -> Result<Room, RoomError> {
        self.rooms
            .get(room_id)
            .cloned()
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))
    }

    /// Seats a player, or adds them as a spectator if both seats are taken.
    ///
    /// Idempotent: re-joining as an existing player or spectator changes
    /// nothing.
    pub fn join_room(
        &mut self,
        room_id: &RoomId,
        player_id: PlayerId,
        player_name: impl Into<String>,
    ) -> Result<Room, RoomError> {
        let room = self.room_mut(room_id)?;

        if room.is_participant(&player_id) {
            return Ok(room.clone());
        }

        if room.is_full() {
            tracing::info!(%room_id, %player_id, "spectator joined");
            room.spectators.push(player_id);
        } else {
            let color = room.open_color();
            tracing::info!(%room_id, %player_id, %color, "player joined");
            room.players.push(Player {
                id: player_id,
                name: player_name.into(),
                color,
            });
        }

        Ok(room.clone())
    }

    /// Places the acting player's piece at `position`.
    ///
    /// # Errors
    /// - [`RoomError::NotFound`] / [`RoomError::NotAParticipant`] /
    ///   [`RoomError::NotYourTurn`] for authorization failures
    /// - [`RoomError::Engine`] if the engine rejects the move
    pub fn make_move(
        &mut self,
        room_id: &RoomId,
        player_id: &PlayerId,
        position: Position,
    ) -> Result<Room, RoomError> {
        let room = self.room_mut(room_id)?;
        authorize_turn(room, player_id)?;

        let (next, captured) = room.game_state.apply_move_with_captures(position)?;
        room.game_state = next;

        tracing::debug!(
            %room_id,
            %player_id,
            %position,
            captured = captured.len(),
            "move applied"
        );
        log_if_finished(room);
        Ok(room.clone())
    }

    /// Passes the acting player's turn when they have no legal move.
    pub fn skip_turn(
        &mut self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> Result<Room, RoomError> {
        let room = self.room_mut(room_id)?;
        authorize_turn(room, player_id)?;

        room.game_state = room.game_state.skip_turn()?;

        tracing::debug!(%room_id, %player_id, "turn skipped");
        log_if_finished(room);
        Ok(room.clone())
    }

    /// Ends the game with the acting player's color losing.
    ///
    /// Allowed on either player's turn; spectators cannot surrender.
    pub fn surrender(
        &mut self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> Result<Room, RoomError> {
        let room = self.room_mut(room_id)?;
        let color = seated_color(room, player_id)?;

        room.game_state = room.game_state.surrender(color);

        tracing::info!(%room_id, %player_id, %color, "player surrendered");
        Ok(room.clone())
    }

    /// Appends a chat line from a player or spectator.
    pub fn send_message(
        &mut self,
        room_id: &RoomId,
        player_id: &PlayerId,
        message: impl Into<String>,
    ) -> Result<Room, RoomError> {
        let spectator_label = self.config.spectator_label.clone();
        let room = self.room_mut(room_id)?;

        let player_name = match room.player(player_id) {
            Some(player) => player.name.clone(),
            None if room.is_spectator(player_id) => spectator_label,
            None => {
                return Err(RoomError::NotAParticipant(
                    player_id.clone(),
                    room_id.clone(),
                ));
            }
        };

        // Keep the log ordered even if the wall clock steps backwards.
        let now = Utc::now();
        let timestamp = room
            .messages
            .last()
            .map_or(now, |last| last.timestamp.max(now));

        room.messages.push(ChatMessage {
            player_id: player_id.clone(),
            player_name,
            message: message.into(),
            timestamp,
        });
        Ok(room.clone())
    }

    /// Removes a participant from a room.
    ///
    /// A player leaving a running game forfeits it and keeps their seat, so
    /// the opponent can still see the result. A player leaving a finished
    /// game gives up the seat. Spectators are simply removed.
    ///
    /// Returns `Ok(None)` if the room became empty and was deleted.
    pub fn leave_room(
        &mut self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> Result<Option<Room>, RoomError> {
        let room = self.room_mut(room_id)?;

        if let Some(index) = room.spectators.iter().position(|s| s == player_id) {
            room.spectators.remove(index);
            tracing::info!(%room_id, %player_id, "spectator left");
        } else if let Some(index) = room.players.iter().position(|p| &p.id == player_id) {
            if room.game_state.is_game_over() {
                room.players.remove(index);
                tracing::info!(%room_id, %player_id, "player left");
            } else {
                let color = room.players[index].color;
                room.game_state = room.game_state.surrender(color);
                tracing::info!(%room_id, %player_id, %color, "player left mid-game, forfeited");
            }
        } else {
            return Err(RoomError::NotAParticipant(
                player_id.clone(),
                room_id.clone(),
            ));
        }

        if room.is_empty() {
            self.rooms.remove(room_id);
            tracing::info!(%room_id, "room deleted (empty)");
            return Ok(None);
        }

        Ok(Some(room.clone()))
    }

    /// Sweeps the table using the current wall-clock time.
    ///
    /// See [`cleanup_rooms_at`](Self::cleanup_rooms_at).
    pub fn cleanup_rooms(&mut self) -> Vec<RoomId> {
        self.cleanup_rooms_at(Utc::now())
    }

    /// Deletes empty rooms, and finished rooms idle for longer than the
    /// retention window as of `now`. Returns the deleted ids.
    pub fn cleanup_rooms_at(&mut self, now: DateTime<Utc>) -> Vec<RoomId> {
        let retention = self.config.retention;
        let mut removed = Vec::new();

        self.rooms.retain(|room_id, room| {
            let expired = room.game_state.is_game_over()
                && now
                    .signed_duration_since(room.last_activity())
                    .to_std()
                    .is_ok_and(|idle| idle > retention);

            if room.is_empty() || expired {
                removed.push(room_id.clone());
                false
            } else {
                true
            }
        });

        if !removed.is_empty() {
            tracing::info!(count = removed.len(), "swept stale rooms");
        }
        removed
    }

    /// Returns the number of rooms in the table.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Returns `true` if there are no rooms.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Lists all room ids.
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().cloned().collect()
    }

    fn room_mut(&mut self, room_id: &RoomId) -> Result<&mut Room, RoomError> {
        self.rooms
            .get_mut(room_id)
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the seated player's color, or `NotAParticipant`.
fn seated_color(room: &Room, player_id: &PlayerId) -> Result<Color, RoomError> {
    room.player(player_id)
        .map(|p| p.color)
        .ok_or_else(|| RoomError::NotAParticipant(player_id.clone(), room.id.clone()))
}

/// Succeeds only for the seated player whose color is to move.
fn authorize_turn(room: &Room, player_id: &PlayerId) -> Result<(), RoomError> {
    let color = seated_color(room, player_id)?;
    if color != room.game_state.current_player() {
        tracing::debug!(room_id = %room.id, %player_id, "move out of turn rejected");
        return Err(RoomError::NotYourTurn(player_id.clone(), room.id.clone()));
    }
    Ok(())
}

fn log_if_finished(room: &Room) {
    let state = &room.game_state;
    if state.is_game_over() {
        tracing::info!(
            room_id = %room.id,
            winner = ?state.winner(),
            black = state.black_score(),
            white = state.white_score(),
            "game finished"
        );
    }
}
