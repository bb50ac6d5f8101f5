//! Room management for Othello.
//!
//! A room pairs one [`GameState`](othello_engine::GameState) with the people
//! around it: up to two seated players, any number of spectators, and a
//! chat log. The [`RoomManager`] owns every room, checks membership and
//! turn order, and hands board changes to the engine.
//!
//! # Key types
//!
//! - [`RoomManager`]: the room table and every command on it
//! - [`Room`]: a snapshot of one room ([`Player`], [`ChatMessage`])
//! - [`RoomConfig`]: retention window and spectator label
//! - [`RoomStatus`]: Waiting / InProgress / Finished
//! - [`RoomError`]: why a command was not performed

mod config;
mod error;
mod ids;
mod manager;
mod room;

pub use config::{RoomConfig, RoomStatus};
pub use error::RoomError;
pub use ids::{PlayerId, RoomId};
pub use manager::RoomManager;
pub use room::{ChatMessage, Player, Room, SEATS};
