//! # Othello rooms
//!
//! A multi-room Othello server. Clients connect over WebSocket, create or
//! join rooms, play moves, chat and spectate. Each room runs one game whose
//! rules live in [`othello_engine`]; the room table lives in
//! [`othello_room`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use othello::prelude::*;
//!
//! # async fn demo() -> Result<(), OthelloError> {
//! let server = OthelloServer::builder()
//!     .bind("0.0.0.0:3000")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::OthelloError;
pub use handler::dispatch;
pub use server::{DEFAULT_BIND_ADDR, OthelloServer, OthelloServerBuilder, ServerConfig};

pub use othello_engine;
pub use othello_protocol;
pub use othello_room;
pub use othello_transport;

/// The types most programs need, in one import.
pub mod prelude {
    pub use crate::{
        DEFAULT_BIND_ADDR, OthelloError, OthelloServer, OthelloServerBuilder, ServerConfig,
    };
    pub use othello_engine::{Board, Cell, Color, EngineError, GameState, Position, Winner};
    pub use othello_protocol::{Envelope, Request, Response, codes};
    pub use othello_room::{
        ChatMessage, Player, PlayerId, Room, RoomConfig, RoomError, RoomId, RoomManager,
        RoomStatus,
    };
}
