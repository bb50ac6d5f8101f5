//! Othello rules engine.
//!
//! Pure transformations over an immutable [`GameState`]: move legality,
//! piece capture, scoring, turn passing and end-of-game detection. The
//! engine knows nothing about players, rooms or the network; its only
//! notion of identity is a piece [`Color`].
//!
//! # Key types
//!
//! - [`GameState`]: one game snapshot and its transitions
//! - [`Board`]: the 8×8 grid and the capture scan
//! - [`Position`], [`Color`], [`Cell`], [`Winner`]: small value types
//! - [`EngineError`]: why a transition was refused

mod board;
mod error;
mod state;
mod types;

pub use board::Board;
pub use error::EngineError;
pub use state::GameState;
pub use types::{Cell, Color, Position, Winner, BOARD_SIZE};
