//! Wire protocol for the Othello room server.
//!
//! - **Types** ([`Envelope`], [`Request`], [`Response`]): the frames that
//!   travel on the wire, plus [`Request::validate`] for input rules.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how frames become bytes.
//! - **Errors** ([`ProtocolError`]): decode failures and rule violations.
//!
//! # Architecture
//!
//! ```text
//! Transport (bytes) → Protocol (Envelope<Request>) → RoomManager
//! ```
//!
//! The room manager never sees bytes or unvalidated input.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{codes, Envelope, Request, Response, MAX_MESSAGE_CHARS};
