//! Error types for the protocol layer.
//!
//! A `ProtocolError` means the request never reached the room manager:
//! either the bytes did not parse, or the parsed request broke one of the
//! input rules checked by [`Request::validate`](crate::Request::validate).

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, unknown request type,
    /// missing fields or wrong field types.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The request parsed but violates an input rule, e.g. an empty
    /// player id or a row outside `0..=7`.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
