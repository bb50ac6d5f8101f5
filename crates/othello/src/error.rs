//! Top-level error type for the server crate.

use othello_protocol::ProtocolError;
use othello_room::RoomError;
use othello_transport::TransportError;

/// Wraps every layer's error so `?` works across the stack.
#[derive(Debug, thiserror::Error)]
pub enum OthelloError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Room(#[from] RoomError),

    /// The builder was given settings the server cannot run with.
    #[error("invalid server configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use othello_room::RoomId;

    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err: OthelloError = TransportError::ConnectionClosed.into();
        assert!(matches!(err, OthelloError::Transport(_)));
        assert_eq!(err.to_string(), "connection closed");
    }

    #[test]
    fn test_from_protocol_error() {
        let err: OthelloError = ProtocolError::InvalidMessage("bad".into()).into();
        assert!(matches!(err, OthelloError::Protocol(_)));
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_from_room_error() {
        let err: OthelloError = RoomError::NotFound(RoomId::from("abc")).into();
        assert!(matches!(err, OthelloError::Room(_)));
        assert!(err.to_string().contains("abc"));
    }
}
