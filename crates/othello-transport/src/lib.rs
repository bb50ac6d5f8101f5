//! Network edge of the Othello room server.
//!
//! The server talks to clients through the [`Transport`] and [`Connection`]
//! traits, so request handling never touches sockets directly. The shipped
//! implementation is WebSocket over plain TCP.
//!
//! # Feature Flags
//!
//! - `websocket` (default): [`WebSocketTransport`] via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketTransport};

use std::fmt;
use std::net::SocketAddr;

/// Process-unique number for an accepted connection, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Wraps a raw id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// A listener that hands out client connections.
pub trait Transport: Send + Sync + 'static {
    type Connection: Connection;
    type Error: std::error::Error + Send + Sync;

    /// Waits for the next client that completes the handshake.
    async fn accept(&mut self) -> Result<Self::Connection, Self::Error>;

    /// The address the listener is bound to. Useful after binding port 0.
    fn local_addr(&self) -> Result<SocketAddr, Self::Error>;
}

/// One client connection carrying whole messages.
///
/// `send` and `recv` may be used from different tasks at the same time.
pub trait Connection: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync;

    async fn send(&self, data: &[u8]) -> Result<(), Self::Error>;

    /// Receives the next message.
    ///
    /// Returns `Ok(None)` once the peer has closed the connection.
    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error>;

    async fn close(&self) -> Result<(), Self::Error>;

    fn id(&self) -> ConnectionId;

    fn peer_addr(&self) -> SocketAddr;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_display() {
        assert_eq!(ConnectionId::new(7).to_string(), "conn-7");
    }

    #[test]
    fn test_connection_id_orders_by_value() {
        let mut ids = vec![ConnectionId::new(3), ConnectionId::new(1), ConnectionId::new(2)];
        ids.sort();
        let raw: Vec<u64> = ids.into_iter().map(ConnectionId::into_inner).collect();
        assert_eq!(raw, vec![1, 2, 3]);
    }
}
