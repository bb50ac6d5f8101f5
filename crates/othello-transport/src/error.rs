use std::io;

/// Errors raised while listening for or talking to clients.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The listening socket could not be opened.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The listener failed while waiting for a TCP connection.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] io::Error),

    #[error("send failed: {0}")]
    SendFailed(#[source] io::Error),

    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] io::Error),

    /// The peer is gone; nothing more can be sent.
    #[error("connection closed")]
    ConnectionClosed,
}
