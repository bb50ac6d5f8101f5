//! `OthelloServer` builder, shared state and the accept loop.
//!
//! Layers, outermost first: transport (WebSocket frames) → protocol
//! (envelopes, validation) → room manager → engine.

use std::future::{self, Future};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use othello_protocol::{Codec, JsonCodec};
use othello_room::{RoomConfig, RoomManager};
use othello_transport::{Connection, Transport, WebSocketTransport};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::handler::handle_connection;
use crate::OthelloError;

/// Bind address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Everything the server needs besides the room table itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub room: RoomConfig,
    /// How often finished and empty rooms are swept.
    pub sweep_interval: Duration,
    /// A connection that sends nothing for this long is closed.
    pub idle_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            room: RoomConfig::default(),
            sweep_interval: Duration::from_secs(60),
            idle_timeout: Duration::from_secs(300),
        }
    }
}

/// State shared by every connection task and the sweeper.
///
/// The whole room table sits behind one mutex: a request holds it for
/// lookup, authorization and mutation, never across network I/O.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) rooms: Mutex<RoomManager>,
    pub(crate) codec: C,
    pub(crate) idle_timeout: Duration,
    started: Instant,
}

impl<C: Codec> ServerState<C> {
    /// Milliseconds since the server was built, stamped on replies.
    pub(crate) fn uptime_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Builder for [`OthelloServer`].
///
/// ```rust,no_run
/// # async fn demo() -> Result<(), othello::OthelloError> {
/// use std::time::Duration;
/// use othello::prelude::*;
///
/// let server = OthelloServer::builder()
///     .bind("127.0.0.1:3000")
///     .sweep_interval(Duration::from_secs(30))
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
#[derive(Debug, Default)]
pub struct OthelloServerBuilder {
    config: ServerConfig,
}

impl OthelloServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a complete config, e.g. one loaded from a file.
    pub fn with_config(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn bind(mut self, addr: impl Into<String>) -> Self {
        self.config.bind_addr = addr.into();
        self
    }

    pub fn room_config(mut self, config: RoomConfig) -> Self {
        self.config.room = config;
        self
    }

    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.config.sweep_interval = interval;
        self
    }

    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.idle_timeout = timeout;
        self
    }

    /// Binds the listener and creates the empty room table.
    ///
    /// # Errors
    /// [`OthelloError::Config`] for a zero sweep interval or idle timeout,
    /// [`OthelloError::Transport`] if the address cannot be bound.
    pub async fn build(self) -> Result<OthelloServer<JsonCodec>, OthelloError> {
        let config = self.config;
        if config.sweep_interval.is_zero() {
            return Err(OthelloError::Config("sweep_interval must be non-zero".into()));
        }
        if config.idle_timeout.is_zero() {
            return Err(OthelloError::Config("idle_timeout must be non-zero".into()));
        }

        let transport = WebSocketTransport::bind(&config.bind_addr).await?;
        let state = Arc::new(ServerState {
            rooms: Mutex::new(RoomManager::with_config(config.room.clone())),
            codec: JsonCodec,
            idle_timeout: config.idle_timeout,
            started: Instant::now(),
        });

        Ok(OthelloServer {
            transport,
            state,
            sweep_interval: config.sweep_interval,
        })
    }
}

/// A bound server. Call [`run`](Self::run) to start serving.
pub struct OthelloServer<C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<C>>,
    sweep_interval: Duration,
}

impl OthelloServer<JsonCodec> {
    pub fn builder() -> OthelloServerBuilder {
        OthelloServerBuilder::new()
    }
}

impl<C: Codec> OthelloServer<C> {
    pub fn local_addr(&self) -> Result<SocketAddr, OthelloError> {
        Ok(self.transport.local_addr()?)
    }

    /// Serves until the process is terminated.
    pub async fn run(self) -> Result<(), OthelloError> {
        self.run_until(future::pending()).await
    }

    /// Serves until `shutdown` completes.
    ///
    /// Spawns the room sweeper, then accepts clients and gives each one its
    /// own task. On shutdown the sweeper stops and no new clients are
    /// accepted; connections already open run until their client leaves.
    pub async fn run_until(mut self, shutdown: impl Future<Output = ()>) -> Result<(), OthelloError> {
        tracing::info!(sweep_interval = ?self.sweep_interval, "othello server running");
        let sweeper = spawn_sweeper(Arc::clone(&self.state), self.sweep_interval);

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                () = &mut shutdown => {
                    tracing::info!("shutdown requested, no longer accepting clients");
                    break;
                }
                accepted = self.transport.accept() => match accepted {
                    Ok(conn) => {
                        let state = Arc::clone(&self.state);
                        tokio::spawn(async move {
                            let conn_id = conn.id();
                            if let Err(e) = handle_connection(conn, state).await {
                                tracing::debug!(%conn_id, error = %e, "connection ended with error");
                            }
                        });
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "accept failed");
                    }
                },
            }
        }

        sweeper.abort();
        Ok(())
    }
}

/// Periodically removes rooms that are empty or finished and idle past the
/// retention window.
fn spawn_sweeper<C: Codec>(state: Arc<ServerState<C>>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let remaining = {
                let mut rooms = state.rooms.lock().await;
                rooms.cleanup_rooms();
                rooms.room_count()
            };
            tracing::trace!(remaining, "room sweep done");
        }
    })
}
