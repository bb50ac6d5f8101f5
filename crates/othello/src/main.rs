//! `othello-server`: runs the room server on `OTHELLO_BIND`
//! (default `0.0.0.0:3000`). Log level comes from `RUST_LOG`.

use othello::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), OthelloError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let bind = std::env::var("OTHELLO_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let server = OthelloServer::builder().bind(bind).build().await?;

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "cannot listen for ctrl-c, running until killed");
                std::future::pending::<()>().await;
            }
        })
        .await
}
