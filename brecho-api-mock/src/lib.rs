//! Brechó API Mock - in-memory inventory and sales backend
//!
//! Serves the endpoints the inventory client talks to, for local development
//! and the client's integration tests.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

pub use api::router;
pub use config::MockConfig;
pub use error::{ApiError, ApiResult, ConfigError};
pub use state::{MockState, StockPiece, seed_pieces};

use std::net::SocketAddr;

/// Serve `state` on an ephemeral localhost port in a background task
pub async fn serve_ephemeral(state: MockState) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(state);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Mock server error: {e}");
        }
    });
    Ok(addr)
}
