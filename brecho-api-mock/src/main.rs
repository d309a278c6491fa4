//! brecho-api-mock: local stand-in for the Brechó backend

use brecho_api_mock::{MockConfig, MockState, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = MockConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brecho_api_mock=info,tower_http=info".into()),
        )
        .init();

    if !config.filter_route {
        tracing::warn!("GET /pieces/filter disabled, clients will filter locally");
    }

    let addr = format!("0.0.0.0:{}", config.port);
    let app = router(MockState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("brecho-api-mock listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;
    Ok(())
}
