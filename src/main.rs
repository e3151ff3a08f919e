use sales_dashboard::{router, AppState, Config, HttpStatsClient, Session};
use std::{net::SocketAddr, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let client = HttpStatsClient::new(&config.api_base_url, config.request_timeout)?;
    let session = Session::new(Arc::new(client), config.default_limit);
    session.spawn_mount().await;

    let app = router(AppState::new(session));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!(
        "listening on http://{addr}, reading stats from {}",
        config.api_base_url
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
    }
    info!("shutting down");
}
