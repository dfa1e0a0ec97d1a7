use anyhow::Context;
use pigeon_server::{ServerConfig, SignalingService, router};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let port = config.port;

    let service = SignalingService::new(config);
    service.spawn_sweeper();

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("WebRTC signaling relay listening on http://{}", addr);
    info!("  POST /offer          - submit an SDP offer");
    info!("  POST /answer         - submit an SDP answer");
    info!("  POST /ice-candidate  - submit an ICE candidate");
    info!("  GET  /messages       - poll for pending messages");
    info!("  GET  /status         - relay status");

    axum::serve(listener, router(service)).await?;
    Ok(())
}
