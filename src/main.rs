//! respd - a minimal RESP front-end.
//!
//! Process entry point: sets up logging, binds the fixed listen address,
//! and runs the sequential serve loop until Ctrl+C.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use respd::{serve, ConnectionStats, LISTEN_ADDR, VERSION};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let listener = TcpListener::bind(LISTEN_ADDR).await?;
    info!("respd v{} listening on {}", VERSION, LISTEN_ADDR);

    let stats = Arc::new(ConnectionStats::new());

    let shutdown = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
        info!("shutdown signal received, stopping server");
    };

    tokio::select! {
        _ = serve(listener, Arc::clone(&stats)) => {}
        _ = shutdown => {}
    }

    info!(
        connections = stats.connections_accepted.load(Ordering::Relaxed),
        replies = stats.replies_sent.load(Ordering::Relaxed),
        decode_failures = stats.decode_failures.load(Ordering::Relaxed),
        "server shutdown complete"
    );
    Ok(())
}
