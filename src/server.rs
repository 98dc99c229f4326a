//! Sequential accept loop.
//!
//! Connections are served strictly one at a time: each accepted connection
//! runs its full decode-dispatch-reply-close cycle before the next accept
//! call executes. A client that stalls mid-frame therefore holds up every
//! client behind it. This head-of-line blocking is part of the contract of
//! this front-end, not an accident; removing it means redesigning the loop
//! around per-connection tasks.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{debug, error};

use crate::connection::{handle_connection, ConnectionStats};

/// Accepts connections in a loop and serves each to completion.
///
/// An accept error is logged and the loop continues; it never terminates
/// the process.
pub async fn serve(listener: TcpListener, stats: Arc<ConnectionStats>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                debug!(client = %addr, "accepted connection");
                // Served inline: the next accept waits for this cycle.
                handle_connection(stream, addr, Arc::clone(&stats)).await;
            }
            Err(e) => {
                error!(error = %e, "failed to accept connection");
            }
        }
    }
}
