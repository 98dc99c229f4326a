//! One-cycle connection handling.
//!
//! Each accepted connection gets exactly one request-response cycle:
//!
//! ```text
//! accept ──> decode one frame ──> dispatch ──> write reply (if any) ──> close
//! ```
//!
//! The connection is closed unconditionally after the cycle, whether or not
//! decoding or dispatch succeeded. A decode failure is logged and the
//! connection closes without any RESP error frame being written; the client
//! sees only the closed socket. The handler never attempts a second read on
//! the same connection.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::command::dispatch;
use crate::protocol::decode_value;

/// Counters for connection handling, shared across the serve loop.
#[derive(Debug, Default)]
pub struct ConnectionStats {
    /// Total number of connections accepted
    pub connections_accepted: AtomicU64,
    /// Frames that failed to decode
    pub decode_failures: AtomicU64,
    /// Replies written back to clients
    pub replies_sent: AtomicU64,
    /// Total reply bytes written
    pub bytes_written: AtomicU64,
}

impl ConnectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decode_failed(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reply_sent(&self, bytes: usize) {
        self.replies_sent.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
    }
}

/// Runs one decode-dispatch-reply cycle on an accepted connection.
///
/// Failures never propagate: decode errors and write errors are logged and
/// the connection is dropped either way. The listening loop is unaffected.
pub async fn handle_connection(stream: TcpStream, addr: SocketAddr, stats: Arc<ConnectionStats>) {
    stats.connection_opened();
    debug!(client = %addr, "connection accepted");

    let mut stream = BufReader::new(stream);

    match decode_value(&mut stream).await {
        Ok(value) => {
            debug!(client = %addr, frame = %value, "decoded frame");

            if let Some(reply) = dispatch(value) {
                let bytes = reply.serialize();
                match write_reply(&mut stream, &bytes).await {
                    Ok(()) => stats.reply_sent(bytes.len()),
                    Err(e) => warn!(client = %addr, error = %e, "failed to write reply"),
                }
            }
        }
        Err(e) => {
            stats.decode_failed();
            warn!(client = %addr, error = %e, "failed to decode frame");
        }
    }

    debug!(client = %addr, "closing connection");
    // Dropping the stream closes the connection.
}

async fn write_reply(
    stream: &mut BufReader<TcpStream>,
    bytes: &[u8],
) -> std::io::Result<()> {
    stream.write_all(bytes).await?;
    stream.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn serve_one_connection() -> (SocketAddr, Arc<ConnectionStats>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let stats = Arc::new(ConnectionStats::new());

        let handler_stats = Arc::clone(&stats);
        tokio::spawn(async move {
            let (stream, client_addr) = listener.accept().await.unwrap();
            handle_connection(stream, client_addr, handler_stats).await;
        });

        (addr, stats)
    }

    #[tokio::test]
    async fn ping_gets_pong_then_close() {
        let (addr, stats) = serve_one_connection().await;

        let mut client = TcpStream::connect(addr).await.unwrap();
        client.write_all(b"*1\r\n$4\r\nPING\r\n").await.unwrap();

        let mut reply = Vec::new();
        client.read_to_end(&mut reply).await.unwrap();

        assert_eq!(reply, b"+PONG\r\n");
        assert_eq!(stats.replies_sent.load(Ordering::Relaxed), 1);
        assert_eq!(stats.bytes_written.load(Ordering::Relaxed), 7);
    }

    #[tokio::test]
    async fn malformed_frame_closes_without_reply() {
        let (addr, stats) = serve_one_connection().await;

        let mut client = TcpStream::connect(addr).await.unwrap();
        client.write_all(b"$abc\r\nxyz\r\n").await.unwrap();

        let mut reply = Vec::new();
        client.read_to_end(&mut reply).await.unwrap();

        assert!(reply.is_empty());
        assert_eq!(stats.decode_failures.load(Ordering::Relaxed), 1);
        assert_eq!(stats.replies_sent.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn unknown_command_closes_without_reply() {
        let (addr, stats) = serve_one_connection().await;

        let mut client = TcpStream::connect(addr).await.unwrap();
        client
            .write_all(b"*2\r\n$4\r\nECHO\r\n$5\r\nhello\r\n")
            .await
            .unwrap();

        let mut reply = Vec::new();
        client.read_to_end(&mut reply).await.unwrap();

        assert!(reply.is_empty());
        assert_eq!(stats.decode_failures.load(Ordering::Relaxed), 0);
        assert_eq!(stats.replies_sent.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn only_one_frame_is_served_per_connection() {
        let (addr, stats) = serve_one_connection().await;

        let mut client = TcpStream::connect(addr).await.unwrap();
        client
            .write_all(b"*1\r\n$4\r\nPING\r\n*1\r\n$4\r\nPING\r\n")
            .await
            .unwrap();

        let mut reply = Vec::new();
        client.read_to_end(&mut reply).await.unwrap();

        // The second frame is never read; one reply, then close.
        assert_eq!(reply, b"+PONG\r\n");
        assert_eq!(stats.replies_sent.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn eof_before_any_frame_closes_quietly() {
        let (addr, stats) = serve_one_connection().await;

        let client = TcpStream::connect(addr).await.unwrap();
        drop(client);

        // Give the handler a moment to observe the EOF.
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert_eq!(stats.decode_failures.load(Ordering::Relaxed), 1);
        assert_eq!(stats.replies_sent.load(Ordering::Relaxed), 0);
    }
}
