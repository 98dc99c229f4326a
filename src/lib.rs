//! # respd - A Minimal RESP Front-End
//!
//! respd speaks just enough of the Redis Serialization Protocol (RESP) to
//! decode command frames off a TCP stream and dispatch them to handlers.
//! There is no storage engine behind it; the point is the protocol front:
//! the recursive-descent frame decoder and the decoded-array-to-handler
//! mapping. Everything around those two pieces is thin plumbing.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌──────────────┐    ┌──────────────┐    ┌────────────┐
//! │ TCP Server  │───>│  Connection  │───>│    Frame     │───>│  Command   │
//! │ (serve loop)│    │   Handler    │    │   Decoder    │    │  Dispatch  │
//! └─────────────┘    └──────────────┘    └──────────────┘    └─────┬──────┘
//!                           ▲                                      │
//!                           │          reply bytes (or none)       │
//!                           └──────────────────────────────────────┘
//! ```
//!
//! Bytes flow from the socket through the decoder into a [`RespValue`],
//! which dispatch turns into an optional reply. Each connection gets
//! exactly one decode-dispatch-reply cycle and is then closed, and
//! connections are served strictly one at a time. Both are deliberate
//! properties of this front-end, documented in the `server` and
//! `connection` modules.
//!
//! ## Wire protocol honored
//!
//! Inbound: bulk strings (`$<len>\r\n<payload>\r\n`) and arrays
//! (`*<count>\r\n<elements...>`). Frames tagged `+`, `-`, or `:` are
//! rejected as unsupported. Outbound: `+PONG\r\n` for a recognized `PING`;
//! nothing for anything else.
//!
//! ## Module overview
//!
//! - [`protocol`]: RESP value types and the stream decoder
//! - [`command`]: dispatch from decoded values to replies
//! - [`connection`]: the one-cycle connection handler and counters
//! - [`server`]: the sequential accept loop

pub mod command;
pub mod connection;
pub mod protocol;
pub mod server;

// Re-export commonly used types for convenience
pub use command::dispatch;
pub use connection::{handle_connection, ConnectionStats};
pub use protocol::{decode_value, DecodeError, RespValue};
pub use server::serve;

/// The fixed listen address: all interfaces, the standard Redis port.
/// Not configurable by flags, files, or environment.
pub const LISTEN_ADDR: &str = "0.0.0.0:6379";

/// Version of respd
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
