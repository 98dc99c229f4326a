//! Command dispatch.
//!
//! A decoded frame counts as a command when it is an array whose first
//! element is a bulk string; that element is the verb, matched
//! case-insensitively. Anything else is ignored without a reply, as is any
//! verb outside the supported table.
//!
//! The supported table is deliberately small:
//!
//! - `PING` → `+PONG\r\n` (arguments accepted and ignored)

pub mod dispatch;

// Re-export the dispatch entry point
pub use dispatch::dispatch;
