//! RESP protocol support: value types and the stream decoder.
//!
//! RESP is the simple, binary-safe protocol Redis clients speak. This
//! module covers the subset a command front-end needs:
//!
//! - `types`: the [`RespValue`] enum and reply serialization
//! - `decoder`: a recursive-descent decoder over an async byte stream
//!
//! Commands arrive as arrays of bulk strings; everything else on the inbound
//! side is rejected. The reply side can serialize any RESP value.
//!
//! ## Example
//!
//! ```ignore
//! use respd::protocol::{decode_value, RespValue};
//!
//! let mut input: &[u8] = b"*1\r\n$4\r\nPING\r\n";
//! let value = decode_value(&mut input).await?;
//! assert!(matches!(value, RespValue::Array(_)));
//! ```

pub mod decoder;
pub mod types;

// Re-export commonly used types for convenience
pub use decoder::{decode_value, read_line, DecodeError, DecodeResult, MAX_NESTING_DEPTH};
pub use types::RespValue;
