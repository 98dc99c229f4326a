//! RESP (Redis Serialization Protocol) value types.
//!
//! Every frame on the wire starts with a one-byte type tag and is built out
//! of CRLF-terminated lines:
//!
//! - `$` Bulk String: `$<length>\r\n<payload>\r\n`
//! - `*` Array: `*<count>\r\n<element1><element2>...`
//! - `+` Simple String: `+<string>\r\n`
//! - `-` Error: `-<message>\r\n`
//! - `:` Integer: `:<number>\r\n`
//!
//! The decoder in this crate only ever produces `BulkString` and `Array`
//! (commands arrive as arrays of bulk strings). The remaining variants are
//! reserved for the reply side, where the serializer covers the full set so
//! that any RESP value can be written back to a client.

use bytes::Bytes;
use std::fmt;

/// The two-byte line terminator used throughout RESP.
pub const CRLF: &[u8] = b"\r\n";

/// RESP type-tag bytes.
pub mod tag {
    pub const SIMPLE_STRING: u8 = b'+';
    pub const ERROR: u8 = b'-';
    pub const INTEGER: u8 = b':';
    pub const BULK_STRING: u8 = b'$';
    pub const ARRAY: u8 = b'*';
}

/// One RESP value, decoded from or serialized to the wire.
///
/// The enum is closed: consumers match on it exhaustively, so adding a
/// variant is a compile-time event rather than a runtime surprise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespValue {
    /// Binary-safe, length-prefixed string. Format: `$<length>\r\n<payload>\r\n`
    BulkString(Bytes),

    /// Ordered sequence of nested values. Format: `*<count>\r\n<elements...>`
    Array(Vec<RespValue>),

    /// Non-binary-safe string without embedded CRLF. Format: `+<string>\r\n`
    SimpleString(String),

    /// Error reply. Format: `-<message>\r\n`
    Error(String),

    /// 64-bit signed integer. Format: `:<number>\r\n`
    Integer(i64),

    /// Null reply, serialized as the null bulk string `$-1\r\n`.
    Null,
}

impl RespValue {
    /// Creates a bulk string value.
    pub fn bulk_string(data: impl Into<Bytes>) -> Self {
        RespValue::BulkString(data.into())
    }

    /// Creates an array value.
    pub fn array(elements: Vec<RespValue>) -> Self {
        RespValue::Array(elements)
    }

    /// The canonical `PING` reply.
    pub fn pong() -> Self {
        RespValue::SimpleString("PONG".to_string())
    }

    /// Serializes the value to its wire representation.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf);
        buf
    }

    /// Serializes the value into an existing buffer, recursing for arrays.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        match self {
            RespValue::BulkString(data) => {
                buf.push(tag::BULK_STRING);
                buf.extend_from_slice(data.len().to_string().as_bytes());
                buf.extend_from_slice(CRLF);
                buf.extend_from_slice(data);
                buf.extend_from_slice(CRLF);
            }
            RespValue::Array(elements) => {
                buf.push(tag::ARRAY);
                buf.extend_from_slice(elements.len().to_string().as_bytes());
                buf.extend_from_slice(CRLF);
                for element in elements {
                    element.serialize_into(buf);
                }
            }
            RespValue::SimpleString(s) => {
                buf.push(tag::SIMPLE_STRING);
                buf.extend_from_slice(s.as_bytes());
                buf.extend_from_slice(CRLF);
            }
            RespValue::Error(s) => {
                buf.push(tag::ERROR);
                buf.extend_from_slice(s.as_bytes());
                buf.extend_from_slice(CRLF);
            }
            RespValue::Integer(n) => {
                buf.push(tag::INTEGER);
                buf.extend_from_slice(n.to_string().as_bytes());
                buf.extend_from_slice(CRLF);
            }
            RespValue::Null => {
                buf.push(tag::BULK_STRING);
                buf.extend_from_slice(b"-1");
                buf.extend_from_slice(CRLF);
            }
        }
    }
}

impl fmt::Display for RespValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RespValue::BulkString(data) => {
                if let Ok(s) = std::str::from_utf8(data) {
                    write!(f, "\"{}\"", s)
                } else {
                    write!(f, "(binary, {} bytes)", data.len())
                }
            }
            RespValue::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            RespValue::SimpleString(s) => write!(f, "{}", s),
            RespValue::Error(s) => write!(f, "(error) {}", s),
            RespValue::Integer(n) => write!(f, "(integer) {}", n),
            RespValue::Null => write!(f, "(nil)"),
        }
    }
}
