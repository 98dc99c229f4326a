//! Stream-driven RESP frame decoder.
//!
//! The decoder is a recursive-descent parser over an [`AsyncRead`] stream.
//! It consumes exactly the bytes that make up one frame and nothing more, so
//! decoding is strictly forward-only and needs no pushback.
//!
//! Two reading primitives drive everything:
//!
//! 1. [`read_line`] reads one byte at a time until it sees CRLF and returns
//!    the line without the terminator. Length and count fields arrive this
//!    way.
//! 2. Bulk string payloads are read by their declared length, not by
//!    scanning for a terminator. A payload may therefore contain embedded
//!    CRLF bytes; the terminator is required only at the declared end.
//!
//! Only `$` (bulk string) and `*` (array) frames are decoded. The remaining
//! RESP tags are recognized and rejected with [`DecodeError::UnsupportedType`].
//!
//! Negative length and count fields (the RESP null convention) are rejected
//! as [`DecodeError::MalformedLength`]: fields parse as unsigned integers,
//! and the decoder never produces [`RespValue::Null`].

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::protocol::types::{tag, RespValue, CRLF};

/// Maximum array nesting depth accepted by the decoder.
///
/// Recursion depth tracks nesting depth one-to-one, so this bounds stack
/// usage against adversarial input.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Errors produced while decoding a frame.
///
/// Every failure is local to the connection that sent the frame; none of
/// these abort the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The stream ended (end-of-input or connection error) before a complete
    /// frame was read.
    #[error("stream ended before a complete frame was read")]
    IncompleteFrame,

    /// A length or count field is not a valid non-negative integer.
    #[error("invalid length field: {0:?}")]
    MalformedLength(String),

    /// A bulk string payload did not end with CRLF at its declared length.
    #[error("bulk string payload does not match declared length {declared}")]
    LengthMismatch { declared: usize },

    /// The frame's type-tag byte is not one of the decoded tags.
    #[error("unsupported frame type tag: {0:#04x}")]
    UnsupportedType(u8),

    /// Array nesting exceeded [`MAX_NESTING_DEPTH`].
    #[error("array nesting exceeds maximum depth of {}", MAX_NESTING_DEPTH)]
    DepthLimitExceeded,
}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Decodes one complete RESP value from the stream.
///
/// Reads the type-tag byte, then dispatches on it, recursing for array
/// elements. The call consumes exactly one frame's worth of bytes on
/// success; on failure the stream position is unspecified and the
/// connection should be closed.
pub async fn decode_value<R>(reader: &mut R) -> DecodeResult<RespValue>
where
    R: AsyncRead + Unpin + Send,
{
    decode_frame(reader, 0).await
}

/// Reads one CRLF-terminated line, excluding the terminator.
///
/// Reads a byte at a time, tracking the previous byte to spot the two-byte
/// terminator. Fails with [`DecodeError::IncompleteFrame`] if the stream
/// ends first.
pub async fn read_line<R>(reader: &mut R) -> DecodeResult<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut line = Vec::new();
    let mut prev = 0u8;

    loop {
        let byte = reader
            .read_u8()
            .await
            .map_err(|_| DecodeError::IncompleteFrame)?;

        if prev == b'\r' && byte == b'\n' {
            // The '\r' is already in the buffer; drop it.
            line.pop();
            return Ok(line);
        }

        line.push(byte);
        prev = byte;
    }
}

// Async recursion needs an explicitly boxed future.
fn decode_frame<'a, R>(
    reader: &'a mut R,
    depth: usize,
) -> Pin<Box<dyn Future<Output = DecodeResult<RespValue>> + Send + 'a>>
where
    R: AsyncRead + Unpin + Send,
{
    Box::pin(async move {
        let tag_byte = reader
            .read_u8()
            .await
            .map_err(|_| DecodeError::IncompleteFrame)?;

        match tag_byte {
            tag::BULK_STRING => decode_bulk_string(reader).await,
            tag::ARRAY => decode_array(reader, depth).await,
            tag::SIMPLE_STRING | tag::ERROR | tag::INTEGER => {
                Err(DecodeError::UnsupportedType(tag_byte))
            }
            other => Err(DecodeError::UnsupportedType(other)),
        }
    })
}

/// Decodes the remainder of a bulk string: `<length>\r\n<payload>\r\n`.
async fn decode_bulk_string<R>(reader: &mut R) -> DecodeResult<RespValue>
where
    R: AsyncRead + Unpin,
{
    let declared = read_length(reader).await?;

    // Exact-length read: the payload is binary-safe and may itself contain
    // CRLF, so we never scan for the terminator.
    let mut payload = vec![0u8; declared];
    reader
        .read_exact(&mut payload)
        .await
        .map_err(|_| DecodeError::IncompleteFrame)?;

    let mut terminator = [0u8; 2];
    reader
        .read_exact(&mut terminator)
        .await
        .map_err(|_| DecodeError::IncompleteFrame)?;

    if &terminator[..] != CRLF {
        return Err(DecodeError::LengthMismatch { declared });
    }

    Ok(RespValue::BulkString(Bytes::from(payload)))
}

/// Decodes the remainder of an array: `<count>\r\n<element1>...<elementN>`.
async fn decode_array<R>(reader: &mut R, depth: usize) -> DecodeResult<RespValue>
where
    R: AsyncRead + Unpin + Send,
{
    if depth >= MAX_NESTING_DEPTH {
        return Err(DecodeError::DepthLimitExceeded);
    }

    let count = read_length(reader).await?;

    let mut elements = Vec::with_capacity(count);
    for _ in 0..count {
        elements.push(decode_frame(reader, depth + 1).await?);
    }

    Ok(RespValue::Array(elements))
}

/// Reads a line and parses it as an unsigned length or count field.
async fn read_length<R>(reader: &mut R) -> DecodeResult<usize>
where
    R: AsyncRead + Unpin,
{
    let line = read_line(reader).await?;

    std::str::from_utf8(&line)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| DecodeError::MalformedLength(String::from_utf8_lossy(&line).into_owned()))
}
