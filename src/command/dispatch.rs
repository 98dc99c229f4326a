//! Maps a decoded RESP value to a command reply.

use crate::protocol::RespValue;

/// Dispatches a decoded value as a command invocation.
///
/// Returns `Some(reply)` for a recognized command and `None` otherwise.
/// `None` means write nothing: an unrecognized verb or a structurally
/// non-conforming value is ignored silently rather than answered with an
/// error frame.
///
/// Only the verb is case-folded (ASCII upper-casing); argument bytes are
/// passed through untouched.
pub fn dispatch(command: RespValue) -> Option<RespValue> {
    let args = match command {
        RespValue::Array(args) => args,
        _ => return None,
    };

    let verb = match args.first() {
        Some(RespValue::BulkString(bytes)) => bytes,
        _ => return None,
    };

    match verb.to_ascii_uppercase().as_slice() {
        // PING takes optional arguments; this front-end ignores them.
        b"PING" => Some(RespValue::pong()),
        _ => None,
    }
}
