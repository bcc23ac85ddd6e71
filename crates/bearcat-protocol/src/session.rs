//! Session capability consumed by the protocol core
//!
//! The core never opens or frames a serial port itself; it only needs one
//! thing from a transport: a strictly ordered, one-at-a-time command
//! exchange. Real serial sessions and simulated sessions both implement
//! [`Session`], and everything above them is implementation-agnostic.

use crate::command::{Command, Response};
use crate::error::ScannerError;

/// One established exchange with a scanner
///
/// Implementations must join the command parts with commas, append the wire
/// line terminator, send, read exactly one response line, strip the echoed
/// verb, and split the remainder into fields. When `allow_error` is false a
/// response carrying a trailing `ERR`/`NG` marker must surface as
/// [`ScannerError::Command`] instead of a [`Response`].
pub trait Session {
    /// Execute a single command and return its parsed response
    fn execute(&mut self, command: &Command, allow_error: bool) -> Result<Response, ScannerError>;
}
