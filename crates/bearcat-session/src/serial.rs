//! Serial transport for the scanner's command protocol
//!
//! One command per exchange: write the comma-joined tuple plus a carriage
//! return, then read bytes until the device's terminator. The device echoes
//! the verb in front of every response, so the echo is stripped before the
//! fields are split.

use std::io::{Read, Write};
use std::time::Duration;

use serialport::SerialPort;
use tracing::{debug, trace};

use bearcat_protocol::{Command, Response, ScannerError, Session};

use crate::error::SessionError;

/// Nominal line rate. The device is a USB CDC-ACM endpoint, so the value is
/// largely ceremonial, but it must be supplied to open the port.
pub const BAUD_RATE: u32 = 115_200;

/// Read timeout for a single response line
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Remove the echoed verb (and its separating comma) from a response line
fn strip_echo<'a>(verb: &str, line: &'a str) -> &'a str {
    match line.strip_prefix(verb) {
        Some(rest) => rest.strip_prefix(',').unwrap_or(rest),
        None => line,
    }
}

/// A live exchange with a device over any byte transport
///
/// Generic so tests can drive it with an in-memory transport; real callers
/// use [`SerialSession::open`].
pub struct SerialSession<T: Read + Write = Box<dyn SerialPort>> {
    transport: T,
}

impl SerialSession<Box<dyn SerialPort>> {
    /// Open the named serial port
    pub fn open(path: &str) -> Result<Self, SessionError> {
        let port = serialport::new(path, BAUD_RATE)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|e| SessionError::OpenFailed {
                port: path.to_string(),
                reason: e.to_string(),
            })?;
        debug!(port = path, "opened serial session");
        Ok(Self { transport: port })
    }
}

impl<T: Read + Write> SerialSession<T> {
    /// Wrap an already-open transport
    pub fn from_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Read one response line, consuming up to the terminator
    fn read_line(&mut self) -> Result<String, ScannerError> {
        let mut buffer = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            self.transport.read_exact(&mut byte)?;
            match byte[0] {
                b'\r' | b'\n' => {
                    // Skip a stray leftover terminator before the line
                    if buffer.is_empty() {
                        continue;
                    }
                    break;
                }
                other => buffer.push(other),
            }
        }
        String::from_utf8(buffer)
            .map_err(|_| ScannerError::Connection("non-ASCII response from device".to_string()))
    }
}

impl<T: Read + Write> Session for SerialSession<T> {
    fn execute(&mut self, command: &Command, allow_error: bool) -> Result<Response, ScannerError> {
        let line = command.wire_format();
        trace!(%line, "send");
        self.transport.write_all(line.as_bytes())?;
        self.transport.write_all(b"\r")?;
        self.transport.flush()?;

        let raw = self.read_line()?;
        trace!(%raw, "recv");

        let response = Response::from_line(strip_echo(command.verb(), &raw));
        if response.is_error() && !allow_error {
            return Err(ScannerError::Command(format!(
                "device rejected '{line}': {raw}"
            )));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// In-memory transport scripted with canned response lines
    struct FakePort {
        incoming: VecDeque<u8>,
        outgoing: Vec<u8>,
    }

    impl FakePort {
        fn new(lines: &[&str]) -> Self {
            let mut incoming = VecDeque::new();
            for line in lines {
                incoming.extend(line.as_bytes());
                incoming.push_back(b'\r');
            }
            Self {
                incoming,
                outgoing: Vec::new(),
            }
        }
    }

    impl Read for FakePort {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.incoming.pop_front() {
                Some(byte) => {
                    buf[0] = byte;
                    Ok(1)
                }
                None => Err(std::io::Error::from(std::io::ErrorKind::TimedOut)),
            }
        }
    }

    impl Write for FakePort {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.outgoing.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_strip_echo() {
        assert_eq!(strip_echo("MDL", "MDL,BC125AT"), "BC125AT");
        assert_eq!(strip_echo("PRG", "PRG,OK"), "OK");
        assert_eq!(strip_echo("GLF", "GLF"), "");
        assert_eq!(strip_echo("MDL", "BC125AT"), "BC125AT");
    }

    #[test]
    fn test_execute_terminates_and_strips() {
        let mut session = SerialSession::from_transport(FakePort::new(&["MDL,BC125AT"]));
        let response = session.execute(&Command::new("MDL"), false).unwrap();
        assert_eq!(response.field(0).unwrap(), "BC125AT");

        let sent = session.transport.outgoing.clone();
        assert_eq!(sent, b"MDL\r");
    }

    #[test]
    fn test_error_marker_raises() {
        let mut session = SerialSession::from_transport(FakePort::new(&["CIN,ERR"]));
        let err = session
            .execute(&Command::new("CIN").arg(1), false)
            .unwrap_err();
        assert!(matches!(err, ScannerError::Command(_)));
    }

    #[test]
    fn test_allow_error_passes_marker_through() {
        let mut session = SerialSession::from_transport(FakePort::new(&["GLF,ERR"]));
        let response = session.execute(&Command::new("GLF"), true).unwrap();
        assert!(response.is_error());
    }

    #[test]
    fn test_leading_terminator_skipped() {
        let mut session = SerialSession::from_transport(FakePort::new(&["", "VER,Version 1.06.00"]));
        let response = session.execute(&Command::new("VER"), false).unwrap();
        assert_eq!(response.field(0).unwrap(), "Version 1.06.00");
    }
}
