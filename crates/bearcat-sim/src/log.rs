//! Recording session wrapper
//!
//! Wraps any [`Session`] and keeps a transcript of every exchange. Useful
//! for dry runs against the virtual device and for asserting on traffic in
//! tests.

use tracing::debug;

use bearcat_protocol::{Command, Response, ScannerError, Session};

/// One recorded exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// The command as it would appear on the wire
    pub command: String,
    /// The response fields, comma-joined, or the error message
    pub outcome: String,
}

/// A session decorator that records all traffic passing through it
pub struct CommandLog<S: Session> {
    inner: S,
    entries: Vec<LogEntry>,
}

impl<S: Session> CommandLog<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            entries: Vec::new(),
        }
    }

    /// The transcript so far
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The wire form of every command sent, in order
    pub fn commands(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.command.as_str()).collect()
    }

    /// Unwrap, discarding the transcript
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Session> Session for CommandLog<S> {
    fn execute(&mut self, command: &Command, allow_error: bool) -> Result<Response, ScannerError> {
        let wire = command.wire_format();
        let result = self.inner.execute(command, allow_error);
        let outcome = match &result {
            Ok(response) => response.fields().join(","),
            Err(err) => err.to_string(),
        };
        debug!(command = %wire, %outcome, "logged exchange");
        self.entries.push(LogEntry {
            command: wire,
            outcome,
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::VirtualScanner;

    #[test]
    fn test_transcript_records_in_order() {
        let mut session = CommandLog::new(VirtualScanner::new());
        session.execute(&Command::new("PRG"), false).unwrap();
        session.execute(&Command::new("VOL").arg(7), false).unwrap();
        session.execute(&Command::new("VOL"), false).unwrap();

        assert_eq!(session.commands(), vec!["PRG", "VOL,7", "VOL"]);
        assert_eq!(session.entries()[2].outcome, "7");
    }

    #[test]
    fn test_errors_are_recorded_too() {
        let mut session = CommandLog::new(VirtualScanner::new());
        let _ = session.execute(&Command::new("VOL"), false);
        assert_eq!(session.entries().len(), 1);
        assert!(session.entries()[0].outcome.contains("rejected"));
    }
}
