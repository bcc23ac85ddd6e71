//! Error types for session setup and port discovery

use bearcat_protocol::ScannerError;
use thiserror::Error;

/// Errors that can occur while locating or opening a device
#[derive(Debug, Error)]
pub enum SessionError {
    /// Failed to enumerate serial ports
    #[error("failed to enumerate ports: {0}")]
    EnumerationFailed(String),

    /// Failed to open serial port
    #[error("failed to open port {port}: {reason}")]
    OpenFailed { port: String, reason: String },

    /// No scanner found on any port
    #[error("no scanner detected on any serial port")]
    NoScannerFound,

    /// Serial port error
    #[error("serial port error: {0}")]
    SerialPort(#[from] serialport::Error),
}

impl From<SessionError> for ScannerError {
    fn from(err: SessionError) -> Self {
        ScannerError::Connection(err.to_string())
    }
}
