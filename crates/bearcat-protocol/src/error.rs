//! Error types for the scanner protocol layer

use thiserror::Error;

/// Errors raised while converting individual wire fields or user values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// CTCSS/DCS code outside the defined table
    #[error("invalid internal ctcss/dcs: {0}")]
    InvalidToneCode(u16),

    /// Human-readable tone value that matches nothing in the table
    #[error("invalid provided ctcss/dcs: {provided}, valid values: {accepted}")]
    InvalidToneName { provided: String, accepted: String },

    /// Frequency string that cannot be parsed
    #[error("invalid frequency: {0}")]
    InvalidFrequency(String),

    /// A field whose value is outside its fixed domain
    #[error("invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    /// Response with fewer positional fields than the record requires
    #[error("truncated response: expected {expected} fields, got {got}")]
    TruncatedResponse { expected: usize, got: usize },

    /// Bank list constructed with an unusable length
    #[error("bank list size must be at least 1, got {0}")]
    InvalidBankCount(usize),

    /// Bank list wire string or persisted vector of the wrong width
    #[error("bank list expects {expected} entries, got {got}")]
    BankCountMismatch { expected: usize, got: usize },
}

/// Errors from driving a scanner session or validating device state
#[derive(Debug, Error)]
pub enum ScannerError {
    /// Field-level conversion failure
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// One or more record invariants are violated; the message carries every
    /// violation found, not just the first
    #[error("validation failed: {0}")]
    Validation(String),

    /// The device answered a command with a trailing ERR or NG marker
    #[error("error in command: {0}")]
    Command(String),

    /// The record structurally lacks the requested operation
    #[error("{entity} does not support {operation}")]
    NotSupported {
        entity: &'static str,
        operation: &'static str,
    },

    /// Transport-level failure reported by the session collaborator
    #[error("connection error: {0}")]
    Connection(String),

    /// Raw I/O failure, propagated unmodified
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScannerError {
    /// Build a validation error from a list of individual problem messages
    pub fn validation(problems: Vec<String>) -> Self {
        ScannerError::Validation(problems.join("; "))
    }
}
