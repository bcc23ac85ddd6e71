//! BC125AT Simulation Library
//!
//! This crate provides a protocol-accurate simulated scanner for testing
//! without physical hardware:
//!
//! - **VirtualScanner**: an in-memory device with program-mode gating,
//!   channel and search bank storage, and a GLF lockout cursor
//! - **CommandLog**: a session decorator that records every exchange
//!
//! # Example
//!
//! ```rust
//! use bearcat_sim::VirtualScanner;
//! use bearcat_protocol::Scanner;
//!
//! let mut device = VirtualScanner::new();
//! let mut image = Scanner::default();
//! image.read_from(&mut device)?;
//! assert_eq!(image.volume.level, 10);
//! # Ok::<(), bearcat_protocol::ScannerError>(())
//! ```

pub mod device;
pub mod log;

pub use device::VirtualScanner;
pub use log::{CommandLog, LogEntry};
