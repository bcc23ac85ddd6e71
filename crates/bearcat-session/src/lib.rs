//! Serial transport and USB discovery for the BC125AT scanner
//!
//! This crate implements [`bearcat_protocol::Session`] over a real serial
//! port and locates attached scanners by their USB vendor/product IDs.

pub mod detect;
pub mod error;
pub mod serial;

pub use detect::{find_scanner_ports, first_scanner_port, ScannerPort, PRODUCT_ID, VENDOR_ID};
pub use error::SessionError;
pub use serial::SerialSession;
