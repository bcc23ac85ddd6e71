//! USB discovery for the scanner
//!
//! The BC125AT enumerates as a USB CDC-ACM serial device with a fixed
//! vendor/product ID pair, so discovery is a filter over the system's
//! serial ports rather than a probe.

use serialport::{available_ports, SerialPortType};
use tracing::info;

use crate::error::SessionError;

/// Uniden's USB vendor ID
pub const VENDOR_ID: u16 = 0x1965;

/// The BC125AT's USB product ID
pub const PRODUCT_ID: u16 = 0x0017;

/// A serial port that identifies as a BC125AT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerPort {
    /// Port name (e.g., /dev/ttyACM0, COM3)
    pub port: String,
    /// USB serial number, when the OS reports one
    pub serial_number: Option<String>,
}

/// Enumerate every attached scanner
pub fn find_scanner_ports() -> Result<Vec<ScannerPort>, SessionError> {
    let ports = available_ports().map_err(|e| SessionError::EnumerationFailed(e.to_string()))?;

    let found: Vec<ScannerPort> = ports
        .into_iter()
        .filter_map(|p| match p.port_type {
            SerialPortType::UsbPort(usb) if usb.vid == VENDOR_ID && usb.pid == PRODUCT_ID => {
                Some(ScannerPort {
                    port: p.port_name,
                    serial_number: usb.serial_number,
                })
            }
            _ => None,
        })
        .collect();

    if found.is_empty() {
        info!("no scanner found");
    } else {
        for port in &found {
            info!(port = %port.port, "found scanner");
        }
    }
    Ok(found)
}

/// The first attached scanner's port name
pub fn first_scanner_port() -> Result<String, SessionError> {
    find_scanner_ports()?
        .into_iter()
        .next()
        .map(|p| p.port)
        .ok_or(SessionError::NoScannerFound)
}
