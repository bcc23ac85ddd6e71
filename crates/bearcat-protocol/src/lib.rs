//! BC125AT Protocol Library
//!
//! This crate models the programmable state of the Uniden BC125AT handheld
//! scanner and its line-oriented serial protocol. Commands are
//! comma-separated ASCII tuples terminated by a carriage return; the device
//! echoes the verb back in front of every response.
//!
//! # Architecture
//!
//! Every piece of device state is a *scanner data object* (SDO)
//! implementing [`ScannerDataObject`]: it knows its protocol verb, encodes
//! itself into a write tuple in the device's fixed positional order, parses
//! itself back out of a response, and reports every invariant violation it
//! contains. [`Scanner`] aggregates one of everything — the global
//! settings, the 500 channel slots, the ten custom search ranges, and the
//! lockout list — into a complete device image that serializes to JSON.
//!
//! Transport is behind the object-safe [`Session`] trait, so the same
//! records drive a real serial port or a simulated device.
//!
//! # Example
//!
//! ```rust
//! use bearcat_protocol::{Channel, Frequency, ScannerDataObject};
//!
//! let mut ch = Channel::with_index(1);
//! ch.name = "CALLING".to_string();
//! ch.frequency = Frequency::parse_mhz("146.5200")?;
//! ch.validate()?;
//!
//! assert_eq!(
//!     ch.write_command()?.wire_format(),
//!     "CIN,1,CALLING,1465200,AUTO,0,2,0,0",
//! );
//! # Ok::<(), bearcat_protocol::ScannerError>(())
//! ```

pub mod bank;
pub mod channel;
pub mod command;
pub mod error;
pub mod freq;
pub mod lockout;
pub mod scanner;
pub mod sdo;
pub mod search;
pub mod session;
pub mod settings;
pub mod tones;

pub use bank::BankList;
pub use channel::{Channel, LockoutState, Modulation, PriorityFlag, CHANNEL_COUNT};
pub use command::{Command, Response};
pub use error::{ParseError, ScannerError};
pub use freq::{Frequency, VALID_DELAYS};
pub use lockout::LockedFrequencies;
pub use scanner::{Scanner, FORMAT_VERSION};
pub use sdo::{
    ClearMemory, DeleteChannel, DeviceModel, EnterProgramMode, ExitProgramMode, FirmwareVersion,
    ScannerDataObject,
};
pub use search::{CustomSearchBank, SEARCH_BANK_COUNT};
pub use session::Session;
pub use settings::{
    Backlight, BacklightMode, BatteryChargeTimer, ChannelBankSelect, CloseCallMode,
    CloseCallSettings, Contrast, CustomBankSelect, KeyBeep, PriorityMode, PriorityScanMode,
    SearchCloseCallOptions, ServiceBankSelect, Squelch, Volume, WeatherAlert,
};
pub use tones::ToneCode;
