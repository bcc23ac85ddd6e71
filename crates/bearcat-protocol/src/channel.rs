//! Channel records (CIN)
//!
//! The scanner holds exactly 500 channel slots. An unused slot is a channel
//! with the zero frequency sentinel. Channel fields travel in one fixed
//! positional order: index, name, frequency, modulation, CTCSS/DCS code,
//! delay, lockout, priority.

use serde::{Deserialize, Serialize};

use crate::command::{Command, Response};
use crate::error::{ParseError, ScannerError};
use crate::freq::{is_valid_delay, Frequency, VALID_DELAYS};
use crate::sdo::ScannerDataObject;
use crate::tones::ToneCode;

/// Number of channel slots in the device
pub const CHANNEL_COUNT: u16 = 500;

/// Receive modulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modulation {
    #[default]
    Auto,
    Am,
    Fm,
    Nfm,
}

impl Modulation {
    /// Wire code for this modulation
    pub fn as_wire(&self) -> &'static str {
        match self {
            Modulation::Auto => "AUTO",
            Modulation::Am => "AM",
            Modulation::Fm => "FM",
            Modulation::Nfm => "NFM",
        }
    }

    /// Parse a wire code
    pub fn from_wire(field: &str) -> Result<Self, ParseError> {
        match field {
            "AUTO" => Ok(Modulation::Auto),
            "AM" => Ok(Modulation::Am),
            "FM" => Ok(Modulation::Fm),
            "NFM" => Ok(Modulation::Nfm),
            other => Err(ParseError::InvalidField {
                field: "modulation",
                value: other.to_string(),
            }),
        }
    }
}

/// Whether a channel is skipped while scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockoutState {
    #[default]
    Unlocked,
    Locked,
}

impl LockoutState {
    pub fn as_wire(&self) -> &'static str {
        match self {
            LockoutState::Unlocked => "0",
            LockoutState::Locked => "1",
        }
    }

    pub fn from_wire(field: &str) -> Result<Self, ParseError> {
        match field {
            "0" => Ok(LockoutState::Unlocked),
            "1" => Ok(LockoutState::Locked),
            other => Err(ParseError::InvalidField {
                field: "lockout",
                value: other.to_string(),
            }),
        }
    }
}

/// Priority scan membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityFlag {
    #[default]
    Off,
    On,
}

impl PriorityFlag {
    pub fn as_wire(&self) -> &'static str {
        match self {
            PriorityFlag::Off => "0",
            PriorityFlag::On => "1",
        }
    }

    pub fn from_wire(field: &str) -> Result<Self, ParseError> {
        match field {
            "0" => Ok(PriorityFlag::Off),
            "1" => Ok(PriorityFlag::On),
            other => Err(ParseError::InvalidField {
                field: "priority",
                value: other.to_string(),
            }),
        }
    }
}

/// One channel slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Slot index, 1–500, unique within a scanner
    pub index: u16,
    /// Display name, up to 16 characters
    #[serde(default)]
    pub name: String,
    /// Receive frequency; zero means the slot is unset
    pub frequency: Frequency,
    pub modulation: Modulation,
    pub ctcss: ToneCode,
    /// Seconds of delay after a transmission; one of {-10,-5,0,1,2,3,4,5}
    pub delay: i8,
    pub lockout: LockoutState,
    pub priority: PriorityFlag,
}

impl Channel {
    /// A fresh default slot at the given index
    pub fn with_index(index: u16) -> Self {
        Self {
            index,
            name: String::new(),
            frequency: Frequency::UNSET,
            modulation: Modulation::Auto,
            ctcss: ToneCode(0),
            delay: 2,
            lockout: LockoutState::Unlocked,
            priority: PriorityFlag::Off,
        }
    }

    fn problem(&self, message: impl AsRef<str>) -> String {
        format!("channel: {}, {}", self.index, message.as_ref())
    }
}

impl ScannerDataObject for Channel {
    fn entity_name(&self) -> &'static str {
        "channel"
    }

    fn verb(&self) -> &'static str {
        "CIN"
    }

    fn fetch_command(&self) -> Command {
        Command::new(self.verb()).arg(self.index)
    }

    fn write_command(&self) -> Result<Command, ScannerError> {
        Ok(Command::new(self.verb())
            .arg(self.index)
            .arg(&self.name)
            .arg(self.frequency.scanner_units())
            .arg(self.modulation.as_wire())
            .arg(self.ctcss.0)
            .arg(self.delay)
            .arg(self.lockout.as_wire())
            .arg(self.priority.as_wire()))
    }

    fn apply_response(&mut self, response: &Response) -> Result<(), ScannerError> {
        self.index = response.parse_field(0, "index")?;
        self.name = response.field(1)?.to_string();
        self.frequency = Frequency::from_wire(response.field(2)?)?;
        self.modulation = Modulation::from_wire(response.field(3)?)?;
        self.ctcss = ToneCode::from_wire(response.field(4)?)?;
        self.delay = response.parse_field(5, "delay")?;
        self.lockout = LockoutState::from_wire(response.field(6)?)?;
        self.priority = PriorityFlag::from_wire(response.field(7)?)?;
        Ok(())
    }

    fn validation_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.index < 1 || self.index > CHANNEL_COUNT {
            problems.push(self.problem(format!("index must be in range [1-{CHANNEL_COUNT}]")));
        }
        if self.name.chars().count() > 16 {
            problems.push(self.problem("name must be 16 characters or fewer"));
        }
        if !self.frequency.is_valid() {
            problems.push(self.problem(format!(
                "frequency {} is not within a supported band",
                self.frequency
            )));
        }
        if !self.ctcss.is_valid() {
            problems.push(self.problem(format!("unknown ctcss/dcs code: {}", self.ctcss.0)));
        }
        if !is_valid_delay(self.delay as i64) {
            problems.push(self.problem(format!("delay must be one of {VALID_DELAYS:?}")));
        }
        problems
    }
}
