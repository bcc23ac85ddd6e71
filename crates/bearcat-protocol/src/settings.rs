//! Settings records: one SDO per global device setting
//!
//! These are the small single-instance records the scanner keeps alongside
//! its channel memory. Each serializes to a short write tuple and parses the
//! same fields back positionally.

use serde::{Deserialize, Serialize};

use crate::bank::BankList;
use crate::command::{Command, Response};
use crate::error::{ParseError, ScannerError};
use crate::freq::{is_valid_delay, VALID_DELAYS};
use crate::sdo::ScannerDataObject;

fn parse_flag(value: &str, name: &'static str) -> Result<bool, ParseError> {
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(ParseError::InvalidField {
            field: name,
            value: other.to_string(),
        }),
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// BLT — display backlight behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacklightMode {
    AlwaysOn,
    #[default]
    AlwaysOff,
    Keypress,
    KeySquelch,
    Squelch,
}

impl BacklightMode {
    pub fn as_wire(&self) -> &'static str {
        match self {
            BacklightMode::AlwaysOn => "AO",
            BacklightMode::AlwaysOff => "AF",
            BacklightMode::Keypress => "KY",
            BacklightMode::KeySquelch => "KS",
            BacklightMode::Squelch => "SQ",
        }
    }

    pub fn from_wire(field: &str) -> Result<Self, ParseError> {
        match field {
            "AO" => Ok(BacklightMode::AlwaysOn),
            "AF" => Ok(BacklightMode::AlwaysOff),
            "KY" => Ok(BacklightMode::Keypress),
            "KS" => Ok(BacklightMode::KeySquelch),
            "SQ" => Ok(BacklightMode::Squelch),
            other => Err(ParseError::InvalidField {
                field: "backlight",
                value: other.to_string(),
            }),
        }
    }
}

/// Backlight setting record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backlight {
    pub mode: BacklightMode,
}

impl ScannerDataObject for Backlight {
    fn entity_name(&self) -> &'static str {
        "backlight"
    }

    fn verb(&self) -> &'static str {
        "BLT"
    }

    fn write_command(&self) -> Result<Command, ScannerError> {
        Ok(Command::new(self.verb()).arg(self.mode.as_wire()))
    }

    fn apply_response(&mut self, response: &Response) -> Result<(), ScannerError> {
        self.mode = BacklightMode::from_wire(response.field(0)?)?;
        Ok(())
    }
}

/// BSV — battery charge timer, in hours
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryChargeTimer {
    pub hours: u8,
}

impl Default for BatteryChargeTimer {
    fn default() -> Self {
        Self { hours: 9 }
    }
}

impl ScannerDataObject for BatteryChargeTimer {
    fn entity_name(&self) -> &'static str {
        "battery charge timer"
    }

    fn verb(&self) -> &'static str {
        "BSV"
    }

    fn write_command(&self) -> Result<Command, ScannerError> {
        Ok(Command::new(self.verb()).arg(self.hours))
    }

    fn apply_response(&mut self, response: &Response) -> Result<(), ScannerError> {
        self.hours = response.parse_field(0, "hours")?;
        Ok(())
    }

    fn validation_problems(&self) -> Vec<String> {
        if (1..=16).contains(&self.hours) {
            Vec::new()
        } else {
            vec![format!(
                "battery charge timer: hours must be in range [1-16], got {}",
                self.hours
            )]
        }
    }
}

/// KBP — key beep level and keypad lock
///
/// The device accepts only two beep levels: 0 (auto) and 99 (off).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBeep {
    pub level: u8,
    pub lock: bool,
}

impl ScannerDataObject for KeyBeep {
    fn entity_name(&self) -> &'static str {
        "key beep"
    }

    fn verb(&self) -> &'static str {
        "KBP"
    }

    fn write_command(&self) -> Result<Command, ScannerError> {
        Ok(Command::new(self.verb()).arg(self.level).arg(flag(self.lock)))
    }

    fn apply_response(&mut self, response: &Response) -> Result<(), ScannerError> {
        self.level = response.parse_field(0, "beep level")?;
        self.lock = parse_flag(response.field(1)?, "key lock")?;
        Ok(())
    }

    fn validation_problems(&self) -> Vec<String> {
        if self.level == 0 || self.level == 99 {
            Vec::new()
        } else {
            vec![format!(
                "key beep: level must be 0 (auto) or 99 (off), got {}",
                self.level
            )]
        }
    }
}

/// PRI — priority scan mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityScanMode {
    #[default]
    Off,
    On,
    PlusOn,
    DoNotDisturb,
}

impl PriorityScanMode {
    pub fn as_wire(&self) -> &'static str {
        match self {
            PriorityScanMode::Off => "0",
            PriorityScanMode::On => "1",
            PriorityScanMode::PlusOn => "2",
            PriorityScanMode::DoNotDisturb => "3",
        }
    }

    pub fn from_wire(field: &str) -> Result<Self, ParseError> {
        match field {
            "0" => Ok(PriorityScanMode::Off),
            "1" => Ok(PriorityScanMode::On),
            "2" => Ok(PriorityScanMode::PlusOn),
            "3" => Ok(PriorityScanMode::DoNotDisturb),
            other => Err(ParseError::InvalidField {
                field: "priority mode",
                value: other.to_string(),
            }),
        }
    }
}

/// Priority mode setting record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityMode {
    pub mode: PriorityScanMode,
}

impl ScannerDataObject for PriorityMode {
    fn entity_name(&self) -> &'static str {
        "priority mode"
    }

    fn verb(&self) -> &'static str {
        "PRI"
    }

    fn write_command(&self) -> Result<Command, ScannerError> {
        Ok(Command::new(self.verb()).arg(self.mode.as_wire()))
    }

    fn apply_response(&mut self, response: &Response) -> Result<(), ScannerError> {
        self.mode = PriorityScanMode::from_wire(response.field(0)?)?;
        Ok(())
    }
}

/// Persisted shape shared by every bank-mask record
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BankFlags {
    banks: Vec<bool>,
}

/// Defines a settings record that is nothing but a bank mask
macro_rules! bank_select_sdo {
    ($(#[$doc:meta])* $name:ident, $verb:literal, $entity:literal, $size:literal, $invert:literal, $require:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "BankFlags", into = "BankFlags")]
        pub struct $name {
            pub banks: BankList,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    // size >= 1, cannot fail
                    banks: BankList::new($size, $invert, $require).unwrap(),
                }
            }
        }

        impl TryFrom<BankFlags> for $name {
            type Error = ParseError;

            fn try_from(value: BankFlags) -> Result<Self, Self::Error> {
                let mut record = Self::default();
                record.banks.load(&value.banks)?;
                Ok(record)
            }
        }

        impl From<$name> for BankFlags {
            fn from(value: $name) -> Self {
                BankFlags {
                    banks: value.banks.as_slice().to_vec(),
                }
            }
        }

        impl ScannerDataObject for $name {
            fn entity_name(&self) -> &'static str {
                $entity
            }

            fn verb(&self) -> &'static str {
                $verb
            }

            fn write_command(&self) -> Result<Command, ScannerError> {
                Ok(Command::new(self.verb()).arg(self.banks.to_wire()))
            }

            fn apply_response(&mut self, response: &Response) -> Result<(), ScannerError> {
                self.banks.from_wire(response.field(0)?)?;
                Ok(())
            }

            fn validation_problems(&self) -> Vec<String> {
                self.banks
                    .validation_problems()
                    .into_iter()
                    .map(|p| format!("{}: {}", $entity, p))
                    .collect()
            }
        }
    };
}

bank_select_sdo!(
    /// SCG — which of the ten channel banks are scanned
    ChannelBankSelect, "SCG", "channel banks", 10, false, true
);

bank_select_sdo!(
    /// SSG — which of the ten service search banks are searched
    ServiceBankSelect, "SSG", "service search banks", 10, false, true
);

bank_select_sdo!(
    /// CSG — which of the ten custom search banks are searched
    CustomBankSelect, "CSG", "custom search banks", 10, false, true
);

/// SCO — search and close call options: delay and CTCSS/DCS code search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCloseCallOptions {
    /// Seconds of delay after a transmission; one of {-10,-5,0,1,2,3,4,5}
    pub delay: i8,
    pub code_search: bool,
}

impl Default for SearchCloseCallOptions {
    fn default() -> Self {
        Self {
            delay: 2,
            code_search: false,
        }
    }
}

impl ScannerDataObject for SearchCloseCallOptions {
    fn entity_name(&self) -> &'static str {
        "search/close call options"
    }

    fn verb(&self) -> &'static str {
        "SCO"
    }

    fn write_command(&self) -> Result<Command, ScannerError> {
        Ok(Command::new(self.verb())
            .arg(self.delay)
            .arg(flag(self.code_search)))
    }

    fn apply_response(&mut self, response: &Response) -> Result<(), ScannerError> {
        self.delay = response.parse_field(0, "delay")?;
        self.code_search = parse_flag(response.field(1)?, "code search")?;
        Ok(())
    }

    fn validation_problems(&self) -> Vec<String> {
        if is_valid_delay(self.delay as i64) {
            Vec::new()
        } else {
            vec![format!(
                "search/close call options: delay must be one of {VALID_DELAYS:?}"
            )]
        }
    }
}

/// Close call operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseCallMode {
    #[default]
    Off,
    Priority,
    DoNotDisturb,
}

impl CloseCallMode {
    pub fn as_wire(&self) -> &'static str {
        match self {
            CloseCallMode::Off => "0",
            CloseCallMode::Priority => "1",
            CloseCallMode::DoNotDisturb => "2",
        }
    }

    pub fn from_wire(field: &str) -> Result<Self, ParseError> {
        match field {
            "0" => Ok(CloseCallMode::Off),
            "1" => Ok(CloseCallMode::Priority),
            "2" => Ok(CloseCallMode::DoNotDisturb),
            other => Err(ParseError::InvalidField {
                field: "close call mode",
                value: other.to_string(),
            }),
        }
    }
}

/// CLC — close call main settings
///
/// The band mask covers the five RF bands close call can watch. Its wire
/// polarity is the opposite of the bank group masks: `'1'` means enabled.
/// All bands disabled is legal here, so no require-enabled invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CloseCallRepr", into = "CloseCallRepr")]
pub struct CloseCallSettings {
    pub mode: CloseCallMode,
    pub alert_beep: bool,
    pub alert_light: bool,
    pub bands: BankList,
    pub lockout: bool,
    pub hold: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CloseCallRepr {
    mode: CloseCallMode,
    alert_beep: bool,
    alert_light: bool,
    bands: Vec<bool>,
    lockout: bool,
    hold: bool,
}

impl Default for CloseCallSettings {
    fn default() -> Self {
        Self {
            mode: CloseCallMode::Off,
            alert_beep: false,
            alert_light: false,
            bands: BankList::new(5, true, false).unwrap(),
            lockout: false,
            hold: false,
        }
    }
}

impl TryFrom<CloseCallRepr> for CloseCallSettings {
    type Error = ParseError;

    fn try_from(value: CloseCallRepr) -> Result<Self, Self::Error> {
        let mut settings = Self {
            mode: value.mode,
            alert_beep: value.alert_beep,
            alert_light: value.alert_light,
            lockout: value.lockout,
            hold: value.hold,
            ..Self::default()
        };
        settings.bands.load(&value.bands)?;
        Ok(settings)
    }
}

impl From<CloseCallSettings> for CloseCallRepr {
    fn from(value: CloseCallSettings) -> Self {
        CloseCallRepr {
            mode: value.mode,
            alert_beep: value.alert_beep,
            alert_light: value.alert_light,
            bands: value.bands.as_slice().to_vec(),
            lockout: value.lockout,
            hold: value.hold,
        }
    }
}

impl ScannerDataObject for CloseCallSettings {
    fn entity_name(&self) -> &'static str {
        "close call"
    }

    fn verb(&self) -> &'static str {
        "CLC"
    }

    fn write_command(&self) -> Result<Command, ScannerError> {
        Ok(Command::new(self.verb())
            .arg(self.mode.as_wire())
            .arg(flag(self.alert_beep))
            .arg(flag(self.alert_light))
            .arg(self.bands.to_wire())
            .arg(flag(self.lockout))
            .arg(flag(self.hold)))
    }

    fn apply_response(&mut self, response: &Response) -> Result<(), ScannerError> {
        self.mode = CloseCallMode::from_wire(response.field(0)?)?;
        self.alert_beep = parse_flag(response.field(1)?, "alert beep")?;
        self.alert_light = parse_flag(response.field(2)?, "alert light")?;
        self.bands.from_wire(response.field(3)?)?;
        self.lockout = parse_flag(response.field(4)?, "lockout")?;
        self.hold = parse_flag(response.field(5)?, "hold")?;
        Ok(())
    }
}

/// WXS — weather alert priority
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherAlert {
    pub alert_priority: bool,
}

impl ScannerDataObject for WeatherAlert {
    fn entity_name(&self) -> &'static str {
        "weather alert"
    }

    fn verb(&self) -> &'static str {
        "WXS"
    }

    fn write_command(&self) -> Result<Command, ScannerError> {
        Ok(Command::new(self.verb()).arg(flag(self.alert_priority)))
    }

    fn apply_response(&mut self, response: &Response) -> Result<(), ScannerError> {
        self.alert_priority = parse_flag(response.field(0)?, "alert priority")?;
        Ok(())
    }
}

/// Defines a settings record that is a single 0–15 level
macro_rules! level_sdo {
    ($(#[$doc:meta])* $name:ident, $verb:literal, $entity:literal, $default:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            pub level: u8,
        }

        impl Default for $name {
            fn default() -> Self {
                Self { level: $default }
            }
        }

        impl ScannerDataObject for $name {
            fn entity_name(&self) -> &'static str {
                $entity
            }

            fn verb(&self) -> &'static str {
                $verb
            }

            fn write_command(&self) -> Result<Command, ScannerError> {
                Ok(Command::new(self.verb()).arg(self.level))
            }

            fn apply_response(&mut self, response: &Response) -> Result<(), ScannerError> {
                self.level = response.parse_field(0, "level")?;
                Ok(())
            }

            fn validation_problems(&self) -> Vec<String> {
                if self.level <= 15 {
                    Vec::new()
                } else {
                    vec![format!(
                        "{}: level must be in range [0-15], got {}",
                        $entity, self.level
                    )]
                }
            }
        }
    };
}

level_sdo!(
    /// CNT — display contrast
    Contrast, "CNT", "contrast", 8
);

level_sdo!(
    /// VOL — speaker volume
    Volume, "VOL", "volume", 10
);

level_sdo!(
    /// SQL — squelch level
    Squelch, "SQL", "squelch", 5
);
