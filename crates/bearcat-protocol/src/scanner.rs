//! The full-device aggregate
//!
//! [`Scanner`] owns one of every record on the device: the global settings,
//! all 500 channel slots, the ten custom search ranges, and the lockout
//! list. It is the unit of import/export — serialize it and you have a
//! complete device image.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::channel::{Channel, CHANNEL_COUNT};
use crate::error::ScannerError;
use crate::lockout::LockedFrequencies;
use crate::sdo::{EnterProgramMode, ExitProgramMode, ScannerDataObject};
use crate::search::{CustomSearchBank, SEARCH_BANK_COUNT};
use crate::session::Session;
use crate::settings::{
    Backlight, BatteryChargeTimer, ChannelBankSelect, CloseCallSettings, Contrast, CustomBankSelect,
    KeyBeep, PriorityMode, SearchCloseCallOptions, ServiceBankSelect, Squelch, Volume, WeatherAlert,
};

/// Version tag written into every exported image
pub const FORMAT_VERSION: u32 = 1;

fn format_version_default() -> u32 {
    FORMAT_VERSION
}

/// A complete image of the device's programmable state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scanner {
    #[serde(default = "format_version_default")]
    pub format_version: u32,
    #[serde(default)]
    pub backlight: Backlight,
    #[serde(default)]
    pub battery_charge_timer: BatteryChargeTimer,
    #[serde(default)]
    pub key_beep: KeyBeep,
    #[serde(default)]
    pub priority_mode: PriorityMode,
    #[serde(default)]
    pub channel_banks: ChannelBankSelect,
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub search_close_call: SearchCloseCallOptions,
    #[serde(default)]
    pub locked_frequencies: LockedFrequencies,
    #[serde(default)]
    pub close_call: CloseCallSettings,
    #[serde(default)]
    pub service_banks: ServiceBankSelect,
    #[serde(default)]
    pub custom_banks: CustomBankSelect,
    pub search_banks: Vec<CustomSearchBank>,
    #[serde(default)]
    pub weather_alert: WeatherAlert,
    #[serde(default)]
    pub contrast: Contrast,
    #[serde(default)]
    pub volume: Volume,
    #[serde(default)]
    pub squelch: Squelch,
}

impl Default for Scanner {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            backlight: Backlight::default(),
            battery_charge_timer: BatteryChargeTimer::default(),
            key_beep: KeyBeep::default(),
            priority_mode: PriorityMode::default(),
            channel_banks: ChannelBankSelect::default(),
            channels: (1..=CHANNEL_COUNT).map(Channel::with_index).collect(),
            search_close_call: SearchCloseCallOptions::default(),
            locked_frequencies: LockedFrequencies::default(),
            close_call: CloseCallSettings::default(),
            service_banks: ServiceBankSelect::default(),
            custom_banks: CustomBankSelect::default(),
            search_banks: CustomSearchBank::stock_set(),
            weather_alert: WeatherAlert::default(),
            contrast: Contrast::default(),
            volume: Volume::default(),
            squelch: Squelch::default(),
        }
    }
}

impl Scanner {
    /// Read the entire device state, replacing this image
    ///
    /// The channel and search bank vectors are rebuilt from scratch so a
    /// previous image can never leak through. On error the device is left
    /// in program mode; no recovery is attempted.
    pub fn read_from(&mut self, session: &mut dyn Session) -> Result<(), ScannerError> {
        EnterProgramMode.write_to(session)?;

        info!("reading device settings");
        self.backlight.read_from(session)?;
        self.battery_charge_timer.read_from(session)?;
        self.key_beep.read_from(session)?;
        self.priority_mode.read_from(session)?;
        self.channel_banks.read_from(session)?;

        info!("reading {} channels", CHANNEL_COUNT);
        let mut channels = Vec::with_capacity(usize::from(CHANNEL_COUNT));
        for index in 1..=CHANNEL_COUNT {
            let mut channel = Channel::with_index(index);
            channel.read_from(session)?;
            debug!(index, "read channel");
            channels.push(channel);
        }
        self.channels = channels;

        self.search_close_call.read_from(session)?;

        info!("reading lockout list");
        self.locked_frequencies.read_from(session)?;

        self.close_call.read_from(session)?;
        self.service_banks.read_from(session)?;
        self.custom_banks.read_from(session)?;

        info!("reading custom search banks");
        let mut search_banks = Vec::with_capacity(usize::from(SEARCH_BANK_COUNT));
        for index in 1..=SEARCH_BANK_COUNT {
            let mut bank = CustomSearchBank::stock(index)?;
            bank.read_from(session)?;
            search_banks.push(bank);
        }
        self.search_banks = search_banks;

        self.weather_alert.read_from(session)?;
        self.contrast.read_from(session)?;
        self.volume.read_from(session)?;
        self.squelch.read_from(session)?;

        ExitProgramMode.write_to(session)?;
        info!("device read complete");
        Ok(())
    }

    /// Write this entire image to the device
    ///
    /// Records go out in a fixed order; the lockout replay rewinds program
    /// mode internally, which is why it sits between the plain records. On
    /// error the device is left in program mode; no recovery is attempted.
    pub fn write_to(&self, session: &mut dyn Session) -> Result<(), ScannerError> {
        EnterProgramMode.write_to(session)?;

        info!("writing device settings");
        self.backlight.write_to(session)?;
        self.battery_charge_timer.write_to(session)?;
        self.key_beep.write_to(session)?;
        self.priority_mode.write_to(session)?;
        self.channel_banks.write_to(session)?;

        info!("writing {} channels", self.channels.len());
        for channel in &self.channels {
            channel.write_to(session)?;
            debug!(index = channel.index, "wrote channel");
        }

        self.search_close_call.write_to(session)?;

        info!("writing lockout list");
        self.locked_frequencies.write_to(session)?;

        self.close_call.write_to(session)?;
        self.service_banks.write_to(session)?;
        self.custom_banks.write_to(session)?;

        info!("writing custom search banks");
        for bank in &self.search_banks {
            bank.write_to(session)?;
        }

        self.weather_alert.write_to(session)?;
        self.contrast.write_to(session)?;
        self.volume.write_to(session)?;
        self.squelch.write_to(session)?;

        ExitProgramMode.write_to(session)?;
        info!("device write complete");
        Ok(())
    }

    /// Every invariant violation in the whole image, batched
    pub fn validation_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        problems.extend(self.battery_charge_timer.validation_problems());
        problems.extend(self.key_beep.validation_problems());
        problems.extend(self.channel_banks.validation_problems());
        problems.extend(self.search_close_call.validation_problems());
        problems.extend(self.locked_frequencies.validation_problems());
        problems.extend(self.service_banks.validation_problems());
        problems.extend(self.custom_banks.validation_problems());
        problems.extend(self.contrast.validation_problems());
        problems.extend(self.volume.validation_problems());
        problems.extend(self.squelch.validation_problems());

        let mut channel_counts: BTreeMap<u16, usize> = BTreeMap::new();
        for channel in &self.channels {
            problems.extend(channel.validation_problems());
            *channel_counts.entry(channel.index).or_default() += 1;
        }
        for (index, count) in channel_counts {
            if count > 1 {
                problems.push(format!("duplicate channel index: {index}"));
            }
        }

        let mut bank_counts: BTreeMap<u16, usize> = BTreeMap::new();
        for bank in &self.search_banks {
            problems.extend(bank.validation_problems());
            *bank_counts.entry(bank.index).or_default() += 1;
        }
        for (index, count) in bank_counts {
            if count > 1 {
                problems.push(format!("duplicate search bank index: {index}"));
            }
        }

        problems
    }

    /// Check every invariant, batching all violations into one error
    pub fn validate(&self) -> Result<(), ScannerError> {
        let problems = self.validation_problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ScannerError::validation(problems))
        }
    }
}
