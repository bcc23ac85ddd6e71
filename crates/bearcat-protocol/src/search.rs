//! Custom search banks (CSP)
//!
//! The scanner has ten custom search ranges, each a lower and upper
//! frequency limit. Like channels, they are indexed records fetched with
//! verb + index.

use serde::{Deserialize, Serialize};

use crate::command::{Command, Response};
use crate::error::{ParseError, ScannerError};
use crate::freq::Frequency;
use crate::sdo::ScannerDataObject;

/// Number of custom search banks in the device
pub const SEARCH_BANK_COUNT: u16 = 10;

/// Factory search ranges, bank 1 through 10, in MHz units times 10000
const STOCK_RANGES: [(u32, u32); SEARCH_BANK_COUNT as usize] = [
    (250_000, 279_950),
    (280_000, 296_950),
    (297_000, 499_950),
    (500_000, 540_000),
    (1_080_000, 1_369_916),
    (1_370_000, 1_439_950),
    (1_440_000, 1_479_950),
    (1_480_000, 1_739_875),
    (2_250_000, 2_559_950),
    (4_000_000, 5_120_000),
];

/// One custom search range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSearchBank {
    /// Bank index, 1–10
    pub index: u16,
    pub lower_limit: Frequency,
    pub upper_limit: Frequency,
}

impl CustomSearchBank {
    /// The factory range for the given bank index
    pub fn stock(index: u16) -> Result<Self, ParseError> {
        if index < 1 || index > SEARCH_BANK_COUNT {
            return Err(ParseError::InvalidField {
                field: "search bank index",
                value: index.to_string(),
            });
        }
        let (lower, upper) = STOCK_RANGES[usize::from(index) - 1];
        Ok(Self {
            index,
            lower_limit: Frequency::from_scanner_units(lower),
            upper_limit: Frequency::from_scanner_units(upper),
        })
    }

    /// The ten factory ranges in order
    pub fn stock_set() -> Vec<Self> {
        (1..=SEARCH_BANK_COUNT)
            .map(|i| {
                // index is in range by construction
                Self::stock(i).unwrap()
            })
            .collect()
    }

    fn problem(&self, message: impl AsRef<str>) -> String {
        format!("search bank: {}, {}", self.index, message.as_ref())
    }
}

impl ScannerDataObject for CustomSearchBank {
    fn entity_name(&self) -> &'static str {
        "search bank"
    }

    fn verb(&self) -> &'static str {
        "CSP"
    }

    fn fetch_command(&self) -> Command {
        Command::new(self.verb()).arg(self.index)
    }

    fn write_command(&self) -> Result<Command, ScannerError> {
        Ok(Command::new(self.verb())
            .arg(self.index)
            .arg(self.lower_limit.scanner_units())
            .arg(self.upper_limit.scanner_units()))
    }

    fn apply_response(&mut self, response: &Response) -> Result<(), ScannerError> {
        self.index = response.parse_field(0, "index")?;
        self.lower_limit = Frequency::from_wire(response.field(1)?)?;
        self.upper_limit = Frequency::from_wire(response.field(2)?)?;
        Ok(())
    }

    fn validation_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.index < 1 || self.index > SEARCH_BANK_COUNT {
            problems.push(self.problem(format!(
                "index must be in range [1-{SEARCH_BANK_COUNT}]"
            )));
        }
        if !self.lower_limit.is_valid() {
            problems.push(self.problem(format!(
                "lower limit {} is not within a supported band",
                self.lower_limit
            )));
        }
        if !self.upper_limit.is_valid() {
            problems.push(self.problem(format!(
                "upper limit {} is not within a supported band",
                self.upper_limit
            )));
        }
        if self.lower_limit.scanner_units() > self.upper_limit.scanner_units() {
            problems.push(self.problem(format!(
                "lower limit {} must not exceed upper limit {}",
                self.lower_limit, self.upper_limit
            )));
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_set_is_valid() {
        let banks = CustomSearchBank::stock_set();
        assert_eq!(banks.len(), 10);
        for bank in &banks {
            assert!(bank.validate().is_ok(), "bank {} should pass", bank.index);
        }
        assert_eq!(banks[0].lower_limit.as_mhz(), "25.0000");
        assert_eq!(banks[9].upper_limit.as_mhz(), "512.0000");
    }

    #[test]
    fn test_stock_rejects_bad_index() {
        assert!(CustomSearchBank::stock(0).is_err());
        assert!(CustomSearchBank::stock(11).is_err());
    }

    #[test]
    fn test_wire_order() {
        let bank = CustomSearchBank::stock(5).unwrap();
        assert_eq!(
            bank.write_command().unwrap().wire_format(),
            "CSP,5,1080000,1369916"
        );
        assert_eq!(bank.fetch_command().wire_format(), "CSP,5");
    }

    #[test]
    fn test_response_round_trip() {
        let mut bank = CustomSearchBank::stock(1).unwrap();
        bank.apply_response(&Response::from_line("7,1440000,1479950"))
            .unwrap();
        assert_eq!(bank.index, 7);
        assert_eq!(bank.lower_limit.as_mhz(), "144.0000");
        assert_eq!(bank.upper_limit.as_mhz(), "147.9950");
    }

    #[test]
    fn test_inverted_limits_rejected() {
        let bank = CustomSearchBank {
            index: 3,
            lower_limit: Frequency::parse_mhz("147.0000").unwrap(),
            upper_limit: Frequency::parse_mhz("144.0000").unwrap(),
        };
        let message = bank.validate().unwrap_err().to_string();
        assert!(message.contains("must not exceed"));
    }

    #[test]
    fn test_out_of_band_limit_rejected() {
        let bank = CustomSearchBank {
            index: 2,
            lower_limit: Frequency::parse_mhz("144.0000").unwrap(),
            upper_limit: Frequency::parse_mhz("999.0000").unwrap(),
        };
        assert!(bank.validate().is_err());
    }

    #[test]
    fn test_violations_are_batched() {
        let bank = CustomSearchBank {
            index: 0,
            lower_limit: Frequency::parse_mhz("999.0000").unwrap(),
            upper_limit: Frequency::parse_mhz("144.0000").unwrap(),
        };
        let message = bank.validate().unwrap_err().to_string();
        assert!(message.contains("index must be in range [1-10]"));
        assert!(message.contains("lower limit"));
        assert!(message.contains("must not exceed"));
    }

    #[test]
    fn test_dict_uses_mhz_strings() {
        let bank = CustomSearchBank::stock(10).unwrap();
        let json = serde_json::to_value(&bank).unwrap();
        assert_eq!(json["lower_limit"], "400.0000");
        assert_eq!(json["upper_limit"], "512.0000");
    }
}
