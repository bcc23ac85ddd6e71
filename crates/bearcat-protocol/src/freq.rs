//! Frequency representation and validity rules
//!
//! The scanner stores frequencies as fixed-point integers in 100 Hz units
//! (so 146.4000 MHz is 1464000). Users and save files always see the MHz
//! string form with exactly four decimal digits; the conversion is a
//! multiply/divide by 10000 with decimal rounding.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// The receiver's four RF bands, in scanner units (inclusive)
const BANDS: &[(i64, i64)] = &[
    (250_000, 540_000),
    (1_080_000, 1_740_000),
    (2_250_000, 3_800_000),
    (4_000_000, 5_120_000),
];

/// True when a scanner-unit frequency is exactly zero (unset) or inside one
/// of the four supported RF bands
pub fn is_valid_freq_scanner(units: i64) -> bool {
    units == 0 || BANDS.iter().any(|&(lo, hi)| (lo..=hi).contains(&units))
}

/// True when an MHz string parses and passes [`is_valid_freq_scanner`]
pub fn is_valid_freq_mhz(mhz: &str) -> bool {
    match freq_to_scanner(mhz) {
        Ok(units) => is_valid_freq_scanner(units as i64),
        Err(_) => false,
    }
}

/// Convert an MHz string to scanner units
pub fn freq_to_scanner(mhz: &str) -> Result<u32, ParseError> {
    let value: f64 = mhz
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidFrequency(mhz.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ParseError::InvalidFrequency(mhz.to_string()));
    }
    Ok((value * 10_000.0).round() as u32)
}

/// Convert scanner units to the canonical four-decimal MHz string
pub fn freq_to_mhz(units: u32) -> String {
    format!("{}.{:04}", units / 10_000, units % 10_000)
}

/// The discrete delay domain shared by channels and close call: seconds of
/// hold after a transmission ends, with negative values meaning "resume
/// after N seconds even if still transmitting"
pub const VALID_DELAYS: &[i8] = &[-10, -5, 0, 1, 2, 3, 4, 5];

/// True iff the value is one of the eight accepted delay settings
pub fn is_valid_delay(delay: i64) -> bool {
    i8::try_from(delay).is_ok_and(|d| VALID_DELAYS.contains(&d))
}

/// A frequency in scanner units
///
/// Zero is the explicit "unset" sentinel used by empty channel slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frequency(u32);

impl Frequency {
    /// The unset sentinel
    pub const UNSET: Frequency = Frequency(0);

    /// Wrap a raw scanner-unit value
    pub fn from_scanner_units(units: u32) -> Self {
        Frequency(units)
    }

    /// Parse an MHz string such as `"146.4000"`
    pub fn parse_mhz(mhz: &str) -> Result<Self, ParseError> {
        freq_to_scanner(mhz).map(Frequency)
    }

    /// Parse the wire field form (raw scanner units)
    pub fn from_wire(field: &str) -> Result<Self, ParseError> {
        field
            .parse::<u32>()
            .map(Frequency)
            .map_err(|_| ParseError::InvalidFrequency(field.to_string()))
    }

    /// Raw scanner units
    pub fn scanner_units(&self) -> u32 {
        self.0
    }

    /// Canonical MHz form with four decimal digits
    pub fn as_mhz(&self) -> String {
        freq_to_mhz(self.0)
    }

    /// Band/sentinel membership test
    pub fn is_valid(&self) -> bool {
        is_valid_freq_scanner(self.0 as i64)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_mhz())
    }
}

impl FromStr for Frequency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frequency::parse_mhz(s)
    }
}

// Persisted form is always the canonical MHz string.
impl Serialize for Frequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_mhz())
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Frequency::parse_mhz(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_freq_to_scanner() {
        assert_eq!(freq_to_scanner("145.5855").unwrap(), 1_455_855);
        assert_eq!(freq_to_scanner("146.4000").unwrap(), 1_464_000);
        assert_eq!(freq_to_scanner("0").unwrap(), 0);
    }

    #[test]
    fn test_freq_to_mhz() {
        assert_eq!(freq_to_mhz(1_455_855), "145.5855");
        assert_eq!(freq_to_mhz(250_000), "25.0000");
        assert_eq!(freq_to_mhz(0), "0.0000");
    }

    #[test]
    fn test_mhz_canonicalization() {
        // Short decimal forms canonicalize to four digits
        let f = Frequency::parse_mhz("146.4").unwrap();
        assert_eq!(f.as_mhz(), "146.4000");
    }

    #[test]
    fn test_band_edges() {
        assert!(is_valid_freq_scanner(0));
        assert!(!is_valid_freq_scanner(-1));
        assert!(!is_valid_freq_scanner(249_999));
        assert!(is_valid_freq_scanner(250_000));
        assert!(is_valid_freq_scanner(540_000));
        assert!(!is_valid_freq_scanner(540_001));
        assert!(is_valid_freq_scanner(1_080_000));
        assert!(is_valid_freq_scanner(1_740_000));
        assert!(!is_valid_freq_scanner(2_240_000));
        assert!(is_valid_freq_scanner(2_250_000));
        assert!(is_valid_freq_scanner(3_800_000));
        assert!(!is_valid_freq_scanner(3_900_000));
        assert!(is_valid_freq_scanner(4_000_000));
        assert!(is_valid_freq_scanner(5_120_000));
        assert!(!is_valid_freq_scanner(5_130_000));
    }

    #[test]
    fn test_is_valid_freq_mhz() {
        assert!(is_valid_freq_mhz("146.4000"));
        assert!(is_valid_freq_mhz("0.0000"));
        assert!(!is_valid_freq_mhz("999.0000"));
        assert!(!is_valid_freq_mhz("garbage"));
    }

    #[test]
    fn test_valid_delays() {
        for d in [-10i64, -5, 0, 1, 2, 3, 4, 5] {
            assert!(is_valid_delay(d), "{d} should be valid");
        }
        for d in [-11i64, -1, 6, 10, 99] {
            assert!(!is_valid_delay(d), "{d} should be invalid");
        }
    }

    proptest! {
        #[test]
        fn prop_units_round_trip_through_mhz(units in 0u32..6_000_000) {
            let mhz = freq_to_mhz(units);
            prop_assert_eq!(freq_to_scanner(&mhz).unwrap(), units);
        }
    }
}
