//! Fixed-width bank enable/disable vectors
//!
//! Several settings records carry a group of banks serialized as a
//! fixed-length string of `'0'`/`'1'` characters. Which character means
//! "enabled" varies by record: the channel/search group masks use `'0'` for
//! enabled, while the close call band mask uses `'1'`. Polarity is fixed at
//! construction.

use crate::error::ParseError;

/// A fixed-size boolean vector with wire polarity and an optional
/// "at least one enabled" invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankList {
    enabled: Vec<bool>,
    invert: bool,
    require_enabled: bool,
}

impl BankList {
    /// Create a bank list with every bank enabled
    ///
    /// `invert` selects the wire polarity: when set, an enabled bank
    /// serializes to `'1'`; otherwise to `'0'`.
    pub fn new(size: usize, invert: bool, require_enabled: bool) -> Result<Self, ParseError> {
        if size < 1 {
            return Err(ParseError::InvalidBankCount(size));
        }
        Ok(Self {
            enabled: vec![true; size],
            invert,
            require_enabled,
        })
    }

    /// Number of banks
    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    /// Always false; a zero-size list cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    /// Enabled state of one bank
    pub fn get(&self, index: usize) -> Option<bool> {
        self.enabled.get(index).copied()
    }

    /// Set the enabled state of one bank
    pub fn set(&mut self, index: usize, enabled: bool) {
        if let Some(slot) = self.enabled.get_mut(index) {
            *slot = enabled;
        }
    }

    /// The enabled flags in order
    pub fn as_slice(&self) -> &[bool] {
        &self.enabled
    }

    fn enabled_char(&self) -> char {
        if self.invert {
            '1'
        } else {
            '0'
        }
    }

    /// Serialize to the fixed-width wire string
    pub fn to_wire(&self) -> String {
        let on = self.enabled_char();
        let off = if on == '1' { '0' } else { '1' };
        self.enabled
            .iter()
            .map(|&e| if e { on } else { off })
            .collect()
    }

    /// Populate from a wire string, position for position
    pub fn from_wire(&mut self, field: &str) -> Result<(), ParseError> {
        if field.len() != self.enabled.len() {
            return Err(ParseError::BankCountMismatch {
                expected: self.enabled.len(),
                got: field.len(),
            });
        }
        let on = self.enabled_char();
        let mut parsed = Vec::with_capacity(field.len());
        for c in field.chars() {
            match c {
                '0' | '1' => parsed.push(c == on),
                other => {
                    return Err(ParseError::InvalidField {
                        field: "bank list",
                        value: other.to_string(),
                    })
                }
            }
        }
        self.enabled = parsed;
        Ok(())
    }

    /// Replace contents from a persisted boolean vector
    ///
    /// Rejects wrong-size input, and all-false input when this list requires
    /// at least one enabled bank. The persisted path is strict so that a bad
    /// save file is caught at load time, before any command is issued.
    pub fn load(&mut self, flags: &[bool]) -> Result<(), ParseError> {
        if flags.len() != self.enabled.len() {
            return Err(ParseError::BankCountMismatch {
                expected: self.enabled.len(),
                got: flags.len(),
            });
        }
        if self.require_enabled && flags.iter().all(|&f| !f) {
            return Err(ParseError::InvalidField {
                field: "bank list",
                value: "at least one bank must be enabled".to_string(),
            });
        }
        self.enabled = flags.to_vec();
        Ok(())
    }

    /// Invariant check: at least one bank enabled, when required
    pub fn validation_problems(&self) -> Vec<String> {
        if self.require_enabled && self.enabled.iter().all(|&e| !e) {
            vec!["at least one bank must be enabled".to_string()]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            BankList::new(0, false, true),
            Err(ParseError::InvalidBankCount(0))
        ));
    }

    #[test]
    fn test_default_is_all_enabled() {
        let banks = BankList::new(10, false, true).unwrap();
        assert_eq!(banks.to_wire(), "0000000000");
        assert!(banks.validation_problems().is_empty());
    }

    #[test]
    fn test_inverted_polarity() {
        let mut banks = BankList::new(3, true, false).unwrap();
        banks.load(&[true, false, true]).unwrap();
        assert_eq!(banks.to_wire(), "101");
    }

    #[test]
    fn test_non_inverted_polarity() {
        let mut banks = BankList::new(3, false, false).unwrap();
        banks.load(&[true, false, true]).unwrap();
        assert_eq!(banks.to_wire(), "010");
    }

    #[test]
    fn test_from_wire_round_trip() {
        let mut banks = BankList::new(10, false, true).unwrap();
        banks.from_wire("0110010111").unwrap();
        assert_eq!(banks.to_wire(), "0110010111");
        assert!(banks.get(0).unwrap());
        assert!(!banks.get(1).unwrap());
    }

    #[test]
    fn test_from_wire_wrong_width() {
        let mut banks = BankList::new(10, false, true).unwrap();
        assert!(banks.from_wire("01101").is_err());
    }

    #[test]
    fn test_from_wire_bad_char() {
        let mut banks = BankList::new(3, false, true).unwrap();
        assert!(banks.from_wire("01x").is_err());
    }

    #[test]
    fn test_load_enforces_require_enabled() {
        let mut banks = BankList::new(3, false, true).unwrap();
        assert!(banks.load(&[true, false, false]).is_ok());
        assert!(banks.load(&[false, false, false]).is_err());

        let mut optional = BankList::new(3, false, false).unwrap();
        assert!(optional.load(&[false, false, false]).is_ok());
    }

    #[test]
    fn test_load_wrong_size() {
        let mut banks = BankList::new(4, false, true).unwrap();
        assert!(banks.load(&[false, false, false]).is_err());
    }

    #[test]
    fn test_validate_all_disabled() {
        let mut banks = BankList::new(5, false, true).unwrap();
        for i in 0..5 {
            banks.set(i, false);
        }
        assert_eq!(
            banks.validation_problems(),
            vec!["at least one bank must be enabled".to_string()]
        );
    }

    proptest! {
        #[test]
        fn prop_wire_round_trip(
            flags in prop::collection::vec(any::<bool>(), 1..=16),
            invert in any::<bool>(),
        ) {
            let mut banks = BankList::new(flags.len(), invert, false).unwrap();
            banks.load(&flags).unwrap();
            let wire = banks.to_wire();

            let mut back = BankList::new(flags.len(), invert, false).unwrap();
            back.from_wire(&wire).unwrap();
            prop_assert_eq!(back.as_slice(), flags.as_slice());
        }
    }
}
