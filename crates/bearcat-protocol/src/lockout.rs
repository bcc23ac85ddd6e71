//! Locked-out search frequencies (GLF/ULF/LOF)
//!
//! The lockout list is the one record with an irregular wire protocol.
//! There is no "read slot N" command; instead GLF walks a device-side
//! cursor, returning one frequency per call and `-1` when exhausted. The
//! cursor only rewinds when program mode is re-entered, so every full walk
//! is bracketed by an exit/enter pair. Writing is replace-only: drain the
//! current list with ULF, then lock each desired frequency with LOF.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::command::{Command, Response};
use crate::error::ScannerError;
use crate::freq::Frequency;
use crate::sdo::ScannerDataObject;
use crate::session::Session;

/// The complete set of locked-out frequencies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedFrequencies {
    pub frequencies: Vec<Frequency>,
}

impl LockedFrequencies {
    /// Rewind the device's GLF cursor by bouncing program mode
    fn reset_cursor(session: &mut dyn Session) -> Result<(), ScannerError> {
        session.execute(&Command::new("EPG"), false)?;
        session.execute(&Command::new("PRG"), false)?;
        Ok(())
    }

    /// Walk the GLF cursor from its current position to exhaustion
    fn drain(session: &mut dyn Session) -> Result<Vec<Frequency>, ScannerError> {
        let mut found = Vec::new();
        loop {
            let response = session.execute(&Command::new("GLF"), true)?;
            let Some(first) = response.fields().first() else {
                // Bare echo with no payload, list is exhausted
                break;
            };
            if first == "-1" {
                break;
            }
            // Some firmware answers the end of the list with a bare verb
            // echo instead of -1
            if first == "GLF" || first.is_empty() {
                warn!("lockout walk ended with a verb echo instead of -1");
                break;
            }
            found.push(Frequency::from_wire(first)?);
        }
        Ok(found)
    }
}

impl ScannerDataObject for LockedFrequencies {
    fn entity_name(&self) -> &'static str {
        "locked frequencies"
    }

    fn verb(&self) -> &'static str {
        "GLF"
    }

    fn apply_response(&mut self, _response: &Response) -> Result<(), ScannerError> {
        Err(ScannerError::NotSupported {
            entity: self.entity_name(),
            operation: "single-response read",
        })
    }

    fn validation_problems(&self) -> Vec<String> {
        self.frequencies
            .iter()
            .filter(|f| !f.is_valid())
            .map(|f| format!("locked frequencies: {f} is not within a supported band"))
            .collect()
    }

    fn read_from(&mut self, session: &mut dyn Session) -> Result<(), ScannerError> {
        Self::reset_cursor(session)?;
        self.frequencies = Self::drain(session)?;
        Ok(())
    }

    fn write_to(&self, session: &mut dyn Session) -> Result<(), ScannerError> {
        // Unlock everything currently on the device, then lock our set
        Self::reset_cursor(session)?;
        let existing = Self::drain(session)?;
        Self::reset_cursor(session)?;
        for freq in &existing {
            session.execute(
                &Command::new("ULF").arg(freq.scanner_units()),
                false,
            )?;
        }
        for freq in &self.frequencies {
            session.execute(
                &Command::new("LOF").arg(freq.scanner_units()),
                false,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted session: hands back canned responses and records every
    /// command sent
    struct Script {
        responses: Vec<&'static str>,
        cursor: usize,
        pub sent: Vec<String>,
    }

    impl Script {
        fn new(responses: Vec<&'static str>) -> Self {
            Self {
                responses,
                cursor: 0,
                sent: Vec::new(),
            }
        }
    }

    impl Session for Script {
        fn execute(
            &mut self,
            command: &Command,
            _allow_error: bool,
        ) -> Result<Response, ScannerError> {
            self.sent.push(command.wire_format());
            if command.verb() == "GLF" {
                let line = self.responses[self.cursor];
                self.cursor += 1;
                Ok(Response::from_line(line))
            } else {
                Ok(Response::from_line("OK"))
            }
        }
    }

    #[test]
    fn test_read_walks_until_sentinel() {
        let mut session = Script::new(vec!["1464000", "4579375", "-1"]);
        let mut locked = LockedFrequencies::default();
        locked.read_from(&mut session).unwrap();

        assert_eq!(locked.frequencies.len(), 2);
        assert_eq!(locked.frequencies[0].as_mhz(), "146.4000");
        assert_eq!(locked.frequencies[1].as_mhz(), "457.9375");
        // Cursor rewind precedes the walk
        assert_eq!(&session.sent[..2], &["EPG", "PRG"]);
    }

    #[test]
    fn test_read_stops_on_verb_echo() {
        let mut session = Script::new(vec!["1464000", "GLF"]);
        let mut locked = LockedFrequencies::default();
        locked.read_from(&mut session).unwrap();
        assert_eq!(locked.frequencies.len(), 1);
    }

    #[test]
    fn test_read_stops_on_empty_response() {
        let mut session = Script::new(vec![""]);
        let mut locked = LockedFrequencies::default();
        locked.read_from(&mut session).unwrap();
        assert!(locked.frequencies.is_empty());
    }

    #[test]
    fn test_write_drains_then_replays() {
        // Device has one stale lockout; we want two fresh ones
        let mut session = Script::new(vec!["1080000", "-1"]);
        let locked = LockedFrequencies {
            frequencies: vec![
                Frequency::parse_mhz("146.4000").unwrap(),
                Frequency::parse_mhz("457.9375").unwrap(),
            ],
        };
        locked.write_to(&mut session).unwrap();

        assert_eq!(
            session.sent,
            vec![
                "EPG", "PRG", "GLF", "GLF", "EPG", "PRG", "ULF,1080000",
                "LOF,1464000", "LOF,4579375",
            ]
        );
    }

    #[test]
    fn test_validate_checks_each_frequency() {
        let locked = LockedFrequencies {
            frequencies: vec![
                Frequency::parse_mhz("146.4000").unwrap(),
                Frequency::parse_mhz("999.0000").unwrap(),
            ],
        };
        let message = locked.validate().unwrap_err().to_string();
        assert!(message.contains("999.0000"));
        assert!(!message.contains("146.4000"));
    }

    #[test]
    fn test_dict_form() {
        let locked = LockedFrequencies {
            frequencies: vec![Frequency::parse_mhz("146.4000").unwrap()],
        };
        let json = serde_json::to_value(&locked).unwrap();
        assert_eq!(json["frequencies"][0], "146.4000");
    }
}
