//! Scanner data object contract
//!
//! Every piece of scanner state with a wire identity — a channel, the
//! volume, the backlight mode — is a scanner data object (SDO). Each one
//! knows its protocol verb, how to serialize itself into a write command
//! tuple in the exact positional order the device demands, and how to
//! repopulate itself from a parsed response. Records without writable
//! fields simply don't override [`ScannerDataObject::write_command`].

use crate::command::{Command, Response};
use crate::error::ScannerError;
use crate::session::Session;

/// Uniform contract implemented by every scanner data object
pub trait ScannerDataObject {
    /// Entity name used in error messages, e.g. `"channel"`
    fn entity_name(&self) -> &'static str;

    /// Protocol verb, e.g. `"CIN"`
    fn verb(&self) -> &'static str;

    /// The read request: the verb alone, or verb + index for indexed records
    fn fetch_command(&self) -> Command {
        Command::new(self.verb())
    }

    /// The write request with fields in protocol-fixed positional order
    fn write_command(&self) -> Result<Command, ScannerError> {
        Err(ScannerError::NotSupported {
            entity: self.entity_name(),
            operation: "write",
        })
    }

    /// Populate fields positionally from a parsed response
    fn apply_response(&mut self, response: &Response) -> Result<(), ScannerError> {
        let _ = response;
        Err(ScannerError::NotSupported {
            entity: self.entity_name(),
            operation: "read",
        })
    }

    /// Every invariant violation in this record, each as one message
    ///
    /// Default: no invariants.
    fn validation_problems(&self) -> Vec<String> {
        Vec::new()
    }

    /// Check invariants, batching all violations into a single error
    fn validate(&self) -> Result<(), ScannerError> {
        let problems = self.validation_problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ScannerError::validation(problems))
        }
    }

    /// Fetch this record from the device and populate it
    fn read_from(&mut self, session: &mut dyn Session) -> Result<(), ScannerError> {
        let response = session.execute(&self.fetch_command(), false)?;
        self.apply_response(&response)
    }

    /// Write this record to the device, discarding the response
    fn write_to(&self, session: &mut dyn Session) -> Result<(), ScannerError> {
        session.execute(&self.write_command()?, false)?;
        Ok(())
    }
}

/// PRG — enter program mode (command only)
#[derive(Debug, Clone, Copy, Default)]
pub struct EnterProgramMode;

impl ScannerDataObject for EnterProgramMode {
    fn entity_name(&self) -> &'static str {
        "enter program mode"
    }

    fn verb(&self) -> &'static str {
        "PRG"
    }

    fn write_command(&self) -> Result<Command, ScannerError> {
        Ok(Command::new(self.verb()))
    }
}

/// EPG — exit program mode (command only)
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitProgramMode;

impl ScannerDataObject for ExitProgramMode {
    fn entity_name(&self) -> &'static str {
        "exit program mode"
    }

    fn verb(&self) -> &'static str {
        "EPG"
    }

    fn write_command(&self) -> Result<Command, ScannerError> {
        Ok(Command::new(self.verb()))
    }
}

/// CLR — wipe all device memory (command only)
///
/// The device takes several seconds to complete this one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClearMemory;

impl ScannerDataObject for ClearMemory {
    fn entity_name(&self) -> &'static str {
        "clear memory"
    }

    fn verb(&self) -> &'static str {
        "CLR"
    }

    fn write_command(&self) -> Result<Command, ScannerError> {
        Ok(Command::new(self.verb()))
    }
}

/// DCH — delete one channel (command only)
#[derive(Debug, Clone, Copy)]
pub struct DeleteChannel {
    pub index: u16,
}

impl ScannerDataObject for DeleteChannel {
    fn entity_name(&self) -> &'static str {
        "delete channel"
    }

    fn verb(&self) -> &'static str {
        "DCH"
    }

    fn write_command(&self) -> Result<Command, ScannerError> {
        Ok(Command::new(self.verb()).arg(self.index))
    }
}

/// MDL — device model (read only)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceModel {
    pub model: String,
}

impl ScannerDataObject for DeviceModel {
    fn entity_name(&self) -> &'static str {
        "device model"
    }

    fn verb(&self) -> &'static str {
        "MDL"
    }

    fn apply_response(&mut self, response: &Response) -> Result<(), ScannerError> {
        self.model = response.field(0)?.to_string();
        Ok(())
    }
}

/// VER — firmware version (read only)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirmwareVersion {
    pub version: String,
}

impl ScannerDataObject for FirmwareVersion {
    fn entity_name(&self) -> &'static str {
        "firmware version"
    }

    fn verb(&self) -> &'static str {
        "VER"
    }

    fn apply_response(&mut self, response: &Response) -> Result<(), ScannerError> {
        self.version = response.field(0)?.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_only_records() {
        assert_eq!(
            EnterProgramMode.write_command().unwrap().wire_format(),
            "PRG"
        );
        assert_eq!(
            ExitProgramMode.write_command().unwrap().wire_format(),
            "EPG"
        );
        assert_eq!(ClearMemory.write_command().unwrap().wire_format(), "CLR");
        assert_eq!(
            DeleteChannel { index: 37 }
                .write_command()
                .unwrap()
                .wire_format(),
            "DCH,37"
        );
    }

    #[test]
    fn test_read_only_record_rejects_write() {
        let model = DeviceModel::default();
        assert!(matches!(
            model.write_command(),
            Err(ScannerError::NotSupported { .. })
        ));
    }

    #[test]
    fn test_command_only_record_rejects_read() {
        let mut prg = EnterProgramMode;
        let err = prg.apply_response(&Response::from_line("OK"));
        assert!(matches!(err, Err(ScannerError::NotSupported { .. })));
    }

    #[test]
    fn test_device_info_parses_first_field() {
        let mut model = DeviceModel::default();
        model.apply_response(&Response::from_line("BC125AT")).unwrap();
        assert_eq!(model.model, "BC125AT");

        let mut ver = FirmwareVersion::default();
        ver.apply_response(&Response::from_line("Version 1.06.00"))
            .unwrap();
        assert_eq!(ver.version, "Version 1.06.00");
    }
}
