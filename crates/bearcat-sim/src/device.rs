//! Virtual scanner
//!
//! A protocol-accurate in-memory BC125AT. It enforces program-mode gating,
//! keeps 500 channel slots and ten search ranges, and walks a GLF cursor
//! exactly like the hardware, so the full read/write paths can be exercised
//! without a device on the bench.

use std::collections::HashMap;

use tracing::trace;

use bearcat_protocol::{Command, Response, ScannerError, Session};

const MODEL: &str = "BC125AT";
const FIRMWARE: &str = "Version 1.06.00";

const CHANNEL_SLOTS: usize = 500;
const SEARCH_SLOTS: usize = 10;

/// Verbs accepted while in program mode, with their factory values
const SETTINGS: &[(&str, &str)] = &[
    ("BLT", "AF"),
    ("BSV", "9"),
    ("KBP", "0,0"),
    ("PRI", "0"),
    ("SCG", "0000000000"),
    ("SCO", "2,0"),
    ("CLC", "0,0,0,11111,0,0"),
    ("SSG", "0000000000"),
    ("CSG", "0000000000"),
    ("WXS", "0"),
    ("CNT", "8"),
    ("VOL", "10"),
    ("SQL", "5"),
];

const STOCK_SEARCH_RANGES: [(u32, u32); SEARCH_SLOTS] = [
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

fn default_channel(index: usize) -> String {
    format!("{index},,0,AUTO,0,2,0,0")
}

/// An in-memory device
#[derive(Debug)]
pub struct VirtualScanner {
    program_mode: bool,
    settings: HashMap<String, String>,
    channels: Vec<String>,
    search_banks: Vec<(u32, u32)>,
    locked: Vec<u32>,
    glf_cursor: usize,
}

impl Default for VirtualScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualScanner {
    /// A factory-fresh device
    pub fn new() -> Self {
        Self {
            program_mode: false,
            settings: SETTINGS
                .iter()
                .map(|&(verb, value)| (verb.to_string(), value.to_string()))
                .collect(),
            channels: (1..=CHANNEL_SLOTS).map(default_channel).collect(),
            search_banks: STOCK_SEARCH_RANGES.to_vec(),
            locked: Vec::new(),
            glf_cursor: 0,
        }
    }

    /// Whether the device is currently in program mode
    pub fn in_program_mode(&self) -> bool {
        self.program_mode
    }

    /// The current lockout list, in scanner units
    pub fn locked_frequencies(&self) -> &[u32] {
        &self.locked
    }

    fn wipe(&mut self) {
        let program_mode = self.program_mode;
        *self = Self::new();
        self.program_mode = program_mode;
    }

    fn channel_slot(args: &[String]) -> Option<usize> {
        let index: usize = args.first()?.parse().ok()?;
        (1..=CHANNEL_SLOTS).contains(&index).then(|| index - 1)
    }

    fn search_slot(args: &[String]) -> Option<usize> {
        let index: usize = args.first()?.parse().ok()?;
        (1..=SEARCH_SLOTS).contains(&index).then(|| index - 1)
    }

    /// Produce the raw response line for one command, device rules applied
    fn handle(&mut self, command: &Command) -> String {
        let verb = command.verb();
        let args = command.args();

        // Identification works in any mode
        match verb {
            "MDL" => return MODEL.to_string(),
            "VER" => return FIRMWARE.to_string(),
            "PRG" => {
                self.program_mode = true;
                self.glf_cursor = 0;
                return "OK".to_string();
            }
            "EPG" => {
                self.program_mode = false;
                self.glf_cursor = 0;
                return "OK".to_string();
            }
            _ => {}
        }

        if !self.program_mode {
            return "ERR".to_string();
        }

        match verb {
            "CLR" => {
                self.wipe();
                "OK".to_string()
            }
            "CIN" if args.len() == 1 => match Self::channel_slot(args) {
                Some(slot) => self.channels[slot].clone(),
                None => "ERR".to_string(),
            },
            "CIN" if args.len() == 8 => match Self::channel_slot(args) {
                Some(slot) => {
                    self.channels[slot] = args.join(",");
                    "OK".to_string()
                }
                None => "ERR".to_string(),
            },
            "DCH" if args.len() == 1 => match Self::channel_slot(args) {
                Some(slot) => {
                    self.channels[slot] = default_channel(slot + 1);
                    "OK".to_string()
                }
                None => "ERR".to_string(),
            },
            "CSP" if args.len() == 1 => match Self::search_slot(args) {
                Some(slot) => {
                    let (lo, hi) = self.search_banks[slot];
                    format!("{},{lo},{hi}", slot + 1)
                }
                None => "ERR".to_string(),
            },
            "CSP" if args.len() == 3 => {
                match (
                    Self::search_slot(args),
                    args[1].parse::<u32>(),
                    args[2].parse::<u32>(),
                ) {
                    (Some(slot), Ok(lo), Ok(hi)) => {
                        self.search_banks[slot] = (lo, hi);
                        "OK".to_string()
                    }
                    _ => "ERR".to_string(),
                }
            }
            "GLF" if args.is_empty() => match self.locked.get(self.glf_cursor) {
                Some(units) => {
                    self.glf_cursor += 1;
                    units.to_string()
                }
                None => "-1".to_string(),
            },
            "LOF" if args.len() == 1 => match args[0].parse::<u32>() {
                Ok(units) => {
                    if !self.locked.contains(&units) {
                        self.locked.push(units);
                    }
                    "OK".to_string()
                }
                Err(_) => "ERR".to_string(),
            },
            "ULF" if args.len() == 1 => match args[0].parse::<u32>() {
                Ok(units) => {
                    self.locked.retain(|&u| u != units);
                    "OK".to_string()
                }
                Err(_) => "ERR".to_string(),
            },
            _ => match self.settings.get_mut(verb) {
                Some(stored) => {
                    if args.is_empty() {
                        stored.clone()
                    } else {
                        *stored = args.join(",");
                        "OK".to_string()
                    }
                }
                None => "ERR".to_string(),
            },
        }
    }
}

impl Session for VirtualScanner {
    fn execute(&mut self, command: &Command, allow_error: bool) -> Result<Response, ScannerError> {
        let line = self.handle(command);
        trace!(sent = %command, recv = %line, "simulated exchange");

        let response = Response::from_line(&line);
        if response.is_error() && !allow_error {
            return Err(ScannerError::Command(format!(
                "device rejected '{command}': {line}"
            )));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exec(device: &mut VirtualScanner, wire: &str) -> Response {
        let mut parts = wire.split(',');
        let mut command = Command::new(parts.next().unwrap());
        for arg in parts {
            command = command.arg(arg);
        }
        device.execute(&command, true).unwrap()
    }

    #[test]
    fn test_identification_outside_program_mode() {
        let mut device = VirtualScanner::new();
        assert_eq!(exec(&mut device, "MDL").field(0).unwrap(), "BC125AT");
        assert_eq!(
            exec(&mut device, "VER").field(0).unwrap(),
            "Version 1.06.00"
        );
    }

    #[test]
    fn test_program_mode_gating() {
        let mut device = VirtualScanner::new();
        assert!(exec(&mut device, "VOL").is_error());

        exec(&mut device, "PRG");
        assert_eq!(exec(&mut device, "VOL").field(0).unwrap(), "10");

        exec(&mut device, "EPG");
        assert!(exec(&mut device, "VOL").is_error());
    }

    #[test]
    fn test_rejected_command_raises_without_allow_error() {
        let mut device = VirtualScanner::new();
        let err = device.execute(&Command::new("VOL"), false).unwrap_err();
        assert!(matches!(err, ScannerError::Command(_)));
    }

    #[test]
    fn test_channel_store_and_fetch() {
        let mut device = VirtualScanner::new();
        exec(&mut device, "PRG");
        exec(&mut device, "CIN,3,CALLING,1465200,NFM,0,2,0,0");

        let resp = exec(&mut device, "CIN,3");
        assert_eq!(resp.field(1).unwrap(), "CALLING");
        assert_eq!(resp.field(2).unwrap(), "1465200");
    }

    #[test]
    fn test_delete_channel_restores_default() {
        let mut device = VirtualScanner::new();
        exec(&mut device, "PRG");
        exec(&mut device, "CIN,3,CALLING,1465200,NFM,0,2,0,0");
        exec(&mut device, "DCH,3");
        assert_eq!(exec(&mut device, "CIN,3").field(1).unwrap(), "");
    }

    #[test]
    fn test_channel_index_bounds() {
        let mut device = VirtualScanner::new();
        exec(&mut device, "PRG");
        assert!(exec(&mut device, "CIN,0").is_error());
        assert!(exec(&mut device, "CIN,501").is_error());
    }

    #[test]
    fn test_glf_cursor_rewinds_on_program_mode() {
        let mut device = VirtualScanner::new();
        exec(&mut device, "PRG");
        exec(&mut device, "LOF,1464000");
        exec(&mut device, "LOF,4579375");

        exec(&mut device, "EPG");
        exec(&mut device, "PRG");
        assert_eq!(exec(&mut device, "GLF").field(0).unwrap(), "1464000");
        assert_eq!(exec(&mut device, "GLF").field(0).unwrap(), "4579375");
        assert_eq!(exec(&mut device, "GLF").field(0).unwrap(), "-1");

        // Exhausted until the cursor rewinds again
        assert_eq!(exec(&mut device, "GLF").field(0).unwrap(), "-1");
        exec(&mut device, "EPG");
        exec(&mut device, "PRG");
        assert_eq!(exec(&mut device, "GLF").field(0).unwrap(), "1464000");
    }

    #[test]
    fn test_unlock_removes_frequency() {
        let mut device = VirtualScanner::new();
        exec(&mut device, "PRG");
        exec(&mut device, "LOF,1464000");
        exec(&mut device, "ULF,1464000");
        assert_eq!(exec(&mut device, "GLF").field(0).unwrap(), "-1");
        assert!(device.locked_frequencies().is_empty());
    }

    #[test]
    fn test_clear_restores_factory_state() {
        let mut device = VirtualScanner::new();
        exec(&mut device, "PRG");
        exec(&mut device, "VOL,3");
        exec(&mut device, "CIN,1,CALLING,1465200,NFM,0,2,0,0");
        exec(&mut device, "CLR");

        assert_eq!(exec(&mut device, "VOL").field(0).unwrap(), "10");
        assert_eq!(exec(&mut device, "CIN,1").field(1).unwrap(), "");
        assert!(device.in_program_mode());
    }

    #[test]
    fn test_search_bank_store_and_fetch() {
        let mut device = VirtualScanner::new();
        exec(&mut device, "PRG");
        assert_eq!(
            exec(&mut device, "CSP,1").fields().join(","),
            "1,250000,279950"
        );
        exec(&mut device, "CSP,1,1440000,1479950");
        assert_eq!(
            exec(&mut device, "CSP,1").fields().join(","),
            "1,1440000,1479950"
        );
    }

    #[test]
    fn test_unknown_verb_errors() {
        let mut device = VirtualScanner::new();
        exec(&mut device, "PRG");
        assert!(exec(&mut device, "XYZ").is_error());
    }
}
