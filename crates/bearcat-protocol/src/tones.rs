//! CTCSS/DCS tone code tables
//!
//! The scanner stores squelch tones as small integer codes in three
//! contiguous, non-overlapping ranges: three reserved singular values
//! (0, 127, 240), analog CTCSS tones at 64–113, and digital DCS codes at
//! 128–231. Validity is therefore a pure membership test, independent of
//! the name table.

use std::fmt;

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// Documented names of the reserved values
pub const NONE_ALL: &str = "NONE/All";
pub const SEARCH: &str = "SEARCH";
pub const NO_TONE: &str = "NO_TONE";

/// Reserved singular values
pub const SPECIAL: &[(u16, &str)] = &[(0, NONE_ALL), (127, SEARCH), (240, NO_TONE)];

/// Analog CTCSS tones, 67.0 Hz through 254.1 Hz
pub const CTCSS: &[(u16, &str)] = &[
    (64, "67.0"),
    (65, "69.3"),
    (66, "71.9"),
    (67, "74.4"),
    (68, "77.0"),
    (69, "79.7"),
    (70, "82.5"),
    (71, "85.4"),
    (72, "88.5"),
    (73, "91.5"),
    (74, "94.8"),
    (75, "97.4"),
    (76, "100.0"),
    (77, "103.5"),
    (78, "107.2"),
    (79, "110.9"),
    (80, "114.8"),
    (81, "118.8"),
    (82, "123.0"),
    (83, "127.3"),
    (84, "131.8"),
    (85, "136.5"),
    (86, "141.3"),
    (87, "146.2"),
    (88, "151.4"),
    (89, "156.7"),
    (90, "159.8"),
    (91, "162.2"),
    (92, "165.5"),
    (93, "167.9"),
    (94, "171.3"),
    (95, "173.8"),
    (96, "177.3"),
    (97, "179.9"),
    (98, "183.5"),
    (99, "186.2"),
    (100, "189.9"),
    (101, "192.8"),
    (102, "196.6"),
    (103, "199.5"),
    (104, "203.5"),
    (105, "206.5"),
    (106, "210.7"),
    (107, "218.1"),
    (108, "225.7"),
    (109, "229.1"),
    (110, "233.6"),
    (111, "241.8"),
    (112, "250.3"),
    (113, "254.1"),
];

/// Digital DCS codes, 023 through 754
pub const DCS: &[(u16, &str)] = &[
    (128, "23"),
    (129, "25"),
    (130, "26"),
    (131, "31"),
    (132, "32"),
    (133, "36"),
    (134, "43"),
    (135, "47"),
    (136, "51"),
    (137, "53"),
    (138, "54"),
    (139, "65"),
    (140, "71"),
    (141, "72"),
    (142, "73"),
    (143, "74"),
    (144, "114"),
    (145, "115"),
    (146, "116"),
    (147, "122"),
    (148, "125"),
    (149, "131"),
    (150, "132"),
    (151, "134"),
    (152, "143"),
    (153, "145"),
    (154, "152"),
    (155, "155"),
    (156, "156"),
    (157, "162"),
    (158, "165"),
    (159, "172"),
    (160, "174"),
    (161, "205"),
    (162, "212"),
    (163, "223"),
    (164, "225"),
    (165, "226"),
    (166, "243"),
    (167, "244"),
    (168, "245"),
    (169, "246"),
    (170, "251"),
    (171, "252"),
    (172, "255"),
    (173, "261"),
    (174, "263"),
    (175, "265"),
    (176, "266"),
    (177, "271"),
    (178, "274"),
    (179, "306"),
    (180, "311"),
    (181, "315"),
    (182, "325"),
    (183, "331"),
    (184, "332"),
    (185, "343"),
    (186, "346"),
    (187, "351"),
    (188, "356"),
    (189, "364"),
    (190, "365"),
    (191, "371"),
    (192, "411"),
    (193, "412"),
    (194, "413"),
    (195, "423"),
    (196, "431"),
    (197, "432"),
    (198, "445"),
    (199, "446"),
    (200, "452"),
    (201, "454"),
    (202, "455"),
    (203, "462"),
    (204, "464"),
    (205, "465"),
    (206, "466"),
    (207, "503"),
    (208, "506"),
    (209, "516"),
    (210, "523"),
    (211, "526"),
    (212, "532"),
    (213, "546"),
    (214, "565"),
    (215, "606"),
    (216, "612"),
    (217, "624"),
    (218, "627"),
    (219, "631"),
    (220, "632"),
    (221, "654"),
    (222, "662"),
    (223, "664"),
    (224, "703"),
    (225, "712"),
    (226, "723"),
    (227, "731"),
    (228, "732"),
    (229, "734"),
    (230, "743"),
    (231, "754"),
];

fn tables() -> impl Iterator<Item = (u16, &'static str)> {
    SPECIAL
        .iter()
        .chain(CTCSS.iter())
        .chain(DCS.iter())
        .copied()
}

/// Look up the documented human-readable value of an internal code
pub fn to_human(code: u16) -> Result<&'static str, ParseError> {
    tables()
        .find(|&(c, _)| c == code)
        .map(|(_, name)| name)
        .ok_or(ParseError::InvalidToneCode(code))
}

/// Strip everything but alphanumerics and lowercase the rest
fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Map a human-provided tone value to its internal code
///
/// Matching is case- and punctuation-insensitive, so `none/all`, `NONE_ALL`
/// and `NoneAll` are all accepted. A handful of convenience aliases map to
/// the reserved values.
pub fn to_internal(provided: &str) -> Result<u16, ParseError> {
    let needle = match normalize(provided).as_str() {
        "none" | "all" => normalize(NONE_ALL),
        "notone" => normalize(NO_TONE),
        other => other.to_string(),
    };

    tables()
        .find(|&(_, name)| normalize(name) == needle)
        .map(|(code, _)| code)
        .ok_or_else(|| ParseError::InvalidToneName {
            provided: provided.to_string(),
            accepted: accepted_values(),
        })
}

/// The full list of accepted values, for error messages
fn accepted_values() -> String {
    let join = |table: &[(u16, &str)]| {
        table
            .iter()
            .map(|&(_, name)| name)
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "Special: [{}] CTCSS: [{}] DCS: [{}]",
        join(SPECIAL),
        join(CTCSS),
        join(DCS)
    )
}

/// A CTCSS/DCS code as stored by the scanner
///
/// The wrapped code is not forced to be valid at construction; responses
/// are imported positionally and checked later by `validate()`, matching
/// the device's own behavior of storing what it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToneCode(pub u16);

impl ToneCode {
    /// True when the code is in one of the three defined ranges
    pub fn is_valid(&self) -> bool {
        to_human(self.0).is_ok()
    }

    /// Documented human-readable value
    pub fn human(&self) -> Result<&'static str, ParseError> {
        to_human(self.0)
    }

    /// Parse a wire field (the raw integer code)
    pub fn from_wire(field: &str) -> Result<Self, ParseError> {
        field
            .parse::<u16>()
            .map(ToneCode)
            .map_err(|_| ParseError::InvalidField {
                field: "ctcss/dcs",
                value: field.to_string(),
            })
    }
}

impl fmt::Display for ToneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match to_human(self.0) {
            Ok(name) => f.write_str(name),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

// Persisted form is the symbolic name, never the raw code.
impl Serialize for ToneCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let name = to_human(self.0).map_err(S::Error::custom)?;
        serializer.serialize_str(name)
    }
}

impl<'de> Deserialize<'de> for ToneCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        to_internal(&value).map(ToneCode).map_err(D::Error::custom)
    }
}
