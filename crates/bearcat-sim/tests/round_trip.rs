//! Full-device round trips against the virtual scanner

use bearcat_protocol::{
    BacklightMode, Channel, Frequency, Modulation, PriorityScanMode, Scanner, ToneCode,
};
use bearcat_sim::{CommandLog, VirtualScanner};

fn programmed_image() -> Scanner {
    let mut image = Scanner::default();
    image.backlight.mode = BacklightMode::Squelch;
    image.battery_charge_timer.hours = 14;
    image.priority_mode.mode = PriorityScanMode::PlusOn;
    image.volume.level = 7;
    image.squelch.level = 3;

    image.channels[0] = Channel {
        index: 1,
        name: "CALLING".to_string(),
        frequency: Frequency::parse_mhz("146.5200").unwrap(),
        modulation: Modulation::Fm,
        ..Channel::with_index(1)
    };
    image.channels[41] = Channel {
        index: 42,
        name: "AAR EOTD".to_string(),
        frequency: Frequency::parse_mhz("457.9375").unwrap(),
        modulation: Modulation::Nfm,
        ctcss: ToneCode(240),
        ..Channel::with_index(42)
    };

    image.locked_frequencies.frequencies = vec![
        Frequency::parse_mhz("146.4000").unwrap(),
        Frequency::parse_mhz("457.5625").unwrap(),
    ];

    image.search_banks[2].lower_limit = Frequency::parse_mhz("144.0000").unwrap();
    image.search_banks[2].upper_limit = Frequency::parse_mhz("147.9950").unwrap();

    image
}

#[test]
fn test_factory_image_reads_clean() {
    let mut device = VirtualScanner::new();
    let mut image = Scanner::default();
    image.read_from(&mut device).unwrap();

    assert!(image.validate().is_ok());
    assert_eq!(image.volume.level, 10);
    assert_eq!(image.contrast.level, 8);
    assert_eq!(image.channels.len(), 500);
    assert!(image.locked_frequencies.frequencies.is_empty());
    assert!(!device.in_program_mode());
}

#[test]
fn test_write_then_read_round_trips() {
    let written = programmed_image();
    written.validate().unwrap();

    let mut device = VirtualScanner::new();
    written.write_to(&mut device).unwrap();

    let mut read_back = Scanner::default();
    read_back.read_from(&mut device).unwrap();

    assert_eq!(read_back, written);
}

#[test]
fn test_write_replaces_previous_lockouts() {
    let mut device = VirtualScanner::new();
    programmed_image().write_to(&mut device).unwrap();

    // A second image with a different lockout list fully replaces the first
    let mut second = Scanner::default();
    second.locked_frequencies.frequencies = vec![Frequency::parse_mhz("155.1600").unwrap()];
    second.write_to(&mut device).unwrap();

    assert_eq!(device.locked_frequencies(), &[1_551_600]);
}

#[test]
fn test_json_survives_device_round_trip() {
    let mut device = VirtualScanner::new();
    programmed_image().write_to(&mut device).unwrap();

    let mut image = Scanner::default();
    image.read_from(&mut device).unwrap();

    let json = serde_json::to_string_pretty(&image).unwrap();
    let back: Scanner = serde_json::from_str(&json).unwrap();
    assert_eq!(back, image);
}

#[test]
fn test_transcript_of_full_write() {
    let mut session = CommandLog::new(VirtualScanner::new());
    Scanner::default().write_to(&mut session).unwrap();

    let commands = session.commands();
    assert_eq!(commands.first().copied(), Some("PRG"));
    assert_eq!(commands.last().copied(), Some("EPG"));
    assert_eq!(
        commands.iter().filter(|c| c.starts_with("CIN,")).count(),
        500
    );
    assert_eq!(
        commands.iter().filter(|c| c.starts_with("CSP,")).count(),
        10
    );
}
