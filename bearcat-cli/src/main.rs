//! Bearcat - BC125AT programming tool
//!
//! Reads and writes complete device images over the scanner's USB serial
//! protocol. Images are JSON documents; the channel table can additionally
//! be exported to and imported from CSV for spreadsheet editing.

mod csv;

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bearcat_protocol::{
    ClearMemory, DeviceModel, FirmwareVersion, Scanner, ScannerDataObject, Session,
};
use bearcat_session::{find_scanner_ports, first_scanner_port, SerialSession};
use bearcat_sim::VirtualScanner;

const USAGE: &str = "\
bearcat - BC125AT programming tool

USAGE:
    bearcat <COMMAND> [OPTIONS]

COMMANDS:
    ports                        List attached scanners
    test                         Print the scanner's model and firmware
    read <image.json>            Read the full device state into a JSON image
    write <image.json>           Write a JSON image to the device
    wipe                         Clear all device memory
    export <image.json> <out.csv>
                                 Export an image's channel table to CSV
    import <image.json> <in.csv>
                                 Replace an image's channel table from CSV

OPTIONS:
    --port <PORT>                Serial port to use (default: autodetect)
    --simulate                   Use an in-memory device instead of hardware
";

struct Options {
    command: String,
    args: Vec<String>,
    port: Option<String>,
    simulate: bool,
}

fn parse_args(argv: Vec<String>) -> Result<Options> {
    let mut command = None;
    let mut args = Vec::new();
    let mut port = None;
    let mut simulate = false;

    let mut iter = argv.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--port" => {
                port = Some(iter.next().context("--port requires a value")?);
            }
            "--simulate" => simulate = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ if command.is_none() => command = Some(arg),
            _ => args.push(arg),
        }
    }

    Ok(Options {
        command: command.context("no command given\n\n".to_string() + USAGE)?,
        args,
        port,
        simulate,
    })
}

fn open_session(opts: &Options) -> Result<Box<dyn Session>> {
    if opts.simulate {
        info!("using simulated device");
        return Ok(Box::new(VirtualScanner::new()));
    }
    let port = match &opts.port {
        Some(port) => port.clone(),
        None => first_scanner_port()?,
    };
    Ok(Box::new(SerialSession::open(&port)?))
}

fn load_image(path: &str) -> Result<Scanner> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let image: Scanner =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    image.validate()?;
    Ok(image)
}

fn save_image(path: &str, image: &Scanner) -> Result<()> {
    let json = serde_json::to_string_pretty(image)?;
    fs::write(path, json).with_context(|| format!("writing {path}"))?;
    Ok(())
}

fn cmd_ports() -> Result<()> {
    let ports = find_scanner_ports()?;
    if ports.is_empty() {
        println!("no scanner found");
    }
    for port in ports {
        match port.serial_number {
            Some(serial) => println!("{} (serial {serial})", port.port),
            None => println!("{}", port.port),
        }
    }
    Ok(())
}

fn cmd_test(opts: &Options) -> Result<()> {
    let mut session = open_session(opts)?;
    let mut model = DeviceModel::default();
    model.read_from(session.as_mut())?;
    let mut firmware = FirmwareVersion::default();
    firmware.read_from(session.as_mut())?;
    println!("model: {}", model.model);
    println!("firmware: {}", firmware.version);
    Ok(())
}

fn cmd_read(opts: &Options, path: &str) -> Result<()> {
    let mut session = open_session(opts)?;
    let mut image = Scanner::default();
    image.read_from(session.as_mut())?;
    save_image(path, &image)?;
    println!("wrote {path}");
    Ok(())
}

fn cmd_write(opts: &Options, path: &str) -> Result<()> {
    let image = load_image(path)?;
    let mut session = open_session(opts)?;
    image.write_to(session.as_mut())?;
    println!("programmed device from {path}");
    Ok(())
}

fn cmd_wipe(opts: &Options) -> Result<()> {
    let mut session = open_session(opts)?;
    bearcat_protocol::EnterProgramMode.write_to(session.as_mut())?;
    ClearMemory.write_to(session.as_mut())?;
    bearcat_protocol::ExitProgramMode.write_to(session.as_mut())?;
    println!("device memory cleared");
    Ok(())
}

fn cmd_export(image_path: &str, csv_path: &str) -> Result<()> {
    let image = load_image(image_path)?;
    fs::write(csv_path, csv::export_channels(&image.channels))
        .with_context(|| format!("writing {csv_path}"))?;
    println!("wrote {csv_path}");
    Ok(())
}

fn cmd_import(image_path: &str, csv_path: &str) -> Result<()> {
    let mut image = if Path::new(image_path).exists() {
        load_image(image_path)?
    } else {
        Scanner::default()
    };

    let text = fs::read_to_string(csv_path).with_context(|| format!("reading {csv_path}"))?;
    let channels = csv::import_channels(&text)?;

    // Imported rows replace their slots; untouched slots keep their values
    for channel in channels {
        let index = channel.index;
        match image.channels.iter_mut().find(|c| c.index == index) {
            Some(slot) => *slot = channel,
            None => bail!("channel index {index} is out of range"),
        }
    }

    image.validate()?;
    save_image(image_path, &image)?;
    println!("updated {image_path}");
    Ok(())
}

fn run(opts: Options) -> Result<()> {
    match (opts.command.as_str(), opts.args.as_slice()) {
        ("ports", []) => cmd_ports(),
        ("test", []) => cmd_test(&opts),
        ("read", [path]) => cmd_read(&opts, path),
        ("write", [path]) => cmd_write(&opts, path),
        ("wipe", []) => cmd_wipe(&opts),
        ("export", [image, csv]) => cmd_export(image, csv),
        ("import", [image, csv]) => cmd_import(image, csv),
        (command, _) => bail!("bad usage of '{command}'\n\n{USAGE}"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bearcat=info,bearcat_protocol=info,bearcat_session=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let opts = parse_args(std::env::args().skip(1).collect())?;
    run(opts)
}
