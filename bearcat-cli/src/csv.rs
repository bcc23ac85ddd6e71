//! Channel list CSV import/export
//!
//! The CSV form is meant for editing the channel table in a spreadsheet:
//! one row per channel, symbolic values throughout (MHz strings, tone
//! names, `locked`/`unlocked`). Fields containing commas or quotes are
//! quoted with doubled inner quotes.

use anyhow::{bail, Context, Result};

use bearcat_protocol::{tones, Channel, Frequency, LockoutState, Modulation, PriorityFlag};

pub const HEADER: &str = "Index,Name,Frequency (MHz),Modulation,CTCSS,Delay,Lockout,Priority";

fn quote(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split one CSV line, honoring quoted fields
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            other => current.push(other),
        }
    }
    fields.push(current);
    fields
}

fn channel_row(channel: &Channel) -> String {
    let tone = channel
        .ctcss
        .human()
        .map(str::to_string)
        .unwrap_or_else(|_| channel.ctcss.0.to_string());
    [
        channel.index.to_string(),
        quote(&channel.name),
        channel.frequency.as_mhz(),
        channel.modulation.as_wire().to_string(),
        quote(&tone),
        channel.delay.to_string(),
        match channel.lockout {
            LockoutState::Unlocked => "unlocked".to_string(),
            LockoutState::Locked => "locked".to_string(),
        },
        match channel.priority {
            PriorityFlag::Off => "off".to_string(),
            PriorityFlag::On => "on".to_string(),
        },
    ]
    .join(",")
}

/// Render the whole channel table
pub fn export_channels(channels: &[Channel]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for channel in channels {
        out.push_str(&channel_row(channel));
        out.push('\n');
    }
    out
}

fn parse_row(line_number: usize, fields: &[String]) -> Result<Channel> {
    if fields.len() != 8 {
        bail!("line {line_number}: expected 8 fields, got {}", fields.len());
    }

    let index: u16 = fields[0]
        .trim()
        .parse()
        .with_context(|| format!("line {line_number}: bad index '{}'", fields[0]))?;
    let mut channel = Channel::with_index(index);

    channel.name = fields[1].clone();
    channel.frequency = Frequency::parse_mhz(fields[2].trim())
        .with_context(|| format!("line {line_number}: bad frequency '{}'", fields[2]))?;
    channel.modulation = Modulation::from_wire(fields[3].trim())
        .with_context(|| format!("line {line_number}: bad modulation '{}'", fields[3]))?;
    channel.ctcss = tones::to_internal(fields[4].trim())
        .map(bearcat_protocol::ToneCode)
        .with_context(|| format!("line {line_number}: bad tone '{}'", fields[4]))?;
    channel.delay = fields[5]
        .trim()
        .parse()
        .with_context(|| format!("line {line_number}: bad delay '{}'", fields[5]))?;
    channel.lockout = match fields[6].trim() {
        "unlocked" => LockoutState::Unlocked,
        "locked" => LockoutState::Locked,
        other => bail!("line {line_number}: bad lockout '{other}'"),
    };
    channel.priority = match fields[7].trim() {
        "off" => PriorityFlag::Off,
        "on" => PriorityFlag::On,
        other => bail!("line {line_number}: bad priority '{other}'"),
    };

    Ok(channel)
}

/// Parse a channel table, header line required
pub fn import_channels(text: &str) -> Result<Vec<Channel>> {
    let mut lines = text.lines().enumerate();

    match lines.next() {
        Some((_, header)) if header.trim_end() == HEADER => {}
        Some((_, header)) => bail!("unexpected header: '{header}'"),
        None => bail!("empty channel file"),
    }

    let mut channels = Vec::new();
    for (number, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_line(line);
        channels.push(parse_row(number + 1, &fields)?);
    }
    Ok(channels)
}
