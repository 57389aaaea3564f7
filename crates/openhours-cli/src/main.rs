//! `openhours` CLI — evaluate opening-hours layouts from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Show this week's hours and whether it is open right now
//! openhours split "Mo-Fr 08:00-20:00; Sa 09:00-14:00"
//!
//! # Exit status 0 when open, 1 when closed
//! openhours --at 2022-11-09T17:30:00Z match "Mo-Su 11:00-17:00"
//!
//! # Evaluate in a named time zone, as JSON
//! openhours --tz Europe/Berlin --at 2026-03-29T12:00 --json split "Su 10:00-18:00"
//!
//! # Check a file of layouts, one per line
//! openhours check -i layouts.txt
//! ```

use std::fmt::Display;
use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use clap::{ArgAction, Parser, Subcommand};
use openhours::{Boundary, Splitter};
use serde::Serialize;

mod logger;

#[derive(Parser)]
#[command(
    name = "openhours",
    version,
    about = "Evaluate opening-hours layouts against a reference time"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Reference time: RFC 3339, or YYYY-MM-DDTHH:MM[:SS] local to --tz
    /// (UTC without --tz). Defaults to now.
    #[arg(long, global = true)]
    at: Option<String>,

    /// IANA time zone of the reference time (e.g. "Europe/Berlin")
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log to stderr: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the week's opening hours and whether the reference time is open
    Split {
        /// Opening-hours layout, e.g. "Mo-Fr 08:00-20:00; Sa 09:00-14:00"
        layout: String,
    },
    /// Print whether the reference time is open (exit status 1 when closed)
    Match {
        /// Opening-hours layout
        layout: String,
    },
    /// Check a file of layouts, one per line, for parse errors
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for JSON output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct BoundaryDto {
    at: String,
    weekday: String,
    closing: bool,
}

impl<Tz: TimeZone> From<&Boundary<Tz>> for BoundaryDto
where
    Tz::Offset: Display,
{
    fn from(b: &Boundary<Tz>) -> Self {
        Self {
            at: b.at.to_rfc3339(),
            weekday: b.weekday.to_string(),
            closing: b.closing,
        }
    }
}

#[derive(Serialize)]
struct SplitReport {
    reference: String,
    open: bool,
    match_index: Option<usize>,
    boundaries: Vec<BoundaryDto>,
}

#[derive(Serialize)]
struct MatchReport {
    reference: String,
    open: bool,
}

#[derive(Serialize, Default)]
struct CheckReport {
    checked: usize,
    invalid: Vec<String>,
    disagreements: Vec<String>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logger::Logger::init(cli.verbose)?;

    match cli.tz.as_deref() {
        Some(name) => {
            let tz: chrono_tz::Tz = name
                .parse()
                .map_err(|_| anyhow!("Unknown time zone: '{}'", name))?;
            let reference = zoned_reference(tz, cli.at.as_deref())?;
            run(&cli.command, cli.json, reference)
        }
        None => {
            let reference = fixed_reference(cli.at.as_deref())?;
            run(&cli.command, cli.json, reference)
        }
    }
}

fn run<Tz: TimeZone>(command: &Commands, json: bool, reference: DateTime<Tz>) -> Result<ExitCode>
where
    Tz::Offset: Display,
{
    let stamp = reference.to_rfc3339();
    log::info!("reference time {}", stamp);
    let mut splitter = Splitter::new(reference);

    match command {
        Commands::Split { layout } => {
            let split = splitter
                .split(layout)
                .context("Failed to split layout")?;
            if json {
                let report = SplitReport {
                    reference: stamp,
                    open: split.is_open(),
                    match_index: split.match_index(),
                    boundaries: split.boundaries().iter().map(BoundaryDto::from).collect(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                if !split.boundaries().is_empty() {
                    println!("{}", split);
                }
                println!("{}", verdict(split.is_open()));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Match { layout } => {
            let open = splitter
                .matches(layout)
                .context("Failed to match layout")?;
            if json {
                let report = MatchReport {
                    reference: stamp,
                    open,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", verdict(open));
            }
            Ok(if open {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Commands::Check { input } => {
            let text = read_input(input.as_deref())?;
            check(&mut splitter, &text, json)
        }
    }
}

/// Run `split` and `matches` over every non-blank line, collecting layouts
/// that fail to parse or on which the two disagree.
fn check<Tz: TimeZone>(splitter: &mut Splitter<Tz>, text: &str, json: bool) -> Result<ExitCode> {
    let mut report = CheckReport::default();

    for layout in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        report.checked += 1;
        let split = splitter.split(layout).map(|s| s.is_open());
        let matched = splitter.matches(layout);
        match (split, matched) {
            (Ok(a), Ok(b)) if a == b => log::debug!("ok: {:?} open={}", layout, a),
            (Ok(_), Ok(_)) => report.disagreements.push(layout.to_string()),
            (Err(e), _) | (_, Err(e)) => {
                log::info!("{}", e);
                report.invalid.push(layout.to_string());
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for layout in &report.invalid {
            println!("invalid: {}", layout);
        }
        for layout in &report.disagreements {
            println!("disagree: {}", layout);
        }
        println!(
            "checked {} layouts: {} invalid, {} disagreements",
            report.checked,
            report.invalid.len(),
            report.disagreements.len()
        );
    }

    let failed = report.invalid.len() + report.disagreements.len();
    if failed > 0 {
        anyhow::bail!("{} of {} layouts failed", failed, report.checked);
    }
    Ok(ExitCode::SUCCESS)
}

fn verdict(open: bool) -> &'static str {
    if open {
        "open"
    } else {
        "closed"
    }
}

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

fn parse_naive(at: &str) -> Result<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(at, format).ok())
        .with_context(|| {
            format!(
                "Invalid reference time: '{}'. Expected RFC 3339 or YYYY-MM-DDTHH:MM",
                at
            )
        })
}

/// Reference time in a named zone. RFC 3339 input is converted into the
/// zone; bare local times are read as wall-clock time in it.
fn zoned_reference(tz: chrono_tz::Tz, at: Option<&str>) -> Result<DateTime<chrono_tz::Tz>> {
    let Some(at) = at else {
        return Ok(Utc::now().with_timezone(&tz));
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(at) {
        return Ok(dt.with_timezone(&tz));
    }
    let naive = parse_naive(at)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("'{}' does not exist in {}", at, tz.name()))
}

/// Reference time without a named zone: the offset given in RFC 3339 input,
/// UTC for bare local times, the system offset for now.
fn fixed_reference(at: Option<&str>) -> Result<DateTime<FixedOffset>> {
    let Some(at) = at else {
        return Ok(Local::now().fixed_offset());
    };
    match DateTime::parse_from_rfc3339(at) {
        Ok(dt) => Ok(dt),
        Err(_) => Ok(parse_naive(at)?.and_utc().fixed_offset()),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
