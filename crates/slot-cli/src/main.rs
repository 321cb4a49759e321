//! `slots` CLI — suggest meeting times, check conflicts and list open slots.
//!
//! ## Usage
//!
//! ```sh
//! # Six random candidates over three days starting 2026-03-16, one recommended
//! slots suggest --date 2026-03-16 --duration 60
//!
//! # Reproducible sample, printed as display labels
//! slots --tz America/New_York suggest --date 2026-03-16 --seed 42 --labels
//!
//! # Check a proposed meeting against a calendar listing (stdin or -i)
//! slots conflicts --start 2026-03-16T09:30:00Z --end 2026-03-16T10:30:00Z -i events.json
//!
//! # Open 30-minute slots between 9:00 and 17:00
//! slots available --date 2026-03-16 --duration 30 -i events.json
//!
//! # Override bands, working hours or tolerances from a JSON config file
//! slots --config engine.json available --date 2026-03-16 --duration 45
//! ```
//!
//! Results are JSON on stdout. Diagnostics go to stderr and are controlled by
//! `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use slot_engine::time::{parse_datetime, parse_reference, parse_timezone};
use slot_engine::{
    find_available_slots, find_conflicts, parse_event_listing, AvailabilityQuery, EngineConfig,
    SchedulingRequest, SuggestionGenerator, TimeInterval, WorkingHours,
};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Meeting slot suggestions, conflict checks and availability scans"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON engine config file (bands, working hours, tolerances, timezone)
    #[arg(long, global = true)]
    config: Option<String>,

    /// IANA timezone for wall-clock hours and labels (overrides the config)
    #[arg(long, global = true)]
    tz: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample candidate meeting times and recommend one
    Suggest {
        /// Reference date (YYYY-MM-DD or ISO 8601 datetime)
        #[arg(long)]
        date: String,
        /// Meeting length in minutes
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
        duration: u32,
        /// Number of consecutive days to draw from (defaults to the config)
        #[arg(long)]
        days: Option<u32>,
        /// Seed for a reproducible sample
        #[arg(long)]
        seed: Option<u64>,
        /// Treat this instant as "now" (RFC 3339); defaults to the system clock
        #[arg(long)]
        now: Option<String>,
        /// Print one display label per line instead of JSON
        #[arg(long)]
        labels: bool,
    },
    /// List calendar entries overlapping a proposed meeting (`null` if none)
    Conflicts {
        /// Proposed start (ISO 8601)
        #[arg(long)]
        start: String,
        /// Proposed end (ISO 8601)
        #[arg(long)]
        end: String,
        /// Calendar event listing JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// List open slots within a day's working hours
    Available {
        /// Day to scan (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Meeting length in minutes
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        duration: u32,
        /// Minutes between candidate starts (defaults to the config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        step: Option<u32>,
        /// First working hour (defaults to the config)
        #[arg(long)]
        from: Option<u32>,
        /// Hour working ends (defaults to the config)
        #[arg(long)]
        until: Option<u32>,
        /// Calendar event listing JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let tz = resolve_timezone(cli.tz.as_deref(), &config)?;

    match cli.command {
        Commands::Suggest {
            date,
            duration,
            days,
            seed,
            now,
            labels,
        } => {
            let now = match now {
                Some(raw) => parse_datetime(&raw).context("Invalid --now")?,
                None => Utc::now(),
            };
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let day_window = days.unwrap_or(config.day_window);

            let slots = match parse_reference(&date, tz) {
                Ok(reference) => {
                    let request = SchedulingRequest::new(reference, duration)
                        .with_day_window(day_window)
                        .with_working_hours(config.working_hours);
                    SuggestionGenerator::new(config, tz).generate(&request, now, &mut rng)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "no suggestions for unreadable reference date");
                    Vec::new()
                }
            };

            if labels {
                for slot in &slots {
                    println!("{}", slot.label);
                }
            } else {
                print_json(&slots)?;
            }
        }
        Commands::Conflicts { start, end, input } => {
            let proposed = TimeInterval::new(
                parse_datetime(&start).context("Invalid --start")?,
                parse_datetime(&end).context("Invalid --end")?,
            )
            .context("Invalid proposed meeting")?;
            let busy = read_listing(input.as_deref())?;

            print_json(&find_conflicts(&busy, &proposed))?;
        }
        Commands::Available {
            date,
            duration,
            step,
            from,
            until,
            input,
        } => {
            let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("Invalid --date '{}', expected YYYY-MM-DD", date))?;
            let hours = WorkingHours::new(
                from.unwrap_or(config.working_hours.start_hour),
                until.unwrap_or(config.working_hours.end_hour),
            );
            if !hours.is_valid() {
                anyhow::bail!(
                    "Invalid working hours {}..{}: need from < until <= 24",
                    hours.start_hour,
                    hours.end_hour
                );
            }
            let query = AvailabilityQuery::new(day, duration)
                .with_working_hours(hours)
                .with_step_minutes(step.unwrap_or(config.step_minutes))
                .with_tolerance_ms(config.coincidence_tolerance_ms);
            let busy = read_listing(input.as_deref())?;

            print_json(&find_available_slots(&busy, &query, tz))?;
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path))?;
    let config = EngineConfig::from_json_str(&raw)
        .with_context(|| format!("Invalid config file: {}", path))?;
    tracing::debug!(path, ?config, "loaded engine config");
    Ok(config)
}

fn resolve_timezone(flag: Option<&str>, config: &EngineConfig) -> Result<Tz> {
    match flag {
        Some(name) => parse_timezone(name).context("Invalid --tz"),
        None => config.tz().context("Invalid timezone in config"),
    }
}

fn read_listing(path: Option<&str>) -> Result<Vec<slot_engine::BusyInterval>> {
    let json = read_input(path)?;
    parse_event_listing(&json).context("Failed to parse calendar event listing")
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

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value)?;
    println!("{}", pretty);
    Ok(())
}
