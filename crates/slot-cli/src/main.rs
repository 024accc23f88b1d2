//! `slots` CLI: propose meeting slots from a calendar export.
//!
//! ## Usage
//!
//! ```sh
//! # Three diverse slots from a Google Calendar events export
//! slots propose -i events.json
//!
//! # Custom working hours, fixed reference time, five slots
//! slots propose -i events.json --config scheduler.toml \
//!     --now 2026-03-16T08:00:00Z --count 5
//!
//! # Every free slot, not just the selection
//! slots propose -i events.json --all
//!
//! # Attach confirmation links and print a draft reply
//! slots propose -i events.json --link-base https://example.com/confirm.html \
//!     --email-id msg-42 --sender ada@example.com --reply
//!
//! # Keyword check for a meeting request (body from stdin)
//! echo "Can we find time to chat?" | slots detect --subject "Hello"
//!
//! # Print the effective configuration
//! slots config --config scheduler.toml
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use slot_engine::confirm;
use slot_engine::reply::draft_reply;
use slot_engine::{
    busy_intervals_from_events, CalendarEvent, DiverseSelection, EarliestSelection,
    SchedulerConfig, SelectionStrategy,
};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slots", version, about = "Propose meeting slots from calendar events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find free slots and pick a few to offer
    Propose {
        /// Calendar events JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Scheduler TOML config (built-in defaults if omitted)
        #[arg(short, long)]
        config: Option<String>,
        /// Reference instant, RFC 3339 (defaults to the current time)
        #[arg(long, value_parser = parse_now)]
        now: Option<DateTime<Utc>>,
        /// Number of slots to offer (overrides `slots_to_offer`)
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// How to choose among free slots
        #[arg(long, value_enum, default_value_t = Strategy::Diverse)]
        strategy: Strategy,
        /// Print every free slot instead of a selection
        #[arg(long)]
        all: bool,
        /// Confirmation page URL; attaches a confirm link to each slot
        #[arg(long, requires_all = ["email_id", "sender"])]
        link_base: Option<String>,
        /// Email thread the proposal answers (requires --link-base)
        #[arg(long, requires = "link_base")]
        email_id: Option<String>,
        /// Address of the person being offered slots (requires --link-base)
        #[arg(long, requires = "link_base")]
        sender: Option<String>,
        /// Print a plain-text draft reply instead of JSON (requires --link-base)
        #[arg(long, requires = "link_base")]
        reply: bool,
    },
    /// Check whether a message looks like a meeting request
    Detect {
        /// Message subject
        #[arg(short, long, default_value = "")]
        subject: String,
        /// Message body file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the effective configuration as TOML
    Config {
        /// Scheduler TOML config (built-in defaults if omitted)
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Earliest, spread-out middles with distinct hours, latest
    Diverse,
    /// The earliest free slots
    Earliest,
}

/// Either a bare array of events or a Google Calendar `events.list` response.
#[derive(Deserialize)]
#[serde(untagged)]
enum EventsInput {
    List(Vec<CalendarEvent>),
    Envelope { items: Vec<CalendarEvent> },
}

impl EventsInput {
    fn into_events(self) -> Vec<CalendarEvent> {
        match self {
            EventsInput::List(events) => events,
            EventsInput::Envelope { items } => items,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Propose {
            input,
            output,
            config,
            now,
            count,
            strategy,
            all,
            link_base,
            email_id,
            sender,
            reply,
        } => {
            let config = load_config(config.as_deref())?;
            let tz = config
                .policy
                .validate()
                .context("Invalid working-hours policy")?;

            let raw = read_input(input.as_deref())?;
            let events = serde_json::from_str::<EventsInput>(&raw)
                .context("Failed to parse calendar events JSON")?
                .into_events();
            let busy = busy_intervals_from_events(&events, tz)
                .context("Failed to read calendar event times")?;

            let now = now.unwrap_or_else(Utc::now);
            debug!(events = events.len(), %now, "loaded calendar");

            let free = slot_engine::scan(&busy, &config.policy, now)
                .context("Failed to scan for free slots")?;
            let slots = if all {
                free
            } else {
                let count = count.unwrap_or(config.slots_to_offer);
                let chooser: &dyn SelectionStrategy = match strategy {
                    Strategy::Diverse => &DiverseSelection,
                    Strategy::Earliest => &EarliestSelection,
                };
                chooser.select(&free, count)
            };

            let rendered = match link_base {
                Some(base) => {
                    let linked = confirm::link_slots(
                        &slots,
                        &base,
                        email_id.as_deref().unwrap_or_default(),
                        sender.as_deref().unwrap_or_default(),
                        now,
                    )
                    .context("Failed to build confirmation links")?;
                    if reply {
                        format!("{}\n", draft_reply(&linked, tz).plain)
                    } else {
                        format!("{}\n", serde_json::to_string_pretty(&linked)?)
                    }
                }
                None => format!("{}\n", serde_json::to_string_pretty(&slots)?),
            };

            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Detect { subject, input } => {
            let body = read_input(input.as_deref())?;
            let answer = if slot_engine::detect::is_meeting_request(&subject, &body) {
                "yes"
            } else {
                "no"
            };
            println!("meeting request: {}", answer);
        }
        Commands::Config { config } => {
            let config = load_config(config.as_deref())?;
            let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
            print!("{}", rendered);
        }
    }

    Ok(())
}

fn parse_now(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}

fn load_config(path: Option<&str>) -> Result<SchedulerConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path))?;
            SchedulerConfig::from_toml_str(&text)
                .with_context(|| format!("Failed to parse config: {}", path))
        }
        None => Ok(SchedulerConfig::default()),
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

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
