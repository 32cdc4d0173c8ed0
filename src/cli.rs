//! CLI interface for noon.
//!
//! Each subcommand is non-interactive: arguments in, structured output out.
//! JSON goes to stdout; short human-readable summaries go to stderr.
//!
//! - `noon check` evaluates a report without storing it.
//! - `noon submit` stores a report if it passes (or with `--accept`).
//! - `noon resolve` applies an operator decision to a flagged report.
//! - `noon history` and `noon vessels` read what's on file.

mod format;
mod report;
mod vessel;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use jiff::{Zoned, civil::Date};

use crate::config::Config;
use crate::model::{CargoStatus, ProposedReport, ReportType};
use crate::storage::Storage;

/// noon: keep vessel noon reports consistent.
#[derive(Debug, Parser)]
#[command(name = "noon", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Log more to stderr: `-v` info, `-vv` debug, `-vvv` trace.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// How many recent reports must agree before a differing cargo status
    /// is flagged. Overrides `lookback` in the config file.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    lookback: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: filing a noon report
  1. noon check --vessel "Navig8 Messi" --status laden --report-type at-sea
     → prints the verdict JSON; nothing is stored
  2. noon submit --vessel "Navig8 Messi" --status laden --report-type at-sea
     → stores the report, or exits non-zero with the verdict if it's flagged
  3. noon resolve --vessel "Navig8 Messi" --status ballast --report-type in-port \
       --decision '{"action": "correct", "corrected_status": "Laden"}'
     → applies the operator's decision to the flagged report

Decisions can also be read from a file: --decision @decision.json"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a proposed report against the vessel's history.
    ///
    /// Pure read: nothing is stored. Prints the verdict JSON.
    Check {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Evaluate a report and store it if it passes.
    ///
    /// A flagged report is not stored unless `--accept` is given;
    /// the verdict is printed and the command fails.
    Submit {
        #[command(flatten)]
        report: ReportArgs,

        /// Store the report even if it breaks a rule.
        #[arg(long)]
        accept: bool,
    },

    /// Apply an operator decision to a flagged report.
    ///
    /// The decision is JSON with `action` set to `proceed`, `correct`, or
    /// `clarify`. Anything unreadable becomes a clarifying question.
    Resolve {
        #[command(flatten)]
        report: ReportArgs,

        /// Decision JSON, or `@path` to read it from a file.
        #[arg(long)]
        decision: String,
    },

    /// Print a vessel's stored reports as JSON, oldest first.
    History {
        /// Vessel name or identifier.
        #[arg(long)]
        vessel: String,
    },

    /// List every vessel on file with its latest report.
    Vessels,
}

/// The report being filed.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Vessel name or identifier.
    #[arg(long)]
    vessel: String,

    /// Cargo status reported for the day.
    #[arg(long, value_enum)]
    status: StatusArg,

    /// Voyage phase reported for the day.
    #[arg(long, value_enum)]
    report_type: ReportTypeArg,

    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    date: Option<Date>,
}

impl ReportArgs {
    fn vessel_id(&self) -> Result<&str, String> {
        let vessel = self.vessel.trim();
        if vessel.is_empty() {
            return Err("--vessel must not be empty".to_string());
        }
        Ok(vessel)
    }

    fn to_domain(&self) -> ProposedReport {
        ProposedReport {
            cargo_status: self.status.to_domain(),
            report_type: self.report_type.to_domain(),
            occurred_on: self.date.unwrap_or_else(|| Zoned::now().date()),
        }
    }
}

/// CLI-facing cargo status, mapped to the domain `CargoStatus`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    /// Carrying cargo.
    Laden,
    /// Sailing empty.
    Ballast,
}

impl StatusArg {
    fn to_domain(self) -> CargoStatus {
        match self {
            Self::Laden => CargoStatus::Laden,
            Self::Ballast => CargoStatus::Ballast,
        }
    }
}

/// CLI-facing report type, mapped to the domain `ReportType`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportTypeArg {
    /// Under way between ports.
    AtSea,
    /// Arrived at the port area.
    Arrival,
    /// Made fast alongside a berth.
    ArrivalAtBerth,
    /// In port, not moving the voyage forward.
    InPort,
    /// Left the berth, still in port.
    DepartureFromBerth,
    /// Left port.
    Departure,
}

impl ReportTypeArg {
    fn to_domain(self) -> ReportType {
        match self {
            Self::AtSea => ReportType::AtSea,
            Self::Arrival => ReportType::Arrival,
            Self::ArrivalAtBerth => ReportType::ArrivalAtBerth,
            Self::InPort => ReportType::InPort,
            Self::DepartureFromBerth => ReportType::DepartureFromBerth,
            Self::Departure => ReportType::Departure,
        }
    }
}

fn parse_date(raw: &str) -> Result<Date, String> {
    raw.parse::<Date>()
        .map_err(|e| format!("expected a date like 2025-06-01: {e}"))
}

/// Run the CLI, returning an error message on failure.
pub fn run(cli: Cli, config: &Config, storage: &Storage) -> Result<(), String> {
    let lookback = match cli.lookback {
        Some(n) => usize::try_from(n).map_err(|_| format!("--lookback {n} is too large"))?,
        None => config.lookback,
    };

    match cli.command {
        Command::Check { report } => report::cmd_check(storage, &report, lookback),
        Command::Submit { report, accept } => {
            report::cmd_submit(storage, &report, lookback, accept)
        }
        Command::Resolve { report, decision } => {
            report::cmd_resolve(storage, &report, &decision, lookback)
        }
        Command::History { vessel } => vessel::cmd_history(storage, &vessel),
        Command::Vessels => vessel::cmd_vessels(storage),
    }
}

/// Pretty JSON for stdout.
fn to_json(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("failed to serialize output: {e}"))
}
