//! Report commands: check, submit, resolve.

use std::fs;

use crate::{
    intake::{self, Submission},
    model::Resolution,
    storage::Storage,
};

use super::{
    ReportArgs,
    format::{format_submission, format_verdict},
    to_json,
};

pub(super) fn cmd_check(
    storage: &Storage,
    args: &ReportArgs,
    lookback: usize,
) -> Result<(), String> {
    let vessel_id = args.vessel_id()?;
    let proposed = args.to_domain();

    let verdict = intake::check(storage, vessel_id, &proposed, lookback)
        .map_err(|e| format!("failed to check report: {e}"))?;

    println!("{}", to_json(&verdict)?);
    eprintln!("{}", format_verdict(&verdict));
    Ok(())
}

pub(super) fn cmd_submit(
    storage: &Storage,
    args: &ReportArgs,
    lookback: usize,
    accept: bool,
) -> Result<(), String> {
    let vessel_id = args.vessel_id()?;
    let proposed = args.to_domain();

    let submission = intake::submit(storage, vessel_id, &proposed, lookback, accept)
        .map_err(|e| format!("failed to submit report: {e}"))?;

    report_submission(&submission)
}

pub(super) fn cmd_resolve(
    storage: &Storage,
    args: &ReportArgs,
    decision: &str,
    lookback: usize,
) -> Result<(), String> {
    let vessel_id = args.vessel_id()?;
    let proposed = args.to_domain();

    let text = read_decision(decision)?;
    let resolution = Resolution::parse(&text);

    let submission = intake::resolve(storage, vessel_id, &proposed, &resolution, lookback)
        .map_err(|e| format!("failed to resolve report: {e}"))?;

    report_submission(&submission)
}

/// Prints the outcome; a rejected report fails the command.
fn report_submission(submission: &Submission) -> Result<(), String> {
    println!("{}", to_json(submission)?);
    eprintln!("{}", format_submission(submission));

    match submission {
        Submission::Rejected { verdict, .. } => {
            Err(format!("report rejected: {}", verdict.explanation))
        }
        Submission::Stored { .. } | Submission::Clarify { .. } => Ok(()),
    }
}

/// Decision text as given, or the contents of a file for `@path`.
fn read_decision(raw: &str) -> Result<String, String> {
    match raw.strip_prefix('@') {
        Some(path) => fs::read_to_string(path).map_err(|e| format!("failed to read {path}: {e}")),
        None => Ok(raw.to_string()),
    }
}
