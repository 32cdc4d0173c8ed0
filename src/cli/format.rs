//! Output formatting for CLI display.

use crate::{
    check::join_alternatives,
    intake::Submission,
    model::{ReportType, ValidationVerdict, ViolatedRule},
    storage::{Upserted, VesselSummary},
};

/// One-line human summary of a verdict.
pub(super) fn format_verdict(verdict: &ValidationVerdict) -> String {
    if !verdict.is_violation {
        return "ok: no rules broken".to_string();
    }

    let mut line = format!(
        "{}: {}",
        rule_name(verdict.violated_rule),
        verdict.explanation
    );
    let others = verdict.findings.len().saturating_sub(1);
    if others > 0 {
        line.push_str(&format!(" (+{others} more)"));
    }
    line
}

/// One-line human summary of what happened to a submission.
pub(super) fn format_submission(submission: &Submission) -> String {
    match submission {
        Submission::Stored {
            record,
            upserted,
            verdict,
        } => {
            let verb = match upserted {
                Upserted::Inserted => "stored",
                Upserted::Updated => "updated",
            };
            let mut line = format!(
                "{verb} {} {} ({}) for {}",
                record.occurred_on, record.report_type, record.cargo_status, record.vessel_id
            );
            if verdict.is_violation {
                line.push_str(&format!(
                    ", acknowledged {}",
                    rule_name(verdict.violated_rule)
                ));
            }
            line
        }
        Submission::Rejected { verdict, .. } => format!("rejected: {}", format_verdict(verdict)),
        Submission::Clarify { message } => format!("clarify: {message}"),
    }
}

/// `<vessel>  <date>  <type> (<status>)  [n reports]  next: <types>`
pub(super) fn format_vessel(summary: &VesselSummary, next: &[ReportType]) -> String {
    let latest = &summary.latest;
    format!(
        "{}  {}  {} ({})  [{} report(s)]  next: {}",
        summary.vessel_id,
        latest.occurred_on,
        latest.report_type,
        latest.cargo_status,
        summary.reports,
        join_alternatives(next)
    )
}

fn rule_name(rule: ViolatedRule) -> &'static str {
    match rule {
        ViolatedRule::None => "none",
        ViolatedRule::Sequence => "sequence",
        ViolatedRule::StatusGate => "status gate",
        ViolatedRule::ConsistencyFlag => "consistency",
        ViolatedRule::Chronology => "chronology",
    }
}
