//! Consistency checks for proposed noon reports.
//!
//! Every proposed report goes through three independent checks against the
//! vessel's history:
//!
//! - `sequence`: may this report type follow the previous ones?
//! - `gate`: may the cargo status change at this point in the voyage?
//! - `contradiction`: does the status break a steady run of reports?
//!
//! `aggregate` folds them into one [`ValidationVerdict`]. Everything here
//! is pure: history comes in as a snapshot, a verdict goes out.

mod aggregate;
mod contradiction;
mod gate;
mod sequence;

pub use aggregate::aggregate;
pub use contradiction::{ContradictionCheck, DEFAULT_LOOKBACK, detect};
pub use gate::{GateCheck, allow_status_change};
pub use sequence::{SequenceCheck, allowed_next, join_alternatives, validate};

use crate::model::{ProposedReport, ReportRecord, ValidationVerdict};

/// Evaluates a proposed report against a vessel's history.
///
/// Records for other vessels are ignored. The rest are put in report order
/// (by date, insertion order breaking ties) before checking.
pub fn evaluate(
    vessel_id: &str,
    proposed: &ProposedReport,
    history: &[ReportRecord],
    lookback: usize,
) -> ValidationVerdict {
    let mut history: Vec<ReportRecord> = history
        .iter()
        .filter(|r| r.vessel_id == vessel_id)
        .cloned()
        .collect();
    history.sort_by_key(|r| r.occurred_on);

    let sequence = validate(&history, proposed.report_type);
    let gate = allow_status_change(&history, proposed.cargo_status);
    let contradiction = detect(
        &history,
        proposed.cargo_status,
        proposed.report_type,
        lookback,
    );

    tracing::debug!(
        vessel = vessel_id,
        report_type = %proposed.report_type,
        cargo_status = %proposed.cargo_status,
        history = history.len(),
        sequence_valid = sequence.is_valid(),
        gate_open = gate.is_open(),
        flagged = contradiction.is_flagged(),
        "evaluated noon report"
    );

    aggregate(sequence, gate, contradiction)
}
