//! Contradiction detection: a status that breaks a steady run of reports.
//!
//! Independent of the sequence and gate rules. It catches quiet drift: a
//! vessel that has reported the same status for a while and suddenly
//! doesn't, outside the departures where a change is expected.

use crate::model::{CargoStatus, ReportRecord, ReportType};

/// How many recent reports must agree before a differing status is flagged.
pub const DEFAULT_LOOKBACK: usize = 5;

/// Outcome of comparing a proposed status with recent history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContradictionCheck {
    Clear,

    /// Recent reports all said `previous_status`; the new one doesn't.
    Flagged {
        previous_status: CargoStatus,
        reason: String,
    },
}

impl ContradictionCheck {
    pub fn is_flagged(&self) -> bool {
        matches!(self, Self::Flagged { .. })
    }
}

/// Flags `proposed_status` when the `lookback` most recent reports all agree
/// on a different status.
///
/// Fewer than `lookback` reports, or a mixed window, is not enough evidence
/// and never flags. Departures never flag.
pub fn detect(
    history: &[ReportRecord],
    proposed_status: CargoStatus,
    proposed_report_type: ReportType,
    lookback: usize,
) -> ContradictionCheck {
    if history.len() < lookback || proposed_report_type.is_departure() {
        return ContradictionCheck::Clear;
    }

    let mut ordered: Vec<&ReportRecord> = history.iter().collect();
    ordered.sort_by_key(|r| r.occurred_on);
    let window = &ordered[ordered.len() - lookback..];

    match uniform_status(window) {
        Some(previous_status) if previous_status != proposed_status => {
            ContradictionCheck::Flagged {
                previous_status,
                reason: format!(
                    "Status changed from {previous_status} to {proposed_status} \
                     without a typical event (Report Type: {proposed_report_type})"
                ),
            }
        }
        _ => ContradictionCheck::Clear,
    }
}

/// The one status every report in `window` shares, if there is one.
fn uniform_status(window: &[&ReportRecord]) -> Option<CargoStatus> {
    let (first, rest) = window.split_first()?;
    rest.iter()
        .all(|r| r.cargo_status == first.cargo_status)
        .then_some(first.cargo_status)
}
