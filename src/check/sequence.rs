//! Report-type sequencing: which report may follow which.
//!
//! A voyage runs `At Sea → Arrival → Arrival At Berth → Departure From
//! Berth → Departure → At Sea`. Any phase may be reported again on the next
//! day; `In Port` may be reported any number of times while in port and
//! never moves the sequence forward.

use crate::model::{ReportRecord, ReportType};

const IN_PORT_WINDOW: &str = "'In Port' is only allowed after 'Arrival', 'Arrival At Berth', \
     or 'Departure From Berth', and before 'Departure'. \
     Please enter 'In Port' only between these events.";

/// Report types an `In Port` report may directly follow.
const IN_PORT_PREDECESSORS: [ReportType; 4] = [
    ReportType::Arrival,
    ReportType::ArrivalAtBerth,
    ReportType::DepartureFromBerth,
    ReportType::InPort,
];

/// Outcome of checking a proposed report type against history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceCheck {
    Valid,

    /// The proposed type can't come next. `allowed` lists what can,
    /// in voyage order.
    Invalid {
        allowed: Vec<ReportType>,
        reason: String,
    },
}

impl SequenceCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Types that may follow `last`, the latest report that isn't `In Port`.
///
/// `In Port` entries here only shape `allowed_next`; whether `In Port` is
/// accepted is decided by the port window alone, which never opens directly
/// after `Arrival`.
pub fn successors(last: ReportType) -> &'static [ReportType] {
    match last {
        ReportType::AtSea => &[ReportType::AtSea, ReportType::Arrival],
        ReportType::Arrival => &[
            ReportType::Arrival,
            ReportType::InPort,
            ReportType::ArrivalAtBerth,
        ],
        ReportType::ArrivalAtBerth => &[
            ReportType::ArrivalAtBerth,
            ReportType::InPort,
            ReportType::DepartureFromBerth,
        ],
        ReportType::InPort => &[
            ReportType::InPort,
            ReportType::ArrivalAtBerth,
            ReportType::DepartureFromBerth,
            ReportType::Departure,
        ],
        ReportType::DepartureFromBerth => &[
            ReportType::DepartureFromBerth,
            ReportType::InPort,
            ReportType::Departure,
        ],
        ReportType::Departure => &[ReportType::Departure, ReportType::AtSea],
    }
}

/// Drops back-to-back repeats: `[AtSea, AtSea, Arrival]` becomes `[AtSea, Arrival]`.
pub fn collapse(types: impl IntoIterator<Item = ReportType>) -> Vec<ReportType> {
    let mut collapsed: Vec<ReportType> = Vec::new();
    for report_type in types {
        if collapsed.last() != Some(&report_type) {
            collapsed.push(report_type);
        }
    }
    collapsed
}

/// The latest report type that moves the sequence, skipping `In Port`.
pub fn last_substantive(types: &[ReportType]) -> Option<ReportType> {
    collapse(types.iter().copied())
        .into_iter()
        .rev()
        .find(|t| *t != ReportType::InPort)
}

/// The report types that may legally follow `types`.
///
/// An empty history (or one with nothing but `In Port`) must start `At Sea`.
pub fn allowed_next(types: &[ReportType]) -> Vec<ReportType> {
    match last_substantive(types) {
        Some(last) => successors(last).to_vec(),
        None => vec![ReportType::AtSea],
    }
}

/// Checks whether `proposed` may follow the vessel's history.
///
/// `history` must be in report order.
pub fn validate(history: &[ReportRecord], proposed: ReportType) -> SequenceCheck {
    let types: Vec<ReportType> = history.iter().map(|r| r.report_type).collect();
    let allowed = allowed_next(&types);

    if proposed == ReportType::InPort {
        if in_port_window_open(&types) {
            return SequenceCheck::Valid;
        }
        return SequenceCheck::Invalid {
            allowed: allowed
                .into_iter()
                .filter(|t| *t != ReportType::InPort)
                .collect(),
            reason: IN_PORT_WINDOW.to_string(),
        };
    }

    if allowed.contains(&proposed) {
        return SequenceCheck::Valid;
    }

    let reason = format!(
        "The next valid report type should be {}, but you entered '{proposed}'. \
         Please check the sequence and try again.",
        join_alternatives(&allowed)
    );
    SequenceCheck::Invalid { allowed, reason }
}

/// `In Port` is open strictly after the latest `Arrival`, before the
/// `Departure` that follows it, and only right after a port-side report.
fn in_port_window_open(types: &[ReportType]) -> bool {
    let Some(arrival) = types.iter().rposition(|t| *t == ReportType::Arrival) else {
        return false;
    };
    let last = types.len() - 1;
    let departure = types[arrival + 1..]
        .iter()
        .position(|t| *t == ReportType::Departure)
        .map_or(types.len(), |offset| arrival + 1 + offset);

    arrival < last && last < departure && IN_PORT_PREDECESSORS.contains(&types[last])
}

/// Joins labels as a natural-language list of alternatives:
/// `A`, `A or B`, `A, B, or C`.
pub fn join_alternatives(types: &[ReportType]) -> String {
    let labels: Vec<&str> = types.iter().map(|t| t.label()).collect();
    match labels.as_slice() {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}
