//! Report records: one noon report for one vessel.

use jiff::civil::Date;
use serde::Serialize;

use super::{CargoStatus, ReportType};

/// A single noon report as stored in a vessel's history.
///
/// Immutable once stored. History is ordered by `occurred_on`,
/// with insertion order breaking ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub vessel_id: String,
    pub occurred_on: Date,
    pub cargo_status: CargoStatus,
    pub report_type: ReportType,
}

/// A report that hasn't been accepted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposedReport {
    pub cargo_status: CargoStatus,
    pub report_type: ReportType,
    pub occurred_on: Date,
}

impl ProposedReport {
    /// Attaches the report to a vessel, ready to be stored.
    pub fn into_record(self, vessel_id: &str) -> ReportRecord {
        ReportRecord {
            vessel_id: vessel_id.to_string(),
            occurred_on: self.occurred_on,
            cargo_status: self.cargo_status,
            report_type: self.report_type,
        }
    }
}
