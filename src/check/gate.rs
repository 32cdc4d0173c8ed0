//! Status-change gate: cargo status may only flip during a berth call.

use crate::model::{CargoStatus, ReportRecord, ReportType};

const BERTH_ONLY: &str = "Laden/Ballast status can only change after 'Arrival At Berth'.";

/// Whether a proposed cargo status may be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateCheck {
    /// No change, no history, or the vessel is alongside a berth.
    Open,

    /// A status flip was proposed away from the berth.
    Closed {
        previous_status: CargoStatus,
        reason: String,
    },
}

impl GateCheck {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Checks a proposed status against the vessel's latest report.
///
/// A flip is allowed while the vessel is between `Arrival At Berth` and the
/// next departure: scanning back from the latest report, `Arrival At Berth`
/// must come up before any `Departure From Berth` or `Departure`.
/// `history` must be in report order.
pub fn allow_status_change(history: &[ReportRecord], proposed: CargoStatus) -> GateCheck {
    let Some(latest) = history.last() else {
        return GateCheck::Open;
    };
    if latest.cargo_status == proposed {
        return GateCheck::Open;
    }

    if is_alongside(history) {
        GateCheck::Open
    } else {
        GateCheck::Closed {
            previous_status: latest.cargo_status,
            reason: BERTH_ONLY.to_string(),
        }
    }
}

/// The latest berth event is an arrival, not a departure.
fn is_alongside(history: &[ReportRecord]) -> bool {
    let latest_berth_event = history.iter().rev().map(|r| r.report_type).find(|t| {
        matches!(
            t,
            ReportType::ArrivalAtBerth | ReportType::DepartureFromBerth | ReportType::Departure
        )
    });
    latest_berth_event == Some(ReportType::ArrivalAtBerth)
}
