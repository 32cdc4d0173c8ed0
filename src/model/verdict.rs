//! Verdicts: the structured outcome of checking one proposed report.

use serde::Serialize;

use super::{CargoStatus, ReportType};

/// Which rule a proposed report broke, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViolatedRule {
    None,

    /// The report type can't follow the vessel's previous reports.
    Sequence,

    /// The cargo status flipped outside a berth call.
    StatusGate,

    /// The cargo status differs from a run of identical recent reports.
    ConsistencyFlag,

    /// The report is dated before the vessel's latest report, or would
    /// replace one that isn't the latest. Acknowledging doesn't lift it.
    Chronology,
}

/// One failing check and why it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub rule: ViolatedRule,
    pub reason: String,
}

/// The outcome of evaluating a proposed report against a vessel's history.
///
/// `explanation` carries the reason of the highest-precedence failure;
/// `findings` keeps every failure so callers can say more.
/// Explanations are stable, machine-readable text, not final UI copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub is_violation: bool,
    pub violated_rule: ViolatedRule,
    pub previous_status: Option<CargoStatus>,

    /// Populated only when the sequence check failed.
    pub allowed_next_types: Vec<ReportType>,
    pub explanation: String,
    pub findings: Vec<Finding>,
}

impl ValidationVerdict {
    /// A verdict with nothing to report.
    pub fn clean() -> Self {
        Self {
            is_violation: false,
            violated_rule: ViolatedRule::None,
            previous_status: None,
            allowed_next_types: Vec::new(),
            explanation: String::new(),
            findings: Vec::new(),
        }
    }
}
