//! Core data model for noon.
//!
//! These types describe what a vessel reports each day:
//! the voyage phase, whether it is laden, and when it happened.
//! Checks produce a verdict; operators answer with a resolution.

mod cargo_status;
mod record;
mod report_type;
mod resolution;
mod verdict;

pub use cargo_status::CargoStatus;
pub use record::{ProposedReport, ReportRecord};
pub use report_type::ReportType;
pub use resolution::Resolution;
pub use verdict::{Finding, ValidationVerdict, ViolatedRule};

/// A raw value that doesn't name a known report type or cargo status.
///
/// Raised at the boundary (CLI arguments, stored rows, decision text)
/// so the checks only ever see well-typed values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown report type: '{0}'")]
    ReportType(String),

    #[error("unknown cargo status: '{0}' (expected Laden or Ballast)")]
    CargoStatus(String),
}

/// Folds a label for lenient matching: `"At Sea"`, `"AtSea"`, and
/// `"at-sea"` all become `"atsea"`.
fn fold_label(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
