//! Resolutions: what the operator decided about a flagged report.
//!
//! Decisions arrive as text from outside (an operator, or an assistant
//! phrasing the conversation with one) and are untrusted. Anything that
//! doesn't validate becomes a request to clarify, never an error.

use serde::Deserialize;

use super::{CargoStatus, ReportType};

const UNREADABLE: &str = "Sorry, I couldn't process that. Do you want to proceed with this \
     report, or correct its Laden/Ballast status or report type?";

const MISSING_CORRECTION: &str =
    "Certainly, I can help you correct it. Do you want to change it to 'Laden' or 'Ballast'?";

/// The operator's answer to a flagged report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Keep the report as entered.
    Proceed,

    /// Replace the status, the report type, or both. At least one is set.
    Correct {
        cargo_status: Option<CargoStatus>,
        report_type: Option<ReportType>,
    },

    /// Nothing decided yet; ask the operator this.
    Clarify { message: String },
}

/// The wire shape of a decision, before validation.
#[derive(Debug, Deserialize)]
struct RawDecision {
    action: String,
    #[serde(default)]
    corrected_status: Option<String>,
    #[serde(default)]
    corrected_report_type: Option<String>,
    #[serde(default, alias = "message")]
    bot_response: Option<String>,
}

impl Resolution {
    /// Parses decision text, falling back to [`Resolution::Clarify`].
    ///
    /// Accepts a bare JSON object or one wrapped in a Markdown code fence.
    pub fn parse(text: &str) -> Self {
        let body = strip_fence(text);
        let raw: RawDecision = match serde_json::from_str(body) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable decision, asking to clarify");
                return Self::clarify(UNREADABLE);
            }
        };

        match raw.action.trim().to_ascii_lowercase().as_str() {
            "proceed" => Self::Proceed,
            "correct" => Self::correction(&raw),
            "clarify" => Self::clarify(raw.bot_response.as_deref().unwrap_or(UNREADABLE)),
            other => {
                tracing::warn!(action = other, "unknown decision action, asking to clarify");
                Self::clarify(UNREADABLE)
            }
        }
    }

    fn correction(raw: &RawDecision) -> Self {
        let cargo_status = raw.corrected_status.as_deref().map(str::parse::<CargoStatus>);
        let report_type = raw
            .corrected_report_type
            .as_deref()
            .map(str::parse::<ReportType>);

        match (cargo_status.transpose(), report_type.transpose()) {
            (Ok(None), Ok(None)) => Self::clarify(MISSING_CORRECTION),
            (Ok(cargo_status), Ok(report_type)) => Self::Correct {
                cargo_status,
                report_type,
            },
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "invalid correction, asking to clarify");
                Self::clarify(UNREADABLE)
            }
        }
    }

    fn clarify(message: &str) -> Self {
        Self::Clarify {
            message: message.to_string(),
        }
    }
}

/// Strips a surrounding ```` ```json ```` (or bare ```` ``` ````) fence.
fn strip_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };
    inner.strip_prefix("json").unwrap_or(inner).trim()
}
