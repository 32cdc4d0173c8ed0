//! Intake: checking proposed reports against stored history and recording them.
//!
//! This is where the pure checks meet the store. A report is evaluated
//! against a fresh snapshot of its vessel's history; clean reports are
//! stored, flagged ones wait for the operator to accept or correct them.

use serde::Serialize;

use crate::{
    check::evaluate,
    model::{Finding, ProposedReport, ReportRecord, Resolution, ValidationVerdict, ViolatedRule},
    storage::{self, HistoryStore, Upserted},
};

/// What happened to a submitted report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Submission {
    /// The report was recorded.
    Stored {
        record: ReportRecord,
        upserted: Upserted,
        verdict: ValidationVerdict,
    },

    /// The report broke a rule and was not recorded.
    Rejected {
        record: ReportRecord,
        verdict: ValidationVerdict,
    },

    /// The operator's decision was unclear; nothing was recorded.
    Clarify { message: String },
}

/// Evaluates a proposed report against the vessel's stored history.
///
/// Reports only ever land at the end of a history. A report dated before
/// the latest one, or one that would replace an earlier row, breaks
/// [`ViolatedRule::Chronology`]. Replacing the latest report is checked
/// against the history without it.
///
/// Pure read: nothing is recorded.
pub fn check(
    store: &impl HistoryStore,
    vessel_id: &str,
    proposed: &ProposedReport,
    lookback: usize,
) -> storage::Result<ValidationVerdict> {
    let mut history = store.history(vessel_id)?;

    let replaced = history.iter().position(|r| {
        r.occurred_on == proposed.occurred_on && r.report_type == proposed.report_type
    });
    if let Some(latest) = history.last() {
        let replaces_latest = replaced == Some(history.len() - 1);
        let backdated = latest.occurred_on > proposed.occurred_on;
        if !replaces_latest && (backdated || replaced.is_some()) {
            return Ok(out_of_order(proposed, latest));
        }
        if replaces_latest {
            history.pop();
        }
    }

    Ok(evaluate(vessel_id, proposed, &history, lookback))
}

/// Submits a report: stores it if it passes, or if `accept` is set.
///
/// `accept` is the operator acknowledging a flagged report and keeping it
/// as entered. Out-of-order reports are rejected regardless.
pub fn submit(
    store: &impl HistoryStore,
    vessel_id: &str,
    proposed: &ProposedReport,
    lookback: usize,
    accept: bool,
) -> storage::Result<Submission> {
    let verdict = check(store, vessel_id, proposed, lookback)?;
    let record = proposed.into_record(vessel_id);

    let acknowledged = accept && verdict.violated_rule != ViolatedRule::Chronology;
    if verdict.is_violation && !acknowledged {
        tracing::warn!(
            vessel = vessel_id,
            rule = ?verdict.violated_rule,
            explanation = %verdict.explanation,
            "noon report rejected"
        );
        return Ok(Submission::Rejected { record, verdict });
    }

    store_record(store, record, verdict)
}

/// Applies the operator's resolution to a flagged report.
///
/// - `Proceed` records the report as entered.
/// - `Correct` rewrites the report and records it only if the corrected
///   report passes every check.
/// - `Clarify` records nothing and hands the question back.
pub fn resolve(
    store: &impl HistoryStore,
    vessel_id: &str,
    proposed: &ProposedReport,
    resolution: &Resolution,
    lookback: usize,
) -> storage::Result<Submission> {
    match resolution {
        Resolution::Proceed => submit(store, vessel_id, proposed, lookback, true),
        Resolution::Correct {
            cargo_status,
            report_type,
        } => {
            let corrected = ProposedReport {
                cargo_status: cargo_status.unwrap_or(proposed.cargo_status),
                report_type: report_type.unwrap_or(proposed.report_type),
                occurred_on: proposed.occurred_on,
            };
            submit(store, vessel_id, &corrected, lookback, false)
        }
        Resolution::Clarify { message } => Ok(Submission::Clarify {
            message: message.clone(),
        }),
    }
}

fn out_of_order(proposed: &ProposedReport, latest: &ReportRecord) -> ValidationVerdict {
    let reason = format!(
        "Reports must be entered in date order. The latest report is '{}' on {}, \
         so '{}' on {} can't be added or changed.",
        latest.report_type, latest.occurred_on, proposed.report_type, proposed.occurred_on
    );
    ValidationVerdict {
        is_violation: true,
        violated_rule: ViolatedRule::Chronology,
        previous_status: None,
        allowed_next_types: Vec::new(),
        explanation: reason.clone(),
        findings: vec![Finding {
            rule: ViolatedRule::Chronology,
            reason,
        }],
    }
}

fn store_record(
    store: &impl HistoryStore,
    record: ReportRecord,
    verdict: ValidationVerdict,
) -> storage::Result<Submission> {
    let upserted = store.upsert(&record)?;
    tracing::info!(
        vessel = %record.vessel_id,
        date = %record.occurred_on,
        report_type = %record.report_type,
        cargo_status = %record.cargo_status,
        ?upserted,
        acknowledged = verdict.is_violation,
        "noon report stored"
    );
    Ok(Submission::Stored {
        record,
        upserted,
        verdict,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    use crate::check::DEFAULT_LOOKBACK;
    use crate::model::{CargoStatus, ReportType};
    use crate::storage::MemoryStore;

    const VESSEL: &str = "Navig8 Gallantry";

    fn proposed(day: i8, report_type: ReportType, cargo_status: CargoStatus) -> ProposedReport {
        ProposedReport {
            cargo_status,
            report_type,
            occurred_on: date(2025, 6, day),
        }
    }

    /// A store holding five Laden reports ending alongside a berth.
    fn berthed_store() -> MemoryStore {
        let store = MemoryStore::default();
        let voyage = [
            ReportType::AtSea,
            ReportType::AtSea,
            ReportType::Arrival,
            ReportType::ArrivalAtBerth,
            ReportType::InPort,
        ];
        for (report_type, day) in voyage.into_iter().zip(1i8..) {
            store
                .upsert(&proposed(day, report_type, CargoStatus::Laden).into_record(VESSEL))
                .unwrap();
        }
        store
    }

    #[test]
    fn clean_report_is_stored() {
        let store = MemoryStore::default();
        let submission = submit(
            &store,
            VESSEL,
            &proposed(1, ReportType::AtSea, CargoStatus::Laden),
            DEFAULT_LOOKBACK,
            false,
        )
        .unwrap();

        assert!(matches!(
            submission,
            Submission::Stored {
                upserted: Upserted::Inserted,
                ..
            }
        ));
        assert_eq!(store.history(VESSEL).unwrap().len(), 1);
    }

    #[test]
    fn check_stores_nothing() {
        let store = MemoryStore::default();
        let verdict = check(
            &store,
            VESSEL,
            &proposed(1, ReportType::Arrival, CargoStatus::Laden),
            DEFAULT_LOOKBACK,
        )
        .unwrap();

        assert_eq!(verdict.violated_rule, ViolatedRule::Sequence);
        assert!(store.history(VESSEL).unwrap().is_empty());
    }

    #[test]
    fn violating_report_is_rejected() {
        let store = berthed_store();
        let submission = submit(
            &store,
            VESSEL,
            &proposed(6, ReportType::InPort, CargoStatus::Ballast),
            DEFAULT_LOOKBACK,
            false,
        )
        .unwrap();

        let Submission::Rejected { verdict, .. } = submission else {
            panic!("expected the report to be rejected");
        };
        assert_eq!(verdict.violated_rule, ViolatedRule::ConsistencyFlag);
        assert_eq!(store.history(VESSEL).unwrap().len(), 5);
    }

    #[test]
    fn accepted_violation_is_stored() {
        let store = berthed_store();
        let submission = submit(
            &store,
            VESSEL,
            &proposed(6, ReportType::InPort, CargoStatus::Ballast),
            DEFAULT_LOOKBACK,
            true,
        )
        .unwrap();

        let Submission::Stored { verdict, .. } = submission else {
            panic!("expected the report to be stored");
        };
        assert!(verdict.is_violation);
        assert_eq!(store.history(VESSEL).unwrap().len(), 6);
    }

    #[test]
    fn proceed_stores_as_entered() {
        let store = berthed_store();
        let submission = resolve(
            &store,
            VESSEL,
            &proposed(6, ReportType::InPort, CargoStatus::Ballast),
            &Resolution::Proceed,
            DEFAULT_LOOKBACK,
        )
        .unwrap();

        assert!(matches!(submission, Submission::Stored { .. }));
        let latest = store.history(VESSEL).unwrap().pop().unwrap();
        assert_eq!(latest.cargo_status, CargoStatus::Ballast);
    }

    #[test]
    fn status_correction_is_stored() {
        let store = berthed_store();
        let resolution = Resolution::Correct {
            cargo_status: Some(CargoStatus::Laden),
            report_type: None,
        };
        let submission = resolve(
            &store,
            VESSEL,
            &proposed(6, ReportType::InPort, CargoStatus::Ballast),
            &resolution,
            DEFAULT_LOOKBACK,
        )
        .unwrap();

        let Submission::Stored { record, verdict, .. } = submission else {
            panic!("expected the report to be stored");
        };
        assert_eq!(record.cargo_status, CargoStatus::Laden);
        assert!(!verdict.is_violation);
    }

    #[test]
    fn report_type_correction_is_stored() {
        let store = berthed_store();
        let resolution = Resolution::Correct {
            cargo_status: None,
            report_type: Some(ReportType::DepartureFromBerth),
        };
        let submission = resolve(
            &store,
            VESSEL,
            &proposed(6, ReportType::InPort, CargoStatus::Ballast),
            &resolution,
            DEFAULT_LOOKBACK,
        )
        .unwrap();

        let Submission::Stored { record, .. } = submission else {
            panic!("expected the report to be stored");
        };
        assert_eq!(record.report_type, ReportType::DepartureFromBerth);
        assert_eq!(record.cargo_status, CargoStatus::Ballast);
    }

    #[test]
    fn correction_that_still_violates_is_rejected() {
        let store = berthed_store();
        let resolution = Resolution::Correct {
            cargo_status: None,
            report_type: Some(ReportType::AtSea),
        };
        let submission = resolve(
            &store,
            VESSEL,
            &proposed(6, ReportType::InPort, CargoStatus::Laden),
            &resolution,
            DEFAULT_LOOKBACK,
        )
        .unwrap();

        let Submission::Rejected { verdict, .. } = submission else {
            panic!("expected the report to be rejected");
        };
        assert_eq!(verdict.violated_rule, ViolatedRule::Sequence);
        assert_eq!(store.history(VESSEL).unwrap().len(), 5);
    }

    #[test]
    fn backdated_report_is_rejected_even_when_accepted() {
        let store = MemoryStore::default();
        for (report_type, day) in [
            (ReportType::AtSea, 1),
            (ReportType::Arrival, 2),
            (ReportType::ArrivalAtBerth, 3),
        ] {
            submit(
                &store,
                VESSEL,
                &proposed(day, report_type, CargoStatus::Laden),
                DEFAULT_LOOKBACK,
                false,
            )
            .unwrap();
        }

        let submission = submit(
            &store,
            VESSEL,
            &proposed(1, ReportType::InPort, CargoStatus::Laden),
            DEFAULT_LOOKBACK,
            true,
        )
        .unwrap();

        let Submission::Rejected { verdict, .. } = submission else {
            panic!("expected the backdated report to be rejected");
        };
        assert_eq!(verdict.violated_rule, ViolatedRule::Chronology);
        assert_eq!(
            verdict.explanation,
            "Reports must be entered in date order. The latest report is 'Arrival At Berth' \
             on 2025-06-03, so 'In Port' on 2025-06-01 can't be added or changed."
        );
        let types: Vec<ReportType> = store
            .history(VESSEL)
            .unwrap()
            .iter()
            .map(|r| r.report_type)
            .collect();
        assert_eq!(
            types,
            vec![
                ReportType::AtSea,
                ReportType::Arrival,
                ReportType::ArrivalAtBerth
            ]
        );
    }

    #[test]
    fn same_day_follow_up_is_checked_after_earlier_reports() {
        let store = berthed_store();
        let verdict = check(
            &store,
            VESSEL,
            &proposed(5, ReportType::DepartureFromBerth, CargoStatus::Laden),
            DEFAULT_LOOKBACK,
        )
        .unwrap();
        assert!(!verdict.is_violation, "{verdict:?}");
    }

    #[test]
    fn replacing_latest_report_is_checked_without_it() {
        let store = MemoryStore::default();
        submit(
            &store,
            VESSEL,
            &proposed(1, ReportType::AtSea, CargoStatus::Laden),
            DEFAULT_LOOKBACK,
            false,
        )
        .unwrap();

        let submission = submit(
            &store,
            VESSEL,
            &proposed(1, ReportType::AtSea, CargoStatus::Ballast),
            DEFAULT_LOOKBACK,
            false,
        )
        .unwrap();

        let Submission::Stored {
            upserted, verdict, ..
        } = submission
        else {
            panic!("expected the replacement to be stored");
        };
        assert_eq!(upserted, Upserted::Updated);
        assert!(!verdict.is_violation);
        let history = store.history(VESSEL).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].cargo_status, CargoStatus::Ballast);
    }

    #[test]
    fn replacing_an_earlier_report_is_rejected() {
        let store = berthed_store();
        let submission = submit(
            &store,
            VESSEL,
            &proposed(4, ReportType::ArrivalAtBerth, CargoStatus::Ballast),
            DEFAULT_LOOKBACK,
            true,
        )
        .unwrap();

        let Submission::Rejected { verdict, .. } = submission else {
            panic!("expected the replacement to be rejected");
        };
        assert_eq!(verdict.violated_rule, ViolatedRule::Chronology);
        let history = store.history(VESSEL).unwrap();
        assert!(history.iter().all(|r| r.cargo_status == CargoStatus::Laden));
    }

    #[test]
    fn proceed_cannot_store_a_backdated_report() {
        let store = berthed_store();
        let submission = resolve(
            &store,
            VESSEL,
            &proposed(2, ReportType::AtSea, CargoStatus::Laden),
            &Resolution::Proceed,
            DEFAULT_LOOKBACK,
        )
        .unwrap();

        assert!(matches!(submission, Submission::Rejected { .. }));
        assert_eq!(store.history(VESSEL).unwrap().len(), 5);
    }

    #[test]
    fn clarify_stores_nothing() {
        let store = berthed_store();
        let resolution = Resolution::Clarify {
            message: "Laden or Ballast?".into(),
        };
        let submission = resolve(
            &store,
            VESSEL,
            &proposed(6, ReportType::InPort, CargoStatus::Ballast),
            &resolution,
            DEFAULT_LOOKBACK,
        )
        .unwrap();

        assert_eq!(
            submission,
            Submission::Clarify {
                message: "Laden or Ballast?".into()
            }
        );
        assert_eq!(store.history(VESSEL).unwrap().len(), 5);
    }
}
