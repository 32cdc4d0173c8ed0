//! Verdict aggregation: three independent checks, one answer.

use crate::model::{Finding, ValidationVerdict, ViolatedRule};

use super::{ContradictionCheck, GateCheck, SequenceCheck};

/// Merges check outcomes into a verdict.
///
/// Precedence: sequence, then status gate, then contradiction. The first
/// failure names the violated rule and supplies the explanation; every
/// failure is kept in `findings`.
pub fn aggregate(
    sequence: SequenceCheck,
    gate: GateCheck,
    contradiction: ContradictionCheck,
) -> ValidationVerdict {
    let mut findings = Vec::new();
    let mut allowed_next_types = Vec::new();
    let mut previous_status = None;

    if let SequenceCheck::Invalid { allowed, reason } = sequence {
        allowed_next_types = allowed;
        findings.push(Finding {
            rule: ViolatedRule::Sequence,
            reason,
        });
    }

    if let GateCheck::Closed {
        previous_status: status,
        reason,
    } = gate
    {
        previous_status = Some(status);
        findings.push(Finding {
            rule: ViolatedRule::StatusGate,
            reason,
        });
    }

    if let ContradictionCheck::Flagged {
        previous_status: status,
        reason,
    } = contradiction
    {
        previous_status.get_or_insert(status);
        findings.push(Finding {
            rule: ViolatedRule::ConsistencyFlag,
            reason,
        });
    }

    let Some(primary) = findings.first() else {
        return ValidationVerdict::clean();
    };

    ValidationVerdict {
        is_violation: true,
        violated_rule: primary.rule,
        explanation: primary.reason.clone(),
        previous_status,
        allowed_next_types,
        findings,
    }
}
