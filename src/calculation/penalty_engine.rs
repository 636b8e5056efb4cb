//! Employer Shared Responsibility penalty estimation.
//!
//! This module combines the 4980H(a) and 4980H(b) calculations and applies
//! the lesser-of rule: an employer never pays both sections for the same
//! failure, so when (a) applies the effective liability is the smaller of
//! the two amounts.

use rust_decimal::Decimal;

use crate::config::PenaltyRates;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning, PenaltyResult, WorkforceFacts};

use super::{calculate_no_offer_penalty, calculate_unaffordable_penalty};

/// The result of a penalty calculation with its audit trail.
#[derive(Debug, Clone)]
pub struct PenaltyCalculation {
    /// The computed exposure.
    pub result: PenaltyResult,
    /// One step per rule applied, in order.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings about the inputs that did not block the calculation.
    pub warnings: Vec<AuditWarning>,
}

/// Applies the lesser-of rule to the two section amounts.
///
/// If `penalty_a` is positive the total is `min(penalty_a, penalty_b)`;
/// otherwise it is `penalty_b`.
///
/// # Examples
///
/// ```
/// use aca_engine::calculation::apply_lesser_of;
/// use rust_decimal::Decimal;
///
/// assert_eq!(apply_lesser_of(Decimal::from(207900), Decimal::ZERO), Decimal::ZERO);
/// assert_eq!(apply_lesser_of(Decimal::ZERO, Decimal::from(53520)), Decimal::from(53520));
/// ```
pub fn apply_lesser_of(penalty_a: Decimal, penalty_b: Decimal) -> Decimal {
    if penalty_a > Decimal::ZERO {
        penalty_a.min(penalty_b)
    } else {
        penalty_b
    }
}

/// Calculates 4980H penalty exposure for a tax year.
///
/// # Arguments
///
/// * `facts` - Aggregate coverage facts for the full-time workforce
/// * `rates` - The 4980H(a)/(b) amounts for the tax year
///
/// # Returns
///
/// A [`PenaltyCalculation`] holding the [`PenaltyResult`] and three audit
/// steps: the (a) test, the (b) amount, and the lesser-of decision.
///
/// # Errors
///
/// Returns `InvalidInput` if any count is negative or a sub-count exceeds
/// `total_fte`.
///
/// # Examples
///
/// ```
/// use aca_engine::calculation::calculate_penalty;
/// use aca_engine::config::PenaltyRates;
/// use aca_engine::models::WorkforceFacts;
/// use rust_decimal::Decimal;
///
/// let facts = WorkforceFacts {
///     total_fte: 4521,
///     employees_not_offered: 0,
///     employees_unaffordable: 12,
///     subsidy_recipients: 8,
/// };
/// let rates = PenaltyRates { rate_a: Decimal::from(2970), rate_b: Decimal::from(4460) };
///
/// let calculation = calculate_penalty(&facts, &rates)?;
/// assert_eq!(calculation.result.penalty_a, Decimal::ZERO);
/// assert_eq!(calculation.result.total, Decimal::from(53520));
/// # Ok::<(), aca_engine::error::EngineError>(())
/// ```
pub fn calculate_penalty(
    facts: &WorkforceFacts,
    rates: &PenaltyRates,
) -> EngineResult<PenaltyCalculation> {
    facts.validate()?;

    let no_offer = calculate_no_offer_penalty(facts, rates, 1);
    let unaffordable = calculate_unaffordable_penalty(facts, rates, 2);

    let penalty_a = no_offer.amount;
    let penalty_b = unaffordable.amount;
    let total = apply_lesser_of(penalty_a, penalty_b);

    let reasoning = if penalty_a > Decimal::ZERO {
        format!(
            "4980H(a) applies: liability is the lesser of ${} and ${} = ${}",
            penalty_a.normalize(),
            penalty_b.normalize(),
            total.normalize()
        )
    } else {
        format!(
            "4980H(a) does not apply: liability is the 4980H(b) amount ${}",
            total.normalize()
        )
    };

    let lesser_of_step = AuditStep {
        step_number: 3,
        rule_id: "lesser_of".to_string(),
        rule_name: "4980H(a)/(b) Lesser-Of Rule".to_string(),
        clause_ref: "4980H(b)(2)".to_string(),
        input: serde_json::json!({
            "penalty_a": penalty_a.normalize().to_string(),
            "penalty_b": penalty_b.normalize().to_string(),
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string(),
        }),
        reasoning,
    };

    let mut warnings = Vec::new();
    if facts.categories_overlap() {
        warnings.push(AuditWarning {
            code: "OVERLAPPING_CATEGORIES".to_string(),
            message: format!(
                "{} not offered + {} unaffordable exceeds {} total FTE; the groups overlap",
                facts.employees_not_offered, facts.employees_unaffordable, facts.total_fte
            ),
            severity: "low".to_string(),
        });
    }

    Ok(PenaltyCalculation {
        result: PenaltyResult {
            penalty_a,
            penalty_b,
            total,
            affected_employees_a: facts.employees_not_offered,
            affected_employees_b: facts.employees_unaffordable,
        },
        audit_steps: vec![no_offer.audit_step, unaffordable.audit_step, lesser_of_step],
        warnings,
    })
}
