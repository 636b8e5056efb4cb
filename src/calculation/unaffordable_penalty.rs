//! 4980H(b) "unaffordable offer" penalty calculation.

use rust_decimal::Decimal;

use crate::config::PenaltyRates;
use crate::models::{AuditStep, WorkforceFacts};

/// The clause reference for the unaffordable-offer penalty.
pub const UNAFFORDABLE_CLAUSE: &str = "4980H(b)";

/// The result of the 4980H(b) calculation.
#[derive(Debug, Clone)]
pub struct UnaffordablePenaltyResult {
    /// The penalty amount.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the 4980H(b) exposure: `employees_unaffordable × rate_b`.
///
/// There is no threshold gate; every affected employee counts.
///
/// # Examples
///
/// ```
/// use aca_engine::calculation::calculate_unaffordable_penalty;
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
/// let result = calculate_unaffordable_penalty(&facts, &rates, 2);
/// assert_eq!(result.amount, Decimal::from(53520));
/// ```
pub fn calculate_unaffordable_penalty(
    facts: &WorkforceFacts,
    rates: &PenaltyRates,
    step_number: u32,
) -> UnaffordablePenaltyResult {
    let amount = Decimal::from(facts.employees_unaffordable) * rates.rate_b;

    let audit_step = AuditStep {
        step_number,
        rule_id: "penalty_b_unaffordable".to_string(),
        rule_name: "4980H(b) Unaffordable Offer".to_string(),
        clause_ref: UNAFFORDABLE_CLAUSE.to_string(),
        input: serde_json::json!({
            "employees_unaffordable": facts.employees_unaffordable,
            "rate_b": rates.rate_b.normalize().to_string(),
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string(),
        }),
        reasoning: format!(
            "{} employees × ${} = ${}",
            facts.employees_unaffordable,
            rates.rate_b.normalize(),
            amount.normalize()
        ),
    };

    UnaffordablePenaltyResult { amount, audit_step }
}
