//! 4980H(a) "no offer" penalty calculation.
//!
//! The (a) penalty is triggered when an employer fails to offer minimum
//! essential coverage to substantially all (at least 95%) of its full-time
//! employees and at least one of them receives a Marketplace premium tax
//! credit. It is assessed on the whole full-time workforce, less a
//! statutory exemption of 30 employees.

use rust_decimal::Decimal;

use crate::config::PenaltyRates;
use crate::models::{AuditStep, WorkforceFacts};

/// Number of full-time employees excluded from the 4980H(a) headcount.
pub const NO_OFFER_EXEMPT_EMPLOYEES: i64 = 30;

/// Share of full-time employees that may go without an offer before
/// 4980H(a) can apply (offer to at least 95%).
pub const NO_OFFER_TOLERANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// The clause reference for the no-offer penalty.
pub const NO_OFFER_CLAUSE: &str = "4980H(a)";

/// The result of the 4980H(a) calculation.
#[derive(Debug, Clone)]
pub struct NoOfferPenaltyResult {
    /// Whether both trigger conditions were met.
    pub applies: bool,
    /// The penalty amount, zero when it does not apply.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the 4980H(a) exposure.
///
/// The penalty applies only if **both**:
/// - more than 5% of `total_fte` were not offered coverage, and
/// - at least one employee received a Marketplace subsidy.
///
/// When it applies the amount is `max(0, total_fte - 30) × rate_a`.
///
/// Inputs are expected to have passed [`WorkforceFacts::validate`].
///
/// # Examples
///
/// ```
/// use aca_engine::calculation::calculate_no_offer_penalty;
/// use aca_engine::config::PenaltyRates;
/// use aca_engine::models::WorkforceFacts;
/// use rust_decimal::Decimal;
///
/// let facts = WorkforceFacts {
///     total_fte: 100,
///     employees_not_offered: 10,
///     employees_unaffordable: 0,
///     subsidy_recipients: 1,
/// };
/// let rates = PenaltyRates { rate_a: Decimal::from(2970), rate_b: Decimal::from(4460) };
///
/// let result = calculate_no_offer_penalty(&facts, &rates, 1);
/// assert!(result.applies);
/// // (100 - 30) × $2970 = $207,900
/// assert_eq!(result.amount, Decimal::from(207900));
/// ```
pub fn calculate_no_offer_penalty(
    facts: &WorkforceFacts,
    rates: &PenaltyRates,
    step_number: u32,
) -> NoOfferPenaltyResult {
    let tolerance = Decimal::from(facts.total_fte) * NO_OFFER_TOLERANCE;
    let offer_test_failed = Decimal::from(facts.employees_not_offered) > tolerance;
    let has_subsidy = facts.subsidy_recipients > 0;
    let applies = offer_test_failed && has_subsidy;

    let assessable_employees = (facts.total_fte - NO_OFFER_EXEMPT_EMPLOYEES).max(0);
    let amount = if applies {
        Decimal::from(assessable_employees) * rates.rate_a
    } else {
        Decimal::ZERO
    };

    let reasoning = if applies {
        format!(
            "{} of {} employees not offered coverage exceeds 5% ({}) and {} received a subsidy: \
             ({} - {}) × ${} = ${}",
            facts.employees_not_offered,
            facts.total_fte,
            tolerance.normalize(),
            facts.subsidy_recipients,
            facts.total_fte,
            NO_OFFER_EXEMPT_EMPLOYEES,
            rates.rate_a.normalize(),
            amount.normalize()
        )
    } else if !offer_test_failed {
        format!(
            "{} of {} employees not offered coverage is within 5% ({}) - 4980H(a) does not apply",
            facts.employees_not_offered,
            facts.total_fte,
            tolerance.normalize()
        )
    } else {
        "No employee received a Marketplace subsidy - 4980H(a) does not apply".to_string()
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "penalty_a_no_offer".to_string(),
        rule_name: "4980H(a) No Offer of Coverage".to_string(),
        clause_ref: NO_OFFER_CLAUSE.to_string(),
        input: serde_json::json!({
            "total_fte": facts.total_fte,
            "employees_not_offered": facts.employees_not_offered,
            "subsidy_recipients": facts.subsidy_recipients,
            "rate_a": rates.rate_a.normalize().to_string(),
        }),
        output: serde_json::json!({
            "offer_test_failed": offer_test_failed,
            "applies": applies,
            "assessable_employees": assessable_employees,
            "amount": amount.normalize().to_string(),
        }),
        reasoning,
    };

    NoOfferPenaltyResult {
        applies,
        amount,
        audit_step,
    }
}
