//! Penalty result models.
//!
//! This module contains [`PenaltyResult`], the value produced by the
//! penalty engine, and [`PenaltyAssessment`], the envelope returned by the
//! API with identifiers, rates and the audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::PenaltyRates;

use super::AuditTrace;

/// The computed 4980H exposure for one tax year.
///
/// `total` is the effective liability after the lesser-of rule; the two
/// section amounts are reported alongside it for display.
///
/// # Example
///
/// ```
/// use aca_engine::models::PenaltyResult;
/// use rust_decimal::Decimal;
///
/// let result = PenaltyResult {
///     penalty_a: Decimal::ZERO,
///     penalty_b: Decimal::from(53520),
///     total: Decimal::from(53520),
///     affected_employees_a: 0,
///     affected_employees_b: 12,
/// };
/// assert_eq!(result.monthly_total(), Decimal::from(4460));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyResult {
    /// The 4980H(a) "no offer" amount.
    pub penalty_a: Decimal,
    /// The 4980H(b) "unaffordable offer" amount.
    pub penalty_b: Decimal,
    /// The effective annual liability.
    pub total: Decimal,
    /// Employees not offered coverage.
    pub affected_employees_a: i64,
    /// Employees with an unaffordable offer.
    pub affected_employees_b: i64,
}

impl PenaltyResult {
    /// Returns one twelfth of `total`, rounded to cents.
    pub fn monthly_total(&self) -> Decimal {
        (self.total / Decimal::from(12))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// A complete penalty assessment as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyAssessment {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The tax year whose rates were applied.
    pub tax_year: i32,
    /// The rates that were applied.
    pub rates: PenaltyRates,
    /// The computed exposure.
    pub result: PenaltyResult,
    /// The effective liability per month.
    pub monthly_total: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
