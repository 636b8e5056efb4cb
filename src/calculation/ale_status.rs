//! Applicable Large Employer determination.
//!
//! An employer is an ALE for a calendar year if it averaged at least 50
//! full-time employees, counting full-time equivalents, on business days
//! during the preceding calendar year. Part-time hours are converted to
//! FTEs at 120 hours per FTE per month.

use std::collections::HashSet;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::MeasurementConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, WorkforceMonth};

/// Headcount for one month after FTE conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyHeadcount {
    /// Calendar month.
    pub month: u32,
    /// Full-time employees.
    pub full_time_employees: u32,
    /// Full-time equivalents from part-time hours.
    pub fte_employees: Decimal,
    /// Full-time plus FTE.
    pub total: Decimal,
}

/// The outcome of an ALE determination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AleDetermination {
    /// Whether the employer is an Applicable Large Employer.
    pub is_ale: bool,
    /// Average monthly headcount, rounded down to a whole employee.
    pub average_employees: u32,
    /// The threshold that was applied.
    pub threshold: u32,
    /// The per-month breakdown, in calendar order.
    pub months: Vec<MonthlyHeadcount>,
    /// The audit step recording this determination.
    pub audit_step: AuditStep,
}

/// Determines ALE status from the prior year's monthly headcounts.
///
/// # Errors
///
/// Returns `InvalidInput` if there are no months or more than twelve, a
/// month is outside 1..=12 or repeated, part-time hours are negative, or
/// the headcounts overflow a `Decimal`.
///
/// # Examples
///
/// ```
/// use aca_engine::calculation::determine_ale_status;
/// use aca_engine::config::MeasurementConfig;
/// use aca_engine::models::WorkforceMonth;
/// use rust_decimal::Decimal;
///
/// let measurement = MeasurementConfig {
///     full_time_weekly_hours: Decimal::from(30),
///     full_time_monthly_hours: Decimal::from(130),
///     fte_monthly_hours: Decimal::from(120),
///     ale_employee_threshold: 50,
/// };
/// // 40 full-time + 1200 / 120 = 10 FTE each month
/// let months: Vec<WorkforceMonth> = (1..=12)
///     .map(|month| WorkforceMonth {
///         month,
///         full_time_employees: 40,
///         part_time_hours: Decimal::from(1200),
///     })
///     .collect();
///
/// let result = determine_ale_status(&months, &measurement)?;
/// assert_eq!(result.average_employees, 50);
/// assert!(result.is_ale);
/// # Ok::<(), aca_engine::error::EngineError>(())
/// ```
pub fn determine_ale_status(
    months: &[WorkforceMonth],
    measurement: &MeasurementConfig,
) -> EngineResult<AleDetermination> {
    if months.is_empty() || months.len() > 12 {
        return Err(EngineError::invalid_input(
            "months",
            format!("expected 1 to 12 months, got {}", months.len()),
        ));
    }
    if measurement.fte_monthly_hours <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "fte_monthly_hours",
            "must be positive",
        ));
    }

    let mut seen = HashSet::new();
    for entry in months {
        if !(1..=12).contains(&entry.month) {
            return Err(EngineError::invalid_input(
                "month",
                format!("{} is not a calendar month", entry.month),
            ));
        }
        if !seen.insert(entry.month) {
            return Err(EngineError::invalid_input(
                "months",
                format!("month {} appears more than once", entry.month),
            ));
        }
        if entry.part_time_hours < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "part_time_hours",
                format!(
                    "must not be negative for month {} (got {})",
                    entry.month, entry.part_time_hours
                ),
            ));
        }
    }

    let mut headcounts = months
        .iter()
        .map(|entry| {
            let fte_employees = entry
                .part_time_hours
                .checked_div(measurement.fte_monthly_hours)
                .ok_or_else(|| too_large("part_time_hours"))?;
            let total = Decimal::from(entry.full_time_employees)
                .checked_add(fte_employees)
                .ok_or_else(|| too_large("part_time_hours"))?;
            Ok(MonthlyHeadcount {
                month: entry.month,
                full_time_employees: entry.full_time_employees,
                fte_employees,
                total,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;
    headcounts.sort_by_key(|headcount| headcount.month);

    let sum = headcounts
        .iter()
        .try_fold(Decimal::ZERO, |sum, headcount| sum.checked_add(headcount.total))
        .ok_or_else(|| too_large("months"))?;
    let average = sum / Decimal::from(headcounts.len());
    // Anything past u32 is an ALE anyway
    let average_employees = average.floor().to_u32().unwrap_or(u32::MAX);
    let threshold = measurement.ale_employee_threshold;
    let is_ale = average_employees >= threshold;

    let audit_step = AuditStep {
        step_number: 1,
        rule_id: "ale_determination".to_string(),
        rule_name: "Applicable Large Employer Status".to_string(),
        clause_ref: "4980H(c)(2)".to_string(),
        input: serde_json::json!({
            "months_supplied": headcounts.len(),
            "fte_monthly_hours": measurement.fte_monthly_hours.normalize().to_string(),
            "threshold": threshold,
        }),
        output: serde_json::json!({
            "average_employees": average_employees,
            "is_ale": is_ale,
        }),
        reasoning: format!(
            "Average of {} monthly full-time + FTE counts is {} ({} rounded down), {} the {}-employee threshold",
            headcounts.len(),
            average_employees,
            average.round_dp(2).normalize(),
            if is_ale { "meeting" } else { "below" },
            threshold
        ),
    };

    Ok(AleDetermination {
        is_ale,
        average_employees,
        threshold,
        months: headcounts,
        audit_step,
    })
}

fn too_large(field: &str) -> EngineError {
    EngineError::invalid_input(field, "amount too large")
}
