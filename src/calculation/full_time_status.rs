//! Full-time employee determination.
//!
//! Two IRS methods are supported:
//!
//! - **Monthly measurement**: an employee is full-time for a month with at
//!   least 130 hours of service.
//! - **Look-back measurement**: an employee is full-time for the stability
//!   period if they averaged at least 30 hours of service per week over a
//!   standard measurement period.

use std::collections::HashSet;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::MeasurementConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, MeasurementPeriod, MonthlyHours};

const DAYS_PER_WEEK: Decimal = Decimal::from_parts(7, 0, 0, false, 0);

/// The outcome of a look-back full-time determination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullTimeDetermination {
    /// Whether the employee is full-time for the following stability period.
    pub is_full_time: bool,
    /// Hours of service credited in months overlapping the period.
    pub total_hours: Decimal,
    /// Length of the measurement period in weeks.
    pub weeks: Decimal,
    /// Average weekly hours of service, rounded to two places.
    pub average_weekly_hours: Decimal,
    /// Number of monthly entries that fell inside the period.
    pub months_counted: u32,
    /// The audit step recording this determination.
    pub audit_step: AuditStep,
}

/// Returns whether a month's hours make the employee full-time under the
/// monthly measurement method.
///
/// # Examples
///
/// ```
/// use aca_engine::calculation::is_full_time_month;
/// use aca_engine::config::MeasurementConfig;
/// use rust_decimal::Decimal;
///
/// let measurement = MeasurementConfig {
///     full_time_weekly_hours: Decimal::from(30),
///     full_time_monthly_hours: Decimal::from(130),
///     fte_monthly_hours: Decimal::from(120),
///     ale_employee_threshold: 50,
/// };
/// assert!(is_full_time_month(Decimal::from(130), &measurement));
/// assert!(!is_full_time_month(Decimal::from(129), &measurement));
/// ```
pub fn is_full_time_month(hours_of_service: Decimal, measurement: &MeasurementConfig) -> bool {
    hours_of_service >= measurement.full_time_monthly_hours
}

/// Determines full-time status under the look-back measurement method.
///
/// Hours from every month that overlaps `period` are summed and divided
/// by the period length in weeks (`days / 7`). Months outside the period
/// are ignored. The comparison against the weekly threshold uses the
/// unrounded average.
///
/// # Errors
///
/// Returns `InvalidInput` if the period ends before it starts, a month is
/// outside 1..=12, a month appears twice, hours are negative, or the
/// summed hours overflow a `Decimal`.
pub fn determine_full_time_status(
    hours: &[MonthlyHours],
    period: &MeasurementPeriod,
    measurement: &MeasurementConfig,
) -> EngineResult<FullTimeDetermination> {
    let days = period.days()?;

    let mut seen = HashSet::new();
    for entry in hours {
        entry.first_day()?;
        if entry.hours_of_service < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "hours_of_service",
                format!(
                    "must not be negative for {}-{:02} (got {})",
                    entry.year, entry.month, entry.hours_of_service
                ),
            ));
        }
        if !seen.insert((entry.year, entry.month)) {
            return Err(EngineError::invalid_input(
                "hours",
                format!("{}-{:02} appears more than once", entry.year, entry.month),
            ));
        }
    }

    let counted: Vec<&MonthlyHours> = hours
        .iter()
        .filter(|entry| period.overlaps_month(entry.year, entry.month))
        .collect();

    let total_hours = counted
        .iter()
        .try_fold(Decimal::ZERO, |total, entry| {
            total.checked_add(entry.hours_of_service)
        })
        .ok_or_else(|| EngineError::invalid_input("hours_of_service", "amount too large"))?;
    let weeks = Decimal::from(days) / DAYS_PER_WEEK;
    let average = total_hours
        .checked_div(weeks)
        .ok_or_else(|| EngineError::invalid_input("hours_of_service", "amount too large"))?;
    let is_full_time = average >= measurement.full_time_weekly_hours;
    let average_weekly_hours =
        average.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let months_counted = counted.len() as u32;

    let audit_step = AuditStep {
        step_number: 1,
        rule_id: "full_time_look_back".to_string(),
        rule_name: "Look-Back Measurement Method".to_string(),
        clause_ref: "54.4980H-3(d)".to_string(),
        input: serde_json::json!({
            "period_start": period.start.to_string(),
            "period_end": period.end.to_string(),
            "months_supplied": hours.len(),
            "full_time_weekly_hours": measurement.full_time_weekly_hours.normalize().to_string(),
        }),
        output: serde_json::json!({
            "months_counted": months_counted,
            "total_hours": total_hours.normalize().to_string(),
            "average_weekly_hours": average_weekly_hours.normalize().to_string(),
            "is_full_time": is_full_time,
        }),
        reasoning: format!(
            "{} hours over {} days ({} weeks) averages {} hours/week, {} the {}-hour threshold",
            total_hours.normalize(),
            days,
            weeks.round_dp(2).normalize(),
            average_weekly_hours.normalize(),
            if is_full_time { "meeting" } else { "below" },
            measurement.full_time_weekly_hours.normalize()
        ),
    };

    Ok(FullTimeDetermination {
        is_full_time,
        total_hours,
        weeks,
        average_weekly_hours,
        months_counted,
        audit_step,
    })
}
