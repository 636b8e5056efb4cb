//! Hours-of-service and headcount models for full-time and ALE measurement.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Hours of service credited to one employee for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyHours {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
    /// Hours worked plus hours paid but not worked (leave, holidays).
    pub hours_of_service: Decimal,
}

impl MonthlyHours {
    /// Returns the first day of the month, or an error if `month` is out
    /// of range.
    pub fn first_day(&self) -> EngineResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| {
            EngineError::invalid_input(
                "month",
                format!("{}-{} is not a calendar month", self.year, self.month),
            )
        })
    }
}

/// A look-back measurement period, inclusive of both ends.
///
/// # Example
///
/// ```
/// use aca_engine::models::MeasurementPeriod;
/// use chrono::NaiveDate;
///
/// let period = MeasurementPeriod {
///     start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     end: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
/// };
/// assert_eq!(period.days().unwrap(), 365);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementPeriod {
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period.
    pub end: NaiveDate,
}

impl MeasurementPeriod {
    /// Returns the number of days in the period.
    pub fn days(&self) -> EngineResult<i64> {
        if self.end < self.start {
            return Err(EngineError::invalid_input(
                "measurement_period",
                format!("end {} is before start {}", self.end, self.start),
            ));
        }
        Ok((self.end - self.start).num_days() + 1)
    }

    /// Returns true if any day of the given month falls inside the period.
    pub fn overlaps_month(&self, year: i32, month: u32) -> bool {
        let starts_before_end = (year, month) <= (self.end.year(), self.end.month());
        let ends_after_start = (year, month) >= (self.start.year(), self.start.month());
        starts_before_end && ends_after_start
    }
}

/// Employer-wide headcount for one month of the prior calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkforceMonth {
    /// Calendar month, 1 through 12.
    pub month: u32,
    /// Full-time employees (130+ hours of service) in the month.
    pub full_time_employees: u32,
    /// Combined hours of service of all other employees, each already
    /// capped at 120 for the month.
    pub part_time_hours: Decimal,
}
