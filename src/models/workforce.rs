//! Workforce coverage facts.
//!
//! This module defines [`WorkforceFacts`], the aggregate headcounts the
//! penalty engine works from.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Aggregate coverage facts for an employer's full-time workforce.
///
/// Counts are signed so that bad upstream data (negative counts, blank
/// fields coerced to odd values) reaches [`WorkforceFacts::validate`] and is
/// rejected there instead of being silently computed with.
///
/// `employees_not_offered` and `employees_unaffordable` may overlap, so
/// their sum is allowed to exceed `total_fte`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkforceFacts {
    /// Full-time employees (including full-time equivalents) for the year.
    pub total_fte: i64,
    /// Full-time employees who were not offered minimum essential coverage.
    pub employees_not_offered: i64,
    /// Full-time employees whose offer was unaffordable or not minimum value.
    pub employees_unaffordable: i64,
    /// Full-time employees who received a premium tax credit on the Marketplace.
    pub subsidy_recipients: i64,
}

impl WorkforceFacts {
    /// Checks that every count is non-negative and that no sub-count
    /// exceeds `total_fte`.
    ///
    /// # Examples
    ///
    /// ```
    /// use aca_engine::models::WorkforceFacts;
    ///
    /// let facts = WorkforceFacts {
    ///     total_fte: 100,
    ///     employees_not_offered: 10,
    ///     employees_unaffordable: 120,
    ///     subsidy_recipients: 1,
    /// };
    /// assert!(facts.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        let counts = [
            ("total_fte", self.total_fte),
            ("employees_not_offered", self.employees_not_offered),
            ("employees_unaffordable", self.employees_unaffordable),
            ("subsidy_recipients", self.subsidy_recipients),
        ];

        for (field, value) in counts {
            if value < 0 {
                return Err(EngineError::invalid_input(
                    field,
                    format!("must not be negative (got {})", value),
                ));
            }
        }

        for (field, value) in &counts[1..] {
            if *value > self.total_fte {
                return Err(EngineError::invalid_input(
                    *field,
                    format!(
                        "{} exceeds total_fte of {}",
                        value, self.total_fte
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Returns true when the not-offered and unaffordable groups together
    /// are larger than the workforce, meaning they must overlap.
    pub fn categories_overlap(&self) -> bool {
        self.employees_not_offered
            .saturating_add(self.employees_unaffordable)
            > self.total_fte
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(total: i64, not_offered: i64, unaffordable: i64, subsidy: i64) -> WorkforceFacts {
        WorkforceFacts {
            total_fte: total,
            employees_not_offered: not_offered,
            employees_unaffordable: unaffordable,
            subsidy_recipients: subsidy,
        }
    }

    #[test]
    fn test_valid_facts_pass() {
        assert!(facts(4521, 0, 12, 8).validate().is_ok());
        assert!(facts(0, 0, 0, 0).validate().is_ok());
    }

    #[test]
    fn test_negative_total_is_rejected() {
        match facts(-1, 0, 0, 0).validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "total_fte"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_sub_count_is_rejected() {
        match facts(100, 0, -3, 0).validate() {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "employees_unaffordable");
                assert!(message.contains("-3"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_sub_count_above_total_is_rejected() {
        match facts(50, 51, 0, 0).validate() {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "employees_not_offered")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }

        match facts(50, 0, 0, 60).validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "subsidy_recipients"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_overlapping_categories_are_allowed() {
        let overlapping = facts(100, 60, 60, 5);
        assert!(overlapping.validate().is_ok());
        assert!(overlapping.categories_overlap());
        assert!(!facts(100, 40, 60, 5).categories_overlap());
    }

    #[test]
    fn test_deserialize_facts() {
        let json = r#"{
            "total_fte": 100,
            "employees_not_offered": 10,
            "employees_unaffordable": 0,
            "subsidy_recipients": 1
        }"#;

        let parsed: WorkforceFacts = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, facts(100, 10, 0, 1));
    }
}
