//! Employee compensation facts used for affordability testing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How an employee is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayType {
    /// Paid by the hour.
    Hourly,
    /// Paid a fixed salary.
    Salaried,
}

/// Which poverty guideline applies to the employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PovertyLineRegion {
    /// The 48 contiguous states and the District of Columbia.
    #[default]
    Contiguous,
    /// Alaska.
    Alaska,
    /// Hawaii.
    Hawaii,
}

/// The compensation and premium facts for one employee.
///
/// Only the fields a given safe harbor needs have to be present: W-2
/// wages for the W-2 method, an hourly rate or monthly salary for the rate
/// of pay method. `monthly_contribution` is the employee share of the
/// lowest-cost self-only plan.
///
/// # Example
///
/// ```
/// use aca_engine::models::{EmployeeCompensation, PayType};
///
/// let json = r#"{
///     "employee_id": "E001",
///     "pay_type": "hourly",
///     "hourly_rate": "18.50",
///     "monthly_contribution": "150.00"
/// }"#;
/// let employee: EmployeeCompensation = serde_json::from_str(json).unwrap();
/// assert_eq!(employee.pay_type, PayType::Hourly);
/// assert!(employee.w2_box1_wages.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCompensation {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// How the employee is paid.
    pub pay_type: PayType,
    /// Annual Form W-2 Box 1 wages.
    #[serde(default)]
    pub w2_box1_wages: Option<Decimal>,
    /// Hourly rate of pay.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Monthly salary.
    #[serde(default)]
    pub monthly_salary: Option<Decimal>,
    /// Employee share of the lowest-cost self-only premium, per month.
    pub monthly_contribution: Decimal,
    /// The poverty guideline region for the FPL safe harbor.
    #[serde(default)]
    pub poverty_line_region: PovertyLineRegion,
}

impl EmployeeCompensation {
    /// Rejects negative amounts.
    pub fn validate(&self) -> EngineResult<()> {
        let amounts = [
            ("w2_box1_wages", self.w2_box1_wages),
            ("hourly_rate", self.hourly_rate),
            ("monthly_salary", self.monthly_salary),
            ("monthly_contribution", Some(self.monthly_contribution)),
        ];

        for (field, amount) in amounts {
            if let Some(value) = amount.filter(|v| *v < Decimal::ZERO) {
                return Err(EngineError::invalid_input(
                    field,
                    format!(
                        "must not be negative for employee '{}' (got {})",
                        self.employee_id, value
                    ),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn salaried() -> EmployeeCompensation {
        EmployeeCompensation {
            employee_id: "E004".to_string(),
            pay_type: PayType::Salaried,
            w2_box1_wages: Some(dec("52000")),
            hourly_rate: None,
            monthly_salary: Some(dec("4333.33")),
            monthly_contribution: dec("210"),
            poverty_line_region: PovertyLineRegion::Contiguous,
        }
    }

    #[test]
    fn test_valid_compensation_passes() {
        assert!(salaried().validate().is_ok());
    }

    #[test]
    fn test_negative_contribution_is_rejected() {
        let mut employee = salaried();
        employee.monthly_contribution = dec("-1");

        match employee.validate() {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "monthly_contribution");
                assert!(message.contains("E004"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_wages_are_rejected() {
        let mut employee = salaried();
        employee.w2_box1_wages = Some(dec("-52000"));
        assert!(employee.validate().is_err());
    }

    #[test]
    fn test_region_defaults_to_contiguous() {
        let json = r#"{
            "employee_id": "E002",
            "pay_type": "salaried",
            "monthly_salary": "5000",
            "monthly_contribution": "120"
        }"#;

        let employee: EmployeeCompensation = serde_json::from_str(json).unwrap();
        assert_eq!(employee.poverty_line_region, PovertyLineRegion::Contiguous);
        assert_eq!(employee.monthly_salary, Some(dec("5000")));
    }

    #[test]
    fn test_pay_type_serialization() {
        assert_eq!(serde_json::to_string(&PayType::Hourly).unwrap(), "\"hourly\"");
        assert_eq!(
            serde_json::to_string(&PayType::Salaried).unwrap(),
            "\"salaried\""
        );
    }
}
