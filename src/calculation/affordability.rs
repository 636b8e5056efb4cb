//! Affordability safe harbor testing.
//!
//! An offer is affordable when the employee's share of the lowest-cost
//! self-only premium does not exceed the indexed affordability percentage
//! of a proxy for household income. The three IRS safe harbors differ only
//! in which proxy they use:
//!
//! - **W-2**: Box 1 wages for the year (compared annually)
//! - **Rate of pay**: hourly rate × 130, or monthly salary (compared monthly)
//! - **Federal poverty line**: single-individual FPL ÷ 12 (compared monthly)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AffordabilityParameters;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeCompensation, PayType, SafeHarborMethod};

/// Hours per month assumed by the rate of pay safe harbor for hourly staff.
pub const RATE_OF_PAY_MONTHLY_HOURS: Decimal = Decimal::from_parts(130, 0, 0, false, 0);

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// The period a contribution and threshold are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionPeriod {
    /// Per month.
    Monthly,
    /// Per year.
    Annual,
}

/// The outcome of testing one employee against one safe harbor.
///
/// `contribution` and `threshold` are in the same `period`, so the test is
/// simply `contribution <= threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffordabilityOutcome {
    /// The employee tested.
    pub employee_id: String,
    /// The safe harbor applied.
    pub method: SafeHarborMethod,
    /// The Form 1095-C line 16 code the method supports.
    pub line_16_code: String,
    /// The employee's required contribution.
    pub contribution: Decimal,
    /// The most the employee may be asked to contribute.
    pub threshold: Decimal,
    /// The period both amounts are expressed in.
    pub period: ContributionPeriod,
    /// Whether the offer is affordable under this method.
    pub is_affordable: bool,
}

/// Tests an employee's offer against one safe harbor.
///
/// # Errors
///
/// - `InvalidInput` if any compensation amount is negative, or so large
///   the annualized or scaled figure does not fit in a `Decimal`
/// - `InsufficientData` if the employee record lacks what the method needs
///   (W-2 wages, hourly rate, or monthly salary)
///
/// # Examples
///
/// ```
/// use aca_engine::calculation::evaluate_affordability;
/// use aca_engine::config::{AffordabilityParameters, PovertyLineTable};
/// use aca_engine::models::{EmployeeCompensation, PayType, PovertyLineRegion, SafeHarborMethod};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let params = AffordabilityParameters {
///     plan_year: 2023,
///     affordability_percentage: Decimal::from_str("0.0912").unwrap(),
///     federal_poverty_line: PovertyLineTable {
///         contiguous: Decimal::from(13590),
///         alaska: Decimal::from(16990),
///         hawaii: Decimal::from(15630),
///     },
/// };
/// let employee = EmployeeCompensation {
///     employee_id: "E001".to_string(),
///     pay_type: PayType::Salaried,
///     w2_box1_wages: Some(Decimal::from(40000)),
///     hourly_rate: None,
///     monthly_salary: None,
///     monthly_contribution: Decimal::from(300),
///     poverty_line_region: PovertyLineRegion::Contiguous,
/// };
///
/// let outcome = evaluate_affordability(SafeHarborMethod::W2, &employee, &params)?;
/// // $300 × 12 = $3,600 <= $40,000 × 9.12% = $3,648
/// assert_eq!(outcome.threshold, Decimal::from(3648));
/// assert!(outcome.is_affordable);
/// # Ok::<(), aca_engine::error::EngineError>(())
/// ```
pub fn evaluate_affordability(
    method: SafeHarborMethod,
    employee: &EmployeeCompensation,
    params: &AffordabilityParameters,
) -> EngineResult<AffordabilityOutcome> {
    employee.validate()?;

    let pct = params.affordability_percentage;
    let (contribution, threshold, period) = match method {
        SafeHarborMethod::W2 => {
            let wages = require(employee, method, "w2_box1_wages", employee.w2_box1_wages)?;
            (
                checked_mul(
                    employee.monthly_contribution,
                    MONTHS_PER_YEAR,
                    "monthly_contribution",
                )?,
                checked_mul(wages, pct, "w2_box1_wages")?,
                ContributionPeriod::Annual,
            )
        }
        SafeHarborMethod::RateOfPay => {
            let (monthly_pay, field) = match employee.pay_type {
                PayType::Hourly => {
                    let rate = require(employee, method, "hourly_rate", employee.hourly_rate)?;
                    (
                        checked_mul(rate, RATE_OF_PAY_MONTHLY_HOURS, "hourly_rate")?,
                        "hourly_rate",
                    )
                }
                PayType::Salaried => (
                    require(employee, method, "monthly_salary", employee.monthly_salary)?,
                    "monthly_salary",
                ),
            };
            (
                employee.monthly_contribution,
                checked_mul(monthly_pay, pct, field)?,
                ContributionPeriod::Monthly,
            )
        }
        SafeHarborMethod::FederalPovertyLine => {
            let fpl = params
                .federal_poverty_line
                .single_individual(employee.poverty_line_region);
            (
                employee.monthly_contribution,
                checked_mul(fpl / MONTHS_PER_YEAR, pct, "federal_poverty_line")?,
                ContributionPeriod::Monthly,
            )
        }
    };

    Ok(AffordabilityOutcome {
        employee_id: employee.employee_id.clone(),
        method,
        line_16_code: method.code().to_string(),
        contribution,
        threshold,
        period,
        is_affordable: contribution <= threshold,
    })
}

/// Returns whether an employee's offer is affordable under `method`.
///
/// See [`evaluate_affordability`] for the formulas and error conditions.
pub fn is_affordable(
    method: SafeHarborMethod,
    employee: &EmployeeCompensation,
    params: &AffordabilityParameters,
) -> EngineResult<bool> {
    evaluate_affordability(method, employee, params).map(|outcome| outcome.is_affordable)
}

fn require(
    employee: &EmployeeCompensation,
    method: SafeHarborMethod,
    field: &str,
    value: Option<Decimal>,
) -> EngineResult<Decimal> {
    value.ok_or_else(|| EngineError::InsufficientData {
        employee_id: employee.employee_id.clone(),
        method: method.to_string(),
        field: field.to_string(),
    })
}

fn checked_mul(value: Decimal, factor: Decimal, field: &str) -> EngineResult<Decimal> {
    value
        .checked_mul(factor)
        .ok_or_else(|| EngineError::invalid_input(field, "amount too large"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PovertyLineTable;
    use crate::models::PovertyLineRegion;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn params(pct: &str) -> AffordabilityParameters {
        AffordabilityParameters {
            plan_year: 2025,
            affordability_percentage: dec(pct),
            federal_poverty_line: PovertyLineTable {
                contiguous: dec("15060"),
                alaska: dec("18810"),
                hawaii: dec("17310"),
            },
        }
    }

    fn employee(pay_type: PayType, monthly_contribution: &str) -> EmployeeCompensation {
        EmployeeCompensation {
            employee_id: "E001".to_string(),
            pay_type,
            w2_box1_wages: None,
            hourly_rate: None,
            monthly_salary: None,
            monthly_contribution: dec(monthly_contribution),
            poverty_line_region: PovertyLineRegion::Contiguous,
        }
    }

    // ==========================================================================
    // W-2 safe harbor
    // ==========================================================================
    #[test]
    fn test_w2_scenario_affordable() {
        let mut emp = employee(PayType::Salaried, "300");
        emp.w2_box1_wages = Some(dec("40000"));

        let outcome = evaluate_affordability(SafeHarborMethod::W2, &emp, &params("0.0912")).unwrap();

        assert_eq!(outcome.contribution, dec("3600"));
        assert_eq!(outcome.threshold, dec("3648"));
        assert_eq!(outcome.period, ContributionPeriod::Annual);
        assert_eq!(outcome.line_16_code, "2F");
        assert!(outcome.is_affordable);
    }

    #[test]
    fn test_w2_exactly_at_threshold_is_affordable() {
        let mut emp = employee(PayType::Salaried, "304");
        emp.w2_box1_wages = Some(dec("40000"));

        assert!(is_affordable(SafeHarborMethod::W2, &emp, &params("0.0912")).unwrap());
    }

    #[test]
    fn test_w2_one_dollar_over_is_unaffordable() {
        let mut emp = employee(PayType::Salaried, "305");
        emp.w2_box1_wages = Some(dec("40000"));

        assert!(!is_affordable(SafeHarborMethod::W2, &emp, &params("0.0912")).unwrap());
    }

    #[test]
    fn test_w2_without_wages_is_insufficient_data() {
        let emp = employee(PayType::Hourly, "100");

        match evaluate_affordability(SafeHarborMethod::W2, &emp, &params("0.0902")) {
            Err(EngineError::InsufficientData { method, field, .. }) => {
                assert_eq!(method, "w2");
                assert_eq!(field, "w2_box1_wages");
            }
            other => panic!("Expected InsufficientData, got {:?}", other),
        }
    }

    // ==========================================================================
    // Rate of pay safe harbor
    // ==========================================================================
    #[test]
    fn test_rate_of_pay_hourly_uses_130_hours() {
        let mut emp = employee(PayType::Hourly, "200");
        emp.hourly_rate = Some(dec("15.00"));

        let outcome =
            evaluate_affordability(SafeHarborMethod::RateOfPay, &emp, &params("0.0902")).unwrap();

        // 15 × 130 × 0.0902 = 175.89
        assert_eq!(outcome.threshold, dec("175.89"));
        assert_eq!(outcome.period, ContributionPeriod::Monthly);
        assert_eq!(outcome.line_16_code, "2H");
        assert!(!outcome.is_affordable);
    }

    #[test]
    fn test_rate_of_pay_salaried_uses_monthly_salary() {
        let mut emp = employee(PayType::Salaried, "250");
        emp.monthly_salary = Some(dec("3000"));
        // An hourly rate on a salaried record is ignored
        emp.hourly_rate = Some(dec("1.00"));

        let outcome =
            evaluate_affordability(SafeHarborMethod::RateOfPay, &emp, &params("0.0902")).unwrap();

        // 3000 × 0.0902 = 270.6
        assert_eq!(outcome.threshold, dec("270.6"));
        assert!(outcome.is_affordable);
    }

    #[test]
    fn test_rate_of_pay_hourly_without_rate_is_insufficient_data() {
        let mut emp = employee(PayType::Hourly, "100");
        emp.monthly_salary = Some(dec("3000"));

        match evaluate_affordability(SafeHarborMethod::RateOfPay, &emp, &params("0.0902")) {
            Err(EngineError::InsufficientData { field, .. }) => assert_eq!(field, "hourly_rate"),
            other => panic!("Expected InsufficientData, got {:?}", other),
        }
    }

    // ==========================================================================
    // Federal poverty line safe harbor
    // ==========================================================================
    #[test]
    fn test_fpl_monthly_threshold() {
        let emp = employee(PayType::Hourly, "113.20");

        let outcome = evaluate_affordability(
            SafeHarborMethod::FederalPovertyLine,
            &emp,
            &params("0.0902"),
        )
        .unwrap();

        // 15060 / 12 × 0.0902 = 1255 × 0.0902 = 113.201
        assert_eq!(outcome.threshold, dec("113.201"));
        assert_eq!(outcome.line_16_code, "2G");
        assert!(outcome.is_affordable);
    }

    #[test]
    fn test_fpl_uses_employee_region() {
        let mut emp = employee(PayType::Hourly, "130");
        assert!(
            !is_affordable(SafeHarborMethod::FederalPovertyLine, &emp, &params("0.0902")).unwrap()
        );

        emp.poverty_line_region = PovertyLineRegion::Alaska;
        // 18810 / 12 × 0.0902 = 141.3885
        assert!(
            is_affordable(SafeHarborMethod::FederalPovertyLine, &emp, &params("0.0902")).unwrap()
        );
    }

    #[test]
    fn test_fpl_needs_no_wage_data() {
        let emp = employee(PayType::Salaried, "0");
        assert!(
            is_affordable(SafeHarborMethod::FederalPovertyLine, &emp, &params("0.0902")).unwrap()
        );
    }

    #[test]
    fn test_negative_contribution_is_invalid_input() {
        let emp = employee(PayType::Hourly, "-5");

        let result = is_affordable(SafeHarborMethod::FederalPovertyLine, &emp, &params("0.0902"));
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_huge_contribution_is_invalid_input() {
        let mut emp = employee(PayType::Salaried, "0");
        emp.monthly_contribution = Decimal::MAX;
        emp.w2_box1_wages = Some(dec("40000"));

        match evaluate_affordability(SafeHarborMethod::W2, &emp, &params("0.0912")) {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "monthly_contribution");
                assert_eq!(message, "amount too large");
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_hourly_rate_is_invalid_input() {
        let mut emp = employee(PayType::Hourly, "100");
        emp.hourly_rate = Some(Decimal::MAX);

        match evaluate_affordability(SafeHarborMethod::RateOfPay, &emp, &params("0.0902")) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "hourly_rate"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_wages_still_compare() {
        let mut emp = employee(PayType::Salaried, "300");
        emp.w2_box1_wages = Some(Decimal::MAX);

        // A percentage below one shrinks the wages, so nothing overflows
        assert!(is_affordable(SafeHarborMethod::W2, &emp, &params("0.0912")).unwrap());
    }

    #[test]
    fn test_percentage_comes_from_parameters() {
        let mut emp = employee(PayType::Salaried, "300");
        emp.w2_box1_wages = Some(dec("40000"));

        // 8.39% of 40000 = 3356, below the 3600 annual contribution
        assert!(!is_affordable(SafeHarborMethod::W2, &emp, &params("0.0839")).unwrap());
        assert!(is_affordable(SafeHarborMethod::W2, &emp, &params("0.0912")).unwrap());
    }
}
