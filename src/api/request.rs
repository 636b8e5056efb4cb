//! Request types for the ACA engine API.
//!
//! This module defines the JSON request bodies for every endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    EmployeeCompensation, MeasurementPeriod, MonthlyHours, SafeHarborMethod, WorkforceFacts,
    WorkforceMonth,
};

/// Request body for the `/penalty` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyRequest {
    /// The tax year whose rates apply.
    pub tax_year: i32,
    /// Aggregate coverage facts for the year.
    pub workforce: WorkforceRequest,
}

/// Workforce coverage facts in a penalty request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkforceRequest {
    /// Full-time employees, including full-time equivalents.
    pub total_fte: i64,
    /// Full-time employees not offered coverage.
    pub employees_not_offered: i64,
    /// Full-time employees with an unaffordable offer.
    pub employees_unaffordable: i64,
    /// Full-time employees who received a Marketplace subsidy.
    pub subsidy_recipients: i64,
}

/// Request body for the `/affordability` endpoint.
///
/// When `method` is omitted every safe harbor the employee's data supports
/// is evaluated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityRequest {
    /// The plan year whose affordability percentage applies.
    pub plan_year: i32,
    /// The safe harbor to test, or all of them.
    #[serde(default)]
    pub method: Option<SafeHarborMethod>,
    /// The employee to test.
    pub employee: EmployeeCompensation,
}

/// Request body for the `/safe-harbor/recommend` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// The plan year whose affordability percentage applies.
    pub plan_year: i32,
    /// The employee population to evaluate.
    #[serde(default)]
    pub employees: Vec<EmployeeCompensation>,
}

/// Request body for the `/full-time-status` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullTimeStatusRequest {
    /// The standard measurement period.
    pub measurement_period: MeasurementPeriodRequest,
    /// Hours of service by month.
    #[serde(default)]
    pub hours: Vec<MonthlyHours>,
}

/// Measurement period information in a full-time status request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementPeriodRequest {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

/// Request body for the `/ale-status` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AleStatusRequest {
    /// Headcounts for each month of the prior calendar year.
    pub months: Vec<WorkforceMonth>,
}

impl From<WorkforceRequest> for WorkforceFacts {
    fn from(req: WorkforceRequest) -> Self {
        WorkforceFacts {
            total_fte: req.total_fte,
            employees_not_offered: req.employees_not_offered,
            employees_unaffordable: req.employees_unaffordable,
            subsidy_recipients: req.subsidy_recipients,
        }
    }
}

impl From<MeasurementPeriodRequest> for MeasurementPeriod {
    fn from(req: MeasurementPeriodRequest) -> Self {
        MeasurementPeriod {
            start: req.start_date,
            end: req.end_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayType;
    use rust_decimal::Decimal;

    #[test]
    fn test_deserialize_penalty_request() {
        let json = r#"{
            "tax_year": 2024,
            "workforce": {
                "total_fte": 4521,
                "employees_not_offered": 0,
                "employees_unaffordable": 12,
                "subsidy_recipients": 8
            }
        }"#;

        let request: PenaltyRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.tax_year, 2024);

        let facts: WorkforceFacts = request.workforce.into();
        assert_eq!(facts.total_fte, 4521);
        assert_eq!(facts.employees_unaffordable, 12);
    }

    #[test]
    fn test_affordability_request_method_is_optional() {
        let json = r#"{
            "plan_year": 2025,
            "employee": {
                "employee_id": "E001",
                "pay_type": "hourly",
                "hourly_rate": "18.50",
                "monthly_contribution": "150"
            }
        }"#;

        let request: AffordabilityRequest = serde_json::from_str(json).unwrap();
        assert!(request.method.is_none());
        assert_eq!(request.employee.pay_type, PayType::Hourly);
        assert_eq!(request.employee.hourly_rate, Some(Decimal::new(1850, 2)));
    }

    #[test]
    fn test_affordability_request_with_method() {
        let json = r#"{
            "plan_year": 2025,
            "method": "federal_poverty_line",
            "employee": {
                "employee_id": "E001",
                "pay_type": "salaried",
                "monthly_contribution": "100"
            }
        }"#;

        let request: AffordabilityRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.method, Some(SafeHarborMethod::FederalPovertyLine));
    }

    #[test]
    fn test_deserialize_full_time_status_request() {
        let json = r#"{
            "measurement_period": {
                "start_date": "2024-10-15",
                "end_date": "2025-10-14"
            },
            "hours": [
                {"year": 2024, "month": 10, "hours_of_service": "140"},
                {"year": 2024, "month": 11, "hours_of_service": "132.5"}
            ]
        }"#;

        let request: FullTimeStatusRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.hours.len(), 2);

        let period: MeasurementPeriod = request.measurement_period.into();
        assert_eq!(period.days().unwrap(), 365);
    }

    #[test]
    fn test_deserialize_ale_status_request() {
        let json = r#"{
            "months": [
                {"month": 1, "full_time_employees": 40, "part_time_hours": "1200"}
            ]
        }"#;

        let request: AleStatusRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.months[0].full_time_employees, 40);
    }
}
