//! Core data models for the ACA engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod compensation;
mod hours;
mod penalty_result;
mod safe_harbor;
mod workforce;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use compensation::{EmployeeCompensation, PayType, PovertyLineRegion};
pub use hours::{MeasurementPeriod, MonthlyHours, WorkforceMonth};
pub use penalty_result::{PenaltyAssessment, PenaltyResult};
pub use safe_harbor::SafeHarborMethod;
pub use workforce::WorkforceFacts;
