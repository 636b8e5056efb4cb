//! Calculation logic for the ACA engine.
//!
//! This module contains the 4980H(a) and 4980H(b) penalty calculations and
//! the lesser-of rule that combines them, affordability testing under the
//! three IRS safe harbors with a pluggable method recommendation, and the
//! full-time and Applicable Large Employer determinations that decide who
//! the penalties apply to.

mod affordability;
mod ale_status;
mod full_time_status;
mod no_offer_penalty;
mod penalty_engine;
mod safe_harbor_advisor;
mod unaffordable_penalty;

pub use affordability::{
    AffordabilityOutcome, ContributionPeriod, RATE_OF_PAY_MONTHLY_HOURS, evaluate_affordability,
    is_affordable,
};
pub use ale_status::{AleDetermination, MonthlyHeadcount, determine_ale_status};
pub use full_time_status::{FullTimeDetermination, determine_full_time_status, is_full_time_month};
pub use no_offer_penalty::{
    NO_OFFER_CLAUSE, NO_OFFER_EXEMPT_EMPLOYEES, NO_OFFER_TOLERANCE, NoOfferPenaltyResult,
    calculate_no_offer_penalty,
};
pub use penalty_engine::{PenaltyCalculation, apply_lesser_of, calculate_penalty};
pub use safe_harbor_advisor::{
    FewestFailures, MethodEvaluation, RecommendationStrategy, SafeHarborAdvisor,
    SafeHarborRecommendation,
};
pub use unaffordable_penalty::{
    UNAFFORDABLE_CLAUSE, UnaffordablePenaltyResult, calculate_unaffordable_penalty,
};
