//! HTTP API module for the ACA engine.
//!
//! This module provides the REST API endpoints for penalty estimation,
//! affordability testing, safe harbor recommendation, and full-time and
//! ALE determinations.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AffordabilityRequest, AleStatusRequest, FullTimeStatusRequest, MeasurementPeriodRequest,
    PenaltyRequest, RecommendationRequest, WorkforceRequest,
};
pub use response::{AffordabilityResponse, ApiError};
pub use state::AppState;
