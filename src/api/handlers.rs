//! HTTP request handlers for the ACA engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    SafeHarborAdvisor, calculate_penalty, determine_ale_status, determine_full_time_status,
    evaluate_affordability,
};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditTrace, MeasurementPeriod, PenaltyAssessment, SafeHarborMethod, WorkforceFacts,
};

use super::request::{
    AffordabilityRequest, AleStatusRequest, FullTimeStatusRequest, PenaltyRequest,
    RecommendationRequest,
};
use super::response::{AffordabilityResponse, ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/penalty", post(penalty_handler))
        .route("/affordability", post(affordability_handler))
        .route("/safe-harbor/recommend", post(recommend_handler))
        .route("/full-time-status", post(full_time_status_handler))
        .route("/ale-status", post(ale_status_handler))
        .with_state(state)
}

/// Handler for POST /penalty endpoint.
///
/// Looks up the rates for the tax year and returns a penalty assessment.
async fn penalty_handler(
    State(state): State<AppState>,
    payload: Result<Json<PenaltyRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing penalty request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let tax_year = request.tax_year;
    let facts: WorkforceFacts = request.workforce.into();

    match perform_assessment(tax_year, &facts, state.config()) {
        Ok(assessment) => {
            info!(
                correlation_id = %correlation_id,
                tax_year,
                total_fte = facts.total_fte,
                total = %assessment.result.total,
                duration_us = assessment.audit_trace.duration_us,
                "Penalty assessment completed successfully"
            );
            json_response(StatusCode::OK, assessment)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                tax_year,
                error = %err,
                "Penalty assessment failed"
            );
            error_response(err)
        }
    }
}

/// Handler for POST /affordability endpoint.
///
/// Tests one employee against the requested safe harbor, or against every
/// safe harbor their data supports when none is named.
async fn affordability_handler(
    State(state): State<AppState>,
    payload: Result<Json<AffordabilityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing affordability request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match perform_affordability(&request, state.config()) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %response.employee_id,
                plan_year = response.plan_year,
                methods_evaluated = response.outcomes.len(),
                "Affordability test completed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Affordability test failed"
            );
            error_response(err)
        }
    }
}

/// Handler for POST /safe-harbor/recommend endpoint.
async fn recommend_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing safe harbor recommendation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = state
        .config()
        .get_affordability_parameters(request.plan_year)
        .and_then(|params| SafeHarborAdvisor::new().recommend(&request.employees, &params));

    match result {
        Ok(recommendation) => {
            info!(
                correlation_id = %correlation_id,
                plan_year = request.plan_year,
                population = request.employees.len(),
                method = %recommendation.method,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Safe harbor recommendation completed successfully"
            );
            json_response(StatusCode::OK, recommendation)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Safe harbor recommendation failed"
            );
            error_response(err)
        }
    }
}

/// Handler for POST /full-time-status endpoint.
async fn full_time_status_handler(
    State(state): State<AppState>,
    payload: Result<Json<FullTimeStatusRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing full-time status request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let period: MeasurementPeriod = request.measurement_period.into();

    match determine_full_time_status(&request.hours, &period, state.config().measurement()) {
        Ok(determination) => {
            info!(
                correlation_id = %correlation_id,
                is_full_time = determination.is_full_time,
                average_weekly_hours = %determination.average_weekly_hours,
                "Full-time determination completed successfully"
            );
            json_response(StatusCode::OK, determination)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Full-time determination failed"
            );
            error_response(err)
        }
    }
}

/// Handler for POST /ale-status endpoint.
async fn ale_status_handler(
    State(state): State<AppState>,
    payload: Result<Json<AleStatusRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing ALE status request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match determine_ale_status(&request.months, state.config().measurement()) {
        Ok(determination) => {
            info!(
                correlation_id = %correlation_id,
                is_ale = determination.is_ale,
                average_employees = determination.average_employees,
                "ALE determination completed successfully"
            );
            json_response(StatusCode::OK, determination)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "ALE determination failed"
            );
            error_response(err)
        }
    }
}

/// Performs the penalty calculation and wraps it in an assessment.
fn perform_assessment(
    tax_year: i32,
    facts: &WorkforceFacts,
    config: &ConfigLoader,
) -> EngineResult<PenaltyAssessment> {
    let start_time = Instant::now();

    let rates = config.get_penalty_rates(tax_year)?;
    let calculation = calculate_penalty(facts, &rates)?;
    let monthly_total = calculation.result.monthly_total();

    let duration_us = start_time.elapsed().as_micros() as u64;

    Ok(PenaltyAssessment {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        tax_year,
        rates,
        result: calculation.result,
        monthly_total,
        audit_trace: AuditTrace {
            steps: calculation.audit_steps,
            warnings: calculation.warnings,
            duration_us,
        },
    })
}

/// Evaluates the requested safe harbor, or every supported one.
fn perform_affordability(
    request: &AffordabilityRequest,
    config: &ConfigLoader,
) -> EngineResult<AffordabilityResponse> {
    let params = config.get_affordability_parameters(request.plan_year)?;
    let employee = &request.employee;

    let mut outcomes = Vec::new();
    let mut unsupported_methods = Vec::new();

    match request.method {
        Some(method) => outcomes.push(evaluate_affordability(method, employee, &params)?),
        None => {
            for method in SafeHarborMethod::ALL {
                match evaluate_affordability(method, employee, &params) {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(EngineError::InsufficientData { .. }) => unsupported_methods.push(method),
                    Err(err) => return Err(err),
                }
            }
        }
    }

    Ok(AffordabilityResponse {
        employee_id: employee.employee_id.clone(),
        plan_year: request.plan_year,
        outcomes,
        unsupported_methods,
    })
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(err: EngineError) -> Response {
    ApiErrorResponse::from(err).into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::WorkforceRequest;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/aca").expect("Failed to load config");
        AppState::new(config)
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn penalty_request(tax_year: i32, not_offered: i64, unaffordable: i64) -> PenaltyRequest {
        PenaltyRequest {
            tax_year,
            workforce: WorkforceRequest {
                total_fte: 4521,
                employees_not_offered: not_offered,
                employees_unaffordable: unaffordable,
                subsidy_recipients: 8,
            },
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_penalty_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&penalty_request(2024, 0, 12)).unwrap();

        let response = router.oneshot(post_json("/penalty", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let assessment: PenaltyAssessment = serde_json::from_slice(&body).unwrap();

        assert_eq!(assessment.tax_year, 2024);
        assert_eq!(assessment.result.total, Decimal::from(53520));
        assert_eq!(assessment.monthly_total, Decimal::from(4460));
        assert_eq!(assessment.audit_trace.steps.len(), 3);
    }

    #[tokio::test]
    async fn test_penalty_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/penalty", "{invalid json".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = body_json(response).await;
        assert_eq!(error["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_penalty_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let body = r#"{"tax_year": 2025, "workforce": {"total_fte": 100}}"#.to_string();

        let response = router.oneshot(post_json("/penalty", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = body_json(response).await;
        assert_eq!(error["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_penalty_unsupported_year_returns_400() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&penalty_request(2019, 0, 12)).unwrap();

        let response = router.oneshot(post_json("/penalty", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = body_json(response).await;
        assert_eq!(error["code"], "UNSUPPORTED_TAX_YEAR");
    }

    #[tokio::test]
    async fn test_penalty_negative_count_returns_invalid_input() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&penalty_request(2025, -1, 0)).unwrap();

        let response = router.oneshot(post_json("/penalty", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = body_json(response).await;
        assert_eq!(error["code"], "INVALID_INPUT");
        assert_eq!(error["details"], "employees_not_offered");
    }

    #[test]
    fn test_perform_affordability_skips_unsupported_methods() {
        let config = ConfigLoader::load("./config/aca").unwrap();
        let request: AffordabilityRequest = serde_json::from_str(
            r#"{
                "plan_year": 2025,
                "employee": {
                    "employee_id": "E001",
                    "pay_type": "hourly",
                    "hourly_rate": "20",
                    "monthly_contribution": "100"
                }
            }"#,
        )
        .unwrap();

        let response = perform_affordability(&request, &config).unwrap();

        let methods: Vec<SafeHarborMethod> = response.outcomes.iter().map(|o| o.method).collect();
        assert_eq!(
            methods,
            vec![SafeHarborMethod::FederalPovertyLine, SafeHarborMethod::RateOfPay]
        );
        assert_eq!(response.unsupported_methods, vec![SafeHarborMethod::W2]);
    }

    #[test]
    fn test_perform_assessment_uses_tax_year_rates() {
        let config = ConfigLoader::load("./config/aca").unwrap();
        let facts = WorkforceFacts {
            total_fte: 100,
            employees_not_offered: 0,
            employees_unaffordable: 1,
            subsidy_recipients: 1,
        };

        let assessment = perform_assessment(2026, &facts, &config).unwrap();

        assert_eq!(assessment.rates.rate_b, Decimal::from(5010));
        assert_eq!(assessment.result.total, Decimal::from(5010));
        assert_eq!(assessment.engine_version, env!("CARGO_PKG_VERSION"));
    }
}
