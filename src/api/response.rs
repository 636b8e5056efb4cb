//! Response types for the ACA engine API.
//!
//! This module defines the affordability response body, the error response
//! structures, and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::AffordabilityOutcome;
use crate::error::EngineError;
use crate::models::SafeHarborMethod;

/// Response body for the `/affordability` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityResponse {
    /// The employee tested.
    pub employee_id: String,
    /// The plan year whose parameters were applied.
    pub plan_year: i32,
    /// One outcome per method evaluated.
    pub outcomes: Vec<AffordabilityOutcome>,
    /// Methods skipped because the employee record lacks their data.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unsupported_methods: Vec<SafeHarborMethod>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an unsupported tax year error response.
    pub fn unsupported_tax_year(year: i32) -> Self {
        Self::with_details(
            "UNSUPPORTED_TAX_YEAR",
            format!("Unsupported tax year: {}", year),
            format!("No rate table is configured for {}", year),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::UnsupportedTaxYear { year } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::unsupported_tax_year(year),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid input '{}': {}", field, message),
                    field,
                ),
            },
            EngineError::InsufficientData {
                employee_id,
                method,
                field,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INSUFFICIENT_DATA",
                    format!(
                        "Employee '{}' has no {} for the {} safe harbor",
                        employee_id, field, method
                    ),
                    "Supply the missing field or choose a different safe harbor",
                ),
            },
        }
    }
}
