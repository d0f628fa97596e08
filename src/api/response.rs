//! Response types for the TJM engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API, plus the body of the `/defaults` endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{ExpenseLedger, TaxParameters, TimeAllocationParameters};

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

    /// Creates an invalid year error response.
    pub fn invalid_year(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self::with_details(
            "INVALID_YEAR",
            format!("Invalid year: {}", raw),
            "The year must be an integer such as 2025",
        )
    }

    /// Creates the error returned when the result cache is empty.
    pub fn no_cached_result() -> Self {
        Self::with_details(
            "NO_CACHED_RESULT",
            "No rate calculation has been cached yet",
            "POST /rates first",
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

impl ApiErrorResponse {
    /// Pairs an error body with a status code.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
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
            EngineError::InvalidParameter { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PARAMETER",
                    format!("Invalid parameter '{}': {}", field, message),
                    field,
                ),
            },
            EngineError::TaxRateOutOfRange { combined_percent } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "TAX_RATE_OUT_OF_RANGE",
                    format!(
                        "Combined tax rate {}% must be below 100%",
                        combined_percent.normalize()
                    ),
                    "Income tax, social charges and other taxes together leave no net revenue",
                ),
            },
            EngineError::CacheIo { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CACHE_ERROR",
                    "Result cache error",
                    format!("{}: {}", path, message),
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CALCULATION_ERROR",
                    "Calculation failed",
                    message,
                ),
            },
        }
    }
}

/// Body of the `/defaults` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsResponse {
    /// Default time allocation.
    pub time_allocation: TimeAllocationParameters,
    /// Default tax rates.
    pub taxes: TaxParameters,
    /// VAT rate, in percent.
    pub vat_percent: Decimal,
    /// Zeroed personal ledger with the standard categories.
    pub personal_expenses: ExpenseLedger,
    /// Zeroed professional ledger with the standard categories.
    pub professional_expenses: ExpenseLedger,
}
