//! HTTP request handlers for the TJM engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::ops::RangeInclusive;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{AuditTrace, ExpenseLedger, RateCalculation};

use super::request::RateRequest;
use super::response::{ApiError, ApiErrorResponse, DefaultsResponse};
use super::state::AppState;

/// Years the API accepts: the Gregorian calendar up to four-digit years.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1583..=9999;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calendar/:year", get(calendar_handler))
        .route("/rates", post(rates_handler))
        .route("/rates/last", get(last_rates_handler))
        .route("/defaults", get(defaults_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn check_year(year: i32) -> Result<(), Response> {
    if SUPPORTED_YEARS.contains(&year) {
        Ok(())
    } else {
        Err(ApiErrorResponse::new(
            StatusCode::BAD_REQUEST,
            ApiError::invalid_year(year.to_string()),
        )
        .into_response())
    }
}

/// Handler for GET /calendar/{year}.
///
/// Returns the working-day statistics and holiday list of the year.
async fn calendar_handler(
    State(state): State<AppState>,
    year: Result<Path<i32>, PathRejection>,
) -> Response {
    let year = match year {
        Ok(Path(year)) => year,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Invalid year in path");
            return ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::invalid_year(rejection.body_text()),
            )
            .into_response();
        }
    };
    if let Err(response) = check_year(year) {
        return response;
    }

    let stats = state.engine().year_stats(year);
    info!(
        year,
        working_days = stats.working_days,
        holiday_days = stats.holiday_days,
        "Served calendar"
    );
    json_response(StatusCode::OK, stats)
}

/// Handler for POST /rates.
///
/// Computes the day rates, caches the result and returns it.
async fn rates_handler(
    State(state): State<AppState>,
    payload: Result<Json<RateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing rate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
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
            return ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response();
        }
    };

    if let Err(response) = check_year(request.year) {
        warn!(correlation_id = %correlation_id, year = request.year, "Unsupported year");
        return response;
    }

    match perform_calculation(&request, &state) {
        Ok(calculation) => {
            info!(
                correlation_id = %correlation_id,
                calculation_id = %calculation.calculation_id,
                year = calculation.result.year,
                billable_days = calculation.result.billable_days,
                minimum_rate = %calculation.result.minimum_rate,
                duration_us = calculation.audit_trace.duration_us,
                "Rate calculation completed successfully"
            );

            state.cache().store(calculation.clone());
            if let Err(err) = state.persist_cache().await {
                warn!(correlation_id = %correlation_id, error = %err, "Failed to persist result cache");
            }

            json_response(StatusCode::OK, calculation)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Rate calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Resolves the request against the configured defaults and runs the engine.
fn perform_calculation(request: &RateRequest, state: &AppState) -> EngineResult<RateCalculation> {
    let start_time = Instant::now();
    let defaults = state.config().defaults();
    let time_allocation = request.time_allocation.resolve(&defaults.time_allocation);
    let taxes = request.taxes.resolve(&defaults.taxes);

    let computation = state.engine().compute_rates_with_audit(
        request.year,
        &request.personal_expenses,
        &request.professional_expenses,
        &time_allocation,
        &taxes,
    )?;

    Ok(RateCalculation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        result: computation.result,
        audit_trace: AuditTrace {
            steps: computation.steps,
            warnings: computation.warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

/// Handler for GET /rates/last.
///
/// Returns the cached calculation, or 404 when nothing was computed yet.
async fn last_rates_handler(State(state): State<AppState>) -> Response {
    match state.cache().last() {
        Some(entry) => json_response(StatusCode::OK, entry.calculation),
        None => {
            ApiErrorResponse::new(StatusCode::NOT_FOUND, ApiError::no_cached_result()).into_response()
        }
    }
}

/// Handler for GET /defaults.
///
/// Returns the configured default parameters and empty ledger templates.
async fn defaults_handler(State(state): State<AppState>) -> Response {
    let defaults = state.config().defaults();
    json_response(
        StatusCode::OK,
        DefaultsResponse {
            time_allocation: defaults.time_allocation.clone(),
            taxes: defaults.taxes.clone(),
            vat_percent: defaults.vat_percent,
            personal_expenses: ExpenseLedger::personal_template(),
            professional_expenses: ExpenseLedger::professional_template(),
        },
    )
}
