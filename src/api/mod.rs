//! HTTP API module for the TJM engine.
//!
//! This module exposes the working-days calendar and the rate engine as JSON
//! endpoints, and serves the last cached calculation.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{SUPPORTED_YEARS, create_router};
pub use request::{RateRequest, TaxRequest, TimeAllocationRequest};
pub use response::{ApiError, ApiErrorResponse, DefaultsResponse};
pub use state::AppState;
