//! Calculation logic for the TJM engine.
//!
//! This module contains the derivation steps that turn expense ledgers and
//! time-allocation parameters into recommended day rates: parameter
//! validation, expense totals, billable days, the hardship reserve, the three
//! day-rate tiers and the net-of-tax projection. [`RateEngine`] runs them in
//! order.

mod billable_days;
mod day_rate;
mod engine;
mod expense_totals;
mod hardship_reserve;
mod projection;
mod validation;

pub use billable_days::{BillableDaysResult, DAYS_PER_WEEK, MIN_BILLABLE_DAYS, derive_billable_days};
pub use day_rate::{
    COMFORTABLE_MULTIPLIER, DayRateResult, OPTIMAL_MULTIPLIER, calculate_day_rates, tier_rate,
};
pub use engine::{RateComputation, RateEngine, compute_rates};
pub use expense_totals::{ExpenseTotalsResult, MONTHS_PER_YEAR, sum_expenses};
pub use hardship_reserve::{HardshipReserveResult, calculate_hardship_reserve};
pub use projection::{
    DEFAULT_VAT_PERCENT, NetProjectionResult, monthly_revenue, project_net_revenue,
    round_to_cents, vat_inclusive_rates,
};
pub use validation::validate_parameters;
