//! Core data models for the TJM engine.
//!
//! This module contains the inputs (ledgers, parameters) and outputs (rate
//! results, audit traces) of the rate engine.

mod calculation;
mod ledger;
mod parameters;
mod rate_result;

pub use calculation::{AuditStep, AuditTrace, AuditWarning, RateCalculation};
pub use ledger::{ExpenseLedger, parse_non_negative_number_or_zero};
pub use parameters::{TaxParameters, TimeAllocationParameters};
pub use rate_result::{DayBreakdown, NetProjection, RateResult, VatInclusiveRates};
