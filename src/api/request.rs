//! Request types for the TJM engine API.
//!
//! This module defines the JSON request structures for the `/rates` endpoint.
//! Parameter blocks are optional field by field; anything left out falls back
//! to the configured defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ExpenseLedger, TaxParameters, TimeAllocationParameters};

/// Request body for the `/rates` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateRequest {
    /// The calendar year to compute working days for.
    pub year: i32,
    /// Monthly personal expenses. Empty when omitted.
    #[serde(default)]
    pub personal_expenses: ExpenseLedger,
    /// Monthly professional expenses. Empty when omitted.
    #[serde(default)]
    pub professional_expenses: ExpenseLedger,
    /// Time-allocation overrides.
    #[serde(default)]
    pub time_allocation: TimeAllocationRequest,
    /// Tax overrides.
    #[serde(default)]
    pub taxes: TaxRequest,
}

/// Time-allocation fields in a rate request; `None` means "use the default".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeAllocationRequest {
    /// Part-time ratio in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_time_ratio: Option<Decimal>,
    /// Weeks of vacation per year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacation_weeks: Option<Decimal>,
    /// Weeks of training per year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_weeks: Option<Decimal>,
    /// Share of working days spent prospecting, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prospecting_percent: Option<Decimal>,
    /// Months of expenses kept as a hardship reserve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardship_reserve_months: Option<Decimal>,
}

impl TimeAllocationRequest {
    /// Fills unset fields from `defaults`.
    pub fn resolve(&self, defaults: &TimeAllocationParameters) -> TimeAllocationParameters {
        TimeAllocationParameters {
            working_time_ratio: self
                .working_time_ratio
                .unwrap_or(defaults.working_time_ratio),
            vacation_weeks: self.vacation_weeks.unwrap_or(defaults.vacation_weeks),
            training_weeks: self.training_weeks.unwrap_or(defaults.training_weeks),
            prospecting_percent: self
                .prospecting_percent
                .unwrap_or(defaults.prospecting_percent),
            hardship_reserve_months: self
                .hardship_reserve_months
                .unwrap_or(defaults.hardship_reserve_months),
        }
    }
}

/// Tax fields in a rate request; `None` means "use the default".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxRequest {
    /// Income tax, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_tax_percent: Option<Decimal>,
    /// Social charges, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_charges_percent: Option<Decimal>,
    /// Other taxes, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_taxes_percent: Option<Decimal>,
}

impl TaxRequest {
    /// Fills unset fields from `defaults`.
    pub fn resolve(&self, defaults: &TaxParameters) -> TaxParameters {
        TaxParameters {
            income_tax_percent: self.income_tax_percent.unwrap_or(defaults.income_tax_percent),
            social_charges_percent: self
                .social_charges_percent
                .unwrap_or(defaults.social_charges_percent),
            other_taxes_percent: self
                .other_taxes_percent
                .unwrap_or(defaults.other_taxes_percent),
        }
    }
}
