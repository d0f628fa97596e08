//! Time-allocation and tax parameters for the rate engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the freelancer's working year is split.
///
/// Defaults to a full-time year with 5 weeks of vacation, 1 week of training,
/// 10% of working days spent prospecting and a 3-month hardship reserve.
///
/// # Example
///
/// ```
/// use tjm_engine::models::TimeAllocationParameters;
/// use rust_decimal::Decimal;
///
/// let params = TimeAllocationParameters::default();
/// assert_eq!(params.working_time_ratio, Decimal::from(100));
/// assert_eq!(params.vacation_weeks, Decimal::from(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAllocationParameters {
    /// Part-time ratio in percent (0..=100).
    pub working_time_ratio: Decimal,
    /// Weeks of vacation per year.
    pub vacation_weeks: Decimal,
    /// Weeks of training per year.
    pub training_weeks: Decimal,
    /// Share of working days spent on business development, in percent (0..=100).
    pub prospecting_percent: Decimal,
    /// Months of expenses to set aside as a hardship reserve.
    pub hardship_reserve_months: Decimal,
}

impl Default for TimeAllocationParameters {
    fn default() -> Self {
        Self {
            working_time_ratio: Decimal::from(100),
            vacation_weeks: Decimal::from(5),
            training_weeks: Decimal::ONE,
            prospecting_percent: Decimal::from(10),
            hardship_reserve_months: Decimal::from(3),
        }
    }
}

/// Tax and social-charge rates applied to gross day-rate revenue.
///
/// # Example
///
/// ```
/// use tjm_engine::models::TaxParameters;
/// use rust_decimal::Decimal;
///
/// let taxes = TaxParameters::default();
/// assert_eq!(taxes.combined_percent(), Decimal::from(55));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxParameters {
    /// Income tax, in percent.
    pub income_tax_percent: Decimal,
    /// Social charges, in percent.
    pub social_charges_percent: Decimal,
    /// Any other taxes, in percent.
    pub other_taxes_percent: Decimal,
}

impl TaxParameters {
    /// Sum of the three percentages, saturating at `Decimal::MAX`.
    pub fn combined_percent(&self) -> Decimal {
        self.income_tax_percent
            .saturating_add(self.social_charges_percent)
            .saturating_add(self.other_taxes_percent)
    }

    /// The combined rate as a fraction (55% -> 0.55).
    pub fn effective_rate(&self) -> Decimal {
        self.combined_percent() / Decimal::ONE_HUNDRED
    }

    /// A parameter set with every rate at zero.
    pub fn zero() -> Self {
        Self {
            income_tax_percent: Decimal::ZERO,
            social_charges_percent: Decimal::ZERO,
            other_taxes_percent: Decimal::ZERO,
        }
    }
}

impl Default for TaxParameters {
    fn default() -> Self {
        Self {
            income_tax_percent: Decimal::from(30),
            social_charges_percent: Decimal::from(22),
            other_taxes_percent: Decimal::from(3),
        }
    }
}
