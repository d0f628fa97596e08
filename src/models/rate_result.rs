//! Rate engine output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Days removed from the adjusted working year before billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBreakdown {
    /// Vacation days after the part-time ratio.
    pub adjusted_vacation_days: u32,
    /// Training days after the part-time ratio.
    pub adjusted_training_days: u32,
    /// Days spent on business development.
    pub prospecting_days: u32,
}

/// Tax amounts owed on the annual revenue at the optimal rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetProjection {
    /// Income tax amount.
    pub income_tax: Decimal,
    /// Social charges amount.
    pub social_charges: Decimal,
    /// Other taxes amount.
    pub other_taxes: Decimal,
    /// Sum of the three amounts.
    pub total_taxes: Decimal,
    /// Annual revenue at the optimal rate minus total taxes.
    pub net_annual_revenue: Decimal,
}

/// VAT-inclusive (TTC) prices for each rate tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatInclusiveRates {
    /// VAT rate in percent.
    pub rate_percent: Decimal,
    /// Minimum rate including VAT.
    pub minimum: Decimal,
    /// Comfortable rate including VAT.
    pub comfortable: Decimal,
    /// Optimal rate including VAT.
    pub optimal: Decimal,
}

/// Recommended day rates and the figures they were derived from.
///
/// `comfortable_rate` and `optimal_rate` are always derived from
/// `minimum_rate` (`ceil(min × 1.2)` and `ceil(min × 1.5)`), and
/// `annual_revenue_at_optimal == optimal_rate × billable_days`.
///
/// # Example
///
/// ```
/// use tjm_engine::calculation::compute_rates;
/// use tjm_engine::models::{ExpenseLedger, TaxParameters, TimeAllocationParameters};
/// use rust_decimal::Decimal;
///
/// let personal = ExpenseLedger::new().with_entry("housing", "rent", 2000);
/// let professional = ExpenseLedger::new().with_entry("production", "software", 1000);
///
/// let result = compute_rates(
///     2024,
///     &personal,
///     &professional,
///     &TimeAllocationParameters::default(),
///     &TaxParameters::default(),
/// )
/// .unwrap();
///
/// assert_eq!(result.billable_days, 197);
/// assert_eq!(result.minimum_rate, Decimal::from(508));
/// assert_eq!(result.comfortable_rate, Decimal::from(610));
/// assert_eq!(result.optimal_rate, Decimal::from(762));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateResult {
    /// The calendar year the rates were computed for.
    pub year: i32,
    /// Working days from the calendar, before the part-time ratio.
    pub raw_working_days: u32,
    /// Working days after the part-time ratio.
    pub working_days: u32,
    /// Days left to bill after vacation, training and prospecting (at least 1).
    pub billable_days: u32,
    /// Breakdown of the non-billable days.
    pub day_breakdown: DayBreakdown,
    /// Monthly personal expenses.
    pub personal_expense_total: Decimal,
    /// Monthly professional expenses.
    pub professional_expense_total: Decimal,
    /// Personal plus professional monthly expenses.
    pub monthly_expense_total: Decimal,
    /// Monthly expenses × 12.
    pub annual_expense_total: Decimal,
    /// Monthly expenses × reserve months.
    pub hardship_reserve_amount: Decimal,
    /// Annual expenses plus hardship reserve.
    pub total_required: Decimal,
    /// Combined tax rate as a fraction.
    pub effective_tax_rate: Decimal,
    /// Break-even day rate.
    pub minimum_rate: Decimal,
    /// Minimum rate with a 20% margin.
    pub comfortable_rate: Decimal,
    /// Minimum rate with a 50% margin.
    pub optimal_rate: Decimal,
    /// `optimal_rate × billable_days`.
    pub annual_revenue_at_optimal: Decimal,
    /// Annual revenue at optimal divided by 12, to the cent.
    pub monthly_revenue_at_optimal: Decimal,
    /// Taxes and net revenue at the optimal rate.
    pub net_projection: NetProjection,
    /// Rates including VAT.
    pub vat: VatInclusiveRates,
}
