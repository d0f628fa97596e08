//! Net-of-tax projection and VAT-inclusive prices at the recommended rates.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{AuditStep, NetProjection, TaxParameters, VatInclusiveRates};

use super::expense_totals::MONTHS_PER_YEAR;

/// Standard French VAT rate, in percent.
pub const DEFAULT_VAT_PERCENT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Rounds a monetary amount to the cent, halves away from zero.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    round_to_cents(amount.saturating_mul(percent) / Decimal::ONE_HUNDRED)
}

/// The net projection and the audit step recording it.
#[derive(Debug, Clone)]
pub struct NetProjectionResult {
    /// Tax amounts and net revenue.
    pub projection: NetProjection,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Splits the annual revenue into tax amounts and net revenue.
///
/// Each amount is `revenue × percent / 100`, rounded to the cent.
///
/// # Example
///
/// ```
/// use tjm_engine::calculation::project_net_revenue;
/// use tjm_engine::models::TaxParameters;
/// use rust_decimal::Decimal;
///
/// let result = project_net_revenue(Decimal::from(100000), &TaxParameters::default(), 1);
/// assert_eq!(result.projection.total_taxes, Decimal::from(55000));
/// assert_eq!(result.projection.net_annual_revenue, Decimal::from(45000));
/// ```
pub fn project_net_revenue(
    annual_revenue: Decimal,
    taxes: &TaxParameters,
    step_number: u32,
) -> NetProjectionResult {
    let income_tax = percent_of(annual_revenue, taxes.income_tax_percent);
    let social_charges = percent_of(annual_revenue, taxes.social_charges_percent);
    let other_taxes = percent_of(annual_revenue, taxes.other_taxes_percent);
    let total_taxes = income_tax
        .saturating_add(social_charges)
        .saturating_add(other_taxes);
    let net_annual_revenue = annual_revenue.saturating_sub(total_taxes);

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_projection".to_string(),
        rule_name: "Net Revenue Projection".to_string(),
        input: serde_json::json!({
            "annual_revenue_at_optimal": annual_revenue.normalize().to_string(),
            "income_tax_percent": taxes.income_tax_percent.normalize().to_string(),
            "social_charges_percent": taxes.social_charges_percent.normalize().to_string(),
            "other_taxes_percent": taxes.other_taxes_percent.normalize().to_string()
        }),
        output: serde_json::json!({
            "income_tax": income_tax.to_string(),
            "social_charges": social_charges.to_string(),
            "other_taxes": other_taxes.to_string(),
            "total_taxes": total_taxes.to_string(),
            "net_annual_revenue": net_annual_revenue.to_string()
        }),
        reasoning: format!(
            "{} revenue - {} taxes = {} net",
            annual_revenue.normalize(),
            total_taxes,
            net_annual_revenue
        ),
    };

    NetProjectionResult {
        projection: NetProjection {
            income_tax,
            social_charges,
            other_taxes,
            total_taxes,
            net_annual_revenue,
        },
        audit_step,
    }
}

/// Adds VAT to each rate tier, rounded to the cent.
///
/// # Example
///
/// ```
/// use tjm_engine::calculation::{DEFAULT_VAT_PERCENT, vat_inclusive_rates};
/// use rust_decimal::Decimal;
///
/// let vat = vat_inclusive_rates(
///     Decimal::from(500),
///     Decimal::from(600),
///     Decimal::from(750),
///     DEFAULT_VAT_PERCENT,
/// );
/// assert_eq!(vat.minimum, Decimal::from(600));
/// assert_eq!(vat.optimal, Decimal::from(900));
/// ```
pub fn vat_inclusive_rates(
    minimum: Decimal,
    comfortable: Decimal,
    optimal: Decimal,
    vat_percent: Decimal,
) -> VatInclusiveRates {
    let factor = Decimal::ONE.saturating_add(vat_percent / Decimal::ONE_HUNDRED);
    let with_vat = |rate: Decimal| round_to_cents(rate.saturating_mul(factor));

    VatInclusiveRates {
        rate_percent: vat_percent,
        minimum: with_vat(minimum),
        comfortable: with_vat(comfortable),
        optimal: with_vat(optimal),
    }
}

/// Annual revenue spread over twelve months, rounded to the cent.
pub fn monthly_revenue(annual_revenue: Decimal) -> Decimal {
    round_to_cents(annual_revenue / MONTHS_PER_YEAR)
}
