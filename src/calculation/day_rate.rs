//! Day-rate tiers.
//!
//! The minimum rate is the break-even price per billable day once taxes are
//! paid. The comfortable and optimal tiers are fixed margins on top of it. All
//! three are rounded up to the next whole currency unit so a quote never falls
//! short.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// Margin applied to the minimum rate for the comfortable tier (+20%).
pub const COMFORTABLE_MULTIPLIER: Decimal = Decimal::from_parts(12, 0, 0, false, 1);

/// Margin applied to the minimum rate for the optimal tier (+50%).
pub const OPTIMAL_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// The three recommended day rates.
#[derive(Debug, Clone)]
pub struct DayRateResult {
    /// `ceil(total_required / (1 − tax_rate) / billable_days)`.
    pub minimum: Decimal,
    /// `ceil(minimum × 1.2)`.
    pub comfortable: Decimal,
    /// `ceil(minimum × 1.5)`.
    pub optimal: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn overflow(what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} overflow", what),
    }
}

/// Derives a tier rate from the minimum rate.
pub fn tier_rate(minimum: Decimal, multiplier: Decimal) -> EngineResult<Decimal> {
    minimum
        .checked_mul(multiplier)
        .map(|rate| rate.ceil())
        .ok_or_else(|| overflow("tier rate"))
}

/// Computes the minimum, comfortable and optimal day rates.
///
/// # Arguments
///
/// * `total_required` - Annual expenses plus hardship reserve
/// * `effective_tax_rate` - Combined tax rate as a fraction, below 1
/// * `billable_days` - Days to spread the revenue over, at least 1
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// - [`EngineError::TaxRateOutOfRange`] if `effective_tax_rate >= 1`
/// - [`EngineError::CalculationError`] if `billable_days` is 0 or the
///   arithmetic overflows
///
/// # Example
///
/// ```
/// use tjm_engine::calculation::calculate_day_rates;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_day_rates(
///     Decimal::from(45000),
///     Decimal::from_str("0.55").unwrap(),
///     197,
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(result.minimum, Decimal::from(508));
/// assert_eq!(result.comfortable, Decimal::from(610));
/// assert_eq!(result.optimal, Decimal::from(762));
/// ```
pub fn calculate_day_rates(
    total_required: Decimal,
    effective_tax_rate: Decimal,
    billable_days: u32,
    step_number: u32,
) -> EngineResult<DayRateResult> {
    if effective_tax_rate >= Decimal::ONE {
        return Err(EngineError::TaxRateOutOfRange {
            combined_percent: effective_tax_rate.saturating_mul(Decimal::ONE_HUNDRED),
        });
    }
    if billable_days == 0 {
        return Err(EngineError::CalculationError {
            message: "billable days must be at least 1".to_string(),
        });
    }

    let net_share = Decimal::ONE - effective_tax_rate;
    let gross_required = total_required
        .checked_div(net_share)
        .ok_or_else(|| overflow("gross revenue"))?;
    let minimum = gross_required
        .checked_div(Decimal::from(billable_days))
        .ok_or_else(|| overflow("minimum rate"))?
        .ceil();
    let comfortable = tier_rate(minimum, COMFORTABLE_MULTIPLIER)?;
    let optimal = tier_rate(minimum, OPTIMAL_MULTIPLIER)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "day_rates".to_string(),
        rule_name: "Day Rates".to_string(),
        input: serde_json::json!({
            "total_required": total_required.normalize().to_string(),
            "effective_tax_rate": effective_tax_rate.normalize().to_string(),
            "billable_days": billable_days
        }),
        output: serde_json::json!({
            "gross_required": gross_required.round_dp(2).normalize().to_string(),
            "minimum_rate": minimum.to_string(),
            "comfortable_rate": comfortable.to_string(),
            "optimal_rate": optimal.to_string()
        }),
        reasoning: format!(
            "{} / (1 - {}) / {} days, rounded up = {} minimum; x {} = {} comfortable; x {} = {} optimal",
            total_required.normalize(),
            effective_tax_rate.normalize(),
            billable_days,
            minimum,
            COMFORTABLE_MULTIPLIER,
            comfortable,
            OPTIMAL_MULTIPLIER,
            optimal
        ),
    };

    Ok(DayRateResult {
        minimum,
        comfortable,
        optimal,
        audit_step,
    })
}
