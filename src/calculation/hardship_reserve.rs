//! Hardship reserve and annual revenue target.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// The hardship reserve and the total revenue the year must cover.
#[derive(Debug, Clone)]
pub struct HardshipReserveResult {
    /// `monthly_expenses × reserve_months`.
    pub amount: Decimal,
    /// `annual_expenses + amount`.
    pub total_required: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the hardship reserve and adds it to the annual expenses.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] if the amounts overflow.
///
/// # Example
///
/// ```
/// use tjm_engine::calculation::calculate_hardship_reserve;
/// use rust_decimal::Decimal;
///
/// let result = calculate_hardship_reserve(
///     Decimal::from(3000),
///     Decimal::from(36000),
///     Decimal::from(3),
///     1,
/// )
/// .unwrap();
/// assert_eq!(result.amount, Decimal::from(9000));
/// assert_eq!(result.total_required, Decimal::from(45000));
/// ```
pub fn calculate_hardship_reserve(
    monthly_expenses: Decimal,
    annual_expenses: Decimal,
    reserve_months: Decimal,
    step_number: u32,
) -> EngineResult<HardshipReserveResult> {
    let amount = monthly_expenses
        .checked_mul(reserve_months)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "hardship reserve overflow: {} x {} months",
                monthly_expenses, reserve_months
            ),
        })?;
    let total_required =
        annual_expenses
            .checked_add(amount)
            .ok_or_else(|| EngineError::CalculationError {
                message: "total required revenue overflow".to_string(),
            })?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "hardship_reserve".to_string(),
        rule_name: "Hardship Reserve".to_string(),
        input: serde_json::json!({
            "monthly_expense_total": monthly_expenses.normalize().to_string(),
            "annual_expense_total": annual_expenses.normalize().to_string(),
            "hardship_reserve_months": reserve_months.normalize().to_string()
        }),
        output: serde_json::json!({
            "hardship_reserve_amount": amount.normalize().to_string(),
            "total_required": total_required.normalize().to_string()
        }),
        reasoning: format!(
            "{} x {} months = {} reserve; {} annual expenses + reserve = {} required",
            monthly_expenses.normalize(),
            reserve_months.normalize(),
            amount.normalize(),
            annual_expenses.normalize(),
            total_required.normalize()
        ),
    };

    Ok(HardshipReserveResult {
        amount,
        total_required,
        audit_step,
    })
}
