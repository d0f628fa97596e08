//! Input validation for the rate engine.
//!
//! Ledger leaves are never validated (they are coerced to zero instead), but the
//! time-allocation and tax parameters drive divisions and day counts, so values
//! outside their range are rejected up front.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{TaxParameters, TimeAllocationParameters};

fn require_percentage(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(EngineError::InvalidParameter {
            field: field.to_string(),
            message: format!("must be between 0 and 100, got {}", value),
        });
    }
    Ok(())
}

fn require_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidParameter {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    Ok(())
}

/// Checks that the rate engine parameters are usable.
///
/// # Errors
///
/// - [`EngineError::InvalidParameter`] if a percentage (tax rates included) is
///   outside 0..=100 or a duration is negative.
/// - [`EngineError::TaxRateOutOfRange`] if the three tax percentages add up to
///   100 or more, which would leave no net revenue to cover expenses.
///
/// # Example
///
/// ```
/// use tjm_engine::calculation::validate_parameters;
/// use tjm_engine::models::{TaxParameters, TimeAllocationParameters};
///
/// assert!(validate_parameters(&TimeAllocationParameters::default(), &TaxParameters::default()).is_ok());
/// ```
pub fn validate_parameters(
    time_allocation: &TimeAllocationParameters,
    taxes: &TaxParameters,
) -> EngineResult<()> {
    require_percentage("working_time_ratio", time_allocation.working_time_ratio)?;
    require_percentage("prospecting_percent", time_allocation.prospecting_percent)?;
    require_non_negative("vacation_weeks", time_allocation.vacation_weeks)?;
    require_non_negative("training_weeks", time_allocation.training_weeks)?;
    require_non_negative(
        "hardship_reserve_months",
        time_allocation.hardship_reserve_months,
    )?;

    require_percentage("income_tax_percent", taxes.income_tax_percent)?;
    require_percentage("social_charges_percent", taxes.social_charges_percent)?;
    require_percentage("other_taxes_percent", taxes.other_taxes_percent)?;

    let combined_percent = taxes.combined_percent();
    if combined_percent >= Decimal::ONE_HUNDRED {
        return Err(EngineError::TaxRateOutOfRange { combined_percent });
    }

    Ok(())
}
