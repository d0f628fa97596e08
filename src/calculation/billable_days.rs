//! Billable-day derivation.
//!
//! Turns the calendar's working days into the number of days a freelancer can
//! actually bill, after applying the part-time ratio and removing vacation,
//! training and prospecting time.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{AuditStep, AuditWarning, TimeAllocationParameters};

/// Working days per week, used to convert vacation and training weeks to days.
pub const DAYS_PER_WEEK: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Floor on billable days; the day rate divides by this count.
pub const MIN_BILLABLE_DAYS: u32 = 1;

/// The result of the billable-day derivation.
#[derive(Debug, Clone)]
pub struct BillableDaysResult {
    /// Working days from the calendar.
    pub raw_working_days: u32,
    /// `floor(raw × ratio / 100)`.
    pub adjusted_working_days: u32,
    /// `floor(vacation_weeks × 5 × ratio / 100)`.
    pub adjusted_vacation_days: u32,
    /// `floor(training_weeks × 5 × ratio / 100)`.
    pub adjusted_training_days: u32,
    /// `round(adjusted_working_days × prospecting / 100)`.
    pub prospecting_days: u32,
    /// Remaining days, at least [`MIN_BILLABLE_DAYS`].
    pub billable_days: u32,
    /// Set when the time off exceeded the adjusted working days.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn apply_ratio(value: Decimal, ratio_percent: Decimal) -> Decimal {
    value
        .checked_mul(ratio_percent)
        .map(|v| v / Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::MAX)
}

fn to_days(value: Decimal) -> u32 {
    value.to_u32().unwrap_or(u32::MAX)
}

/// Derives billable days from the calendar's working days.
///
/// The steps, in order:
/// 1. `adjusted_working = floor(working_days × ratio / 100)`
/// 2. vacation and training weeks × 5, then the same ratio and floor
/// 3. `prospecting = round(adjusted_working × prospecting_percent / 100)`, halves rounded up
/// 4. `billable = max(1, adjusted_working − vacation − training − prospecting)`
///
/// # Example
///
/// ```
/// use tjm_engine::calculation::derive_billable_days;
/// use tjm_engine::models::TimeAllocationParameters;
///
/// // 2024 has 252 working days in France.
/// let result = derive_billable_days(252, &TimeAllocationParameters::default(), 1);
/// assert_eq!(result.adjusted_vacation_days, 25);
/// assert_eq!(result.adjusted_training_days, 5);
/// assert_eq!(result.prospecting_days, 25);
/// assert_eq!(result.billable_days, 197);
/// ```
pub fn derive_billable_days(
    working_days: u32,
    time_allocation: &TimeAllocationParameters,
    step_number: u32,
) -> BillableDaysResult {
    let ratio = time_allocation.working_time_ratio;

    let adjusted_working_days = to_days(apply_ratio(Decimal::from(working_days), ratio).floor());
    let adjusted_vacation_days = to_days(
        apply_ratio(
            time_allocation
                .vacation_weeks
                .checked_mul(DAYS_PER_WEEK)
                .unwrap_or(Decimal::MAX),
            ratio,
        )
        .floor(),
    );
    let adjusted_training_days = to_days(
        apply_ratio(
            time_allocation
                .training_weeks
                .checked_mul(DAYS_PER_WEEK)
                .unwrap_or(Decimal::MAX),
            ratio,
        )
        .floor(),
    );
    let prospecting_days = to_days(
        apply_ratio(
            Decimal::from(adjusted_working_days),
            time_allocation.prospecting_percent,
        )
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
    );

    let remaining = i64::from(adjusted_working_days)
        - i64::from(adjusted_vacation_days)
        - i64::from(adjusted_training_days)
        - i64::from(prospecting_days);
    let floored = remaining < i64::from(MIN_BILLABLE_DAYS);
    let billable_days = if floored {
        MIN_BILLABLE_DAYS
    } else {
        remaining as u32
    };

    let warning = floored.then(|| {
        AuditWarning::new(
            "BILLABLE_DAYS_FLOORED",
            format!(
                "Time off ({} days) leaves no billable time out of {} working days; billing {} day",
                i64::from(adjusted_vacation_days)
                    + i64::from(adjusted_training_days)
                    + i64::from(prospecting_days),
                adjusted_working_days,
                MIN_BILLABLE_DAYS
            ),
            "high",
        )
    });

    let audit_step = AuditStep {
        step_number,
        rule_id: "billable_days".to_string(),
        rule_name: "Billable Days".to_string(),
        input: serde_json::json!({
            "working_days": working_days,
            "working_time_ratio": ratio.normalize().to_string(),
            "vacation_weeks": time_allocation.vacation_weeks.normalize().to_string(),
            "training_weeks": time_allocation.training_weeks.normalize().to_string(),
            "prospecting_percent": time_allocation.prospecting_percent.normalize().to_string()
        }),
        output: serde_json::json!({
            "adjusted_working_days": adjusted_working_days,
            "adjusted_vacation_days": adjusted_vacation_days,
            "adjusted_training_days": adjusted_training_days,
            "prospecting_days": prospecting_days,
            "billable_days": billable_days,
            "floored": floored
        }),
        reasoning: format!(
            "{} working days at {}% = {}; minus {} vacation, {} training, {} prospecting = {} billable days",
            working_days,
            ratio.normalize(),
            adjusted_working_days,
            adjusted_vacation_days,
            adjusted_training_days,
            prospecting_days,
            billable_days
        ),
    };

    BillableDaysResult {
        raw_working_days: working_days,
        adjusted_working_days,
        adjusted_vacation_days,
        adjusted_training_days,
        prospecting_days,
        billable_days,
        warning,
        audit_step,
    }
}
