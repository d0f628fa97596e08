//! The rate engine.
//!
//! [`RateEngine`] chains the individual derivation steps of this module into a
//! single [`RateResult`]: expense totals, working days from the calendar,
//! billable days, hardship reserve, day-rate tiers and the net-of-tax
//! projection. Each step contributes one [`AuditStep`].

use rust_decimal::Decimal;
use tracing::debug;

use crate::calendar::{CalendarYearStats, HolidayRules, compute_year_stats_with};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditWarning, DayBreakdown, ExpenseLedger, RateResult, TaxParameters,
    TimeAllocationParameters,
};

use super::billable_days::derive_billable_days;
use super::day_rate::calculate_day_rates;
use super::expense_totals::sum_expenses;
use super::hardship_reserve::calculate_hardship_reserve;
use super::projection::{
    DEFAULT_VAT_PERCENT, monthly_revenue, project_net_revenue, vat_inclusive_rates,
};
use super::validation::validate_parameters;

/// A rate result together with the audit steps and warnings that produced it.
#[derive(Debug, Clone)]
pub struct RateComputation {
    /// The computed rates.
    pub result: RateResult,
    /// Derivation steps, in order.
    pub steps: Vec<AuditStep>,
    /// Warnings raised along the way.
    pub warnings: Vec<AuditWarning>,
}

/// Day-rate calculator bound to a holiday calendar and a VAT rate.
///
/// # Example
///
/// ```
/// use tjm_engine::calculation::RateEngine;
/// use tjm_engine::models::{ExpenseLedger, TaxParameters, TimeAllocationParameters};
/// use rust_decimal::Decimal;
///
/// let engine = RateEngine::french();
/// let personal = ExpenseLedger::new().with_entry("housing", "rent", 2000);
/// let professional = ExpenseLedger::new().with_entry("production", "software", 1000);
///
/// let computation = engine
///     .compute_rates_with_audit(
///         2024,
///         &personal,
///         &professional,
///         &TimeAllocationParameters::default(),
///         &TaxParameters::default(),
///     )
///     .unwrap();
///
/// assert_eq!(computation.result.minimum_rate, Decimal::from(508));
/// assert_eq!(computation.steps.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateEngine {
    holiday_rules: HolidayRules,
    vat_percent: Decimal,
}

impl Default for RateEngine {
    fn default() -> Self {
        Self::french()
    }
}

impl RateEngine {
    /// Creates an engine with custom holiday rules and VAT rate.
    pub fn new(holiday_rules: HolidayRules, vat_percent: Decimal) -> Self {
        Self {
            holiday_rules,
            vat_percent,
        }
    }

    /// French public holidays and 20% VAT.
    pub fn french() -> Self {
        Self::new(HolidayRules::french(), DEFAULT_VAT_PERCENT)
    }

    /// The holiday rules used for working-day counts.
    pub fn holiday_rules(&self) -> &HolidayRules {
        &self.holiday_rules
    }

    /// The VAT rate, in percent.
    pub fn vat_percent(&self) -> Decimal {
        self.vat_percent
    }

    /// Working-day statistics for `year` under this engine's holiday rules.
    pub fn year_stats(&self, year: i32) -> CalendarYearStats {
        compute_year_stats_with(year, &self.holiday_rules)
    }

    /// Computes the recommended day rates for `year`.
    ///
    /// # Errors
    ///
    /// See [`RateEngine::compute_rates_with_audit`].
    pub fn compute_rates(
        &self,
        year: i32,
        personal: &ExpenseLedger,
        professional: &ExpenseLedger,
        time_allocation: &TimeAllocationParameters,
        taxes: &TaxParameters,
    ) -> EngineResult<RateResult> {
        self.compute_rates_with_audit(year, personal, professional, time_allocation, taxes)
            .map(|computation| computation.result)
    }

    /// Computes the recommended day rates for `year` and records each step.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidParameter`] if a time-allocation or tax
    ///   parameter is out of range
    /// - [`EngineError::TaxRateOutOfRange`] if the taxes add up to 100% or more
    /// - [`EngineError::CalculationError`] if an amount overflows
    pub fn compute_rates_with_audit(
        &self,
        year: i32,
        personal: &ExpenseLedger,
        professional: &ExpenseLedger,
        time_allocation: &TimeAllocationParameters,
        taxes: &TaxParameters,
    ) -> EngineResult<RateComputation> {
        validate_parameters(time_allocation, taxes)?;

        let mut steps = Vec::with_capacity(6);
        let mut warnings = Vec::new();

        let expenses = sum_expenses(personal, professional, 1);
        steps.push(expenses.audit_step);
        if expenses.monthly.is_zero() {
            warnings.push(AuditWarning::new(
                "NO_EXPENSES",
                "No expenses were entered; every rate is zero",
                "low",
            ));
        }

        let stats = self.year_stats(year);
        steps.push(calendar_step(&stats, 2));

        let days = derive_billable_days(stats.working_days, time_allocation, 3);
        steps.push(days.audit_step);
        if let Some(warning) = days.warning {
            warnings.push(warning);
        }

        let reserve = calculate_hardship_reserve(
            expenses.monthly,
            expenses.annual,
            time_allocation.hardship_reserve_months,
            4,
        )?;
        steps.push(reserve.audit_step);

        let effective_tax_rate = taxes.effective_rate();
        let rates = calculate_day_rates(
            reserve.total_required,
            effective_tax_rate,
            days.billable_days,
            5,
        )?;
        steps.push(rates.audit_step);

        let annual_revenue_at_optimal = rates
            .optimal
            .checked_mul(Decimal::from(days.billable_days))
            .ok_or_else(|| EngineError::CalculationError {
                message: "annual revenue overflow".to_string(),
            })?;

        let projection = project_net_revenue(annual_revenue_at_optimal, taxes, 6);
        steps.push(projection.audit_step);

        let vat = vat_inclusive_rates(
            rates.minimum,
            rates.comfortable,
            rates.optimal,
            self.vat_percent,
        );

        debug!(
            year,
            working_days = stats.working_days,
            billable_days = days.billable_days,
            minimum_rate = %rates.minimum,
            optimal_rate = %rates.optimal,
            "Computed day rates"
        );

        let result = RateResult {
            year,
            raw_working_days: days.raw_working_days,
            working_days: days.adjusted_working_days,
            billable_days: days.billable_days,
            day_breakdown: DayBreakdown {
                adjusted_vacation_days: days.adjusted_vacation_days,
                adjusted_training_days: days.adjusted_training_days,
                prospecting_days: days.prospecting_days,
            },
            personal_expense_total: expenses.personal,
            professional_expense_total: expenses.professional,
            monthly_expense_total: expenses.monthly,
            annual_expense_total: expenses.annual,
            hardship_reserve_amount: reserve.amount,
            total_required: reserve.total_required,
            effective_tax_rate,
            minimum_rate: rates.minimum,
            comfortable_rate: rates.comfortable,
            optimal_rate: rates.optimal,
            annual_revenue_at_optimal,
            monthly_revenue_at_optimal: monthly_revenue(annual_revenue_at_optimal),
            net_projection: projection.projection,
            vat,
        };

        Ok(RateComputation {
            result,
            steps,
            warnings,
        })
    }
}

fn calendar_step(stats: &CalendarYearStats, step_number: u32) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "working_days_calendar".to_string(),
        rule_name: "Working Days Calendar".to_string(),
        input: serde_json::json!({ "year": stats.year }),
        output: serde_json::json!({
            "total_days": stats.total_days,
            "weekend_days": stats.weekend_days,
            "holiday_days": stats.holiday_days,
            "working_days": stats.working_days
        }),
        reasoning: format!(
            "{} has {} days: {} weekend days, {} weekday holidays, {} working days",
            stats.year, stats.total_days, stats.weekend_days, stats.holiday_days, stats.working_days
        ),
    }
}

/// Computes the recommended day rates for `year` under French public holidays.
///
/// Shorthand for [`RateEngine::french`] followed by [`RateEngine::compute_rates`].
///
/// # Errors
///
/// See [`RateEngine::compute_rates_with_audit`].
pub fn compute_rates(
    year: i32,
    personal: &ExpenseLedger,
    professional: &ExpenseLedger,
    time_allocation: &TimeAllocationParameters,
    taxes: &TaxParameters,
) -> EngineResult<RateResult> {
    RateEngine::french().compute_rates(year, personal, professional, time_allocation, taxes)
}
