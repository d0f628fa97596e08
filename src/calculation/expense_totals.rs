//! Expense ledger summation.

use rust_decimal::Decimal;

use crate::models::{AuditStep, ExpenseLedger};

/// Number of months in a year, used to annualise monthly expenses.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Monthly and annual expense totals, with the audit step recording them.
#[derive(Debug, Clone)]
pub struct ExpenseTotalsResult {
    /// Monthly personal expenses.
    pub personal: Decimal,
    /// Monthly professional expenses.
    pub professional: Decimal,
    /// Personal plus professional.
    pub monthly: Decimal,
    /// Monthly total × 12.
    pub annual: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums both ledgers into monthly and annual totals.
///
/// Every leaf goes through
/// [`parse_non_negative_number_or_zero`](crate::models::parse_non_negative_number_or_zero),
/// so malformed entries count as zero.
///
/// # Example
///
/// ```
/// use tjm_engine::calculation::sum_expenses;
/// use tjm_engine::models::ExpenseLedger;
/// use rust_decimal::Decimal;
///
/// let personal = ExpenseLedger::new().with_entry("housing", "rent", 900);
/// let professional = ExpenseLedger::new().with_entry("commercial", "travel", "100");
///
/// let totals = sum_expenses(&personal, &professional, 1);
/// assert_eq!(totals.monthly, Decimal::from(1000));
/// assert_eq!(totals.annual, Decimal::from(12000));
/// ```
pub fn sum_expenses(
    personal_ledger: &ExpenseLedger,
    professional_ledger: &ExpenseLedger,
    step_number: u32,
) -> ExpenseTotalsResult {
    let personal = personal_ledger.monthly_total();
    let professional = professional_ledger.monthly_total();
    let monthly = personal.saturating_add(professional);
    let annual = monthly.saturating_mul(MONTHS_PER_YEAR);

    let audit_step = AuditStep {
        step_number,
        rule_id: "expense_totals".to_string(),
        rule_name: "Expense Totals".to_string(),
        input: serde_json::json!({
            "personal_categories": personal_ledger.categories().count(),
            "professional_categories": professional_ledger.categories().count()
        }),
        output: serde_json::json!({
            "personal_expense_total": personal.normalize().to_string(),
            "professional_expense_total": professional.normalize().to_string(),
            "monthly_expense_total": monthly.normalize().to_string(),
            "annual_expense_total": annual.normalize().to_string()
        }),
        reasoning: format!(
            "Monthly expenses {} personal + {} professional = {}; x 12 = {} per year",
            personal.normalize(),
            professional.normalize(),
            monthly.normalize(),
            annual.normalize()
        ),
    };

    ExpenseTotalsResult {
        personal,
        professional,
        monthly,
        annual,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_totals_combine_both_ledgers() {
        let personal = ExpenseLedger::new()
            .with_entry("housing", "rent", 1200)
            .with_entry("food", "groceries", 450.5);
        let professional = ExpenseLedger::new()
            .with_entry("production", "software", 80)
            .with_entry("charges", "accountant", "120");

        let result = sum_expenses(&personal, &professional, 1);

        assert_eq!(result.personal, dec("1650.5"));
        assert_eq!(result.professional, dec("200"));
        assert_eq!(result.monthly, dec("1850.5"));
        assert_eq!(result.annual, dec("22206"));
    }

    #[test]
    fn test_malformed_leaves_count_as_zero() {
        let personal: ExpenseLedger = serde_json::from_value(json!({
            "housing": { "rent": "about 1000", "phone": 20 },
            "leisure": { "sports": -40 }
        }))
        .unwrap();

        let result = sum_expenses(&personal, &ExpenseLedger::new(), 1);
        assert_eq!(result.personal, dec("20"));
        assert_eq!(result.professional, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step() {
        let personal = ExpenseLedger::new().with_entry("housing", "rent", 2000);
        let professional = ExpenseLedger::new().with_entry("production", "workspace", 1000);

        let result = sum_expenses(&personal, &professional, 4);

        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "expense_totals");
        assert_eq!(result.audit_step.output["monthly_expense_total"], "3000");
        assert_eq!(result.audit_step.output["annual_expense_total"], "36000");
        assert!(result.audit_step.reasoning.contains("36000"));
    }
}
