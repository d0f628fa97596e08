//! Monthly expense ledgers.
//!
//! An [`ExpenseLedger`] is a two-level mapping of category to subcategory to
//! monthly amount, as entered by the user. Leaves are kept loosely typed: input
//! comes from forms and a document store, so a leaf may be a number, a numeric
//! string, or garbage. Summation goes through
//! [`parse_non_negative_number_or_zero`], which turns anything unusable into 0.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parses a ledger leaf as a non-negative amount, falling back to zero.
///
/// Accepts JSON numbers and strings holding a decimal or scientific number.
/// Negative values, non-numeric strings, booleans, null, arrays and objects
/// all yield zero.
///
/// # Example
///
/// ```
/// use tjm_engine::models::parse_non_negative_number_or_zero;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// assert_eq!(parse_non_negative_number_or_zero(&json!(850)), Decimal::from(850));
/// assert_eq!(parse_non_negative_number_or_zero(&json!("42.5")), Decimal::new(425, 1));
/// assert_eq!(parse_non_negative_number_or_zero(&json!("abc")), Decimal::ZERO);
/// assert_eq!(parse_non_negative_number_or_zero(&json!(-10)), Decimal::ZERO);
/// assert_eq!(parse_non_negative_number_or_zero(&json!(null)), Decimal::ZERO);
/// ```
pub fn parse_non_negative_number_or_zero(value: &Value) -> Decimal {
    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    };
    match parsed {
        Some(amount) if amount > Decimal::ZERO => amount,
        _ => Decimal::ZERO,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// A category → subcategory → monthly amount mapping.
///
/// Serializes transparently as a JSON object of objects.
///
/// # Example
///
/// ```
/// use tjm_engine::models::ExpenseLedger;
/// use rust_decimal::Decimal;
///
/// let ledger = ExpenseLedger::new()
///     .with_entry("housing", "rent", 1200)
///     .with_entry("housing", "internet", "30")
///     .with_entry("food", "groceries", 400);
///
/// assert_eq!(ledger.monthly_total(), Decimal::from(1630));
/// assert_eq!(ledger.category_total("housing"), Decimal::from(1230));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseLedger {
    categories: BTreeMap<String, Value>,
}

impl ExpenseLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) one leaf and returns the ledger.
    pub fn with_entry(
        mut self,
        category: impl Into<String>,
        subcategory: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.set(category, subcategory, value);
        self
    }

    /// Sets one leaf, creating the category if needed.
    ///
    /// A category that currently holds a non-object value is replaced.
    pub fn set(
        &mut self,
        category: impl Into<String>,
        subcategory: impl Into<String>,
        value: impl Into<Value>,
    ) {
        let entry = self
            .categories
            .entry(category.into())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(map) = entry {
            map.insert(subcategory.into(), value.into());
        }
    }

    /// Returns the raw leaf value, if present.
    pub fn get(&self, category: &str, subcategory: &str) -> Option<&Value> {
        self.categories.get(category)?.as_object()?.get(subcategory)
    }

    /// Names of all categories, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Sum of one category's leaves; zero if the category is missing or not an object.
    pub fn category_total(&self, category: &str) -> Decimal {
        match self.categories.get(category) {
            Some(Value::Object(entries)) => entries
                .values()
                .map(parse_non_negative_number_or_zero)
                .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount)),
            _ => Decimal::ZERO,
        }
    }

    /// Sum of every leaf in the ledger. Categories that are not objects are skipped.
    ///
    /// Saturates at `Decimal::MAX` instead of overflowing.
    pub fn monthly_total(&self) -> Decimal {
        self.categories
            .keys()
            .map(|c| self.category_total(c))
            .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
    }

    /// `true` if the ledger has no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Zeroed personal-expense ledger with the standard categories.
    pub fn personal_template() -> Self {
        Self::template(&[
            (
                "housing",
                &[
                    "rent",
                    "charges",
                    "insurance",
                    "propertyTax",
                    "internet",
                    "phone",
                    "other",
                ][..],
            ),
            ("transport", &["card", "fuel", "insurance", "maintenance"][..]),
            ("food", &["groceries", "restaurants"][..]),
            (
                "leisure",
                &["entertainment", "subscriptions", "sports", "shopping"][..],
            ),
        ])
    }

    /// Zeroed professional-expense ledger with the standard categories.
    pub fn professional_template() -> Self {
        Self::template(&[
            (
                "production",
                &[
                    "workspace",
                    "equipment",
                    "supplies",
                    "software",
                    "phone",
                    "insurance",
                    "other",
                ][..],
            ),
            ("commercial", &["travel", "marketing"][..]),
            ("charges", &["socialCharges", "accountant"][..]),
        ])
    }

    fn template(layout: &[(&str, &[&str])]) -> Self {
        let mut ledger = Self::new();
        for (category, subcategories) in layout {
            for subcategory in *subcategories {
                ledger.set(*category, *subcategory, 0);
            }
        }
        ledger
    }
}
