//! Calculation envelope and audit trace models.
//!
//! This module contains the [`RateCalculation`] type returned by the HTTP API and
//! the audit structures that record each derivation step of the rate engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RateResult;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs that produce a result worth a second look, such as a
/// year with no billable time left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use tjm_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 42,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// A rate calculation as served over the API and kept in the result cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCalculation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The computed rates.
    pub result: RateResult,
    /// Audit trace of the derivation.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_audit_warning_new() {
        let warning = AuditWarning::new("NO_EXPENSES", "No expenses entered", "low");
        assert_eq!(warning.code, "NO_EXPENSES");
        assert_eq!(warning.severity, "low");
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 3,
            rule_id: "billable_days".to_string(),
            rule_name: "Billable Days".to_string(),
            input: json!({ "working_days": 252 }),
            output: json!({ "billable_days": 197 }),
            reasoning: "252 working days minus 55 non-billable days".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":3"));
        assert!(json.contains("\"rule_id\":\"billable_days\""));
        assert!(json.contains("\"billable_days\":197"));
    }

    #[test]
    fn test_audit_trace_round_trips_through_json() {
        let trace = AuditTrace {
            steps: vec![],
            warnings: vec![AuditWarning::new("X", "y", "medium")],
            duration_us: 17,
        };
        let json = serde_json::to_string(&trace).unwrap();
        let back: AuditTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trace);
    }
}
