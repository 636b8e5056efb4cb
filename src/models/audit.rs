//! Audit trace models.
//!
//! Every calculation in the engine records the rule it applied, its inputs
//! and outputs, and a human-readable explanation, so that each dollar in a
//! penalty estimate can be traced back to the statute.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// # Example
///
/// ```
/// use aca_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "penalty_b_unaffordable".to_string(),
///     rule_name: "4980H(b) Unaffordable Offer".to_string(),
///     clause_ref: "4980H(b)".to_string(),
///     input: serde_json::json!({"employees_unaffordable": 12}),
///     output: serde_json::json!({"amount": "53520"}),
///     reasoning: "12 employees × $4460 = $53520".to_string(),
/// };
/// assert_eq!(step.clause_ref, "4980H(b)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statute or regulation for this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results that are arithmetically valid but deserve a
/// second look, such as coverage categories that together exceed the
/// workforce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}
