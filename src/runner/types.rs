//! Runner types
//!
//! Report field names follow the results document consumed by existing
//! reporting tools (`test_case_id`, `schema_comparison`, `test_passed`, ...).

use crate::diff::ComparisonResult;
use crate::error::Error;
use crate::schema::SchemaNode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of validating one input against an expected schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    /// Schema inferred from the input
    pub inferred_schema: SchemaNode,
    /// Differences between expected and inferred schema
    pub comparison: ComparisonResult,
    /// Verdict: the comparison passed
    pub test_passed: bool,
    /// Whether the raw input conforms to the expected schema (None when not checked)
    pub validation_success: Option<bool>,
    /// Conformance violations, empty when conforming or not checked
    pub validation_errors: Vec<String>,
}

/// A single test case: an input and, optionally, the schema it should produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Case identifier
    pub id: String,
    /// Input value (the root must be an object)
    pub input_data: Value,
    /// Expected schema document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_schema: Option<Value>,
}

impl TestCase {
    /// Create a test case with an expected schema
    pub fn new(id: impl Into<String>, input_data: Value, expected_schema: Value) -> Self {
        Self {
            id: id.into(),
            input_data,
            expected_schema: Some(expected_schema),
        }
    }

    /// Create a test case without an expected schema
    pub fn infer_only(id: impl Into<String>, input_data: Value) -> Self {
        Self {
            id: id.into(),
            input_data,
            expected_schema: None,
        }
    }
}

/// Per-case result of a batch run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseReport {
    /// Case identifier
    pub test_case_id: String,
    /// Inferred schema, absent when inference failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inferred_schema: Option<SchemaNode>,
    /// Conformance of the raw input, absent when not checked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_success: Option<bool>,
    /// Conformance violations
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<String>,
    /// Schema comparison, absent without an expected schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_comparison: Option<ComparisonResult>,
    /// Verdict
    pub test_passed: bool,
    /// Error that stopped this case
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CaseReport {
    /// Build a report from a completed run
    pub fn from_outcome(id: impl Into<String>, outcome: RunOutcome) -> Self {
        Self {
            test_case_id: id.into(),
            inferred_schema: Some(outcome.inferred_schema),
            validation_success: outcome.validation_success,
            validation_errors: outcome.validation_errors,
            schema_comparison: Some(outcome.comparison),
            test_passed: outcome.test_passed,
            error: None,
        }
    }

    /// Build a report for a case that could not run
    pub fn errored(id: impl Into<String>, error: &Error) -> Self {
        Self {
            test_case_id: id.into(),
            inferred_schema: None,
            validation_success: None,
            validation_errors: Vec::new(),
            schema_comparison: None,
            test_passed: false,
            error: Some(error.to_string()),
        }
    }

    /// Check if this case errored
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Totals over a batch of reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BatchSummary {
    /// Number of cases
    pub total: usize,
    /// Cases that passed
    pub passed: usize,
    /// Cases that ran and did not pass
    pub failed: usize,
    /// Cases that errored
    pub errored: usize,
}

impl BatchSummary {
    /// Tally a set of reports
    pub fn from_reports(reports: &[CaseReport]) -> Self {
        reports.iter().fold(Self::default(), |mut summary, report| {
            summary.total += 1;
            if report.is_error() {
                summary.errored += 1;
            } else if report.test_passed {
                summary.passed += 1;
            } else {
                summary.failed += 1;
            }
            summary
        })
    }

    /// Check if every case passed
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}
