//! Validation runner module
//!
//! Orchestrates one case end to end: infer a schema from the input, compare
//! it against the expected schema, optionally check the raw input against
//! the expected schema, and assemble the verdict.
//!
//! # Overview
//!
//! The runner module provides:
//! - `ValidationRunner` - Runs single inputs and batches of test cases
//! - `TestCase` / `CaseReport` - Batch input and per-case results
//! - `BatchSummary` - Pass/fail/error totals
//!
//! Errors never cross case boundaries: a case that fails to run is recorded
//! in its own report and the batch continues.

mod conformance;
mod types;

pub use conformance::check_conformance;
pub use types::{BatchSummary, CaseReport, RunOutcome, TestCase};

use crate::config::EngineConfig;
use crate::diff::compare_schemas;
use crate::error::{Error, Result};
use crate::schema::{SchemaInferrer, SchemaNode, SchemaParser};
use serde_json::Value;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Runs inference, comparison and conformance checks
#[derive(Debug, Clone)]
pub struct ValidationRunner {
    /// Inferrer applied to case inputs
    inferrer: SchemaInferrer,
    /// Parser for expected schema documents
    parser: SchemaParser,
    /// Validate raw input against the expected schema
    check_conformance: bool,
}

impl Default for ValidationRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRunner {
    /// Create a runner with default inference and parsing settings
    pub fn new() -> Self {
        Self {
            inferrer: SchemaInferrer::new(),
            parser: SchemaParser::new(),
            check_conformance: true,
        }
    }

    /// Create a runner from engine configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            inferrer: SchemaInferrer::from_config(config),
            parser: SchemaParser::new()
                .with_strict_vocabulary(config.strict_vocabulary)
                .with_max_depth(config.max_depth),
            check_conformance: config.check_conformance,
        }
    }

    /// Set the inferrer
    #[must_use]
    pub fn with_inferrer(mut self, inferrer: SchemaInferrer) -> Self {
        self.inferrer = inferrer;
        self
    }

    /// Set the expected-schema parser
    #[must_use]
    pub fn with_parser(mut self, parser: SchemaParser) -> Self {
        self.parser = parser;
        self
    }

    /// Enable/disable conformance checking
    #[must_use]
    pub fn with_conformance(mut self, enabled: bool) -> Self {
        self.check_conformance = enabled;
        self
    }

    /// Get the inferrer
    pub fn inferrer(&self) -> &SchemaInferrer {
        &self.inferrer
    }

    /// Validate one input against an expected schema
    pub fn run(&self, case_input: &Value, expected_schema: &SchemaNode) -> Result<RunOutcome> {
        let inferred_schema = self.inferrer.infer(case_input)?;
        let comparison = compare_schemas(expected_schema, &inferred_schema);

        let (validation_success, validation_errors) = if self.check_conformance {
            let errors = check_conformance(case_input, expected_schema)?;
            (Some(errors.is_empty()), errors)
        } else {
            (None, Vec::new())
        };

        Ok(RunOutcome {
            test_passed: comparison.passed,
            inferred_schema,
            comparison,
            validation_success,
            validation_errors,
        })
    }

    /// Run one test case, recording any error in the report
    pub fn run_case(&self, case: &TestCase) -> CaseReport {
        match self.try_run_case(case) {
            Ok(report) => {
                debug!(
                    case = %case.id,
                    passed = report.test_passed,
                    "test case finished"
                );
                report
            }
            Err(err) => {
                warn!(case = %case.id, error = %err, "test case failed to run");
                CaseReport::errored(&case.id, &err)
            }
        }
    }

    fn try_run_case(&self, case: &TestCase) -> Result<CaseReport> {
        let Some(document) = &case.expected_schema else {
            // Nothing to compare against: report the inferred schema only
            let inferred_schema = self.inferrer.infer(&case.input_data)?;
            return Ok(CaseReport {
                test_case_id: case.id.clone(),
                inferred_schema: Some(inferred_schema),
                validation_success: None,
                validation_errors: Vec::new(),
                schema_comparison: None,
                test_passed: false,
                error: None,
            });
        };

        let expected = self.parser.parse(document)?;
        let outcome = self.run(&case.input_data, &expected)?;
        Ok(CaseReport::from_outcome(&case.id, outcome))
    }

    /// Run test cases one after another
    pub fn run_batch(&self, cases: &[TestCase]) -> Vec<CaseReport> {
        let reports: Vec<CaseReport> = cases.iter().map(|case| self.run_case(case)).collect();
        log_summary(&reports);
        reports
    }

    /// Run test cases on blocking worker tasks, one per case
    ///
    /// Reports come back in input order. A worker that panics is reported
    /// as an error for its case.
    pub async fn run_batch_concurrent(&self, cases: Vec<TestCase>) -> Vec<CaseReport> {
        let ids: Vec<String> = cases.iter().map(|case| case.id.clone()).collect();
        let mut workers = JoinSet::new();

        for (index, case) in cases.into_iter().enumerate() {
            let runner = self.clone();
            workers.spawn_blocking(move || (index, runner.run_case(&case)));
        }

        let mut slots: Vec<Option<CaseReport>> = vec![None; ids.len()];
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok((index, report)) => slots[index] = Some(report),
                Err(err) => warn!(error = %err, "validation worker did not complete"),
            }
        }

        let reports: Vec<CaseReport> = slots
            .into_iter()
            .zip(ids)
            .map(|(slot, id)| {
                slot.unwrap_or_else(|| {
                    CaseReport::errored(id, &Error::worker("worker exited without a report"))
                })
            })
            .collect();

        log_summary(&reports);
        reports
    }
}

fn log_summary(reports: &[CaseReport]) {
    let summary = BatchSummary::from_reports(reports);
    info!(
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        errored = summary.errored,
        "batch finished"
    );
}
