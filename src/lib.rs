// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Schema Inference
//!
//! Infer JSON Schema (draft-07) documents from sample JSON objects and
//! compare them structurally against expected schemas.
//!
//! ## Features
//!
//! - **Inference**: Object, array, scalar and `oneOf` schemas from a sample
//! - **Comparison**: Path-addressed differences between two schemas
//! - **Conformance**: Optional check of the raw input against the expected schema
//! - **Batches**: Sequential or concurrent runs over many test cases
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use schema_inference::{compare_schemas, infer_schema, SchemaNode, Result};
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let inferred = infer_schema(&json!({"id": 1, "tags": ["a"]}))?;
//!     let expected = SchemaNode::from_json(&json!({
//!         "type": "object",
//!         "properties": {
//!             "id": {"type": "integer"},
//!             "tags": {"type": "array", "items": {"type": "string"}}
//!         },
//!         "required": ["id", "tags"]
//!     }))?;
//!
//!     let result = compare_schemas(&expected, &inferred);
//!     assert!(result.passed);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    ValidationRunner                      │
//! │  run(input, expected) → RunOutcome                       │
//! │  run_batch(cases) → Vec<CaseReport>                      │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴──────┬──────────────────────┐
//! │    Schema    │        Diff        │     Conformance      │
//! ├──────────────┼────────────────────┼──────────────────────┤
//! │ Inference    │ Type mismatch      │ jsonschema validator │
//! │ Parse/Render │ Properties         │                      │
//! │ Formats      │ Required / Items   │                      │
//! └──────────────┴────────────────────┴──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types
pub mod types;

/// Engine configuration
pub mod config;

/// Tracing subscriber setup
pub mod logging;

/// Schema model, inference and parsing
pub mod schema;

/// Structural schema comparison
pub mod diff;

/// Test case execution
pub mod runner;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_config, load_config_from_str, EngineConfig};
pub use diff::{compare_schemas, ComparisonResult, Difference, Issue};
pub use logging::init_logging;
pub use runner::{
    check_conformance, BatchSummary, CaseReport, RunOutcome, TestCase, ValidationRunner,
};
pub use schema::{
    infer_schema, JsonType, RequiredInferencePolicy, SchemaInferrer, SchemaKind, SchemaNode,
    SchemaParser,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
