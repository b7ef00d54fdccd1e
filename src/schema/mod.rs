//! Schema inference module
//!
//! Derives JSON Schema documents from JSON values.
//!
//! # Features
//!
//! - **Type Classification**: Maps JSON values to primitive schema types
//! - **Type Inference**: Builds a schema tree from a single object
//! - **Array Unification**: Collapses identical element shapes, `oneOf` otherwise
//! - **Required Policy**: Pluggable decision on which keys are required
//! - **Sample Merging**: Infers one schema from several objects
//! - **Format Hints**: Detects date-time, date, uri, email and uuid strings
//! - **Document Parsing**: Reads and renders the supported draft-07 subset

mod classify;
mod formats;
mod inference;
mod parse;
mod policy;
mod types;

pub use classify::classify;
pub use formats::FormatDetection;
pub use inference::{infer_schema, SchemaInferrer};
pub use parse::{SchemaParser, DEFAULT_MAX_DEPTH};
pub use policy::RequiredInferencePolicy;
pub use types::{JsonType, SchemaKind, SchemaNode, DRAFT_07};

pub(crate) use inference::join_path;
pub(crate) use types::same_alternatives;

#[cfg(test)]
mod tests;
