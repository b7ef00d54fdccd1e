//! Structural conformance of raw input against a schema

use crate::error::{Error, Result};
use crate::schema::SchemaNode;
use serde_json::Value;

/// Validate a value against a schema
///
/// Returns the violation messages, empty when the value conforms. `format`
/// stays an annotation and is not asserted.
pub fn check_conformance(instance: &Value, schema: &SchemaNode) -> Result<Vec<String>> {
    let document = schema.to_json();
    let validator = jsonschema::options()
        .should_validate_formats(false)
        .build(&document)
        .map_err(|e| Error::malformed("", e.to_string()))?;

    Ok(validator
        .iter_errors(instance)
        .map(|error| error.to_string())
        .collect())
}
