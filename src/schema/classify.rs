//! Value classification

use super::types::JsonType;
use serde_json::Value;

/// Map a JSON value to its primitive schema type
///
/// A number is an integer when serde_json parsed it as one: the literal had
/// no fraction or exponent and fits in `i64` or `u64`. Everything else
/// (`3.14`, `1e3`, `1.0`, integers beyond `u64`) is a number.
pub fn classify(value: &Value) -> JsonType {
    match value {
        Value::Null => JsonType::Null,
        Value::Bool(_) => JsonType::Boolean,
        Value::Number(n) if n.is_i64() || n.is_u64() => JsonType::Integer,
        Value::Number(_) => JsonType::Number,
        Value::String(_) => JsonType::String,
        Value::Array(_) => JsonType::Array,
        Value::Object(_) => JsonType::Object,
    }
}
