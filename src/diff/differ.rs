//! Structural schema comparison

use super::types::{ComparisonResult, Difference, Issue};
use crate::schema::{join_path, same_alternatives, JsonType, SchemaKind, SchemaNode};
use tracing::debug;

/// Compare an expected schema against an actual one
///
/// Differences are reported depth-first, parent before child. At an object
/// node the order is: missing properties, extra properties, required
/// mismatch, then shared properties in the expected schema's key order.
/// `format` and `$schema` never produce differences.
pub fn compare_schemas(expected: &SchemaNode, actual: &SchemaNode) -> ComparisonResult {
    let mut differences = Vec::new();
    compare_nodes(expected, actual, "", &mut differences);

    debug!(differences = differences.len(), "compared schemas");
    ComparisonResult::from_differences(differences)
}

fn compare_nodes(expected: &SchemaNode, actual: &SchemaNode, path: &str, out: &mut Vec<Difference>) {
    match (&expected.kind, &actual.kind) {
        (SchemaKind::Any, SchemaKind::Any) => {}
        (SchemaKind::Type(e), SchemaKind::Type(a)) if e == a => {}
        (SchemaKind::OneOf(e), SchemaKind::OneOf(a)) => {
            if !same_alternatives(e, a) {
                out.push(alternatives_difference(path, Issue::TypeMismatch, e, a));
            }
            return;
        }
        _ => {
            out.push(Difference::type_mismatch(
                path,
                expected.kind.label(),
                actual.kind.label(),
            ));
            return;
        }
    }

    match expected.json_type() {
        Some(JsonType::Object) => compare_objects(expected, actual, path, out),
        Some(JsonType::Array) => compare_items(expected, actual, path, out),
        _ => {}
    }
}

fn compare_objects(expected: &SchemaNode, actual: &SchemaNode, path: &str, out: &mut Vec<Difference>) {
    let missing: Vec<String> = expected
        .properties
        .keys()
        .filter(|key| !actual.properties.contains_key(*key))
        .cloned()
        .collect();
    let extra: Vec<String> = actual
        .properties
        .keys()
        .filter(|key| !expected.properties.contains_key(*key))
        .cloned()
        .collect();

    if !missing.is_empty() {
        out.push(Difference::new(path, Issue::MissingProperty, missing, Vec::new()));
    }
    if !extra.is_empty() {
        out.push(Difference::new(path, Issue::ExtraProperty, Vec::new(), extra));
    }

    let missing_required: Vec<String> = expected
        .required
        .iter()
        .filter(|key| !actual.is_required(key))
        .cloned()
        .collect();
    let extra_required: Vec<String> = actual
        .required
        .iter()
        .filter(|key| !expected.is_required(key))
        .cloned()
        .collect();

    if !missing_required.is_empty() || !extra_required.is_empty() {
        out.push(Difference::new(
            path,
            Issue::RequiredFieldsMismatch,
            missing_required,
            extra_required,
        ));
    }

    for (key, expected_prop) in &expected.properties {
        if let Some(actual_prop) = actual.properties.get(key) {
            compare_nodes(expected_prop, actual_prop, &join_path(path, key), out);
        }
    }
}

fn compare_items(expected: &SchemaNode, actual: &SchemaNode, path: &str, out: &mut Vec<Difference>) {
    let any = SchemaNode::any();
    let expected_items = expected.items.as_deref().unwrap_or(&any);
    let actual_items = actual.items.as_deref().unwrap_or(&any);
    let item_path = format!("{path}[]");

    match (&expected_items.kind, &actual_items.kind) {
        (SchemaKind::OneOf(e), SchemaKind::OneOf(a)) => {
            if !same_alternatives(e, a) {
                out.push(alternatives_difference(
                    &item_path,
                    Issue::ArrayItemTypeMismatch,
                    e,
                    a,
                ));
            }
        }
        (SchemaKind::OneOf(e), _) => out.push(alternatives_difference(
            &item_path,
            Issue::ArrayItemTypeMismatch,
            e,
            std::slice::from_ref(actual_items),
        )),
        (_, SchemaKind::OneOf(a)) => out.push(alternatives_difference(
            &item_path,
            Issue::ArrayItemTypeMismatch,
            std::slice::from_ref(expected_items),
            a,
        )),
        _ => compare_nodes(expected_items, actual_items, &item_path, out),
    }
}

/// Alternatives on one side with no structurally equal match on the other
fn alternatives_difference(
    path: &str,
    issue: Issue,
    expected: &[SchemaNode],
    actual: &[SchemaNode],
) -> Difference {
    Difference::new(path, issue, unmatched(expected, actual), unmatched(actual, expected))
}

fn unmatched(from: &[SchemaNode], against: &[SchemaNode]) -> Vec<String> {
    from.iter()
        .filter(|node| !against.iter().any(|other| node.same_shape(other)))
        .map(|node| node.kind.label().to_string())
        .collect()
}
