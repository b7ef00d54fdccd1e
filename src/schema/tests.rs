//! Schema inference tests

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

// ============================================================================
// Classification Tests
// ============================================================================

#[test_case(json!(null), JsonType::Null ; "null")]
#[test_case(json!(true), JsonType::Boolean ; "boolean")]
#[test_case(json!(30), JsonType::Integer ; "integer")]
#[test_case(json!(-7), JsonType::Integer ; "negative integer")]
#[test_case(json!(u64::MAX), JsonType::Integer ; "unsigned integer")]
#[test_case(json!(3.14), JsonType::Number ; "fraction")]
#[test_case(json!(29.99), JsonType::Number ; "price")]
#[test_case(json!("text"), JsonType::String ; "string")]
#[test_case(json!([1, 2]), JsonType::Array ; "array")]
#[test_case(json!({"a": 1}), JsonType::Object ; "object")]
fn test_classify(value: Value, expected: JsonType) {
    assert_eq!(classify(&value), expected);
}

#[test]
fn test_classify_parsed_literals() {
    let value: Value = serde_json::from_str(r#"[1, 1.0, 1e3, 99999999999999999999]"#).unwrap();
    let types: Vec<JsonType> = value.as_array().unwrap().iter().map(classify).collect();
    assert_eq!(
        types,
        vec![
            JsonType::Integer,
            JsonType::Number,
            JsonType::Number,
            JsonType::Number
        ]
    );
}

// ============================================================================
// Inference Tests
// ============================================================================

#[test]
fn test_infer_simple_object() {
    let value = json!({
        "name": "John",
        "age": 30,
        "active": true,
        "score": 99.5,
        "nickname": null
    });

    let schema = infer_schema(&value).unwrap();

    assert_eq!(schema.json_type(), Some(JsonType::Object));
    assert_eq!(schema.properties.len(), 5);
    assert_eq!(
        schema.get_property("name").unwrap().json_type(),
        Some(JsonType::String)
    );
    assert_eq!(
        schema.get_property("age").unwrap().json_type(),
        Some(JsonType::Integer)
    );
    assert_eq!(
        schema.get_property("active").unwrap().json_type(),
        Some(JsonType::Boolean)
    );
    assert_eq!(
        schema.get_property("score").unwrap().json_type(),
        Some(JsonType::Number)
    );
    assert_eq!(
        schema.get_property("nickname").unwrap().json_type(),
        Some(JsonType::Null)
    );
}

#[test]
fn test_infer_attaches_schema_uri_to_root_only() {
    let schema = infer_schema(&json!({"user": {"id": 1}})).unwrap();

    assert_eq!(schema.schema_uri.as_deref(), Some(DRAFT_07));
    assert_eq!(schema.get_property("user").unwrap().schema_uri, None);

    let schema = SchemaInferrer::new()
        .with_schema_uri(None)
        .infer(&json!({"id": 1}))
        .unwrap();
    assert_eq!(schema.schema_uri, None);
}

#[test]
fn test_required_defaults_to_all_present_keys() {
    let value = json!({
        "mixed_array": [1, "string", true, 3.14],
        "optional_field": "present here"
    });

    let schema = infer_schema(&value).unwrap();
    let keys: Vec<&String> = schema.properties.keys().collect();

    assert_eq!(schema.required, vec!["mixed_array", "optional_field"]);
    assert_eq!(keys, schema.required.iter().collect::<Vec<_>>());
}

#[test]
fn test_required_policy_none() {
    let schema = SchemaInferrer::new()
        .with_required_policy(RequiredInferencePolicy::None)
        .infer(&json!({"a": 1, "b": {"c": 2}}))
        .unwrap();

    assert!(schema.required.is_empty());
    assert!(schema.get_property("b").unwrap().required.is_empty());
}

#[test]
fn test_required_policy_heuristic_skips_nulls() {
    let schema = SchemaInferrer::new()
        .with_required_policy(RequiredInferencePolicy::Heuristic)
        .infer(&json!({"name": "Ann", "middle_name": null, "age": 4}))
        .unwrap();

    assert_eq!(schema.required, vec!["name", "age"]);
    assert!(schema.get_property("middle_name").is_some());
}

#[test]
fn test_infer_nested_object() {
    let value = json!({
        "user": {
            "name": "John",
            "email": "john@example.com"
        }
    });

    let schema = infer_schema(&value).unwrap();

    let user = schema.get_property("user").unwrap();
    assert_eq!(user.json_type(), Some(JsonType::Object));
    assert_eq!(user.required, vec!["name", "email"]);

    let email = user.get_property("email").unwrap();
    assert_eq!(email.format, Some("email".to_string()));
}

#[test]
fn test_heterogeneous_array_becomes_one_of() {
    let schema = infer_schema(&json!({"a": [1, "s", true, 3.14]})).unwrap();

    let items = schema.get_property("a").unwrap().items.as_ref().unwrap();
    let types: Vec<&str> = items
        .alternatives()
        .unwrap()
        .iter()
        .map(|alternative| alternative.kind.label())
        .collect();

    assert_eq!(types, vec!["integer", "string", "boolean", "number"]);
}

#[test]
fn test_one_of_keeps_first_appearance_without_duplicates() {
    let schema = infer_schema(&json!({"a": ["x", 1, "y", 2, null, "z"]})).unwrap();

    let items = schema.get_property("a").unwrap().items.as_ref().unwrap();
    let types: Vec<&str> = items
        .alternatives()
        .unwrap()
        .iter()
        .map(|alternative| alternative.kind.label())
        .collect();

    assert_eq!(types, vec!["string", "integer", "null"]);
}

#[test]
fn test_homogeneous_array_shares_item_schema() {
    let value = json!({
        "items": [
            {"id": 1, "name": "Item 1"},
            {"name": "Item 2", "id": 2}
        ]
    });

    let schema = infer_schema(&value).unwrap();

    let items = schema.get_property("items").unwrap().items.as_ref().unwrap();
    assert_eq!(items.json_type(), Some(JsonType::Object));
    assert!(items.get_property("id").is_some());
    assert!(items.get_property("name").is_some());
}

#[test]
fn test_array_of_differently_shaped_objects() {
    let schema = infer_schema(&json!({"rows": [{"id": 1}, {"id": "one"}, {"id": 2}]})).unwrap();

    let items = schema.get_property("rows").unwrap().items.as_ref().unwrap();
    let alternatives = items.alternatives().unwrap();

    assert_eq!(alternatives.len(), 2);
    assert_eq!(
        alternatives[0].get_property("id").unwrap().json_type(),
        Some(JsonType::Integer)
    );
    assert_eq!(
        alternatives[1].get_property("id").unwrap().json_type(),
        Some(JsonType::String)
    );
}

#[test]
fn test_formats_do_not_split_array_items() {
    let schema = infer_schema(&json!({"contacts": ["a@example.com", "plain"]})).unwrap();

    let items = schema.get_property("contacts").unwrap().items.as_ref().unwrap();
    assert_eq!(items.json_type(), Some(JsonType::String));
    assert_eq!(items.format.as_deref(), Some("email"));
}

#[test]
fn test_empty_array() {
    let schema = infer_schema(&json!({"items": []})).unwrap();
    let items_prop = schema.get_property("items").unwrap();

    assert_eq!(items_prop.json_type(), Some(JsonType::Array));
    assert_eq!(
        items_prop.items.as_deref().map(|items| &items.kind),
        Some(&SchemaKind::Any)
    );
    assert_eq!(items_prop.to_json(), json!({"type": "array", "items": {}}));
}

#[test]
fn test_empty_object() {
    let schema = infer_schema(&json!({})).unwrap();

    assert!(schema.properties.is_empty());
    assert!(schema.required.is_empty());
}

#[test_case(json!([1, 2]), JsonType::Array ; "array root")]
#[test_case(json!("text"), JsonType::String ; "string root")]
#[test_case(json!(null), JsonType::Null ; "null root")]
#[test_case(json!(4.5), JsonType::Number ; "number root")]
fn test_unsupported_root_type(value: Value, found_type: JsonType) {
    let err = infer_schema(&value).unwrap_err();
    assert!(matches!(err, Error::UnsupportedRootType { found } if found == found_type));
}

#[test]
fn test_max_depth_exceeded() {
    let mut value = json!(1);
    for _ in 0..200 {
        value = json!({ "next": value });
    }

    let err = SchemaInferrer::new()
        .with_max_depth(32)
        .infer(&value)
        .unwrap_err();

    match err {
        Error::MaxDepthExceeded { max_depth, path } => {
            assert_eq!(max_depth, 32);
            assert!(path.starts_with("next.next"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_depth_within_limit() {
    let value = json!({"a": {"b": {"c": [1]}}});

    // a=1, b=2, c=3, the array element sits at depth 4
    assert!(SchemaInferrer::new().with_max_depth(4).infer(&value).is_ok());
    assert!(SchemaInferrer::new().with_max_depth(3).infer(&value).is_err());
}

#[test]
fn test_inference_is_deterministic() {
    let value = json!({
        "tags": ["a", 1, {"k": [true, null]}],
        "meta": {"created": "2024-01-15T10:30:00Z", "id": "550e8400-e29b-41d4-a716-446655440000"}
    });

    let first = infer_schema(&value).unwrap();
    let second = infer_schema(&value).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_json(), second.to_json());
}

// ============================================================================
// Format Detection Tests
// ============================================================================

#[test_case("2024-01-15T10:30:00Z", Some("date-time") ; "datetime")]
#[test_case("2024-01-15 10:30:00", Some("date-time") ; "datetime with space")]
#[test_case("2024-01-15", Some("date") ; "date")]
#[test_case("https://example.com", Some("uri") ; "uri")]
#[test_case("john@example.com", Some("email") ; "email")]
#[test_case("550e8400-e29b-41d4-a716-446655440000", Some("uuid") ; "uuid")]
#[test_case("123 Main St", None ; "plain text")]
#[test_case("10001", None ; "digits")]
#[test_case("a@b", None ; "email without domain dot")]
fn test_format_detection(value: &str, expected: Option<&str>) {
    assert_eq!(FormatDetection::all().detect(value), expected);
}

#[test]
fn test_disable_format_detection() {
    let value = json!({
        "email": "test@example.com",
        "date": "2024-01-15"
    });

    let schema = SchemaInferrer::new()
        .with_formats(FormatDetection::none())
        .infer(&value)
        .unwrap();

    assert_eq!(schema.get_property("email").unwrap().format, None);
    assert_eq!(schema.get_property("date").unwrap().format, None);
}

// ============================================================================
// Multi-Sample Tests
// ============================================================================

#[test]
fn test_infer_samples_requires_keys_present_everywhere() {
    let samples = vec![
        json!({"name": "John", "email": "john@example.com"}),
        json!({"name": "Jane"}),
        json!({"name": "Bob", "email": "bob@example.com"}),
    ];

    let schema = SchemaInferrer::new().infer_samples(&samples).unwrap();

    assert_eq!(schema.properties.len(), 2);
    assert_eq!(schema.required, vec!["name"]);
    assert_eq!(schema.schema_uri.as_deref(), Some(DRAFT_07));
}

#[test]
fn test_infer_samples_new_key_in_later_sample() {
    let samples = vec![json!({"id": 1}), json!({"id": 2, "name": "John"})];

    let schema = SchemaInferrer::new().infer_samples(&samples).unwrap();

    let keys: Vec<&String> = schema.properties.keys().collect();
    assert_eq!(keys, vec!["id", "name"]);
    assert_eq!(schema.required, vec!["id"]);
}

#[test]
fn test_infer_samples_conflicting_types() {
    let samples = vec![
        json!({"value": 42, "nested": {"a": 1}}),
        json!({"value": "forty-two", "nested": {"a": 2, "b": true}}),
    ];

    let schema = SchemaInferrer::new().infer_samples(&samples).unwrap();

    let value = schema.get_property("value").unwrap();
    let labels: Vec<&str> = value
        .alternatives()
        .unwrap()
        .iter()
        .map(|alternative| alternative.kind.label())
        .collect();
    assert_eq!(labels, vec!["integer", "string"]);

    let nested = schema.get_property("nested").unwrap();
    assert_eq!(nested.json_type(), Some(JsonType::Object));
    assert_eq!(nested.required, vec!["a"]);
    assert!(nested.get_property("b").is_some());
}

#[test]
fn test_infer_samples_empty_array_absorbed() {
    let samples = vec![json!({"tags": []}), json!({"tags": ["x"]})];

    let schema = SchemaInferrer::new().infer_samples(&samples).unwrap();

    let items = schema.get_property("tags").unwrap().items.as_ref().unwrap();
    assert_eq!(items.json_type(), Some(JsonType::String));
}

#[test]
fn test_infer_samples_rejects_empty_and_non_objects() {
    let inferrer = SchemaInferrer::new();

    assert!(matches!(inferrer.infer_samples(&[]), Err(Error::NoSamples)));
    assert!(matches!(
        inferrer.infer_samples(&[json!({"a": 1}), json!([1])]),
        Err(Error::UnsupportedRootType { .. })
    ));
}

// ============================================================================
// Document Parsing Tests
// ============================================================================

#[test]
fn test_parse_round_trip() {
    let document = json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "email": {"type": "string", "format": "email"},
            "tags": {"type": "array", "items": {"oneOf": [{"type": "integer"}, {"type": "string"}]}},
            "anything": {}
        },
        "required": ["email"]
    });

    let schema = SchemaNode::from_json(&document).unwrap();

    assert_eq!(schema.schema_uri.as_deref(), Some(DRAFT_07));
    assert_eq!(schema.required, vec!["email"]);
    assert_eq!(
        schema.get_property("anything").unwrap().kind,
        SchemaKind::Any
    );
    assert_eq!(schema.to_json(), document);
}

#[test]
fn test_array_without_items_reads_as_unconstrained() {
    let schema = SchemaNode::from_json(&json!({"type": "array"})).unwrap();

    assert_eq!(
        schema.items.as_deref().map(|items| &items.kind),
        Some(&SchemaKind::Any)
    );
}

#[test_case(json!([]) ; "not an object")]
#[test_case(json!({"type": "int"}) ; "unknown type")]
#[test_case(json!({"type": ["string", "null"]}) ; "type list")]
#[test_case(json!({"type": "string", "oneOf": [{"type": "string"}]}) ; "type with oneOf")]
#[test_case(json!({"oneOf": []}) ; "empty oneOf")]
#[test_case(json!({"type": "string", "properties": {}}) ; "properties on string")]
#[test_case(json!({"type": "object", "required": ["a"]}) ; "required without property")]
#[test_case(json!({"type": "object", "properties": {"a": {}}, "required": ["a", "a"]}) ; "duplicate required")]
#[test_case(json!({"type": "object", "required": "a"}) ; "required not array")]
#[test_case(json!({"type": "string", "items": {}}) ; "items on string")]
#[test_case(json!({"type": "string", "format": 5}) ; "format not string")]
#[test_case(json!({"type": "string", "minLength": 1}) ; "unsupported keyword")]
#[test_case(json!({"$schema": 7, "type": "object"}) ; "schema uri not string")]
fn test_parse_malformed(document: Value) {
    let err = SchemaNode::from_json(&document).unwrap_err();
    assert!(matches!(err, Error::MalformedSchema { .. }), "got {err}");
}

#[test]
fn test_malformed_path_points_at_problem() {
    let document = json!({
        "type": "object",
        "properties": {"address": {"type": "object", "properties": {"zip": {"type": "int"}}}}
    });

    match SchemaNode::from_json(&document).unwrap_err() {
        Error::MalformedSchema { path, .. } => {
            assert_eq!(path, "/properties/address/properties/zip/type");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_lenient_parser_ignores_unknown_keywords() {
    let document = json!({"type": "array", "items": {"type": "integer"}, "minItems": 1});

    let schema = SchemaParser::new()
        .with_strict_vocabulary(false)
        .parse(&document)
        .unwrap();

    assert_eq!(schema.json_type(), Some(JsonType::Array));
    assert_eq!(schema.to_json(), json!({"type": "array", "items": {"type": "integer"}}));
}

#[test]
fn test_parser_depth_ceiling() {
    let mut document = json!({"type": "string"});
    for _ in 0..20 {
        document = json!({"type": "array", "items": document});
    }

    let err = SchemaParser::new().with_max_depth(5).parse(&document).unwrap_err();
    assert!(matches!(err, Error::MaxDepthExceeded { max_depth: 5, .. }));
}

#[test]
fn test_schema_node_serde() {
    let schema = infer_schema(&json!({"name": "John", "age": 30})).unwrap();

    let text = serde_json::to_string(&schema).unwrap();
    let back: SchemaNode = serde_json::from_str(&text).unwrap();

    assert!(back.same_shape(&schema));
    assert_eq!(back.schema_uri, schema.schema_uri);
}

#[test]
fn test_same_shape_ignores_order_and_format() {
    let a = SchemaNode::from_json(&json!({
        "type": "object",
        "properties": {"a": {"type": "string", "format": "email"}, "b": {"type": "integer"}},
        "required": ["a", "b"]
    }))
    .unwrap();
    let b = SchemaNode::from_json(&json!({
        "type": "object",
        "properties": {"b": {"type": "integer"}, "a": {"type": "string"}},
        "required": ["b", "a"]
    }))
    .unwrap();

    assert!(a.same_shape(&b));
    assert!(!a.same_shape(&SchemaNode::new(JsonType::Object)));
}
