//! Schema document parsing and rendering
//!
//! Schema documents use the draft-07 vocabulary restricted to `$schema`,
//! `type`, `properties`, `required`, `items`, `oneOf` and `format`.

use super::types::{JsonType, SchemaKind, SchemaNode};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

/// Default nesting ceiling for inference and parsing
pub const DEFAULT_MAX_DEPTH: usize = 64;

const KEYWORDS: [&str; 7] = [
    "$schema",
    "type",
    "properties",
    "required",
    "items",
    "oneOf",
    "format",
];

/// Parser for schema documents with configurable strictness
#[derive(Debug, Clone)]
pub struct SchemaParser {
    /// Reject keywords outside the supported vocabulary
    strict_vocabulary: bool,
    /// Maximum nesting depth
    max_depth: usize,
}

impl Default for SchemaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaParser {
    /// Create a strict parser with the default depth ceiling
    pub fn new() -> Self {
        Self {
            strict_vocabulary: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Enable/disable rejection of unsupported keywords
    #[must_use]
    pub fn with_strict_vocabulary(mut self, strict: bool) -> Self {
        self.strict_vocabulary = strict;
        self
    }

    /// Set maximum nesting depth
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Parse a schema document
    pub fn parse(&self, document: &Value) -> Result<SchemaNode> {
        let mut node = self.parse_node(document, "", 0)?;
        if let Some(uri) = document.get("$schema") {
            let uri = uri
                .as_str()
                .ok_or_else(|| Error::malformed("/$schema", "`$schema` must be a string"))?;
            node.schema_uri = Some(uri.to_string());
        }
        Ok(node)
    }

    /// Parse a schema document from JSON text
    pub fn parse_str(&self, text: &str) -> Result<SchemaNode> {
        let document: Value = serde_json::from_str(text)?;
        self.parse(&document)
    }

    fn parse_node(&self, value: &Value, pointer: &str, depth: usize) -> Result<SchemaNode> {
        if depth > self.max_depth {
            return Err(Error::max_depth(self.max_depth, pointer));
        }

        let Value::Object(map) = value else {
            return Err(Error::malformed(pointer, "schema must be an object"));
        };

        for key in map.keys() {
            if KEYWORDS.contains(&key.as_str()) {
                continue;
            }
            if self.strict_vocabulary {
                return Err(Error::malformed(
                    pointer,
                    format!("unsupported keyword '{key}'"),
                ));
            }
            debug!(keyword = %key, pointer, "ignoring unsupported schema keyword");
        }

        let kind = match (map.get("type"), map.get("oneOf")) {
            (Some(_), Some(_)) => {
                return Err(Error::malformed(
                    pointer,
                    "`type` and `oneOf` cannot be combined",
                ))
            }
            (Some(ty), None) => SchemaKind::Type(parse_type(ty, pointer)?),
            (None, Some(alternatives)) => {
                SchemaKind::OneOf(self.parse_alternatives(alternatives, pointer, depth)?)
            }
            (None, None) => SchemaKind::Any,
        };

        let is_object = kind == SchemaKind::Type(JsonType::Object);
        let is_array = kind == SchemaKind::Type(JsonType::Array);

        let mut node = match kind {
            SchemaKind::Type(t) => SchemaNode::new(t),
            SchemaKind::Any => SchemaNode::any(),
            SchemaKind::OneOf(alternatives) => SchemaNode::one_of(alternatives),
        };

        if let Some(properties) = map.get("properties") {
            if !is_object {
                return Err(Error::malformed(
                    pointer,
                    "`properties` requires `type: object`",
                ));
            }
            node.properties = self.parse_properties(properties, pointer, depth)?;
        }

        if let Some(required) = map.get("required") {
            if !is_object {
                return Err(Error::malformed(
                    pointer,
                    "`required` requires `type: object`",
                ));
            }
            node.required = parse_required(required, &node.properties, pointer)?;
        }

        if let Some(items) = map.get("items") {
            if !is_array {
                return Err(Error::malformed(pointer, "`items` requires `type: array`"));
            }
            let items_pointer = format!("{pointer}/items");
            node.items = Some(Box::new(self.parse_node(items, &items_pointer, depth + 1)?));
        }

        if let Some(format) = map.get("format") {
            let format = format.as_str().ok_or_else(|| {
                Error::malformed(format!("{pointer}/format"), "`format` must be a string")
            })?;
            node.format = Some(format.to_string());
        }

        Ok(node)
    }

    fn parse_alternatives(
        &self,
        value: &Value,
        pointer: &str,
        depth: usize,
    ) -> Result<Vec<SchemaNode>> {
        let one_of_pointer = format!("{pointer}/oneOf");
        let alternatives = value
            .as_array()
            .filter(|alternatives| !alternatives.is_empty())
            .ok_or_else(|| Error::malformed(&one_of_pointer, "`oneOf` must be a non-empty array"))?;

        alternatives
            .iter()
            .enumerate()
            .map(|(index, alternative)| {
                self.parse_node(alternative, &format!("{one_of_pointer}/{index}"), depth + 1)
            })
            .collect()
    }

    fn parse_properties(
        &self,
        value: &Value,
        pointer: &str,
        depth: usize,
    ) -> Result<IndexMap<String, SchemaNode>> {
        let properties_pointer = format!("{pointer}/properties");
        let map = value
            .as_object()
            .ok_or_else(|| Error::malformed(&properties_pointer, "`properties` must be an object"))?;

        let mut properties = IndexMap::with_capacity(map.len());
        for (key, schema) in map {
            let property_pointer = format!("{properties_pointer}/{}", escape_pointer(key));
            properties.insert(key.clone(), self.parse_node(schema, &property_pointer, depth + 1)?);
        }
        Ok(properties)
    }
}

fn parse_type(value: &Value, pointer: &str) -> Result<JsonType> {
    let type_pointer = format!("{pointer}/type");
    let name = value
        .as_str()
        .ok_or_else(|| Error::malformed(&type_pointer, "`type` must be a single type name"))?;
    JsonType::from_name(name)
        .ok_or_else(|| Error::malformed(&type_pointer, format!("unknown type '{name}'")))
}

fn parse_required(
    value: &Value,
    properties: &IndexMap<String, SchemaNode>,
    pointer: &str,
) -> Result<Vec<String>> {
    let required_pointer = format!("{pointer}/required");
    let keys = value
        .as_array()
        .ok_or_else(|| Error::malformed(&required_pointer, "`required` must be an array"))?;

    let mut seen = HashSet::new();
    let mut required = Vec::with_capacity(keys.len());
    for key in keys {
        let key = key.as_str().ok_or_else(|| {
            Error::malformed(&required_pointer, "`required` entries must be strings")
        })?;
        if !seen.insert(key) {
            return Err(Error::malformed(
                &required_pointer,
                format!("duplicate required key '{key}'"),
            ));
        }
        if !properties.contains_key(key) {
            return Err(Error::malformed(
                &required_pointer,
                format!("required key '{key}' has no property definition"),
            ));
        }
        required.push(key.to_string());
    }
    Ok(required)
}

fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

impl SchemaNode {
    /// Parse a schema document with the default strict parser
    pub fn from_json(document: &Value) -> Result<Self> {
        SchemaParser::new().parse(document)
    }

    /// Render this node as a draft-07 schema document
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();

        if let Some(uri) = &self.schema_uri {
            map.insert("$schema".to_string(), Value::from(uri.as_str()));
        }

        match &self.kind {
            SchemaKind::Any => {}
            SchemaKind::Type(t) => {
                map.insert("type".to_string(), Value::from(t.as_str()));
            }
            SchemaKind::OneOf(alternatives) => {
                map.insert(
                    "oneOf".to_string(),
                    Value::Array(alternatives.iter().map(SchemaNode::to_json).collect()),
                );
            }
        }

        if let Some(format) = &self.format {
            map.insert("format".to_string(), Value::from(format.as_str()));
        }

        if self.json_type() == Some(JsonType::Object) {
            let properties = self
                .properties
                .iter()
                .map(|(key, schema)| (key.clone(), schema.to_json()))
                .collect();
            map.insert("properties".to_string(), Value::Object(properties));
            map.insert(
                "required".to_string(),
                Value::Array(self.required.iter().map(|k| Value::from(k.as_str())).collect()),
            );
        }

        if let Some(items) = &self.items {
            map.insert("items".to_string(), items.to_json());
        }

        Value::Object(map)
    }

    /// Render as a pretty JSON string
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SchemaNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let document = Value::deserialize(deserializer)?;
        SchemaNode::from_json(&document).map_err(D::Error::custom)
    }
}
