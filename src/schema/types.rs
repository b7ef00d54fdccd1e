//! Schema types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Draft-07 meta-schema URI attached to inferred root schemas
pub const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// JSON Schema primitive type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

impl JsonType {
    /// Keyword used for this type in schema documents
    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Integer => "integer",
            JsonType::Boolean => "boolean",
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::Null => "null",
        }
    }

    /// Parse a `type` keyword value
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(JsonType::String),
            "number" => Some(JsonType::Number),
            "integer" => Some(JsonType::Integer),
            "boolean" => Some(JsonType::Boolean),
            "object" => Some(JsonType::Object),
            "array" => Some(JsonType::Array),
            "null" => Some(JsonType::Null),
            _ => None,
        }
    }
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a schema node admits
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// No constraint (`{}`), e.g. the items of an empty array
    Any,
    /// A single primitive type
    Type(JsonType),
    /// Exactly one of several alternatives
    OneOf(Vec<SchemaNode>),
}

impl SchemaKind {
    /// Short label used in difference reports
    pub fn label(&self) -> &'static str {
        match self {
            SchemaKind::Any => "any",
            SchemaKind::Type(t) => t.as_str(),
            SchemaKind::OneOf(_) => "oneOf",
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A node in a schema tree
///
/// Each node owns its children outright. Object nodes carry `properties`
/// and `required` (always a subset of the property keys), array nodes always
/// carry `items`. Other nodes leave those empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    /// Type constraint
    pub kind: SchemaKind,

    /// Object properties in insertion order
    pub properties: IndexMap<String, SchemaNode>,

    /// Required property keys in insertion order
    pub required: Vec<String>,

    /// Array items schema
    pub items: Option<Box<SchemaNode>>,

    /// Format hint (e.g., "date-time", "email", "uri"); never compared
    pub format: Option<String>,

    /// `$schema` passthrough, only kept on the root
    pub schema_uri: Option<String>,
}

impl SchemaNode {
    fn with_kind(kind: SchemaKind) -> Self {
        Self {
            kind,
            properties: IndexMap::new(),
            required: Vec::new(),
            items: None,
            format: None,
            schema_uri: None,
        }
    }

    /// Create an unconstrained node
    pub fn any() -> Self {
        Self::with_kind(SchemaKind::Any)
    }

    /// Create a node with the given type
    ///
    /// Object nodes start with no properties, array nodes with `{}` items.
    pub fn new(json_type: JsonType) -> Self {
        let mut node = Self::with_kind(SchemaKind::Type(json_type));
        if json_type == JsonType::Array {
            node.items = Some(Box::new(Self::any()));
        }
        node
    }

    /// Create an object node
    ///
    /// Required keys without a matching property are dropped.
    pub fn object(properties: IndexMap<String, SchemaNode>, required: Vec<String>) -> Self {
        let mut node = Self::with_kind(SchemaKind::Type(JsonType::Object));
        node.required = required
            .into_iter()
            .filter(|key| properties.contains_key(key))
            .collect();
        node.properties = properties;
        node
    }

    /// Create an array node with an item schema
    pub fn array(items: SchemaNode) -> Self {
        let mut node = Self::with_kind(SchemaKind::Type(JsonType::Array));
        node.items = Some(Box::new(items));
        node
    }

    /// Create a `oneOf` node from alternatives
    pub fn one_of(alternatives: Vec<SchemaNode>) -> Self {
        Self::with_kind(SchemaKind::OneOf(alternatives))
    }

    /// Set format hint
    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Set the `$schema` URI
    #[must_use]
    pub fn with_schema_uri(mut self, uri: &str) -> Self {
        self.schema_uri = Some(uri.to_string());
        self
    }

    /// Primitive type of this node, if it has exactly one
    pub fn json_type(&self) -> Option<JsonType> {
        match self.kind {
            SchemaKind::Type(t) => Some(t),
            _ => None,
        }
    }

    /// `oneOf` alternatives, if this is a `oneOf` node
    pub fn alternatives(&self) -> Option<&[SchemaNode]> {
        match &self.kind {
            SchemaKind::OneOf(alternatives) => Some(alternatives),
            _ => None,
        }
    }

    /// Get a property
    pub fn get_property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.get(name)
    }

    /// Check if a property is required
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|key| key == name)
    }

    /// Structural equality
    ///
    /// Kinds must match, object nodes need the same property and required
    /// sets (in any order) with structurally equal property schemas, and
    /// array items must match. `format` and `$schema` are ignored.
    pub fn same_shape(&self, other: &SchemaNode) -> bool {
        let kinds_match = match (&self.kind, &other.kind) {
            (SchemaKind::Any, SchemaKind::Any) => true,
            (SchemaKind::Type(a), SchemaKind::Type(b)) => a == b,
            (SchemaKind::OneOf(a), SchemaKind::OneOf(b)) => same_alternatives(a, b),
            _ => false,
        };
        if !kinds_match {
            return false;
        }

        let items_match = match (&self.items, &other.items) {
            (Some(a), Some(b)) => a.same_shape(b),
            (None, None) => true,
            _ => false,
        };

        items_match
            && self.properties.len() == other.properties.len()
            && self.properties.iter().all(|(key, schema)| {
                other
                    .properties
                    .get(key)
                    .is_some_and(|theirs| schema.same_shape(theirs))
            })
            && same_key_set(&self.required, &other.required)
    }
}

/// Whether two alternative lists admit the same shapes, ignoring order
pub(crate) fn same_alternatives(a: &[SchemaNode], b: &[SchemaNode]) -> bool {
    a.iter().all(|x| b.iter().any(|y| x.same_shape(y)))
        && b.iter().all(|y| a.iter().any(|x| x.same_shape(y)))
}

fn same_key_set(a: &[String], b: &[String]) -> bool {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    a == b
}
