//! Schema inference from JSON values

use super::classify::classify;
use super::formats::FormatDetection;
use super::parse::DEFAULT_MAX_DEPTH;
use super::policy::RequiredInferencePolicy;
use super::types::{JsonType, SchemaKind, SchemaNode, DRAFT_07};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

/// Schema inferrer with configuration options
#[derive(Debug, Clone)]
pub struct SchemaInferrer {
    /// String formats to detect
    formats: FormatDetection,
    /// Maximum depth for nested values
    max_depth: usize,
    /// How observed keys become required
    required_policy: RequiredInferencePolicy,
    /// `$schema` attached to the root
    schema_uri: Option<String>,
}

impl Default for SchemaInferrer {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaInferrer {
    /// Create a new schema inferrer with default settings
    pub fn new() -> Self {
        Self {
            formats: FormatDetection::all(),
            max_depth: DEFAULT_MAX_DEPTH,
            required_policy: RequiredInferencePolicy::default(),
            schema_uri: Some(DRAFT_07.to_string()),
        }
    }

    /// Create an inferrer from engine configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            formats: config.formats,
            max_depth: config.max_depth,
            required_policy: config.required_policy,
            schema_uri: config.schema_uri.clone(),
        }
    }

    /// Set which string formats to detect
    #[must_use]
    pub fn with_formats(mut self, formats: FormatDetection) -> Self {
        self.formats = formats;
        self
    }

    /// Set maximum depth for nested values
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the required-field policy
    #[must_use]
    pub fn with_required_policy(mut self, policy: RequiredInferencePolicy) -> Self {
        self.required_policy = policy;
        self
    }

    /// Set the `$schema` URI attached to the root (None to omit it)
    #[must_use]
    pub fn with_schema_uri(mut self, uri: Option<&str>) -> Self {
        self.schema_uri = uri.map(str::to_string);
        self
    }

    /// Required-field policy in use
    pub fn required_policy(&self) -> RequiredInferencePolicy {
        self.required_policy
    }

    /// Infer schema from a single JSON object
    pub fn infer(&self, value: &Value) -> Result<SchemaNode> {
        let mut schema = self.infer_root(value)?;
        schema.schema_uri.clone_from(&self.schema_uri);
        debug!(
            properties = schema.properties.len(),
            required = schema.required.len(),
            "inferred schema"
        );
        Ok(schema)
    }

    /// Infer one schema from several sample objects
    ///
    /// Keys missing from any sample are never required. Values that disagree
    /// across samples become `oneOf` alternatives, objects merge key by key.
    pub fn infer_samples(&self, samples: &[Value]) -> Result<SchemaNode> {
        let (first, rest) = samples.split_first().ok_or(Error::NoSamples)?;

        let mut schema = self.infer_root(first)?;
        for sample in rest {
            schema = unify(schema, self.infer_root(sample)?);
        }

        schema.schema_uri.clone_from(&self.schema_uri);
        debug!(
            samples = samples.len(),
            properties = schema.properties.len(),
            required = schema.required.len(),
            "inferred schema from samples"
        );
        Ok(schema)
    }

    fn infer_root(&self, value: &Value) -> Result<SchemaNode> {
        match value {
            Value::Object(map) => self.infer_object(map, "", 0),
            other => Err(Error::UnsupportedRootType {
                found: classify(other),
            }),
        }
    }

    /// Infer a node from a JSON value
    fn infer_node(&self, value: &Value, path: &str, depth: usize) -> Result<SchemaNode> {
        if depth > self.max_depth {
            return Err(Error::max_depth(self.max_depth, path));
        }

        match value {
            Value::String(s) => Ok(self.infer_string(s)),
            Value::Array(items) => self.infer_array(items, path, depth),
            Value::Object(map) => self.infer_object(map, path, depth),
            scalar => Ok(SchemaNode::new(classify(scalar))),
        }
    }

    fn infer_string(&self, s: &str) -> SchemaNode {
        let node = SchemaNode::new(JsonType::String);
        match self.formats.detect(s) {
            Some(format) => node.with_format(format),
            None => node,
        }
    }

    /// Element schemas collapse to one schema when they all share a shape,
    /// otherwise to a `oneOf` of the distinct shapes in first-seen order.
    fn infer_array(&self, items: &[Value], path: &str, depth: usize) -> Result<SchemaNode> {
        let item_path = format!("{path}[]");
        let mut distinct: Vec<SchemaNode> = Vec::new();

        for item in items {
            let schema = self.infer_node(item, &item_path, depth + 1)?;
            if !distinct.iter().any(|seen| seen.same_shape(&schema)) {
                distinct.push(schema);
            }
        }

        let item_schema = if distinct.len() > 1 {
            SchemaNode::one_of(distinct)
        } else {
            distinct.pop().unwrap_or_else(SchemaNode::any)
        };

        Ok(SchemaNode::array(item_schema))
    }

    fn infer_object(&self, map: &Map<String, Value>, path: &str, depth: usize) -> Result<SchemaNode> {
        let mut properties = IndexMap::with_capacity(map.len());

        for (key, val) in map {
            let property = self.infer_node(val, &join_path(path, key), depth + 1)?;
            properties.insert(key.clone(), property);
        }

        Ok(SchemaNode::object(
            properties,
            self.required_policy.required_keys(map),
        ))
    }
}

/// Infer schema from a single JSON object (convenience function)
pub fn infer_schema(value: &Value) -> Result<SchemaNode> {
    SchemaInferrer::new().infer(value)
}

/// Join a property key onto a dotted schema path
pub(crate) fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Merge two observations of the same location
fn unify(a: SchemaNode, b: SchemaNode) -> SchemaNode {
    match (a.json_type(), b.json_type()) {
        (Some(JsonType::Object), Some(JsonType::Object)) => unify_objects(a, b),
        (Some(JsonType::Array), Some(JsonType::Array)) => {
            let items = match (a.items, b.items) {
                (Some(a_items), Some(b_items)) => unify(*a_items, *b_items),
                (Some(items), None) | (None, Some(items)) => *items,
                (None, None) => SchemaNode::any(),
            };
            SchemaNode::array(items)
        }
        _ if a.kind == SchemaKind::Any => b,
        _ if b.kind == SchemaKind::Any || a.same_shape(&b) => a,
        _ => merge_alternatives(a, b),
    }
}

fn unify_objects(mut a: SchemaNode, mut b: SchemaNode) -> SchemaNode {
    let mut properties = IndexMap::with_capacity(a.properties.len().max(b.properties.len()));

    for (key, a_prop) in a.properties.drain(..) {
        let merged = match b.properties.shift_remove(&key) {
            Some(b_prop) => unify(a_prop, b_prop),
            None => a_prop,
        };
        properties.insert(key, merged);
    }
    properties.extend(b.properties.drain(..));

    // A key is required only if every observation required it
    let required = a
        .required
        .into_iter()
        .filter(|key| b.required.contains(key))
        .collect();

    SchemaNode::object(properties, required)
}

fn merge_alternatives(a: SchemaNode, b: SchemaNode) -> SchemaNode {
    let mut alternatives = into_alternatives(a);
    for candidate in into_alternatives(b) {
        if !alternatives.iter().any(|seen| seen.same_shape(&candidate)) {
            alternatives.push(candidate);
        }
    }
    SchemaNode::one_of(alternatives)
}

fn into_alternatives(node: SchemaNode) -> Vec<SchemaNode> {
    match node.kind {
        SchemaKind::OneOf(alternatives) => alternatives,
        _ => vec![node],
    }
}
