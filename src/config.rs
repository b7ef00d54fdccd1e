//! Engine configuration
//!
//! Every field has a default, so an empty document is a valid config.
//!
//! ```yaml
//! max_depth: 32
//! required_policy: heuristic
//! formats:
//!   uuid: false
//! schema_uri: "http://json-schema.org/draft-07/schema#"
//! strict_vocabulary: true
//! check_conformance: true
//! log_level: DEBUG
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::schema::{FormatDetection, RequiredInferencePolicy, DEFAULT_MAX_DEPTH, DRAFT_07};
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for inference, comparison and validation runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum nesting depth for values and schema documents
    pub max_depth: usize,

    /// How observed keys become required
    pub required_policy: RequiredInferencePolicy,

    /// String formats to detect during inference
    pub formats: FormatDetection,

    /// `$schema` attached to inferred roots (null to omit)
    pub schema_uri: Option<String>,

    /// Reject expected schemas that use unsupported keywords
    pub strict_vocabulary: bool,

    /// Validate raw input against the expected schema
    pub check_conformance: bool,

    /// Log level for `init_logging`
    pub log_level: LogLevel,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            required_policy: RequiredInferencePolicy::default(),
            formats: FormatDetection::default(),
            schema_uri: Some(DRAFT_07.to_string()),
            strict_vocabulary: true,
            check_conformance: true,
            log_level: LogLevel::default(),
        }
    }
}

/// Load engine configuration from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<EngineConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    load_config_from_str(&content)
}

/// Load engine configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<EngineConfig> {
    if yaml.trim().is_empty() {
        return Ok(EngineConfig::default());
    }

    let config: EngineConfig = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse engine config: {e}")))?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate an engine configuration
fn validate_config(config: &EngineConfig) -> Result<()> {
    if config.max_depth == 0 {
        return Err(Error::config("max_depth must be at least 1"));
    }

    if let Some(uri) = &config.schema_uri {
        if uri.trim().is_empty() {
            return Err(Error::config("schema_uri cannot be empty"));
        }
    }

    Ok(())
}
