//! Required-field inference policy

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decides which observed object keys end up in `required`
///
/// A single sample carries no evidence about optionality, so every policy
/// is a guess. `AllPresentKeys` is the default and marks a semantically
/// optional key as required whenever it happens to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredInferencePolicy {
    /// Every observed key is required
    #[default]
    AllPresentKeys,
    /// Nothing is required
    None,
    /// Keys holding `null` are treated as optional, the rest are required
    Heuristic,
}

impl RequiredInferencePolicy {
    /// Required keys for one observed object, in insertion order
    pub fn required_keys(self, object: &Map<String, Value>) -> Vec<String> {
        match self {
            Self::AllPresentKeys => object.keys().cloned().collect(),
            Self::None => Vec::new(),
            Self::Heuristic => object
                .iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, _)| key.clone())
                .collect(),
        }
    }
}
