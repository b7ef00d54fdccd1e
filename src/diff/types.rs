//! Comparison result types
//!
//! The serialized shape (`passed`, `differences`, `path`, `issue`,
//! `missing`, `extra`) is consumed by external reporters and must not change.

use serde::{Deserialize, Serialize};

/// Category of a schema difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Issue {
    /// Nodes admit different types
    TypeMismatch,
    /// Object nodes disagree on required keys
    RequiredFieldsMismatch,
    /// Expected property absent from the actual schema
    MissingProperty,
    /// Actual property absent from the expected schema
    ExtraProperty,
    /// Array items disagree on `oneOf` alternatives
    ArrayItemTypeMismatch,
}

impl Issue {
    /// Wire name of this issue
    pub fn as_str(self) -> &'static str {
        match self {
            Issue::TypeMismatch => "type_mismatch",
            Issue::RequiredFieldsMismatch => "required_fields_mismatch",
            Issue::MissingProperty => "missing_property",
            Issue::ExtraProperty => "extra_property",
            Issue::ArrayItemTypeMismatch => "array_item_type_mismatch",
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One path-addressed difference between two schemas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    /// Location in the schema tree ("" is the root)
    pub path: String,
    /// What kind of difference
    pub issue: Issue,
    /// Present in expected, absent in actual
    #[serde(default)]
    pub missing: Vec<String>,
    /// Present in actual, absent in expected
    #[serde(default)]
    pub extra: Vec<String>,
}

impl Difference {
    /// Create a difference
    pub fn new(
        path: impl Into<String>,
        issue: Issue,
        missing: Vec<String>,
        extra: Vec<String>,
    ) -> Self {
        Self {
            path: path.into(),
            issue,
            missing,
            extra,
        }
    }

    /// Create a type mismatch between two kind labels
    pub fn type_mismatch(path: impl Into<String>, expected: &str, actual: &str) -> Self {
        Self::new(
            path,
            Issue::TypeMismatch,
            vec![expected.to_string()],
            vec![actual.to_string()],
        )
    }
}

/// Outcome of comparing an expected schema with an actual one
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// True iff there are no differences
    pub passed: bool,
    /// Differences in depth-first order
    pub differences: Vec<Difference>,
}

impl ComparisonResult {
    /// Build a result from collected differences
    pub fn from_differences(differences: Vec<Difference>) -> Self {
        Self {
            passed: differences.is_empty(),
            differences,
        }
    }

    /// Differences of one kind
    pub fn issues(&self, issue: Issue) -> impl Iterator<Item = &Difference> {
        self.differences.iter().filter(move |d| d.issue == issue)
    }
}
