//! Schema diff module
//!
//! Structurally compares an expected schema with an inferred one and
//! reports path-addressed differences.
//!
//! Paths use `.` between property keys and a `[]` suffix for array items:
//! `""` is the root, `address.city` a nested property, `hobbies[]` the
//! items of an array.

mod differ;
mod types;

pub use differ::compare_schemas;
pub use types::{ComparisonResult, Difference, Issue};
