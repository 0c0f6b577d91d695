//! Aggregate declarations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// A column reference that is either a single name or a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Single(String),
    Many(Vec<String>),
}

/// Declared inputs for an aggregate: which columns it reads and the raw
/// arguments passed to the implementation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateInputs {
    /// Named column references, flattened positionally at dispatch time.
    #[serde(default)]
    pub features: IndexMap<String, ColumnRef>,
    /// Raw argument literals, normalized before computation.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub args: IndexMap<String, Json>,
}

/// A named, registry-resolved aggregation over one or more columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateDeclaration {
    pub name: String,
    pub id: String,
    /// Registry reference in `namespace.name` form.
    pub aggregator: String,
    pub inputs: AggregateInputs,
}
