//! Expected-schema derivation and structural comparison.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::ValidationContext;
use crate::error::Result;
use crate::frame::DataType;

/// One column of a schema: name, storage type, nullability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaEntry {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl SchemaEntry {
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
        }
    }
}

/// Derive the expected schema from the context's source declaration.
///
/// Entries follow declaration order. For parquet sources the entry is named
/// after the source column, since it describes the file before ingestion
/// renames columns to feature names. A column is nullable exactly when its
/// feature is not required.
pub fn expected_schema(ctx: &ValidationContext) -> Result<Vec<SchemaEntry>> {
    ctx.source
        .column_bindings()
        .into_iter()
        .map(|(column_name, feature_name)| {
            let feature = ctx.feature(&feature_name)?;
            Ok(SchemaEntry {
                name: column_name,
                data_type: feature.feature_type.data_type(),
                nullable: !feature.required,
            })
        })
        .collect()
}

/// Order-insensitive structural schema equivalence.
///
/// Two schemas are equivalent iff they hold the same multiset of
/// `(name, type, nullable)` entries. Any type or nullability difference on a
/// shared name, any name on only one side, or a duplicate-count difference
/// yields `false`.
pub fn schemas_equivalent(expected: &[SchemaEntry], observed: &[SchemaEntry]) -> bool {
    if expected.len() != observed.len() {
        return false;
    }
    let mut counts: HashMap<&SchemaEntry, i64> = HashMap::new();
    for entry in expected {
        *counts.entry(entry).or_insert(0) += 1;
    }
    for entry in observed {
        match counts.get_mut(entry) {
            Some(count) => *count -= 1,
            None => return false,
        }
    }
    counts.values().all(|&count| count == 0)
}
