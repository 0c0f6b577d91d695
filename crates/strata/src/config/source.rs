//! Source declarations: where the data lives and how columns map to features.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One column-to-feature binding for sources with named columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Column name in the source file.
    pub column_name: String,
    /// Feature definition the column is validated against.
    pub feature_name: String,
}

/// Declared data source.
///
/// CSV sources are positional: the schema lists feature names in file column
/// order. Parquet sources carry their own column names and map each to a
/// feature explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceDeclaration {
    Csv {
        path: PathBuf,
        schema: Vec<String>,
    },
    Parquet {
        path: PathBuf,
        schema: Vec<ColumnMapping>,
    },
}

impl SourceDeclaration {
    /// Unified `(source column, feature name)` pairs in declaration order.
    /// For CSV sources the two coincide.
    pub fn column_bindings(&self) -> Vec<(String, String)> {
        match self {
            SourceDeclaration::Csv { schema, .. } => schema
                .iter()
                .map(|name| (name.clone(), name.clone()))
                .collect(),
            SourceDeclaration::Parquet { schema, .. } => schema
                .iter()
                .map(|m| (m.column_name.clone(), m.feature_name.clone()))
                .collect(),
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            SourceDeclaration::Csv { path, .. } | SourceDeclaration::Parquet { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_declaration_deserializes() {
        let source: SourceDeclaration = serde_json::from_str(
            r#"{"type": "csv", "path": "data.csv", "schema": ["income", "years_employed"]}"#,
        )
        .unwrap();
        assert_eq!(
            source.column_bindings(),
            vec![
                ("income".to_string(), "income".to_string()),
                ("years_employed".to_string(), "years_employed".to_string()),
            ]
        );
    }

    #[test]
    fn test_parquet_declaration_deserializes() {
        let source: SourceDeclaration = serde_json::from_str(
            r#"{
                "type": "parquet",
                "path": "data.parquet",
                "schema": [{"column_name": "a_col", "feature_name": "a_feat"}]
            }"#,
        )
        .unwrap();
        assert_eq!(
            source.column_bindings(),
            vec![("a_col".to_string(), "a_feat".to_string())]
        );
    }
}
