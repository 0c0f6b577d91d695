//! Ingestion: raw sources to typed datasets under the declared mapping.

use indexmap::IndexMap;

use crate::config::{SourceDeclaration, ValidationContext};
use crate::error::{Error, Result};
use crate::frame::{self, ColumnTarget, RawFrame, SourceMetadata, TypedFrame};

/// Read the context's declared CSV source into its native representation.
///
/// Parquet sources are decoded by an external reader and enter through
/// [`ingest`] as an already-loaded [`RawFrame`].
pub fn read_csv(ctx: &ValidationContext) -> Result<(RawFrame, SourceMetadata)> {
    match &ctx.source {
        SourceDeclaration::Csv { path, schema } => frame::read_csv(path, schema),
        SourceDeclaration::Parquet { .. } => Err(Error::UnsupportedFormat(
            "parquet sources must be loaded by the source reader and passed to ingest".to_string(),
        )),
    }
}

/// Ingest a raw source under the declared column-to-feature mapping.
///
/// Source columns are selected and renamed to their feature names, and each
/// is assigned its declared semantic type and nullability. The returned dataset casts
/// lazily: a column whose native representation cannot carry its declared
/// type fails with [`Error::TypeMismatch`] when a collection operation
/// runs, not here.
pub fn ingest(ctx: &ValidationContext, raw: RawFrame) -> Result<TypedFrame> {
    let bindings = ctx.source.column_bindings();

    let selected = raw.select_as(&bindings)?;

    let mut target: IndexMap<String, ColumnTarget> = IndexMap::new();
    for (_, feature_name) in &bindings {
        let feature = ctx.feature(feature_name)?;
        target.insert(
            feature_name.clone(),
            ColumnTarget::new(feature.feature_type.data_type(), !feature.required),
        );
    }

    TypedFrame::new(selected, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap as Map;

    use crate::config::{ColumnMapping, FeatureType, RawFeature};
    use crate::frame::Column;

    fn parquet_context() -> ValidationContext {
        let features = vec![
            RawFeature::new("a_feat", FeatureType::String).required(true),
            RawFeature::new("c_feat", FeatureType::Int),
        ];
        ValidationContext {
            raw_features: features.into_iter().map(|f| (f.name.clone(), f)).collect(),
            source: SourceDeclaration::Parquet {
                path: "data.parquet".into(),
                schema: vec![
                    ColumnMapping {
                        column_name: "a_col".to_string(),
                        feature_name: "a_feat".to_string(),
                    },
                    ColumnMapping {
                        column_name: "c_col".to_string(),
                        feature_name: "c_feat".to_string(),
                    },
                ],
            },
            aggregates: Map::new(),
        }
    }

    #[test]
    fn test_ingest_renames_to_feature_names() {
        let mut columns = Map::new();
        columns.insert("a_col".to_string(), Column::str(vec![Some("a"), None]));
        columns.insert("c_col".to_string(), Column::int(vec![Some(1), Some(2)]));
        let raw = RawFrame::from_columns(columns).unwrap();

        let typed = ingest(&parquet_context(), raw).unwrap();
        let names: Vec<&str> = typed.column_names().collect();
        assert_eq!(names, vec!["a_feat", "c_feat"]);
        assert_eq!(typed.count(), 2);
    }

    #[test]
    fn test_ingest_missing_source_column_fails() {
        let mut columns = Map::new();
        columns.insert("a_col".to_string(), Column::str(vec![Some("a")]));
        let raw = RawFrame::from_columns(columns).unwrap();

        assert!(matches!(
            ingest(&parquet_context(), raw),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_read_csv_rejects_parquet_source() {
        let ctx = parquet_context();
        assert!(matches!(
            read_csv(&ctx),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}
