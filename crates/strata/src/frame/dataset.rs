//! Raw and typed dataset handles.
//!
//! `RawFrame` is the native, as-read representation of a source (for CSV,
//! every column is a string column). `TypedFrame` layers declared target
//! types on top without touching the data: casts and predicate evaluation
//! execute lazily when a collection operation runs, so representation
//! mismatches surface at collection time, not at construction.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::expr::Expression;
use crate::schema::SchemaEntry;

use super::column::Column;
use super::eval::eval_predicate;
use super::value::{DataType, Value};

/// Immutable columnar dataset in its native representation.
#[derive(Debug, Clone, Default)]
pub struct RawFrame {
    columns: IndexMap<String, Column>,
    row_count: usize,
}

impl RawFrame {
    /// Build a frame from named columns, which must all have equal length.
    pub fn from_columns(columns: IndexMap<String, Column>) -> Result<Self> {
        let row_count = columns.values().next().map(Column::len).unwrap_or(0);
        for (name, column) in &columns {
            if column.len() != row_count {
                return Err(Error::Config(format!(
                    "column '{}' has {} rows, expected {}",
                    name,
                    column.len(),
                    row_count
                )));
            }
        }
        Ok(Self { columns, row_count })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Native schema as stored: storage types, nullability observed from data.
    pub fn schema(&self) -> Vec<SchemaEntry> {
        self.columns
            .iter()
            .map(|(name, column)| SchemaEntry {
                name: name.clone(),
                data_type: column.dtype(),
                nullable: column.has_null(),
            })
            .collect()
    }

    /// Project and rename columns in the given order.
    ///
    /// Used by ingestion to apply a source declaration's column-to-feature
    /// mapping. A missing source column is a configuration inconsistency.
    pub fn select_as(&self, mapping: &[(String, String)]) -> Result<RawFrame> {
        let mut columns = IndexMap::new();
        for (source, target) in mapping {
            let column = self.columns.get(source).ok_or_else(|| {
                Error::Config(format!("column '{source}' not found in data source"))
            })?;
            columns.insert(target.clone(), column.clone());
        }
        RawFrame::from_columns(columns)
    }
}

/// Declared target of one column: storage type plus nullability.
///
/// Nullability comes from the declaration, not the data, so a required
/// column stays non-nullable even when the file happens to violate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnTarget {
    pub dtype: DataType,
    pub nullable: bool,
}

impl ColumnTarget {
    pub fn new(dtype: DataType, nullable: bool) -> Self {
        Self { dtype, nullable }
    }
}

/// A dataset handle with declared target types per column.
///
/// Construction is cheap and infallible with respect to the data itself;
/// only `collect`, `column`, and `count_where` materialize casts.
#[derive(Debug, Clone)]
pub struct TypedFrame {
    raw: RawFrame,
    target: IndexMap<String, ColumnTarget>,
}

impl TypedFrame {
    /// Attach target types to a raw frame. Every targeted column must exist.
    pub fn new(raw: RawFrame, target: IndexMap<String, ColumnTarget>) -> Result<Self> {
        for name in target.keys() {
            if !raw.has_column(name) {
                return Err(Error::Config(format!(
                    "declared column '{name}' not found in data source"
                )));
            }
        }
        Ok(Self { raw, target })
    }

    /// Number of rows. Does not force casts.
    pub fn count(&self) -> usize {
        self.raw.row_count()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.raw.has_column(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.raw.column_names()
    }

    /// Declared schema: target types and declared nullability. Columns
    /// without a target fall back to their native type, nullability
    /// observed from the data.
    pub fn schema(&self) -> Vec<SchemaEntry> {
        self.raw
            .columns
            .iter()
            .map(|(name, column)| match self.target.get(name) {
                Some(target) => SchemaEntry {
                    name: name.clone(),
                    data_type: target.dtype,
                    nullable: target.nullable,
                },
                None => SchemaEntry {
                    name: name.clone(),
                    data_type: column.dtype(),
                    nullable: column.has_null(),
                },
            })
            .collect()
    }

    /// Materialize one column under its declared type.
    pub fn column(&self, name: &str) -> Result<Column> {
        let column = self
            .raw
            .column(name)
            .ok_or_else(|| Error::Config(format!("column '{name}' not found in dataset")))?;
        match self.target.get(name) {
            Some(target) => column.cast(name, target.dtype),
            None => Ok(column.clone()),
        }
    }

    /// Materialize the whole frame under its declared types.
    pub fn collect(&self) -> Result<RawFrame> {
        let mut columns = IndexMap::new();
        for name in self.raw.columns.keys() {
            columns.insert(name.clone(), self.column(name)?);
        }
        RawFrame::from_columns(columns)
    }

    /// Count rows matching a boolean predicate expression.
    ///
    /// Only the columns the expression references are cast, so a mismatch in
    /// an untouched column does not fail an unrelated count. Counting is a
    /// commutative reduction: the result does not depend on row order.
    pub fn count_where(&self, predicate: &Expression) -> Result<u64> {
        let mut columns: IndexMap<&str, Column> = IndexMap::new();
        for name in predicate.columns() {
            columns.insert(name, self.column(name)?);
        }

        let mut matched = 0u64;
        for row in 0..self.raw.row_count() {
            if eval_predicate(predicate, &columns, row)? == Some(true) {
                matched += 1;
            }
        }
        Ok(matched)
    }

    /// First cell of a materialized column, for single-value inspection.
    pub fn first_value(&self, name: &str) -> Result<Option<Value>> {
        let column = self.column(name)?;
        Ok(column.values().first().cloned().flatten())
    }
}
