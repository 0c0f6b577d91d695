//! Typed columnar storage.

use crate::error::{Error, Result};

use super::value::{DataType, Value};

/// A single typed column: a storage type plus nullable cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    dtype: DataType,
    values: Vec<Option<Value>>,
}

impl Column {
    /// Create a column, checking every non-null cell against the storage type.
    pub fn new(dtype: DataType, values: Vec<Option<Value>>) -> Result<Self> {
        for value in values.iter().flatten() {
            if value.data_type() != dtype {
                return Err(Error::Config(format!(
                    "column cell {} does not match storage type {}",
                    value.data_type(),
                    dtype
                )));
            }
        }
        Ok(Self { dtype, values })
    }

    /// A string column from optional string slices.
    pub fn str(values: Vec<Option<&str>>) -> Self {
        Self {
            dtype: DataType::Str,
            values: values
                .into_iter()
                .map(|v| v.map(|s| Value::Str(s.to_string())))
                .collect(),
        }
    }

    /// An integer column from optional i64s.
    pub fn int(values: Vec<Option<i64>>) -> Self {
        Self {
            dtype: DataType::Int,
            values: values.into_iter().map(|v| v.map(Value::Int)).collect(),
        }
    }

    /// A float column from optional f64s.
    pub fn float(values: Vec<Option<f64>>) -> Self {
        Self {
            dtype: DataType::Float,
            values: values.into_iter().map(|v| v.map(Value::Float)).collect(),
        }
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether any cell is null.
    pub fn has_null(&self) -> bool {
        self.values.iter().any(|v| v.is_none())
    }

    /// Cast every cell to the target type.
    ///
    /// This is where declared-type mismatches surface: a cell whose native
    /// representation cannot carry the target type fails with the
    /// user-facing [`Error::TypeMismatch`], naming the column.
    pub fn cast(&self, name: &str, to: DataType) -> Result<Column> {
        let values = self
            .values
            .iter()
            .map(|cell| {
                cell.as_ref()
                    .map(|value| {
                        value.cast(to).ok_or_else(|| Error::TypeMismatch {
                            column: name.to_string(),
                            expected: to,
                            found: format!("{} value '{}'", value.data_type(), value),
                        })
                    })
                    .transpose()
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Column { dtype: to, values })
    }
}
