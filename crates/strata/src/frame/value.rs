//! Cell values and storage-level types for the frame engine.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage-level type of a frame column.
///
/// Mirrors the semantic feature types one-to-one; kept separate so the frame
/// engine has no dependency on the configuration layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    Str,
    Int,
    Float,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Str => write!(f, "STRING"),
            DataType::Int => write!(f, "INT"),
            DataType::Float => write!(f, "FLOAT"),
        }
    }
}

/// A single non-null cell value. Nulls are represented as `Option<Value>`
/// at the column level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// The storage type of this value.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Str(_) => DataType::Str,
            Value::Int(_) => DataType::Int,
            Value::Float(_) => DataType::Float,
        }
    }

    /// Numeric view of this value, when it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Str(_) => None,
        }
    }

    /// Cast this value to the target type.
    ///
    /// Strings cast by parsing; Int widens to Float; Float narrows to Int
    /// only when integral. `None` means the value cannot be represented.
    pub fn cast(&self, to: DataType) -> Option<Value> {
        match (self, to) {
            (Value::Str(s), DataType::Str) => Some(Value::Str(s.clone())),
            (Value::Str(s), DataType::Int) => s.trim().parse::<i64>().ok().map(Value::Int),
            (Value::Str(s), DataType::Float) => s.trim().parse::<f64>().ok().map(Value::Float),
            (Value::Int(i), DataType::Int) => Some(Value::Int(*i)),
            (Value::Int(i), DataType::Float) => Some(Value::Float(*i as f64)),
            (Value::Int(i), DataType::Str) => Some(Value::Str(i.to_string())),
            (Value::Float(f), DataType::Float) => Some(Value::Float(*f)),
            (Value::Float(f), DataType::Int) => {
                // 2^63 and above are unrepresentable; `as` would saturate.
                if f.is_finite()
                    && f.fract() == 0.0
                    && *f >= i64::MIN as f64
                    && *f < i64::MAX as f64
                {
                    Some(Value::Int(*f as i64))
                } else {
                    None
                }
            }
            (Value::Float(f), DataType::Str) => Some(Value::Str(f.to_string())),
        }
    }

    /// Compare two values, treating Int and Float as one numeric domain.
    /// Incomparable pairs (string vs number, NaN) yield `None`.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            _ => {
                let a = self.as_f64()?;
                let b = other.as_f64()?;
                a.partial_cmp(&b)
            }
        }
    }

    /// Equality under the same loose numeric semantics as [`Value::compare`].
    pub fn loose_eq(&self, other: &Value) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl fmt::Display for Value {
    /// SQL-style rendering: strings are unquoted, as in predicate
    /// descriptions like `(a_str IN (a, b))`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}
