//! Built-in aggregator implementations (the `strata` namespace).

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde_json::Value as Json;

use crate::error::{Error, Result};
use crate::frame::{Column, DataType, Value};

use super::registry::{AggregatorRegistry, Aggregator, ArgSpec, ArgType};

pub(super) fn register_builtins() -> AggregatorRegistry {
    let mut registry = AggregatorRegistry::new();
    registry
        .register("strata", "sum", Box::new(Sum))
        .register("strata", "count", Box::new(Count))
        .register("strata", "count_distinct", Box::new(CountDistinct))
        .register("strata", "mean", Box::new(Mean))
        .register("strata", "min", Box::new(Min))
        .register("strata", "max", Box::new(Max))
        .register("strata", "first", Box::new(First));
    registry
}

fn single(columns: &[Column]) -> Result<&Column> {
    match columns {
        [column] => Ok(column),
        _ => Err(Error::Config(format!(
            "aggregator expects exactly one input column, got {}",
            columns.len()
        ))),
    }
}

fn numeric(column: &Column) -> Result<()> {
    match column.dtype() {
        DataType::Int | DataType::Float => Ok(()),
        DataType::Str => Err(Error::Config(
            "numeric aggregator applied to a string column".to_string(),
        )),
    }
}

/// Sum of non-null values. Integer columns stay integer.
struct Sum;

impl Aggregator for Sum {
    fn compute(&self, columns: &[Column], _args: &IndexMap<String, Json>) -> Result<Option<Value>> {
        let column = single(columns)?;
        numeric(column)?;
        match column.dtype() {
            DataType::Int => {
                let total: i64 = column
                    .values()
                    .iter()
                    .flatten()
                    .filter_map(|v| match v {
                        Value::Int(i) => Some(*i),
                        _ => None,
                    })
                    .sum();
                Ok(Some(Value::Int(total)))
            }
            _ => {
                let total: f64 = column
                    .values()
                    .iter()
                    .flatten()
                    .filter_map(Value::as_f64)
                    .sum();
                Ok(Some(Value::Float(total)))
            }
        }
    }
}

/// Count of non-null values.
struct Count;

impl Aggregator for Count {
    fn compute(&self, columns: &[Column], _args: &IndexMap<String, Json>) -> Result<Option<Value>> {
        let column = single(columns)?;
        let count = column.values().iter().flatten().count();
        Ok(Some(Value::Int(count as i64)))
    }
}

/// Count of distinct non-null values.
struct CountDistinct;

impl Aggregator for CountDistinct {
    fn compute(&self, columns: &[Column], _args: &IndexMap<String, Json>) -> Result<Option<Value>> {
        let column = single(columns)?;
        // Columns are homogeneous, so the display form is a faithful key.
        let distinct: BTreeSet<String> = column
            .values()
            .iter()
            .flatten()
            .map(|v| v.to_string())
            .collect();
        Ok(Some(Value::Int(distinct.len() as i64)))
    }
}

/// Arithmetic mean of non-null values; null over an empty input.
struct Mean;

impl Aggregator for Mean {
    fn compute(&self, columns: &[Column], _args: &IndexMap<String, Json>) -> Result<Option<Value>> {
        let column = single(columns)?;
        numeric(column)?;
        let values: Vec<f64> = column
            .values()
            .iter()
            .flatten()
            .filter_map(Value::as_f64)
            .collect();
        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(Value::Float(
            values.iter().sum::<f64>() / values.len() as f64,
        )))
    }
}

/// Smallest non-null value; null over an empty input.
struct Min;

impl Aggregator for Min {
    fn compute(&self, columns: &[Column], _args: &IndexMap<String, Json>) -> Result<Option<Value>> {
        fold_ordered(columns, std::cmp::Ordering::Less)
    }
}

/// Largest non-null value; null over an empty input.
struct Max;

impl Aggregator for Max {
    fn compute(&self, columns: &[Column], _args: &IndexMap<String, Json>) -> Result<Option<Value>> {
        fold_ordered(columns, std::cmp::Ordering::Greater)
    }
}

fn fold_ordered(columns: &[Column], keep: std::cmp::Ordering) -> Result<Option<Value>> {
    let column = single(columns)?;
    let mut best: Option<Value> = None;
    for value in column.values().iter().flatten() {
        best = match best {
            None => Some(value.clone()),
            Some(current) => {
                if value.compare(&current) == Some(keep) {
                    Some(value.clone())
                } else {
                    Some(current)
                }
            }
        };
    }
    Ok(best)
}

/// First value in row order. With `ignorenulls`, the first non-null value.
struct First;

impl Aggregator for First {
    fn arg_spec(&self) -> &'static [ArgSpec] {
        const SPEC: &[ArgSpec] = &[ArgSpec::optional("ignorenulls", ArgType::Bool)];
        SPEC
    }

    fn compute(&self, columns: &[Column], args: &IndexMap<String, Json>) -> Result<Option<Value>> {
        let column = single(columns)?;
        let ignore_nulls = args
            .get("ignorenulls")
            .and_then(Json::as_bool)
            .unwrap_or(false);
        let first = if ignore_nulls {
            column.values().iter().flatten().next().cloned()
        } else {
            column.values().first().cloned().flatten()
        };
        Ok(first)
    }
}
