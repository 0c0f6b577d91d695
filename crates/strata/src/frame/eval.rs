//! Expression evaluation over materialized columns.
//!
//! Predicates follow SQL three-valued logic: a comparison against null is
//! unknown, and unknown rows never count as matches. This is what keeps
//! nulls out of range and membership violation counts.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::expr::Expression;

use super::column::Column;
use super::value::Value;

/// Result of evaluating a subexpression for one row.
enum Term {
    Null,
    Bool(bool),
    Scalar(Value),
}

/// Evaluate a boolean expression for one row. `None` is SQL unknown.
pub(crate) fn eval_predicate(
    expr: &Expression,
    columns: &IndexMap<&str, Column>,
    row: usize,
) -> Result<Option<bool>> {
    match eval(expr, columns, row)? {
        Term::Bool(b) => Ok(Some(b)),
        Term::Null => Ok(None),
        Term::Scalar(v) => Err(Error::Config(format!(
            "expression evaluated to scalar '{v}' where a boolean was expected"
        ))),
    }
}

fn eval(expr: &Expression, columns: &IndexMap<&str, Column>, row: usize) -> Result<Term> {
    match expr {
        Expression::Column(name) => {
            let column = columns
                .get(name.as_str())
                .ok_or_else(|| Error::Config(format!("column '{name}' not found in dataset")))?;
            let cell = column
                .values()
                .get(row)
                .ok_or_else(|| Error::Config(format!("row {row} out of bounds for '{name}'")))?;
            Ok(match cell {
                Some(value) => Term::Scalar(value.clone()),
                None => Term::Null,
            })
        }
        Expression::Literal(value) => Ok(Term::Scalar(value.clone())),
        Expression::IsNull(inner) => {
            let term = eval(inner, columns, row)?;
            Ok(Term::Bool(matches!(term, Term::Null)))
        }
        Expression::IsNotNull(inner) => {
            let term = eval(inner, columns, row)?;
            Ok(Term::Bool(!matches!(term, Term::Null)))
        }
        Expression::Not(inner) => match eval(inner, columns, row)? {
            Term::Bool(b) => Ok(Term::Bool(!b)),
            Term::Null => Ok(Term::Null),
            Term::Scalar(v) => Err(Error::Config(format!("cannot negate scalar '{v}'"))),
        },
        Expression::And(a, b) => {
            let left = eval_predicate(a, columns, row)?;
            let right = eval_predicate(b, columns, row)?;
            // SQL: false dominates unknown.
            Ok(match (left, right) {
                (Some(false), _) | (_, Some(false)) => Term::Bool(false),
                (Some(true), Some(true)) => Term::Bool(true),
                _ => Term::Null,
            })
        }
        Expression::Eq(a, b) => compare(a, b, columns, row, |ord| ord == std::cmp::Ordering::Equal),
        Expression::Lt(a, b) => compare(a, b, columns, row, |ord| ord == std::cmp::Ordering::Less),
        Expression::Le(a, b) => compare(a, b, columns, row, |ord| ord != std::cmp::Ordering::Greater),
        Expression::Gt(a, b) => compare(a, b, columns, row, |ord| ord == std::cmp::Ordering::Greater),
        Expression::Ge(a, b) => compare(a, b, columns, row, |ord| ord != std::cmp::Ordering::Less),
        Expression::In(inner, set) => match eval(inner, columns, row)? {
            Term::Null => Ok(Term::Null),
            Term::Scalar(value) => Ok(Term::Bool(set.iter().any(|v| v.loose_eq(&value)))),
            Term::Bool(_) => Err(Error::Config(
                "membership test applied to a boolean expression".to_string(),
            )),
        },
    }
}

fn compare(
    a: &Expression,
    b: &Expression,
    columns: &IndexMap<&str, Column>,
    row: usize,
    accept: impl Fn(std::cmp::Ordering) -> bool,
) -> Result<Term> {
    let left = eval(a, columns, row)?;
    let right = eval(b, columns, row)?;
    match (left, right) {
        (Term::Null, _) | (_, Term::Null) => Ok(Term::Null),
        (Term::Scalar(x), Term::Scalar(y)) => match x.compare(&y) {
            Some(ord) => Ok(Term::Bool(accept(ord))),
            // Two numeric values with no ordering means NaN: SQL unknown.
            None if x.as_f64().is_some() && y.as_f64().is_some() => Ok(Term::Null),
            None => Err(Error::Config(format!(
                "cannot compare {} with {}",
                x.data_type(),
                y.data_type()
            ))),
        },
        _ => Err(Error::Config(
            "comparison applied to a boolean expression".to_string(),
        )),
    }
}
