//! Opaque boolean column expressions.
//!
//! The validation core builds these as values and hands them to the frame
//! engine for evaluation; it never branches on their internal shape. The
//! `Display` rendering is the stable, SQL-style description used as the key
//! in violation reports (`(a_str IS NOT NULL)`, `(c_long <= 1)`).

use std::collections::BTreeSet;
use std::fmt;

use crate::frame::Value;

/// An expression tree over frame columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Column(String),
    Literal(Value),
    IsNull(Box<Expression>),
    IsNotNull(Box<Expression>),
    Not(Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Eq(Box<Expression>, Box<Expression>),
    Lt(Box<Expression>, Box<Expression>),
    Le(Box<Expression>, Box<Expression>),
    Gt(Box<Expression>, Box<Expression>),
    Ge(Box<Expression>, Box<Expression>),
    In(Box<Expression>, Vec<Value>),
}

/// Reference a column by name.
pub fn col(name: impl Into<String>) -> Expression {
    Expression::Column(name.into())
}

/// A literal value.
pub fn lit(value: impl Into<Value>) -> Expression {
    Expression::Literal(value.into())
}

impl Expression {
    pub fn is_null(self) -> Expression {
        Expression::IsNull(Box::new(self))
    }

    pub fn is_not_null(self) -> Expression {
        Expression::IsNotNull(Box::new(self))
    }

    pub fn not(self) -> Expression {
        Expression::Not(Box::new(self))
    }

    pub fn and(self, other: Expression) -> Expression {
        Expression::And(Box::new(self), Box::new(other))
    }

    pub fn eq(self, other: Expression) -> Expression {
        Expression::Eq(Box::new(self), Box::new(other))
    }

    pub fn lt(self, other: Expression) -> Expression {
        Expression::Lt(Box::new(self), Box::new(other))
    }

    pub fn le(self, other: Expression) -> Expression {
        Expression::Le(Box::new(self), Box::new(other))
    }

    pub fn gt(self, other: Expression) -> Expression {
        Expression::Gt(Box::new(self), Box::new(other))
    }

    pub fn ge(self, other: Expression) -> Expression {
        Expression::Ge(Box::new(self), Box::new(other))
    }

    pub fn is_in(self, values: Vec<Value>) -> Expression {
        Expression::In(Box::new(self), values)
    }

    /// Names of all columns referenced anywhere in this expression.
    pub fn columns(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Expression::Column(name) => {
                out.insert(name.as_str());
            }
            Expression::Literal(_) => {}
            Expression::IsNull(e)
            | Expression::IsNotNull(e)
            | Expression::Not(e)
            | Expression::In(e, _) => e.collect_columns(out),
            Expression::And(a, b)
            | Expression::Eq(a, b)
            | Expression::Lt(a, b)
            | Expression::Le(a, b)
            | Expression::Gt(a, b)
            | Expression::Ge(a, b) => {
                a.collect_columns(out);
                b.collect_columns(out);
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Column(name) => write!(f, "{name}"),
            Expression::Literal(v) => write!(f, "{v}"),
            Expression::IsNull(e) => write!(f, "({e} IS NULL)"),
            Expression::IsNotNull(e) => write!(f, "({e} IS NOT NULL)"),
            Expression::Not(e) => write!(f, "(NOT {e})"),
            Expression::And(a, b) => write!(f, "({a} AND {b})"),
            Expression::Eq(a, b) => write!(f, "({a} = {b})"),
            Expression::Lt(a, b) => write!(f, "({a} < {b})"),
            Expression::Le(a, b) => write!(f, "({a} <= {b})"),
            Expression::Gt(a, b) => write!(f, "({a} > {b})"),
            Expression::Ge(a, b) => write!(f, "({a} >= {b})"),
            Expression::In(e, values) => {
                let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "({e} IN ({}))", rendered.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_null_checks() {
        assert_eq!(col("a_str").is_null().to_string(), "(a_str IS NULL)");
        assert_eq!(
            col("a_str").is_not_null().to_string(),
            "(a_str IS NOT NULL)"
        );
    }

    #[test]
    fn test_display_membership() {
        let e = col("a_str").is_in(vec!["a".into(), "b".into()]);
        assert_eq!(e.to_string(), "(a_str IN (a, b))");
        assert_eq!(e.clone().not().to_string(), "(NOT (a_str IN (a, b)))");
    }

    #[test]
    fn test_display_bounds() {
        assert_eq!(col("a_long").gt(lit(2i64)).to_string(), "(a_long > 2)");
        assert_eq!(col("a_long").le(lit(2i64)).to_string(), "(a_long <= 2)");
        assert_eq!(col("a_long").lt(lit(1i64)).to_string(), "(a_long < 1)");
        assert_eq!(col("a_long").ge(lit(1i64)).to_string(), "(a_long >= 1)");
    }

    #[test]
    fn test_referenced_columns() {
        let e = col("a").lt(lit(1i64)).and(col("b").is_null());
        let names: Vec<&str> = e.columns().into_iter().collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
