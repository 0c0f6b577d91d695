//! Constraint compilation: feature definitions to predicate pairs.

use std::fmt;

use crate::config::RawFeature;
use crate::expr::{col, Expression};

/// Which declared constraint a check enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Required,
    Values,
    Min,
    Max,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::Required => write!(f, "required"),
            CheckKind::Values => write!(f, "values"),
            CheckKind::Min => write!(f, "min"),
            CheckKind::Max => write!(f, "max"),
        }
    }
}

/// One compiled constraint: a violation predicate selecting failing rows and
/// its logical complement, the satisfaction predicate used for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnCheck {
    pub column: String,
    pub kind: CheckKind,
    pub violation: Expression,
    pub satisfaction: Expression,
}

/// Compile a feature definition into its checks.
///
/// Each declared constraint yields one independent check; a definition with
/// nothing declared yields none. The checks are unordered relative to each
/// other and may be evaluated in any order.
pub fn value_checks(feature: &RawFeature) -> Vec<ColumnCheck> {
    let mut checks = Vec::new();

    if feature.required {
        checks.push(ColumnCheck {
            column: feature.name.clone(),
            kind: CheckKind::Required,
            violation: col(&feature.name).is_null(),
            satisfaction: col(&feature.name).is_not_null(),
        });
    }

    if let Some(values) = &feature.values {
        let membership = col(&feature.name).is_in(values.clone());
        checks.push(ColumnCheck {
            column: feature.name.clone(),
            kind: CheckKind::Values,
            violation: membership.clone().not(),
            satisfaction: membership,
        });
    }

    if let Some(min) = &feature.min {
        checks.push(ColumnCheck {
            column: feature.name.clone(),
            kind: CheckKind::Min,
            violation: col(&feature.name).lt(Expression::Literal(min.clone())),
            satisfaction: col(&feature.name).ge(Expression::Literal(min.clone())),
        });
    }

    if let Some(max) = &feature.max {
        checks.push(ColumnCheck {
            column: feature.name.clone(),
            kind: CheckKind::Max,
            violation: col(&feature.name).gt(Expression::Literal(max.clone())),
            satisfaction: col(&feature.name).le(Expression::Literal(max.clone())),
        });
    }

    checks
}
