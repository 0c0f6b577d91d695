//! Aggregator trait, argument schemas, and the implementation registry.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::Value as Json;

use crate::error::{Error, Result};
use crate::frame::{Column, Value};

use super::builtins;

/// Accepted type of a declared aggregator argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    Bool,
    Int,
    Float,
    Str,
}

impl ArgType {
    /// Coerce a raw JSON literal into this type, normalizing its
    /// representation. `None` means the value cannot be coerced.
    pub fn coerce(&self, value: &Json) -> Option<Json> {
        match self {
            ArgType::Bool => match value {
                Json::Bool(b) => Some(Json::Bool(*b)),
                Json::String(s) => s.trim().parse::<bool>().ok().map(Json::Bool),
                _ => None,
            },
            ArgType::Int => match value {
                Json::Number(n) => n.as_i64().map(Json::from),
                Json::String(s) => s.trim().parse::<i64>().ok().map(Json::from),
                _ => None,
            },
            ArgType::Float => match value {
                Json::Number(n) => n.as_f64().map(Json::from),
                Json::String(s) => s.trim().parse::<f64>().ok().map(Json::from),
                _ => None,
            },
            ArgType::Str => match value {
                Json::String(s) => Some(Json::String(s.clone())),
                _ => None,
            },
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ArgType::Bool => "boolean",
            ArgType::Int => "integer",
            ArgType::Float => "float",
            ArgType::Str => "string",
        }
    }
}

/// One accepted argument of an aggregator implementation.
#[derive(Debug, Clone, Copy)]
pub struct ArgSpec {
    pub name: &'static str,
    pub arg_type: ArgType,
    pub required: bool,
}

impl ArgSpec {
    pub const fn optional(name: &'static str, arg_type: ArgType) -> Self {
        Self {
            name,
            arg_type,
            required: false,
        }
    }

    pub const fn required(name: &'static str, arg_type: ArgType) -> Self {
        Self {
            name,
            arg_type,
            required: true,
        }
    }
}

/// A named aggregation computing one scalar over its input column(s).
pub trait Aggregator: Send + Sync {
    /// Arguments this implementation accepts.
    fn arg_spec(&self) -> &'static [ArgSpec] {
        &[]
    }

    /// Number of input columns expected.
    fn input_arity(&self) -> usize {
        1
    }

    /// Compute the aggregate. `None` is a null result (e.g. an empty or
    /// all-null input where no value exists).
    fn compute(&self, columns: &[Column], args: &IndexMap<String, Json>) -> Result<Option<Value>>;
}

/// Check declared arguments against an implementation's argument schema.
///
/// Must run, and fail, strictly before any aggregation is computed: an
/// unrecognized argument name or a failed coercion is a user-facing error
/// and nothing may be stored for the declaration.
pub fn validate_args(
    spec: &[ArgSpec],
    args: &IndexMap<String, Json>,
    aggregate: &str,
) -> Result<IndexMap<String, Json>> {
    let mut normalized = IndexMap::new();
    for (name, value) in args {
        let accepted = spec.iter().find(|a| a.name == name).ok_or_else(|| {
            Error::Argument {
                aggregate: aggregate.to_string(),
                message: format!("unexpected argument '{name}'"),
            }
        })?;
        let coerced = accepted.arg_type.coerce(value).ok_or_else(|| Error::Argument {
            aggregate: aggregate.to_string(),
            message: format!(
                "argument '{name}' is not a valid {}",
                accepted.arg_type.label()
            ),
        })?;
        normalized.insert(name.clone(), coerced);
    }
    for accepted in spec {
        if accepted.required && !normalized.contains_key(accepted.name) {
            return Err(Error::Argument {
                aggregate: aggregate.to_string(),
                message: format!("missing required argument '{}'", accepted.name),
            });
        }
    }
    Ok(normalized)
}

/// Aggregator implementations keyed by `namespace.name`, resolved at
/// configuration-load time. A fixed set of built-ins plus an extension
/// point for custom implementations.
pub struct AggregatorRegistry {
    entries: IndexMap<String, Box<dyn Aggregator>>,
}

impl AggregatorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// The built-in `strata` namespace.
    pub fn builtin() -> &'static AggregatorRegistry {
        static BUILTINS: Lazy<AggregatorRegistry> = Lazy::new(builtins::register_builtins);
        &BUILTINS
    }

    /// Register an implementation under `namespace.name`.
    pub fn register(
        &mut self,
        namespace: &str,
        name: &str,
        aggregator: Box<dyn Aggregator>,
    ) -> &mut Self {
        self.entries.insert(format!("{namespace}.{name}"), aggregator);
        self
    }

    /// Resolve a `namespace.name` reference.
    pub fn resolve(&self, reference: &str) -> Result<&dyn Aggregator> {
        self.entries
            .get(reference)
            .map(|b| b.as_ref())
            .ok_or_else(|| Error::UnknownAggregator(reference.to_string()))
    }

    /// Registered references, in registration order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for AggregatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_unknown_reference() {
        let registry = AggregatorRegistry::builtin();
        assert!(registry.resolve("strata.sum").is_ok());
        assert!(matches!(
            registry.resolve("strata.nope"),
            Err(Error::UnknownAggregator(_))
        ));
    }

    #[test]
    fn test_validate_args_rejects_unknown_name() {
        let spec = [ArgSpec::optional("ignorenulls", ArgType::Bool)];
        let mut args = IndexMap::new();
        args.insert("ignoreNulls".to_string(), Json::Bool(true));
        assert!(matches!(
            validate_args(&spec, &args, "first_a"),
            Err(Error::Argument { .. })
        ));
    }

    #[test]
    fn test_validate_args_coerces_strings() {
        let spec = [ArgSpec::optional("ignorenulls", ArgType::Bool)];
        let mut args = IndexMap::new();
        args.insert("ignorenulls".to_string(), Json::String("true".to_string()));
        let normalized = validate_args(&spec, &args, "first_a").unwrap();
        assert_eq!(normalized.get("ignorenulls"), Some(&Json::Bool(true)));
    }

    #[test]
    fn test_validate_args_missing_required() {
        let spec = [ArgSpec::required("quantile", ArgType::Float)];
        let err = validate_args(&spec, &IndexMap::new(), "q_a").unwrap_err();
        match err {
            Error::Argument { aggregate, message } => {
                assert_eq!(aggregate, "q_a");
                assert!(message.contains("quantile"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let mut args = IndexMap::new();
        args.insert("quantile".to_string(), Json::from(0.5));
        assert!(validate_args(&spec, &args, "q_a").is_ok());
    }

    #[test]
    fn test_validate_args_rejects_bad_coercion() {
        let spec = [ArgSpec::optional("ignorenulls", ArgType::Bool)];
        let mut args = IndexMap::new();
        args.insert(
            "ignorenulls".to_string(),
            Json::String("some_constant".to_string()),
        );
        assert!(matches!(
            validate_args(&spec, &args, "first_a"),
            Err(Error::Argument { .. })
        ));
    }
}
