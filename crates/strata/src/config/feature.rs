//! Raw feature definitions.

use serde::{Deserialize, Serialize};

use crate::frame::{DataType, Value};

/// Semantic type of a feature, independent of storage representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureType {
    #[serde(rename = "STRING_FEATURE")]
    String,
    #[serde(rename = "INT_FEATURE")]
    Int,
    #[serde(rename = "FLOAT_FEATURE")]
    Float,
}

impl FeatureType {
    /// The frame storage type this feature is ingested as.
    pub fn data_type(&self) -> DataType {
        match self {
            FeatureType::String => DataType::Str,
            FeatureType::Int => DataType::Int,
            FeatureType::Float => DataType::Float,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FeatureType::Int | FeatureType::Float)
    }
}

/// Declarative per-column specification of semantic type and value
/// constraints. Immutable once loaded from configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFeature {
    /// Column name this feature binds to.
    pub name: String,
    /// Semantic type.
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    /// Whether null values are a violation.
    #[serde(default)]
    pub required: bool,
    /// Enumerated set of allowed values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,
    /// Inclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,
    /// Opaque identifier assigned at configuration load.
    pub id: String,
}

impl RawFeature {
    /// Minimal definition with no constraints, used widely in tests.
    pub fn new(name: impl Into<String>, feature_type: FeatureType) -> Self {
        Self {
            name: name.into(),
            feature_type,
            required: false,
            values: None,
            min: None,
            max: None,
            id: "-".to_string(),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_values(mut self, values: Vec<Value>) -> Self {
        self.values = Some(values);
        self
    }

    pub fn with_min(mut self, min: impl Into<Value>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn with_max(mut self, max: impl Into<Value>) -> Self {
        self.max = Some(max.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_type_serde_names() {
        let feature: RawFeature = serde_json::from_str(
            r#"{"name": "income", "type": "FLOAT_FEATURE", "required": true, "id": "-"}"#,
        )
        .unwrap();
        assert_eq!(feature.feature_type, FeatureType::Float);
        assert!(feature.required);
        assert!(feature.values.is_none());
    }

    #[test]
    fn test_required_defaults_to_false() {
        let feature: RawFeature =
            serde_json::from_str(r#"{"name": "a", "type": "INT_FEATURE", "id": "-"}"#).unwrap();
        assert!(!feature.required);
    }

    #[test]
    fn test_numeric_bounds_deserialize_as_literals() {
        let feature: RawFeature = serde_json::from_str(
            r#"{"name": "c", "type": "INT_FEATURE", "min": 0, "max": 1, "id": "-"}"#,
        )
        .unwrap();
        assert_eq!(feature.min, Some(Value::Int(0)));
        assert_eq!(feature.max, Some(Value::Int(1)));
    }
}
