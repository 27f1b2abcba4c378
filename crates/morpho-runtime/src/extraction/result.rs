//! Extraction result types

use morpho_core::{NamedMap, Value};
use serde::Serialize;

/// A feature whose body failed under `FailurePolicy::Continue`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureFailure {
    /// Qualified feature name
    pub feature: String,

    /// Rendered error chain
    pub error: String,
}

/// Result of one extraction run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionResult {
    /// Feature name -> value, in execution order
    pub values: NamedMap<Value>,

    /// Names of the marks that validated (and passed the allow-list)
    pub selected_marks: Vec<String>,

    /// Names of the features that were selected for execution
    pub selected_features: Vec<String>,

    /// Features that failed without aborting the run
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FeatureFailure>,
}

impl ExtractionResult {
    /// Value of one feature
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Feature names with a value, in execution order
    pub fn feature_names(&self) -> Vec<&str> {
        self.values.keys().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_accessors() {
        let mut result = ExtractionResult::default();
        result.values.insert("num_nodes", Value::Number(2.0));
        result.values.insert("axon.num_tips", Value::Number(1.0));

        assert_eq!(result.get("num_nodes"), Some(&Value::Number(2.0)));
        assert!(!result.contains("apical_dendrite.num_tips"));
        assert_eq!(result.feature_names(), vec!["num_nodes", "axon.num_tips"]);
        assert!(result.is_complete());
    }

    #[test]
    fn test_result_json_shape() {
        let mut result = ExtractionResult::default();
        result.values.insert("num_nodes", Value::Number(2.0));
        result.selected_marks.push("RequiresAxon".to_string());
        result.selected_features.push("num_nodes".to_string());

        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["values"]["num_nodes"], 2.0);
        assert_eq!(json["selected_marks"][0], "RequiresAxon");
        assert!(json.get("failures").is_none());
    }
}
