//! Bound feature parameters
//!
//! Specialization binds keyword parameters (node types, bifurcation kind, ...)
//! onto a generic feature. Feature bodies read them back through the typed
//! accessors here.

use crate::error::{Result, RuntimeError};
use morpho_core::{NodeType, Value};
use std::collections::BTreeMap;

/// Parameter restricting a feature to a set of node types
pub const NODE_TYPES: &str = "node_types";

/// Parameter selecting local or remote bifurcation geometry
pub const BIFURCATION_KIND: &str = "bifurcation_kind";

/// Keyword parameters bound to a feature
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureParams {
    values: BTreeMap<String, Value>,
}

impl FeatureParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Combine with another binding; `other` wins on conflicting keys
    pub fn merged(&self, other: &FeatureParams) -> Self {
        let mut values = self.values.clone();
        values.extend(other.values.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { values }
    }

    /// Bind a node type restriction
    pub fn with_node_types(self, types: &[NodeType]) -> Self {
        let names: Vec<Value> = types.iter().map(|t| Value::from(t.as_str())).collect();
        self.with(NODE_TYPES, Value::Array(names))
    }

    /// Node type restriction, `None` when unbound (meaning all nodes)
    pub fn node_types(&self) -> Result<Option<Vec<NodeType>>> {
        let Some(value) = self.get(NODE_TYPES) else {
            return Ok(None);
        };

        let items = value
            .as_array()
            .ok_or_else(|| invalid(NODE_TYPES, format!("expected array, found {}", value.type_name())))?;

        items
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| invalid(NODE_TYPES, format!("expected string, found {}", item.type_name())))?
                    .parse::<NodeType>()
                    .map_err(|e| invalid(NODE_TYPES, e.to_string()))
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// String parameter, erroring if present with another type
    pub fn get_str(&self, name: &str) -> Result<Option<&str>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(invalid(name, format!("expected string, found {}", other.type_name()))),
        }
    }
}

fn invalid(name: &str, message: String) -> RuntimeError {
    RuntimeError::InvalidParameter {
        name: name.to_string(),
        message,
    }
}
