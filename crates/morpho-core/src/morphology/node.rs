//! Reconstruction nodes and node types

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Node identifier, unique within one reconstruction
pub type NodeId = u64;

/// Node type classification
///
/// Codes follow the SWC convention used by reconstruction files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// Cell body
    Soma,
    Axon,
    BasalDendrite,
    ApicalDendrite,
}

impl NodeType {
    /// Every process type that is not the soma
    pub const NEURITES: [NodeType; 3] = [
        NodeType::Axon,
        NodeType::BasalDendrite,
        NodeType::ApicalDendrite,
    ];

    /// Dendritic process types
    pub const DENDRITES: [NodeType; 2] = [NodeType::BasalDendrite, NodeType::ApicalDendrite];

    /// Parse an SWC type code
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            1 => Ok(NodeType::Soma),
            2 => Ok(NodeType::Axon),
            3 => Ok(NodeType::BasalDendrite),
            4 => Ok(NodeType::ApicalDendrite),
            other => Err(CoreError::InvalidNodeType(other)),
        }
    }

    /// SWC type code
    pub fn code(&self) -> i64 {
        match self {
            NodeType::Soma => 1,
            NodeType::Axon => 2,
            NodeType::BasalDendrite => 3,
            NodeType::ApicalDendrite => 4,
        }
    }

    /// Stable snake_case name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Soma => "soma",
            NodeType::Axon => "axon",
            NodeType::BasalDendrite => "basal_dendrite",
            NodeType::ApicalDendrite => "apical_dendrite",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "soma" => Ok(NodeType::Soma),
            "axon" => Ok(NodeType::Axon),
            "basal_dendrite" => Ok(NodeType::BasalDendrite),
            "apical_dendrite" => Ok(NodeType::ApicalDendrite),
            other => Err(CoreError::TypeError(format!("Unknown node type '{}'", other))),
        }
    }
}

/// A single labeled 3-D point of a reconstruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,

    #[serde(rename = "type")]
    pub node_type: NodeType,

    pub x: f64,
    pub y: f64,
    pub z: f64,

    pub radius: f64,

    /// Parent node id, `None` for a root
    #[serde(default)]
    pub parent: Option<NodeId>,
}

impl Node {
    /// Create a new node
    pub fn new(
        id: NodeId,
        node_type: NodeType,
        position: [f64; 3],
        radius: f64,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            id,
            node_type,
            x: position[0],
            y: position[1],
            z: position[2],
            radius,
            parent,
        }
    }

    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
