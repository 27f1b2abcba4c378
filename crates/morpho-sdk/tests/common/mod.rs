//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use morpho_sdk::{Data, Morphology, Node, NodeType};
use std::sync::Arc;

/// Test helper assembling a morphology node by node
pub struct TreeBuilder {
    nodes: Vec<Node>,
    next_id: u64,
}

impl TreeBuilder {
    /// Start with a soma at the origin
    pub fn with_soma(radius: f64) -> Self {
        Self {
            nodes: vec![Node::new(1, NodeType::Soma, [0.0, 0.0, 0.0], radius, None)],
            next_id: 2,
        }
    }

    /// Append a node and return its id
    pub fn add(&mut self, node_type: NodeType, position: [f64; 3], parent: u64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.push(Node::new(id, node_type, position, 0.5, Some(parent)));
        id
    }

    pub fn build(self) -> Arc<Morphology> {
        Arc::new(Morphology::new(self.nodes).expect("valid test morphology"))
    }
}

/// Soma, a Y-shaped axon, and a two-node apical dendrite
pub fn pyramidal() -> Arc<Morphology> {
    let mut tree = TreeBuilder::with_soma(1.0);
    let a1 = tree.add(NodeType::Axon, [0.0, -1.0, 0.0], 1);
    let a2 = tree.add(NodeType::Axon, [0.0, -2.0, 0.0], a1);
    tree.add(NodeType::Axon, [1.0, -3.0, 0.0], a2);
    tree.add(NodeType::Axon, [-1.0, -3.0, 0.0], a2);
    let d1 = tree.add(NodeType::ApicalDendrite, [0.0, 1.0, 0.0], 1);
    tree.add(NodeType::ApicalDendrite, [0.0, 3.0, 0.0], d1);
    tree.build()
}

pub fn pyramidal_data() -> Data {
    Data::new(pyramidal())
}

/// Assert two floats are within 1e-9
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
