//! Common test utilities for runtime integration tests

#![allow(dead_code)]

use morpho_core::{Morphology, Node, NodeType, Value};
use morpho_runtime::{Data, Mark, MarkedFeature};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Soma root with a single axon child
pub fn soma_and_axon() -> Data {
    let nodes = vec![
        Node::new(1, NodeType::Soma, [0.0, 0.0, 0.0], 1.0, None),
        Node::new(2, NodeType::Axon, [0.0, -1.0, 0.0], 0.5, Some(1)),
    ];
    Data::new(Arc::new(Morphology::new(nodes).expect("valid test morphology")))
}

/// A feature returning a constant
pub fn constant(name: &str, marks: &[Mark], value: f64) -> MarkedFeature {
    MarkedFeature::from_fn(name, marks.iter().copied(), move |_, _| Ok(Value::from(value)))
}

/// A feature that counts its invocations
pub fn counting(name: &str, marks: &[Mark], calls: Arc<AtomicUsize>) -> MarkedFeature {
    MarkedFeature::from_fn(name, marks.iter().copied(), move |_, _| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::from(1.0))
    })
}

/// A feature that always fails
pub fn failing(name: &str, marks: &[Mark]) -> MarkedFeature {
    MarkedFeature::from_fn(name, marks.iter().copied(), |_, _| {
        Err(anyhow::anyhow!("boom"))
    })
}
