//! Reconstruction tree
//!
//! `Morphology` is the read-only tree contract the extraction engine consumes.
//! Construction validates the structural invariants once; every query after
//! that is infallible.

use super::node::{Node, NodeId, NodeType};
use crate::error::{CoreError, Result};
use std::collections::{HashMap, HashSet, VecDeque};

/// An ordered (parent, child) node pair denoting one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Compartment {
    pub parent: NodeId,
    pub child: NodeId,
}

/// Rooted, acyclic tree of labeled 3-D points
#[derive(Debug, Clone)]
pub struct Morphology {
    /// Nodes in input order
    nodes: Vec<Node>,

    /// Node id -> position in `nodes`
    index: HashMap<NodeId, usize>,

    /// Node id -> child ids, in input order
    children: HashMap<NodeId, Vec<NodeId>>,
}

impl Morphology {
    /// Build a tree from a flat node list
    ///
    /// Fails if ids are not unique, a parent is missing, or the parent
    /// relation contains a cycle.
    pub fn new(nodes: Vec<Node>) -> Result<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            if index.insert(node.id, position).is_some() {
                return Err(CoreError::DuplicateNode(node.id));
            }
        }

        let mut children: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for node in &nodes {
            if let Some(parent) = node.parent {
                if !index.contains_key(&parent) {
                    return Err(CoreError::MissingParent {
                        node: node.id,
                        parent,
                    });
                }
                children.entry(parent).or_default().push(node.id);
            }
        }

        let morphology = Self {
            nodes,
            index,
            children,
        };

        // Every parent exists, so any node unreachable from a root sits on
        // (or hangs off) a cycle.
        let mut reached = HashSet::new();
        for root in morphology.roots() {
            for node in morphology.breadth_first_traversal(root.id, |n| morphology.children(n.id)) {
                reached.insert(node.id);
            }
        }
        if let Some(node) = morphology.nodes.iter().find(|n| !reached.contains(&n.id)) {
            return Err(CoreError::Cycle(node.id));
        }

        Ok(morphology)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, in input order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Nodes restricted to the given types, or all nodes when `types` is `None`
    pub fn nodes_by_types(&self, types: Option<&[NodeType]>) -> Vec<&Node> {
        match types {
            Some(types) => self
                .nodes
                .iter()
                .filter(|n| types.contains(&n.node_type))
                .collect(),
            None => self.nodes.iter().collect(),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&position| &self.nodes[position])
    }

    /// Root nodes (nodes without a parent)
    pub fn roots(&self) -> Vec<&Node> {
        self.nodes.iter().filter(|n| n.is_root()).collect()
    }

    /// The soma node, if the tree has exactly one
    pub fn soma(&self) -> Option<&Node> {
        let mut somas = self.nodes.iter().filter(|n| n.node_type == NodeType::Soma);
        match (somas.next(), somas.next()) {
            (Some(soma), None) => Some(soma),
            _ => None,
        }
    }

    /// Direct children of a node
    pub fn children(&self, id: NodeId) -> Vec<&Node> {
        self.children
            .get(&id)
            .map(|ids| ids.iter().filter_map(|child| self.node(*child)).collect())
            .unwrap_or_default()
    }

    /// Direct parent of a node
    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.node(id)
            .and_then(|n| n.parent)
            .and_then(|parent| self.node(parent))
    }

    /// Visit every node reachable from `start` exactly once, breadth-first.
    ///
    /// `neighbors` enumerates the nodes adjacent to a node; already visited
    /// nodes are skipped, so undirected adjacency is fine.
    pub fn breadth_first_traversal<'a, F>(&'a self, start: NodeId, mut neighbors: F) -> Vec<&'a Node>
    where
        F: FnMut(&'a Node) -> Vec<&'a Node>,
    {
        let Some(start) = self.node(start) else {
            return Vec::new();
        };

        let mut visited = HashSet::from([start.id]);
        let mut queue = VecDeque::from([start]);
        let mut order = Vec::new();

        while let Some(node) = queue.pop_front() {
            order.push(node);
            for next in neighbors(node) {
                if visited.insert(next.id) {
                    queue.push_back(next);
                }
            }
        }

        order
    }

    /// The node and every node below it, breadth-first
    pub fn descendants(&self, id: NodeId) -> Vec<&Node> {
        self.breadth_first_traversal(id, |n| self.children(n.id))
    }

    /// Whether at least one node of the given type exists
    pub fn has_type(&self, node_type: NodeType) -> bool {
        self.nodes.iter().any(|n| n.node_type == node_type)
    }

    /// Compartments whose child node has one of the given types (all when `None`)
    pub fn compartments(&self, types: Option<&[NodeType]>) -> Vec<Compartment> {
        self.nodes_by_types(types)
            .into_iter()
            .filter_map(|child| {
                child.parent.map(|parent| Compartment {
                    parent,
                    child: child.id,
                })
            })
            .collect()
    }

    /// Length of a compartment
    pub fn compartment_length(&self, compartment: &Compartment) -> Result<f64> {
        let parent = self
            .node(compartment.parent)
            .ok_or(CoreError::NodeNotFound(compartment.parent))?;
        let child = self
            .node(compartment.child)
            .ok_or(CoreError::NodeNotFound(compartment.child))?;
        Ok(Self::euclidean_distance(parent, child))
    }

    /// Euclidean distance between two nodes' positions
    pub fn euclidean_distance(a: &Node, b: &Node) -> f64 {
        let (dx, dy, dz) = (a.x - b.x, a.y - b.y, a.z - b.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Midpoint between two nodes' positions
    pub fn midpoint(a: &Node, b: &Node) -> [f64; 3] {
        [(a.x + b.x) / 2.0, (a.y + b.y) / 2.0, (a.z + b.z) / 2.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: NodeId, node_type: NodeType, position: [f64; 3], parent: Option<NodeId>) -> Node {
        Node::new(id, node_type, position, 1.0, parent)
    }

    /// soma(1) -> axon(2) -> axon(3), axon(2) -> axon(4); soma(1) -> basal(5)
    fn small_tree() -> Morphology {
        Morphology::new(vec![
            node(1, NodeType::Soma, [0.0, 0.0, 0.0], None),
            node(2, NodeType::Axon, [0.0, 3.0, 4.0], Some(1)),
            node(3, NodeType::Axon, [0.0, 6.0, 8.0], Some(2)),
            node(4, NodeType::Axon, [1.0, 3.0, 4.0], Some(2)),
            node(5, NodeType::BasalDendrite, [2.0, 0.0, 0.0], Some(1)),
        ])
        .unwrap()
    }

    #[test]
    fn test_roots_children_parent() {
        let tree = small_tree();

        let roots: Vec<NodeId> = tree.roots().iter().map(|n| n.id).collect();
        assert_eq!(roots, vec![1]);

        let children: Vec<NodeId> = tree.children(2).iter().map(|n| n.id).collect();
        assert_eq!(children, vec![3, 4]);

        assert_eq!(tree.parent(3).map(|n| n.id), Some(2));
        assert!(tree.parent(1).is_none());
        assert_eq!(tree.soma().map(|n| n.id), Some(1));
    }

    #[test]
    fn test_nodes_by_types() {
        let tree = small_tree();
        assert_eq!(tree.nodes_by_types(None).len(), 5);
        assert_eq!(tree.nodes_by_types(Some(&[NodeType::Axon])).len(), 3);
        assert_eq!(tree.nodes_by_types(Some(&NodeType::DENDRITES)).len(), 1);
        assert!(tree.has_type(NodeType::BasalDendrite));
        assert!(!tree.has_type(NodeType::ApicalDendrite));
    }

    #[test]
    fn test_breadth_first_order() {
        let tree = small_tree();
        let order: Vec<NodeId> = tree.descendants(1).iter().map(|n| n.id).collect();
        assert_eq!(order, vec![1, 2, 5, 3, 4]);
    }

    #[test]
    fn test_breadth_first_visits_each_node_once_with_undirected_neighbors() {
        let tree = small_tree();
        let order = tree.breadth_first_traversal(3, |n| {
            let mut neighbors = tree.children(n.id);
            neighbors.extend(tree.parent(n.id));
            neighbors
        });
        let ids: Vec<NodeId> = order.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 2, 4, 1, 5]);
    }

    #[test]
    fn test_distance_and_midpoint() {
        let tree = small_tree();
        let soma = tree.node(1).unwrap();
        let axon = tree.node(2).unwrap();
        assert_eq!(Morphology::euclidean_distance(soma, axon), 5.0);
        assert_eq!(Morphology::midpoint(soma, axon), [0.0, 1.5, 2.0]);
    }

    #[test]
    fn test_compartments() {
        let tree = small_tree();
        assert_eq!(tree.compartments(None).len(), 4);

        let axon = tree.compartments(Some(&[NodeType::Axon]));
        assert_eq!(axon.len(), 3);
        assert_eq!(axon[0], Compartment { parent: 1, child: 2 });
        assert_eq!(tree.compartment_length(&axon[0]).unwrap(), 5.0);
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let result = Morphology::new(vec![
            node(1, NodeType::Soma, [0.0; 3], None),
            node(1, NodeType::Axon, [0.0; 3], None),
        ]);
        assert_eq!(result.unwrap_err(), CoreError::DuplicateNode(1));
    }

    #[test]
    fn test_missing_parent_rejected() {
        let result = Morphology::new(vec![
            node(1, NodeType::Soma, [0.0; 3], None),
            node(2, NodeType::Axon, [0.0; 3], Some(9)),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CoreError::MissingParent { node: 2, parent: 9 }
        );
    }

    #[test]
    fn test_cycle_rejected() {
        let result = Morphology::new(vec![
            node(1, NodeType::Soma, [0.0; 3], None),
            node(2, NodeType::Axon, [0.0; 3], Some(3)),
            node(3, NodeType::Axon, [0.0; 3], Some(2)),
        ]);
        assert!(matches!(result.unwrap_err(), CoreError::Cycle(2)));
    }
}
