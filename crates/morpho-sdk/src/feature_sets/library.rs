//! Feature bodies
//!
//! Plain functions over a dataset and bound parameters. They read the
//! `node_types` parameter to restrict themselves to a neurite population and
//! `bifurcation_kind` to choose how a branch direction is measured. Marks are
//! attached where the functions are registered, in the parent module.

use anyhow::{anyhow, Context};
use morpho_core::{Morphology, Node, NodeType, Value};
use morpho_runtime::data::RELATIVE_SOMA_DEPTH;
use morpho_runtime::feature::params::BIFURCATION_KIND;
use morpho_runtime::{Data, FeatureParams};
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// How a bifurcation's child directions are measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BifurcationKind {
    /// Vectors to the immediate children
    Local,
    /// Vectors to the next branch point or tip along each child
    Remote,
}

impl BifurcationKind {
    fn from_params(params: &FeatureParams) -> anyhow::Result<Self> {
        match params.get_str(BIFURCATION_KIND)? {
            None | Some("local") => Ok(Self::Local),
            Some("remote") => Ok(Self::Remote),
            Some(other) => Err(anyhow!(
                "bifurcation_kind must be 'local' or 'remote', got '{}'",
                other
            )),
        }
    }
}

fn selected_nodes<'a>(data: &'a Data, params: &FeatureParams) -> anyhow::Result<Vec<&'a Node>> {
    let types = params.node_types()?;
    Ok(data.morphology().nodes_by_types(types.as_deref()))
}

/// Number of nodes of the selected types
pub fn num_nodes(data: &Data, params: &FeatureParams) -> anyhow::Result<Value> {
    Ok(selected_nodes(data, params)?.len().into())
}

/// Number of nodes of the selected types with two or more children
pub fn num_bifurcations(data: &Data, params: &FeatureParams) -> anyhow::Result<Value> {
    let morphology = data.morphology();
    let count = selected_nodes(data, params)?
        .into_iter()
        .filter(|node| morphology.children(node.id).len() >= 2)
        .count();
    Ok(count.into())
}

/// Number of childless nodes of the selected types
pub fn num_tips(data: &Data, params: &FeatureParams) -> anyhow::Result<Value> {
    let morphology = data.morphology();
    let count = selected_nodes(data, params)?
        .into_iter()
        .filter(|node| node.node_type != NodeType::Soma && morphology.children(node.id).is_empty())
        .count();
    Ok(count.into())
}

/// Summed length of the compartments whose child is of a selected type
pub fn total_length(data: &Data, params: &FeatureParams) -> anyhow::Result<Value> {
    let morphology = data.morphology();
    let types = params.node_types()?;
    let mut total = 0.0;
    for compartment in morphology.compartments(types.as_deref()) {
        total += morphology
            .compartment_length(&compartment)
            .context("measuring compartment")?;
    }
    Ok(total.into())
}

/// Largest straight-line distance from the soma (or first root) to a selected node
pub fn max_euclidean_distance(data: &Data, params: &FeatureParams) -> anyhow::Result<Value> {
    let morphology = data.morphology();
    let origin = morphology
        .soma()
        .or_else(|| morphology.roots().into_iter().next())
        .ok_or_else(|| anyhow!("morphology has no root"))?;

    let max = selected_nodes(data, params)?
        .into_iter()
        .map(|node| Morphology::euclidean_distance(origin, node))
        .fold(0.0_f64, f64::max);
    Ok(max.into())
}

/// Mean angle in radians between the first two child directions of each
/// bifurcation. `Null` when the selected population has no bifurcation.
pub fn mean_bifurcation_angle(data: &Data, params: &FeatureParams) -> anyhow::Result<Value> {
    let kind = BifurcationKind::from_params(params)?;
    let morphology = data.morphology();

    let mut angles = Vec::new();
    for node in selected_nodes(data, params)? {
        let children = morphology.children(node.id);
        if children.len() < 2 {
            continue;
        }
        let (a, b) = match kind {
            BifurcationKind::Local => (children[0], children[1]),
            BifurcationKind::Remote => (
                next_branch_or_tip(morphology, children[0]),
                next_branch_or_tip(morphology, children[1]),
            ),
        };
        if let Some(angle) = angle_between(node, a, b) {
            angles.push(angle);
        }
    }

    if angles.is_empty() {
        return Ok(Value::Null);
    }
    Ok((angles.iter().sum::<f64>() / angles.len() as f64).into())
}

/// Follow single-child chains down to the next bifurcation or tip
fn next_branch_or_tip<'a>(morphology: &'a Morphology, start: &'a Node) -> &'a Node {
    let mut current = start;
    loop {
        let children = morphology.children(current.id);
        if children.len() != 1 {
            return current;
        }
        current = children[0];
    }
}

fn angle_between(origin: &Node, a: &Node, b: &Node) -> Option<f64> {
    let o = origin.position();
    let u = [a.x - o[0], a.y - o[1], a.z - o[2]];
    let v = [b.x - o[0], b.y - o[1], b.z - o[2]];
    let dot: f64 = u.iter().zip(v.iter()).map(|(p, q)| p * q).sum();
    let norm_u = u.iter().map(|p| p * p).sum::<f64>().sqrt();
    let norm_v = v.iter().map(|p| p * p).sum::<f64>().sqrt();
    if norm_u == 0.0 || norm_v == 0.0 {
        return None;
    }
    Some((dot / (norm_u * norm_v)).clamp(-1.0, 1.0).acos())
}

fn soma_node(data: &Data) -> anyhow::Result<&Node> {
    data.morphology()
        .soma()
        .ok_or_else(|| anyhow!("morphology does not have exactly one soma node"))
}

/// Radius of the soma node
pub fn soma_radius(data: &Data, _params: &FeatureParams) -> anyhow::Result<Value> {
    Ok(soma_node(data)?.radius.into())
}

/// Surface area of the soma treated as a sphere
pub fn soma_surface(data: &Data, _params: &FeatureParams) -> anyhow::Result<Value> {
    let radius = soma_node(data)?.radius;
    Ok((4.0 * PI * radius * radius).into())
}

/// Relative soma depth as supplied with the dataset
pub fn relative_soma_depth(data: &Data, _params: &FeatureParams) -> anyhow::Result<Value> {
    let depth = data
        .get(RELATIVE_SOMA_DEPTH)
        .and_then(Value::as_f64)
        .ok_or_else(|| anyhow!("'{}' is not a number", RELATIVE_SOMA_DEPTH))?;
    Ok(depth.into())
}

/// Node count per node type present in the morphology
pub fn node_type_counts(data: &Data, _params: &FeatureParams) -> anyhow::Result<Value> {
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for node in data.morphology().nodes() {
        *counts.entry(node.node_type.as_str()).or_default() += 1;
    }
    let object = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), Value::from(count)))
        .collect();
    Ok(Value::Object(object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Soma at the origin with a Y-shaped axon and a straight basal dendrite.
    ///
    /// ```text
    ///            4 (1,2)   5 (-1,2)
    ///             \       /
    ///              3 (0,1)        axon
    ///              |
    ///              2 (0,0.5)
    ///              |
    ///  7 (-2,0) -- 1 soma (0,0)
    ///  basal  6 (-1,0)
    /// ```
    fn sample() -> Data {
        let nodes = vec![
            Node::new(1, NodeType::Soma, [0.0, 0.0, 0.0], 2.0, None),
            Node::new(2, NodeType::Axon, [0.0, 0.5, 0.0], 0.5, Some(1)),
            Node::new(3, NodeType::Axon, [0.0, 1.0, 0.0], 0.5, Some(2)),
            Node::new(4, NodeType::Axon, [1.0, 2.0, 0.0], 0.5, Some(3)),
            Node::new(5, NodeType::Axon, [-1.0, 2.0, 0.0], 0.5, Some(3)),
            Node::new(6, NodeType::BasalDendrite, [-1.0, 0.0, 0.0], 0.5, Some(1)),
            Node::new(7, NodeType::BasalDendrite, [-2.0, 0.0, 0.0], 0.5, Some(6)),
        ];
        Data::new(Arc::new(Morphology::new(nodes).unwrap()))
    }

    fn axon() -> FeatureParams {
        FeatureParams::new().with_node_types(&[NodeType::Axon])
    }

    #[test]
    fn test_counts_restricted_to_types() {
        let data = sample();
        assert_eq!(num_nodes(&data, &axon()).unwrap(), Value::from(4usize));
        assert_eq!(num_nodes(&data, &FeatureParams::new()).unwrap(), Value::from(7usize));
        assert_eq!(num_bifurcations(&data, &axon()).unwrap(), Value::from(1usize));
        assert_eq!(num_tips(&data, &axon()).unwrap(), Value::from(2usize));
    }

    #[test]
    fn test_total_length() {
        let data = sample();
        let basal = FeatureParams::new().with_node_types(&[NodeType::BasalDendrite]);
        let length = total_length(&data, &basal).unwrap().as_f64().unwrap();
        assert!((length - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_euclidean_distance_from_soma() {
        let data = sample();
        let distance = max_euclidean_distance(&data, &axon()).unwrap().as_f64().unwrap();
        assert!((distance - 5.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_local_and_remote_angles_agree_on_y_split() {
        let data = sample();
        let local = mean_bifurcation_angle(&data, &axon().with(BIFURCATION_KIND, "local"))
            .unwrap()
            .as_f64()
            .unwrap();
        let remote = mean_bifurcation_angle(&data, &axon().with(BIFURCATION_KIND, "remote"))
            .unwrap()
            .as_f64()
            .unwrap();
        assert!((local - PI / 2.0).abs() < 1e-9);
        assert!((remote - local).abs() < 1e-9);
    }

    #[test]
    fn test_angle_is_null_without_bifurcations() {
        let data = sample();
        let basal = FeatureParams::new().with_node_types(&[NodeType::BasalDendrite]);
        assert!(mean_bifurcation_angle(&data, &basal).unwrap().is_null());
    }

    #[test]
    fn test_invalid_bifurcation_kind() {
        let data = sample();
        let params = axon().with(BIFURCATION_KIND, "sideways");
        let err = mean_bifurcation_angle(&data, &params).unwrap_err();
        assert!(err.to_string().contains("sideways"));
    }

    #[test]
    fn test_soma_features() {
        let data = sample();
        assert_eq!(soma_radius(&data, &FeatureParams::new()).unwrap(), Value::from(2.0));
        let surface = soma_surface(&data, &FeatureParams::new()).unwrap().as_f64().unwrap();
        assert!((surface - 16.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_relative_soma_depth_reads_aux_value() {
        let data = sample().with_value(RELATIVE_SOMA_DEPTH, 0.35);
        assert_eq!(
            relative_soma_depth(&data, &FeatureParams::new()).unwrap(),
            Value::from(0.35)
        );
        assert!(relative_soma_depth(&sample(), &FeatureParams::new()).is_err());
    }

    #[test]
    fn test_node_type_counts() {
        let data = sample();
        let counts = node_type_counts(&data, &FeatureParams::new()).unwrap();
        let object = counts.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(object.get("axon"), Some(&Value::from(4usize)));
        assert_eq!(object.get("soma"), Some(&Value::from(1usize)));
        assert_eq!(object.get("basal_dendrite"), Some(&Value::from(2usize)));
    }

    #[test]
    fn test_node_type_counts_json_is_stable() {
        let counts = node_type_counts(&sample(), &FeatureParams::new()).unwrap();
        assert_eq!(
            serde_json::to_string(&counts).unwrap(),
            r#"{"axon":4.0,"basal_dendrite":2.0,"soma":1.0}"#
        );
    }
}
