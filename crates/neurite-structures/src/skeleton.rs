// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Skeleton node identifier as issued by the tracing source
pub type NodeId = u64;

/// 3D coordinate in the source's physical units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<(f64, f64, f64)> for Point3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

/// One traced point of a neuron skeleton.
///
/// `parent` is `None` only for the root (soma side) of the skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonNode {
    pub id: NodeId,
    #[serde(default)]
    pub parent: Option<NodeId>,
    #[serde(default)]
    pub position: Point3,
    #[serde(default)]
    pub radius: f64,
}

impl SkeletonNode {
    pub fn new(id: NodeId, parent: Option<NodeId>, position: Point3, radius: f64) -> Self {
        Self {
            id,
            parent,
            position,
            radius,
        }
    }

    /// Node at the origin with no radius, handy for topology-only trees
    pub fn bare(id: NodeId, parent: Option<NodeId>) -> Self {
        Self::new(id, parent, Point3::default(), 0.0)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_deserialize_defaults() {
        let node: SkeletonNode = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(node.id, 7);
        assert!(node.is_root());
        assert_eq!(node.position, Point3::default());
    }
}
