// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

use crate::skeleton::NodeId;

/// Result type for skeleton construction
pub type StructureResult<T> = Result<T, MalformedTreeError>;

/// Structural problems found while building a [`crate::SkeletonTree`].
///
/// These are fatal for the neuron being classified; batch callers report the
/// error and move on to the next neuron.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedTreeError {
    #[error("Skeleton contains no nodes")]
    Empty,

    #[error("Duplicate node id {0}")]
    DuplicateNode(NodeId),

    #[error("Node {node} references missing parent {parent}")]
    DanglingParent { node: NodeId, parent: NodeId },

    #[error("Skeleton has multiple roots: {0:?}")]
    MultipleRoots(Vec<NodeId>),

    #[error("Cycle detected involving node {0}")]
    Cycle(NodeId),
}
