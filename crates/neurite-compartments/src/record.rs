// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

use neurite_structures::{CompartmentLabel, NodeId, SkeletonNode};
use serde::{Deserialize, Serialize};

/// Per-node working record, filled stage by stage.
///
/// Records are aligned with the [`neurite_structures::SkeletonTree`] node
/// indices they were created for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub node: SkeletonNode,
    /// Input (postsynaptic) sites on this node
    pub post: u64,
    /// Output (presynaptic) sites on this node, partner-weighted under polypre
    pub pre: u64,
    /// Inputs at or below this node
    pub up_in: u64,
    /// Outputs at or below this node
    pub up_out: u64,
    pub flow_centrality: u64,
    pub label: CompartmentLabel,
}

impl NodeRecord {
    pub fn new(node: SkeletonNode) -> Self {
        Self {
            node,
            post: 0,
            pre: 0,
            up_in: 0,
            up_out: 0,
            flow_centrality: 0,
            label: CompartmentLabel::Dendrite,
        }
    }

    pub fn id(&self) -> NodeId {
        self.node.id
    }

    pub fn synapses(&self) -> u64 {
        self.post + self.pre
    }

    /// Inputs strictly below this node
    pub fn distal_in(&self) -> u64 {
        self.up_in.saturating_sub(self.post)
    }

    /// Outputs strictly below this node
    pub fn distal_out(&self) -> u64 {
        self.up_out.saturating_sub(self.pre)
    }
}
