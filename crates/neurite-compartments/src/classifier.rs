// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Compartment classification from flow-centrality scores.

Labels are applied in a fixed order, later rules overriding earlier ones:

1. every node starts as dendrite
2. the axon-initiation site (AIS) splits the tree into the AIS subtree
   (downstream) and everything else (upstream); the side carrying more
   output synapses becomes axon
3. zero-score nodes connected to the root become primary neurite, other
   zero-score nodes become null
4. nodes scoring at least `threshold * max_score` become primary dendrite

## Tie-breaks

The AIS is the highest-scoring node; ties go to the node closest to the root,
then to the lowest node id. When every score is zero this selects the root,
so the downstream side is the whole tree. When both sides carry the same
number of outputs neither becomes axon.
*/

use neurite_structures::tree::NodeIndex;
use neurite_structures::{CompartmentLabel, SkeletonTree};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::record::NodeRecord;

/// Side of the axon-initiation site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    /// The AIS and all of its descendants
    Downstream,
    /// Every other node, including the root unless it is the AIS
    Upstream,
}

/// What the classifier decided for one neuron
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOutcome {
    pub axon_initiation_site: NodeIndex,
    /// Membership of each node in the downstream partition
    pub downstream: Vec<bool>,
    /// Which partition was labelled axon, if either
    pub axon: Option<Partition>,
    pub max_score: u64,
    pub primary_neurite_nodes: usize,
    pub primary_dendrite_nodes: usize,
}

/// Highest flow centrality, then shallowest, then lowest node id
pub fn select_axon_initiation_site(tree: &SkeletonTree, records: &[NodeRecord]) -> NodeIndex {
    tree.preorder()
        .iter()
        .copied()
        .max_by(|&a, &b| rank_candidates(tree, records, a, b))
        .unwrap_or_else(|| tree.root())
}

fn rank_candidates(tree: &SkeletonTree, records: &[NodeRecord], a: NodeIndex, b: NodeIndex) -> Ordering {
    records[a]
        .flow_centrality
        .cmp(&records[b].flow_centrality)
        .then_with(|| tree.depth(b).cmp(&tree.depth(a)))
        .then_with(|| tree.id_of(b).cmp(&tree.id_of(a)))
}

/// Mark the AIS and all of its descendants
pub fn downstream_of(tree: &SkeletonTree, ais: NodeIndex) -> Vec<bool> {
    let mut mask = vec![false; tree.len()];
    for idx in tree.subtree(ais) {
        mask[idx] = true;
    }
    mask
}

/// Label the partition holding more outputs as axon, the other as dendrite
pub fn assign_axon_dendrite(records: &mut [NodeRecord], downstream: &[bool]) -> Option<Partition> {
    let (mut down_pre, mut up_pre) = (0u64, 0u64);
    for (record, &is_down) in records.iter().zip(downstream) {
        if is_down {
            down_pre += record.pre;
        } else {
            up_pre += record.pre;
        }
    }

    let axon = match down_pre.cmp(&up_pre) {
        Ordering::Greater => Some(Partition::Downstream),
        Ordering::Less => Some(Partition::Upstream),
        Ordering::Equal => None,
    };

    for (record, &is_down) in records.iter_mut().zip(downstream) {
        let side = if is_down {
            Partition::Downstream
        } else {
            Partition::Upstream
        };
        record.label = if axon == Some(side) {
            CompartmentLabel::Axon
        } else {
            CompartmentLabel::Dendrite
        };
    }

    debug!(
        "Outputs downstream {} vs upstream {}: axon {:?}",
        down_pre, up_pre, axon
    );
    axon
}

/// Label zero-score nodes: primary neurite when connected to the root through
/// zero-score nodes only, null otherwise. Returns the primary neurite size.
pub fn label_primary_neurite(tree: &SkeletonTree, records: &mut [NodeRecord]) -> usize {
    let root = tree.root();
    let mut primary = 0;
    if records[root].flow_centrality == 0 {
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            records[current].label = CompartmentLabel::PrimaryNeurite;
            primary += 1;
            stack.extend(
                tree.children(current)
                    .iter()
                    .copied()
                    .filter(|&child| records[child].flow_centrality == 0),
            );
        }
    }

    for record in records.iter_mut() {
        if record.flow_centrality == 0 && record.label != CompartmentLabel::PrimaryNeurite {
            record.label = CompartmentLabel::Null;
        }
    }
    primary
}

/// Relabel nodes scoring at least `threshold * max_score` as primary dendrite.
///
/// Does nothing when every score is zero. Returns the number of nodes relabelled.
pub fn apply_primary_dendrite(records: &mut [NodeRecord], threshold: f64) -> usize {
    let max_score = records.iter().map(|r| r.flow_centrality).max().unwrap_or(0);
    if max_score == 0 {
        return 0;
    }
    let cutoff = threshold * max_score as f64;
    let mut relabelled = 0;
    for record in records.iter_mut() {
        if record.flow_centrality as f64 >= cutoff {
            record.label = CompartmentLabel::PrimaryDendrite;
            relabelled += 1;
        }
    }
    relabelled
}

/// Run the full labelling sequence over scored records
pub fn classify_compartments(
    tree: &SkeletonTree,
    records: &mut [NodeRecord],
    primary_dendrite_threshold: Option<f64>,
) -> ClassifierOutcome {
    for record in records.iter_mut() {
        record.label = CompartmentLabel::Dendrite;
    }

    let max_score = records.iter().map(|r| r.flow_centrality).max().unwrap_or(0);
    let ais = select_axon_initiation_site(tree, records);
    debug!(
        "Axon initiation site: node {} (flow centrality {}, depth {})",
        tree.id_of(ais),
        records[ais].flow_centrality,
        tree.depth(ais)
    );

    let downstream = downstream_of(tree, ais);
    let axon = assign_axon_dendrite(records, &downstream);
    let primary_neurite_nodes = label_primary_neurite(tree, records);
    let primary_dendrite_nodes = primary_dendrite_threshold
        .map(|threshold| apply_primary_dendrite(records, threshold))
        .unwrap_or(0);

    ClassifierOutcome {
        axon_initiation_site: ais,
        downstream,
        axon,
        max_score,
        primary_neurite_nodes,
        primary_dendrite_nodes,
    }
}
