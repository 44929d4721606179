// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

//! Synapse mapping: attach raw input/output counts to skeleton nodes.
//!
//! Synapse records already name the node they sit on, so mapping is an id
//! lookup. Records naming an unknown node are skipped and counted.

use neurite_structures::{SkeletonTree, SynapseDirection, SynapseRecord};
use tracing::{debug, warn};

use crate::record::NodeRecord;

/// Outcome of mapping a neuron's synapses onto its skeleton
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingReport {
    pub inputs_mapped: usize,
    pub outputs_mapped: usize,
    pub unmapped: usize,
    /// Sum of `post` over all nodes
    pub total_post: u64,
    /// Sum of `pre` over all nodes (partner-weighted under polypre)
    pub total_pre: u64,
}

/// Create the per-node record table and fill `post` / `pre`.
///
/// With `polypre` enabled an output synapse adds its `partners` count to
/// `pre` instead of 1. Cumulative counts start at zero; the flow propagator
/// fills them in.
pub fn map_synapses(
    tree: &SkeletonTree,
    synapses: &[SynapseRecord],
    polypre: bool,
) -> (Vec<NodeRecord>, MappingReport) {
    let mut records: Vec<NodeRecord> = tree.nodes().iter().cloned().map(NodeRecord::new).collect();
    let mut report = MappingReport::default();

    for synapse in synapses {
        let Some(idx) = tree.index_of(synapse.node_id) else {
            report.unmapped += 1;
            continue;
        };
        match synapse.direction {
            SynapseDirection::Input => {
                records[idx].post += 1;
                report.inputs_mapped += 1;
                report.total_post += 1;
            }
            SynapseDirection::Output => {
                let weight = if polypre {
                    u64::from(synapse.partners)
                } else {
                    1
                };
                records[idx].pre += weight;
                report.outputs_mapped += 1;
                report.total_pre += weight;
            }
        }
    }

    if report.unmapped > 0 {
        warn!(
            "{} synapses reference nodes absent from skeleton rooted at {}",
            report.unmapped,
            tree.root_id()
        );
    }
    debug!(
        "Mapped synapses: {} inputs, {} outputs (pre weight {}, polypre={})",
        report.inputs_mapped, report.outputs_mapped, report.total_pre, polypre
    );

    (records, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurite_structures::SkeletonNode;

    fn chain() -> SkeletonTree {
        SkeletonTree::new(vec![
            SkeletonNode::bare(1, None),
            SkeletonNode::bare(2, Some(1)),
            SkeletonNode::bare(3, Some(2)),
        ])
        .unwrap()
    }

    fn synapses() -> Vec<SynapseRecord> {
        vec![
            SynapseRecord::input(100, 3),
            SynapseRecord::input(101, 3),
            SynapseRecord::output(200, 2, 4),
            SynapseRecord::output(201, 2, 1),
        ]
    }

    #[test]
    fn test_raw_counts_without_polypre() {
        let tree = chain();
        let (records, report) = map_synapses(&tree, &synapses(), false);
        let three = tree.index_of(3).unwrap();
        let two = tree.index_of(2).unwrap();
        assert_eq!(records[three].post, 2);
        assert_eq!(records[two].pre, 2);
        assert_eq!(report.total_pre, 2);
        assert_eq!(report.total_post, 2);
    }

    #[test]
    fn test_polypre_weights_outputs_by_partner_count() {
        let tree = chain();
        let (records, report) = map_synapses(&tree, &synapses(), true);
        let two = tree.index_of(2).unwrap();
        assert_eq!(records[two].pre, 5);
        assert_eq!(report.total_pre, 5);
        assert_eq!(report.outputs_mapped, 2);
    }

    #[test]
    fn test_unknown_nodes_are_skipped() {
        let tree = chain();
        let mut syns = synapses();
        syns.push(SynapseRecord::input(300, 99));
        let (records, report) = map_synapses(&tree, &syns, false);
        assert_eq!(report.unmapped, 1);
        assert_eq!(records.iter().map(|r| r.post).sum::<u64>(), 2);
    }

    #[test]
    fn test_cumulative_counts_start_at_zero() {
        let tree = chain();
        let (records, _) = map_synapses(&tree, &synapses(), true);
        assert!(records.iter().all(|r| r.up_in == 0 && r.up_out == 0));
        assert!(records.iter().all(|r| r.flow_centrality == 0));
    }
}
