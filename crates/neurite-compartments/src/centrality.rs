// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

//! Synaptic flow centrality.
//!
//! A node's score counts directed input-to-output paths through it. Synapses
//! on the node itself count as proximal: "distal" means strictly below the
//! node, away from the root.

use neurite_structures::FlowMode;
use tracing::debug;

use crate::flow::FlowTotals;
use crate::record::NodeRecord;

/// Flow centrality of one node from its distal input/output counts.
///
/// - centrifugal: `(inputs - distal_in) * distal_out`
/// - centripetal: `(outputs - distal_out) * distal_in`
/// - average: the sum of both
pub fn flow_centrality(mode: FlowMode, totals: FlowTotals, distal_in: u64, distal_out: u64) -> u64 {
    let centrifugal = || totals.inputs.saturating_sub(distal_in).saturating_mul(distal_out);
    let centripetal = || totals.outputs.saturating_sub(distal_out).saturating_mul(distal_in);
    match mode {
        FlowMode::Centrifugal => centrifugal(),
        FlowMode::Centripetal => centripetal(),
        FlowMode::Average => centrifugal().saturating_add(centripetal()),
    }
}

/// Score every record in place; returns the maximum score
pub fn score_flow_centrality(records: &mut [NodeRecord], totals: FlowTotals, mode: FlowMode) -> u64 {
    let mut max_score = 0;
    for record in records.iter_mut() {
        record.flow_centrality =
            flow_centrality(mode, totals, record.distal_in(), record.distal_out());
        max_score = max_score.max(record.flow_centrality);
    }
    debug!("Scored {} nodes ({} mode), max flow centrality {}", records.len(), mode, max_score);
    max_score
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOTALS: FlowTotals = FlowTotals {
        inputs: 10,
        outputs: 6,
    };

    #[test]
    fn test_modes() {
        // 4 inputs and 2 outputs below the node
        assert_eq!(flow_centrality(FlowMode::Centrifugal, TOTALS, 4, 2), 12);
        assert_eq!(flow_centrality(FlowMode::Centripetal, TOTALS, 4, 2), 16);
        assert_eq!(flow_centrality(FlowMode::Average, TOTALS, 4, 2), 28);
    }

    #[test]
    fn test_no_paths_without_both_sides() {
        assert_eq!(flow_centrality(FlowMode::Average, TOTALS, 0, 0), 0);
        assert_eq!(flow_centrality(FlowMode::Centrifugal, TOTALS, 10, 6), 0);
        assert_eq!(flow_centrality(FlowMode::Average, FlowTotals::default(), 0, 0), 0);
    }

    #[test]
    fn test_score_records_returns_max() {
        let mut records: Vec<NodeRecord> = (1..=2)
            .map(|id| NodeRecord::new(neurite_structures::SkeletonNode::bare(id, None)))
            .collect();
        records[0].up_in = 4;
        records[0].up_out = 2;
        records[1].up_in = 1;
        records[1].post = 1;
        let max = score_flow_centrality(&mut records, TOTALS, FlowMode::Average);
        assert_eq!(max, 28);
        assert_eq!(records[1].flow_centrality, 0);
    }
}
