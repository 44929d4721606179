// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Flow propagation - synapse totals for every node's subtree.

## Algorithm

```text
segment (leaf ──► branch point)     running sum of post / pre
         │
         └─ segment total ──► carried into the terminus node
```

Segments arrive leaves-first from [`SkeletonTree::segments`], so a branch
point's carry is complete before the segment it heads is summed. Each node is
visited once: O(n) overall, no repeated walks to the root.
*/

use neurite_structures::SkeletonTree;
use tracing::debug;

use crate::record::NodeRecord;

/// Whole-tree synapse totals, used to normalise flow centrality
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowTotals {
    pub inputs: u64,
    pub outputs: u64,
}

impl FlowTotals {
    pub fn is_degenerate(&self) -> bool {
        self.inputs == 0 || self.outputs == 0
    }
}

/// Fill `up_in` / `up_out` with the inputs and outputs at or below each node.
///
/// The root ends up holding the whole-tree totals, which are also returned.
pub fn propagate_flow(tree: &SkeletonTree, records: &mut [NodeRecord]) -> FlowTotals {
    let mut carry_in = vec![0u64; records.len()];
    let mut carry_out = vec![0u64; records.len()];

    for record in records.iter_mut() {
        record.up_in = 0;
        record.up_out = 0;
    }

    let segments = tree.segments();
    for segment in &segments {
        let mut run_in = 0u64;
        let mut run_out = 0u64;
        for &idx in &segment.nodes {
            run_in += records[idx].post + carry_in[idx];
            run_out += records[idx].pre + carry_out[idx];
            records[idx].up_in = run_in;
            records[idx].up_out = run_out;
        }
        carry_in[segment.terminus] += run_in;
        carry_out[segment.terminus] += run_out;
    }

    let totals = FlowTotals {
        inputs: records.iter().map(|r| r.post).sum(),
        outputs: records.iter().map(|r| r.pre).sum(),
    };

    let root = tree.root();
    debug_assert_eq!(carry_in[root] + records[root].post, totals.inputs);
    debug_assert_eq!(carry_out[root] + records[root].pre, totals.outputs);
    records[root].up_in = totals.inputs;
    records[root].up_out = totals.outputs;

    debug!(
        "Propagated flow over {} segments: {} inputs, {} outputs",
        segments.len(),
        totals.inputs,
        totals.outputs
    );
    totals
}
