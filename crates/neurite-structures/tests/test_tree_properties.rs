// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Property tests for `SkeletonTree` over generated skeletons:
- segments cover every non-root node exactly once
- segment links follow parent pointers and stop at branch points or the root
- segments come leaves-first
- traversal orders respect parent/child ordering
*/

use neurite_structures::{NodeId, SkeletonNode, SkeletonTree};
use proptest::prelude::*;
use proptest::sample::Index;

/// Node `i` hangs off an earlier node; ids are scrambled and the input order
/// is shuffled so nothing relies on ids or positions lining up.
fn skeleton_strategy() -> impl Strategy<Value = Vec<SkeletonNode>> {
    (1usize..60)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(any::<Index>(), n - 1),
                Just((0..n).collect::<Vec<usize>>()).prop_shuffle(),
            )
        })
        .prop_map(|(parents, order)| {
            let id_of = |i: usize| -> NodeId { 5000 - (i as NodeId) * 13 };
            let parent_of = |i: usize| (i > 0).then(|| id_of(parents[i - 1].index(i)));
            order
                .into_iter()
                .map(|i| SkeletonNode::bare(id_of(i), parent_of(i)))
                .collect()
        })
}

proptest! {
    #[test]
    fn prop_segments_partition_non_root_nodes(nodes in skeleton_strategy()) {
        let tree = SkeletonTree::new(nodes).unwrap();
        let mut owner = vec![0usize; tree.len()];
        for segment in tree.segments() {
            prop_assert!(!segment.is_empty());
            for &idx in &segment.nodes {
                owner[idx] += 1;
            }
        }
        for idx in 0..tree.len() {
            let expected = if idx == tree.root() { 0 } else { 1 };
            prop_assert_eq!(owner[idx], expected, "node {} covered {} times", tree.id_of(idx), owner[idx]);
        }
    }

    #[test]
    fn prop_segments_follow_parent_links(nodes in skeleton_strategy()) {
        let tree = SkeletonTree::new(nodes).unwrap();
        for segment in tree.segments() {
            let head = segment.head();
            prop_assert!(tree.is_leaf(head) || tree.is_branch_point(head));
            prop_assert!(!segment.nodes.contains(&segment.terminus));
            prop_assert!(segment.terminus == tree.root() || tree.is_branch_point(segment.terminus));

            for pair in segment.nodes.windows(2) {
                prop_assert_eq!(tree.parent(pair[0]), Some(pair[1]));
                prop_assert_eq!(tree.children(pair[1]).len(), 1);
            }
            let last = segment.nodes[segment.len() - 1];
            prop_assert_eq!(tree.parent(last), Some(segment.terminus));
        }
    }

    #[test]
    fn prop_segments_come_leaves_first(nodes in skeleton_strategy()) {
        let tree = SkeletonTree::new(nodes).unwrap();
        let segments = tree.segments();
        let mut position_of = vec![None; tree.len()];
        for (position, segment) in segments.iter().enumerate() {
            for &idx in &segment.nodes {
                position_of[idx] = Some(position);
            }
        }
        for (position, segment) in segments.iter().enumerate() {
            if segment.terminus == tree.root() {
                continue;
            }
            let later = position_of[segment.terminus].unwrap();
            prop_assert!(later > position, "terminus segment {} precedes {}", later, position);
        }
    }

    #[test]
    fn prop_traversals_order_parents_and_children(nodes in skeleton_strategy()) {
        let tree = SkeletonTree::new(nodes).unwrap();
        let preorder = tree.preorder();
        prop_assert_eq!(preorder.len(), tree.len());
        prop_assert_eq!(preorder[0], tree.root());

        let mut pre_rank = vec![0usize; tree.len()];
        for (rank, &idx) in preorder.iter().enumerate() {
            pre_rank[idx] = rank;
        }
        let mut post_rank = vec![0usize; tree.len()];
        for (rank, idx) in tree.postorder().enumerate() {
            post_rank[idx] = rank;
        }
        for idx in 0..tree.len() {
            if let Some(parent) = tree.parent(idx) {
                prop_assert!(pre_rank[parent] < pre_rank[idx]);
                prop_assert!(post_rank[parent] > post_rank[idx]);
                prop_assert_eq!(tree.depth(idx), tree.depth(parent) + 1);
            }
        }
    }
}
