// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

/*!
SkeletonTree - rooted tree view over a neuron skeleton.

Nodes are stored densely and addressed by [`NodeIndex`]; the original
[`NodeId`]s stay available through [`SkeletonTree::index_of`] and
[`SkeletonTree::id_of`].

# Design Notes

- Root is the single node with no parent
- Children keep the order in which they appeared in the input
- Structural checks (duplicates, dangling parents, multiple roots, cycles)
  happen once, in [`SkeletonTree::new`]
- A pre-order listing is kept; walking it backwards visits every node
  after all of its descendants
*/

use ahash::AHashMap;
use tracing::debug;

use crate::error::{MalformedTreeError, StructureResult};
use crate::skeleton::{NodeId, SkeletonNode};

/// Dense index of a node inside a [`SkeletonTree`]
pub type NodeIndex = usize;

/// Maximal unbranched run of nodes.
///
/// `nodes` starts at a leaf or a branch point (the head) and walks toward the
/// root, stopping before the next branch point or the root. That node is the
/// `terminus` and belongs to a different segment (or, for the root, to none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub nodes: Vec<NodeIndex>,
    pub terminus: NodeIndex,
}

impl Segment {
    pub fn head(&self) -> NodeIndex {
        self.nodes[0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Validated rooted tree built from skeleton nodes
#[derive(Debug, Clone)]
pub struct SkeletonTree {
    nodes: Vec<SkeletonNode>,
    index: AHashMap<NodeId, NodeIndex>,
    parents: Vec<Option<NodeIndex>>,
    children: Vec<Vec<NodeIndex>>,
    depths: Vec<u32>,
    preorder: Vec<NodeIndex>,
    root: NodeIndex,
}

impl SkeletonTree {
    /// Build a tree from skeleton nodes
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - no nodes are given
    /// - a node id appears twice
    /// - a parent id does not exist
    /// - more than one node has no parent
    /// - following parent links loops (including a node that is its own parent,
    ///   and node sets with no parentless node at all)
    pub fn new(nodes: Vec<SkeletonNode>) -> StructureResult<Self> {
        if nodes.is_empty() {
            return Err(MalformedTreeError::Empty);
        }

        let mut index = AHashMap::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            if index.insert(node.id, idx).is_some() {
                return Err(MalformedTreeError::DuplicateNode(node.id));
            }
        }

        let mut parents = Vec::with_capacity(nodes.len());
        let mut roots = Vec::new();
        for (idx, node) in nodes.iter().enumerate() {
            match node.parent {
                None => {
                    roots.push(idx);
                    parents.push(None);
                }
                Some(parent_id) if parent_id == node.id => {
                    return Err(MalformedTreeError::Cycle(node.id));
                }
                Some(parent_id) => {
                    let Some(&parent_idx) = index.get(&parent_id) else {
                        return Err(MalformedTreeError::DanglingParent {
                            node: node.id,
                            parent: parent_id,
                        });
                    };
                    parents.push(Some(parent_idx));
                }
            }
        }

        if roots.len() > 1 {
            let mut ids: Vec<NodeId> = roots.iter().map(|&r| nodes[r].id).collect();
            ids.sort_unstable();
            return Err(MalformedTreeError::MultipleRoots(ids));
        }
        let Some(&root) = roots.first() else {
            // Every node has a parent, so following parents must loop somewhere
            return Err(MalformedTreeError::Cycle(cycle_member(&nodes, &parents, 0)));
        };

        let mut children: Vec<Vec<NodeIndex>> = vec![Vec::new(); nodes.len()];
        for (idx, parent) in parents.iter().enumerate() {
            if let Some(p) = parent {
                children[*p].push(idx);
            }
        }

        // Iterative DFS from the root; reversed child push keeps input order
        let mut depths = vec![0u32; nodes.len()];
        let mut preorder = Vec::with_capacity(nodes.len());
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            preorder.push(current);
            for &child in children[current].iter().rev() {
                depths[child] = depths[current] + 1;
                stack.push(child);
            }
        }

        if preorder.len() < nodes.len() {
            let mut reached = vec![false; nodes.len()];
            for &idx in &preorder {
                reached[idx] = true;
            }
            let start = (0..nodes.len())
                .filter(|&i| !reached[i])
                .min_by_key(|&i| nodes[i].id)
                .unwrap_or(0);
            return Err(MalformedTreeError::Cycle(cycle_member(
                &nodes, &parents, start,
            )));
        }

        debug!(
            "Built skeleton tree: {} nodes, root {}",
            nodes.len(),
            nodes[root].id
        );

        Ok(Self {
            nodes,
            index,
            parents,
            children,
            depths,
            preorder,
            root,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: construction rejects empty skeletons
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn root_id(&self) -> NodeId {
        self.nodes[self.root].id
    }

    pub fn nodes(&self) -> &[SkeletonNode] {
        &self.nodes
    }

    pub fn node(&self, idx: NodeIndex) -> &SkeletonNode {
        &self.nodes[idx]
    }

    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    pub fn id_of(&self, idx: NodeIndex) -> NodeId {
        self.nodes[idx].id
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.parents[idx]
    }

    pub fn children(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.children[idx]
    }

    /// Number of edges between the node and the root
    pub fn depth(&self, idx: NodeIndex) -> u32 {
        self.depths[idx]
    }

    pub fn is_leaf(&self, idx: NodeIndex) -> bool {
        self.children[idx].is_empty()
    }

    pub fn is_branch_point(&self, idx: NodeIndex) -> bool {
        self.children[idx].len() > 1
    }

    /// Leaves in pre-order
    pub fn leaves(&self) -> Vec<NodeIndex> {
        self.preorder
            .iter()
            .copied()
            .filter(|&idx| self.is_leaf(idx))
            .collect()
    }

    pub fn branch_points(&self) -> Vec<NodeIndex> {
        self.preorder
            .iter()
            .copied()
            .filter(|&idx| self.is_branch_point(idx))
            .collect()
    }

    /// Root first, every node before its descendants
    pub fn preorder(&self) -> &[NodeIndex] {
        &self.preorder
    }

    /// Every node after all of its descendants, root last
    pub fn postorder(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.preorder.iter().rev().copied()
    }

    /// Node and all of its descendants, in pre-order
    pub fn subtree(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children[current].iter().rev().copied());
        }
        out
    }

    /// Node followed by each ancestor up to and including the root
    pub fn path_to_root(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut path = vec![idx];
        let mut current = idx;
        while let Some(parent) = self.parents[current] {
            path.push(parent);
            current = parent;
        }
        path
    }

    /// Decompose the tree into unbranched segments.
    ///
    /// Every non-root node belongs to exactly one segment. Segments are
    /// returned leaves-first: a segment always comes after every segment that
    /// terminates at its head.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::new();
        for idx in self.postorder() {
            if idx == self.root || !(self.is_leaf(idx) || self.is_branch_point(idx)) {
                continue;
            }
            let mut nodes = vec![idx];
            let mut current = self.parents[idx].unwrap_or(self.root);
            while current != self.root && self.children[current].len() == 1 {
                nodes.push(current);
                current = self.parents[current].unwrap_or(self.root);
            }
            segments.push(Segment {
                nodes,
                terminus: current,
            });
        }
        segments
    }
}

/// Smallest node id on the cycle reached by following parents from `start`
fn cycle_member(
    nodes: &[SkeletonNode],
    parents: &[Option<NodeIndex>],
    start: NodeIndex,
) -> NodeId {
    let mut seen = vec![false; nodes.len()];
    let mut current = start;
    while !seen[current] {
        seen[current] = true;
        match parents[current] {
            Some(parent) => current = parent,
            None => return nodes[current].id,
        }
    }

    // `current` is on the cycle; walk it once to find the smallest id
    let entry = current;
    let mut smallest = nodes[entry].id;
    while let Some(parent) = parents[current] {
        if parent == entry {
            break;
        }
        smallest = smallest.min(nodes[parent].id);
        current = parent;
    }
    smallest
}
