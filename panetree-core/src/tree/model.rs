//! Arena-backed layout tree
//!
//! This module provides [`TreeModel`], which owns every node of the layout
//! and implements the structural mutations (split, close, resize) together
//! with their exact inverses.
//!
//! # Example
//!
//! ```
//! use panetree_core::tree::TreeModel;
//! use panetree_core::types::{Side, SurfaceId};
//!
//! let (mut tree, editor) = TreeModel::with_root(SurfaceId::new("editor"));
//!
//! // Initially, there's one pane and no splits
//! assert_eq!(tree.pane_count(), 1);
//!
//! // Put a terminal to the right, keeping 30% for the editor
//! let terminal = tree.split(editor, Side::Right, SurfaceId::new("terminal"), 0.3).unwrap();
//! assert_eq!(tree.pane_ids(), vec![editor, terminal]);
//!
//! // Closing it splices the editor back into the root slot
//! tree.close(terminal).unwrap();
//! assert_eq!(tree.pane_ids(), vec![editor]);
//! ```

use std::collections::BTreeMap;

use super::node::{
    LeafNode, MAX_RESIZE_RATIO, MAX_SPLIT_RATIO, MIN_RESIZE_RATIO, MIN_SPLIT_RATIO, NodeRef,
    SplitNode,
};
use super::validate::{self, InvariantViolation};
use crate::error::{LayoutError, LayoutResult};
use crate::focus::FocusState;
use crate::snapshot::SnapshotNode;
use crate::types::{NodeId, PaneId, Side, SurfaceId};

/// Owns the binary tree of splits and leaves for one layout session.
///
/// Nodes are stored in two maps keyed by their ids; edges are ids as well,
/// so splicing a subtree in or out is a handful of map updates.
///
/// # Layout States
///
/// - **Empty**: `root` is `None` (before initialization)
/// - **Single pane**: `root` is a leaf
/// - **Split**: `root` is a split node
///
/// The model also records which pane is focused, since that is part of
/// the session state a snapshot persists and an undo restores.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeModel {
    root: Option<NodeRef>,
    leaves: BTreeMap<PaneId, LeafNode>,
    splits: BTreeMap<NodeId, SplitNode>,
    focus: FocusState,
}

/// Everything `close` removed, so the removal can be reversed exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedPane {
    /// The removed leaf, still recording its old parent.
    pub leaf: LeafNode,
    /// The split that was spliced out, with its original children.
    pub split: SplitNode,
    /// Focus before the close.
    pub previous_focus: FocusState,
}

impl ClosedPane {
    /// The sibling that took the split's place.
    #[must_use]
    pub fn sibling(&self) -> NodeRef {
        let leaf = NodeRef::Leaf(self.leaf.pane_id);
        if self.split.children[0] == leaf {
            self.split.children[1]
        } else {
            self.split.children[0]
        }
    }
}

impl TreeModel {
    /// Creates an empty (uninitialized) layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a layout with a single focused pane.
    #[must_use]
    pub fn with_root(surface_id: SurfaceId) -> (Self, PaneId) {
        let mut tree = Self::new();
        let pane_id = PaneId::new();
        tree.root = Some(NodeRef::Leaf(pane_id));
        tree.leaves
            .insert(pane_id, LeafNode::with_id(pane_id, surface_id));
        tree.focus = FocusState::Focused(pane_id);
        (tree, pane_id)
    }

    /// Installs the first pane of an empty layout and focuses it.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::AlreadyInitialized` if the layout has a root.
    pub fn initialize(&mut self, leaf: LeafNode) -> LayoutResult<PaneId> {
        if self.root.is_some() {
            return Err(LayoutError::AlreadyInitialized);
        }
        let pane_id = leaf.pane_id;
        self.root = Some(NodeRef::Leaf(pane_id));
        self.leaves.insert(
            pane_id,
            LeafNode {
                parent: None,
                ..leaf
            },
        );
        self.focus = FocusState::Focused(pane_id);
        Ok(pane_id)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns the root node, or `None` for an empty layout.
    #[must_use]
    pub const fn root(&self) -> Option<NodeRef> {
        self.root
    }

    /// Returns true if the layout has no panes yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Finds a leaf by pane id.
    #[must_use]
    pub fn find(&self, pane_id: PaneId) -> Option<&LeafNode> {
        self.leaves.get(&pane_id)
    }

    /// Alias of [`find`](Self::find).
    #[must_use]
    pub fn leaf(&self, pane_id: PaneId) -> Option<&LeafNode> {
        self.leaves.get(&pane_id)
    }

    /// Finds a split node by id.
    #[must_use]
    pub fn split_node(&self, node_id: NodeId) -> Option<&SplitNode> {
        self.splits.get(&node_id)
    }

    /// Mutable access to a split node.
    ///
    /// Changes made through this reference bypass the model's checks; the
    /// command engine re-validates after every command.
    pub fn split_node_mut(&mut self, node_id: NodeId) -> Option<&mut SplitNode> {
        self.splits.get_mut(&node_id)
    }

    /// Returns true if the tree contains the pane.
    #[must_use]
    pub fn contains(&self, pane_id: PaneId) -> bool {
        self.leaves.contains_key(&pane_id)
    }

    /// Returns the split owning `node`, or `None` for the root or an
    /// unknown node.
    #[must_use]
    pub fn parent_of(&self, node: NodeRef) -> Option<NodeId> {
        match node {
            NodeRef::Leaf(id) => self.leaves.get(&id).and_then(|l| l.parent),
            NodeRef::Split(id) => self.splits.get(&id).and_then(|s| s.parent),
        }
    }

    /// Returns the other child of the pane's parent split.
    #[must_use]
    pub fn sibling_of(&self, pane_id: PaneId) -> Option<NodeRef> {
        let parent = self.parent_of(NodeRef::Leaf(pane_id))?;
        let split = self.splits.get(&parent)?;
        let index = split.child_index(NodeRef::Leaf(pane_id))?;
        Some(split.children[1 - index])
    }

    /// Returns the first (leftmost/topmost) leaf below `node`.
    #[must_use]
    pub fn first_leaf_of(&self, node: NodeRef) -> Option<PaneId> {
        let mut current = node;
        loop {
            match current {
                NodeRef::Leaf(id) => return self.leaves.contains_key(&id).then_some(id),
                NodeRef::Split(id) => current = self.splits.get(&id)?.children[0],
            }
        }
    }

    /// Returns all pane ids in tree order (depth-first, left-to-right).
    #[must_use]
    pub fn pane_ids(&self) -> Vec<PaneId> {
        let mut ids = Vec::with_capacity(self.leaves.len());
        let Some(root) = self.root else {
            return ids;
        };
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            match node {
                NodeRef::Leaf(id) => ids.push(id),
                NodeRef::Split(id) => {
                    if let Some(split) = self.splits.get(&id) {
                        stack.push(split.children[1]);
                        stack.push(split.children[0]);
                    }
                }
            }
        }
        ids
    }

    /// Returns the number of panes.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.leaves.len()
    }

    /// Returns the number of split nodes.
    #[must_use]
    pub fn split_count(&self) -> usize {
        self.splits.len()
    }

    /// Returns the depth of the tree.
    ///
    /// A single pane has depth 0. Each level of splits adds 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.map_or(0, |root| self.depth_of(root))
    }

    fn depth_of(&self, node: NodeRef) -> usize {
        match node {
            NodeRef::Leaf(_) => 0,
            NodeRef::Split(id) => self.splits.get(&id).map_or(0, |split| {
                1 + self
                    .depth_of(split.children[0])
                    .max(self.depth_of(split.children[1]))
            }),
        }
    }

    /// Iterates over all leaves (in id order, not tree order).
    pub fn leaves(&self) -> impl Iterator<Item = &LeafNode> {
        self.leaves.values()
    }

    /// Iterates over all split nodes (in id order, not tree order).
    pub fn splits(&self) -> impl Iterator<Item = &SplitNode> {
        self.splits.values()
    }

    /// Returns true if both trees have the same nodes, edges and ratios.
    ///
    /// Focus and leaf metadata are ignored.
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.root == other.root
            && self.splits == other.splits
            && self.leaves.len() == other.leaves.len()
            && self
                .leaves
                .iter()
                .zip(&other.leaves)
                .all(|((a, la), (b, lb))| a == b && la.parent == lb.parent)
    }

    /// Returns the focus state.
    #[must_use]
    pub const fn focus(&self) -> FocusState {
        self.focus
    }

    /// Returns the focused pane, if any.
    #[must_use]
    pub const fn focused(&self) -> Option<PaneId> {
        self.focus.pane()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Moves focus to `pane_id`, or clears it with `None`.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::PaneNotFound` if the pane is not in the tree.
    pub fn set_focused(&mut self, pane_id: Option<PaneId>) -> LayoutResult<FocusState> {
        let previous = self.focus;
        self.focus = match pane_id {
            None => FocusState::NoFocus,
            Some(id) if self.leaves.contains_key(&id) => FocusState::Focused(id),
            Some(id) => return Err(LayoutError::PaneNotFound(id)),
        };
        Ok(previous)
    }

    pub(crate) fn restore_focus(&mut self, focus: FocusState) {
        self.focus = focus;
    }

    /// Splits a pane, placing a new pane on the given side.
    ///
    /// `ratio` is the share of the space the existing pane keeps. The new
    /// split is horizontal for left/right and vertical for top/bottom; the
    /// new pane comes first for left/top and second for right/bottom.
    ///
    /// # Returns
    ///
    /// Returns the ID of the newly created pane.
    ///
    /// # Errors
    ///
    /// - `LayoutError::PaneNotFound` if the pane doesn't exist
    /// - `LayoutError::InvalidRatio` if `ratio` is not in (0.1, 0.9)
    pub fn split(
        &mut self,
        pane_id: PaneId,
        side: Side,
        surface_id: SurfaceId,
        ratio: f64,
    ) -> LayoutResult<PaneId> {
        self.split_with_ids(
            pane_id,
            side,
            LeafNode::new(surface_id),
            NodeId::new(),
            ratio,
        )
    }

    /// Like [`split`](Self::split) with caller-chosen ids for the new leaf
    /// and split node. Redo uses this so replayed commands recreate the
    /// same identities.
    ///
    /// # Errors
    ///
    /// As [`split`](Self::split), plus `LayoutError::InvalidStructure` if
    /// either id is already in use.
    pub fn split_with_ids(
        &mut self,
        pane_id: PaneId,
        side: Side,
        new_leaf: LeafNode,
        node_id: NodeId,
        ratio: f64,
    ) -> LayoutResult<PaneId> {
        check_split_ratio(ratio)?;
        let parent = self
            .leaves
            .get(&pane_id)
            .ok_or(LayoutError::PaneNotFound(pane_id))?
            .parent;

        let new_id = new_leaf.pane_id;
        if self.leaves.contains_key(&new_id) {
            return Err(LayoutError::InvalidStructure(vec![
                InvariantViolation::DuplicatePane(new_id),
            ]));
        }
        if self.splits.contains_key(&node_id) {
            return Err(LayoutError::InvalidStructure(vec![
                InvariantViolation::DuplicateSplit(node_id),
            ]));
        }

        let existing = NodeRef::Leaf(pane_id);
        let created = NodeRef::Leaf(new_id);
        let (children, ratios) = if side.new_pane_first() {
            ([created, existing], [1.0 - ratio, ratio])
        } else {
            ([existing, created], [ratio, 1.0 - ratio])
        };

        let mut split = SplitNode::new(node_id, side.orientation(), children, ratios);
        split.parent = parent;

        self.replace_child(parent, existing, NodeRef::Split(node_id));
        if let Some(leaf) = self.leaves.get_mut(&pane_id) {
            leaf.parent = Some(node_id);
        }
        self.leaves.insert(
            new_id,
            LeafNode {
                parent: Some(node_id),
                ..new_leaf
            },
        );
        self.splits.insert(node_id, split);

        tracing::debug!(pane_id = %pane_id, new_pane_id = %new_id, %side, ratio, "Split pane");
        Ok(new_id)
    }

    /// Closes a pane, splicing its sibling into the parent's slot.
    ///
    /// If the closed pane was focused, focus moves to the first pane of the
    /// sibling subtree.
    ///
    /// # Errors
    ///
    /// - `LayoutError::PaneNotFound` if the pane doesn't exist
    /// - `LayoutError::LastPane` if this is the only pane
    pub fn close(&mut self, pane_id: PaneId) -> LayoutResult<ClosedPane> {
        let leaf_parent = self
            .leaves
            .get(&pane_id)
            .ok_or(LayoutError::PaneNotFound(pane_id))?
            .parent;
        let Some(parent_id) = leaf_parent else {
            return Err(LayoutError::LastPane);
        };
        let split = self
            .splits
            .get(&parent_id)
            .cloned()
            .ok_or_else(|| {
                LayoutError::InvalidStructure(vec![InvariantViolation::DanglingChild {
                    parent: parent_id,
                    child: NodeRef::Leaf(pane_id),
                }])
            })?;
        let index = split
            .child_index(NodeRef::Leaf(pane_id))
            .ok_or_else(|| {
                LayoutError::InvalidStructure(vec![InvariantViolation::ParentMismatch {
                    node: NodeRef::Leaf(pane_id),
                    recorded: Some(parent_id),
                    actual: None,
                }])
            })?;
        let sibling = split.children[1 - index];

        self.splits.remove(&parent_id);
        self.replace_child(split.parent, NodeRef::Split(parent_id), sibling);
        self.set_parent(sibling, split.parent);
        let leaf = self
            .leaves
            .remove(&pane_id)
            .ok_or(LayoutError::PaneNotFound(pane_id))?;

        let previous_focus = self.focus;
        if self.focus == FocusState::Focused(pane_id) {
            self.focus = self
                .first_leaf_of(sibling)
                .map_or(FocusState::NoFocus, FocusState::Focused);
        }

        tracing::debug!(pane_id = %pane_id, sibling = %sibling, "Closed pane");
        Ok(ClosedPane {
            leaf,
            split,
            previous_focus,
        })
    }

    /// Reverses a [`close`](Self::close) exactly: the removed split comes
    /// back with its original id, orientation, ratios and child order.
    ///
    /// Focus is left as is; the caller restores it.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidStructure` if the tree changed in a way
    /// that makes the reinsertion ambiguous.
    pub fn reopen(&mut self, closed: ClosedPane) -> LayoutResult<()> {
        let sibling = closed.sibling();
        let node_id = closed.split.node_id;
        let pane_id = closed.leaf.pane_id;

        let mut violations = Vec::new();
        if self.leaves.contains_key(&pane_id) {
            violations.push(InvariantViolation::DuplicatePane(pane_id));
        }
        if self.splits.contains_key(&node_id) {
            violations.push(InvariantViolation::DuplicateSplit(node_id));
        }
        let sibling_parent = self.parent_of(sibling);
        let sibling_present = match sibling {
            NodeRef::Leaf(id) => self.leaves.contains_key(&id),
            NodeRef::Split(id) => self.splits.contains_key(&id),
        };
        if !sibling_present || sibling_parent != closed.split.parent {
            violations.push(InvariantViolation::ParentMismatch {
                node: sibling,
                recorded: sibling_parent,
                actual: closed.split.parent,
            });
        }
        if !violations.is_empty() {
            return Err(LayoutError::InvalidStructure(violations));
        }

        self.replace_child(closed.split.parent, sibling, NodeRef::Split(node_id));
        self.set_parent(sibling, Some(node_id));
        self.splits.insert(node_id, closed.split);
        self.leaves.insert(pane_id, closed.leaf);
        Ok(())
    }

    /// Sets `ratios[child_index]` of a split to `new_ratio`; the other child
    /// gets `1 - new_ratio`.
    ///
    /// # Returns
    ///
    /// Returns the ratios before the change.
    ///
    /// # Errors
    ///
    /// - `LayoutError::NodeNotFound` if the split doesn't exist
    /// - `LayoutError::InvalidChildIndex` if `child_index > 1`
    /// - `LayoutError::InvalidRatio` if `new_ratio` is not in (0.05, 0.95)
    pub fn resize(
        &mut self,
        node_id: NodeId,
        child_index: usize,
        new_ratio: f64,
    ) -> LayoutResult<[f64; 2]> {
        check_resize_ratio(new_ratio)?;
        if child_index > 1 {
            return Err(LayoutError::InvalidChildIndex(child_index));
        }
        let split = self
            .splits
            .get_mut(&node_id)
            .ok_or(LayoutError::NodeNotFound(node_id))?;
        let previous = split.ratios;
        split.set_ratio(child_index, new_ratio);
        tracing::trace!(node_id = %node_id, child_index, new_ratio, "Resized split");
        Ok(previous)
    }

    /// Restores a split's ratios verbatim (used by undo).
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::NodeNotFound` if the split doesn't exist.
    pub fn set_ratios(&mut self, node_id: NodeId, ratios: [f64; 2]) -> LayoutResult<()> {
        let split = self
            .splits
            .get_mut(&node_id)
            .ok_or(LayoutError::NodeNotFound(node_id))?;
        split.ratios = ratios;
        Ok(())
    }

    /// Sets or clears a pane's explicit focus-order hint.
    ///
    /// # Returns
    ///
    /// Returns the previous hint.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::PaneNotFound` if the pane doesn't exist.
    pub fn set_focus_hint(
        &mut self,
        pane_id: PaneId,
        hint: Option<i32>,
    ) -> LayoutResult<Option<i32>> {
        let leaf = self
            .leaves
            .get_mut(&pane_id)
            .ok_or(LayoutError::PaneNotFound(pane_id))?;
        Ok(std::mem::replace(&mut leaf.metadata.focus_order, hint))
    }

    /// Sets or clears a pane's display title.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::PaneNotFound` if the pane doesn't exist.
    pub fn set_title(&mut self, pane_id: PaneId, title: Option<String>) -> LayoutResult<()> {
        let leaf = self
            .leaves
            .get_mut(&pane_id)
            .ok_or(LayoutError::PaneNotFound(pane_id))?;
        leaf.metadata.title = title;
        Ok(())
    }

    // ========================================================================
    // Validation & serialization
    // ========================================================================

    /// Lists every broken invariant; empty when the tree is valid.
    #[must_use]
    pub fn violations(&self) -> Vec<InvariantViolation> {
        validate::check(self)
    }

    /// Checks all structural invariants.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidStructure` listing every violation.
    pub fn validate(&self) -> LayoutResult<()> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(LayoutError::InvalidStructure(violations))
        }
    }

    /// Converts the tree into its nested serializable form.
    ///
    /// Returns `Ok(None)` for an empty layout.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidStructure` if the tree is invalid; an
    /// invalid tree is never serialized.
    pub fn serialize(&self) -> LayoutResult<Option<SnapshotNode>> {
        self.validate()?;
        self.root.map(|root| self.snapshot_node(root)).transpose()
    }

    fn snapshot_node(&self, node: NodeRef) -> LayoutResult<SnapshotNode> {
        match node {
            NodeRef::Leaf(id) => {
                let leaf = self.leaves.get(&id).ok_or(LayoutError::PaneNotFound(id))?;
                Ok(SnapshotNode::Leaf {
                    pane_id: leaf.pane_id,
                    surface_id: leaf.surface_id.clone(),
                    size_constraints: leaf.size_constraints,
                    metadata: leaf.metadata.clone(),
                })
            }
            NodeRef::Split(id) => {
                let split = self.splits.get(&id).ok_or(LayoutError::NodeNotFound(id))?;
                let first = self.snapshot_node(split.children[0])?;
                let second = self.snapshot_node(split.children[1])?;
                Ok(SnapshotNode::Split {
                    node_id: split.node_id,
                    orientation: split.orientation,
                    ratios: split.ratios,
                    children: Box::new([first, second]),
                })
            }
        }
    }

    /// Rebuilds a tree from its nested form and validates it.
    ///
    /// # Errors
    ///
    /// - `LayoutError::InvalidStructure` if the rebuilt tree breaks an
    ///   invariant (duplicate ids, bad ratios, focus outside the tree)
    pub fn deserialize(root: Option<SnapshotNode>, focused: Option<PaneId>) -> LayoutResult<Self> {
        let mut tree = Self::new();
        let mut duplicates = Vec::new();
        if let Some(node) = root {
            let root_ref = tree.insert_snapshot(node, None, &mut duplicates);
            tree.root = Some(root_ref);
        }
        if !duplicates.is_empty() {
            return Err(LayoutError::InvalidStructure(duplicates));
        }
        tree.focus = focused.map_or(FocusState::NoFocus, FocusState::Focused);
        tree.validate()?;
        Ok(tree)
    }

    fn insert_snapshot(
        &mut self,
        node: SnapshotNode,
        parent: Option<NodeId>,
        duplicates: &mut Vec<InvariantViolation>,
    ) -> NodeRef {
        match node {
            SnapshotNode::Leaf {
                pane_id,
                surface_id,
                size_constraints,
                metadata,
            } => {
                let leaf = LeafNode {
                    pane_id,
                    surface_id,
                    size_constraints,
                    metadata,
                    parent,
                };
                if self.leaves.insert(pane_id, leaf).is_some() {
                    duplicates.push(InvariantViolation::DuplicatePane(pane_id));
                }
                NodeRef::Leaf(pane_id)
            }
            SnapshotNode::Split {
                node_id,
                orientation,
                ratios,
                children,
            } => {
                let [first, second] = *children;
                let first = self.insert_snapshot(first, Some(node_id), duplicates);
                let second = self.insert_snapshot(second, Some(node_id), duplicates);
                let split = SplitNode {
                    node_id,
                    orientation,
                    children: [first, second],
                    ratios,
                    parent,
                };
                if self.splits.insert(node_id, split).is_some() {
                    duplicates.push(InvariantViolation::DuplicateSplit(node_id));
                }
                NodeRef::Split(node_id)
            }
        }
    }

    // ========================================================================
    // Private Helper Methods
    // ========================================================================

    /// Points `parent`'s reference to `old` at `new`; `None` means the root.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeRef, new: NodeRef) {
        match parent {
            None => self.root = Some(new),
            Some(id) => {
                if let Some(split) = self.splits.get_mut(&id) {
                    if let Some(index) = split.child_index(old) {
                        split.children[index] = new;
                    }
                }
            }
        }
    }

    fn set_parent(&mut self, node: NodeRef, parent: Option<NodeId>) {
        match node {
            NodeRef::Leaf(id) => {
                if let Some(leaf) = self.leaves.get_mut(&id) {
                    leaf.parent = parent;
                }
            }
            NodeRef::Split(id) => {
                if let Some(split) = self.splits.get_mut(&id) {
                    split.parent = parent;
                }
            }
        }
    }
}

/// Checks a ratio passed to `split`.
///
/// # Errors
///
/// Returns `LayoutError::InvalidRatio` if `ratio` is not in (0.1, 0.9).
pub fn check_split_ratio(ratio: f64) -> LayoutResult<()> {
    if ratio > MIN_SPLIT_RATIO && ratio < MAX_SPLIT_RATIO {
        Ok(())
    } else {
        Err(LayoutError::invalid_ratio(
            ratio,
            MIN_SPLIT_RATIO,
            MAX_SPLIT_RATIO,
        ))
    }
}

/// Checks a ratio passed to `resize`.
///
/// # Errors
///
/// Returns `LayoutError::InvalidRatio` if `ratio` is not in (0.05, 0.95).
pub fn check_resize_ratio(ratio: f64) -> LayoutResult<()> {
    if ratio > MIN_RESIZE_RATIO && ratio < MAX_RESIZE_RATIO {
        Ok(())
    } else {
        Err(LayoutError::invalid_ratio(
            ratio,
            MIN_RESIZE_RATIO,
            MAX_RESIZE_RATIO,
        ))
    }
}
