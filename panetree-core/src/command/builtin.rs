//! Built-in commands

use std::any::Any;

use super::Command;
use crate::error::{LayoutError, LayoutResult};
use crate::focus::FocusState;
use crate::tree::{ClosedPane, LeafNode, TreeModel, check_resize_ratio, check_split_ratio};
use crate::types::{NodeId, PaneId, Side, SurfaceId};

/// Splits a pane and focuses the new one.
///
/// The new pane and split ids are chosen up front so redo recreates the
/// same nodes.
#[derive(Debug, Clone)]
pub struct SplitCommand {
    target: PaneId,
    side: Side,
    leaf: LeafNode,
    node_id: NodeId,
    ratio: f64,
    previous_focus: FocusState,
}

impl SplitCommand {
    /// Creates a split of `target` with a fresh pane showing `surface_id`.
    #[must_use]
    pub fn new(target: PaneId, side: Side, surface_id: SurfaceId, ratio: f64) -> Self {
        Self::with_leaf(target, side, LeafNode::new(surface_id), ratio)
    }

    /// Creates a split inserting a prepared leaf.
    #[must_use]
    pub fn with_leaf(target: PaneId, side: Side, leaf: LeafNode, ratio: f64) -> Self {
        Self {
            target,
            side,
            leaf,
            node_id: NodeId::new(),
            ratio,
            previous_focus: FocusState::NoFocus,
        }
    }

    /// Id the new pane gets.
    #[must_use]
    pub const fn new_pane_id(&self) -> PaneId {
        self.leaf.pane_id
    }

    /// Surface shown in the new pane.
    #[must_use]
    pub const fn surface_id(&self) -> &SurfaceId {
        &self.leaf.surface_id
    }
}

impl Command for SplitCommand {
    fn name(&self) -> &'static str {
        "split"
    }

    fn validate(&self, tree: &TreeModel) -> LayoutResult<()> {
        if !tree.contains(self.target) {
            return Err(LayoutError::PaneNotFound(self.target));
        }
        check_split_ratio(self.ratio)
    }

    fn execute(&mut self, tree: &mut TreeModel) -> LayoutResult<()> {
        let previous_focus = tree.focus();
        let new_pane = tree.split_with_ids(
            self.target,
            self.side,
            self.leaf.clone(),
            self.node_id,
            self.ratio,
        )?;
        tree.set_focused(Some(new_pane))?;
        self.previous_focus = previous_focus;
        Ok(())
    }

    fn undo(&mut self, tree: &mut TreeModel) -> LayoutResult<()> {
        tree.close(self.leaf.pane_id)?;
        tree.restore_focus(self.previous_focus);
        Ok(())
    }

    fn referenced_panes(&self) -> Vec<PaneId> {
        vec![self.target, self.leaf.pane_id]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Closes a pane, splicing its sibling into the parent's place.
#[derive(Debug, Clone)]
pub struct CloseCommand {
    pane_id: PaneId,
    closed: Option<ClosedPane>,
}

impl CloseCommand {
    /// Creates a close of `pane_id`.
    #[must_use]
    pub const fn new(pane_id: PaneId) -> Self {
        Self {
            pane_id,
            closed: None,
        }
    }

    /// Pane being closed.
    #[must_use]
    pub const fn pane_id(&self) -> PaneId {
        self.pane_id
    }
}

impl Command for CloseCommand {
    fn name(&self) -> &'static str {
        "close"
    }

    fn validate(&self, tree: &TreeModel) -> LayoutResult<()> {
        if !tree.contains(self.pane_id) {
            return Err(LayoutError::PaneNotFound(self.pane_id));
        }
        if tree.pane_count() == 1 {
            return Err(LayoutError::LastPane);
        }
        Ok(())
    }

    fn execute(&mut self, tree: &mut TreeModel) -> LayoutResult<()> {
        self.closed = Some(tree.close(self.pane_id)?);
        Ok(())
    }

    fn undo(&mut self, tree: &mut TreeModel) -> LayoutResult<()> {
        let closed = self
            .closed
            .take()
            .ok_or(LayoutError::PaneNotFound(self.pane_id))?;
        let focus = closed.previous_focus;
        tree.reopen(closed)?;
        tree.restore_focus(focus);
        Ok(())
    }

    fn referenced_panes(&self) -> Vec<PaneId> {
        vec![self.pane_id]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Changes the ratio of one child of a split.
///
/// Consecutive resizes of the same split child merge, so a drag undoes in
/// one step.
#[derive(Debug, Clone)]
pub struct ResizeCommand {
    node_id: NodeId,
    child_index: usize,
    ratio: f64,
    previous: Option<[f64; 2]>,
}

impl ResizeCommand {
    /// Creates a resize setting `ratios[child_index]` to `ratio`.
    #[must_use]
    pub const fn new(node_id: NodeId, child_index: usize, ratio: f64) -> Self {
        Self {
            node_id,
            child_index,
            ratio,
            previous: None,
        }
    }

    /// Ratio this command applies.
    #[must_use]
    pub const fn ratio(&self) -> f64 {
        self.ratio
    }
}

impl Command for ResizeCommand {
    fn name(&self) -> &'static str {
        "resize"
    }

    fn validate(&self, tree: &TreeModel) -> LayoutResult<()> {
        check_resize_ratio(self.ratio)?;
        if self.child_index > 1 {
            return Err(LayoutError::InvalidChildIndex(self.child_index));
        }
        if tree.split_node(self.node_id).is_none() {
            return Err(LayoutError::NodeNotFound(self.node_id));
        }
        Ok(())
    }

    fn execute(&mut self, tree: &mut TreeModel) -> LayoutResult<()> {
        self.previous = Some(tree.resize(self.node_id, self.child_index, self.ratio)?);
        Ok(())
    }

    fn undo(&mut self, tree: &mut TreeModel) -> LayoutResult<()> {
        let previous = self.previous.ok_or(LayoutError::NodeNotFound(self.node_id))?;
        tree.set_ratios(self.node_id, previous)
    }

    fn mergeable_with(&self, next: &dyn Command) -> bool {
        next.as_any()
            .downcast_ref::<Self>()
            .is_some_and(|n| n.node_id == self.node_id && n.child_index == self.child_index)
    }

    fn merge(&mut self, next: &dyn Command) {
        if let Some(next) = next.as_any().downcast_ref::<Self>() {
            self.ratio = next.ratio;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Moves focus. Consecutive focus moves merge.
#[derive(Debug, Clone)]
pub struct FocusCommand {
    target: Option<PaneId>,
    previous: FocusState,
}

impl FocusCommand {
    /// Creates a focus move to `target` (`None` clears focus).
    #[must_use]
    pub const fn new(target: Option<PaneId>) -> Self {
        Self {
            target,
            previous: FocusState::NoFocus,
        }
    }

    /// Pane receiving focus.
    #[must_use]
    pub const fn target(&self) -> Option<PaneId> {
        self.target
    }
}

impl Command for FocusCommand {
    fn name(&self) -> &'static str {
        "focus"
    }

    fn validate(&self, tree: &TreeModel) -> LayoutResult<()> {
        match self.target {
            Some(id) if !tree.contains(id) => Err(LayoutError::PaneNotFound(id)),
            _ => Ok(()),
        }
    }

    fn execute(&mut self, tree: &mut TreeModel) -> LayoutResult<()> {
        self.previous = tree.set_focused(self.target)?;
        Ok(())
    }

    fn undo(&mut self, tree: &mut TreeModel) -> LayoutResult<()> {
        if let Some(id) = self.previous.pane() {
            if !tree.contains(id) {
                return Err(LayoutError::PaneNotFound(id));
            }
        }
        tree.restore_focus(self.previous);
        Ok(())
    }

    fn mergeable_with(&self, next: &dyn Command) -> bool {
        next.as_any().is::<Self>()
    }

    fn merge(&mut self, next: &dyn Command) {
        if let Some(next) = next.as_any().downcast_ref::<Self>() {
            self.target = next.target;
        }
    }

    fn referenced_panes(&self) -> Vec<PaneId> {
        self.target.into_iter().chain(self.previous.pane()).collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Sets or clears a pane's explicit focus-order hint.
#[derive(Debug, Clone)]
pub struct SetFocusHintCommand {
    pane_id: PaneId,
    hint: Option<i32>,
    previous: Option<i32>,
}

impl SetFocusHintCommand {
    /// Creates a hint change for `pane_id`.
    #[must_use]
    pub const fn new(pane_id: PaneId, hint: Option<i32>) -> Self {
        Self {
            pane_id,
            hint,
            previous: None,
        }
    }
}

impl Command for SetFocusHintCommand {
    fn name(&self) -> &'static str {
        "set_focus_hint"
    }

    fn validate(&self, tree: &TreeModel) -> LayoutResult<()> {
        if tree.contains(self.pane_id) {
            Ok(())
        } else {
            Err(LayoutError::PaneNotFound(self.pane_id))
        }
    }

    fn execute(&mut self, tree: &mut TreeModel) -> LayoutResult<()> {
        self.previous = tree.set_focus_hint(self.pane_id, self.hint)?;
        Ok(())
    }

    fn undo(&mut self, tree: &mut TreeModel) -> LayoutResult<()> {
        tree.set_focus_hint(self.pane_id, self.previous)?;
        Ok(())
    }

    fn referenced_panes(&self) -> Vec<PaneId> {
        vec![self.pane_id]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
