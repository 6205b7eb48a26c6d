//! Focus coordination
//!
//! Focus is a two-state machine, [`FocusState::NoFocus`] or
//! [`FocusState::Focused`]. The focused pane itself is stored in the
//! [`TreeModel`] so that undo and snapshots carry it; the
//! [`FocusCoordinator`] owns everything derived from it: the sequential
//! focus chain, the cached neighbour index for directional movement and
//! the guard that keeps host focus callbacks from re-entering a transition
//! that is already running.

mod spatial;

pub use spatial::{Candidate, NeighborIndex, rank_candidates};

use crate::config::NavigationConfig;
use crate::geometry::{Layout, Rect};
use crate::tree::TreeModel;
use crate::types::{Direction, PaneId};

/// Which pane, if any, has keyboard focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FocusState {
    /// Nothing is focused (empty layout, or focus cleared by the host).
    #[default]
    NoFocus,
    /// The given pane is focused.
    Focused(PaneId),
}

impl FocusState {
    /// Focused pane, if any.
    #[must_use]
    pub const fn pane(self) -> Option<PaneId> {
        match self {
            Self::NoFocus => None,
            Self::Focused(id) => Some(id),
        }
    }
}

impl std::fmt::Display for FocusState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoFocus => write!(f, "no focus"),
            Self::Focused(id) => write!(f, "{id}"),
        }
    }
}

/// Derives focus movement from the tree and its geometry.
#[derive(Debug, Clone, Default)]
pub struct FocusCoordinator {
    config: NavigationConfig,
    index: Option<NeighborIndex>,
    transition_in_progress: bool,
}

impl FocusCoordinator {
    /// Creates a coordinator with the given scoring weights.
    #[must_use]
    pub const fn new(config: NavigationConfig) -> Self {
        Self {
            config,
            index: None,
            transition_in_progress: false,
        }
    }

    /// Scoring weights in use.
    #[must_use]
    pub const fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Panes in sequential focus order.
    ///
    /// A pane's key is its explicit order hint if it has one, otherwise its
    /// position in tree order. Equal keys keep tree order.
    #[must_use]
    pub fn focus_order(tree: &TreeModel) -> Vec<PaneId> {
        let mut keyed: Vec<(i64, usize, PaneId)> = tree
            .pane_ids()
            .into_iter()
            .enumerate()
            .map(|(position, id)| {
                let hint = tree.leaf(id).and_then(|leaf| leaf.metadata.focus_order);
                let key = hint.map_or_else(
                    || i64::try_from(position).unwrap_or(i64::MAX),
                    i64::from,
                );
                (key, position, id)
            })
            .collect();
        keyed.sort_by_key(|(key, position, _)| (*key, *position));
        keyed.into_iter().map(|(_, _, id)| id).collect()
    }

    /// Pane after (or before, when `forward` is false) the focused one,
    /// wrapping around. With nothing focused, the first (or last) pane.
    #[must_use]
    pub fn step(tree: &TreeModel, forward: bool) -> Option<PaneId> {
        let order = Self::focus_order(tree);
        if order.is_empty() {
            return None;
        }
        let len = order.len();
        let next = match tree
            .focused()
            .and_then(|current| order.iter().position(|id| *id == current))
        {
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        Some(order[next])
    }

    /// Spatial neighbour of `from` in `direction`.
    ///
    /// Builds the neighbour index on first use after an invalidation.
    pub fn neighbor(
        &mut self,
        tree: &TreeModel,
        layout: &Layout,
        from: PaneId,
        direction: Direction,
    ) -> Option<PaneId> {
        if self.index.is_none() {
            let rects: Vec<(PaneId, Rect)> = tree
                .pane_ids()
                .into_iter()
                .filter_map(|id| layout.rect(id).map(|rect| (id, rect)))
                .collect();
            tracing::trace!(panes = rects.len(), "Rebuilding neighbour index");
            self.index = Some(NeighborIndex::build(&rects, &self.config));
        }
        self.index
            .as_ref()
            .and_then(|index| index.neighbor(from, direction))
    }

    /// Drops the cached neighbour index. Call after any structural or
    /// geometry change.
    pub fn invalidate(&mut self) {
        self.index = None;
    }

    /// Returns true if a neighbour index is cached.
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        self.index.is_some()
    }

    /// Marks the start of a focus transition.
    ///
    /// Returns false if one is already running; the caller must then not
    /// start another.
    pub fn begin_transition(&mut self) -> bool {
        if self.transition_in_progress {
            return false;
        }
        self.transition_in_progress = true;
        true
    }

    /// Marks the end of a focus transition.
    pub fn end_transition(&mut self) {
        self.transition_in_progress = false;
    }

    /// Returns true while a focus transition is running.
    #[must_use]
    pub const fn transition_in_progress(&self) -> bool {
        self.transition_in_progress
    }

    /// Decides whether a focus notification from the host should become a
    /// focus change.
    ///
    /// Notifications that arrive mid-transition, name the pane that is
    /// already focused, or name an unknown pane are dropped.
    #[must_use]
    pub fn accepts_native_focus(&self, tree: &TreeModel, pane_id: PaneId) -> bool {
        !self.transition_in_progress
            && tree.focused() != Some(pane_id)
            && tree.contains(pane_id)
    }
}
