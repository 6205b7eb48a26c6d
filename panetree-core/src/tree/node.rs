//! Node records stored in the layout arena
//!
//! The layout tree is a binary tree whose nodes live in flat maps keyed by
//! their identifiers. Each node is either a leaf (one content surface) or a
//! split (exactly two children sharing the space along one axis).
//!
//! ```text
//! Split(Horizontal, [0.3, 0.7])
//! ├── Leaf(A, "editor")
//! └── Split(Vertical, [0.5, 0.5])
//!     ├── Leaf(B, "terminal")
//!     └── Leaf(C, "browser")
//! ```
//!
//! Edges are stored as ids: a split names its children through [`NodeRef`]
//! and every node records the id of the split that owns it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{NodeId, Orientation, PaneId, SurfaceId};

/// Default split ratio (50% of available space).
pub const DEFAULT_SPLIT_RATIO: f64 = 0.5;

/// Lower bound (exclusive) of the ratio accepted by `split`.
pub const MIN_SPLIT_RATIO: f64 = 0.1;

/// Upper bound (exclusive) of the ratio accepted by `split`.
pub const MAX_SPLIT_RATIO: f64 = 0.9;

/// Lower bound (exclusive) of the ratio accepted by `resize`.
pub const MIN_RESIZE_RATIO: f64 = 0.05;

/// Upper bound (exclusive) of the ratio accepted by `resize`.
pub const MAX_RESIZE_RATIO: f64 = 0.95;

/// Tolerance used when checking that a split's ratios sum to one.
pub const RATIO_TOLERANCE: f64 = 1e-6;

/// Reference to a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeRef {
    /// A leaf, addressed by its pane id.
    Leaf(PaneId),
    /// A split, addressed by its node id.
    Split(NodeId),
}

impl NodeRef {
    /// Returns the pane id if this refers to a leaf.
    #[must_use]
    pub const fn as_pane(self) -> Option<PaneId> {
        match self {
            Self::Leaf(id) => Some(id),
            Self::Split(_) => None,
        }
    }

    /// Returns the node id if this refers to a split.
    #[must_use]
    pub const fn as_split(self) -> Option<NodeId> {
        match self {
            Self::Leaf(_) => None,
            Self::Split(id) => Some(id),
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(id) => id.fmt(f),
            Self::Split(id) => id.fmt(f),
        }
    }
}

/// Minimum pixel size a pane's content can usefully be drawn at.
///
/// The geometry engine does not enforce these; it reports panes that end up
/// smaller so the host can react.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeConstraints {
    /// Minimum width in pixels.
    #[serde(default)]
    pub min_width: u32,
    /// Minimum height in pixels.
    #[serde(default)]
    pub min_height: u32,
}

impl SizeConstraints {
    /// Creates constraints with the given minimum size.
    #[must_use]
    pub const fn new(min_width: u32, min_height: u32) -> Self {
        Self {
            min_width,
            min_height,
        }
    }

    /// Returns true if a `width` x `height` area satisfies the constraints.
    #[must_use]
    pub const fn is_satisfied_by(&self, width: i32, height: i32) -> bool {
        width >= 0
            && height >= 0
            && width as u32 >= self.min_width
            && height as u32 >= self.min_height
    }
}

/// Per-pane metadata persisted with the layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafMetadata {
    /// Optional display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Explicit position in the sequential focus chain.
    ///
    /// When set it replaces the pane's tree-order position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_order: Option<i32>,
    /// Free-form host data.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// A leaf in the tree: exactly one content surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    /// Stable pane identifier.
    pub pane_id: PaneId,
    /// Key of the content surface displayed here.
    pub surface_id: SurfaceId,
    /// Minimum usable size.
    pub size_constraints: SizeConstraints,
    /// Persisted metadata.
    pub metadata: LeafMetadata,
    /// Split that owns this leaf (`None` for the root leaf).
    pub parent: Option<NodeId>,
}

impl LeafNode {
    /// Creates a detached leaf with a fresh pane id.
    #[must_use]
    pub fn new(surface_id: SurfaceId) -> Self {
        Self::with_id(PaneId::new(), surface_id)
    }

    /// Creates a detached leaf with the given pane id.
    #[must_use]
    pub fn with_id(pane_id: PaneId, surface_id: SurfaceId) -> Self {
        Self {
            pane_id,
            surface_id,
            size_constraints: SizeConstraints::default(),
            metadata: LeafMetadata::default(),
            parent: None,
        }
    }

    /// Sets the size constraints.
    #[must_use]
    pub const fn with_constraints(mut self, constraints: SizeConstraints) -> Self {
        self.size_constraints = constraints;
        self
    }
}

/// A split node dividing space between exactly two children.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitNode {
    /// Stable node identifier.
    pub node_id: NodeId,
    /// Axis of the division.
    pub orientation: Orientation,
    /// First (left/top) and second (right/bottom) child.
    pub children: [NodeRef; 2],
    /// Share of the space given to each child; sums to 1.0.
    pub ratios: [f64; 2],
    /// Split that owns this node (`None` for the root).
    pub parent: Option<NodeId>,
}

impl SplitNode {
    /// Creates a split with normalized ratios.
    #[must_use]
    pub fn new(
        node_id: NodeId,
        orientation: Orientation,
        children: [NodeRef; 2],
        ratios: [f64; 2],
    ) -> Self {
        Self {
            node_id,
            orientation,
            children,
            ratios: normalize_ratios(ratios),
            parent: None,
        }
    }

    /// Returns the index (0 or 1) of `child`, if it is a direct child.
    #[must_use]
    pub fn child_index(&self, child: NodeRef) -> Option<usize> {
        self.children.iter().position(|c| *c == child)
    }

    /// Sets `ratios[index]` to `ratio` and the other to `1 - ratio`.
    pub fn set_ratio(&mut self, index: usize, ratio: f64) {
        let mut ratios = [1.0 - ratio, 1.0 - ratio];
        ratios[index] = ratio;
        self.ratios = normalize_ratios(ratios);
    }
}

/// Scales a ratio pair so it sums to exactly one.
///
/// Degenerate input (non-finite or non-positive sum) falls back to an even
/// split.
#[must_use]
pub fn normalize_ratios(ratios: [f64; 2]) -> [f64; 2] {
    let sum = ratios[0] + ratios[1];
    if !sum.is_finite() || sum <= 0.0 || ratios[0] < 0.0 || ratios[1] < 0.0 {
        return [DEFAULT_SPLIT_RATIO, DEFAULT_SPLIT_RATIO];
    }
    let first = ratios[0] / sum;
    [first, 1.0 - first]
}
