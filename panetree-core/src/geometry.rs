//! Pixel geometry for the layout tree
//!
//! [`layout`] turns a [`TreeModel`] and a viewport into one rectangle per
//! pane. It is a pure function: the same tree and viewport always produce
//! the same rectangles, and nothing is cached or mutated.
//!
//! Each split partitions its rectangle along its orientation. Every section
//! but the last gets `round(size * ratio) - gap` pixels; the last one takes
//! whatever remains up to the far edge, so rounding never leaves a seam.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tree::{NodeRef, TreeModel};
use crate::types::{NodeId, Orientation, PaneId};

/// Integer pixel rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.x) + f64::from(self.width) / 2.0,
            f64::from(self.y) + f64::from(self.height) / 2.0,
        )
    }

    /// Returns true if the rectangle has no area.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Length of the overlap of the two x ranges (0 if disjoint).
    #[must_use]
    pub fn overlap_x(&self, other: &Self) -> i32 {
        self.right().min(other.right()).saturating_sub(self.x.max(other.x)).max(0)
    }

    /// Length of the overlap of the two y ranges (0 if disjoint).
    #[must_use]
    pub fn overlap_y(&self, other: &Self) -> i32 {
        self.bottom().min(other.bottom()).saturating_sub(self.y.max(other.y)).max(0)
    }

    /// Returns true if the interiors of the two rectangles overlap.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.overlap_x(other) > 0 && self.overlap_y(other) > 0
    }

    /// Returns true if the point lies inside the rectangle.
    #[must_use]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self::new(
            x,
            y,
            self.right().max(other.right()).saturating_sub(x),
            self.bottom().max(other.bottom()).saturating_sub(y),
        )
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Result of laying out a tree inside a viewport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Viewport the layout was computed for.
    pub viewport: Rect,
    /// Gap between siblings.
    pub gap: i32,
    /// Rectangle of every pane.
    pub panes: BTreeMap<PaneId, Rect>,
    /// Rectangle covered by every split node (both children plus the gap).
    pub split_rects: BTreeMap<NodeId, Rect>,
    handles: BTreeMap<NodeId, Rect>,
    undersized: Vec<PaneId>,
}

impl Layout {
    /// Rectangle of a pane.
    #[must_use]
    pub fn rect(&self, pane_id: PaneId) -> Option<Rect> {
        self.panes.get(&pane_id).copied()
    }

    /// Resize handle of a split: the gap strip between its two children.
    #[must_use]
    pub fn handle_rect(&self, node_id: NodeId) -> Option<Rect> {
        self.handles.get(&node_id).copied()
    }

    /// Split whose resize handle contains the point, if any.
    #[must_use]
    pub fn handle_at(&self, x: i32, y: i32) -> Option<NodeId> {
        self.handles
            .iter()
            .find(|(_, rect)| rect.contains_point(x, y))
            .map(|(id, _)| *id)
    }

    /// Pane containing the point, if any.
    #[must_use]
    pub fn pane_at(&self, x: i32, y: i32) -> Option<PaneId> {
        self.panes
            .iter()
            .find(|(_, rect)| rect.contains_point(x, y))
            .map(|(id, _)| *id)
    }

    /// Panes whose rectangle is smaller than their size constraints.
    #[must_use]
    pub fn undersized(&self) -> &[PaneId] {
        &self.undersized
    }
}

/// Computes the rectangle of every pane in `tree` inside `viewport`.
///
/// An empty tree yields an empty layout.
#[must_use]
pub fn layout(tree: &TreeModel, viewport: Rect, gap: i32) -> Layout {
    let gap = gap.max(0);
    let mut result = Layout {
        viewport,
        gap,
        ..Layout::default()
    };
    if let Some(root) = tree.root() {
        place(tree, root, viewport, gap, &mut result);
    }
    result
}

fn place(tree: &TreeModel, node: NodeRef, rect: Rect, gap: i32, out: &mut Layout) {
    match node {
        NodeRef::Leaf(pane_id) => {
            out.panes.insert(pane_id, rect);
            if let Some(leaf) = tree.leaf(pane_id) {
                if !leaf.size_constraints.is_satisfied_by(rect.width, rect.height) {
                    out.undersized.push(pane_id);
                }
            }
        }
        NodeRef::Split(node_id) => {
            let Some(split) = tree.split_node(node_id) else {
                return;
            };
            out.split_rects.insert(node_id, rect);
            let (origin, size) = match split.orientation {
                Orientation::Horizontal => (rect.x, rect.width),
                Orientation::Vertical => (rect.y, rect.height),
            };
            let sections = partition(origin, size, &split.ratios, gap);
            let [(first_start, first_len), (second_start, second_len)] = [sections[0], sections[1]];
            let (first, second, handle) = match split.orientation {
                Orientation::Horizontal => (
                    Rect::new(first_start, rect.y, first_len, rect.height),
                    Rect::new(second_start, rect.y, second_len, rect.height),
                    Rect::new(
                        first_start.saturating_add(first_len),
                        rect.y,
                        second_start.saturating_sub(first_start.saturating_add(first_len)),
                        rect.height,
                    ),
                ),
                Orientation::Vertical => (
                    Rect::new(rect.x, first_start, rect.width, first_len),
                    Rect::new(rect.x, second_start, rect.width, second_len),
                    Rect::new(
                        rect.x,
                        first_start.saturating_add(first_len),
                        rect.width,
                        second_start.saturating_sub(first_start.saturating_add(first_len)),
                    ),
                ),
            };
            out.handles.insert(node_id, handle);
            place(tree, split.children[0], first, gap, out);
            place(tree, split.children[1], second, gap, out);
        }
    }
}

/// Divides the span `[origin, origin + size)` into one section per ratio.
///
/// Returns `(start, extent)` pairs. Every section but the last has extent
/// `round(size * ratio) - gap` and is followed by a `gap`-wide strip; the
/// last section runs to `origin + size`, clamped to `i32::MAX`. Extents are
/// never negative.
#[must_use]
pub fn partition(origin: i32, size: i32, ratios: &[f64], gap: i32) -> Vec<(i32, i32)> {
    let size = size.max(0);
    let end = origin.saturating_add(size);
    let mut sections = Vec::with_capacity(ratios.len());
    let mut offset = origin;
    for (index, ratio) in ratios.iter().enumerate() {
        if index + 1 == ratios.len() {
            sections.push((offset.min(end), end.saturating_sub(offset).max(0)));
        } else {
            let span = (f64::from(size) * ratio).round() as i32;
            sections.push((offset.min(end), span.saturating_sub(gap).max(0)));
            offset = offset.saturating_add(span);
        }
    }
    sections
}
