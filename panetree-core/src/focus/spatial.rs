//! Directional neighbour lookup
//!
//! For a source pane and a direction D, a candidate qualifies when it lies
//! entirely on the D side of the source and overlaps it on the
//! perpendicular axis by at least `min_overlap` of the source's extent.
//! Qualifying candidates are scored
//!
//! ```text
//! overlap_weight * overlap_ratio - distance_weight * normalized_distance
//! ```
//!
//! where `normalized_distance` is the edge-to-edge gap divided by the
//! extent of the whole layout along D. The highest score wins; equal
//! scores go to the closer candidate, then to the earlier pane in tree
//! order.

use std::collections::BTreeMap;

use crate::config::NavigationConfig;
use crate::geometry::Rect;
use crate::types::{Direction, PaneId};

/// Precomputed neighbour of every pane in every direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeighborIndex {
    neighbors: BTreeMap<(PaneId, Direction), PaneId>,
}

/// A scored candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Candidate pane.
    pub pane_id: PaneId,
    /// Combined score.
    pub score: f64,
    /// Edge-to-edge gap in pixels.
    pub distance: i32,
    /// Perpendicular overlap as a share of the source extent.
    pub overlap_ratio: f64,
}

impl NeighborIndex {
    /// Builds the index from pane rectangles listed in tree order.
    #[must_use]
    pub fn build(rects: &[(PaneId, Rect)], config: &NavigationConfig) -> Self {
        let mut neighbors = BTreeMap::new();
        for (pane_id, _) in rects {
            for direction in Direction::ALL {
                if let Some(best) = best_candidate(rects, *pane_id, direction, config) {
                    neighbors.insert((*pane_id, direction), best.pane_id);
                }
            }
        }
        Self { neighbors }
    }

    /// Neighbour of `pane_id` in `direction`.
    #[must_use]
    pub fn neighbor(&self, pane_id: PaneId, direction: Direction) -> Option<PaneId> {
        self.neighbors.get(&(pane_id, direction)).copied()
    }

    /// Number of (pane, direction) pairs that have a neighbour.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns true if no pane has any neighbour.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

/// Scores every candidate for `source` in `direction`, best first.
#[must_use]
pub fn rank_candidates(
    rects: &[(PaneId, Rect)],
    source: PaneId,
    direction: Direction,
    config: &NavigationConfig,
) -> Vec<Candidate> {
    let Some(from) = rects.iter().find(|(id, _)| *id == source).map(|(_, r)| *r) else {
        return Vec::new();
    };
    let Some(bounds) = rects.iter().map(|(_, r)| *r).reduce(|a, b| a.union(&b)) else {
        return Vec::new();
    };
    let span = if direction.is_horizontal() {
        bounds.width
    } else {
        bounds.height
    };
    let source_extent = if direction.is_horizontal() {
        from.height
    } else {
        from.width
    };
    if source_extent <= 0 || span <= 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(usize, Candidate)> = rects
        .iter()
        .enumerate()
        .filter(|(_, (id, _))| *id != source)
        .filter_map(|(order, (id, rect))| {
            let distance = edge_gap(&from, rect, direction)?;
            let overlap = if direction.is_horizontal() {
                from.overlap_y(rect)
            } else {
                from.overlap_x(rect)
            };
            let overlap_ratio = f64::from(overlap) / f64::from(source_extent);
            if overlap <= 0 || overlap_ratio < config.min_overlap {
                return None;
            }
            let normalized = f64::from(distance) / f64::from(span);
            let score =
                config.overlap_weight * overlap_ratio - config.distance_weight * normalized;
            Some((
                order,
                Candidate {
                    pane_id: *id,
                    score,
                    distance,
                    overlap_ratio,
                },
            ))
        })
        .collect();

    ranked.sort_by(|(order_a, a), (order_b, b)| {
        b.score
            .total_cmp(&a.score)
            .then(a.distance.cmp(&b.distance))
            .then(order_a.cmp(order_b))
    });
    ranked.into_iter().map(|(_, c)| c).collect()
}

fn best_candidate(
    rects: &[(PaneId, Rect)],
    source: PaneId,
    direction: Direction,
    config: &NavigationConfig,
) -> Option<Candidate> {
    rank_candidates(rects, source, direction, config)
        .into_iter()
        .next()
}

/// Gap between `from`'s D edge and `to`'s facing edge, or `None` if `to`
/// is not strictly on the D side.
fn edge_gap(from: &Rect, to: &Rect, direction: Direction) -> Option<i32> {
    let gap = match direction {
        Direction::Right => to.x - from.right(),
        Direction::Left => from.x - to.right(),
        Direction::Down => to.y - from.bottom(),
        Direction::Up => from.y - to.bottom(),
    };
    (gap >= 0).then_some(gap)
}
