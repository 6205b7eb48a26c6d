//! Applies computed geometry to pooled surfaces

use std::collections::BTreeMap;

use super::{Surface, SurfacePool};
use crate::geometry::Rect;
use crate::types::PaneId;

/// What one reconciliation pass touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Surfaces moved or resized.
    pub moved: usize,
    /// Surfaces made visible.
    pub shown: usize,
    /// Surfaces hidden.
    pub hidden: usize,
    /// Surfaces raised.
    pub raised: usize,
    /// Whether input focus was handed to a surface.
    pub focused: bool,
}

impl RenderStats {
    /// Returns true if no surface was touched.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.moved == 0 && self.shown == 0 && self.hidden == 0 && self.raised == 0 && !self.focused
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Placement {
    rect: Option<Rect>,
    visible: Option<bool>,
}

/// Reconciles the pool with a rectangle map.
///
/// The renderer remembers what it last applied to each surface and only
/// issues calls for differences, so rendering the same layout twice does
/// nothing the second time.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    placements: BTreeMap<PaneId, Placement>,
    /// Bottom to top.
    z_order: Vec<PaneId>,
    input_focus: Option<PaneId>,
}

impl Renderer {
    /// Creates a renderer that has applied nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places every pooled surface.
    ///
    /// Panes in `rects` are moved, shown and raised; pooled panes missing
    /// from `rects` are hidden. The focused pane is raised last and given
    /// input focus.
    pub fn render<S: Surface>(
        &mut self,
        pool: &mut SurfacePool<S>,
        rects: &BTreeMap<PaneId, Rect>,
        focused: Option<PaneId>,
    ) -> RenderStats {
        let mut stats = RenderStats::default();
        self.retain_pooled(pool);

        for pane_id in pool.pane_ids() {
            let Some(surface) = pool.get_mut(pane_id) else {
                continue;
            };
            let placement = self.placements.entry(pane_id).or_default();
            match rects.get(&pane_id) {
                Some(rect) => {
                    if placement.rect != Some(*rect) {
                        surface.set_geometry(*rect);
                        placement.rect = Some(*rect);
                        stats.moved += 1;
                    }
                    if placement.visible != Some(true) {
                        surface.set_visible(true);
                        placement.visible = Some(true);
                        stats.shown += 1;
                        surface.raise();
                        self.z_order.retain(|id| *id != pane_id);
                        self.z_order.push(pane_id);
                        stats.raised += 1;
                    }
                }
                None => {
                    if placement.visible != Some(false) {
                        surface.set_visible(false);
                        placement.visible = Some(false);
                        stats.hidden += 1;
                    }
                }
            }
        }

        let focused = focused.filter(|id| rects.contains_key(id) && pool.contains(*id));
        if focused.is_none() {
            self.input_focus = None;
        }
        if let Some(pane_id) = focused {
            if let Some(surface) = pool.get_mut(pane_id) {
                if self.z_order.last() != Some(&pane_id) {
                    surface.raise();
                    self.z_order.retain(|id| *id != pane_id);
                    self.z_order.push(pane_id);
                    stats.raised += 1;
                }
                if self.input_focus != Some(pane_id) {
                    surface.focus_input();
                    self.input_focus = Some(pane_id);
                    stats.focused = true;
                }
            }
        }

        if !stats.is_noop() {
            tracing::trace!(
                moved = stats.moved,
                shown = stats.shown,
                hidden = stats.hidden,
                raised = stats.raised,
                "Reconciled surfaces"
            );
        }
        stats
    }

    /// Forgets what was applied to `pane_id` (after its surface is gone).
    pub fn forget(&mut self, pane_id: PaneId) {
        self.placements.remove(&pane_id);
        self.z_order.retain(|id| *id != pane_id);
        if self.input_focus == Some(pane_id) {
            self.input_focus = None;
        }
    }

    /// Pane ids from bottom to top of the stacking order.
    #[must_use]
    pub fn z_order(&self) -> &[PaneId] {
        &self.z_order
    }

    /// Pane that last received input focus.
    #[must_use]
    pub const fn input_focus(&self) -> Option<PaneId> {
        self.input_focus
    }

    fn retain_pooled<S: Surface>(&mut self, pool: &SurfacePool<S>) {
        let stale: Vec<PaneId> = self
            .placements
            .keys()
            .copied()
            .filter(|id| !pool.contains(*id))
            .collect();
        for pane_id in stale {
            self.forget(pane_id);
        }
    }
}
