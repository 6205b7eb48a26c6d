//! Ownership registry for content surfaces

use std::collections::BTreeMap;

use super::Surface;
use crate::error::{LayoutError, LayoutResult};
use crate::types::{PaneId, SurfaceId};

#[derive(Debug)]
struct Entry<S> {
    surface_id: SurfaceId,
    surface: S,
}

/// Holds the surface of every realized pane.
///
/// Adding attaches the surface and removing detaches it; there is no other
/// way in or out, so each surface sees exactly one of each.
#[derive(Debug)]
pub struct SurfacePool<S: Surface> {
    entries: BTreeMap<PaneId, Entry<S>>,
}

impl<S: Surface> Default for SurfacePool<S> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<S: Surface> SurfacePool<S> {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `surface` for `pane_id` and attaches it.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::DuplicateSurface` if the pane already has a
    /// surface; the new surface is dropped without being attached.
    pub fn add(&mut self, pane_id: PaneId, surface_id: SurfaceId, mut surface: S) -> LayoutResult<()> {
        if self.entries.contains_key(&pane_id) {
            return Err(LayoutError::DuplicateSurface(pane_id));
        }
        surface.attach(pane_id);
        tracing::debug!(pane_id = %pane_id, surface_id = %surface_id, "Surface attached");
        self.entries.insert(
            pane_id,
            Entry {
                surface_id,
                surface,
            },
        );
        Ok(())
    }

    /// Detaches and returns the surface of `pane_id`.
    pub fn remove(&mut self, pane_id: PaneId) -> Option<(SurfaceId, S)> {
        let mut entry = self.entries.remove(&pane_id)?;
        entry.surface.detach();
        tracing::debug!(pane_id = %pane_id, surface_id = %entry.surface_id, "Surface detached");
        Some((entry.surface_id, entry.surface))
    }

    /// Surface of `pane_id`.
    #[must_use]
    pub fn get(&self, pane_id: PaneId) -> Option<&S> {
        self.entries.get(&pane_id).map(|e| &e.surface)
    }

    /// Mutable surface of `pane_id`.
    pub fn get_mut(&mut self, pane_id: PaneId) -> Option<&mut S> {
        self.entries.get_mut(&pane_id).map(|e| &mut e.surface)
    }

    /// Surface key and mutable surface of `pane_id`.
    pub fn entry_mut(&mut self, pane_id: PaneId) -> Option<(&SurfaceId, &mut S)> {
        self.entries
            .get_mut(&pane_id)
            .map(|e| (&e.surface_id, &mut e.surface))
    }

    /// Key of the surface shown in `pane_id`.
    #[must_use]
    pub fn surface_id(&self, pane_id: PaneId) -> Option<&SurfaceId> {
        self.entries.get(&pane_id).map(|e| &e.surface_id)
    }

    /// Returns true if `pane_id` has a surface.
    #[must_use]
    pub fn contains(&self, pane_id: PaneId) -> bool {
        self.entries.contains_key(&pane_id)
    }

    /// Panes that have a surface.
    #[must_use]
    pub fn pane_ids(&self) -> Vec<PaneId> {
        self.entries.keys().copied().collect()
    }

    /// Number of pooled surfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
