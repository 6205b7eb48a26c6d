//! Headless surfaces that record every call
//!
//! Useful for host-side tests and for running the engine without a
//! toolkit. Surfaces handed out by one [`RecordingProvider`] share a
//! [`Journal`], so calls stay observable after the pool drops a surface.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use super::{Surface, SurfaceProvider};
use crate::error::ProviderError;
use crate::geometry::Rect;
use crate::types::{PaneId, SurfaceId};

/// One call made on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    /// `attach(pane_id)`
    Attach(PaneId),
    /// `detach()`
    Detach,
    /// `set_geometry(rect)`
    SetGeometry(Rect),
    /// `set_visible(visible)`
    SetVisible(bool),
    /// `raise()`
    Raise,
    /// `focus_input()`
    FocusInput,
}

/// Shared, append-only log of surface calls.
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<(SurfaceId, Call)>>>);

impl Journal {
    fn record(&self, surface_id: &SurfaceId, call: Call) {
        self.0.borrow_mut().push((surface_id.clone(), call));
    }

    /// All recorded calls, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<(SurfaceId, Call)> {
        self.0.borrow().clone()
    }

    /// Calls made on one surface.
    #[must_use]
    pub fn calls_for(&self, surface_id: &SurfaceId) -> Vec<Call> {
        self.0
            .borrow()
            .iter()
            .filter(|(id, _)| id == surface_id)
            .map(|(_, call)| *call)
            .collect()
    }

    /// Number of `attach` calls on one surface.
    #[must_use]
    pub fn attach_count(&self, surface_id: &SurfaceId) -> usize {
        self.calls_for(surface_id)
            .iter()
            .filter(|c| matches!(c, Call::Attach(_)))
            .count()
    }

    /// Number of `detach` calls on one surface.
    #[must_use]
    pub fn detach_count(&self, surface_id: &SurfaceId) -> usize {
        self.calls_for(surface_id)
            .iter()
            .filter(|c| matches!(c, Call::Detach))
            .count()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Surface that remembers every call made on it.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    surface_id: SurfaceId,
    calls: Vec<Call>,
    journal: Option<Journal>,
}

impl RecordingSurface {
    /// Creates a surface that also writes to `journal`.
    #[must_use]
    pub fn with_journal(surface_id: SurfaceId, journal: Journal) -> Self {
        Self {
            surface_id,
            calls: Vec::new(),
            journal: Some(journal),
        }
    }

    /// Calls made on this surface, oldest first.
    #[must_use]
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Number of `attach` calls.
    #[must_use]
    pub fn attach_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Attach(_)))
            .count()
    }

    /// Number of `detach` calls.
    #[must_use]
    pub fn detach_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Detach)).count()
    }

    /// Last geometry set, if any.
    #[must_use]
    pub fn geometry(&self) -> Option<Rect> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::SetGeometry(rect) => Some(*rect),
            _ => None,
        })
    }

    /// Last visibility set, if any.
    #[must_use]
    pub fn visible(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::SetVisible(visible) => Some(*visible),
            _ => None,
        })
    }

    fn record(&mut self, call: Call) {
        self.calls.push(call);
        if let Some(journal) = &self.journal {
            journal.record(&self.surface_id, call);
        }
    }
}

impl Surface for RecordingSurface {
    fn attach(&mut self, pane_id: PaneId) {
        self.record(Call::Attach(pane_id));
    }

    fn detach(&mut self) {
        self.record(Call::Detach);
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.record(Call::SetGeometry(rect));
    }

    fn set_visible(&mut self, visible: bool) {
        self.record(Call::SetVisible(visible));
    }

    fn raise(&mut self) {
        self.record(Call::Raise);
    }

    fn focus_input(&mut self) {
        self.record(Call::FocusInput);
    }
}

/// Provider of [`RecordingSurface`]s with scriptable failures.
#[derive(Debug, Default)]
pub struct RecordingProvider {
    journal: Journal,
    failing: BTreeSet<SurfaceId>,
    fail_closing: bool,
    provided: Vec<(SurfaceId, PaneId)>,
    closed: Vec<(SurfaceId, PaneId)>,
}

impl RecordingProvider {
    /// Creates a provider that never fails.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Journal shared by every surface this provider creates.
    #[must_use]
    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    /// Makes `provide_surface` fail for `surface_id`.
    pub fn fail_on(&mut self, surface_id: impl Into<SurfaceId>) {
        self.failing.insert(surface_id.into());
    }

    /// Makes `surface_closing` report an error.
    pub fn fail_closing(&mut self, fail: bool) {
        self.fail_closing = fail;
    }

    /// Surfaces handed out so far.
    #[must_use]
    pub fn provided(&self) -> &[(SurfaceId, PaneId)] {
        &self.provided
    }

    /// `surface_closing` notifications received so far.
    #[must_use]
    pub fn closed(&self) -> &[(SurfaceId, PaneId)] {
        &self.closed
    }
}

impl SurfaceProvider for RecordingProvider {
    type Surface = RecordingSurface;

    fn provide_surface(
        &mut self,
        surface_id: &SurfaceId,
        pane_id: PaneId,
    ) -> Result<Self::Surface, ProviderError> {
        if self.failing.contains(surface_id) {
            return Err(ProviderError::new(
                surface_id.clone(),
                pane_id,
                "refused by test provider",
            ));
        }
        self.provided.push((surface_id.clone(), pane_id));
        Ok(RecordingSurface::with_journal(
            surface_id.clone(),
            self.journal.clone(),
        ))
    }

    fn surface_closing(
        &mut self,
        surface_id: &SurfaceId,
        pane_id: PaneId,
        _surface: &mut Self::Surface,
    ) -> Result<(), ProviderError> {
        self.closed.push((surface_id.clone(), pane_id));
        if self.fail_closing {
            return Err(ProviderError::new(
                surface_id.clone(),
                pane_id,
                "close hook failed",
            ));
        }
        Ok(())
    }
}
