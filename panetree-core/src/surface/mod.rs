//! Content surfaces and their on-screen placement
//!
//! A surface is whatever the host draws a pane's content into: a terminal
//! widget, a web view, a native child window. The engine never creates or
//! inspects one; it asks a [`SurfaceProvider`] for it and then drives it
//! through the [`Surface`] trait.
//!
//! Two components touch surfaces and they use disjoint halves of the trait:
//!
//! - [`SurfacePool`] calls [`Surface::attach`] exactly once when a pane is
//!   first realized and [`Surface::detach`] exactly once when the pane is
//!   permanently removed.
//! - [`Renderer`] only moves, resizes, shows, hides, raises and focuses.
//!
//! Nothing ever reparents a surface, so native state such as a running
//! terminal or a scroll position survives any amount of splitting, closing,
//! undoing and redoing.

mod pool;
pub mod recording;
mod renderer;

pub use pool::SurfacePool;
pub use renderer::{RenderStats, Renderer};

use crate::error::ProviderError;
use crate::geometry::Rect;
use crate::types::{PaneId, SurfaceId};

/// A host-owned content surface.
pub trait Surface {
    /// Establishes ownership: the surface now belongs to `pane_id`'s slot
    /// in the host container. Called once.
    fn attach(&mut self, pane_id: PaneId);

    /// Tears ownership down before the surface is dropped. Called once.
    fn detach(&mut self);

    /// Moves and resizes the surface.
    fn set_geometry(&mut self, rect: Rect);

    /// Shows or hides the surface.
    fn set_visible(&mut self, visible: bool);

    /// Brings the surface to the top of the stacking order.
    fn raise(&mut self);

    /// Gives the surface keyboard input focus.
    fn focus_input(&mut self);
}

/// Host factory for content surfaces.
pub trait SurfaceProvider {
    /// Surface type produced.
    type Surface: Surface;

    /// Creates the surface for a newly realized pane.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` if the surface cannot be created; the
    /// operation that needed it is abandoned without changing the layout.
    fn provide_surface(
        &mut self,
        surface_id: &SurfaceId,
        pane_id: PaneId,
    ) -> Result<Self::Surface, ProviderError>;

    /// Called once just before a surface is permanently removed.
    ///
    /// # Errors
    ///
    /// Errors are logged and otherwise ignored; the surface is removed
    /// regardless.
    fn surface_closing(
        &mut self,
        _surface_id: &SurfaceId,
        _pane_id: PaneId,
        _surface: &mut Self::Surface,
    ) -> Result<(), ProviderError> {
        Ok(())
    }
}
