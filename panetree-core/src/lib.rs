//! `PaneTree` Core Library
//!
//! A recursive split-pane layout engine. Panes live at the leaves of a
//! binary tree of horizontal and vertical splits; the engine computes their
//! rectangles, moves focus between them, records every change for
//! undo/redo, and keeps host-provided surfaces attached to their panes
//! without ever reparenting them.
//!
//! # Crate Structure
//!
//! - [`tree`] - Layout tree model, structural operations and invariants
//! - [`command`] - Undoable commands, history, merging and transactions
//! - [`geometry`] - Rectangle partitioning and divider hit testing
//! - [`focus`] - Focus order, directional navigation, re-entrancy guard
//! - [`surface`] - Surface pool, provider seam and renderer
//! - [`snapshot`] - Versioned JSON snapshots and migration
//! - [`session`] - [`LayoutSession`], the facade hosts drive
//! - [`config`] - Engine configuration
//! - [`events`] - Change notifications
//! - [`tracing`] - Logging setup and span names

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod focus;
pub mod geometry;
pub mod session;
pub mod snapshot;
pub mod surface;
pub mod tracing;
pub mod tree;
pub mod types;

// =============================================================================
// Convenience re-exports
// =============================================================================

pub use command::{
    CloseCommand, Command, CommandEngine, FocusCommand, HistoryLimits, ResizeCommand,
    SetFocusHintCommand, SplitCommand,
};
pub use config::{EngineConfig, NavigationConfig};
pub use error::{LayoutError, LayoutResult, ProviderError};
pub use events::{LayoutEvent, Listener, SubscriptionId};
pub use focus::{FocusCoordinator, FocusState};
pub use geometry::{Layout, Rect};
pub use session::LayoutSession;
pub use snapshot::{CURRENT_SNAPSHOT_VERSION, SnapshotMetadata, SnapshotNode, WorkspaceSnapshot};
pub use surface::{RenderStats, Renderer, Surface, SurfacePool, SurfaceProvider};
pub use tree::{ClosedPane, InvariantViolation, LeafNode, NodeRef, SplitNode, TreeModel};
pub use types::{Direction, NodeId, Orientation, PaneId, Side, SurfaceId};
