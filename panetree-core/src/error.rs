//! Error types for layout operations
//!
//! This module defines the error taxonomy shared by the tree model, the
//! command engine, the surface pool and the session facade.

use crate::tree::InvariantViolation;
use crate::types::{NodeId, PaneId, SurfaceId};

/// Errors that can occur during layout operations.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The specified pane was not found in the tree.
    #[error("pane not found: {0}")]
    PaneNotFound(PaneId),

    /// The specified split node was not found in the tree.
    #[error("split node not found: {0}")]
    NodeNotFound(NodeId),

    /// A split only has children 0 and 1.
    #[error("invalid child index {0} (splits have exactly two children)")]
    InvalidChildIndex(usize),

    /// The tree violates a structural invariant.
    ///
    /// Valid commands never produce this; it always indicates a defect.
    #[error("invalid tree structure: {}", format_violations(.0))]
    InvalidStructure(Vec<InvariantViolation>),

    /// Ratio outside the accepted open interval.
    #[error("invalid ratio {ratio} (must be between {min} and {max}, exclusive)")]
    InvalidRatio {
        /// The rejected ratio.
        ratio: f64,
        /// Lower bound (exclusive).
        min: f64,
        /// Upper bound (exclusive).
        max: f64,
    },

    /// The last remaining pane can never be closed.
    #[error("cannot close the last pane")]
    LastPane,

    /// A surface is already registered for this pane.
    #[error("a surface is already registered for {0}")]
    DuplicateSurface(PaneId),

    /// The host failed to create a content surface.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Snapshot version is not supported by this build.
    #[error("unsupported snapshot version {found} (supported: 1..={supported})")]
    ConfigVersion {
        /// Version found in the snapshot.
        found: u32,
        /// Newest version this build understands.
        supported: u32,
    },

    /// No pane is currently focused.
    #[error("no pane is currently focused")]
    NoFocusedPane,

    /// The layout already has a root pane.
    #[error("layout is already initialized")]
    AlreadyInitialized,

    /// Undo stack is empty.
    #[error("nothing to undo")]
    NothingToUndo,

    /// Redo stack is empty.
    #[error("nothing to redo")]
    NothingToRedo,

    /// A transaction is already open.
    #[error("a transaction is already in progress")]
    TransactionAlreadyOpen,

    /// Commit or rollback without an open transaction.
    #[error("no transaction in progress")]
    NoTransaction,

    /// An operation inside the transaction failed, so it was discarded.
    #[error("transaction discarded after a failed operation: {0}")]
    TransactionFailed(String),

    /// Snapshot (de)serialization failed.
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Engine configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

impl LayoutError {
    /// Creates an `InvalidRatio` error for the given bounds.
    #[must_use]
    pub const fn invalid_ratio(ratio: f64, min: f64, max: f64) -> Self {
        Self::InvalidRatio { ratio, min, max }
    }

    /// Returns true for errors that indicate a programming defect rather
    /// than a rejected request.
    #[must_use]
    pub const fn is_defect(&self) -> bool {
        matches!(self, Self::InvalidStructure(_))
    }
}

/// Failure reported by a [`SurfaceProvider`](crate::surface::SurfaceProvider)
/// while creating a content surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("surface provider failed for {surface_id} ({pane_id}): {message}")]
pub struct ProviderError {
    /// Surface that could not be created.
    pub surface_id: SurfaceId,
    /// Pane the surface was meant for.
    pub pane_id: PaneId,
    /// Host-supplied reason.
    pub message: String,
}

impl ProviderError {
    /// Creates a provider error.
    #[must_use]
    pub fn new(surface_id: SurfaceId, pane_id: PaneId, message: impl Into<String>) -> Self {
        Self {
            surface_id,
            pane_id,
            message: message.into(),
        }
    }
}

fn format_violations(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
