//! CLI error types and exit codes.

use panetree_core::LayoutError;

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, IO, or bad arguments
    pub const GENERAL_ERROR: i32 = 1;
    /// The snapshot could not be turned into a valid layout
    pub const INVALID_LAYOUT: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pane not found in the snapshot
    #[error("Pane not found: {0}")]
    PaneNotFound(String),

    /// Snapshot could not be read or is invalid
    #[error("Invalid layout: {0}")]
    Layout(#[from] LayoutError),

    /// Output serialization error
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, IO, arguments)
    /// - 2: Invalid layout (unreadable, unsupported or invalid snapshot)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Layout(LayoutError::Config(_)) => exit_codes::GENERAL_ERROR,
            Self::Layout(_) => exit_codes::INVALID_LAYOUT,
            Self::Config(_) | Self::PaneNotFound(_) | Self::Output(_) | Self::Io(_) => {
                exit_codes::GENERAL_ERROR
            }
        }
    }
}
