//! Tracing setup for hosts and the CLI
//!
//! The engine itself only emits `tracing` events and spans; nothing is
//! printed unless the embedding program installs a subscriber. This module
//! offers a ready-made one built on `tracing-subscriber` with an
//! `EnvFilter`, plus the span and field names the engine uses so hosts can
//! filter on them.

use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

static TRACING_CONFIG: OnceLock<TracingConfig> = OnceLock::new();

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// The subscriber could not be installed
    #[error("Failed to initialize tracing: {0}")]
    InitializationFailed(String),

    /// The filter directive could not be parsed
    #[error("Invalid filter directive: {0}")]
    InvalidFilter(String),

    /// Tracing was already set up by this module
    #[error("Tracing has already been initialized")]
    AlreadyInitialized,

    /// The log file could not be created
    #[error("Failed to create log file: {0}")]
    FileCreationFailed(String),
}

/// Result type for tracing operations
pub type TracingResult<T> = Result<T, TracingError>;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TracingLevel {
    /// Errors only
    Error,
    /// Errors and warnings (default)
    #[default]
    Warn,
    /// Lifecycle messages (initialize, load, migrations)
    Info,
    /// Every command and surface attach/detach
    Debug,
    /// Merges, evictions, render passes
    Trace,
}

impl TracingLevel {
    /// Converts to the `tracing` crate's level
    #[must_use]
    pub const fn to_tracing_level(self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Maps a `-v` count to a level: none is warn, each `v` one step more.
    #[must_use]
    pub const fn from_verbosity(count: u8) -> Self {
        match count {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

impl std::str::FromStr for TracingLevel {
    type Err = TracingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(TracingError::InvalidFilter(format!("unknown level: {other}"))),
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TracingOutput {
    /// Standard output
    Stdout,
    /// Standard error (default)
    #[default]
    Stderr,
    /// A file, truncated on start
    File(PathBuf),
}

/// Configuration for [`init_tracing`]
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Level applied to the panetree crates
    pub level: TracingLevel,
    /// Output destination
    pub output: TracingOutput,
    /// Include span enter/exit timings
    pub include_timing: bool,
    /// Custom `EnvFilter` directive (overrides `level` and `RUST_LOG`)
    pub filter: Option<String>,
}

impl TracingConfig {
    /// Creates a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level
    #[must_use]
    pub const fn with_level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the output destination
    #[must_use]
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        self
    }

    /// Enables span timings
    #[must_use]
    pub const fn with_timing(mut self, include: bool) -> Self {
        self.include_timing = include;
        self
    }

    /// Sets a custom filter directive
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Builds the `EnvFilter` this configuration describes.
    ///
    /// Precedence: explicit `filter`, then `RUST_LOG`, then `level` for the
    /// panetree crates.
    ///
    /// # Errors
    ///
    /// Returns `TracingError::InvalidFilter` for an unparsable directive.
    pub fn env_filter(&self) -> TracingResult<EnvFilter> {
        if let Some(custom) = &self.filter {
            return EnvFilter::try_new(custom).map_err(|e| TracingError::InvalidFilter(e.to_string()));
        }
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(format!(
            "warn,panetree_core={level},panetree_cli={level}",
            level = self.level
        ))
        .map_err(|e| TracingError::InvalidFilter(e.to_string()))
    }
}

/// Installs a global `fmt` subscriber.
///
/// Call once at startup; later calls fail with `AlreadyInitialized`.
///
/// # Errors
///
/// Returns an error if:
/// - Tracing has already been initialized
/// - The filter directive is invalid
/// - File output is configured but the file cannot be created
/// - Another global subscriber is already installed
pub fn init_tracing(config: &TracingConfig) -> TracingResult<()> {
    if TRACING_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Err(TracingError::AlreadyInitialized);
    }
    let _ = TRACING_CONFIG.set(config.clone());

    let filter = config.env_filter()?;
    let span_events = if config.include_timing {
        tracing_subscriber::fmt::format::FmtSpan::CLOSE
    } else {
        tracing_subscriber::fmt::format::FmtSpan::NONE
    };

    match &config.output {
        TracingOutput::Stdout => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_span_events(span_events)
                    .with_writer(std::io::stdout),
            )
            .try_init(),
        TracingOutput::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_span_events(span_events)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        TracingOutput::File(path) => {
            let file = std::fs::File::create(path)
                .map_err(|e| TracingError::FileCreationFailed(e.to_string()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_span_events(span_events)
                        .with_ansi(false)
                        .with_writer(file),
                )
                .try_init()
        }
    }
    .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;

    tracing::info!(level = %config.level, "Tracing initialized");
    Ok(())
}

/// Checks if tracing has been initialized
#[must_use]
pub fn is_tracing_initialized() -> bool {
    TRACING_INITIALIZED.load(Ordering::SeqCst)
}

/// Gets the configuration passed to [`init_tracing`], if any
#[must_use]
pub fn get_tracing_config() -> Option<&'static TracingConfig> {
    TRACING_CONFIG.get()
}

/// Creates an info-level span for a layout operation.
///
/// # Examples
///
/// ```
/// use panetree_core::trace_operation;
/// use panetree_core::tracing::span_names;
///
/// let span = trace_operation!(span_names::LOAD, panes = 3);
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! trace_operation {
    ($name:expr) => {
        tracing::info_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

/// Debug-level variant of [`trace_operation!`] for routine commands.
#[macro_export]
macro_rules! trace_operation_debug {
    ($name:expr) => {
        tracing::debug_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::debug_span!($name, $($field)*)
    };
}

/// Span names used by the engine
pub mod span_names {
    /// First pane installed
    pub const INITIALIZE: &str = "layout.initialize";
    /// Pane split
    pub const SPLIT: &str = "layout.split";
    /// Pane closed
    pub const CLOSE: &str = "layout.close";
    /// Split ratio changed
    pub const RESIZE: &str = "layout.resize";
    /// Focus moved
    pub const FOCUS: &str = "layout.focus";
    /// Undo
    pub const UNDO: &str = "layout.undo";
    /// Redo
    pub const REDO: &str = "layout.redo";
    /// Snapshot captured
    pub const SAVE: &str = "layout.save";
    /// Snapshot restored
    pub const LOAD: &str = "layout.load";
    /// Surfaces reconciled with new geometry
    pub const RENDER: &str = "layout.render";
}
