//! Engine configuration
//!
//! Hosts usually embed these settings in their own `config.toml` under a
//! `[layout]` table. Missing keys fall back to their defaults.
//!
//! ```toml
//! gap = 4
//! merge_window_ms = 500
//! max_history = 100
//!
//! [navigation]
//! min_overlap = 0.1
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};

/// Tunables for the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Width of the resize handle between siblings, in pixels (default: 4)
    #[serde(default = "default_gap")]
    pub gap: i32,
    /// Commands of the same kind within this window merge into one undo
    /// entry (default: 500)
    #[serde(default = "default_merge_window_ms")]
    pub merge_window_ms: u64,
    /// Maximum number of undo entries kept (default: 100)
    #[serde(default = "default_max_history")]
    pub max_history: usize,
    /// Panic on invariant violations instead of logging and rolling back
    /// (default: on in debug builds)
    #[serde(default = "default_strict_invariants")]
    pub strict_invariants: bool,
    /// Spatial navigation scoring
    #[serde(default)]
    pub navigation: NavigationConfig,
}

const fn default_gap() -> i32 {
    4
}

const fn default_merge_window_ms() -> u64 {
    500
}

const fn default_max_history() -> usize {
    100
}

const fn default_strict_invariants() -> bool {
    cfg!(debug_assertions)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gap: default_gap(),
            merge_window_ms: default_merge_window_ms(),
            max_history: default_max_history(),
            strict_invariants: default_strict_invariants(),
            navigation: NavigationConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::Config` if the document is malformed or a
    /// value is out of range.
    pub fn from_toml_str(source: &str) -> LayoutResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| LayoutError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::Config` if serialization fails.
    pub fn to_toml_string(&self) -> LayoutResult<String> {
        toml::to_string(self).map_err(|e| LayoutError::Config(e.to_string()))
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::Config` naming the first bad value.
    pub fn validate(&self) -> LayoutResult<()> {
        if self.gap < 0 {
            return Err(LayoutError::Config(format!(
                "gap must not be negative (got {})",
                self.gap
            )));
        }
        if self.max_history == 0 {
            return Err(LayoutError::Config(
                "max_history must be at least 1".to_owned(),
            ));
        }
        self.navigation.validate()
    }

    /// Merge window as a duration.
    #[must_use]
    pub const fn merge_window(&self) -> Duration {
        Duration::from_millis(self.merge_window_ms)
    }
}

/// Weights used to score spatial focus candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Candidates whose perpendicular overlap (as a share of the source
    /// pane's extent) is below this are ignored (default: 0.1)
    #[serde(default = "default_min_overlap")]
    pub min_overlap: f64,
    /// Weight of the overlap term (default: 1.0)
    #[serde(default = "default_weight")]
    pub overlap_weight: f64,
    /// Weight of the distance penalty (default: 1.0)
    #[serde(default = "default_weight")]
    pub distance_weight: f64,
}

const fn default_min_overlap() -> f64 {
    0.1
}

const fn default_weight() -> f64 {
    1.0
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            min_overlap: default_min_overlap(),
            overlap_weight: default_weight(),
            distance_weight: default_weight(),
        }
    }
}

impl NavigationConfig {
    fn validate(&self) -> LayoutResult<()> {
        if !(0.0..=1.0).contains(&self.min_overlap) {
            return Err(LayoutError::Config(format!(
                "navigation.min_overlap must be within 0.0..=1.0 (got {})",
                self.min_overlap
            )));
        }
        if !(self.overlap_weight.is_finite() && self.overlap_weight >= 0.0) {
            return Err(LayoutError::Config(
                "navigation.overlap_weight must be a non-negative number".to_owned(),
            ));
        }
        if !(self.distance_weight.is_finite() && self.distance_weight >= 0.0) {
            return Err(LayoutError::Config(
                "navigation.distance_weight must be a non-negative number".to_owned(),
            ));
        }
        Ok(())
    }
}
