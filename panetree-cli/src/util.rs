//! Shared utility functions used across command modules.

use std::fs;
use std::path::Path;

use panetree_core::{EngineConfig, PaneId, TreeModel, WorkspaceSnapshot};

use crate::error::CliError;

/// Loads the engine configuration from the optional `--config` file.
pub fn load_config(config_path: Option<&Path>) -> Result<EngineConfig, CliError> {
    let Some(path) = config_path else {
        return Ok(EngineConfig::default());
    };
    let source = fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("Failed to read {}: {e}", path.display())))?;
    let config = EngineConfig::from_toml_str(&source)?;
    tracing::debug!(path = %path.display(), "Loaded engine config");
    Ok(config)
}

/// Reads and migrates a snapshot file.
pub fn read_snapshot(path: &Path) -> Result<WorkspaceSnapshot, CliError> {
    let json = fs::read_to_string(path)?;
    Ok(WorkspaceSnapshot::from_json(&json)?)
}

/// Reads a snapshot file and rebuilds its tree.
pub fn read_tree(path: &Path) -> Result<TreeModel, CliError> {
    Ok(read_snapshot(path)?.to_tree()?)
}

/// Finds a pane by full UUID or unique UUID prefix.
pub fn find_pane(tree: &TreeModel, id_or_prefix: &str) -> Result<PaneId, CliError> {
    if let Ok(uuid) = uuid::Uuid::parse_str(id_or_prefix) {
        let pane_id = PaneId(uuid);
        return if tree.contains(pane_id) {
            Ok(pane_id)
        } else {
            Err(CliError::PaneNotFound(id_or_prefix.to_string()))
        };
    }

    let prefix = id_or_prefix.to_lowercase();
    let matches: Vec<PaneId> = tree
        .pane_ids()
        .into_iter()
        .filter(|id| id.0.to_string().starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [] => Err(CliError::PaneNotFound(id_or_prefix.to_string())),
        [pane_id] => Ok(*pane_id),
        _ => Err(CliError::Config(format!(
            "Ambiguous pane prefix '{id_or_prefix}' matches {} panes",
            matches.len()
        ))),
    }
}

/// Short form of a pane id for tables.
pub fn short_id(pane_id: PaneId) -> String {
    pane_id.0.to_string().chars().take(8).collect()
}
