//! Snapshot migration command.

use std::fs;
use std::path::Path;

use panetree_core::{CURRENT_SNAPSHOT_VERSION, WorkspaceSnapshot};
use serde_json::Value;

use crate::error::CliError;

/// Snapshot migration command handler
pub fn cmd_migrate(file: &Path, output: Option<&Path>) -> Result<(), CliError> {
    let value: Value = serde_json::from_str(&fs::read_to_string(file)?)?;
    let from_version = value.get("version").and_then(Value::as_u64).unwrap_or(0);
    let snapshot = WorkspaceSnapshot::from_value(value)?;
    // Refuse to write out something that would not load.
    snapshot.to_tree()?;
    let json = snapshot.to_json()?;

    match output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))?;
            eprintln!(
                "Migrated {} from v{from_version} to v{CURRENT_SNAPSHOT_VERSION}: {}",
                file.display(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    tracing::info!(from = from_version, to = CURRENT_SNAPSHOT_VERSION, "Snapshot migrated");
    Ok(())
}
