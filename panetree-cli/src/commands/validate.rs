//! Validate snapshot command.

use std::path::Path;

use crate::error::CliError;
use crate::util::read_snapshot;

/// Validate snapshot command handler
pub fn cmd_validate(file: &Path) -> Result<(), CliError> {
    let snapshot = read_snapshot(file)?;
    let tree = snapshot.to_tree()?;

    println!(
        "Valid layout: {} pane(s), {} split(s), depth {}",
        tree.pane_count(),
        tree.split_count(),
        tree.depth()
    );
    if tree.is_empty() {
        println!("  (empty layout)");
    }
    Ok(())
}
