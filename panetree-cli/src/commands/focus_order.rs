//! Sequential focus order command.

use std::path::Path;

use panetree_core::FocusCoordinator;

use crate::error::CliError;
use crate::util::{read_tree, short_id};

/// Sequential focus order command handler
pub fn cmd_focus_order(file: &Path) -> Result<(), CliError> {
    let tree = read_tree(file)?;

    for (index, pane_id) in FocusCoordinator::focus_order(&tree).into_iter().enumerate() {
        let Some(leaf) = tree.leaf(pane_id) else {
            continue;
        };
        let hint = leaf
            .metadata
            .focus_order
            .map(|order| format!(" [order {order}]"))
            .unwrap_or_default();
        let marker = if tree.focused() == Some(pane_id) { " *" } else { "" };
        println!(
            "{:>3}. {} {}{hint}{marker}",
            index + 1,
            short_id(pane_id),
            leaf.surface_id
        );
    }
    Ok(())
}
