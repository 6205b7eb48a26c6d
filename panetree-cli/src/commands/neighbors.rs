//! Directional neighbour preview command.

use std::path::Path;

use panetree_core::geometry::{self, Rect};
use panetree_core::{Direction, FocusCoordinator};

use crate::error::CliError;
use crate::util::{find_pane, load_config, read_tree, short_id};

/// Directional neighbour preview command handler
pub fn cmd_neighbors(
    config_path: Option<&Path>,
    file: &Path,
    pane: Option<&str>,
    width: i32,
    height: i32,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let tree = read_tree(file)?;
    let from = match pane {
        Some(id) => find_pane(&tree, id)?,
        None => tree
            .focused()
            .or_else(|| tree.pane_ids().first().copied())
            .ok_or_else(|| CliError::PaneNotFound("(empty layout)".to_string()))?,
    };

    let layout = geometry::layout(&tree, Rect::new(0, 0, width, height), config.gap);
    let mut focus = FocusCoordinator::new(config.navigation);

    println!("From pane {}:", short_id(from));
    for direction in Direction::ALL {
        match focus.neighbor(&tree, &layout, from, direction) {
            Some(to) => {
                let surface = tree
                    .leaf(to)
                    .map(|leaf| leaf.surface_id.to_string())
                    .unwrap_or_default();
                println!("  {:<6} {} {surface}", direction.to_string(), short_id(to));
            }
            None => println!("  {:<6} -", direction.to_string()),
        }
    }
    Ok(())
}
