//! Show tree structure command.

use std::fmt::Write as _;
use std::path::Path;

use panetree_core::{NodeRef, TreeModel};
use serde_json::json;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{read_tree, short_id};

/// Show tree structure command handler
pub fn cmd_show(file: &Path, format: OutputFormat) -> Result<(), CliError> {
    let tree = read_tree(file)?;

    match format {
        OutputFormat::Table => {
            let Some(root) = tree.root() else {
                println!("(empty layout)");
                return Ok(());
            };
            let mut out = String::new();
            render_node(&tree, root, 0, &mut out);
            print!("{out}");
        }
        OutputFormat::Json => {
            let value = json!({
                "panes": tree.pane_count(),
                "splits": tree.split_count(),
                "depth": tree.depth(),
                "focused_pane_id": tree.focused().map(|id| id.0),
                "root": tree.serialize()?,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

fn render_node(tree: &TreeModel, node: NodeRef, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        NodeRef::Leaf(pane_id) => {
            let Some(leaf) = tree.leaf(pane_id) else {
                return;
            };
            let marker = if tree.focused() == Some(pane_id) { " *" } else { "" };
            let _ = write!(out, "{indent}pane {} {}", short_id(pane_id), leaf.surface_id);
            if let Some(title) = &leaf.metadata.title {
                let _ = write!(out, " \"{title}\"");
            }
            if let Some(order) = leaf.metadata.focus_order {
                let _ = write!(out, " [order {order}]");
            }
            let _ = writeln!(out, "{marker}");
        }
        NodeRef::Split(node_id) => {
            let Some(split) = tree.split_node(node_id) else {
                return;
            };
            let _ = writeln!(
                out,
                "{indent}split {} {} [{:.3}, {:.3}]",
                &node_id.0.to_string()[..8],
                split.orientation,
                split.ratios[0],
                split.ratios[1]
            );
            for child in split.children {
                render_node(tree, child, depth + 1, out);
            }
        }
    }
}
