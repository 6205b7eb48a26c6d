//! Compute pane geometry command.

use std::path::Path;

use panetree_core::geometry::{self, Rect};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{load_config, read_tree, short_id};

/// Parameters for the layout command
pub struct LayoutParams {
    pub width: i32,
    pub height: i32,
    pub gap: Option<i32>,
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct PaneRow {
    pane_id: uuid::Uuid,
    surface_id: String,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    undersized: bool,
}

/// Compute pane geometry command handler
pub fn cmd_layout(
    config_path: Option<&Path>,
    file: &Path,
    params: LayoutParams,
) -> Result<(), CliError> {
    if params.width < 0 || params.height < 0 {
        return Err(CliError::Config(format!(
            "viewport must not be negative (got {}x{})",
            params.width, params.height
        )));
    }
    let config = load_config(config_path)?;
    let gap = params.gap.unwrap_or(config.gap);
    let tree = read_tree(file)?;
    let layout = geometry::layout(&tree, Rect::new(0, 0, params.width, params.height), gap);

    let rows: Vec<PaneRow> = tree
        .pane_ids()
        .into_iter()
        .filter_map(|pane_id| {
            let rect = layout.rect(pane_id)?;
            let leaf = tree.leaf(pane_id)?;
            Some(PaneRow {
                pane_id: pane_id.0,
                surface_id: leaf.surface_id.to_string(),
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                undersized: layout.undersized().contains(&pane_id),
            })
        })
        .collect();

    match params.format {
        OutputFormat::Table => {
            println!(
                "{:<10} {:<20} {:>6} {:>6} {:>6} {:>6}",
                "PANE", "SURFACE", "X", "Y", "WIDTH", "HEIGHT"
            );
            for row in &rows {
                println!(
                    "{:<10} {:<20} {:>6} {:>6} {:>6} {:>6}{}",
                    short_id(panetree_core::PaneId(row.pane_id)),
                    row.surface_id,
                    row.x,
                    row.y,
                    row.width,
                    row.height,
                    if row.undersized { "  (below minimum)" } else { "" }
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}
