//! Command handler modules for the CLI.

mod completions;
mod focus_order;
mod layout;
mod migrate;
mod neighbors;
mod show;
mod validate;

use std::path::Path;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(config_path: Option<&Path>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Validate { file } => validate::cmd_validate(&file),
        Commands::Show { file, format } => show::cmd_show(&file, format),
        Commands::Layout {
            file,
            width,
            height,
            gap,
            format,
        } => layout::cmd_layout(
            config_path,
            &file,
            layout::LayoutParams {
                width,
                height,
                gap,
                format,
            },
        ),
        Commands::Neighbors {
            file,
            pane,
            width,
            height,
        } => neighbors::cmd_neighbors(config_path, &file, pane.as_deref(), width, height),
        Commands::FocusOrder { file } => focus_order::cmd_focus_order(&file),
        Commands::Migrate { file, output } => migrate::cmd_migrate(&file, output.as_deref()),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
