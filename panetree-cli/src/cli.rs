//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// `PaneTree` command-line interface for working with layout snapshots
#[derive(Parser)]
#[command(name = "panetree-cli")]
#[command(author, version, about = "PaneTree layout snapshot tool")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to an engine configuration file (TOML)
    #[arg(short, long, global = true, env = "PANETREE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check that a snapshot loads into a valid layout
    #[command(about = "Validate a layout snapshot")]
    Validate {
        /// Snapshot file (JSON, any supported version)
        file: PathBuf,
    },

    /// Print the tree structure of a snapshot
    #[command(about = "Show the split tree of a layout snapshot")]
    Show {
        /// Snapshot file
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Compute pane rectangles for a viewport
    #[command(about = "Compute pane geometry for a viewport size")]
    Layout {
        /// Snapshot file
        file: PathBuf,

        /// Viewport width in pixels
        #[arg(short = 'W', long, default_value = "1920")]
        width: i32,

        /// Viewport height in pixels
        #[arg(short = 'H', long, default_value = "1080")]
        height: i32,

        /// Handle width between siblings (defaults to the configured gap)
        #[arg(short, long)]
        gap: Option<i32>,

        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Show the directional neighbours of a pane
    #[command(about = "Show where directional focus would move from a pane")]
    Neighbors {
        /// Snapshot file
        file: PathBuf,

        /// Pane UUID (defaults to the focused pane)
        #[arg(short, long)]
        pane: Option<String>,

        /// Viewport width in pixels
        #[arg(short = 'W', long, default_value = "1920")]
        width: i32,

        /// Viewport height in pixels
        #[arg(short = 'H', long, default_value = "1080")]
        height: i32,
    },

    /// Print the sequential focus order
    #[command(about = "List panes in sequential focus order")]
    FocusOrder {
        /// Snapshot file
        file: PathBuf,
    },

    /// Rewrite a snapshot in the current format version
    #[command(about = "Migrate a snapshot to the current format version")]
    Migrate {
        /// Snapshot file
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output format for inspection commands
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    Table,
    /// Output as JSON
    Json,
}
