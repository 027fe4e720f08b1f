//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::TextFormat;

/// Hierarchy layout engine: adjacency maps to positioned nodes, connector lines and nested text views
#[derive(Parser, Debug)]
#[command(name = "treelayout")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Raise log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lay out an adjacency map and print nodes, lines and canvas as JSON
    Layout {
        /// JSON input file (default: stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Print the nested text view of an adjacency map
    Text {
        /// JSON input file (default: stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Output format: bullets, html or tree (default: from config)
        #[arg(short, long)]
        format: Option<TextFormat>,
    },

    /// Print detected root names, one per line
    Roots {
        /// JSON input file (default: stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective config
    Show,
    /// Print a commented config template
    Template,
    /// Show global config path
    Path,
}
