//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Voting-eligibility questionnaire: walk the decision tree to find your voting category
#[derive(Parser, Debug)]
#[command(name = "votenav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Load the decision tree from a TOML file instead of the built-in one
    #[arg(short, long, global = true, env = "VOTENAV_TREE_FILE", value_hint = ValueHint::FilePath)]
    pub tree_file: Option<PathBuf>,

    /// Explicit config file (layered over the global config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer the questionnaire interactively
    Walk,

    /// Apply a sequence of choices and show where they lead
    Path {
        /// Node ids to select, in order
        ids: Vec<String>,
    },

    /// Show the questionnaire as a tree
    Tree,

    /// List the outcome ids present in the tree
    Outcomes,

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
    /// Show merged config
    Show,

    /// Print a config template
    Template,

    /// Show config paths
    Path,
}
