//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// AVL tree engine with a replayable rotation trace and snapshot undo
#[derive(Parser, Debug)]
#[command(name = "avltrace")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Additional config file, applied on top of the global config
    #[arg(
        long = "config",
        global = true,
        value_hint = ValueHint::FilePath,
        env = "AVLTRACE_CONFIG"
    )]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Insert keys in order and print every rotation
    Insert {
        /// Keys to insert
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        keys: Vec<i64>,
        /// Undo this many insertions afterwards
        #[arg(short, long, default_value_t = 0)]
        undo: usize,
        /// Emit the trace and final tree as JSON
        #[arg(long)]
        json: bool,
        /// Print the retained event log at the end (newest first)
        #[arg(long, conflicts_with = "json")]
        log: bool,
        /// Clear the tree and its history once inserts and undos are done
        #[arg(long)]
        clear_after: bool,
    },

    /// Build a tree from keys and verify the AVL invariants
    Check {
        /// Keys to insert
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        keys: Vec<i64>,
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
    /// Show effective settings
    Show,
    /// Print a commented config template
    Template,
    /// Show the global config file location
    Path,
}
