//! CLI layer: argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::{Cli, Commands, ConfigCommands};
pub use commands::{execute_command, run_insert, InsertPlan};
pub use error::{CliError, CliResult};
