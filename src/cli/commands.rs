//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, LogEntry, Session, Step, ToTermTree};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::NodeView;

/// JSON document printed by `insert --json`.
#[derive(Serialize)]
struct TraceDocument<'a> {
    steps: &'a [Step<i64>],
    tree: Option<NodeView<i64>>,
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config_file.as_deref())?;
    if !settings.display.color {
        output::disable_colors();
    }
    debug!(?settings, "settings loaded");

    match &cli.command {
        Some(Commands::Insert {
            keys,
            undo,
            json,
            log,
            clear_after,
        }) => {
            let plan = InsertPlan {
                keys: keys.clone(),
                undo: *undo,
                clear_after: *clear_after,
            };
            _insert(settings, &plan, *json, *log)
        }
        Some(Commands::Check { keys }) => _check(settings, keys),
        Some(Commands::Config { command }) => _config(&settings, command),
        Some(Commands::Completion { .. }) => Ok(()),
        None => Err(CliError::Usage(
            "no command given, see `avltrace --help`".to_string(),
        )),
    }
}

/// What an `insert` invocation does to its session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertPlan {
    pub keys: Vec<i64>,
    /// Undo requests; stops at the first one that finds no history.
    pub undo: usize,
    pub clear_after: bool,
}

/// Run `plan` on a fresh session and hand the session back for output.
///
/// Per-key traces and undo results are printed unless `quiet`.
#[instrument(skip(settings))]
pub fn run_insert(settings: Settings, plan: &InsertPlan, quiet: bool) -> CliResult<Session<i64>> {
    let display = settings.display.clone();
    let mut session = Session::new(settings);

    for &key in &plan.keys {
        let events = session.insert(key).to_vec();
        if !quiet {
            output::header(&format!("insert {}", key));
            if events.is_empty() {
                output::warning(&format!("{} already present, tree unchanged", key));
            }
            for event in &events {
                output::entry(&LogEntry::from_event(event, &display));
            }
            output::info(&session.tree().to_term_tree(&display));
        }
        session.settle()?;
    }

    for _ in 0..plan.undo {
        let applied = session.undo();
        if !quiet {
            if applied {
                output::success("Undone last insertion");
            } else {
                output::warning("Nothing to undo");
            }
        }
        if !applied {
            break;
        }
    }

    if plan.clear_after {
        session.clear();
        if !quiet {
            output::success("Tree cleared");
        }
    }
    Ok(session)
}

fn _insert(settings: Settings, plan: &InsertPlan, json: bool, log: bool) -> CliResult<()> {
    let display = settings.display.clone();
    let session = run_insert(settings, plan, json)?;

    if json {
        let document = TraceDocument {
            steps: session.steps(),
            tree: session.tree().view(),
        };
        let rendered = serde_json::to_string_pretty(&document).map_err(ApplicationError::from)?;
        output::info(&rendered);
        return Ok(());
    }

    output::header("final tree");
    output::info(&session.tree().to_term_tree(&display));

    if log {
        output::header("event log");
        for entry in session.log().entries() {
            output::entry(entry);
        }
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _check(settings: Settings, keys: &[i64]) -> CliResult<()> {
    let mut session = Session::new(settings);
    for &key in keys {
        session.insert(key);
        if let Err(e) = session.settle() {
            output::failure(&e);
            return Err(e.into());
        }
    }

    let tree = session.tree();
    output::success("AVL invariants hold");
    output::detail(&format!("nodes:   {}", tree.len()));
    output::detail(&format!("height:  {}", tree.height()));
    output::detail(&format!("history: {}", tree.history_len()));
    output::detail(&format!(
        "in-order: {}",
        tree.iter().map(|n| n.value()).join(", ")
    ));
    Ok(())
}

fn _config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}
