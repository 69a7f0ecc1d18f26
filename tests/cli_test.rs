//! Argument parsing and command dispatch

use clap::Parser;
use rstest::rstest;

use avltrace::application::{EntryKind, Step};
use avltrace::cli::{
    execute_command, run_insert, Cli, CliError, Commands, ConfigCommands, InsertPlan,
};
use avltrace::config::Settings;

#[test]
fn given_insert_with_negative_keys_when_parsing_then_keys_kept_in_order() {
    let cli = Cli::try_parse_from(["avltrace", "insert", "10", "-5", "3", "--undo", "1"]).unwrap();

    match cli.command {
        Some(Commands::Insert {
            keys, undo, json, ..
        }) => {
            assert_eq!(keys, vec![10, -5, 3]);
            assert_eq!(undo, 1);
            assert!(!json);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn given_insert_without_keys_when_parsing_then_error() {
    assert!(Cli::try_parse_from(["avltrace", "insert"]).is_err());
}

#[test]
fn given_non_numeric_key_when_parsing_then_error() {
    assert!(Cli::try_parse_from(["avltrace", "check", "ten"]).is_err());
}

#[test]
fn given_json_and_log_when_parsing_then_conflict() {
    assert!(Cli::try_parse_from(["avltrace", "insert", "1", "--json", "--log"]).is_err());
}

#[test]
fn given_repeated_debug_flag_when_parsing_then_counted() {
    let cli = Cli::try_parse_from(["avltrace", "-dd", "config", "template"]).unwrap();
    assert_eq!(cli.debug, 2);
    assert!(matches!(
        cli.command,
        Some(Commands::Config {
            command: ConfigCommands::Template
        })
    ));
}

#[test]
fn given_no_command_when_executing_then_usage_error() {
    let cli = Cli::try_parse_from(["avltrace"]).unwrap();

    let err = execute_command(&cli).unwrap_err();

    assert!(matches!(err, CliError::Usage(_)));
    assert_eq!(err.exit_code(), avltrace::exitcode::USAGE);
}

#[test]
fn given_check_command_when_executing_then_succeeds() {
    let cli = Cli::try_parse_from(["avltrace", "check", "5", "4", "3", "2", "1", "1"]).unwrap();
    assert!(execute_command(&cli).is_ok());
}

#[test]
fn given_insert_json_when_executing_then_succeeds() {
    let cli =
        Cli::try_parse_from(["avltrace", "insert", "30", "10", "20", "--json", "-u", "5"]).unwrap();
    assert!(execute_command(&cli).is_ok());
}

fn plan_from(args: &[&str]) -> InsertPlan {
    let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
    match cli.command {
        Some(Commands::Insert {
            keys,
            undo,
            clear_after,
            ..
        }) => InsertPlan {
            keys,
            undo,
            clear_after,
        },
        other => panic!("unexpected command: {:?}", other),
    }
}

fn undo_steps(steps: &[Step<i64>]) -> Vec<bool> {
    steps
        .iter()
        .filter_map(|s| match s {
            Step::Undo { applied } => Some(*applied),
            _ => None,
        })
        .collect()
}

#[rstest]
#[case(&["avltrace", "insert", "1", "-u", "5", "--json"], vec![true, false])]
#[case(&["avltrace", "insert", "1", "2", "-u", "1"], vec![true])]
#[case(&["avltrace", "insert", "1", "-u", "1000000000"], vec![true, false])]
fn given_more_undos_than_history_when_running_then_stops_after_first_miss(
    #[case] args: &[&str],
    #[case] expected: Vec<bool>,
) {
    let plan = plan_from(args);

    let session = run_insert(Settings::default(), &plan, true).unwrap();

    assert_eq!(undo_steps(session.steps()), expected);
}

#[test]
fn given_insert_json_with_excess_undo_when_executing_then_succeeds() {
    let cli = Cli::try_parse_from(["avltrace", "insert", "1", "-u", "5", "--json"]).unwrap();
    assert!(execute_command(&cli).is_ok());
}

#[test]
fn given_insert_with_duplicate_undo_and_log_when_executing_then_succeeds() {
    let args = ["avltrace", "insert", "30", "10", "20", "20", "-u", "5", "--log"];
    let cli = Cli::try_parse_from(args).unwrap();
    assert!(execute_command(&cli).is_ok());
}

#[test]
fn given_insert_with_duplicate_undo_and_log_when_running_then_session_records_all() {
    // Arrange
    let plan = plan_from(&["avltrace", "insert", "30", "10", "20", "20", "-u", "5", "--log"]);

    // Act
    let session = run_insert(Settings::default(), &plan, true).unwrap();

    // Assert
    let inserts: Vec<(i64, usize)> = session
        .steps()
        .iter()
        .filter_map(|s| match s {
            Step::Insert { key, events } => Some((*key, events.len())),
            _ => None,
        })
        .collect();
    assert_eq!(inserts, vec![(30, 1), (10, 1), (20, 3), (20, 0)]);
    assert_eq!(undo_steps(session.steps()), vec![true, true, true, true, false]);
    assert!(session.tree().is_empty());
    assert_eq!(session.tree().history_len(), 0);

    let newest = session.log().entries().next().unwrap();
    assert_eq!(newest.kind, EntryKind::Warning);
    assert_eq!(newest.message, "Nothing to undo");
    assert!(session
        .log()
        .entries()
        .any(|e| e.kind == EntryKind::Warning && e.message.contains("20 already present")));
    assert_eq!(
        session
            .log()
            .entries()
            .filter(|e| e.kind == EntryKind::Rotation)
            .count(),
        2
    );
}

#[test]
fn given_clear_after_when_running_then_tree_history_and_log_reset() {
    let plan = plan_from(&["avltrace", "insert", "3", "2", "1", "--clear-after"]);
    assert!(plan.clear_after);

    let session = run_insert(Settings::default(), &plan, true).unwrap();

    assert_eq!(session.steps().last(), Some(&Step::Clear));
    assert!(session.tree().is_empty());
    assert_eq!(session.tree().history_len(), 0);
    let kinds: Vec<EntryKind> = session.log().entries().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![EntryKind::Clear]);
}

#[test]
fn given_clear_after_with_json_when_executing_then_succeeds() {
    let cli = Cli::try_parse_from(["avltrace", "insert", "5", "--clear-after", "--json"]).unwrap();
    assert!(execute_command(&cli).is_ok());
}
