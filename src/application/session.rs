//! Presentation-side session around one tree.
//!
//! Turns tree operations into log entries and recorded steps. The tree itself
//! never sees any of this.

use serde::Serialize;
use tracing::{info, instrument};

use crate::application::render::{EntryKind, EventLog, LogEntry};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{AvlTree, Key, StructuralEvent};

/// One user-visible action and what it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Step<K> {
    Insert {
        key: K,
        events: Vec<StructuralEvent<K>>,
    },
    Undo {
        applied: bool,
    },
    Clear,
}

#[derive(Debug)]
pub struct Session<K> {
    tree: AvlTree<K>,
    log: EventLog,
    steps: Vec<Step<K>>,
    settings: Settings,
}

impl<K: Key> Session<K> {
    pub fn new(settings: Settings) -> Self {
        Self {
            tree: AvlTree::new(),
            log: EventLog::new(settings.log_capacity),
            steps: Vec::new(),
            settings,
        }
    }

    pub fn tree(&self) -> &AvlTree<K> {
        &self.tree
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn steps(&self) -> &[Step<K>] {
        &self.steps
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Insert `key` and log its trace. New-node flags stay set until `settle`.
    #[instrument(level = "debug", skip(self))]
    pub fn insert(&mut self, key: K) -> &[StructuralEvent<K>] {
        let events = self.tree.insert_value(key.clone());
        if events.is_empty() {
            self.log.push(LogEntry::new(
                EntryKind::Warning,
                format!("{} already present, tree unchanged", key),
            ));
        }
        for event in &events {
            self.log
                .push(LogEntry::from_event(event, &self.settings.display));
        }
        self.steps.push(Step::Insert { key, events });
        match self.steps.last() {
            Some(Step::Insert { events, .. }) => events,
            _ => &[],
        }
    }

    /// Mark the last trace as consumed: clears new-node flags and checks the tree.
    #[instrument(level = "debug", skip(self))]
    pub fn settle(&mut self) -> ApplicationResult<()> {
        self.tree.clear_new_flags();
        self.tree.check_invariants()?;
        self.log
            .push(LogEntry::new(EntryKind::Complete, "Complete: Tree is balanced!"));
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn undo(&mut self) -> bool {
        let applied = self.tree.undo();
        let entry = if applied {
            LogEntry::new(EntryKind::Undo, "Undone last insertion")
        } else {
            LogEntry::new(EntryKind::Warning, "Nothing to undo")
        };
        self.log.push(entry);
        self.steps.push(Step::Undo { applied });
        applied
    }

    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        self.tree.clear();
        self.log.clear();
        self.log.push(LogEntry::new(EntryKind::Clear, "Tree cleared"));
        self.steps.push(Step::Clear);
        info!("tree cleared");
    }
}
