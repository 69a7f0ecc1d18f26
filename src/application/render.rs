//! Text rendering of trees, traces and the event log.

use std::collections::VecDeque;
use std::fmt;

use itertools::Itertools;
use serde::Serialize;
use termtree::Tree;
use tracing::instrument;

use crate::config::DisplayConfig;
use crate::domain::{AvlTree, Direction, Key, Node, StructuralEvent};

/// Conversion into a printable `termtree::Tree`.
pub trait ToTermTree {
    fn to_term_tree(&self, style: &DisplayConfig) -> Tree<String>;
}

impl<K: Key> ToTermTree for AvlTree<K> {
    #[instrument(level = "trace", skip(self))]
    fn to_term_tree(&self, style: &DisplayConfig) -> Tree<String> {
        match self.root() {
            Some(root) => node_tree(root, style),
            None => Tree::new("Tree is empty".to_string()),
        }
    }
}

fn node_tree<K: Key>(node: &Node<K>, display: &DisplayConfig) -> Tree<String> {
    let mut tree = Tree::new(node_label(node, display));
    // A lone child still needs its side marked, otherwise left and right look the same
    match (node.left(), node.right()) {
        (None, None) => {}
        (left, right) => {
            tree.push(side_tree("L", left, display));
            tree.push(side_tree("R", right, display));
        }
    }
    tree
}

fn side_tree<K: Key>(side: &str, node: Option<&Node<K>>, display: &DisplayConfig) -> Tree<String> {
    match node {
        Some(n) => {
            let mut sub = node_tree(n, display);
            sub.root = format!("{}: {}", side, sub.root);
            sub
        }
        None => Tree::new(format!("{}: ·", side)),
    }
}

/// `value [h:.. b:..]`, with a trailing `*` for freshly inserted nodes.
pub fn node_label<K: Key>(node: &Node<K>, display: &DisplayConfig) -> String {
    let mut parts = vec![node.value().to_string()];
    if display.show_height {
        parts.push(format!("h:{}", node.height()));
    }
    if display.show_balance {
        parts.push(format!("b:{}", node.balance()));
    }
    let mut label = parts.into_iter().join(" ");
    if node.is_new() {
        label.push_str(" *");
    }
    label
}

/// Before/after sketch of a single rotation.
pub fn rotation_diagram(
    direction: Direction,
    pivot: &dyn fmt::Display,
    new_parent: &dyn fmt::Display,
) -> String {
    let (p, n) = (pivot, new_parent);
    let lines = match direction {
        Direction::Right => [
            format!("Before:   {p}        After:   {n}"),
            "         /                    \\".to_string(),
            format!("        {n}        ->           {p}"),
            "         \\                    /".to_string(),
            "         ...                ...".to_string(),
        ],
        Direction::Left => [
            format!("Before:   {p}        After:   {n}"),
            "           \\                /".to_string(),
            format!("           {n}      ->     {p}"),
            "           /                \\".to_string(),
            "         ...                ...".to_string(),
        ],
    };
    lines.join("\n")
}

/// Kind of a log entry, used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Insert,
    Rotation,
    Complete,
    Undo,
    Clear,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub kind: EntryKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagram: Option<String>,
}

impl LogEntry {
    pub fn new(kind: EntryKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            diagram: None,
        }
    }

    /// Entry for one structural event; rotations get a diagram when enabled.
    pub fn from_event<K: Key>(event: &StructuralEvent<K>, display: &DisplayConfig) -> Self {
        match event {
            StructuralEvent::Inserted { value } => {
                Self::new(EntryKind::Insert, format!("Inserted node: {}", value))
            }
            StructuralEvent::Rotated {
                direction,
                pivot,
                new_parent,
                case,
                description,
            } => Self {
                kind: EntryKind::Rotation,
                message: format!(
                    "Rotation: {} [{}] {}",
                    direction.to_string().to_uppercase(),
                    case,
                    description
                ),
                diagram: display
                    .diagrams
                    .then(|| rotation_diagram(*direction, pivot, new_parent)),
            },
        }
    }
}

/// Bounded log, newest entry first.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }
}
