//! Undo history built from full-tree snapshots.

use tracing::{debug, instrument};

use crate::domain::node::{Key, Link};

/// Stack of settled deep copies of prior tree states.
#[derive(Debug, Clone)]
pub struct History<K> {
    snapshots: Vec<Link<K>>,
}

impl<K> Default for History<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> History<K> {
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Pop the most recent snapshot, `None` when there is nothing to restore.
    #[instrument(level = "trace", skip(self))]
    pub fn restore(&mut self) -> Option<Link<K>> {
        self.snapshots.pop()
    }
}

impl<K: Key> History<K> {
    /// Push a deep copy of `root`. An empty tree is recorded too.
    #[instrument(level = "trace", skip(self, root))]
    pub fn snapshot(&mut self, root: &Link<K>) {
        let copy = root.as_ref().map(|n| Box::new(n.settled_copy()));
        self.snapshots.push(copy);
        debug!(depth = self.snapshots.len(), "snapshot taken");
    }
}
