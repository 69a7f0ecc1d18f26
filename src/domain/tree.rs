//! AVL tree engine: insertion, rebalancing and undo.
//!
//! Insertion is recursive over owned subtrees: each frame takes the child link
//! by value and returns the (possibly rotated) subtree, which the caller rebinds.
//! Every frame on the way back up re-checks its balance factor.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::event::{Direction, RebalanceCase, StructuralEvent};
use crate::domain::history::History;
use crate::domain::iter::{InOrderIter, PreOrderIter};
use crate::domain::node::{link_height, Key, Link, Node};

/// Self-balancing binary search tree with snapshot undo.
///
/// Caller-owned: any number of independent trees can coexist.
#[derive(Debug, Clone)]
pub struct AvlTree<K> {
    root: Link<K>,
    history: History<K>,
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> AvlTree<K> {
    pub fn new() -> Self {
        Self {
            root: None,
            history: History::new(),
        }
    }

    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree, 0 when empty.
    pub fn height(&self) -> usize {
        link_height(&self.root)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Number of states `undo` can still restore.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn iter(&self) -> InOrderIter<'_, K> {
        InOrderIter::new(self.root())
    }

    pub fn iter_preorder(&self) -> PreOrderIter<'_, K> {
        PreOrderIter::new(self.root())
    }

    /// Drop all nodes and the entire history. Cannot be undone.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        self.root = None;
        self.history.clear();
    }

    /// Reset the presentation flag on every node.
    #[instrument(level = "trace", skip(self))]
    pub fn clear_new_flags(&mut self) {
        if let Some(root) = self.root.as_mut() {
            root.clear_new_flags();
        }
    }
}

impl<K: Key> AvlTree<K> {
    /// Insert `key` and return the structural events in the order they happened.
    ///
    /// The current state is always pushed onto the history first, even when
    /// `key` is already present and the insertion turns out to be a no-op.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_value(&mut self, key: K) -> Vec<StructuralEvent<K>> {
        self.history.snapshot(&self.root);

        let mut events = Vec::new();
        self.root = Some(insert_node(self.root.take(), &key, &mut events));
        debug!(events = events.len(), height = self.height(), "insert finished");
        events
    }

    /// Restore the state before the most recent insertion.
    ///
    /// Returns `false` and leaves the tree untouched when there is no history.
    #[instrument(level = "debug", skip(self))]
    pub fn undo(&mut self) -> bool {
        match self.history.restore() {
            Some(root) => {
                self.root = root;
                debug!(remaining = self.history.len(), "undo applied");
                true
            }
            None => {
                debug!("nothing to undo");
                false
            }
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(&node.value) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Owned point-in-time copy of the shape for rendering.
    pub fn view(&self) -> Option<NodeView<K>> {
        self.root().map(NodeView::from_node)
    }

    /// Verify height cache, balance and strict ordering at every node.
    #[instrument(level = "debug", skip(self))]
    pub fn check_invariants(&self) -> DomainResult<()> {
        check_subtree(self.root(), None, None).map(|_| ())
    }
}

/// Serializable snapshot of one node and its subtrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView<K> {
    pub value: K,
    pub height: usize,
    pub balance: i32,
    pub is_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<NodeView<K>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<NodeView<K>>>,
}

impl<K: Clone> NodeView<K> {
    fn from_node(node: &Node<K>) -> Self {
        Self {
            value: node.value.clone(),
            height: node.height,
            balance: node.balance(),
            is_new: node.is_new,
            left: node.left().map(|n| Box::new(Self::from_node(n))),
            right: node.right().map(|n| Box::new(Self::from_node(n))),
        }
    }
}

fn insert_node<K: Key>(
    link: Link<K>,
    key: &K,
    events: &mut Vec<StructuralEvent<K>>,
) -> Box<Node<K>> {
    let mut node = match link {
        Some(node) => node,
        None => {
            events.push(StructuralEvent::Inserted { value: key.clone() });
            return Box::new(Node::new(key.clone()));
        }
    };

    match key.cmp(&node.value) {
        Ordering::Less => node.left = Some(insert_node(node.left.take(), key, events)),
        Ordering::Greater => node.right = Some(insert_node(node.right.take(), key, events)),
        Ordering::Equal => return node,
    }

    node.update_height();
    rebalance(node, key, events)
}

/// The four AVL cases, chosen by comparing the inserted key with the heavy child.
fn rebalance<K: Key>(
    mut node: Box<Node<K>>,
    key: &K,
    events: &mut Vec<StructuralEvent<K>>,
) -> Box<Node<K>> {
    let balance = node.balance();

    if balance > 1 {
        let side = node.left.as_ref().map(|left| key.cmp(&left.value));
        match side {
            Some(Ordering::Less) => return rotate_right(node, RebalanceCase::LeftLeft, events),
            Some(Ordering::Greater) => {
                node.left = node
                    .left
                    .take()
                    .map(|left| rotate_left(left, RebalanceCase::LeftRight, events));
                return rotate_right(node, RebalanceCase::LeftRight, events);
            }
            _ => {}
        }
    } else if balance < -1 {
        let side = node.right.as_ref().map(|right| key.cmp(&right.value));
        match side {
            Some(Ordering::Greater) => {
                return rotate_left(node, RebalanceCase::RightRight, events)
            }
            Some(Ordering::Less) => {
                node.right = node
                    .right
                    .take()
                    .map(|right| rotate_right(right, RebalanceCase::RightLeft, events));
                return rotate_left(node, RebalanceCase::RightLeft, events);
            }
            _ => {}
        }
    }

    node
}

//      y            x
//     / \          / \
//    x   C  -->   A   y
//   / \              / \
//  A   T            T   C
fn rotate_right<K: Key>(
    mut y: Box<Node<K>>,
    case: RebalanceCase,
    events: &mut Vec<StructuralEvent<K>>,
) -> Box<Node<K>> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    debug!(pivot = %y.value, new_parent = %x.value, %case, "rotate right");
    events.push(StructuralEvent::rotated(
        Direction::Right,
        y.value.clone(),
        x.value.clone(),
        case,
    ));

    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

//    x                y
//   / \              / \
//  A   y    -->     x   C
//     / \          / \
//    T   C        A   T
fn rotate_left<K: Key>(
    mut x: Box<Node<K>>,
    case: RebalanceCase,
    events: &mut Vec<StructuralEvent<K>>,
) -> Box<Node<K>> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    debug!(pivot = %x.value, new_parent = %y.value, %case, "rotate left");
    events.push(StructuralEvent::rotated(
        Direction::Left,
        x.value.clone(),
        y.value.clone(),
        case,
    ));

    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Returns the recomputed height of `node`.
fn check_subtree<K: Key>(
    node: Option<&Node<K>>,
    lower: Option<&K>,
    upper: Option<&K>,
) -> DomainResult<usize> {
    let Some(node) = node else {
        return Ok(0);
    };

    let above_lower = lower.map_or(true, |l| node.value > *l);
    let below_upper = upper.map_or(true, |u| node.value < *u);
    if !(above_lower && below_upper) {
        return Err(DomainError::OutOfOrder {
            value: node.value.to_string(),
            lower: lower.map_or_else(|| "-inf".to_string(), |l| l.to_string()),
            upper: upper.map_or_else(|| "+inf".to_string(), |u| u.to_string()),
        });
    }

    let left = check_subtree(node.left(), lower, Some(&node.value))?;
    let right = check_subtree(node.right(), Some(&node.value), upper)?;

    let actual = 1 + left.max(right);
    if node.height != actual {
        return Err(DomainError::StaleHeight {
            value: node.value.to_string(),
            cached: node.height,
            actual,
        });
    }

    let balance = left as i32 - right as i32;
    if balance.abs() > 1 {
        return Err(DomainError::Unbalanced {
            value: node.value.to_string(),
            balance,
        });
    }

    Ok(actual)
}
