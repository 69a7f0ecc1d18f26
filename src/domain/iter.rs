//! Borrowing traversals over the tree.

use tracing::instrument;

use crate::domain::node::Node;

/// In-order traversal: yields nodes in ascending key order.
pub struct InOrderIter<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> InOrderIter<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left(root);
        iter
    }

    fn push_left(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, K> Iterator for InOrderIter<'a, K> {
    type Item = &'a Node<K>;

    #[instrument(level = "trace", skip(self))]
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.push_left(current.right());
        Some(current)
    }
}

/// Pre-order traversal: parent first, then left subtree, then right subtree.
pub struct PreOrderIter<'a, K> {
    stack: Vec<(&'a Node<K>, usize)>,
}

impl<'a, K> PreOrderIter<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = root {
            stack.push((root, 0));
        }
        Self { stack }
    }
}

impl<'a, K> Iterator for PreOrderIter<'a, K> {
    /// Node and its depth (root = 0)
    type Item = (&'a Node<K>, usize);

    #[instrument(level = "trace", skip(self))]
    fn next(&mut self) -> Option<Self::Item> {
        let (current, depth) = self.stack.pop()?;
        // Push right first so left is visited first
        if let Some(right) = current.right() {
            self.stack.push((right, depth + 1));
        }
        if let Some(left) = current.left() {
            self.stack.push((left, depth + 1));
        }
        Some((current, depth))
    }
}
