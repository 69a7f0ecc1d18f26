//! Tree nodes with exclusive child ownership.

use std::cmp::max;
use std::fmt;

/// Bound for anything stored in the tree.
///
/// Keys must be totally ordered; `Display` is used for rotation descriptions
/// and rendering, `Debug` for tracing.
pub trait Key: Ord + Clone + fmt::Debug + fmt::Display {}

impl<T> Key for T where T: Ord + Clone + fmt::Debug + fmt::Display {}

/// Owning handle to a subtree, `None` for the empty subtree.
pub type Link<K> = Option<Box<Node<K>>>;

/// One key in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K> {
    pub(crate) value: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
    /// Cached height of the subtree rooted here
    pub(crate) height: usize,
    /// Set on creation, cleared by `AvlTree::clear_new_flags`
    pub(crate) is_new: bool,
}

impl<K> Node<K> {
    pub(crate) fn new(value: K) -> Self {
        Self {
            value,
            left: None,
            right: None,
            height: 1,
            is_new: true,
        }
    }

    pub fn value(&self) -> &K {
        &self.value
    }

    pub fn left(&self) -> Option<&Node<K>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<K>> {
        self.right.as_deref()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// `height(left) - height(right)`
    pub fn balance(&self) -> i32 {
        link_height(&self.left) as i32 - link_height(&self.right) as i32
    }

    pub(crate) fn update_height(&mut self) {
        self.height = 1 + max(link_height(&self.left), link_height(&self.right));
    }

    pub(crate) fn clear_new_flags(&mut self) {
        self.is_new = false;
        if let Some(left) = self.left.as_mut() {
            left.clear_new_flags();
        }
        if let Some(right) = self.right.as_mut() {
            right.clear_new_flags();
        }
    }
}

impl<K: Clone> Node<K> {
    /// Deep copy with every presentation flag reset.
    pub(crate) fn settled_copy(&self) -> Self {
        Self {
            value: self.value.clone(),
            left: self.left.as_ref().map(|n| Box::new(n.settled_copy())),
            right: self.right.as_ref().map(|n| Box::new(n.settled_copy())),
            height: self.height,
            is_new: false,
        }
    }
}

/// Height of a possibly empty subtree.
pub fn link_height<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}
