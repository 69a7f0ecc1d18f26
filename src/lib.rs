//! AVL tree engine that records every structural change it makes.
//!
//! [`domain::AvlTree`] inserts keys, rebalances with the four classic
//! rotation cases and returns the ordered list of [`domain::StructuralEvent`]s
//! each insertion produced. Every insertion snapshots the previous state so
//! it can be undone.
//!
//! ```
//! use avltrace::domain::{AvlTree, StructuralEvent};
//!
//! let mut tree = AvlTree::new();
//! tree.insert_value(10);
//! tree.insert_value(20);
//! let events = tree.insert_value(30);
//!
//! assert_eq!(events.len(), 2);
//! assert!(matches!(events[1], StructuralEvent::Rotated { .. }));
//! assert_eq!(tree.root().map(|n| *n.value()), Some(20));
//! assert!(tree.undo());
//! assert_eq!(tree.root().map(|n| *n.value()), Some(10));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
