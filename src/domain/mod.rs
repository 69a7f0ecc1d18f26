//! Domain layer: the balanced tree engine and its undo history
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod event;
pub mod history;
pub mod iter;
pub mod node;
pub mod tree;

pub use error::{DomainError, DomainResult};
pub use event::{Direction, RebalanceCase, StructuralEvent};
pub use history::History;
pub use iter::{InOrderIter, PreOrderIter};
pub use node::{Key, Link, Node};
pub use tree::{AvlTree, NodeView};
