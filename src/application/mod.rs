//! Application layer: sessions and rendering
//!
//! This layer turns tree operations into presentable output and depends on config.

pub mod error;
pub mod render;
pub mod session;

pub use error::{ApplicationError, ApplicationResult};
pub use render::{rotation_diagram, EntryKind, EventLog, LogEntry, ToTermTree};
pub use session::{Session, Step};
