//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Structural invariant violations found by `AvlTree::check_invariants`.
///
/// Values are carried as their `Display` rendering so the error type stays
/// independent of the key type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("stale height at node {value}: cached {cached}, actual {actual}")]
    StaleHeight {
        value: String,
        cached: usize,
        actual: usize,
    },

    #[error("node {value} is unbalanced: balance factor {balance}")]
    Unbalanced { value: String, balance: i32 },

    #[error("order violated: {value} is not strictly between {lower} and {upper}")]
    OutOfOrder {
        value: String,
        lower: String,
        upper: String,
    },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
