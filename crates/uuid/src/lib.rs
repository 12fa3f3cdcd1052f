//! Page identifier utilities.
//!
//! Folio treats page ids as *opaque* strings: the store never interprets them, and ids written by
//! other tools (or by hand) are accepted as long as they are non-empty.
//!
//! New ids come from an [`IdGenerator`]. The production generator ([`RandomIdGenerator`]) produces
//! hyphenated UUID v4 strings, for example `550e8400-e29b-41d4-a716-446655440000`.
//! [`SequentialIdGenerator`] produces `page-1`, `page-2`, ... and exists so that callers can get
//! deterministic ids in tests and fixtures.

mod service;

// Re-export public types
pub use service::{IdGenerator, PageId, RandomIdGenerator, SequentialIdGenerator, Uuid};

/// Error type for id operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for id operations.
pub type UuidResult<T> = Result<T, UuidError>;
