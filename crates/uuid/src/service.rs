//! Internal implementation of page id generation.

use crate::{UuidError, UuidResult};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// An opaque page identifier.
///
/// Once constructed the id is guaranteed to be non-empty and free of surrounding whitespace.
/// Nothing else about its shape is assumed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(String);

impl PageId {
    /// Generates a fresh random id (hyphenated UUID v4).
    pub fn new_random() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// Validates an externally supplied id.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is empty, whitespace-only, or carries
    /// leading/trailing whitespace.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if input.trim().is_empty() {
            return Err(UuidError::InvalidInput("page id cannot be empty".into()));
        }
        if input.trim() != input {
            return Err(UuidError::InvalidInput(format!(
                "page id must not have surrounding whitespace, got: '{}'",
                input
            )));
        }
        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for PageId {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Source of new page ids.
///
/// The page service asks its generator for an id on every create and retries when the id is
/// already taken, so generators do not have to guarantee uniqueness themselves.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> PageId;
}

/// Random UUID v4 ids. This is the production generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> PageId {
        PageId::new_random()
    }
}

/// Deterministic ids of the form `<prefix>-<n>`, starting at 1.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    pub fn starting_at(prefix: impl Into<String>, first: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("page")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> PageId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        PageId(format!("{}-{}", self.prefix, n))
    }
}
