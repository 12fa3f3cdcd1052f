//! Whole-collection page storage.
//!
//! A [`PageStore`] loads and saves the *entire* collection at once. There is no per-page access,
//! no cache and no locking: callers read everything, change what they need, and write everything
//! back. Two concurrent read-modify-write cycles can interleave, and the last writer wins.
//!
//! ## Collection file
//!
//! [`JsonFileStore`] keeps the collection as a single pretty-printed JSON array:
//!
//! ```text
//! data/
//!   pages.json    # [ { "id": ..., "title": ..., ... }, ... ]
//! ```
//!
//! A collection file that is missing, unreadable, or not valid JSON loads as an empty collection.
//! The failure is logged, but the next save overwrites the file.
//!
//! A file that parses but holds a record of the wrong shape is different: the load fails with
//! [`PageError::MalformedStoredRecord`] and nothing is written back, so the rest of the collection
//! survives until the record is repaired (`folio check` lists the problems). `null` in a known
//! field is not a shape error; it loads as that field's default.

use crate::page::Page;
use crate::{PageError, PageResult};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Load-all/save-all access to the page collection.
pub trait PageStore: Send + Sync {
    /// Returns every page in collection order.
    fn load_all(&self) -> PageResult<Vec<Page>>;

    /// Replaces the whole collection with `pages`.
    fn save_all(&self, pages: &[Page]) -> PageResult<()>;
}

/// The collection stored as one JSON array file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the raw records of the collection file without applying page defaults.
    ///
    /// Unlike [`PageStore::load_all`] this reports read and parse failures, which makes it the
    /// right entry point for checking a file.
    ///
    /// # Errors
    ///
    /// Returns `PageError::FileRead` if the file cannot be read and
    /// `PageError::Deserialization` if it is not a JSON array.
    pub fn read_records(&self) -> PageResult<Vec<Value>> {
        let contents = fs::read_to_string(&self.path).map_err(PageError::FileRead)?;
        serde_json::from_str(&contents).map_err(PageError::Deserialization)
    }

    fn ensure_parent_dir(&self) -> PageResult<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
                fs::create_dir_all(parent).map_err(PageError::DataDirCreation)
            }
            _ => Ok(()),
        }
    }
}

impl PageStore for JsonFileStore {
    fn load_all(&self) -> PageResult<Vec<Page>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("collection file not found: {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::warn!(
                    "failed to read collection file {}: {}; treating as empty",
                    self.path.display(),
                    e
                );
                return Ok(Vec::new());
            }
        };

        let records = match serde_json::from_str::<Vec<Value>>(&contents) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    "failed to parse collection file {}: {}; treating as empty",
                    self.path.display(),
                    e
                );
                return Ok(Vec::new());
            }
        };

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Page::from_record(record).map_err(|e| match e {
                    PageError::InvalidRecord(errors) => {
                        tracing::warn!(
                            "record {} in {} is malformed: {}",
                            index,
                            self.path.display(),
                            errors.join("; ")
                        );
                        PageError::MalformedStoredRecord { index, errors }
                    }
                    other => other,
                })
            })
            .collect()
    }

    fn save_all(&self, pages: &[Page]) -> PageResult<()> {
        self.ensure_parent_dir()?;
        let json = serde_json::to_string_pretty(pages).map_err(PageError::Serialization)?;
        fs::write(&self.path, json).map_err(PageError::FileWrite)
    }
}

/// An in-process collection, used as a fake in tests and for scratch sessions.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pages: Mutex<Vec<Page>>,
    unavailable: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(pages: Vec<Page>) -> Self {
        Self {
            pages: Mutex::new(pages),
            unavailable: false,
        }
    }

    /// A store whose every load and save fails, for exercising storage error paths.
    pub fn unavailable() -> Self {
        Self {
            pages: Mutex::default(),
            unavailable: true,
        }
    }

    /// Copy of the current collection.
    pub fn snapshot(&self) -> Vec<Page> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Page>> {
        // A poisoned lock still holds a complete collection; every write replaces it wholesale.
        self.pages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(&self) -> PageResult<()> {
        if self.unavailable {
            return Err(PageError::StoreUnavailable(
                "in-memory store configured as unavailable".into(),
            ));
        }
        Ok(())
    }
}

impl PageStore for InMemoryStore {
    fn load_all(&self) -> PageResult<Vec<Page>> {
        self.check_available()?;
        Ok(self.snapshot())
    }

    fn save_all(&self, pages: &[Page]) -> PageResult<()> {
        self.check_available()?;
        *self.lock() = pages.to_vec();
        Ok(())
    }
}
