//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! request handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_DATA_FILE, DEFAULT_TITLE};
use crate::{PageError, PageResult};
use folio_types::NonEmptyText;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_file: PathBuf,
    default_title: NonEmptyText,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PageError::InvalidInput` if `data_file` is empty or names an existing directory.
    pub fn new(data_file: PathBuf, default_title: NonEmptyText) -> PageResult<Self> {
        if data_file.as_os_str().is_empty() {
            return Err(PageError::InvalidInput(
                "collection file path cannot be empty".into(),
            ));
        }
        if data_file.is_dir() {
            return Err(PageError::InvalidInput(format!(
                "collection file path is a directory: {}",
                data_file.display()
            )));
        }

        Ok(Self {
            data_file,
            default_title,
        })
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn default_title(&self) -> &NonEmptyText {
        &self.default_title
    }
}

/// Resolve the collection file path from an optional string value.
///
/// `None` or a blank value falls back to [`DEFAULT_DATA_FILE`].
pub fn data_file_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}

/// Resolve the default page title from an optional string value.
///
/// `None` or a blank value falls back to [`DEFAULT_TITLE`].
pub fn default_title_from_env_value(value: Option<String>) -> PageResult<NonEmptyText> {
    let value = value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    NonEmptyText::try_from(value)
        .map_err(|e| PageError::InvalidInput(format!("default title: {e}")))
}
