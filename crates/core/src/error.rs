#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("title or content required")]
    MissingTitleAndContent,
    #[error("page not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid page record: {}", .0.join("; "))]
    InvalidRecord(Vec<String>),
    #[error("collection record {index} is malformed: {}", .errors.join("; "))]
    MalformedStoredRecord { index: usize, errors: Vec<String> },
    #[error("failed to allocate a unique page id after {0} attempts")]
    IdAllocation(usize),
    #[error("failed to create data directory: {0}")]
    DataDirCreation(std::io::Error),
    #[error("failed to read collection file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write collection file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize pages: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize pages: {0}")]
    Deserialization(serde_json::Error),
    #[error("page store is unavailable: {0}")]
    StoreUnavailable(String),
}

impl PageError {
    /// True for errors caused by the caller's input rather than by storage.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PageError::MissingTitleAndContent
                | PageError::InvalidInput(_)
                | PageError::InvalidRecord(_)
        )
    }
}

pub type PageResult<T> = std::result::Result<T, PageError>;
