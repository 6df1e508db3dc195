use crate::link::LinkId;
use thiserror::Error;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("this ID: {0} is not valid")]
    InvalidLinkId(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("URL with ID {0} is not found")]
    NotFound(LinkId),
    #[error("URL cannot be empty")]
    EmptyUrl,
    #[error("link id space is exhausted")]
    IdExhausted,
    #[error("snapshot is corrupted: {0}")]
    Corrupted(String),
    #[error("snapshot serialization failed: {0}")]
    Serialization(String),
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),
}
