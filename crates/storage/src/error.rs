use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found")]
    NotFound,

    #[error("Malformed record: {0}")]
    Malformed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;
