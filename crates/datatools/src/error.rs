use thiserror::Error;

pub type Result<T> = std::result::Result<T, DataToolsError>;

#[derive(Error, Debug)]
pub enum DataToolsError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::StorageError),

    #[error("Data transformation error: {0}")]
    TransformationError(String),
}
