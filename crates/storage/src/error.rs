//! Error types for the book storage system.

use thiserror::Error;

/// Errors that can occur during book storage operations.
#[derive(Debug, Error)]
pub enum BookStorageError {
    #[error("Storage operation failed: {operation}")]
    StorageOperationFailed {
        operation: String,
        #[source]
        source: Option<eyre::Report>,
    },

    #[error("Storage backend error")]
    BackendError {
        #[source]
        source: Option<eyre::Report>,
    },

    #[error("Cover upload failed: {operation}")]
    UploadOperationFailed {
        operation: String,
        #[source]
        source: Option<eyre::Report>,
    },

    #[error("Unsupported cover file type: {file_name}")]
    UnsupportedFileType {
        file_name: String,
        #[source]
        source: Option<eyre::Report>,
    },
}

impl BookStorageError {
    /// Wrap a SQLite failure raised while running `operation`.
    pub(crate) fn sqlite(operation: &str, err: rusqlite::Error) -> Self {
        Self::StorageOperationFailed {
            operation: operation.to_string(),
            source: Some(eyre::eyre!("SQLite error: {}", err)),
        }
    }
}

/// Result type alias for book storage operations.
pub type Result<T> = std::result::Result<T, BookStorageError>;
