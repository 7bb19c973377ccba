//! Error types for cover resolution.

use shelf_storage::BookStorageError;
use thiserror::Error;

use crate::http::ResponseError;

pub type Result<T> = std::result::Result<T, CoverError>;

/// Failures while resolving covers through the metadata API or the cache.
#[derive(Debug, Error)]
pub enum CoverError {
    /// The request never produced a response (bad URL, timeout, connection).
    #[error("Metadata request failed: {source}")]
    Request {
        #[source]
        source: ResponseError,
    },

    /// The metadata API answered with a non-success status.
    #[error("Metadata API returned status {status}")]
    Status { status: u16 },

    /// The body was not the JSON shape the volumes API documents.
    #[error("Malformed metadata response")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Storage(#[from] BookStorageError),
}

impl From<ResponseError> for CoverError {
    fn from(source: ResponseError) -> Self {
        Self::Request { source }
    }
}
