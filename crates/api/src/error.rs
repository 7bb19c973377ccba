//! HTTP-facing errors. Every failure renders as `{"error": "<message>"}`.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use shelf_covers::CoverError;
use shelf_storage::{BookId, BookStorageError};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Book {id} not found")]
    BookNotFound { id: BookId },

    #[error("{message}")]
    Validation { message: String },

    #[error("File type not allowed")]
    UnsupportedFileType,

    /// Storage failure reported to the client with a fixed message.
    #[error("{message}")]
    Persistence {
        message: String,
        #[source]
        source: BookStorageError,
    },

    #[error("Internal server error")]
    Storage {
        #[source]
        source: BookStorageError,
    },

    #[error("Cover lookup failed")]
    Cover {
        #[source]
        source: CoverError,
    },

    #[error("Invalid multipart body: {source}")]
    Multipart {
        #[source]
        source: MultipartError,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>, source: BookStorageError) -> Self {
        Self::Persistence {
            message: message.into(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BookNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } | Self::UnsupportedFileType | Self::Multipart { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Persistence { .. } | Self::Storage { .. } | Self::Cover { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<BookStorageError> for ApiError {
    fn from(err: BookStorageError) -> Self {
        match err {
            BookStorageError::UnsupportedFileType { .. } => Self::UnsupportedFileType,
            source => Self::Storage { source },
        }
    }
}

impl From<CoverError> for ApiError {
    fn from(err: CoverError) -> Self {
        match err {
            CoverError::Storage(source) => source.into(),
            source => Self::Cover { source },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation {
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(source: MultipartError) -> Self {
        Self::Multipart { source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Persistence { source, .. } | Self::Storage { source } => {
                error!("{}: {:?}", self, source);
            }
            Self::Cover { source } => error!("{}: {:?}", self, source),
            _ => {}
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
