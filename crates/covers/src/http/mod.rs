//! Minimal HTTP surface used to talk to the book-metadata API.
//!
//! Lookups go through the [`HttpExecutor`] trait so the transport can be
//! swapped, e.g. for a canned executor in tests.

mod executor;
mod reqwest;

pub use self::executor::HttpExecutor;
pub use self::reqwest::ReqwestExecutor;

/// A GET request with optional query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub params: Option<Vec<(String, String)>>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: None,
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }

    /// Value of the first query parameter named `key`.
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .as_ref()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub data: Option<Vec<u8>>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseErrorKind {
    InvalidUrl,
    Timeout,
    Connection,
    BadResponse,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind:?}: {message}")]
pub struct ResponseError {
    pub kind: ResponseErrorKind,
    pub status: Option<u16>,
    pub message: String,
}
