//! Google Books volumes API client.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{CoverError, Result};
use crate::http::{HttpExecutor, Request};
use crate::types::CoverCandidate;

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";
pub const DEFAULT_MAX_RESULTS: u32 = 20;

/// Connection settings for the volumes API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleBooksConfig {
    pub endpoint: String,
    /// Sent as the `key` parameter when set.
    pub api_key: Option<String>,
    pub max_results: u32,
    pub timeout_secs: u64,
}

impl Default for GoogleBooksConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            max_results: DEFAULT_MAX_RESULTS,
            timeout_secs: 10,
        }
    }
}

/// What to look a single volume up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeQuery<'a> {
    Isbn(&'a str),
    Title(&'a str),
}

impl VolumeQuery<'_> {
    /// The `q` parameter for this query, or `None` when the key is blank.
    fn to_q(self) -> Option<String> {
        match self {
            Self::Isbn(isbn) if !isbn.trim().is_empty() => Some(format!("isbn:{}", isbn.trim())),
            Self::Title(title) if !title.trim().is_empty() => {
                Some(format!("intitle:{}", title.trim()))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VolumeInfo {
    title: String,
    authors: Vec<String>,
    image_links: ImageLinks,
    info_link: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ImageLinks {
    thumbnail: String,
    small_thumbnail: String,
}

impl VolumeInfo {
    fn best_thumbnail(&self) -> Option<&str> {
        [&self.image_links.thumbnail, &self.image_links.small_thumbnail]
            .into_iter()
            .map(|link| link.trim())
            .find(|link| !link.is_empty())
    }

    /// A usable candidate needs a title, at least one author and a thumbnail.
    fn into_candidate(self) -> Option<CoverCandidate> {
        let title = self.title.trim();
        if title.is_empty() || self.authors.is_empty() {
            return None;
        }
        let cover = self.best_thumbnail()?.to_string();

        Some(CoverCandidate {
            title: title.to_string(),
            author: self.authors.join(", "),
            cover,
            info_link: self.info_link.trim().to_string(),
        })
    }
}

/// Resolves covers through the Google Books volumes API.
#[derive(Clone)]
pub struct GoogleBooksResolver {
    executor: Arc<dyn HttpExecutor>,
    config: GoogleBooksConfig,
}

impl GoogleBooksResolver {
    pub fn new(executor: Arc<dyn HttpExecutor>, config: GoogleBooksConfig) -> Self {
        Self { executor, config }
    }

    fn request(&self, q: String) -> Request {
        let request = Request::get(&self.config.endpoint).param("q", q);
        match &self.config.api_key {
            Some(key) if !key.is_empty() => request.param("key", key),
            _ => request,
        }
    }

    async fn fetch(&self, request: Request) -> Result<VolumesResponse> {
        let response = self.executor.execute(request).await?;
        if !response.is_success() {
            return Err(CoverError::Status {
                status: response.status,
            });
        }

        let body = response.data.unwrap_or_default();
        serde_json::from_slice(&body).map_err(|source| CoverError::Decode { source })
    }

    /// Search volumes by title and keep the items that carry a title, authors
    /// and a thumbnail.
    pub async fn search_by_title(&self, query: &str) -> Result<Vec<CoverCandidate>> {
        let request = self
            .request(format!("intitle:{}", query))
            .param("maxResults", self.config.max_results.to_string());

        let volumes = self.fetch(request).await?;
        let total = volumes.items.len();
        let candidates: Vec<_> = volumes
            .items
            .into_iter()
            .filter_map(|volume| volume.volume_info.into_candidate())
            .collect();

        debug!(
            "Title search '{}' returned {} items, {} usable",
            query,
            total,
            candidates.len()
        );
        Ok(candidates)
    }

    /// Thumbnail of the first volume matching `query`.
    ///
    /// Failures are logged and reported as "no cover".
    pub async fn lookup_thumbnail(&self, query: VolumeQuery<'_>) -> Option<String> {
        let q = query.to_q()?;

        match self.fetch(self.request(q.clone())).await {
            Ok(volumes) => volumes
                .items
                .into_iter()
                .next()
                .and_then(|volume| volume.volume_info.best_thumbnail().map(str::to_string)),
            Err(e) => {
                warn!("Cover lookup for '{}' failed: {}", q, e);
                None
            }
        }
    }

    /// Look up by ISBN first and fall back to the title.
    pub async fn lookup_isbn_or_title(&self, isbn: &str, title: &str) -> Option<String> {
        if let Some(cover) = self.lookup_thumbnail(VolumeQuery::Isbn(isbn)).await {
            return Some(cover);
        }
        self.lookup_thumbnail(VolumeQuery::Title(title)).await
    }
}
