//! Read-through cover lookup: cover cache first, metadata API on a miss.

use shelf_storage::{Book, BookStorage, CoverCacheStorage, NewCachedCover};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::Result;
use crate::google::{GoogleBooksResolver, VolumeQuery};
use crate::types::{CoverCandidate, CoverSearch};

pub struct CoverLookup {
    cache: Arc<dyn CoverCacheStorage>,
    resolver: GoogleBooksResolver,
}

impl CoverLookup {
    pub fn new(cache: Arc<dyn CoverCacheStorage>, resolver: GoogleBooksResolver) -> Self {
        Self { cache, resolver }
    }

    pub fn resolver(&self) -> &GoogleBooksResolver {
        &self.resolver
    }

    /// Smart search.
    ///
    /// Cached covers whose title contains the query are returned as-is. On a
    /// miss the metadata API is searched, every novel (title, author) pair is
    /// cached, and the freshly resolved set is returned.
    pub async fn search(&self, query: &str) -> Result<CoverSearch> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(CoverSearch::Resolved(Vec::new()));
        }

        let cached = self.cache.find_cached_covers(query).await?;
        if !cached.is_empty() {
            info!("Using {} cached cover(s) for '{}'", cached.len(), query);
            return Ok(CoverSearch::Cached(
                cached.into_iter().map(CoverCandidate::from).collect(),
            ));
        }

        let resolved = self.resolver.search_by_title(query).await?;
        let rows: Vec<NewCachedCover> = resolved.iter().map(NewCachedCover::from).collect();
        let inserted = self.cache.cache_covers(&rows).await?;
        debug!(
            "Resolved {} cover(s) for '{}', {} newly cached",
            resolved.len(),
            query,
            inserted
        );

        Ok(CoverSearch::Resolved(resolved))
    }

    /// Cached covers for a title, never contacting the metadata API.
    pub async fn cached(&self, title: &str) -> Result<Vec<CoverCandidate>> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(Vec::new());
        }

        let cached = self.cache.find_cached_covers(title).await?;
        Ok(cached.into_iter().map(CoverCandidate::from).collect())
    }

    /// Look up a fresh cover for `book` by title and store it as the book's
    /// external cover.
    ///
    /// # Returns
    /// The new cover URL, or `None` if the metadata API had none
    pub async fn refetch(&self, storage: &dyn BookStorage, book: &Book) -> Result<Option<String>> {
        let Some(cover) = self
            .resolver
            .lookup_thumbnail(VolumeQuery::Title(&book.title))
            .await
        else {
            return Ok(None);
        };

        if !storage.set_google_cover(book.id, &cover).await? {
            return Ok(None);
        }

        info!("Refetched cover for book {}", book.id);
        Ok(Some(cover))
    }
}
