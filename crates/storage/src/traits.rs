//! Trait definitions for the book storage system.

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;
use crate::models::{Book, BookUpdate, CachedCover, NewBook, NewCachedCover};
use crate::types::{BookId, SeriesRenames};

/// Main trait for book storage operations.
///
/// This trait defines the interface for storing and retrieving book records
/// together with their uploaded cover images. Implementations own the upload
/// directory so that deleting a book can also remove its local cover file.
#[async_trait]
pub trait BookStorage: Send + Sync {
    // === Book Operations ===

    /// List every stored book, ordered by id.
    async fn list_books(&self) -> Result<Vec<Book>>;

    /// Get a book by its ID.
    ///
    /// # Returns
    /// `Some(book)` if found, `None` if not found
    async fn get_book(&self, id: BookId) -> Result<Option<Book>>;

    /// Store a new book. Missing numeric fields default to 0 and missing
    /// strings to the empty string.
    async fn create_book(&self, book: &NewBook) -> Result<Book>;

    /// Apply a partial update.
    ///
    /// # Returns
    /// The updated book, or `None` if no book has this ID
    async fn update_book(&self, id: BookId, update: &BookUpdate) -> Result<Option<Book>>;

    /// Overwrite the externally resolved cover of a book.
    ///
    /// # Returns
    /// `true` if the book exists and was updated
    async fn set_google_cover(&self, id: BookId, cover: &str) -> Result<bool>;

    /// Delete a book and its uploaded cover file, if any.
    ///
    /// # Returns
    /// The deleted book, or `None` if it didn't exist
    async fn delete_book(&self, id: BookId) -> Result<Option<Book>>;

    /// Delete every book and the uploaded covers they referenced.
    ///
    /// # Returns
    /// The number of deleted rows
    async fn delete_all_books(&self) -> Result<u64>;

    // === Query Operations ===

    /// Case-insensitive substring search across title, author and tags.
    async fn search_books(&self, query: &str) -> Result<Vec<Book>>;

    /// Distinct, non-empty series names in sorted order.
    async fn list_series(&self) -> Result<Vec<String>>;

    /// Books whose series matches `name` ignoring case and surrounding whitespace.
    async fn books_in_series(&self, name: &str) -> Result<Vec<Book>>;

    // === Bulk Operations ===

    /// Rename series in a single transaction. A failure rolls back every mapping.
    ///
    /// # Returns
    /// The number of rows changed
    async fn rename_series(&self, renames: &SeriesRenames) -> Result<u64>;

    /// Insert many books in a single transaction.
    async fn import_books(&self, books: &[NewBook]) -> Result<Vec<Book>>;

    // === Cover Upload Operations ===

    /// Save an uploaded cover image.
    ///
    /// # Returns
    /// The relative URL the cover is served at (`/covers/{file}`)
    async fn store_cover_upload(&self, file_name: &str, data: &[u8]) -> Result<String>;

    /// Directory that holds uploaded covers.
    fn covers_dir(&self) -> &Path;
}

/// Persistent cache of covers resolved from the metadata API.
#[async_trait]
pub trait CoverCacheStorage: Send + Sync {
    /// Cached covers whose title contains `query`, ignoring case.
    async fn find_cached_covers(&self, query: &str) -> Result<Vec<CachedCover>>;

    /// Insert covers whose (title, author) pair is not cached yet.
    ///
    /// # Returns
    /// The number of newly inserted rows
    async fn cache_covers(&self, covers: &[NewCachedCover]) -> Result<u64>;
}
