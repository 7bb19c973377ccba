//! Book storage interface and implementations for Shelf.
//!
//! This crate provides a trait-based storage system for the personal book list,
//! the cover cache populated from external lookups, and the directory of
//! uploaded cover images.

pub mod backends;
pub mod error;
pub mod models;
pub mod traits;
pub mod types;
pub mod uploads;

// Re-export the main interface and types for easy access
pub use backends::SqliteStorage;
pub use error::{BookStorageError, Result};
pub use models::{
    Book, BookUpdate, CachedCover, CoverField, NewBook, NewCachedCover, unique_by_title_author,
};
pub use traits::{BookStorage, CoverCacheStorage};
pub use types::{BookId, SeriesRenames};
