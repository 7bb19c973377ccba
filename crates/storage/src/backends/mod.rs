//! Backend implementations for the book storage system.
//!
//! This module contains the storage backends. SQLite is the only one today;
//! it keeps books and cached covers in a single database file and owns the
//! directory of uploaded cover images.

pub mod sqlite;

// Re-export the main SQLite backend for convenience
pub use sqlite::SqliteStorage;
