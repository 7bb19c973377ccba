//! Storage model types for books and cached covers.
//!
//! `Book` and `CachedCover` mirror the rows of the `books` and
//! `cached_covers` tables. `NewBook` and `BookUpdate` are the typed payloads
//! accepted by the storage traits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::types::BookId;

/// A single tracked book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub series: Option<String>,
    pub book_number: i64,
    pub rating: i64,
    pub date_read: String,
    /// Relative URL of an uploaded cover (`/covers/{file}`), or empty.
    pub cover_local: String,
    /// Cover URL resolved from the metadata API, or empty.
    pub cover_google: String,
    pub page_count: i64,
    pub tags: String,
    pub summary: String,
    pub quote: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// The cover a client should display: the resolved external cover when
    /// present, otherwise the uploaded one.
    pub fn effective_cover(&self) -> &str {
        if self.cover_google.is_empty() {
            &self.cover_local
        } else {
            &self.cover_google
        }
    }

    /// File name of the uploaded cover inside the upload directory.
    pub fn local_cover_file_name(&self) -> Option<&str> {
        if self.cover_local.is_empty() {
            return None;
        }
        Path::new(&self.cover_local)
            .file_name()
            .and_then(|name| name.to_str())
    }

    /// Key used to collapse books that share a title and author.
    pub fn dedup_key(&self) -> (String, String) {
        (
            self.title.trim().to_lowercase(),
            self.author.trim().to_lowercase(),
        )
    }
}

/// Keep the first book for each lowercased, trimmed (title, author) pair.
pub fn unique_by_title_author(books: Vec<Book>) -> Vec<Book> {
    let mut seen = HashSet::new();
    books
        .into_iter()
        .filter(|book| seen.insert(book.dedup_key()))
        .collect()
}

/// Where a supplied cover value should be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverField {
    /// Absolute URL, stored as `cover_google`.
    Remote(String),
    /// Uploaded file path, stored as `cover_local`.
    Local(String),
    /// Empty or null value; both cover columns are cleared.
    Cleared,
}

impl CoverField {
    pub fn classify(value: Option<&str>) -> Self {
        match value {
            None | Some("") => Self::Cleared,
            Some(url) if url.starts_with("http") => Self::Remote(url.to_string()),
            Some(path) => Self::Local(path.to_string()),
        }
    }
}

/// Payload for creating a book. Every field is optional.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub series: Option<String>,
    pub book_number: Option<i64>,
    pub rating: Option<i64>,
    pub date_read: Option<String>,
    pub cover: Option<String>,
    pub cover_google: Option<String>,
    pub page_count: Option<i64>,
    pub tags: Option<String>,
    pub summary: Option<String>,
    pub quote: Option<String>,
}

impl NewBook {
    pub fn titled(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            ..Self::default()
        }
    }

    /// Resolve the `(cover_local, cover_google)` pair for the new row.
    ///
    /// An explicit `cover_google` wins over a remote `cover` value.
    pub fn cover_columns(&self) -> (String, String) {
        let explicit_google = self.cover_google.clone().unwrap_or_default();
        match CoverField::classify(self.cover.as_deref()) {
            CoverField::Local(path) => (path, explicit_google),
            CoverField::Remote(url) if explicit_google.is_empty() => (String::new(), url),
            CoverField::Remote(_) | CoverField::Cleared => (String::new(), explicit_google),
        }
    }
}

/// Partial update of a book. Absent fields are left unchanged.
///
/// `series` and `cover` distinguish an absent key (`None`) from an explicit
/// `null` (`Some(None)`).
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(deserialize_with = "present")]
    pub series: Option<Option<String>>,
    pub book_number: Option<i64>,
    pub rating: Option<i64>,
    pub date_read: Option<String>,
    pub page_count: Option<i64>,
    pub tags: Option<String>,
    pub summary: Option<String>,
    pub quote: Option<String>,
    #[serde(deserialize_with = "present")]
    pub cover: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl BookUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.series.is_none()
            && self.book_number.is_none()
            && self.rating.is_none()
            && self.date_read.is_none()
            && self.page_count.is_none()
            && self.tags.is_none()
            && self.summary.is_none()
            && self.quote.is_none()
            && self.cover.is_none()
    }

    /// Apply the supplied fields to `book`.
    pub fn apply(&self, book: &mut Book) {
        if let Some(cover) = &self.cover {
            match CoverField::classify(cover.as_deref()) {
                CoverField::Remote(url) => {
                    book.cover_google = url;
                    book.cover_local.clear();
                }
                CoverField::Local(path) => {
                    book.cover_local = path;
                    book.cover_google.clear();
                }
                CoverField::Cleared => {
                    book.cover_local.clear();
                    book.cover_google.clear();
                }
            }
        }

        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
        if let Some(series) = &self.series {
            book.series = series.clone();
        }
        if let Some(book_number) = self.book_number {
            book.book_number = book_number;
        }
        if let Some(rating) = self.rating {
            book.rating = rating;
        }
        if let Some(date_read) = &self.date_read {
            book.date_read = date_read.clone();
        }
        if let Some(page_count) = self.page_count {
            book.page_count = page_count;
        }
        if let Some(tags) = &self.tags {
            book.tags = tags.clone();
        }
        if let Some(summary) = &self.summary {
            book.summary = summary.clone();
        }
        if let Some(quote) = &self.quote {
            book.quote = quote.clone();
        }
    }
}

/// A cover previously resolved from the metadata API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedCover {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub cover: String,
    pub info_link: String,
    pub created_at: DateTime<Utc>,
}

/// A cover to insert into the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCachedCover {
    pub title: String,
    pub author: String,
    pub cover: String,
    pub info_link: String,
}
