//! JSON shapes returned by the HTTP API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shelf_storage::{Book, BookId};

/// A book as shown to clients, with a single effective `cover`.
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub series: Option<String>,
    pub book_number: i64,
    pub rating: i64,
    pub date_read: String,
    pub cover: String,
    pub page_count: i64,
    pub tags: String,
    pub summary: String,
    pub quote: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            cover: book.effective_cover().to_string(),
            id: book.id,
            title: book.title,
            author: book.author,
            series: book.series,
            book_number: book.book_number,
            rating: book.rating,
            date_read: book.date_read,
            page_count: book.page_count,
            tags: book.tags,
            summary: book.summary,
            quote: book.quote,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

/// Search result; exposes both cover columns and omits the quote.
#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub series: Option<String>,
    pub book_number: i64,
    pub rating: i64,
    pub date_read: String,
    pub cover_local: String,
    pub cover_google: String,
    pub page_count: i64,
    pub tags: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Book> for SearchHit {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            series: book.series,
            book_number: book.book_number,
            rating: book.rating,
            date_read: book.date_read,
            cover_local: book.cover_local,
            cover_google: book.cover_google,
            page_count: book.page_count,
            tags: book.tags,
            summary: book.summary,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

/// Short form used by the review queue and the CSV import summary.
#[derive(Debug, Serialize)]
pub struct BookSummary {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub cover: String,
}

impl From<Book> for BookSummary {
    fn from(book: Book) -> Self {
        Self {
            cover: book.effective_cover().to_string(),
            id: book.id,
            title: book.title,
            author: book.author,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookEnvelope {
    pub message: &'static str,
    pub book: BookResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        let now = Utc::now();
        Book {
            id: BookId(3),
            title: "Piranesi".to_string(),
            author: "Susanna Clarke".to_string(),
            series: Some(String::new()),
            book_number: 0,
            rating: 5,
            date_read: "2024-02-01".to_string(),
            cover_local: "/covers/piranesi.png".to_string(),
            cover_google: "http://books.google.com/p.jpg".to_string(),
            page_count: 272,
            tags: "fantasy".to_string(),
            summary: String::new(),
            quote: "The Beauty of the House is immeasurable".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_book_response_prefers_external_cover() {
        let value = serde_json::to_value(BookResponse::from(book())).unwrap();
        assert_eq!(value["cover"], "http://books.google.com/p.jpg");
        assert_eq!(value["id"], 3);
        assert!(value.get("cover_local").is_none());
        assert!(value["created_at"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_search_hit_exposes_both_covers_without_quote() {
        let value = serde_json::to_value(SearchHit::from(book())).unwrap();
        assert_eq!(value["cover_local"], "/covers/piranesi.png");
        assert_eq!(value["cover_google"], "http://books.google.com/p.jpg");
        assert!(value.get("quote").is_none());
        assert!(value.get("cover").is_none());
    }
}
