//! SQLite-based storage backend implementation.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{debug, info, warn};

use crate::error::{BookStorageError, Result};
use crate::models::{Book, BookUpdate, CachedCover, NewBook, NewCachedCover};
use crate::traits::{BookStorage, CoverCacheStorage};
use crate::types::{BookId, SeriesRenames};
use crate::uploads::CoverUploads;

const BOOK_COLUMNS: &str = "id, title, author, series, book_number, rating, date_read, \
     cover_local, cover_google, page_count, tags, summary, quote, created_at, updated_at";

const COVER_COLUMNS: &str = "id, title, author, cover, info_link, created_at";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS books (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL DEFAULT '',
        author TEXT NOT NULL DEFAULT '',
        series TEXT,
        book_number INTEGER NOT NULL DEFAULT 0,
        rating INTEGER NOT NULL DEFAULT 0,
        date_read TEXT NOT NULL DEFAULT '',
        cover_local TEXT NOT NULL DEFAULT '',
        cover_google TEXT NOT NULL DEFAULT '',
        page_count INTEGER NOT NULL DEFAULT 0,
        tags TEXT NOT NULL DEFAULT '',
        summary TEXT NOT NULL DEFAULT '',
        quote TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_books_series ON books(series);

    CREATE TABLE IF NOT EXISTS cached_covers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        author TEXT NOT NULL,
        cover TEXT NOT NULL,
        info_link TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL,
        UNIQUE (title, author)
    );
";

/// SQLite-based storage backend.
///
/// Books and cached covers live in one database file; uploaded covers live in
/// a flat directory next to it.
///
/// ```text
/// books.db
/// +-- books
/// +-- cached_covers
/// covers_dir/
/// +-- {sanitized_file_name}
/// ```
///
/// The connection sits behind a mutex. Each call holds the lock only while its
/// statements run and never across an await point.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
    uploads: CoverUploads,
}

impl SqliteStorage {
    /// Open (or create) the database file.
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    /// * `covers_dir` - Directory holding uploaded cover images
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(db_path: P, covers_dir: Q) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| BookStorageError::BackendError {
                source: Some(eyre::eyre!("Failed to create database directory: {}", e)),
            })?;
        }

        let conn = Connection::open(db_path).map_err(|e| BookStorageError::BackendError {
            source: Some(eyre::eyre!(
                "Failed to open database at {}: {}",
                db_path.display(),
                e
            )),
        })?;

        Self::from_connection(conn, Some(db_path.to_path_buf()), covers_dir)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory<Q: AsRef<Path>>(covers_dir: Q) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| BookStorageError::BackendError {
            source: Some(eyre::eyre!("Failed to open in-memory database: {}", e)),
        })?;
        Self::from_connection(conn, None, covers_dir)
    }

    fn from_connection<Q: AsRef<Path>>(
        conn: Connection,
        db_path: Option<PathBuf>,
        covers_dir: Q,
    ) -> Result<Self> {
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")
            .map_err(|e| BookStorageError::sqlite("configure pragmas", e))?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
            uploads: CoverUploads::new(covers_dir),
        })
    }

    /// Create the schema and the covers directory.
    pub async fn initialize(&self) -> Result<()> {
        self.with_conn("create schema", |conn| conn.execute_batch(SCHEMA))?;
        self.uploads.initialize().await?;

        match &self.db_path {
            Some(path) => info!("Opened book storage at {}", path.display()),
            None => info!("Opened in-memory book storage"),
        }
        Ok(())
    }

    /// Run `f` against the connection.
    ///
    /// On a multi-threaded runtime the call is marked blocking so other tasks
    /// move off this worker while SQLite runs.
    fn with_conn<T>(
        &self,
        operation: &str,
        f: impl FnOnce(&mut Connection) -> rusqlite::Result<T>,
    ) -> Result<T> {
        let run = || {
            let mut conn = self
                .conn
                .lock()
                .map_err(|_| BookStorageError::BackendError {
                    source: Some(eyre::eyre!("Database connection lock poisoned")),
                })?;

            f(&mut conn).map_err(|e| BookStorageError::sqlite(operation, e))
        };

        match Handle::try_current().map(|handle| handle.runtime_flavor()) {
            Ok(RuntimeFlavor::MultiThread) => tokio::task::block_in_place(run),
            _ => run(),
        }
    }

    async fn remove_cover_files(&self, books: &[Book]) {
        for file_name in books.iter().filter_map(Book::local_cover_file_name) {
            if let Err(e) = self.uploads.remove(file_name).await {
                warn!("Failed to remove cover {}: {}", file_name, e);
            }
        }
    }
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: BookId::new(row.get(0)?),
        title: row.get(1)?,
        author: row.get(2)?,
        series: row.get(3)?,
        book_number: row.get(4)?,
        rating: row.get(5)?,
        date_read: row.get(6)?,
        cover_local: row.get(7)?,
        cover_google: row.get(8)?,
        page_count: row.get(9)?,
        tags: row.get(10)?,
        summary: row.get(11)?,
        quote: row.get(12)?,
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}

fn cover_from_row(row: &Row<'_>) -> rusqlite::Result<CachedCover> {
    Ok(CachedCover {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        cover: row.get(3)?,
        info_link: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn fetch_book(conn: &Connection, id: i64) -> rusqlite::Result<Option<Book>> {
    conn.query_row(
        &format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1"),
        params![id],
        book_from_row,
    )
    .optional()
}

fn query_books(
    conn: &Connection,
    filter: &str,
    args: impl rusqlite::Params,
) -> rusqlite::Result<Vec<Book>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOK_COLUMNS} FROM books {filter} ORDER BY id"
    ))?;
    let books = stmt.query_map(args, book_from_row)?;
    books.collect()
}

fn insert_book(conn: &Connection, book: &NewBook) -> rusqlite::Result<i64> {
    let now = Utc::now();
    let (cover_local, cover_google) = book.cover_columns();

    conn.execute(
        "INSERT INTO books (title, author, series, book_number, rating, date_read, \
         cover_local, cover_google, page_count, tags, summary, quote, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)",
        params![
            book.title.clone().unwrap_or_default(),
            book.author.clone().unwrap_or_default(),
            book.series.clone().unwrap_or_default(),
            book.book_number.unwrap_or(0),
            book.rating.unwrap_or(0),
            book.date_read.clone().unwrap_or_default(),
            cover_local,
            cover_google,
            book.page_count.unwrap_or(0),
            book.tags.clone().unwrap_or_default(),
            book.summary.clone().unwrap_or_default(),
            book.quote.clone().unwrap_or_default(),
            now,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

fn missing_row(id: i64) -> rusqlite::Error {
    debug!("Book {} vanished inside its own transaction", id);
    rusqlite::Error::QueryReturnedNoRows
}

#[async_trait]
impl BookStorage for SqliteStorage {
    async fn list_books(&self) -> Result<Vec<Book>> {
        self.with_conn("list books", |conn| query_books(conn, "", []))
    }

    async fn get_book(&self, id: BookId) -> Result<Option<Book>> {
        self.with_conn("get book", |conn| fetch_book(conn, id.get()))
    }

    async fn create_book(&self, book: &NewBook) -> Result<Book> {
        let created = self.with_conn("create book", |conn| {
            let id = insert_book(conn, book)?;
            fetch_book(conn, id)?.ok_or_else(|| missing_row(id))
        })?;

        info!("Created book {} ({})", created.id, created.title);
        Ok(created)
    }

    async fn update_book(&self, id: BookId, update: &BookUpdate) -> Result<Option<Book>> {
        self.with_conn("update book", |conn| {
            let tx = conn.transaction()?;
            let Some(mut book) = fetch_book(&tx, id.get())? else {
                return Ok(None);
            };

            update.apply(&mut book);
            book.updated_at = Utc::now();

            tx.execute(
                "UPDATE books SET title = ?1, author = ?2, series = ?3, book_number = ?4, \
                 rating = ?5, date_read = ?6, cover_local = ?7, cover_google = ?8, \
                 page_count = ?9, tags = ?10, summary = ?11, quote = ?12, updated_at = ?13 \
                 WHERE id = ?14",
                params![
                    book.title,
                    book.author,
                    book.series,
                    book.book_number,
                    book.rating,
                    book.date_read,
                    book.cover_local,
                    book.cover_google,
                    book.page_count,
                    book.tags,
                    book.summary,
                    book.quote,
                    book.updated_at,
                    id.get(),
                ],
            )?;
            tx.commit()?;
            Ok(Some(book))
        })
    }

    async fn set_google_cover(&self, id: BookId, cover: &str) -> Result<bool> {
        let changed = self.with_conn("set google cover", |conn| {
            conn.execute(
                "UPDATE books SET cover_google = ?1, updated_at = ?2 WHERE id = ?3",
                params![cover, Utc::now(), id.get()],
            )
        })?;
        Ok(changed > 0)
    }

    async fn delete_book(&self, id: BookId) -> Result<Option<Book>> {
        let deleted = self.with_conn("delete book", |conn| {
            let tx = conn.transaction()?;
            let book = fetch_book(&tx, id.get())?;
            if book.is_some() {
                tx.execute("DELETE FROM books WHERE id = ?1", params![id.get()])?;
            }
            tx.commit()?;
            Ok(book)
        })?;

        if let Some(book) = &deleted {
            self.remove_cover_files(std::slice::from_ref(book)).await;
            info!("Deleted book {}", id);
        }
        Ok(deleted)
    }

    async fn delete_all_books(&self) -> Result<u64> {
        let removed = self.with_conn("delete all books", |conn| {
            let tx = conn.transaction()?;
            let books = query_books(&tx, "WHERE cover_local != ''", [])?;
            let count = tx.execute("DELETE FROM books", [])?;
            tx.commit()?;
            Ok((books, count))
        })?;

        let (with_covers, count) = removed;
        self.remove_cover_files(&with_covers).await;
        info!("Deleted all {} books", count);
        Ok(count as u64)
    }

    async fn search_books(&self, query: &str) -> Result<Vec<Book>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        self.with_conn("search books", |conn| {
            query_books(
                conn,
                "WHERE instr(lower(title), lower(?1)) > 0 \
                 OR instr(lower(author), lower(?1)) > 0 \
                 OR instr(lower(tags), lower(?1)) > 0",
                params![query],
            )
        })
    }

    async fn list_series(&self) -> Result<Vec<String>> {
        self.with_conn("list series", |conn| {
            let mut stmt = conn.prepare(
                "SELECT DISTINCT series FROM books \
                 WHERE series IS NOT NULL AND series != '' ORDER BY series",
            )?;
            let names = stmt.query_map([], |row| row.get(0))?;
            names.collect()
        })
    }

    async fn books_in_series(&self, name: &str) -> Result<Vec<Book>> {
        self.with_conn("books in series", |conn| {
            query_books(
                conn,
                "WHERE series IS NOT NULL AND lower(trim(series)) = lower(trim(?1))",
                params![name],
            )
        })
    }

    async fn rename_series(&self, renames: &SeriesRenames) -> Result<u64> {
        let changed = self.with_conn("rename series", |conn| {
            let tx = conn.transaction()?;

            // Resolve every mapping against the pre-rename state first.
            let mut plan = Vec::with_capacity(renames.len());
            {
                let mut stmt = tx.prepare("SELECT id FROM books WHERE series = ?1")?;
                for (old, new) in renames.iter() {
                    let ids = stmt
                        .query_map(params![old], |row| row.get::<_, i64>(0))?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    plan.push((new, ids));
                }
            }

            let now = Utc::now();
            let mut changed = 0;
            for (new, ids) in plan {
                for id in ids {
                    changed += tx.execute(
                        "UPDATE books SET series = ?1, updated_at = ?2 WHERE id = ?3",
                        params![new, now, id],
                    )?;
                }
            }

            tx.commit()?;
            Ok(changed as u64)
        })?;

        info!(
            "Renamed series for {} books across {} mappings",
            changed,
            renames.len()
        );
        Ok(changed)
    }

    async fn import_books(&self, books: &[NewBook]) -> Result<Vec<Book>> {
        let imported = self.with_conn("import books", |conn| {
            let tx = conn.transaction()?;
            let mut imported = Vec::with_capacity(books.len());
            for book in books {
                let id = insert_book(&tx, book)?;
                imported.push(fetch_book(&tx, id)?.ok_or_else(|| missing_row(id))?);
            }
            tx.commit()?;
            Ok(imported)
        })?;

        info!("Imported {} books", imported.len());
        Ok(imported)
    }

    async fn store_cover_upload(&self, file_name: &str, data: &[u8]) -> Result<String> {
        self.uploads.save(file_name, data).await
    }

    fn covers_dir(&self) -> &Path {
        self.uploads.root_path()
    }
}

#[async_trait]
impl CoverCacheStorage for SqliteStorage {
    async fn find_cached_covers(&self, query: &str) -> Result<Vec<CachedCover>> {
        self.with_conn("find cached covers", |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COVER_COLUMNS} FROM cached_covers \
                 WHERE instr(lower(title), lower(?1)) > 0 ORDER BY id"
            ))?;
            let covers = stmt.query_map(params![query], cover_from_row)?;
            covers.collect()
        })
    }

    async fn cache_covers(&self, covers: &[NewCachedCover]) -> Result<u64> {
        if covers.is_empty() {
            return Ok(0);
        }

        let inserted = self.with_conn("cache covers", |conn| {
            let tx = conn.transaction()?;
            let now = Utc::now();
            let mut inserted = 0;
            for cover in covers {
                inserted += tx.execute(
                    "INSERT INTO cached_covers (title, author, cover, info_link, created_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5) \
                     ON CONFLICT (title, author) DO NOTHING",
                    params![cover.title, cover.author, cover.cover, cover.info_link, now],
                )?;
            }
            tx.commit()?;
            Ok(inserted as u64)
        })?;

        debug!("Cached {} new covers", inserted);
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_storage(temp_dir: &TempDir) -> SqliteStorage {
        let storage = SqliteStorage::open(
            temp_dir.path().join("books.db"),
            temp_dir.path().join("covers"),
        )
        .unwrap();
        storage.initialize().await.unwrap();
        storage
    }

    #[tokio::test]
    async fn test_sqlite_storage_initialization() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir).await;

        assert!(temp_dir.path().join("books.db").exists());
        assert!(temp_dir.path().join("covers").exists());
        assert_eq!(storage.covers_dir(), temp_dir.path().join("covers"));
        assert!(storage.list_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir).await;
        storage
            .create_book(&NewBook::titled("Dune", "Frank Herbert"))
            .await
            .unwrap();

        storage.initialize().await.unwrap();
        assert_eq!(storage.list_books().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_defaults_missing_fields() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir).await;

        let book = storage
            .create_book(&NewBook {
                title: Some("Piranesi".to_string()),
                rating: Some(4),
                ..NewBook::default()
            })
            .await
            .unwrap();

        assert_eq!(book.title, "Piranesi");
        assert_eq!(book.rating, 4);
        assert_eq!(book.author, "");
        assert_eq!(book.series.as_deref(), Some(""));
        assert_eq!(book.book_number, 0);
        assert_eq!(book.page_count, 0);
        assert_eq!(book.date_read, "");
        assert_eq!(book.cover_local, "");
        assert_eq!(book.cover_google, "");
        assert_eq!(book.tags, "");
        assert_eq!(book.summary, "");
        assert_eq!(book.quote, "");
    }

    #[tokio::test]
    async fn test_update_missing_book_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir).await;

        let update = BookUpdate {
            title: Some("Nothing".to_string()),
            ..BookUpdate::default()
        };
        assert!(
            storage
                .update_book(BookId::new(99), &update)
                .await
                .unwrap()
                .is_none()
        );
        assert!(storage.delete_book(BookId::new(99)).await.unwrap().is_none());
        assert!(
            !storage
                .set_google_cover(BookId::new(99), "https://x/y.jpg")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_search_matches_title_author_and_tags() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir).await;

        storage
            .create_book(&NewBook::titled("The Fifth Season", "N. K. Jemisin"))
            .await
            .unwrap();
        storage
            .create_book(&NewBook {
                tags: Some("fantasy, SEASONAL".to_string()),
                ..NewBook::titled("Other", "Someone")
            })
            .await
            .unwrap();
        storage
            .create_book(&NewBook::titled("Unrelated", "Nobody"))
            .await
            .unwrap();

        let hits = storage.search_books("season").await.unwrap();
        assert_eq!(hits.len(), 2);

        let by_author = storage.search_books("JEMISIN").await.unwrap();
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].title, "The Fifth Season");

        assert!(storage.search_books("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_series_listing_and_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir).await;

        for (title, series) in [("A", "Discworld"), ("B", "  discworld "), ("C", "Dune"), ("D", "")] {
            storage
                .create_book(&NewBook {
                    series: Some(series.to_string()),
                    ..NewBook::titled(title, "Author")
                })
                .await
                .unwrap();
        }

        let series = storage.list_series().await.unwrap();
        assert_eq!(series, vec!["  discworld ", "Discworld", "Dune"]);

        let books = storage.books_in_series("DISCWORLD").await.unwrap();
        let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_rename_series_does_not_chain() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir).await;

        let a = storage
            .create_book(&NewBook {
                series: Some("A".to_string()),
                ..NewBook::titled("First", "X")
            })
            .await
            .unwrap();
        let b = storage
            .create_book(&NewBook {
                series: Some("B".to_string()),
                ..NewBook::titled("Second", "X")
            })
            .await
            .unwrap();

        let renames = SeriesRenames::new().rename("A", "B").rename("B", "C");
        let changed = storage.rename_series(&renames).await.unwrap();
        assert_eq!(changed, 2);

        let a = storage.get_book(a.id).await.unwrap().unwrap();
        let b = storage.get_book(b.id).await.unwrap().unwrap();
        assert_eq!(a.series.as_deref(), Some("B"));
        assert_eq!(b.series.as_deref(), Some("C"));
    }

    #[tokio::test]
    async fn test_rename_series_rolls_back_on_failure() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir).await;

        let first = storage
            .create_book(&NewBook {
                series: Some("Foo".to_string()),
                ..NewBook::titled("First", "X")
            })
            .await
            .unwrap();
        let second = storage
            .create_book(&NewBook {
                series: Some("Bar".to_string()),
                ..NewBook::titled("Second", "X")
            })
            .await
            .unwrap();

        storage
            .conn
            .lock()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER block_broken BEFORE UPDATE OF series ON books \
                 WHEN NEW.series = 'Broken' BEGIN SELECT RAISE(ABORT, 'blocked'); END;",
            )
            .unwrap();

        let renames = SeriesRenames::new()
            .rename("Foo", "Renamed")
            .rename("Bar", "Broken");
        let err = storage.rename_series(&renames).await.unwrap_err();
        assert!(matches!(
            err,
            BookStorageError::StorageOperationFailed { .. }
        ));

        let first = storage.get_book(first.id).await.unwrap().unwrap();
        let second = storage.get_book(second.id).await.unwrap().unwrap();
        assert_eq!(first.series.as_deref(), Some("Foo"));
        assert_eq!(second.series.as_deref(), Some("Bar"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_storage_on_multi_thread_runtime() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir).await;

        let books: Vec<_> = (0..50)
            .map(|n| NewBook::titled(format!("Book {n}"), "Author"))
            .collect();
        let imported = storage.import_books(&books).await.unwrap();
        assert_eq!(imported.len(), 50);
        assert_eq!(storage.list_books().await.unwrap().len(), 50);
    }

    #[tokio::test]
    async fn test_cache_covers_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir).await;

        let cover = NewCachedCover {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            cover: "https://books.google.com/dune.jpg".to_string(),
            info_link: "https://books.google.com/dune".to_string(),
        };

        assert_eq!(storage.cache_covers(&[cover.clone()]).await.unwrap(), 1);
        assert_eq!(
            storage
                .cache_covers(&[cover.clone(), cover.clone()])
                .await
                .unwrap(),
            0
        );

        let found = storage.find_cached_covers("dUN").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].cover, cover.cover);
        assert_eq!(found[0].info_link, cover.info_link);

        assert!(storage.find_cached_covers("hyperion").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_storage() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SqliteStorage::open_in_memory(temp_dir.path().join("covers")).unwrap();
        storage.initialize().await.unwrap();

        let book = storage
            .create_book(&NewBook::titled("Dune", "Frank Herbert"))
            .await
            .unwrap();
        assert_eq!(storage.get_book(book.id).await.unwrap(), Some(book));
    }
}
