//! Smart search against a real SQLite cover cache and a scripted metadata API.

use async_trait::async_trait;
use shelf_covers::http::{Request, Response, ResponseError, ResponseErrorKind};
use shelf_covers::{
    CoverError, CoverLookup, CoverSearch, GoogleBooksConfig, GoogleBooksResolver, HttpExecutor,
};
use shelf_storage::{BookStorage, CoverCacheStorage, NewBook, NewCachedCover, SqliteStorage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Replies with the same body to every request and counts the calls.
struct ScriptedApi {
    reply: Mutex<Option<Result<Response, ResponseError>>>,
    calls: AtomicUsize,
    last_query: Mutex<Option<String>>,
}

impl ScriptedApi {
    fn ok(body: serde_json::Value) -> Arc<Self> {
        Self::new(Ok(Response {
            status: 200,
            data: Some(body.to_string().into_bytes()),
        }))
    }

    fn failing() -> Arc<Self> {
        Self::new(Err(ResponseError {
            kind: ResponseErrorKind::Connection,
            status: None,
            message: "connection refused".to_string(),
        }))
    }

    fn new(reply: Result<Response, ResponseError>) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Some(reply)),
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpExecutor for ScriptedApi {
    async fn execute(&self, request: Request) -> Result<Response, ResponseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = request.param_value("q").map(str::to_string);
        self.reply
            .lock()
            .unwrap()
            .clone()
            .expect("reply configured")
    }
}

async fn setup(api: Arc<ScriptedApi>) -> (TempDir, Arc<SqliteStorage>, CoverLookup) {
    let temp_dir = TempDir::new().unwrap();
    let storage = Arc::new(
        SqliteStorage::open(
            temp_dir.path().join("books.db"),
            temp_dir.path().join("covers"),
        )
        .unwrap(),
    );
    storage.initialize().await.unwrap();

    let resolver = GoogleBooksResolver::new(api, GoogleBooksConfig::default());
    let lookup = CoverLookup::new(storage.clone(), resolver);
    (temp_dir, storage, lookup)
}

fn one_valid_item() -> serde_json::Value {
    serde_json::json!({
        "items": [
            {"volumeInfo": {
                "title": "The Left Hand of Darkness",
                "authors": ["Ursula K. Le Guin"],
                "imageLinks": {"thumbnail": "http://books.google.com/lhod.jpg"},
                "infoLink": "http://books.google.com/lhod"
            }},
            {"volumeInfo": {"title": "Missing everything else"}}
        ]
    })
}

#[tokio::test]
async fn test_cache_hit_makes_no_external_call() {
    let api = ScriptedApi::ok(one_valid_item());
    let (_temp_dir, storage, lookup) = setup(api.clone()).await;

    storage
        .cache_covers(&[NewCachedCover {
            title: "Dune Messiah".to_string(),
            author: "Frank Herbert".to_string(),
            cover: "http://books.google.com/messiah.jpg".to_string(),
            info_link: String::new(),
        }])
        .await
        .unwrap();

    let result = lookup.search("dune").await.unwrap();
    assert!(result.is_cached());
    assert_eq!(result.candidates().len(), 1);
    assert_eq!(result.candidates()[0].title, "Dune Messiah");
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn test_miss_caches_one_row_per_valid_item() {
    let api = ScriptedApi::ok(one_valid_item());
    let (_temp_dir, storage, lookup) = setup(api.clone()).await;

    let result = lookup.search("left hand").await.unwrap();
    let CoverSearch::Resolved(candidates) = result else {
        panic!("expected a resolved result");
    };

    assert_eq!(api.calls(), 1);
    assert_eq!(
        api.last_query.lock().unwrap().as_deref(),
        Some("intitle:left hand")
    );
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].author, "Ursula K. Le Guin");

    let cached = storage.find_cached_covers("").await.unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].cover, "http://books.google.com/lhod.jpg");

    // The second search is answered from the cache
    let again = lookup.search("Left Hand").await.unwrap();
    assert!(again.is_cached());
    assert_eq!(again.into_candidates(), candidates);
    assert_eq!(api.calls(), 1);
}

#[tokio::test]
async fn test_miss_does_not_duplicate_existing_pairs() {
    let api = ScriptedApi::ok(one_valid_item());
    let (_temp_dir, storage, lookup) = setup(api.clone()).await;

    // Same pair cached under a title the query doesn't match
    storage
        .cache_covers(&[NewCachedCover {
            title: "The Left Hand of Darkness".to_string(),
            author: "Ursula K. Le Guin".to_string(),
            cover: "http://old/cover.jpg".to_string(),
            info_link: String::new(),
        }])
        .await
        .unwrap();

    let result = lookup.search("darkness left").await.unwrap();
    assert!(!result.is_cached());
    assert_eq!(result.candidates().len(), 1);

    let cached = storage.find_cached_covers("darkness").await.unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].cover, "http://old/cover.jpg");
}

#[tokio::test]
async fn test_external_failure_is_reported_without_caching() {
    let api = ScriptedApi::failing();
    let (_temp_dir, storage, lookup) = setup(api.clone()).await;

    let err = lookup.search("anything").await.unwrap_err();
    assert!(matches!(err, CoverError::Request { .. }));
    assert_eq!(api.calls(), 1);
    assert!(storage.find_cached_covers("").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_query_is_empty() {
    let api = ScriptedApi::ok(one_valid_item());
    let (_temp_dir, _storage, lookup) = setup(api.clone()).await;

    assert!(lookup.search("   ").await.unwrap().candidates().is_empty());
    assert!(lookup.cached("").await.unwrap().is_empty());
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn test_refetch_overwrites_external_cover() {
    let api = ScriptedApi::ok(one_valid_item());
    let (_temp_dir, storage, lookup) = setup(api.clone()).await;

    let book = storage
        .create_book(&NewBook {
            cover: Some("/covers/mine.png".to_string()),
            ..NewBook::titled("The Left Hand of Darkness", "Ursula K. Le Guin")
        })
        .await
        .unwrap();

    let cover = lookup.refetch(&*storage, &book).await.unwrap();
    assert_eq!(cover.as_deref(), Some("http://books.google.com/lhod.jpg"));
    assert_eq!(
        api.last_query.lock().unwrap().as_deref(),
        Some("intitle:The Left Hand of Darkness")
    );

    let book = storage.get_book(book.id).await.unwrap().unwrap();
    assert_eq!(book.cover_google, "http://books.google.com/lhod.jpg");
    assert_eq!(book.cover_local, "/covers/mine.png");
}

#[tokio::test]
async fn test_refetch_without_result_leaves_book_alone() {
    let api = ScriptedApi::ok(serde_json::json!({"totalItems": 0}));
    let (_temp_dir, storage, lookup) = setup(api.clone()).await;

    let book = storage
        .create_book(&NewBook::titled("Obscure", "Nobody"))
        .await
        .unwrap();

    assert_eq!(lookup.refetch(&*storage, &book).await.unwrap(), None);
    let book = storage.get_book(book.id).await.unwrap().unwrap();
    assert_eq!(book.cover_google, "");
}
