use shelf_covers::{CoverLookup, GoogleBooksResolver, ReqwestExecutor};
use shelf_storage::{BookStorage, CoverCacheStorage, SqliteStorage};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Settings;

/// Shared handles given to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn BookStorage>,
    pub covers: Arc<CoverLookup>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new<S>(storage: Arc<S>, resolver: GoogleBooksResolver, max_upload_bytes: usize) -> Self
    where
        S: BookStorage + CoverCacheStorage + 'static,
    {
        let covers = CoverLookup::new(storage.clone(), resolver);
        Self {
            storage,
            covers: Arc::new(covers),
            max_upload_bytes,
        }
    }

    /// Open the database and upload directory and wire up the Google Books
    /// resolver described by `settings`.
    pub async fn from_settings(settings: &Settings) -> eyre::Result<Self> {
        let storage = Arc::new(SqliteStorage::open(
            &settings.storage.database_path,
            &settings.storage.covers_dir,
        )?);
        storage.initialize().await?;
        info!(
            "Opened library at {} (covers in {})",
            settings.storage.database_path.display(),
            settings.storage.covers_dir.display()
        );

        let executor =
            ReqwestExecutor::with_timeout(Duration::from_secs(settings.google_books.timeout_secs))?;
        let resolver = GoogleBooksResolver::new(Arc::new(executor), settings.google_books.clone());
        if settings.google_books.api_key.is_none() {
            info!("No Google Books API key configured; using anonymous quota");
        }

        Ok(Self::new(storage, resolver, settings.server.max_upload_bytes))
    }
}
