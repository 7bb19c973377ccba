//! HTTP API for Shelf.
//!
//! [`router`] builds the axum application over an [`AppState`]; the `shelf`
//! binary wires it to settings, storage and the Google Books resolver.

pub mod config;
pub mod error;
pub mod extract;
pub mod responses;
pub mod routes;
pub mod state;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use config::Settings;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use routes::{books, covers, import, series, status, uploads};

pub fn router(state: AppState) -> Router {
    let covers_dir = ServeDir::new(state.storage.covers_dir());
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/", get(status::index))
        .route("/health", get(status::health))
        .route(
            "/books",
            get(books::list).post(books::create).delete(books::delete_all),
        )
        .route(
            "/api/books",
            get(books::list).post(books::create).delete(books::delete_all),
        )
        .route("/books/pending-review", get(books::pending_review))
        .route(
            "/books/{id}",
            get(books::show).patch(books::update).delete(books::delete),
        )
        .route("/books/{id}/refetch_cover", post(covers::refetch))
        .route("/search", get(books::search))
        .route("/series", get(series::list))
        .route("/api/series", patch(series::rename))
        .route("/api/series/{name}", get(series::books))
        .route("/api/smart_search", get(covers::smart_search))
        .route("/cached_covers", get(covers::cached))
        .route("/upload_cover", post(uploads::upload_cover))
        .route("/import_csv", post(import::import_csv))
        .nest_service("/covers", covers_dir)
        .layer(upload_limit)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
