use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use shelf_storage::{BookId, BookUpdate, NewBook, unique_by_title_author};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::extract::JsonBody;
use crate::responses::{BookEnvelope, BookResponse, BookSummary, Message, SearchHit};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub q: String,
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<BookResponse>>> {
    let books = state.storage.list_books().await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
) -> ApiResult<Json<BookResponse>> {
    let book = state
        .storage
        .get_book(id)
        .await?
        .ok_or(ApiError::BookNotFound { id })?;
    Ok(Json(book.into()))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(new_book): JsonBody<NewBook>,
) -> ApiResult<(StatusCode, Json<BookEnvelope>)> {
    let book = state.storage.create_book(&new_book).await?;
    info!("Added book {} '{}'", book.id, book.title);

    Ok((
        StatusCode::CREATED,
        Json(BookEnvelope {
            message: "Book added successfully",
            book: book.into(),
        }),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
    JsonBody(update): JsonBody<BookUpdate>,
) -> ApiResult<Json<BookEnvelope>> {
    let book = state
        .storage
        .update_book(id, &update)
        .await?
        .ok_or(ApiError::BookNotFound { id })?;

    Ok(Json(BookEnvelope {
        message: "Book updated successfully",
        book: book.into(),
    }))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
) -> ApiResult<Json<Message>> {
    state
        .storage
        .delete_book(id)
        .await?
        .ok_or(ApiError::BookNotFound { id })?;

    info!("Deleted book {}", id);
    Ok(Json(Message::new(format!(
        "Book with ID {} deleted successfully.",
        id
    ))))
}

pub async fn delete_all(State(state): State<AppState>) -> ApiResult<Json<Message>> {
    let removed = state.storage.delete_all_books().await?;
    info!("Deleted all {} book(s)", removed);
    Ok(Json(Message::new("All books deleted successfully.")))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<SearchHit>>> {
    let books = state.storage.search_books(&params.q).await?;
    Ok(Json(books.into_iter().map(SearchHit::from).collect()))
}

/// First book for every (title, author) pair, for reviewing covers.
pub async fn pending_review(State(state): State<AppState>) -> ApiResult<Json<Vec<BookSummary>>> {
    let books = unique_by_title_author(state.storage.list_books().await?);
    Ok(Json(books.into_iter().map(BookSummary::from).collect()))
}
