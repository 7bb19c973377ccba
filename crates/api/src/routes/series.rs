use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use shelf_storage::SeriesRenames;
use std::collections::BTreeMap;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::extract::JsonBody;
use crate::responses::{BookResponse, Message};
use crate::state::AppState;

/// Body of `PATCH /api/series`: `{"updates": {"old name": "new name"}}`.
///
/// A missing or `null` map counts as no updates.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenameSeriesRequest {
    pub updates: Option<BTreeMap<String, Option<String>>>,
}

#[derive(Debug, Serialize)]
pub struct SeriesBooks {
    pub books: Vec<BookResponse>,
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.storage.list_series().await?))
}

pub async fn books(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<SeriesBooks>> {
    let books = state.storage.books_in_series(&name).await?;
    Ok(Json(SeriesBooks {
        books: books.into_iter().map(BookResponse::from).collect(),
    }))
}

pub async fn rename(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RenameSeriesRequest>,
) -> ApiResult<Json<Message>> {
    let updates = request
        .updates
        .filter(|updates| !updates.is_empty())
        .ok_or_else(|| ApiError::validation("No updates provided"))?;

    let renames: SeriesRenames = updates
        .into_iter()
        .filter_map(|(old, new)| new.map(|new| (old, new)))
        .collect();

    let changed = state
        .storage
        .rename_series(&renames)
        .await
        .map_err(|e| ApiError::persistence("Failed to update series.", e))?;

    info!("Series rename touched {} book(s)", changed);
    Ok(Json(Message::new("Series names updated successfully")))
}
