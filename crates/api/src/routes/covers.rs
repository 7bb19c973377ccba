use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use shelf_covers::CoverCandidate;
use shelf_storage::BookId;
use tracing::{debug, error, warn};

use crate::error::{ApiError, ApiResult};
use crate::responses::Message;
use crate::routes::books::SearchParams;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CachedCoverParams {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct RefetchedCover {
    pub message: &'static str,
    pub cover: String,
}

/// Cover candidates for a title, from the cache when possible.
///
/// A failed external lookup answers 500 with an empty list so clients can
/// keep rendering.
pub async fn smart_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Json<Vec<CoverCandidate>>) {
    match state.covers.search(&params.q).await {
        Ok(found) => {
            debug!(
                "Smart search '{}': {} candidate(s), cached: {}",
                params.q.trim(),
                found.candidates().len(),
                found.is_cached()
            );
            (StatusCode::OK, Json(found.into_candidates()))
        }
        Err(e) => {
            error!("Smart search for '{}' failed: {}", params.q.trim(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Vec::new()))
        }
    }
}

pub async fn cached(
    State(state): State<AppState>,
    Query(params): Query<CachedCoverParams>,
) -> ApiResult<Json<Vec<CoverCandidate>>> {
    Ok(Json(state.covers.cached(&params.title).await?))
}

pub async fn refetch(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
) -> ApiResult<Response> {
    let book = state
        .storage
        .get_book(id)
        .await?
        .ok_or(ApiError::BookNotFound { id })?;

    let refetched = state.covers.refetch(state.storage.as_ref(), &book).await?;

    let response = match refetched {
        Some(cover) => Json(RefetchedCover {
            message: "Cover updated",
            cover,
        })
        .into_response(),
        None => {
            warn!("No alternate cover found for book {}", id);
            (
                StatusCode::NOT_FOUND,
                Json(Message::new("No alternate cover found")),
            )
                .into_response()
        }
    };
    Ok(response)
}
