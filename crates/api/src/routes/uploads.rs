use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadedCover {
    pub cover_url: String,
}

/// Store the multipart `file` field in the cover directory.
///
/// A request without a file answers with an empty `cover_url` so the client
/// can fall back to an external cover.
pub async fn upload_cover(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadedCover>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if file_name.is_empty() {
            break;
        }

        let data = field.bytes().await?;
        let cover_url = state.storage.store_cover_upload(&file_name, &data).await?;
        info!("Stored cover upload {} ({} bytes)", cover_url, data.len());
        return Ok(Json(UploadedCover { cover_url }));
    }

    debug!("Cover upload without a file");
    Ok(Json(UploadedCover {
        cover_url: String::new(),
    }))
}
