//! Bulk import of a reading list exported as CSV.
//!
//! Only the `ISBN`, `Title` and `Author` columns are read; every other column
//! is ignored. Each row gets a cover from the metadata API, looked up by ISBN
//! first and by title second.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use shelf_storage::NewBook;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::responses::BookSummary;
use crate::state::AppState;

/// Number of imported rows echoed back to the client.
const IMPORT_PREVIEW_LEN: usize = 20;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    #[serde(rename = "ISBN")]
    isbn: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Author")]
    author: String,
}

#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub message: &'static str,
    pub books: Vec<BookSummary>,
}

pub async fn import_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ImportSummary>)> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            upload = Some(field.bytes().await?);
            break;
        }
    }
    let upload = upload.ok_or_else(|| ApiError::validation("No file uploaded"))?;

    let rows = parse_rows(&upload)?;
    debug!("Parsed {} CSV row(s)", rows.len());

    let resolver = state.covers.resolver();
    let mut books = Vec::with_capacity(rows.len());
    for row in rows {
        let cover = resolver
            .lookup_isbn_or_title(&row.isbn, &row.title)
            .await
            .unwrap_or_default();
        books.push(NewBook {
            cover_google: Some(cover),
            ..NewBook::titled(row.title, row.author)
        });
    }

    let imported = state.storage.import_books(&books).await?;
    info!("Imported {} book(s) from CSV", imported.len());

    Ok((
        StatusCode::CREATED,
        Json(ImportSummary {
            message: "Books imported",
            books: imported
                .into_iter()
                .take(IMPORT_PREVIEW_LEN)
                .map(BookSummary::from)
                .collect(),
        }),
    ))
}

fn parse_rows(data: &Bytes) -> ApiResult<Vec<CsvRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data.as_ref());

    reader
        .deserialize::<CsvRow>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::validation(format!("Invalid CSV: {}", e)))
}
