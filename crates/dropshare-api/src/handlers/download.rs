//! Gated file download handler.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::info;

use dropshare_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the password of a protected share.
pub const PASSWORD_HEADER: &str = "x-share-password";

/// GET /api/shares/{id}/files/{index}
pub async fn download_file(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let page = match headers.get(PASSWORD_HEADER) {
        Some(value) => {
            let password = value
                .to_str()
                .map_err(|_| AppError::validation("Password header is not valid text"))?;
            state.access_service.unlock(&id, password).await
        }
        None => state.access_service.open(&id).await,
    };

    let files = page.require_granted()?;
    let item = files
        .get(index)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("No file at index {index}")))?;

    let stream = state.download_service.fetch_stream(&item).await?;
    info!(link_id = %id, index, name = %item.name, "Serving download");

    let content_type = mime_guess::from_path(&item.name)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, content_disposition(&item.name))
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 name.
fn content_disposition(name: &str) -> String {
    let fallback: String = name
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let encoded = utf8_percent_encode(name, NON_ALPHANUMERIC);
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}
