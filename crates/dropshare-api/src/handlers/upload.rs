//! Upload form and link generation handlers.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;

use dropshare_core::error::AppError;
use dropshare_core::types::ExpiryChoice;
use dropshare_entity::share::{ShareLink, format_size_mb};
use dropshare_service::{PendingFile, UploadDraft};

use crate::dto::response::{ApiResponse, ExpiryOption, UploadOptionsResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/upload/options
pub async fn upload_options(State(state): State<AppState>) -> Json<ApiResponse<UploadOptionsResponse>> {
    let policy = state.upload_service.policy();
    Json(ApiResponse::ok(UploadOptionsResponse {
        expiry_choices: ExpiryChoice::ALL.into_iter().map(ExpiryOption::from).collect(),
        default_expiry_days: state.config.share.default_expiry_days,
        max_file_size_bytes: policy.max_file_size,
        max_file_size_label: format_size_mb(policy.max_file_size),
        require_password: policy.require_password,
    }))
}

/// POST /api/shares
///
/// Multipart fields: `file` (repeatable, in order), `password`,
/// `expiry_days`.
pub async fn create_share(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ShareLink>>), ApiError> {
    let default_expiry = ExpiryChoice::try_from(state.config.share.default_expiry_days)?;
    let mut draft = UploadDraft::with_expiry(default_expiry);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field
                    .file_name()
                    .map(String::from)
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| AppError::validation("Every file part needs a file name"))?;
                let content_type = field.content_type().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;

                let mut pending = PendingFile::new(file_name, data);
                if let Some(ct) = content_type {
                    pending = pending.with_content_type(ct);
                }
                draft.add(pending);
            }
            "password" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                draft.set_password(text);
            }
            "expiry_days" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                let days: u32 = text
                    .trim()
                    .parse()
                    .map_err(|_| AppError::validation(format!("Invalid expiry_days: {text}")))?;
                draft.set_expiry(ExpiryChoice::try_from(days)?);
            }
            _ => {}
        }
    }

    let link = state.upload_service.generate(draft).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(link))))
}
