//! Access page handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use validator::Validate;

use dropshare_core::error::AppError;
use dropshare_service::{AccessPage, AccessState};

use crate::dto::request::UnlockRequest;
use crate::dto::response::AccessPageResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Status code for a settled page.
fn page_status(state: &AccessState) -> StatusCode {
    match state {
        AccessState::Granted | AccessState::PasswordRequired { error: None } => StatusCode::OK,
        AccessState::PasswordRequired { error: Some(_) } => StatusCode::UNAUTHORIZED,
        AccessState::NotFound { .. } => StatusCode::NOT_FOUND,
        AccessState::Expired => StatusCode::GONE,
        AccessState::Loading => StatusCode::ACCEPTED,
    }
}

fn render(page: &AccessPage) -> Response {
    let status = page_status(page.state());
    let body = serde_json::json!({
        "success": status.is_success(),
        "data": AccessPageResponse::from_page(page, Utc::now()),
    });
    (status, Json(body)).into_response()
}

/// GET /api/shares/{id} and GET /file/{id}
pub async fn get_share(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let page = state.access_service.open(&id).await;
    render(&page)
}

/// POST /api/shares/{id}/unlock
pub async fn unlock_share(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UnlockRequest>,
) -> Result<Response, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Validation error: {e}")))?;

    let page = state.access_service.unlock(&id, &req.password).await;
    Ok(render(&page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_password_is_unauthorized() {
        assert_eq!(
            page_status(&AccessState::PasswordRequired {
                error: Some("Incorrect password. Please try again.".into())
            }),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            page_status(&AccessState::PasswordRequired { error: None }),
            StatusCode::OK
        );
    }
}
