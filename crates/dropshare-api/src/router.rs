//! Route definitions for the DropShare HTTP API.
//!
//! JSON endpoints are mounted under `/api`; the access page is also
//! reachable at the link path itself (`/file/{id}`).

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Request body cap, in multiples of the per-file size limit.
const BODY_LIMIT_FILES: usize = 20;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let per_file = usize::try_from(state.config.storage.max_upload_size_bytes).unwrap_or(usize::MAX);
    let body_limit = per_file.saturating_mul(BODY_LIMIT_FILES);

    let api_routes = Router::new()
        .merge(upload_routes())
        .merge(share_routes())
        .merge(health_routes());

    let link_path = link_route(&state.config.share.link_path_prefix);
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .route(&link_path, get(handlers::share::get_share))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Route pattern for share links, e.g. `/file/{id}`.
fn link_route(prefix: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        "/{id}".to_string()
    } else {
        format!("/{prefix}/{{id}}")
    }
}

/// Upload form and link generation.
fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/upload/options", get(handlers::upload::upload_options))
        .route("/shares", post(handlers::upload::create_share))
}

/// Access page, password gate and downloads.
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/shares/{id}", get(handlers::share::get_share))
        .route("/shares/{id}/unlock", post(handlers::share::unlock_share))
        .route(
            "/shares/{id}/files/{index}",
            get(handlers::download::download_file),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
