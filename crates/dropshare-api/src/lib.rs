//! # dropshare-api
//!
//! HTTP API layer for DropShare built on Axum.
//!
//! Exposes the upload form, link generation, the access page and gated
//! downloads as JSON endpoints, plus request logging, CORS, compression
//! and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
