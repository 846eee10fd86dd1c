//! Upload workflow: draft selection, progress and link generation.

pub mod draft;
pub mod progress;
pub mod service;

pub use draft::{PendingFile, UploadDraft};
pub use progress::UploadProgress;
pub use service::{UploadFailure, UploadPolicy, UploadService};
