//! # dropshare-service
//!
//! The two DropShare workflows. [`UploadService`] turns a draft selection
//! of files into a stored share and an issued link; [`AccessService`] and
//! [`DownloadService`] resolve a link, gate it on expiry and password and
//! hand the files to a sink.
//!
//! Services follow constructor injection: backends arrive as `Arc` trait
//! objects at construction time.

pub mod download;
pub mod share;
pub mod upload;

pub use download::{BatchReport, DirectorySink, DownloadSelection, DownloadService, FileSink};
pub use share::{AccessPage, AccessService, AccessState, LinkService};
pub use upload::{
    PendingFile, UploadDraft, UploadFailure, UploadPolicy, UploadProgress, UploadService,
};
