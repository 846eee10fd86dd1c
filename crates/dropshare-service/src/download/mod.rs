//! Download workflow: selection, sinks and sequential fetching.

pub mod selection;
pub mod service;
pub mod sink;

pub use selection::DownloadSelection;
pub use service::{BatchFailure, BatchReport, DownloadService};
pub use sink::{DirectorySink, FileSink};
