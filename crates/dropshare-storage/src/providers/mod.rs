//! Storage provider implementations.

pub mod local;
pub mod memory;
#[cfg(feature = "s3")]
pub mod s3;

pub use local::LocalStorageProvider;
pub use memory::MemoryStorageProvider;
#[cfg(feature = "s3")]
pub use s3::S3StorageProvider;

use dropshare_core::error::AppError;
use dropshare_core::result::AppResult;

/// Reject keys that are not a single, plain path segment.
pub(crate) fn check_key(key: &str) -> AppResult<()> {
    if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
        return Err(AppError::validation(format!("Invalid object key: {key:?}")));
    }
    Ok(())
}
