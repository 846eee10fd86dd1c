//! Build the configured storage provider.

use std::sync::Arc;

use tracing::info;

use dropshare_core::config::{StorageConfig, StorageProviderKind};
use dropshare_core::result::AppResult;
use dropshare_core::traits::ObjectStorage;

use crate::providers::{LocalStorageProvider, MemoryStorageProvider};

/// Connect to the object storage selected in `config`.
pub async fn connect(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStorage>> {
    let provider: Arc<dyn ObjectStorage> = match config.provider {
        StorageProviderKind::Local => Arc::new(
            LocalStorageProvider::new(
                &config.local.root_path,
                &config.bucket,
                &config.local.public_base_url,
            )
            .await?,
        ),
        StorageProviderKind::Memory => Arc::new(MemoryStorageProvider::new(&config.bucket)),
        StorageProviderKind::S3 => s3_provider(config).await?,
    };

    info!(
        provider = provider.provider_type(),
        bucket = provider.bucket(),
        "Object storage ready"
    );
    Ok(provider)
}

#[cfg(feature = "s3")]
async fn s3_provider(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStorage>> {
    let provider = crate::providers::S3StorageProvider::new(&config.s3, &config.bucket).await?;
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "s3"))]
async fn s3_provider(_config: &StorageConfig) -> AppResult<Arc<dyn ObjectStorage>> {
    Err(dropshare_core::AppError::not_implemented(
        "S3 storage requires building with the `s3` feature",
    ))
}
