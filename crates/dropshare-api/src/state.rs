//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use dropshare_core::config::AppConfig;
use dropshare_core::traits::ObjectStorage;
use dropshare_database::DynShareStore;
use dropshare_service::upload::UploadPolicy;
use dropshare_service::{AccessService, DownloadService, LinkService, UploadService};

/// Dependencies handed to every handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped so cloning per request is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Object storage holding uploaded bytes.
    pub storage: Arc<dyn ObjectStorage>,
    /// Metadata store holding share records.
    pub store: DynShareStore,
    /// Link generation workflow.
    pub upload_service: Arc<UploadService>,
    /// Link resolution and password gate.
    pub access_service: Arc<AccessService>,
    /// File retrieval.
    pub download_service: Arc<DownloadService>,
}

impl AppState {
    /// Wire the services over the given backends.
    pub fn new(config: AppConfig, storage: Arc<dyn ObjectStorage>, store: DynShareStore) -> Self {
        let links = Arc::new(LinkService::from_config(&config.share));
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&storage),
            Arc::clone(&store),
            links,
            UploadPolicy::from_config(&config.storage, &config.share),
        ));
        let access_service = Arc::new(AccessService::new(Arc::clone(&store)));
        let download_service = Arc::new(DownloadService::new(
            Arc::clone(&storage),
            Duration::from_millis(config.share.batch_download_delay_ms),
        ));

        Self {
            config: Arc::new(config),
            storage,
            store,
            upload_service,
            access_service,
            download_service,
        }
    }
}
