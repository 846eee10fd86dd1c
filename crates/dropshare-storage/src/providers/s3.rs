//! S3-compatible object storage provider.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream as S3ByteStream;
use bytes::Bytes;
use tracing::{debug, info};

use dropshare_core::config::S3StorageConfig;
use dropshare_core::error::AppError;
use dropshare_core::result::AppResult;
use dropshare_core::traits::storage::ObjectStorage;
use dropshare_entity::share::key::encode_segment;

use super::check_key;

/// Objects in a single S3 (or MinIO, R2, ...) bucket.
#[derive(Debug, Clone)]
pub struct S3StorageProvider {
    client: Client,
    bucket: String,
    public_base: String,
}

impl S3StorageProvider {
    /// Build a client for `bucket` from `config`.
    ///
    /// Empty credentials fall back to the default AWS credential chain.
    pub async fn new(config: &S3StorageConfig, bucket: &str) -> AppResult<Self> {
        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket,
            "Initializing S3 storage provider"
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if !config.access_key.is_empty() {
            loader = loader.credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "dropshare",
            ));
        }
        if !config.endpoint.is_empty() {
            loader = loader.endpoint_url(config.endpoint.clone());
        }
        let shared = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.force_path_style)
            .build();

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: bucket.to_string(),
            public_base: public_base(config, bucket),
        })
    }
}

/// Base URL for object links, bucket included.
fn public_base(config: &S3StorageConfig, bucket: &str) -> String {
    if !config.public_base_url.is_empty() {
        return config.public_base_url.trim_end_matches('/').to_string();
    }
    if !config.endpoint.is_empty() {
        return format!("{}/{bucket}", config.endpoint.trim_end_matches('/'));
    }
    format!("https://{bucket}.s3.{}.amazonaws.com", config.region)
}

#[async_trait]
impl ObjectStorage for S3StorageProvider {
    fn provider_type(&self) -> &str {
        "s3"
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map(|_| true)
            .map_err(|e| AppError::storage(format!("S3 health check failed: {}", DisplayErrorContext(&e))))
    }

    async fn upload(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        check_key(key)?;
        let len = data.len();

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .if_none_match("*")
            .body(S3ByteStream::from(data));
        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        request.send().await.map_err(|e| {
            // 412 from If-None-Match, 409 from a concurrent conditional write
            match e.raw_response().map(|r| r.status().as_u16()) {
                Some(409 | 412) => {
                    AppError::already_exists(format!("The resource already exists: {key}"))
                }
                _ => AppError::storage(format!(
                    "Failed to upload {key}: {}",
                    DisplayErrorContext(&e)
                )),
            }
        })?;

        debug!(key, bytes = len, "Uploaded object to S3");
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, encode_segment(key))
    }

    async fn download(&self, key: &str) -> AppResult<Bytes> {
        check_key(key)?;
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let missing = e
                    .as_service_error()
                    .is_some_and(|service| service.is_no_such_key());
                if missing {
                    AppError::not_found(format!("Object not found: {key}"))
                } else {
                    AppError::storage(format!(
                        "Failed to download {key}: {}",
                        DisplayErrorContext(&e)
                    ))
                }
            })?;

        let body = output.body.collect().await.map_err(|e| {
            AppError::storage(format!("Failed to read object body for {key}: {e}"))
        })?;
        Ok(body.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_base_prefers_explicit_url() {
        let config = S3StorageConfig {
            public_base_url: "https://cdn.example/uploads/".into(),
            endpoint: "http://minio:9000".into(),
            ..Default::default()
        };
        assert_eq!(public_base(&config, "uploads"), "https://cdn.example/uploads");
    }

    #[test]
    fn test_public_base_from_endpoint_or_region() {
        let minio = S3StorageConfig {
            endpoint: "http://minio:9000/".into(),
            ..Default::default()
        };
        assert_eq!(public_base(&minio, "uploads"), "http://minio:9000/uploads");

        let aws = S3StorageConfig::default();
        assert_eq!(
            public_base(&aws, "uploads"),
            "https://uploads.s3.us-east-1.amazonaws.com"
        );
    }
}
