//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use dropshare_core::config::AppConfig;
use dropshare_core::traits::ObjectStorage;
use dropshare_core::types::ShareId;
use dropshare_database::MemoryShareRepository;
use dropshare_entity::share::ShareRecord;
use dropshare_storage::MemoryStorageProvider;

const BOUNDARY: &str = "dropshare-test-boundary";

/// Test application over in-memory backends
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Object storage behind the router
    pub storage: MemoryStorageProvider,
    /// Record store behind the router
    pub store: MemoryShareRepository,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new test application with the given configuration
    pub fn with_config(config: AppConfig) -> Self {
        let storage = MemoryStorageProvider::new(&config.storage.bucket);
        let store = MemoryShareRepository::new();
        let router = dropshare_api::build_app(
            config.clone(),
            Arc::new(storage.clone()),
            Arc::new(store.clone()),
        );

        Self {
            router,
            storage,
            store,
            config,
        }
    }

    /// Put a record straight into the store, bypassing upload
    pub async fn seed_share(
        &self,
        name: &str,
        data: &[u8],
        password: Option<&str>,
        expiry: DateTime<Utc>,
    ) -> ShareId {
        let key = format!("seed_{name}");
        self.storage
            .upload(&key, Bytes::copy_from_slice(data), None)
            .await
            .expect("Failed to seed object");

        let id = ShareId::generate();
        self.store
            .seed(ShareRecord {
                id,
                name: name.to_string(),
                size: data.len() as i64,
                url: self.storage.public_url(&key),
                password: password.map(String::from),
                expiry,
                created_at: Utc::now(),
            })
            .await;
        id
    }

    /// Make a JSON request to the app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Submit the upload form
    pub async fn upload(
        &self,
        files: &[(&str, &str)],
        password: Option<&str>,
        expiry_days: Option<u32>,
    ) -> TestResponse {
        let mut body = Vec::new();
        for (name, data) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        if let Some(password) = password {
            push_text_field(&mut body, "password", password);
        }
        if let Some(days) = expiry_days {
            push_text_field(&mut body, "expiry_days", &days.to_string());
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/shares")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Download one file, optionally with the share password
    pub async fn download(&self, path: &str, password: Option<&str>) -> TestResponse {
        let mut req = Request::builder().method("GET").uri(path);
        if let Some(password) = password {
            req = req.header(dropshare_api::handlers::download::PASSWORD_HEADER, password);
        }
        let req = req.body(Body::empty()).expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let raw = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            raw,
        }
    }
}

fn push_text_field(body: &mut Vec<u8>, name: &str, value: &str) {
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
        .as_bytes(),
    );
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as JSON, `Null` when not JSON
    pub body: Value,
    /// Response body bytes
    pub raw: Bytes,
}

impl TestResponse {
    /// The `data` object of a wrapped response
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}
