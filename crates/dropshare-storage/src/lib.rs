//! # dropshare-storage
//!
//! Object storage provider implementations for DropShare. Supports the
//! local filesystem, S3-compatible object stores (feature `s3`) and an
//! in-memory store for development and tests.

pub mod factory;
pub mod providers;

pub use factory::connect;
pub use providers::{LocalStorageProvider, MemoryStorageProvider};
