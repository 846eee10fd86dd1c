//! # dropshare-core
//!
//! Core crate for DropShare. Contains the backend traits (object storage and
//! record store), configuration schemas, typed identifiers, the expiry
//! choice value type, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DropShare crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
