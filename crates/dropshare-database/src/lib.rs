//! # dropshare-database
//!
//! PostgreSQL connection pool, embedded migrations and the share record
//! repositories (PostgreSQL and in-memory).

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::{DatabasePool, mask_password};
pub use repositories::{DynShareStore, MemoryShareRepository, PgShareRepository, open_share_store};
