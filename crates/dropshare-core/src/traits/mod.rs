//! Core traits defined in `dropshare-core` and implemented by other crates.

pub mod storage;
pub mod store;

pub use storage::{ByteStream, ObjectStorage};
pub use store::RecordStore;
