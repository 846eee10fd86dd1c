//! Share domain entities.

pub mod files;
pub mod key;
pub mod link;
pub mod model;

pub use files::{FileItem, ShareUrl, format_size_mb};
pub use link::ShareLink;
pub use model::{NewShareRecord, ShareRecord};
