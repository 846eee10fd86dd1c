//! Shared value types.

pub mod expiry;
pub mod id;

pub use expiry::ExpiryChoice;
pub use id::ShareId;
