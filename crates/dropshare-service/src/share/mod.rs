//! Access workflow: link issuance, access gating and expiry notices.

pub mod access;
pub mod link;
pub mod remaining;

pub use access::{AccessPage, AccessService, AccessState};
pub use link::LinkService;
pub use remaining::{expiry_notice, format_remaining};
