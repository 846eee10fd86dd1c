//! Request handlers.

pub mod download;
pub mod health;
pub mod share;
pub mod upload;
