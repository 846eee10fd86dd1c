//! # dropshare-entity
//!
//! Domain entity models for DropShare. [`share::ShareRecord`] is the
//! metadata row the record store persists; everything else in this crate
//! is a value object derived from it or handed back to callers.

pub mod share;
