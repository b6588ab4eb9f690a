//! Reference-array decoder for the embedded listing payload
//!
//! The source page embeds its entire data model as a single flat,
//! self-referential JSON array: positions hold either literal values or
//! integer indices naming other positions, forming an implicit object graph
//! without nested syntax. This module decodes that array into typed share
//! quotes, tolerating individual malformed entries without aborting the
//! whole batch.
//!
//! ## Architecture
//!
//! The decoder is organized into logical components:
//! - [`store`] - Typed node representation and bounds-checked dereferencing
//! - [`root`] - Locating the listing index array (primary path + fallback scan)
//! - [`record`] - Per-record field resolution and validation
//! - [`decoder`] - Batch orchestration over the located indices
//! - [`stats`] - Decode statistics and skip diagnostics
//!
//! ## Error model
//!
//! Two severities only. Failing to locate the listing array is batch-fatal
//! and surfaces as [`crate::Error::RootNotFound`]. Everything that can go
//! wrong with a single record (dangling reference, wrong shape, missing
//! mandatory field, numeric garbage) is a [`record::SkipReason`] carried in
//! the result's diagnostics; it never aborts the batch and never escapes as
//! a fault.

pub mod decoder;
pub mod record;
pub mod root;
pub mod stats;
pub mod store;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use decoder::PayloadDecoder;
pub use record::{SkipReason, decode_record};
pub use root::RootLocator;
pub use stats::{DecodeResult, DecodeStats, SkipDiagnostic};
pub use store::{FlatStore, Node};
