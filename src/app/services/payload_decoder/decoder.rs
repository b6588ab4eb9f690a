//! Batch decode orchestration
//!
//! Drives the root locator, iterates the located listing indices in their
//! original order, decodes each record, and collects quotes alongside skip
//! diagnostics. Listing order is preserved end to end so downstream sheet
//! rows stay stable run to run.

use chrono::Utc;
use tracing::{debug, info};

use super::root::RootLocator;
use super::record::decode_record;
use super::stats::{DecodeResult, DecodeStats};
use super::store::FlatStore;
use crate::constants::{CAPTURE_TIMESTAMP_FORMAT, exchange_offset};
use crate::{Error, Result};

/// Batch decoder for the flat listing payload
///
/// The batch timestamp is fixed when the decoder is created and stamped on
/// every quote of the batch, so all rows of one poll share one capture time.
///
/// # Example
///
/// ```rust
/// use soko_tracker::app::services::payload_decoder::{FlatStore, PayloadDecoder};
///
/// # fn example(store: FlatStore) -> soko_tracker::Result<()> {
/// let decoder = PayloadDecoder::new();
/// let result = decoder.decode_all(&store)?;
///
/// println!("Decoded {} quotes, skipped {}",
///          result.stats.decoded,
///          result.stats.skipped);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PayloadDecoder {
    /// Locator for the listing index array
    locator: RootLocator,
    /// Batch capture timestamp, exchange local time
    captured_at: String,
}

impl PayloadDecoder {
    /// Create a decoder with the documented source conventions and a batch
    /// timestamp of now, exchange local time
    pub fn new() -> Self {
        let now = Utc::now().with_timezone(&exchange_offset());
        Self {
            locator: RootLocator::default(),
            captured_at: now.format(CAPTURE_TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Replace the root locator, for synthetic stores in tests
    pub fn with_locator(mut self, locator: RootLocator) -> Self {
        self.locator = locator;
        self
    }

    /// Replace the batch timestamp, for deterministic output in tests
    pub fn with_timestamp(mut self, captured_at: impl Into<String>) -> Self {
        self.captured_at = captured_at.into();
        self
    }

    /// The batch capture timestamp stamped on every decoded quote
    pub fn captured_at(&self) -> &str {
        &self.captured_at
    }

    /// Decode every listed record of the store
    ///
    /// Fails only when no listing index array can be located at all
    /// ([`Error::RootNotFound`]); every per-record problem is converted into
    /// a skip diagnostic and the batch continues. The full result is
    /// returned only after every index has been attempted.
    pub fn decode_all(&self, store: &FlatStore) -> Result<DecodeResult> {
        let indices = self
            .locator
            .locate(store)
            .ok_or_else(|| Error::root_not_found(store.len()))?;

        info!("Found {} listings in page payload", indices.len());

        let mut stats = DecodeStats::new();
        stats.total_indices = indices.len();

        let mut quotes = Vec::with_capacity(indices.len());

        for index in indices {
            match decode_record(store, index, &self.captured_at) {
                Ok(quote) => {
                    quotes.push(quote);
                    stats.decoded += 1;
                }
                Err(reason) => {
                    debug!("Skipping listing index {}: {}", index, reason);
                    stats.record_skip(index, reason);
                }
            }
        }

        info!("{}", stats.summary());
        Ok(DecodeResult::new(quotes, stats))
    }
}

impl Default for PayloadDecoder {
    fn default() -> Self {
        Self::new()
    }
}
