//! Data models for the soko tracker
//!
//! This module contains the core data structure for a decoded share quote,
//! the output unit of the payload decoder.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Quote Structure
// =============================================================================

/// One decoded share quote: a tradable instrument's snapshot for this batch
///
/// Quotes carry no identity beyond the ticker within one batch; duplicate
/// tickers are passed through uninterpreted. Ordering of quotes follows the
/// source payload and defines row order in every downstream output.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Quote {
    /// Ticker symbol, trimmed, never empty (e.g. "ABSA", "SCOM")
    pub ticker: String,

    /// Full company name, empty when the payload omits it
    pub company: String,

    /// Sector display name, empty when the sector sub-object is absent or
    /// malformed
    pub sector: String,

    /// Latest traded price in KES
    pub price: f64,

    /// Change against the previous session's close, in percent, rounded to
    /// two decimals; 0.0 when no usable previous price exists
    pub change_pct: f64,

    /// Shares traded this session; 0 when absent or non-numeric
    pub volume: i64,

    /// Batch capture timestamp, identical for every quote of one decode
    pub captured_at: String,
}

impl Quote {
    /// Create a new Quote with validation
    pub fn new(
        ticker: String,
        company: String,
        sector: String,
        price: f64,
        change_pct: f64,
        volume: i64,
        captured_at: String,
    ) -> Result<Self> {
        let quote = Self {
            ticker,
            company,
            sector,
            price,
            change_pct,
            volume,
            captured_at,
        };

        quote.validate()?;
        Ok(quote)
    }

    /// Validate quote data for consistency and valid ranges
    pub fn validate(&self) -> Result<()> {
        if self.ticker.trim().is_empty() {
            return Err(Error::data_validation("Ticker cannot be empty"));
        }

        if self.ticker != self.ticker.trim() {
            return Err(Error::data_validation(format!(
                "Ticker '{}' carries surrounding whitespace",
                self.ticker
            )));
        }

        if !self.price.is_finite() {
            return Err(Error::data_validation(format!(
                "Price for '{}' is not a finite number",
                self.ticker
            )));
        }

        if !self.change_pct.is_finite() {
            return Err(Error::data_validation(format!(
                "Change percentage for '{}' is not a finite number",
                self.ticker
            )));
        }

        Ok(())
    }

    /// Whether the quote closed at or above the previous session
    pub fn is_gainer(&self) -> bool {
        self.change_pct >= 0.0
    }
}
