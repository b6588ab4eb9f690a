//! Decode statistics and result structures
//!
//! This module provides types for tracking decode outcomes, per-record skip
//! diagnostics, and organizing decoded quotes for downstream output.

use super::record::SkipReason;
use crate::app::models::Quote;

/// One skipped record: the raw listing index and why it was dropped
#[derive(Debug, Clone, PartialEq)]
pub struct SkipDiagnostic {
    /// Raw index value as stored in the listing array
    pub index: i64,
    /// Why the record was skipped
    pub reason: SkipReason,
}

/// Statistics for one batch decode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeStats {
    /// Number of listing indices located in the payload
    pub total_indices: usize,
    /// Number of quotes successfully decoded
    pub decoded: usize,
    /// Number of records skipped
    pub skipped: usize,
    /// One diagnostic per skipped record, in encounter order
    pub skips: Vec<SkipDiagnostic>,
}

impl DecodeStats {
    /// Create new empty decode statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped index with its reason
    pub fn record_skip(&mut self, index: i64, reason: SkipReason) {
        self.skipped += 1;
        self.skips.push(SkipDiagnostic { index, reason });
    }

    /// Calculate decode success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_indices == 0 {
            100.0
        } else {
            (self.decoded as f64 / self.total_indices as f64) * 100.0
        }
    }

    /// Get summary of decode statistics for logging
    pub fn summary(&self) -> String {
        format!(
            "Decode summary: {} indices -> {} quotes ({:.1}% success) | Skipped: {}",
            self.total_indices,
            self.decoded,
            self.success_rate(),
            self.skipped
        )
    }
}

/// Result of one batch decode
#[derive(Debug, Clone)]
pub struct DecodeResult {
    /// Successfully decoded quotes, in listing order
    pub quotes: Vec<Quote>,
    /// Decode statistics and skip diagnostics
    pub stats: DecodeStats,
}

impl DecodeResult {
    /// Create a new decode result
    pub fn new(quotes: Vec<Quote>, stats: DecodeStats) -> Self {
        Self { quotes, stats }
    }

    /// Number of decoded quotes
    pub fn quote_count(&self) -> usize {
        self.quotes.len()
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        self.stats.summary()
    }
}
