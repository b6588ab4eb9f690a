//! Per-record decoding from the flat store into a validated quote
//!
//! Each listing index names a mapping node whose fields are resolved through
//! the store one hop at a time. A record that cannot produce its mandatory
//! fields is skipped with a reason; nothing here raises past the decode of a
//! single record.

use std::fmt;

use super::store::{FlatStore, Node};
use crate::app::models::Quote;
use crate::constants::fields;

/// Why one record was dropped from the batch
///
/// Skips are first-class return values, not caught faults: the orchestrator
/// collects them as diagnostics and carries on with the next index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The listing index does not name a node in the store
    IndexOutOfRange,
    /// The referenced node is not a mapping
    NotAMapping,
    /// The ticker field is absent, not a string, or empty after trimming
    MissingTicker,
    /// The price field is absent or non-numeric
    MissingPrice,
    /// The decoded fields failed quote validation
    InvalidQuote(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::IndexOutOfRange => write!(f, "index out of range"),
            SkipReason::NotAMapping => write!(f, "not a mapping"),
            SkipReason::MissingTicker => write!(f, "missing or empty ticker"),
            SkipReason::MissingPrice => write!(f, "missing or non-numeric price"),
            SkipReason::InvalidQuote(detail) => write!(f, "invalid quote: {detail}"),
        }
    }
}

/// Decode the record at `record_index` into a quote
///
/// `captured_at` is the batch timestamp, fixed once per decode by the
/// orchestrator and stamped on every quote.
pub fn decode_record(
    store: &FlatStore,
    record_index: i64,
    captured_at: &str,
) -> Result<Quote, SkipReason> {
    let record = usize::try_from(record_index)
        .ok()
        .and_then(|index| store.get(index))
        .ok_or(SkipReason::IndexOutOfRange)?;

    if !record.is_map() {
        return Err(SkipReason::NotAMapping);
    }

    let ticker = store
        .resolve(record, fields::SYMBOL)
        .and_then(Node::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(SkipReason::MissingTicker)?
        .to_string();

    let price = store
        .resolve(record, fields::CLOSE)
        .and_then(Node::as_f64)
        .ok_or(SkipReason::MissingPrice)?;

    let company = store
        .resolve(record, fields::COMPANY_NAME)
        .and_then(Node::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let previous = store
        .resolve(record, fields::PREVIOUS_PRICE)
        .and_then(Node::as_f64);

    // The source's volume is only trusted when serialized as a number;
    // string volumes collapse to zero rather than being parsed.
    let volume = match store.resolve(record, fields::VOLUME) {
        Some(Node::Int(i)) => *i,
        Some(Node::Float(f)) => *f as i64,
        _ => 0,
    };

    let sector = resolve_sector_name(store, record);
    let change_pct = compute_change_pct(price, previous);

    Quote::new(
        ticker,
        company,
        sector,
        price,
        change_pct,
        volume,
        captured_at.to_string(),
    )
    .map_err(|e| SkipReason::InvalidQuote(e.to_string()))
}

/// Resolve the sector display name through two hops: record -> sector
/// sub-object -> name leaf
///
/// Any failure along the way (absent field, dangling reference, sub-object
/// that is not a mapping, missing name) yields an empty string, never a
/// decode failure.
fn resolve_sector_name(store: &FlatStore, record: &Node) -> String {
    let Some(sector) = store.resolve(record, fields::SECTOR) else {
        return String::new();
    };

    match store.resolve(sector, fields::SECTOR_NAME) {
        Some(Node::Str(name)) => name.clone(),
        Some(Node::Int(i)) => i.to_string(),
        Some(Node::Float(f)) => f.to_string(),
        _ => String::new(),
    }
}

/// Percentage change against the previous close, rounded to two decimals
///
/// Guards the division: an absent, non-numeric, zero, or non-finite previous
/// price yields 0.0.
fn compute_change_pct(current: f64, previous: Option<f64>) -> f64 {
    match previous {
        Some(prev) if prev != 0.0 && prev.is_finite() => {
            round_two(((current - prev) / prev) * 100.0)
        }
        _ => 0.0,
    }
}

/// Round to two decimal places
fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
