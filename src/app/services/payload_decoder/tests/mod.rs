//! Tests for the payload decoder module
//!
//! This module provides unit tests for all decoder components plus shared
//! fixtures for building synthetic payload stores.

pub mod store_tests;

// Test helper functions and fixtures
use serde_json::{Value, json};

use super::store::FlatStore;

/// Build a store from a JSON array literal
pub fn store_from_json(value: Value) -> FlatStore {
    let values = value
        .as_array()
        .expect("test payload must be a JSON array")
        .clone();
    FlatStore::from_values(&values)
}

/// The reference payload: four placeholder positions, the response envelope
/// at position 4, a one-entry listing at position 5, and a single
/// well-formed record
pub fn reference_payload() -> Value {
    json!([
        null,
        null,
        null,
        null,
        { "data": 5 },
        [6],
        {
            "symbol": 7,
            "close": 8,
            "previous_price": 9,
            "volume": 10,
            "company_name": 11,
            "sector": 12
        },
        "ABSA",
        29.5,
        29.0,
        1_000_000,
        "Absa Bank",
        { "name": 13 },
        "Banking"
    ])
}

/// Store built from [`reference_payload`]
pub fn reference_store() -> FlatStore {
    store_from_json(reference_payload())
}

/// Build a payload carrying `count` well-formed records
///
/// Layout: positions 0-3 are placeholders, position 4 holds the response
/// envelope (or null when `with_envelope` is false, forcing the fallback
/// scan), position 5 holds the listing array, and each record occupies
/// eight consecutive positions from 6 on.
pub fn market_payload(count: usize, with_envelope: bool) -> Value {
    let mut nodes: Vec<Value> = vec![Value::Null; 4];

    nodes.push(if with_envelope {
        json!({ "data": 5 })
    } else {
        Value::Null
    });

    let record_base = |i: usize| 6 + i * 8;
    let listing: Vec<usize> = (0..count).map(record_base).collect();
    nodes.push(json!(listing));

    for i in 0..count {
        let base = record_base(i);
        nodes.push(json!({
            "symbol": base + 1,
            "close": base + 2,
            "previous_price": base + 3,
            "volume": base + 4,
            "company_name": base + 5,
            "sector": base + 6
        }));
        nodes.push(json!(format!("TKR{i:02}")));
        nodes.push(json!(10.0 + i as f64));
        nodes.push(json!(10.0));
        nodes.push(json!(5_000 + i as i64));
        nodes.push(json!(format!("Company {i}")));
        nodes.push(json!({ "name": base + 7 }));
        nodes.push(json!("Banking"));
    }

    Value::Array(nodes)
}
