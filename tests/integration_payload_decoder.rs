//! Integration tests for the extract/decode path over full page markup
//!
//! These tests exercise the same path a live poll takes: raw HTML in,
//! validated quotes out.

use anyhow::Result;

use soko_tracker::app::services::payload_decoder::{PayloadDecoder, SkipReason};
use soko_tracker::app::services::payload_extractor::extract_store;

/// Wrap a payload array in realistic page markup
fn page_with_payload(payload: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Market Statistics</title>\
         <meta charset=\"utf-8\"></head><body>\
         <div id=\"__nuxt\"><div class=\"market-table\"></div></div>\
         <script id=\"__NUXT_DATA__\" type=\"application/json\">{payload}</script>\
         <script src=\"/_nuxt/entry.js\"></script>\
         </body></html>"
    )
}

/// The reference payload: envelope at position 4, one-entry listing, one
/// well-formed record
const REFERENCE_PAYLOAD: &str = r#"[null, null, null, null,
    {"data": 5},
    [6],
    {"symbol": 7, "close": 8, "previous_price": 9, "volume": 10,
     "company_name": 11, "sector": 12},
    "ABSA", 29.5, 29.0, 1000000, "Absa Bank",
    {"name": 13},
    "Banking"]"#;

#[test]
fn test_reference_page_decodes_to_one_quote() -> Result<()> {
    let html = page_with_payload(REFERENCE_PAYLOAD);

    let store = extract_store(&html)?;
    let decoder = PayloadDecoder::new().with_timestamp("2026-08-07 11:30 EAT");
    let result = decoder.decode_all(&store)?;

    assert_eq!(result.quote_count(), 1);

    let quote = &result.quotes[0];
    assert_eq!(quote.ticker, "ABSA");
    assert_eq!(quote.company, "Absa Bank");
    assert_eq!(quote.sector, "Banking");
    assert_eq!(quote.price, 29.5);
    assert_eq!(quote.change_pct, 1.72);
    assert_eq!(quote.volume, 1_000_000);
    assert_eq!(quote.captured_at, "2026-08-07 11:30 EAT");

    Ok(())
}

#[test]
fn test_mixed_quality_page_keeps_good_records() -> Result<()> {
    // Three listings: a good record, one whose price is garbage, one whose
    // index dangles
    let payload = r#"[null, null, null, null,
        {"data": 5},
        [6, 10, 9999],
        {"symbol": 7, "close": 8},
        "SCOM", 14.2,
        "unused",
        {"symbol": 11, "close": 12},
        "KQ", "suspended"]"#;

    let html = page_with_payload(payload);
    let store = extract_store(&html)?;
    let result = PayloadDecoder::new()
        .with_timestamp("2026-08-07 11:30 EAT")
        .decode_all(&store)?;

    assert_eq!(result.quote_count(), 1);
    assert_eq!(result.quotes[0].ticker, "SCOM");

    assert_eq!(result.stats.skipped, 2);
    assert_eq!(result.stats.skips[0].index, 10);
    assert_eq!(result.stats.skips[0].reason, SkipReason::MissingPrice);
    assert_eq!(result.stats.skips[1].index, 9999);
    assert_eq!(result.stats.skips[1].reason, SkipReason::IndexOutOfRange);

    Ok(())
}

#[test]
fn test_listing_order_is_preserved() -> Result<()> {
    // Listing deliberately references records in non-store order
    let payload = r#"[null, null, null, null,
        {"data": 5},
        [9, 6],
        {"symbol": 7, "close": 8},
        "AAAA", 10.0,
        {"symbol": 10, "close": 11},
        "ZZZZ", 20.0]"#;

    let html = page_with_payload(payload);
    let store = extract_store(&html)?;
    let result = PayloadDecoder::new()
        .with_timestamp("2026-08-07 11:30 EAT")
        .decode_all(&store)?;

    let tickers: Vec<&str> = result.quotes.iter().map(|q| q.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["ZZZZ", "AAAA"]);

    Ok(())
}

#[test]
fn test_page_without_payload_tag_fails() {
    let html = "<html><body><p>maintenance</p></body></html>";

    assert!(extract_store(html).is_err());
}

#[test]
fn test_page_without_listing_array_is_batch_fatal() -> Result<()> {
    let html = page_with_payload(r#"[null, null, null, null, {"status": 5}, 200]"#);
    let store = extract_store(&html)?;

    let error = PayloadDecoder::new().decode_all(&store).unwrap_err();
    assert!(matches!(
        error,
        soko_tracker::Error::RootNotFound { .. }
    ));

    Ok(())
}

#[test]
fn test_fallback_scan_handles_envelope_drift() -> Result<()> {
    // The envelope moved away from position 4; the fallback scan must find
    // the listing by shape. Build 30 records so the listing qualifies.
    let mut nodes = vec!["null".to_string(); 5];

    let record_base = |i: usize| 6 + i * 3;
    let listing: Vec<String> = (0..30).map(|i| record_base(i).to_string()).collect();
    nodes.push(format!("[{}]", listing.join(", ")));

    for i in 0..30 {
        let base = record_base(i);
        nodes.push(format!(
            "{{\"symbol\": {}, \"close\": {}}}",
            base + 1,
            base + 2
        ));
        nodes.push(format!("\"TKR{i:02}\""));
        nodes.push(format!("{}.5", 10 + i));
    }

    let payload = format!("[{}]", nodes.join(", "));
    let html = page_with_payload(&payload);

    let store = extract_store(&html)?;
    let result = PayloadDecoder::new()
        .with_timestamp("2026-08-07 11:30 EAT")
        .decode_all(&store)?;

    assert_eq!(result.quote_count(), 30);
    assert_eq!(result.quotes[0].ticker, "TKR00");
    assert_eq!(result.quotes[29].ticker, "TKR29");

    Ok(())
}
