//! Tests for the workbook writer module


// Test fixtures
use crate::app::models::Quote;
use crate::config::Position;

/// Create a test quote with the given ticker and price
pub fn create_test_quote(ticker: &str, price: f64, change_pct: f64) -> Quote {
    Quote {
        ticker: ticker.to_string(),
        company: format!("{ticker} Ltd"),
        sector: "Banking".to_string(),
        price,
        change_pct,
        volume: 150_000,
        captured_at: "2026-08-07 11:30 EAT".to_string(),
    }
}

/// Create a test portfolio position
pub fn create_test_position(ticker: &str, shares: f64, buy_price: f64) -> Position {
    Position {
        ticker: ticker.to_string(),
        shares,
        buy_price,
    }
}
