//! Application constants for the soko tracker
//!
//! This module contains the payload-format conventions, default values,
//! and layout constants used throughout the application.

use chrono::FixedOffset;

// =============================================================================
// Payload Format Conventions
// =============================================================================

/// Id of the script tag carrying the server-rendered payload
pub const PAYLOAD_TAG_ID: &str = "__NUXT_DATA__";

/// Well-known position of the response envelope inside the flat payload array
///
/// The source serializes its response envelope (`{"status": _, "message": _,
/// "data": _}`) at this position. Not guaranteed stable across deployments,
/// which is why the root locator carries a fallback scan.
pub const WELL_KNOWN_ROOT_POSITION: usize = 4;

/// Field of the response envelope that references the listing index array
pub const ROOT_DATA_FIELD: &str = "data";

/// Minimum length for a list to qualify as the listing index array during
/// the fallback scan
pub const FALLBACK_MIN_LIST_LEN: usize = 30;

/// Field names of a serialized listing record
pub mod fields {
    /// Ticker symbol (required)
    pub const SYMBOL: &str = "symbol";

    /// Full company name (optional)
    pub const COMPANY_NAME: &str = "company_name";

    /// Latest traded price (required)
    pub const CLOSE: &str = "close";

    /// Previous session's closing price (optional, drives the change column)
    pub const PREVIOUS_PRICE: &str = "previous_price";

    /// Shares traded this session (optional)
    pub const VOLUME: &str = "volume";

    /// Reference to the sector sub-object (optional)
    pub const SECTOR: &str = "sector";

    /// Display name field inside the sector sub-object
    pub const SECTOR_NAME: &str = "name";
}

// =============================================================================
// HTTP Fetch Configuration
// =============================================================================

/// Fixed timeout for the single page fetch, in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Browser-like user agent; the source serves the SSR payload to browsers
pub const HTTP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0.0.0 Safari/537.36";

/// Accept header sent with the page fetch
pub const HTTP_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Accept-Language header sent with the page fetch
pub const HTTP_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

// =============================================================================
// Exchange Time and Scheduling Defaults
// =============================================================================

/// Exchange local time offset from UTC in hours (East Africa Time)
pub const EXCHANGE_UTC_OFFSET_HOURS: i32 = 3;

/// Format of the batch capture timestamp written to every quote
pub const CAPTURE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M EAT";

/// Long date format used in the portfolio report header
pub const REPORT_DATE_FORMAT: &str = "%A, %d %B %Y";

/// Short date format used in the report email subject
pub const REPORT_SUBJECT_DATE_FORMAT: &str = "%d %b %Y";

/// Default trading window, exchange local hours
pub const DEFAULT_TRADING_START_HOUR: u32 = 9;
pub const DEFAULT_TRADING_END_HOUR: u32 = 17;

/// Default trading days
pub const DEFAULT_TRADING_DAYS: &[&str] =
    &["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// All day names accepted by the configuration
pub const DAY_NAMES: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Default weekday and hour for the portfolio report email
pub const DEFAULT_REPORT_DAY: &str = "Friday";
pub const DEFAULT_REPORT_HOUR: u32 = 17;

/// The report fires only in the first minutes of the send hour, so a poller
/// triggered every few minutes sends exactly one report per week
pub const REPORT_WINDOW_MINUTES: u32 = 15;

// =============================================================================
// Workbook Layout
// =============================================================================

/// Default output workbook filename
pub const DEFAULT_WORKBOOK_FILENAME: &str = "stock_prices.xlsx";

/// Sheet names
pub const MARKET_SHEET_NAME: &str = "Market";
pub const PORTFOLIO_SHEET_NAME: &str = "My Portfolio";

/// Market sheet column headers and widths, in column order
pub const MARKET_HEADERS: &[&str] = &[
    "Ticker",
    "Company",
    "Sector",
    "Price (KES)",
    "Change (%)",
    "Volume",
    "Last Updated",
];
pub const MARKET_COLUMN_WIDTHS: &[f64] = &[10.0, 28.0, 22.0, 14.0, 12.0, 14.0, 22.0];

/// Portfolio sheet column headers and widths, in column order
pub const PORTFOLIO_HEADERS: &[&str] = &[
    "#",
    "Ticker",
    "Company",
    "Shares Owned",
    "Buy Price (KES)",
    "Current Price (KES)",
    "Current Value (KES)",
    "Gain/Loss (KES)",
    "Gain/Loss (%)",
];
pub const PORTFOLIO_COLUMN_WIDTHS: &[f64] =
    &[5.0, 10.0, 28.0, 14.0, 15.0, 18.0, 18.0, 18.0, 14.0];

/// Number of numbered rows laid out on the portfolio sheet
pub const PORTFOLIO_ROW_COUNT: u32 = 20;

/// Workbook color palette
pub mod colors {
    /// Header fill and ticker font
    pub const BRAND_GREEN: u32 = 0x006633;

    /// Alternating row fill
    pub const LIGHT_GREEN: u32 = 0xE8F5E9;

    /// Positive change font
    pub const GAIN_GREEN: u32 = 0x1B5E20;

    /// Negative change font
    pub const LOSS_RED: u32 = 0xB71C1C;

    /// Instruction note font
    pub const NOTE_GREY: u32 = 0x555555;
}

/// Number formats applied to market and portfolio cells
pub const PRICE_NUM_FORMAT: &str = "#,##0.00";
pub const CHANGE_NUM_FORMAT: &str = "+0.00%;-0.00%";
pub const VOLUME_NUM_FORMAT: &str = "#,##0";
pub const SIGNED_PRICE_NUM_FORMAT: &str = "+#,##0.00;-#,##0.00";

// =============================================================================
// Email Delivery
// =============================================================================

/// Default SMTP relay
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Environment variables carrying delivery secrets
pub const ENV_SENDER_ADDRESS: &str = "GMAIL_ADDRESS";
pub const ENV_SENDER_PASSWORD: &str = "GMAIL_APP_PASS";
pub const ENV_NOTIFY_ADDRESS: &str = "NOTIFY_EMAIL";

/// Display name used in the From header and report masthead
pub const REPORT_SENDER_NAME: &str = "sokoTracker";

// =============================================================================
// Helper Functions
// =============================================================================

/// Fixed offset of the exchange's local timezone
pub fn exchange_offset() -> FixedOffset {
    FixedOffset::east_opt(EXCHANGE_UTC_OFFSET_HOURS * 3600)
        .expect("exchange offset is within chrono's valid range")
}

/// Check whether a configured day name is one of the seven weekday names
pub fn is_valid_day_name(name: &str) -> bool {
    DAY_NAMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_offset_is_three_hours_east() {
        assert_eq!(exchange_offset().local_minus_utc(), 3 * 3600);
    }

    #[test]
    fn test_day_name_validation() {
        assert!(is_valid_day_name("Monday"));
        assert!(is_valid_day_name("Sunday"));
        assert!(!is_valid_day_name("monday"));
        assert!(!is_valid_day_name("Weekday"));
        assert!(!is_valid_day_name(""));
    }

    #[test]
    fn test_market_layout_is_consistent() {
        assert_eq!(MARKET_HEADERS.len(), MARKET_COLUMN_WIDTHS.len());
        assert_eq!(PORTFOLIO_HEADERS.len(), PORTFOLIO_COLUMN_WIDTHS.len());
    }
}
