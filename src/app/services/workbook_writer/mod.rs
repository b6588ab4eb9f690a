//! Styled Excel workbook output
//!
//! Writes the decoded batch into a two-sheet workbook: a `Market` sheet with
//! one row per quote, and a portfolio sheet whose holdings are priced by
//! spreadsheet formulas looking quotes up from the Market sheet. The
//! workbook is regenerated from scratch every run; nothing is read back.
//!
//! ## Architecture
//!
//! - [`styles`] - Named cell formats (fills, fonts, number formats)
//! - [`market_sheet`] - Market sheet layout and quote rows
//! - [`portfolio_sheet`] - Portfolio sheet layout, holdings, and formulas
//! - [`writer`] - Workbook assembly and saving

pub mod market_sheet;
pub mod portfolio_sheet;
pub mod styles;
pub mod writer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use writer::{WriteStats, write_workbook};
