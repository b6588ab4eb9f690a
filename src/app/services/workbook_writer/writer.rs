//! Workbook assembly and saving

use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::market_sheet::write_market_sheet;
use super::portfolio_sheet::write_portfolio_sheet;
use crate::app::models::Quote;
use crate::config::Position;
use crate::{Error, Result};

/// Statistics for one workbook write
#[derive(Debug, Clone, PartialEq)]
pub struct WriteStats {
    /// Number of quote rows on the Market sheet
    pub quotes_written: usize,
    /// Number of holdings laid out on the portfolio sheet
    pub positions_written: usize,
    /// Where the workbook was saved
    pub path: PathBuf,
}

/// Assemble and save the workbook
///
/// The file is rebuilt from scratch each run; quote rows land in decode
/// order. The parent directory is created when missing.
pub fn write_workbook(
    quotes: &[Quote],
    positions: &[Position],
    path: &Path,
) -> Result<WriteStats> {
    let mut workbook = Workbook::new();

    write_market_sheet(workbook.add_worksheet(), quotes)?;
    write_portfolio_sheet(workbook.add_worksheet(), positions)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::io(
                    format!("failed to create output directory '{}'", parent.display()),
                    e,
                )
            })?;
        }
    }

    workbook.save(path)?;

    info!(
        "Workbook saved: {} ({} quotes, {} holdings)",
        path.display(),
        quotes.len(),
        positions.len()
    );

    Ok(WriteStats {
        quotes_written: quotes.len(),
        positions_written: positions.len(),
        path: path.to_path_buf(),
    })
}
