//! Market sheet layout and quote rows

use rust_xlsxwriter::Worksheet;

use super::styles;
use crate::Result;
use crate::app::models::Quote;
use crate::constants::{MARKET_COLUMN_WIDTHS, MARKET_HEADERS, MARKET_SHEET_NAME};

/// Write the Market sheet: header row plus one row per quote, in decode
/// order
pub fn write_market_sheet(worksheet: &mut Worksheet, quotes: &[Quote]) -> Result<()> {
    worksheet.set_name(MARKET_SHEET_NAME)?;

    write_headers(worksheet)?;

    for (i, quote) in quotes.iter().enumerate() {
        let row = (i + 1) as u32;
        write_quote_row(worksheet, row, quote)?;
    }

    Ok(())
}

/// Header row, column widths, frozen pane, gridlines
fn write_headers(worksheet: &mut Worksheet) -> Result<()> {
    let header = styles::header();

    for (col, (title, width)) in MARKET_HEADERS
        .iter()
        .zip(MARKET_COLUMN_WIDTHS)
        .enumerate()
    {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *title, &header)?;
        worksheet.set_column_width(col, *width)?;
    }

    worksheet.set_freeze_panes(1, 0)?;
    worksheet.set_screen_gridlines(false);

    Ok(())
}

/// One quote row; sheet-even rows carry the alternating fill
fn write_quote_row(worksheet: &mut Worksheet, row: u32, quote: &Quote) -> Result<()> {
    let alt = (row + 1) % 2 == 0;

    worksheet.write_string_with_format(row, 0, &quote.ticker, &styles::ticker(alt))?;
    worksheet.write_string_with_format(row, 1, &quote.company, &styles::text(alt))?;
    worksheet.write_string_with_format(row, 2, &quote.sector, &styles::text(alt))?;
    worksheet.write_number_with_format(row, 3, quote.price, &styles::price(alt))?;

    // Stored as a fraction so the signed percent number format renders it
    worksheet.write_number_with_format(
        row,
        4,
        quote.change_pct / 100.0,
        &styles::change(quote.is_gainer(), alt),
    )?;

    worksheet.write_number_with_format(row, 5, quote.volume as f64, &styles::volume(alt))?;
    worksheet.write_string_with_format(row, 6, &quote.captured_at, &styles::text(alt))?;

    Ok(())
}
