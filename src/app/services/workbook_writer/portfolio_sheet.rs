//! Portfolio sheet layout, holdings, and lookup formulas
//!
//! Holdings come from the configuration; the sheet prices them with
//! `VLOOKUP` formulas against the Market sheet so the workbook stays live
//! when opened after later polls.

use rust_xlsxwriter::Worksheet;

use super::styles;
use crate::Result;
use crate::config::Position;
use crate::constants::{
    MARKET_SHEET_NAME, PORTFOLIO_COLUMN_WIDTHS, PORTFOLIO_HEADERS, PORTFOLIO_ROW_COUNT,
    PORTFOLIO_SHEET_NAME,
};

/// Row index (0-based) of the header row; data rows follow it
const HEADER_ROW: u32 = 2;

/// Write the portfolio sheet: title, note, headers, and numbered holding
/// rows with lookup formulas
pub fn write_portfolio_sheet(worksheet: &mut Worksheet, positions: &[Position]) -> Result<()> {
    worksheet.set_name(PORTFOLIO_SHEET_NAME)?;

    let last_col = (PORTFOLIO_HEADERS.len() - 1) as u16;
    worksheet.merge_range(0, 0, 0, last_col, "My NSE Portfolio", &styles::title())?;
    worksheet.merge_range(
        1,
        0,
        1,
        last_col,
        "Holdings come from the tracker config (portfolio.positions). \
         Columns C and F-I are calculated from the Market sheet.",
        &styles::note(),
    )?;

    let header = styles::header();
    for (col, (title, width)) in PORTFOLIO_HEADERS
        .iter()
        .zip(PORTFOLIO_COLUMN_WIDTHS)
        .enumerate()
    {
        let col = col as u16;
        worksheet.write_string_with_format(HEADER_ROW, col, *title, &header)?;
        worksheet.set_column_width(col, *width)?;
    }

    // At least the template row count, growing with the configured holdings
    let row_count = PORTFOLIO_ROW_COUNT.max(positions.len() as u32);
    for i in 0..row_count {
        let row = HEADER_ROW + 1 + i;
        let alt = (row + 1) % 2 == 0;

        worksheet.write_number_with_format(row, 0, (i + 1) as f64, &styles::row_number(alt))?;

        if let Some(position) = positions.get(i as usize) {
            write_position_row(worksheet, row, alt, position)?;
        }
    }

    worksheet.set_freeze_panes(HEADER_ROW + 1, 0)?;
    worksheet.set_screen_gridlines(false);

    Ok(())
}

/// One holding: entered values in B, D, E and lookup formulas in C, F-I
fn write_position_row(
    worksheet: &mut Worksheet,
    row: u32,
    alt: bool,
    position: &Position,
) -> Result<()> {
    // Excel rows are 1-based in formulas
    let n = row + 1;

    worksheet.write_string_with_format(
        row,
        1,
        position.ticker.trim().to_uppercase(),
        &styles::ticker(alt),
    )?;
    worksheet.write_formula_with_format(
        row,
        2,
        format!("=IFERROR(VLOOKUP(B{n},{MARKET_SHEET_NAME}!A:B,2,0),\"\")").as_str(),
        &styles::text(alt),
    )?;
    worksheet.write_number_with_format(row, 3, position.shares, &styles::shares(alt))?;
    worksheet.write_number_with_format(row, 4, position.buy_price, &styles::price(alt))?;
    worksheet.write_formula_with_format(
        row,
        5,
        format!("=IFERROR(VLOOKUP(B{n},{MARKET_SHEET_NAME}!A:D,4,0),\"\")").as_str(),
        &styles::price(alt),
    )?;
    worksheet.write_formula_with_format(
        row,
        6,
        format!("=IFERROR(D{n}*F{n},\"\")").as_str(),
        &styles::price(alt),
    )?;
    worksheet.write_formula_with_format(
        row,
        7,
        format!("=IFERROR((F{n}-E{n})*D{n},\"\")").as_str(),
        &styles::signed_price(alt),
    )?;
    worksheet.write_formula_with_format(
        row,
        8,
        format!("=IFERROR((F{n}-E{n})/E{n},\"\")").as_str(),
        &styles::signed_pct(alt),
    )?;

    Ok(())
}
