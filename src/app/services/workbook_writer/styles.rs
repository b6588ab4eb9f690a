//! Cell formats for the market and portfolio sheets
//!
//! One format object per visual role. rust_xlsxwriter attaches exactly one
//! format to a cell, so the alternating-row fill is folded into each role
//! via the `alt` flag instead of being layered on afterwards.

use rust_xlsxwriter::{Color, Format, FormatAlign};

use crate::constants::{
    CHANGE_NUM_FORMAT, PRICE_NUM_FORMAT, SIGNED_PRICE_NUM_FORMAT, VOLUME_NUM_FORMAT, colors,
};

/// Sheet font used everywhere
const FONT_NAME: &str = "Arial";
const FONT_SIZE: f64 = 11.0;

/// Base data format: Arial 11, optionally on the alternating fill
fn base(alt: bool) -> Format {
    let format = Format::new().set_font_name(FONT_NAME).set_font_size(FONT_SIZE);
    if alt {
        format.set_background_color(Color::RGB(colors::LIGHT_GREEN))
    } else {
        format
    }
}

/// Column header: white bold on the brand fill, centered
pub fn header() -> Format {
    Format::new()
        .set_font_name(FONT_NAME)
        .set_font_size(FONT_SIZE)
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(colors::BRAND_GREEN))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

/// Portfolio sheet title banner
pub fn title() -> Format {
    Format::new()
        .set_font_name(FONT_NAME)
        .set_font_size(14.0)
        .set_bold()
        .set_font_color(Color::RGB(colors::BRAND_GREEN))
        .set_background_color(Color::RGB(colors::LIGHT_GREEN))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

/// Portfolio sheet instruction note
pub fn note() -> Format {
    Format::new()
        .set_font_name(FONT_NAME)
        .set_font_size(10.0)
        .set_italic()
        .set_font_color(Color::RGB(colors::NOTE_GREY))
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter)
}

/// Ticker cell: bold brand green
pub fn ticker(alt: bool) -> Format {
    base(alt).set_bold().set_font_color(Color::RGB(colors::BRAND_GREEN))
}

/// Plain text cell
pub fn text(alt: bool) -> Format {
    base(alt)
}

/// Centered row-number cell on the portfolio sheet
pub fn row_number(alt: bool) -> Format {
    base(alt).set_align(FormatAlign::Center)
}

/// Price cell with two-decimal thousands format
pub fn price(alt: bool) -> Format {
    base(alt).set_num_format(PRICE_NUM_FORMAT)
}

/// Change cell: signed percent format, colored by direction
pub fn change(positive: bool, alt: bool) -> Format {
    let color = if positive {
        colors::GAIN_GREEN
    } else {
        colors::LOSS_RED
    };
    base(alt)
        .set_font_color(Color::RGB(color))
        .set_num_format(CHANGE_NUM_FORMAT)
}

/// Volume cell with integer thousands format
pub fn volume(alt: bool) -> Format {
    base(alt).set_num_format(VOLUME_NUM_FORMAT)
}

/// Signed price cell for the gain/loss column
pub fn signed_price(alt: bool) -> Format {
    base(alt).set_num_format(SIGNED_PRICE_NUM_FORMAT)
}

/// Signed percent cell for the gain/loss percent column
pub fn signed_pct(alt: bool) -> Format {
    base(alt).set_num_format(CHANGE_NUM_FORMAT)
}

/// Share-count cell with integer thousands format
pub fn shares(alt: bool) -> Format {
    base(alt).set_num_format(VOLUME_NUM_FORMAT)
}
