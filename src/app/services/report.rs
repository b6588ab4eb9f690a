//! Weekly portfolio summary and HTML report rendering
//!
//! Joins the configured holdings against the freshly decoded quotes,
//! computes per-position and total gains, and renders the HTML email body.
//! Holdings whose ticker did not decode this run are left out of the report
//! rather than shown with stale numbers.

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::app::models::Quote;
use crate::config::Position;
use crate::constants::{
    REPORT_DATE_FORMAT, REPORT_SENDER_NAME, REPORT_SUBJECT_DATE_FORMAT, colors,
};

// =============================================================================
// Portfolio Summary
// =============================================================================

/// One holding priced against the current batch
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSummary {
    pub ticker: String,
    pub company: String,
    pub shares: f64,
    pub buy_price: f64,
    pub current_price: f64,
    pub invested: f64,
    pub current_value: f64,
    pub gain: f64,
    pub gain_pct: f64,
}

/// All priced holdings plus portfolio totals
#[derive(Debug, Clone, Default)]
pub struct PortfolioSummary {
    pub lines: Vec<PositionSummary>,
    pub total_invested: f64,
    pub total_value: f64,
}

impl PortfolioSummary {
    /// Total gain across all priced holdings, in KES
    pub fn total_gain(&self) -> f64 {
        self.total_value - self.total_invested
    }

    /// Total gain as a percentage of the invested amount
    pub fn total_gain_pct(&self) -> f64 {
        if self.total_invested == 0.0 {
            0.0
        } else {
            self.total_gain() / self.total_invested * 100.0
        }
    }
}

/// Price the configured holdings against the decoded quotes
///
/// Ticker matching is case-insensitive. Positions without a matching quote
/// are skipped with a debug log.
pub fn summarize(positions: &[Position], quotes: &[Quote]) -> PortfolioSummary {
    let mut summary = PortfolioSummary::default();

    for position in positions {
        let wanted = position.ticker.trim().to_uppercase();
        let Some(quote) = quotes.iter().find(|q| q.ticker.to_uppercase() == wanted) else {
            debug!("No quote for portfolio position '{}'", position.ticker);
            continue;
        };

        let invested = position.shares * position.buy_price;
        let current_value = position.shares * quote.price;
        let gain = current_value - invested;
        let gain_pct = if invested == 0.0 {
            0.0
        } else {
            gain / invested * 100.0
        };

        summary.total_invested += invested;
        summary.total_value += current_value;
        summary.lines.push(PositionSummary {
            ticker: quote.ticker.clone(),
            company: if quote.company.is_empty() {
                quote.ticker.clone()
            } else {
                quote.company.clone()
            },
            shares: position.shares,
            buy_price: position.buy_price,
            current_price: quote.price,
            invested,
            current_value,
            gain,
            gain_pct,
        });
    }

    summary
}

// =============================================================================
// HTML Rendering
// =============================================================================

/// Subject line for the report email
pub fn report_subject(now: DateTime<FixedOffset>) -> String {
    format!(
        "{} Weekly Portfolio Report — {}",
        REPORT_SENDER_NAME,
        now.format(REPORT_SUBJECT_DATE_FORMAT)
    )
}

/// Render the weekly report HTML body
pub fn render_html(summary: &PortfolioSummary, now: DateTime<FixedOffset>) -> String {
    let today = now.format(REPORT_DATE_FORMAT);

    let mut rows = String::new();
    for line in &summary.lines {
        let color = gain_color(line.gain);
        let sign = gain_sign(line.gain);
        rows.push_str(&format!(
            r#"
        <tr style="border-bottom:1px solid #eee">
          <td style="padding:8px">{ticker}</td>
          <td style="padding:8px">{company}</td>
          <td style="padding:8px;text-align:right">{shares}</td>
          <td style="padding:8px;text-align:right">KES {buy}</td>
          <td style="padding:8px;text-align:right">KES {price}</td>
          <td style="padding:8px;text-align:right">KES {value}</td>
          <td style="padding:8px;text-align:right;color:{color}">{sign}KES {gain}</td>
          <td style="padding:8px;text-align:right;color:{color}">{sign}{gain_pct:.2}%</td>
        </tr>"#,
            ticker = line.ticker,
            company = line.company,
            shares = format_thousands(line.shares, 0),
            buy = format_thousands(line.buy_price, 2),
            price = format_thousands(line.current_price, 2),
            value = format_thousands(line.current_value, 2),
            color = color,
            sign = sign,
            gain = format_thousands(line.gain.abs(), 2),
            gain_pct = line.gain_pct.abs(),
        ));
    }

    let total_gain = summary.total_gain();
    let total_color = gain_color(total_gain);
    let total_sign = gain_sign(total_gain);

    format!(
        r#"
    <html><body style="font-family:Arial,sans-serif;color:#222;max-width:820px;margin:auto">
      <div style="background:{brand};color:white;padding:20px;border-radius:8px 8px 0 0">
        <h2 style="margin:0">{sender} — Weekly Portfolio Report</h2>
        <p style="margin:4px 0 0">NSE closing prices · {today}</p>
      </div>
      <div style="background:#f9f9f9;padding:16px;border:1px solid #ddd;margin-bottom:16px">
        <table width="100%" cellspacing="8"><tr>
          <td><strong>Total Invested</strong><br>
              <span style="font-size:18px">KES {invested}</span></td>
          <td><strong>Current Value</strong><br>
              <span style="font-size:18px">KES {value}</span></td>
          <td><strong>Total Gain/Loss</strong><br>
              <span style="font-size:18px;color:{total_color}">
                {total_sign}KES {gain} ({total_sign}{gain_pct:.2}%)
              </span>
          </td>
        </tr></table>
      </div>
      <table width="100%" cellspacing="0" style="border-collapse:collapse;font-size:13px">
        <thead><tr style="background:{brand};color:white">
          <th style="padding:8px;text-align:left">Ticker</th>
          <th style="padding:8px;text-align:left">Company</th>
          <th style="padding:8px;text-align:right">Shares</th>
          <th style="padding:8px;text-align:right">Buy Price</th>
          <th style="padding:8px;text-align:right">Current Price</th>
          <th style="padding:8px;text-align:right">Current Value</th>
          <th style="padding:8px;text-align:right">Gain/Loss</th>
          <th style="padding:8px;text-align:right">Gain/Loss %</th>
        </tr></thead>
        <tbody>{rows}</tbody>
      </table>
      <p style="font-size:11px;color:#888;margin-top:16px">
        NSE market data · Generated weekly at market close.
      </p>
    </body></html>"#,
        brand = html_color(colors::BRAND_GREEN),
        sender = REPORT_SENDER_NAME,
        today = today,
        invested = format_thousands(summary.total_invested, 2),
        value = format_thousands(summary.total_value, 2),
        total_color = total_color,
        total_sign = total_sign,
        gain = format_thousands(total_gain.abs(), 2),
        gain_pct = summary.total_gain_pct().abs(),
        rows = rows,
    )
}

/// CSS hex string for a palette color
fn html_color(rgb: u32) -> String {
    format!("#{rgb:06X}")
}

fn gain_color(gain: f64) -> String {
    if gain >= 0.0 {
        html_color(colors::GAIN_GREEN)
    } else {
        html_color(colors::LOSS_RED)
    }
}

fn gain_sign(gain: f64) -> &'static str {
    if gain >= 0.0 { "+" } else { "-" }
}

/// Format a number with comma thousands separators and fixed decimals
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (pos, digit) in int_part.chars().enumerate() {
        if pos > 0 && (int_part.len() - pos) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::exchange_offset;
    use chrono::TimeZone;

    fn quote(ticker: &str, company: &str, price: f64) -> Quote {
        Quote {
            ticker: ticker.to_string(),
            company: company.to_string(),
            sector: "Banking".to_string(),
            price,
            change_pct: 0.0,
            volume: 0,
            captured_at: "2026-08-07 17:00 EAT".to_string(),
        }
    }

    fn position(ticker: &str, shares: f64, buy_price: f64) -> Position {
        Position {
            ticker: ticker.to_string(),
            shares,
            buy_price,
        }
    }

    #[test]
    fn test_summarize_computes_gains() {
        let quotes = vec![quote("ABSA", "Absa Bank", 30.0)];
        let positions = vec![position("absa", 100.0, 25.0)];

        let summary = summarize(&positions, &quotes);

        assert_eq!(summary.lines.len(), 1);
        let line = &summary.lines[0];
        assert_eq!(line.invested, 2500.0);
        assert_eq!(line.current_value, 3000.0);
        assert_eq!(line.gain, 500.0);
        assert_eq!(line.gain_pct, 20.0);
        assert_eq!(summary.total_gain(), 500.0);
        assert_eq!(summary.total_gain_pct(), 20.0);
    }

    #[test]
    fn test_summarize_skips_unpriced_positions() {
        let quotes = vec![quote("ABSA", "Absa Bank", 30.0)];
        let positions = vec![position("ABSA", 10.0, 25.0), position("GONE", 50.0, 8.0)];

        let summary = summarize(&positions, &quotes);

        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.total_invested, 250.0);
    }

    #[test]
    fn test_empty_portfolio_totals() {
        let summary = summarize(&[], &[]);

        assert_eq!(summary.total_gain(), 0.0);
        assert_eq!(summary.total_gain_pct(), 0.0);
    }

    #[test]
    fn test_company_falls_back_to_ticker() {
        let quotes = vec![quote("ABSA", "", 30.0)];
        let positions = vec![position("ABSA", 1.0, 25.0)];

        let summary = summarize(&positions, &quotes);
        assert_eq!(summary.lines[0].company, "ABSA");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0, 2), "0.00");
        assert_eq!(format_thousands(999.5, 2), "999.50");
        assert_eq!(format_thousands(1000.0, 0), "1,000");
        assert_eq!(format_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_thousands(-2500.0, 2), "-2,500.00");
    }

    #[test]
    fn test_render_html_contains_summary() {
        let quotes = vec![quote("ABSA", "Absa Bank", 30.0)];
        let positions = vec![position("ABSA", 100.0, 25.0)];
        let summary = summarize(&positions, &quotes);
        let now = exchange_offset()
            .with_ymd_and_hms(2026, 8, 7, 17, 0, 0)
            .unwrap();

        let html = render_html(&summary, now);

        assert!(html.contains("Weekly Portfolio Report"));
        assert!(html.contains("Absa Bank"));
        assert!(html.contains("KES 3,000.00"));
        assert!(html.contains("+KES 500.00"));
        assert!(html.contains("Friday, 07 August 2026"));
    }

    #[test]
    fn test_loss_renders_with_minus_sign() {
        let quotes = vec![quote("ABSA", "Absa Bank", 20.0)];
        let positions = vec![position("ABSA", 10.0, 25.0)];
        let summary = summarize(&positions, &quotes);
        let now = exchange_offset()
            .with_ymd_and_hms(2026, 8, 7, 17, 0, 0)
            .unwrap();

        let html = render_html(&summary, now);

        assert!(html.contains("-KES 50.00"));
        assert!(html.contains(&format!("#{:06X}", colors::LOSS_RED)));
    }

    #[test]
    fn test_report_subject() {
        let now = exchange_offset()
            .with_ymd_and_hms(2026, 8, 7, 17, 0, 0)
            .unwrap();

        assert_eq!(
            report_subject(now),
            "sokoTracker Weekly Portfolio Report — 07 Aug 2026"
        );
    }
}
