//! Trading-window and report-window checks, exchange local time
//!
//! The poller is fired by an external scheduler every few minutes; these
//! checks decide whether a given firing should actually poll (inside the
//! configured trading window) and whether it should also send the weekly
//! portfolio report (configured weekday, first minutes of the send hour).

use chrono::{DateTime, FixedOffset, Utc};

use crate::config::{EmailConfig, TradingHoursConfig};
use crate::constants::{REPORT_WINDOW_MINUTES, exchange_offset};

/// Current time in the exchange's local timezone
pub fn exchange_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&exchange_offset())
}

/// The configured trading window
#[derive(Debug, Clone)]
pub struct TradingWindow {
    start_hour: u32,
    end_hour: u32,
    days: Vec<String>,
}

impl TradingWindow {
    /// Build a window from configuration, with optional hour overrides from
    /// the command line
    pub fn new(config: &TradingHoursConfig, start: Option<u32>, end: Option<u32>) -> Self {
        Self {
            start_hour: start.unwrap_or(config.start),
            end_hour: end.unwrap_or(config.end),
            days: config.days.clone(),
        }
    }

    /// Whether `now` falls inside the trading window
    ///
    /// The start hour is inclusive, the end hour exclusive, matching an
    /// exchange that opens on the hour and closes at the top of the end hour.
    pub fn is_open(&self, now: DateTime<FixedOffset>) -> bool {
        use chrono::Timelike;

        let day_name = now.format("%A").to_string();
        self.days.contains(&day_name) && self.start_hour <= now.hour() && now.hour() < self.end_hour
    }

    /// The window's hours for display
    pub fn hours(&self) -> (u32, u32) {
        (self.start_hour, self.end_hour)
    }
}

/// Whether `now` falls inside the weekly report window
///
/// True on the configured weekday, during the first
/// [`REPORT_WINDOW_MINUTES`] minutes of the configured hour — narrow enough
/// that a poller firing every few minutes sends exactly one report per week.
pub fn is_report_time(config: &EmailConfig, now: DateTime<FixedOffset>) -> bool {
    use chrono::Timelike;

    let day_name = now.format("%A").to_string();
    day_name == config.send_on
        && now.hour() == config.send_at_hour
        && now.minute() < REPORT_WINDOW_MINUTES
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn eat_time(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
        exchange_offset()
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .unwrap()
    }

    fn weekday_window() -> TradingWindow {
        TradingWindow::new(&TradingHoursConfig::default(), None, None)
    }

    #[test]
    fn test_open_during_weekday_session() {
        // 2026-08-07 is a Friday
        assert!(weekday_window().is_open(eat_time(2026, 8, 7, 9, 0)));
        assert!(weekday_window().is_open(eat_time(2026, 8, 7, 12, 30)));
        assert!(weekday_window().is_open(eat_time(2026, 8, 7, 16, 59)));
    }

    #[test]
    fn test_closed_at_session_edges() {
        assert!(!weekday_window().is_open(eat_time(2026, 8, 7, 8, 59)));
        assert!(!weekday_window().is_open(eat_time(2026, 8, 7, 17, 0)));
    }

    #[test]
    fn test_closed_on_weekends() {
        // 2026-08-08 is a Saturday
        assert!(!weekday_window().is_open(eat_time(2026, 8, 8, 11, 0)));
        assert!(!weekday_window().is_open(eat_time(2026, 8, 9, 11, 0)));
    }

    #[test]
    fn test_cli_hour_overrides() {
        let window = TradingWindow::new(&TradingHoursConfig::default(), Some(7), Some(20));

        assert!(window.is_open(eat_time(2026, 8, 7, 7, 0)));
        assert!(window.is_open(eat_time(2026, 8, 7, 19, 59)));
        assert!(!window.is_open(eat_time(2026, 8, 7, 20, 0)));
    }

    #[test]
    fn test_report_window() {
        let config = EmailConfig::default();

        // Friday 17:00-17:14 EAT is inside the default window
        assert!(is_report_time(&config, eat_time(2026, 8, 7, 17, 0)));
        assert!(is_report_time(&config, eat_time(2026, 8, 7, 17, 14)));

        assert!(!is_report_time(&config, eat_time(2026, 8, 7, 17, 15)));
        assert!(!is_report_time(&config, eat_time(2026, 8, 7, 16, 5)));
        // Thursday
        assert!(!is_report_time(&config, eat_time(2026, 8, 6, 17, 5)));
    }
}
