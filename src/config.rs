//! Configuration management and validation
//!
//! Provides the JSON-backed configuration for the tracker: source URL,
//! trading window, report schedule, workbook output, and portfolio
//! holdings. Every section has working defaults so a missing or partial
//! config file degrades gracefully.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{
    DEFAULT_REPORT_DAY, DEFAULT_REPORT_HOUR, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT,
    DEFAULT_TRADING_DAYS, DEFAULT_TRADING_END_HOUR, DEFAULT_TRADING_START_HOUR,
    DEFAULT_WORKBOOK_FILENAME, HTTP_TIMEOUT_SECS, is_valid_day_name,
};
use crate::{Error, Result};

/// Data source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL of the exchange listings page
    pub url: String,

    /// Fetch timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: "https://example.com/nse-data".to_string(),
            timeout_secs: HTTP_TIMEOUT_SECS,
        }
    }
}

/// Trading window settings, exchange local time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingHoursConfig {
    /// First polling hour (inclusive)
    pub start: u32,

    /// Last polling hour (exclusive)
    pub end: u32,

    /// Weekday names on which the exchange trades
    pub days: Vec<String>,
}

impl Default for TradingHoursConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_TRADING_START_HOUR,
            end: DEFAULT_TRADING_END_HOUR,
            days: DEFAULT_TRADING_DAYS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Weekly report schedule and SMTP relay settings
///
/// Credentials are deliberately not part of the config file; they come from
/// environment variables so the file can be committed without secrets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Weekday on which the report is sent
    pub send_on: String,

    /// Exchange local hour at which the report is sent
    pub send_at_hour: u32,

    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP relay port (STARTTLS)
    pub smtp_port: u16,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            send_on: DEFAULT_REPORT_DAY.to_string(),
            send_at_hour: DEFAULT_REPORT_HOUR,
            smtp_host: DEFAULT_SMTP_HOST.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the generated workbook
    pub workbook_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            workbook_path: PathBuf::from(DEFAULT_WORKBOOK_FILENAME),
        }
    }
}

/// One portfolio holding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Ticker symbol, matched case-insensitively against decoded quotes
    pub ticker: String,

    /// Number of shares held
    pub shares: f64,

    /// Purchase price per share in KES
    pub buy_price: f64,
}

/// Portfolio holdings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Holdings listed on the portfolio sheet and in the weekly report
    pub positions: Vec<Position>,
}

/// Global tracker configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub trading_hours: TradingHoursConfig,
    pub email: EmailConfig,
    pub output: OutputConfig,
    pub portfolio: PortfolioConfig,
}

impl Config {
    /// Default config file location under the platform config directory
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("soko-tracker").join("config.json"))
            .ok_or_else(|| Error::configuration("could not determine platform config directory"))
    }

    /// Load configuration with a layered approach
    ///
    /// An explicitly given file must exist and parse. Without one, the
    /// default location is used when present, and built-in defaults
    /// otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_config_path()?;
                if default_path.exists() {
                    debug!("Loading config from {}", default_path.display());
                    Self::from_file(&default_path)
                } else {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("failed to read config '{}': {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&text).map_err(|e| {
            Error::configuration(format!(
                "failed to parse config '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(config)
    }

    /// Validate the configuration for consistency and valid ranges
    pub fn validate(&self) -> Result<()> {
        if self.source.url.trim().is_empty() {
            return Err(Error::configuration("source.url cannot be empty"));
        }

        if !self.source.url.starts_with("http://") && !self.source.url.starts_with("https://") {
            return Err(Error::configuration(format!(
                "source.url must be an http(s) URL, got '{}'",
                self.source.url
            )));
        }

        if self.source.timeout_secs == 0 {
            return Err(Error::configuration("source.timeout_secs must be positive"));
        }

        if self.trading_hours.start >= self.trading_hours.end {
            return Err(Error::configuration(format!(
                "trading_hours.start ({}) must be before trading_hours.end ({})",
                self.trading_hours.start, self.trading_hours.end
            )));
        }

        if self.trading_hours.end > 24 {
            return Err(Error::configuration(
                "trading_hours.end cannot exceed 24".to_string(),
            ));
        }

        if self.trading_hours.days.is_empty() {
            return Err(Error::configuration("trading_hours.days cannot be empty"));
        }

        for day in &self.trading_hours.days {
            if !is_valid_day_name(day) {
                return Err(Error::configuration(format!(
                    "unknown trading day '{day}' (expected e.g. 'Monday')"
                )));
            }
        }

        if !is_valid_day_name(&self.email.send_on) {
            return Err(Error::configuration(format!(
                "unknown report day '{}' (expected e.g. 'Friday')",
                self.email.send_on
            )));
        }

        if self.email.send_at_hour >= 24 {
            return Err(Error::configuration(
                "email.send_at_hour must be below 24".to_string(),
            ));
        }

        for position in &self.portfolio.positions {
            if position.ticker.trim().is_empty() {
                return Err(Error::configuration(
                    "portfolio position with empty ticker".to_string(),
                ));
            }
            if position.shares <= 0.0 {
                return Err(Error::configuration(format!(
                    "portfolio position '{}' must hold a positive share count",
                    position.ticker
                )));
            }
            if position.buy_price <= 0.0 {
                return Err(Error::configuration(format!(
                    "portfolio position '{}' must have a positive buy price",
                    position.ticker
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: Config = serde_json::from_str(
            r#"{ "source": { "url": "https://live.example.co.ke/market" } }"#,
        )
        .unwrap();

        assert_eq!(config.source.url, "https://live.example.co.ke/market");
        assert_eq!(config.trading_hours.start, 9);
        assert_eq!(config.email.send_on, "Friday");
        assert!(config.portfolio.positions.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_file_parses() {
        let config: Config = serde_json::from_str(
            r#"{
                "source": { "url": "https://live.example.co.ke/market", "timeout_secs": 10 },
                "trading_hours": { "start": 8, "end": 16, "days": ["Monday", "Friday"] },
                "email": { "send_on": "Thursday", "send_at_hour": 18 },
                "output": { "workbook_path": "out/market.xlsx" },
                "portfolio": {
                    "positions": [
                        { "ticker": "ABSA", "shares": 100, "buy_price": 25.0 }
                    ]
                }
            }"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.trading_hours.days.len(), 2);
        assert_eq!(config.portfolio.positions[0].ticker, "ABSA");
    }

    #[test]
    fn test_invalid_window_rejected() {
        let mut config = Config::default();
        config.trading_hours.start = 17;
        config.trading_hours.end = 9;
        assert!(config.validate().is_err());

        config.trading_hours.start = 9;
        config.trading_hours.end = 25;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_day_name_rejected() {
        let mut config = Config::default();
        config.trading_hours.days = vec!["Funday".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_http_url_rejected() {
        let mut config = Config::default();
        config.source.url = "ftp://example.com/data".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_position_rejected() {
        let mut config = Config::default();
        config.portfolio.positions.push(Position {
            ticker: "ABSA".to_string(),
            shares: 0.0,
            buy_price: 25.0,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/config.json")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "output": { "workbook_path": "prices.xlsx" } }"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.output.workbook_path, PathBuf::from("prices.xlsx"));
    }
}
