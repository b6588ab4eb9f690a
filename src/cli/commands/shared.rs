//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::app::models::Quote;
use crate::config::Config;
use crate::{Error, Result};

/// Run statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Number of quotes decoded from the payload
    pub quotes_decoded: usize,
    /// Number of records skipped during decoding
    pub records_skipped: usize,
    /// Where the workbook was written, when one was written
    pub workbook_path: Option<PathBuf>,
    /// Whether the portfolio report was sent this run
    pub report_sent: bool,
    /// Total run time
    pub run_time: std::time::Duration,
}

/// Set up structured logging from a level name
pub fn setup_logging(log_level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("soko_tracker={log_level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration with CLI overrides applied and validated
pub fn load_configuration(
    config_file: Option<&std::path::Path>,
    url_override: Option<&str>,
    output_override: Option<&std::path::Path>,
) -> Result<Config> {
    info!("Loading configuration");

    let mut config = Config::load(config_file)?;

    if let Some(url) = url_override {
        config.source.url = url.to_string();
    }
    if let Some(output) = output_override {
        config.output.workbook_path = output.to_path_buf();
    }

    config.validate()?;
    Ok(config)
}

/// Check if an error is critical enough that a multi-step run must stop
pub fn is_critical_error(error: &Error) -> bool {
    matches!(
        error,
        Error::Configuration { .. } | Error::Interrupted { .. }
    )
}

/// Create a spinner for the page fetch
pub fn create_fetch_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print one quote line with a colored signed change
pub fn print_quote_line(quote: &Quote) {
    let change = format!(
        "{}{:.2}%",
        if quote.is_gainer() { "+" } else { "" },
        quote.change_pct
    );
    let change = if quote.is_gainer() {
        change.green()
    } else {
        change.red()
    };

    println!(
        "  {:<8} KES {:>10.2}  {}",
        quote.ticker.bold(),
        quote.price,
        change
    );
}
