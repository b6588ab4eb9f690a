//! Report command implementation
//!
//! Fetches fresh prices, renders the portfolio report, and either sends it
//! or writes the HTML to a file for preview.

use std::fs;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::shared::{RunStats, load_configuration, setup_logging};
use crate::app::services::market_hours;
use crate::app::services::page_fetcher::PageFetcher;
use crate::app::services::payload_decoder::PayloadDecoder;
use crate::app::services::payload_extractor::extract_store;
use crate::app::services::{mailer, report};
use crate::cli::args::ReportArgs;
use crate::{Error, Result};

/// Report command runner
pub async fn run_report(args: ReportArgs) -> Result<RunStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level())?;

    info!("Rendering portfolio report on demand");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(args.config_file.as_deref(), None, None)?;

    if config.portfolio.positions.is_empty() {
        return Err(Error::configuration(
            "No portfolio positions configured; nothing to report",
        ));
    }

    // Fresh prices for the report
    let fetcher = PageFetcher::new(config.source.timeout_secs)?;
    let body = fetcher.fetch(&config.source.url).await?;
    let store = extract_store(&body)?;
    let result = PayloadDecoder::new().decode_all(&store)?;

    if result.quotes.is_empty() {
        return Err(Error::data_validation(
            "No usable quotes decoded; cannot price the portfolio",
        ));
    }

    let now = market_hours::exchange_now();
    let summary = report::summarize(&config.portfolio.positions, &result.quotes);

    if summary.lines.is_empty() {
        warn!("None of the configured holdings matched a decoded quote");
    }

    let html = report::render_html(&summary, now);

    let report_sent = match &args.preview {
        Some(path) => {
            fs::write(path, &html)
                .map_err(|e| Error::io(format!("failed to write preview '{}'", path.display()), e))?;
            if !args.quiet {
                println!("Report preview written to {}", path.display());
            }
            false
        }
        None => {
            let Some(credentials) = mailer::EmailCredentials::from_env() else {
                return Err(Error::email(
                    "email secrets not configured — set GMAIL_ADDRESS, GMAIL_APP_PASS, NOTIFY_EMAIL",
                    None,
                ));
            };

            mailer::Mailer::new(&config.email).send_report(
                &credentials,
                &report::report_subject(now),
                html,
            )?;

            if !args.quiet {
                println!("Weekly report sent!");
            }
            true
        }
    };

    Ok(RunStats {
        quotes_decoded: result.stats.decoded,
        records_skipped: result.stats.skipped,
        workbook_path: None,
        report_sent,
        run_time: start_time.elapsed(),
    })
}
