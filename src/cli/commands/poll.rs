//! Poll command implementation
//!
//! This module contains the main polling workflow: trading-window gate,
//! page fetch, payload decode, workbook write, and the scheduled report
//! send.

use std::time::Instant;
use tracing::{debug, info, warn};

use super::shared::{
    RunStats, create_fetch_spinner, load_configuration, print_quote_line, setup_logging,
};
use crate::app::services::market_hours::{self, TradingWindow};
use crate::app::services::page_fetcher::PageFetcher;
use crate::app::services::payload_decoder::{DecodeResult, PayloadDecoder};
use crate::app::services::payload_extractor::extract_store;
use crate::app::services::workbook_writer::write_workbook;
use crate::app::services::{mailer, report};
use crate::cli::args::{OutputFormat, PollArgs};
use crate::config::Config;
use crate::{Error, Result};

/// Poll command runner
///
/// Orchestrates one polling run:
/// 1. Gate on the configured trading window (unless forced)
/// 2. Fetch the listings page and decode the embedded payload
/// 3. Write the market/portfolio workbook
/// 4. Send the weekly report when scheduled or forced
pub async fn run_poll(args: PollArgs) -> Result<RunStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level())?;

    info!("Starting soko tracker poll");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(
        args.config_file.as_deref(),
        args.url.as_deref(),
        args.output.as_deref(),
    )?;
    debug!("Loaded configuration: {:?}", config);

    let now = market_hours::exchange_now();
    let window = TradingWindow::new(&config.trading_hours, args.start, args.end);
    let in_hours = window.is_open(now);
    let (start_hour, end_hour) = window.hours();

    if !args.quiet {
        println!("soko tracker — NSE market poll");
        println!("Time : {} ({})", now.format("%Y-%m-%d %H:%M EAT"), now.format("%A"));
        println!(
            "Hours: {start_hour}:00 – {end_hour}:00 EAT  |  In trading window: {in_hours}"
        );
        println!();
    }

    if !in_hours && !args.force {
        println!("Outside trading hours. Use --force to run anyway.");
        return Ok(RunStats {
            run_time: start_time.elapsed(),
            ..Default::default()
        });
    }

    if args.force && !in_hours {
        warn!("--force set, polling outside trading hours");
    }

    // Fetch and decode
    let result = fetch_and_decode(&config, args.show_progress()).await?;

    if result.quotes.is_empty() {
        return Err(Error::data_validation(
            "No usable quotes decoded this run; workbook left untouched",
        ));
    }

    if !args.quiet {
        for quote in &result.quotes {
            print_quote_line(quote);
        }
        println!();
    }

    for skip in &result.stats.skips {
        warn!("Skipped listing index {}: {}", skip.index, skip.reason);
    }

    // Write the workbook
    let write_stats = write_workbook(
        &result.quotes,
        &config.portfolio.positions,
        &config.output.workbook_path,
    )?;

    // Scheduled or forced report send
    let report_sent = if args.send_email || market_hours::is_report_time(&config.email, now) {
        let trigger = if args.send_email {
            "--send-email flag"
        } else {
            "weekly schedule"
        };
        info!("Sending portfolio report ({})", trigger);
        // The workbook is already on disk; a delivery failure must not turn
        // this run into an error
        match send_report(&config, &result) {
            Ok(sent) => sent,
            Err(e) => {
                warn!("Report delivery failed: {:#}", e);
                false
            }
        }
    } else {
        false
    };

    let stats = RunStats {
        quotes_decoded: result.stats.decoded,
        records_skipped: result.stats.skipped,
        workbook_path: Some(write_stats.path),
        report_sent,
        run_time: start_time.elapsed(),
    };

    generate_run_report(&args, &stats)?;
    Ok(stats)
}

/// Fetch the listings page and decode its payload
async fn fetch_and_decode(config: &Config, show_progress: bool) -> Result<DecodeResult> {
    let fetcher = PageFetcher::new(config.source.timeout_secs)?;

    let spinner = if show_progress {
        Some(create_fetch_spinner("Fetching live NSE prices..."))
    } else {
        None
    };

    let body = fetcher.fetch(&config.source.url).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let store = extract_store(&body?)?;
    let result = PayloadDecoder::new().decode_all(&store)?;

    info!(
        "Decoded {} quotes ({} skipped) at {}",
        result.stats.decoded,
        result.stats.skipped,
        result.quotes.first().map_or("-", |q| q.captured_at.as_str())
    );

    Ok(result)
}

/// Render and deliver the portfolio report; a missing credential setup is a
/// logged skip, not a failure
fn send_report(config: &Config, result: &DecodeResult) -> Result<bool> {
    let Some(credentials) = mailer::EmailCredentials::from_env() else {
        warn!(
            "Email secrets not configured — set GMAIL_ADDRESS, GMAIL_APP_PASS, NOTIFY_EMAIL"
        );
        return Ok(false);
    };

    let now = market_hours::exchange_now();
    let summary = report::summarize(&config.portfolio.positions, &result.quotes);
    let html = report::render_html(&summary, now);

    mailer::Mailer::new(&config.email).send_report(
        &credentials,
        &report::report_subject(now),
        html,
    )?;

    Ok(true)
}

/// Generate the final run report
fn generate_run_report(args: &PollArgs, stats: &RunStats) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if !args.quiet {
                println!(
                    "Fetched {} quotes ({} skipped) in {:.1}s",
                    stats.quotes_decoded,
                    stats.records_skipped,
                    stats.run_time.as_secs_f64()
                );
                if let Some(path) = &stats.workbook_path {
                    println!("Saved -> {}", path.display());
                }
                if stats.report_sent {
                    println!("Weekly report sent!");
                }
            }
        }
        OutputFormat::Json => {
            let json_stats = serde_json::json!({
                "quotes_decoded": stats.quotes_decoded,
                "records_skipped": stats.records_skipped,
                "workbook_path": stats.workbook_path.as_ref().map(|p| p.display().to_string()),
                "report_sent": stats.report_sent,
                "run_time_seconds": stats.run_time.as_secs_f64(),
            });
            println!("{}", serde_json::to_string_pretty(&json_stats).unwrap());
        }
    }

    Ok(())
}
