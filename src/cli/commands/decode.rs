//! Decode command implementation
//!
//! Offline decoding of a saved listings page: the debugging surface for the
//! payload decoder. Reads HTML from disk, runs the same extract/decode path
//! as a live poll, and prints the quotes.

use std::fs;
use std::time::Instant;
use tracing::{debug, info};

use super::shared::{RunStats, print_quote_line, setup_logging};
use crate::app::services::payload_decoder::PayloadDecoder;
use crate::app::services::payload_extractor::extract_store;
use crate::cli::args::{DecodeArgs, OutputFormat};
use crate::{Error, Result};

/// Decode command runner
pub async fn run_decode(args: DecodeArgs) -> Result<RunStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level())?;

    info!("Decoding saved page: {}", args.input.display());
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let html = fs::read_to_string(&args.input).map_err(|e| {
        Error::io(
            format!("failed to read input '{}'", args.input.display()),
            e,
        )
    })?;

    let store = extract_store(&html)?;
    info!("Payload store holds {} nodes", store.len());

    let result = PayloadDecoder::new().decode_all(&store)?;

    match args.output_format {
        OutputFormat::Human => {
            if !args.quiet {
                for quote in &result.quotes {
                    print_quote_line(quote);
                }
                println!();
                println!("{}", result.summary());
                for skip in &result.stats.skips {
                    println!("  skipped index {}: {}", skip.index, skip.reason);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result.quotes).unwrap());
        }
    }

    Ok(RunStats {
        quotes_decoded: result.stats.decoded,
        records_skipped: result.stats.skipped,
        workbook_path: None,
        report_sent: false,
        run_time: start_time.elapsed(),
    })
}
