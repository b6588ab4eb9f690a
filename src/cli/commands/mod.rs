//! Command implementations for the soko tracker CLI
//!
//! This module contains the command execution logic and error handling for
//! the CLI interface. Each command is implemented in its own module.

pub mod decode;
pub mod poll;
pub mod report;
pub mod shared;

// Re-export the main types for callers
pub use shared::RunStats;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner
///
/// Dispatches to the appropriate subcommand handler based on CLI args:
/// - `poll`: trading-window-gated fetch/decode/workbook workflow
/// - `report`: render and send the portfolio email now
/// - `decode`: offline decoding of a saved page
pub async fn run(args: Args) -> Result<RunStats> {
    match args.get_command() {
        Commands::Poll(poll_args) => poll::run_poll(poll_args).await,
        Commands::Report(report_args) => report::run_report(report_args).await,
        Commands::Decode(decode_args) => decode::run_decode(decode_args).await,
    }
}
