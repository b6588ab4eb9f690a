//! Command-line argument definitions for the soko tracker
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the soko tracker
///
/// Polls Nairobi Securities Exchange share prices from a server-rendered
/// exchange listings page into a styled Excel workbook, with a scheduled
/// portfolio email report.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "soko-tracker",
    version,
    about = "Track NSE share prices into a styled Excel workbook",
    long_about = "Polls live Nairobi Securities Exchange share prices from the exchange's \
                  server-rendered listings page, decodes the embedded payload into typed \
                  quotes, writes a styled Market/Portfolio workbook, and emails a weekly \
                  portfolio summary. Designed to be fired every few minutes by an external \
                  scheduler during trading hours."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the soko tracker
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Fetch live prices, update the workbook, optionally send the report
    Poll(PollArgs),
    /// Render and send the portfolio report now
    Report(ReportArgs),
    /// Decode a saved listings page offline and print the quotes
    Decode(DecodeArgs),
}

/// Arguments for the poll command (main polling workflow)
#[derive(Debug, Clone, Parser)]
pub struct PollArgs {
    /// Source URL of the exchange listings page
    ///
    /// Overrides source.url from the config file.
    #[arg(long = "url", value_name = "URL", help = "Source URL override")]
    pub url: Option<String>,

    /// Output path for the generated workbook
    ///
    /// Overrides output.workbook_path from the config file.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Workbook output path override"
    )]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, looks for
    /// ~/.config/soko-tracker/config.json
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Run regardless of trading hours (useful for testing)
    #[arg(
        short = 'f',
        long = "force",
        help = "Run regardless of trading hours"
    )]
    pub force: bool,

    /// Override trading window start hour, exchange local time
    #[arg(
        long = "start",
        value_name = "HOUR",
        help = "Override trading start hour (EAT)"
    )]
    pub start: Option<u32>,

    /// Override trading window end hour, exchange local time
    #[arg(
        long = "end",
        value_name = "HOUR",
        help = "Override trading end hour (EAT)"
    )]
    pub end: Option<u32>,

    /// Force send the weekly portfolio email on this run
    #[arg(
        long = "send-email",
        help = "Send the weekly portfolio email regardless of schedule"
    )]
    pub send_email: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the run summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the run summary"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the report command (send the portfolio email now)
#[derive(Debug, Clone, Parser)]
pub struct ReportArgs {
    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Write the rendered report HTML to a file instead of sending it
    #[arg(
        long = "preview",
        value_name = "FILE",
        help = "Write the report HTML to a file instead of sending"
    )]
    pub preview: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the decode command (offline decoding of a saved page)
#[derive(Debug, Clone, Parser)]
pub struct DecodeArgs {
    /// Saved HTML page to decode
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Saved listings page to decode"
    )]
    pub input: PathBuf,

    /// Output format for the decoded quotes
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for decoded quotes"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

/// Map a verbosity count and quiet flag to a log level name
fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Validate an optional hour override
fn validate_hour(name: &str, hour: Option<u32>) -> Result<()> {
    if let Some(h) = hour {
        if h >= 24 {
            return Err(Error::configuration(format!(
                "{name} hour must be below 24, got {h}"
            )));
        }
    }
    Ok(())
}

impl PollArgs {
    /// Validate the poll command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_hour("start", self.start)?;
        validate_hour("end", self.end)?;

        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start >= end {
                return Err(Error::configuration(format!(
                    "start hour ({start}) must be before end hour ({end})"
                )));
            }
        }

        if let Some(url) = &self.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::configuration(format!(
                    "--url must be an http(s) URL, got '{url}'"
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Check if we should show the fetch spinner (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ReportArgs {
    /// Validate the report command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(preview) = &self.preview {
            if let Some(parent) = preview.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Preview directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }
}

impl DecodeArgs {
    /// Validate the decode command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }
}

impl Default for PollArgs {
    fn default() -> Self {
        Self {
            url: None,
            output: None,
            config_file: None,
            force: false,
            start: None,
            end: None,
            send_email: false,
            verbose: 0,
            quiet: false,
            output_format: OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_poll_args_default_is_valid() {
        assert!(PollArgs::default().validate().is_ok());
    }

    #[test]
    fn test_hour_overrides_validated() {
        let mut args = PollArgs::default();

        args.start = Some(25);
        assert!(args.validate().is_err());

        args.start = Some(17);
        args.end = Some(9);
        assert!(args.validate().is_err());

        args.start = Some(8);
        args.end = Some(18);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_url_override_validated() {
        let mut args = PollArgs::default();

        args.url = Some("example.com".to_string());
        assert!(args.validate().is_err());

        args.url = Some("https://example.com/market".to_string());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_missing_config_file_rejected() {
        let mut args = PollArgs::default();
        args.config_file = Some(PathBuf::from("/nonexistent/config.json"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_existing_config_file_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{}").unwrap();

        let mut args = PollArgs::default();
        args.config_file = Some(path);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level_mapping() {
        let mut args = PollArgs::default();
        assert_eq!(args.get_log_level(), "warn");

        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");

        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");

        args.verbose = 5;
        assert_eq!(args.get_log_level(), "trace");

        args.verbose = 0;
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_show_progress() {
        let mut args = PollArgs::default();
        assert!(args.show_progress());

        args.quiet = true;
        assert!(!args.show_progress());
    }

    #[test]
    fn test_decode_args_require_existing_input() {
        let args = DecodeArgs {
            input: PathBuf::from("/nonexistent/page.html"),
            output_format: OutputFormat::Human,
            verbose: 0,
            quiet: false,
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_cli_parses_poll_subcommand() {
        let args = Args::parse_from(["soko-tracker", "poll", "--force", "-vv"]);
        match args.get_command() {
            Commands::Poll(poll) => {
                assert!(poll.force);
                assert_eq!(poll.verbose, 2);
            }
            other => panic!("expected poll command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_decode_subcommand() {
        let args = Args::parse_from([
            "soko-tracker",
            "decode",
            "--input",
            "page.html",
            "--output-format",
            "json",
        ]);
        match args.get_command() {
            Commands::Decode(decode) => {
                assert_eq!(decode.input, PathBuf::from("page.html"));
                assert_eq!(decode.output_format, OutputFormat::Json);
            }
            other => panic!("expected decode command, got {other:?}"),
        }
    }
}
