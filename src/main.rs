use clap::Parser;
use soko_tracker::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Set up graceful shutdown handling
        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
        };

        // Run the main command with cancellation support
        tokio::select! {
            result = commands::run(args) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(soko_tracker::Error::interrupted(
                    "Polling interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(_stats) => {
            // Success - stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Soko Tracker - NSE Share Price Poller");
    println!("=====================================");
    println!();
    println!("Poll live Nairobi Securities Exchange share prices into a styled");
    println!("Excel workbook, with a weekly portfolio email report.");
    println!();
    println!("USAGE:");
    println!("    soko-tracker <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    poll        Fetch live prices and update the workbook (main command)");
    println!("    report      Render and send the portfolio report now");
    println!("    decode      Decode a saved listings page offline");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Poll during trading hours (the scheduler's call):");
    println!("    soko-tracker poll");
    println!();
    println!("    # Poll right now regardless of the trading window:");
    println!("    soko-tracker poll --force --output prices.xlsx");
    println!();
    println!("    # Send the weekly portfolio report immediately:");
    println!("    soko-tracker report");
    println!();
    println!("    # Inspect what a saved page decodes to:");
    println!("    soko-tracker decode --input page.html --output-format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    soko-tracker <COMMAND> --help");
}
