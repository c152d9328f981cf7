mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use std::process;

use commands::diagnosis::{DiagnoseArgs, HorizontalArgs, IndicatorsArgs, RatiosArgs, ReportArgs};

/// Small-business financial diagnosis
#[derive(Parser)]
#[command(
    name = "findx",
    version,
    about = "Small-business financial diagnosis",
    long_about = "A CLI for diagnosing small-business financial statements with decimal \
                  precision. Computes per-period ratios, horizontal analysis across up to \
                  three periods, traffic-light indicators, and validates generated \
                  diagnosis reports."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute profitability, liquidity, leverage and coverage ratios for one period
    Ratios(RatiosArgs),
    /// Period-over-period variation across an ordered list of statements
    Horizontal(HorizontalArgs),
    /// Full diagnosis over 1-3 periods, optionally with a captured report
    Diagnose(DiagnoseArgs),
    /// Traffic-light indicators for one period
    Indicators(IndicatorsArgs),
    /// Validate a generated diagnosis report
    Report(ReportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Ratios(args) => commands::diagnosis::run_ratios(args),
        Commands::Horizontal(args) => commands::diagnosis::run_horizontal(args),
        Commands::Diagnose(args) => commands::diagnosis::run_diagnose(args),
        Commands::Indicators(args) => commands::diagnosis::run_indicators(args),
        Commands::Report(args) => commands::diagnosis::run_report(args),
        Commands::Version => {
            println!("findx {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {:?}", e);
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
