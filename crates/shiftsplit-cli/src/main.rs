//! Command-line adapter for the shiftsplit decomposition engine.
//!
//! Reads a JSON document describing a week of per-bucket staffing demand
//! and either solves it into shifts or validates a solve against the
//! original demand.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use shiftsplit_core::config::Config;
use shiftsplit_core::{DayShift, WeekDemand};
use shiftsplit_solver::{Cache, Splitter};

#[derive(Parser)]
#[command(name = "shiftsplit", version, about = "Decompose weekly demand into shifts")]
struct Cli {
    /// Increase log verbosity (-v, -vv). Overridden by RUST_LOG if set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a week of demand into day-shifts.
    Solve {
        file: PathBuf,
        #[arg(long)]
        min: u32,
        #[arg(long)]
        max: u32,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Solve a week of demand and confirm the result covers it.
    Validate {
        file: PathBuf,
        #[arg(long)]
        min: u32,
        #[arg(long)]
        max: u32,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Deserialize)]
struct WeekDemandDoc {
    week_demand: Vec<Vec<u32>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Solve { file, min, max, format } => solve(&file, min, max, format, false),
        Commands::Validate { file, min, max, format } => solve(&file, min, max, format, true),
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn solve(file: &PathBuf, min: u32, max: u32, format: OutputFormat, validate: bool) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("reading week demand file {}", file.display()))?;
    let doc: WeekDemandDoc = serde_json::from_str(&raw)
        .with_context(|| format!("parsing week demand file {}", file.display()))?;
    let week = WeekDemand::new(doc.week_demand).context("validating week demand")?;

    let cache = Cache::new();
    let config = Config::from_env();

    let mut splitter = Splitter::new(&week, min, max);
    splitter
        .calculate(&cache, &config)
        .context("solving shift decomposition")?;

    let validation = if validate {
        Some(splitter.validate().is_ok())
    } else {
        None
    };

    print_report(splitter.get_shifts(), splitter.efficiency(), validation, format);
    Ok(())
}

fn print_report(
    shifts: &[DayShift],
    efficiency: f64,
    validation: Option<bool>,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "shifts": shifts,
                "efficiency": efficiency,
                "valid": validation,
            });
            println!("{}", serde_json::to_string_pretty(&body).expect("serializable report"));
        }
        OutputFormat::Text => {
            for shift in shifts {
                println!(
                    "day {} start {} length {}",
                    shift.day, shift.start, shift.length
                );
            }
            println!("efficiency: {efficiency:.3}");
            if let Some(ok) = validation {
                println!("valid: {ok}");
            }
        }
    }
}
