//! Strictly FIBS - CLIP decoder CLI
//!
//! Decodes recorded FIBS sessions and checks moves between board dumps.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use strictly_fibs::{EventKind, FibsConfig, Side, check_boards, decode_reader, schema_listing};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = FibsConfig::load_or_default(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Decode { file } => run_decode(file, &config),
        Command::Check {
            before,
            after,
            side,
        } => {
            let side = side.map(Side::from).unwrap_or(*config.side());
            run_check(&before, &after, side)
        }
        Command::Schema => run_schema(),
    }
}

/// Decode a file or standard input to JSON lines
#[instrument(skip(config))]
fn run_decode(file: Option<PathBuf>, config: &FibsConfig) -> Result<()> {
    let input: Box<dyn BufRead> = match &file {
        Some(path) => {
            let handle = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(handle))
        }
        None => Box::new(std::io::stdin().lock()),
    };

    let transcript = decode_reader(input, config)?;
    info!(events = transcript.events.len(), "Input decoded");

    let mut stdout = std::io::stdout().lock();
    for event in &transcript.events {
        writeln!(stdout, "{}", serde_json::to_string(event)?)?;
    }
    print_summary(&transcript.summary);
    Ok(())
}

fn print_summary(summary: &BTreeMap<EventKind, usize>) {
    let total: usize = summary.values().sum();
    for (kind, count) in summary {
        eprintln!("{:>24} {:>6}", kind.to_string(), count);
    }
    eprintln!("{:>24} {:>6}", "total", total);
}

/// Check the move between two board dumps
#[instrument(skip(before, after))]
fn run_check(before: &str, after: &str, side: Side) -> Result<()> {
    let checked = check_boards(before, after, side)?;
    info!(%checked, status = %checked.status(), "Move reconstructed");
    println!("{}", serde_json::to_string_pretty(&checked)?);
    Ok(())
}

/// Print every event kind with its schema
fn run_schema() -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    for line in schema_listing() {
        writeln!(stdout, "{}", line)?;
    }
    Ok(())
}
