//! eqlog - combat log to CSV report
//!
//! Reads a game client combat log, classifies every timestamped line and
//! writes the records as a table.

mod settings;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use eqlog_report::{write_report, DamageSummary, LogReader};

use crate::settings::ParserSettings;

#[derive(Parser, Debug)]
#[command(name = "eqlog")]
#[command(about = "Parse a combat log into a CSV report")]
struct Args {
    /// Combat log to read
    input: PathBuf,

    /// CSV file to write
    output: PathBuf,

    /// Settings file (default: ~/.config/eqlog/settings.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write per-source damage totals to this CSV file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

/// `report.csv` -> `report.summary.csv`
fn default_summary_path(output: &Path) -> PathBuf {
    output.with_extension("summary.csv")
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    Ok(BufWriter::new(file))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let settings = ParserSettings::load(args.config.as_deref());

    let started = Instant::now();
    let outcome = LogReader::open(&args.input)
        .with_context(|| format!("Failed to open {:?}", args.input))?
        .with_options(settings.ingest.read_options())
        .read_events()
        .with_context(|| format!("Failed to parse {:?}", args.input))?;
    info!(
        "Parsed {} events in {:.2?}",
        outcome.events.len(),
        started.elapsed()
    );

    let started = Instant::now();
    let rows = write_report(
        create(&args.output)?,
        &outcome.events,
        settings.report.include_unknown,
    )
    .with_context(|| format!("Failed to write {:?}", args.output))?;
    info!(
        "Wrote {} rows to {:?} in {:.2?}",
        rows,
        args.output,
        started.elapsed()
    );

    let summary_path = args.summary.clone().or_else(|| {
        settings
            .report
            .summary
            .then(|| default_summary_path(&args.output))
    });
    if let Some(path) = summary_path {
        let summary = DamageSummary::from_events(&outcome.events);
        let rows = summary
            .write_csv(create(&path)?)
            .with_context(|| format!("Failed to write {:?}", path))?;
        info!(
            "Wrote {} summary rows to {:?} (total damage {})",
            rows,
            path,
            summary.grand_total()
        );
    }

    Ok(())
}
