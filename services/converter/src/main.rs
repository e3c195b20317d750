//! PIOMAS converter.
//!
//! Converts yearly `heff.H<year>` sea ice thickness binaries into
//! `<year>.nc` NetCDF files on the native 360x120 grid.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use converter::{BatchRunner, ConverterConfig, YearRange};

#[derive(Parser, Debug)]
#[command(name = "piomas-converter")]
#[command(about = "Convert PIOMAS sea ice thickness binaries to NetCDF")]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "PIOMAS_CONFIG")]
    config: Option<PathBuf>,

    /// Directory containing grids/, binaries/ and output/
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// First year to convert
    #[arg(long)]
    start_year: Option<i32>,

    /// Last year to convert (inclusive)
    #[arg(long)]
    end_year: Option<i32>,

    /// Convert a single year
    #[arg(long, conflicts_with_all = ["start_year", "end_year"])]
    year: Option<i32>,

    /// Fail a year whose binary holds fewer than 12 months
    #[arg(long)]
    require_complete: bool,

    /// YAML metadata template
    #[arg(long)]
    metadata: Option<PathBuf>,

    /// Write a JSON run summary to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let builder = fmt().with_env_filter(filter).with_target(true).with_level(true);
    if args.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }

    netcdf_archive::silence_hdf5_errors();

    info!("Starting PIOMAS converter");

    let config = load_config(&args)?;
    info!(
        base_dir = %config.base_dir.display(),
        start = config.years.start,
        end = config.years.end,
        byte_order = %config.grid.byte_order,
        "Loaded configuration"
    );

    let runner = BatchRunner::new(config)?;
    let summary = runner.run();

    if let Some(path) = &args.summary {
        summary.write_json(path)?;
        info!(path = %path.display(), "Wrote run summary");
    }

    if summary.has_failures() {
        anyhow::bail!(
            "{} of {} years failed",
            summary.failed(),
            summary.outcomes.len()
        );
    }

    Ok(())
}

/// YAML file (or defaults), then environment, then command line.
fn load_config(args: &Args) -> Result<ConverterConfig> {
    let mut config = match &args.config {
        Some(path) => ConverterConfig::from_yaml(path)?,
        None => ConverterConfig::default(),
    };
    config.apply_env();

    if let Some(dir) = &args.base_dir {
        config.base_dir = dir.clone();
    }
    if let Some(year) = args.year {
        config.years = YearRange::single(year);
    }
    if let Some(start) = args.start_year {
        config.years.start = start;
    }
    if let Some(end) = args.end_year {
        config.years.end = end;
    }
    if args.require_complete {
        config.require_complete = true;
    }
    if let Some(path) = &args.metadata {
        config.metadata_template = Some(path.clone());
    }

    Ok(config)
}
