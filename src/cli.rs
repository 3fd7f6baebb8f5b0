//! Command-line interface components.

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::config::FeedConfig;
use crate::constants::is_csv_extension;
use crate::{Error, Result};

pub mod commands;

/// Output produced for each loaded feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One colored summary line per file
    Summary,
    /// Normalized CSV rows on stdout
    Csv,
    /// JSON lines on stdout
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "stockcsv-feed")]
#[command(about = "Load date/OHLCV/open-interest CSV files into backtesting line buffers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// CSV files, or directories searched recursively for *.csv
    #[arg(value_name = "PATH", required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Input files have no header row
    #[arg(long)]
    pub no_headers: bool,

    /// Field separator (a single character, or "tab")
    #[arg(short, long, default_value = ",")]
    pub separator: String,

    /// Drop bars before this date ('YYYY-MM-DD HH:MM' or 'YYYYMMDD')
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<String>,

    /// Stop at the first bar after this date ('YYYY-MM-DD HH:MM', or 'YYYYMMDD' for the whole day)
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Log level derived from -v / -q
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Build the feed configuration shared by every input file
    pub fn feed_config(&self) -> Result<FeedConfig> {
        let mut config = FeedConfig::default()
            .with_headers(!self.no_headers)
            .with_separator(FeedConfig::parse_separator(&self.separator)?);

        if let Some(from) = &self.from {
            config = config.with_fromdate(FeedConfig::parse_date_bound(from)?);
        }
        if let Some(to) = &self.to {
            config = config.with_todate(FeedConfig::parse_end_bound(to)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Expand the given paths into a list of CSV files
    pub fn input_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for path in &self.paths {
            collect_csv_files(path, &mut files)?;
        }
        Ok(files)
    }
}

/// Collect `path` itself if it is a file, or every CSV file below it
fn collect_csv_files(path: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    if path.is_file() {
        files.push(path.to_path_buf());
        return Ok(());
    }

    if !path.is_dir() {
        return Err(Error::configuration(format!(
            "Input path not found: {}",
            path.display()
        )));
    }

    let mut found = Vec::new();
    for entry in walkdir::WalkDir::new(path) {
        let entry = entry.map_err(|e| {
            Error::configuration(format!("Failed to walk {}: {}", path.display(), e))
        })?;
        if entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(is_csv_extension)
        {
            found.push(entry.into_path());
        }
    }

    // Sort by name for consistent ordering
    found.sort();
    files.extend(found);
    Ok(())
}
