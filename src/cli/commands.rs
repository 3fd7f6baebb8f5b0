//! Command implementations for the stockcsv-feed binary
//!
//! Loads every input file with [`StockCsvParser`] and reports the bars in
//! the requested output format.

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use tracing::{debug, info};

use super::{Args, OutputFormat};
use crate::app::models::Bar;
use crate::app::services::stock_csv::{ParseResult, StockCsvParser};

/// One bar as emitted by the csv and json output formats
#[derive(Debug, Serialize)]
pub struct BarRecord<'a> {
    pub feed: &'a str,
    pub datetime: String,
    pub datenum: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub openinterest: f64,
}

impl<'a> BarRecord<'a> {
    pub fn new(feed: &'a str, bar: &Bar) -> Self {
        Self {
            feed,
            datetime: bar.datetime.to_rfc3339(),
            datenum: bar.datenum.value(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            openinterest: bar.openinterest,
        }
    }
}

/// Main entry point for command execution
pub fn run(args: &Args) -> Result<()> {
    let config = args.feed_config().context("Invalid feed options")?;
    let parser = StockCsvParser::new(config)?;
    let files = args.input_files()?;

    if files.is_empty() {
        anyhow::bail!("No CSV files found in the given paths");
    }
    info!("Loading {} file(s)", files.len());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut total_bars = 0;
    let mut csv_header_written = false;

    for file in &files {
        let result = parser.parse_file(file)?;
        total_bars += result.stats.bars_loaded;

        match args.format {
            OutputFormat::Summary => write_summary(&mut out, &result)?,
            OutputFormat::Json => write_json(&mut out, &result)?,
            OutputFormat::Csv => {
                // Header row only ahead of the first bar
                let mut writer = csv::WriterBuilder::new()
                    .has_headers(!csv_header_written)
                    .from_writer(&mut out);
                write_csv(&mut writer, &result)?;
                csv_header_written |= result.stats.bars_loaded > 0;
            }
        }
    }

    if args.format == OutputFormat::Summary && files.len() > 1 {
        writeln!(
            out,
            "{} {} bars from {} files",
            "Total:".bright_white().bold(),
            total_bars,
            files.len()
        )?;
    }

    out.flush()?;
    debug!("Wrote output for {} bars", total_bars);
    Ok(())
}

/// Set up structured logging based on CLI arguments
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("stockcsv_feed={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(io::stderr)
                    .compact(),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(io::stderr),
            )
            .try_init()?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, result: &ParseResult) -> Result<()> {
    let stats = &result.stats;
    let range = match (stats.first_datetime, stats.last_datetime) {
        (Some(first), Some(last)) => format!("{} .. {}", first, last),
        _ => "no bars".to_string(),
    };

    writeln!(
        out,
        "{} {} bars ({} rows, {} before start{}) {}",
        format!("{}:", result.name).bright_cyan().bold(),
        stats.bars_loaded.to_string().bright_green(),
        stats.total_records,
        stats.before_fromdate,
        if stats.stopped_at_todate {
            ", stopped at end date"
        } else {
            ""
        },
        range.bright_black()
    )?;
    Ok(())
}

fn write_json<W: Write>(out: &mut W, result: &ParseResult) -> Result<()> {
    for bar in result.lines.bars() {
        let bar = bar?;
        serde_json::to_writer(&mut *out, &BarRecord::new(&result.name, &bar))?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_csv<W: Write>(writer: &mut csv::Writer<W>, result: &ParseResult) -> Result<()> {
    for bar in result.lines.bars() {
        let bar = bar?;
        writer.serialize(BarRecord::new(&result.name, &bar))?;
    }
    writer.flush()?;
    Ok(())
}
