//! Stock CSV feed loader
//!
//! Drives the line parser over a whole file or reader: tokenizes rows with
//! the `csv` crate, applies the header and date-range settings and fills a
//! [`LineBuffer`]. The first malformed row stops loading with an error that
//! names the source and line.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, trace};

use super::column_mapping::FieldMapping;
use super::line_parser::parse_line;
use super::stats::{ParseResult, ParseStats};
use crate::app::models::LineBuffer;
use crate::config::FeedConfig;
use crate::{Error, Result};

/// Loader for stock CSV feeds
#[derive(Debug, Clone, Default)]
pub struct StockCsvParser {
    config: FeedConfig,
    mapping: FieldMapping,
}

impl StockCsvParser {
    /// Create a new loader, validating the configuration
    pub fn new(config: FeedConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            mapping: FieldMapping::stock_csv(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Declared schema of the feed
    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Load a stock CSV file
    pub fn parse_file(&self, file_path: &Path) -> Result<ParseResult> {
        info!("Loading stock CSV file: {}", file_path.display());

        let file = File::open(file_path).map_err(|e| {
            Error::io(format!("Failed to open file {}", file_path.display()), e)
        })?;

        let name = self.config.name.clone().unwrap_or_else(|| {
            file_path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| file_path.display().to_string())
        });

        self.parse_reader(BufReader::new(file), &name)
    }

    /// Load stock CSV rows from any reader
    pub fn parse_reader<R: Read>(&self, reader: R, source_name: &str) -> Result<ParseResult> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(self.config.headers)
            .delimiter(self.config.separator)
            .flexible(true)
            .from_reader(reader);

        if self.config.headers {
            let headers = csv_reader
                .headers()
                .map_err(|e| Error::csv(source_name, "Failed to read header row", e))?;
            debug!("Skipped header row with {} columns", headers.len());
        }

        let mut stats = ParseStats::new();
        let mut lines = LineBuffer::new();

        for result in csv_reader.records() {
            let record = result.map_err(|e| {
                Error::csv(
                    source_name,
                    format!("Failed to read row {}", stats.total_records + 1),
                    e,
                )
            })?;
            stats.total_records += 1;

            let line = record
                .position()
                .map(|position| position.line())
                .unwrap_or(stats.total_records as u64);

            let bar = parse_line(&record)
                .map_err(|e| Error::malformed_row(source_name, line, e))?;

            let local = bar.local_datetime();
            if self.config.is_before_start(&local) {
                trace!("Row {} at {} precedes fromdate", line, local);
                stats.before_fromdate += 1;
                continue;
            }
            if self.config.is_after_end(&local) {
                debug!("Row {} at {} passes todate, stopping", line, local);
                stats.stopped_at_todate = true;
                break;
            }

            lines.forward();
            bar.write_to(&mut lines);
            stats.record_bar(local);
        }

        info!("Loaded {}: {}", source_name, stats.summary());

        Ok(ParseResult {
            name: source_name.to_string(),
            lines,
            stats,
        })
    }
}
