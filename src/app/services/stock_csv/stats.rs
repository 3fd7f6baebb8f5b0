//! Loading statistics and result structures for stock CSV feeds
//!
//! This module provides types for tracking how many rows were read, how many
//! became bars and how many the date range filtered out.

use chrono::NaiveDateTime;

use crate::app::models::LineBuffer;

/// Loading result with the filled line buffer and statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Display name of the loaded source
    pub name: String,

    /// Output lines, one slot per loaded bar
    pub lines: LineBuffer,

    /// Basic loading statistics
    pub stats: ParseStats,
}

/// Simple loading statistics
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of data rows read (header excluded)
    pub total_records: usize,

    /// Number of bars written into the line buffer
    pub bars_loaded: usize,

    /// Rows dropped because they precede `fromdate`
    pub before_fromdate: usize,

    /// Whether loading stopped at a row past `todate`
    pub stopped_at_todate: bool,

    /// Local time of the first loaded bar
    pub first_datetime: Option<NaiveDateTime>,

    /// Local time of the last loaded bar
    pub last_datetime: Option<NaiveDateTime>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a bar that made it into the buffer
    pub fn record_bar(&mut self, local: NaiveDateTime) {
        self.bars_loaded += 1;
        if self.first_datetime.is_none() {
            self.first_datetime = Some(local);
        }
        self.last_datetime = Some(local);
    }

    /// Percentage of read rows removed by the date range
    pub fn filter_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            let filtered = self.total_records - self.bars_loaded;
            (filtered as f64 / self.total_records as f64) * 100.0
        }
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        let range = match (self.first_datetime, self.last_datetime) {
            (Some(first), Some(last)) => format!("{} .. {}", first, last),
            _ => "no bars".to_string(),
        };
        format!(
            "{} bars from {} rows ({:.1}% filtered), {}",
            self.bars_loaded,
            self.total_records,
            self.filter_rate(),
            range
        )
    }
}
