//! Stock CSV data feed
//!
//! Parses the `date, open, high, low, close, volume[, openinterest]` CSV
//! layout into backtesting line buffers.
//!
//! ## Architecture
//!
//! - [`parser`] - File/reader loop, header skip and date-range filtering
//! - [`line_parser`] - Per-row parsing and writing into a [`LineSink`]
//! - [`field_parsers`] - Date formats, timezone labeling, numeric fields
//! - [`column_mapping`] - The declared field-to-column schema
//! - [`stats`] - Loading statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use stockcsv_feed::app::models::Line;
//! use stockcsv_feed::app::services::stock_csv::StockCsvParser;
//! use stockcsv_feed::config::FeedConfig;
//!
//! # fn example() -> stockcsv_feed::Result<()> {
//! let data = "date,open,high,low,close,volume,openinterest\n\
//!             2023-05-01 09:30,10.5,11.2,10.1,11.0,1000,0\n";
//! let parser = StockCsvParser::new(FeedConfig::default())?;
//! let result = parser.parse_reader(data.as_bytes(), "600000")?;
//!
//! assert_eq!(result.stats.bars_loaded, 1);
//! assert_eq!(result.lines.current(Line::Close), Some(11.0));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! [`LineSink`]: crate::app::models::LineSink

pub mod column_mapping;
pub mod field_parsers;
pub mod line_parser;
pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use column_mapping::FieldMapping;
pub use line_parser::{load_line, parse_line};
pub use parser::StockCsvParser;
pub use stats::{ParseResult, ParseStats};
