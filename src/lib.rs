//! Stock CSV Feed Library
//!
//! A data feed for backtesting engines that reads the stock CSV layout
//! (`date, open, high, low, close, volume, openinterest`) into columnar line
//! buffers.
//!
//! This library provides tools for:
//! - Parsing rows with a `YYYY-MM-DD HH:MM` / `YYYYMMDD` date fallback
//! - Labeling every timestamp with the fixed `Asia/Shanghai` timezone
//! - Encoding timestamps as floating-point date numbers for line storage
//! - Loading whole files with header skipping and date-range filtering
//! - Typed errors that stop loading at the first malformed row

pub mod config;
pub mod constants;
pub mod datenum;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod stock_csv;
    }
}

// CLI modules
pub mod cli;

// Re-export commonly used types
pub use app::models::{Bar, Field, Line, LineBuffer, LineSink};
pub use app::services::stock_csv::{FieldMapping, StockCsvParser, load_line, parse_line};
pub use config::FeedConfig;
pub use datenum::DateNum;
pub use error::{Error, Result, RowError};
