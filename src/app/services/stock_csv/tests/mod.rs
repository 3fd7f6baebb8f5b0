//! Test utilities for stock CSV feed testing
//!
//! Shared fixtures and helpers used across the test modules.

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use std::io::Write;
use tempfile::NamedTempFile;

use crate::constants::SOURCE_TIMEZONE;

mod column_mapping_tests;
mod parser_tests;

/// Row with the combined date and time format
pub const INTRADAY_ROW: [&str; 6] = ["2023-05-01 09:30", "10.5", "11.2", "10.1", "11.0", "1000"];

/// Row with the date-only format
pub const DAILY_ROW: [&str; 6] = ["20230501", "10.5", "11.2", "10.1", "11.0", "1000"];

/// Local time in the source timezone
pub fn shanghai(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Tz> {
    SOURCE_TIMEZONE
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

/// Helper to create a daily stock CSV file with a header row
pub fn create_daily_csv() -> String {
    r#"date,open,high,low,close,volume,openinterest
20230103,10.00,10.40,9.90,10.30,125000,0
20230104,10.30,10.55,10.20,10.50,98000,0
20230105,10.50,10.60,10.10,10.15,143500,0
20230106,10.15,10.35,10.05,10.30,87000,0"#
        .to_string()
}

/// Helper to create an intraday stock CSV file without open interest
pub fn create_intraday_csv() -> String {
    r#"date,open,high,low,close,volume
2023-05-04 09:30,11.00,11.10,10.95,11.05,5200
2023-05-04 09:31,11.05,11.08,11.00,11.02,3100
2023-05-04 09:32,11.02,11.20,11.01,11.18,7600"#
        .to_string()
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{}", content).unwrap();
    temp_file
}
