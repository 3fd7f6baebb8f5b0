//! Application constants for the stock CSV feed
//!
//! Fixed timezone, accepted date formats, the declared field schema and the
//! constants of the internal date-number encoding.

use chrono_tz::Tz;

// =============================================================================
// Source Data Conventions
// =============================================================================

/// Timezone imposed on every parsed timestamp.
///
/// Input rows carry naive local times; this zone is attached as a label and
/// never inferred from the content.
pub const SOURCE_TIMEZONE: Tz = chrono_tz::Asia::Shanghai;

/// Standard UTC offset of [`SOURCE_TIMEZONE`] in seconds (+08:00)
pub const SOURCE_STANDARD_OFFSET_SECS: i32 = 8 * 3600;

/// Primary datetime format: `YYYY-MM-DD HH:MM`
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Fallback date-only format: `YYYYMMDD` (midnight)
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Shape a primary-format token must have before chrono reads it
pub const DATETIME_PATTERN: &str = r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}\s+[0-9]{1,2}:[0-9]{1,2}$";

/// Shape a fallback-format token must have before chrono reads it
pub const DATE_PATTERN: &str = r"^[0-9]{8}$";

/// Open interest written for every bar; the column is declared but not read
pub const DEFAULT_OPEN_INTEREST: f64 = 0.0;

// =============================================================================
// Declared Schema
// =============================================================================

/// Field names in declaration order
pub const DATA_FIELDS: &[&str] = &[
    "date",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "openinterest",
];

/// Output line names in slot order
pub const LINE_NAMES: &[&str] = &[
    "datetime",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "openinterest",
];

// =============================================================================
// Feed Defaults
// =============================================================================

/// Input files carry a header row unless told otherwise
pub const DEFAULT_HAS_HEADERS: bool = true;

/// Default field separator
pub const DEFAULT_SEPARATOR: u8 = b',';

/// File extension picked up when walking directories
pub const CSV_EXTENSION: &str = "csv";

// =============================================================================
// Date-Number Encoding
// =============================================================================

pub mod datenum {
    pub const HOURS_PER_DAY: f64 = 24.0;
    pub const MINUTES_PER_DAY: f64 = HOURS_PER_DAY * 60.0;
    pub const SECONDS_PER_DAY: f64 = MINUTES_PER_DAY * 60.0;
    pub const MICROS_PER_DAY: f64 = SECONDS_PER_DAY * 1_000_000.0;

    /// Microseconds in a day, as an integer for exact decoding
    pub const MICROS_PER_DAY_I64: i64 = 86_400_000_000;
}

/// Check whether a path extension marks a CSV file (case-insensitive)
pub fn is_csv_extension(extension: &str) -> bool {
    extension.eq_ignore_ascii_case(CSV_EXTENSION)
}
