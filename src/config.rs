//! Configuration management and validation.
//!
//! Provides the feed settings that sit around the line parser: header
//! handling, the field separator, an optional display name and the date
//! range of bars to keep.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::services::stock_csv::field_parsers::{is_date_only, parse_naive_datetime};
use crate::constants::{DEFAULT_HAS_HEADERS, DEFAULT_SEPARATOR};
use crate::{Error, Result};

/// Settings for loading one stock CSV feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Display name, defaults to the file name when loading from disk
    pub name: Option<String>,

    /// Skip the first row as a header
    pub headers: bool,

    /// Single-byte field separator
    pub separator: u8,

    /// Drop bars before this local time (source timezone)
    pub fromdate: Option<NaiveDateTime>,

    /// Stop at the first bar after this local time (source timezone)
    pub todate: Option<NaiveDateTime>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            name: None,
            headers: DEFAULT_HAS_HEADERS,
            separator: DEFAULT_SEPARATOR,
            fromdate: None,
            todate: None,
        }
    }
}

impl FeedConfig {
    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Enable or disable header skipping
    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }

    /// Set the field separator
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Keep only bars at or after `fromdate`
    pub fn with_fromdate(mut self, fromdate: NaiveDateTime) -> Self {
        self.fromdate = Some(fromdate);
        self
    }

    /// Stop loading after `todate`
    pub fn with_todate(mut self, todate: NaiveDateTime) -> Self {
        self.todate = Some(todate);
        self
    }

    /// Parse a date bound in either accepted input format
    pub fn parse_date_bound(text: &str) -> Result<NaiveDateTime> {
        parse_naive_datetime(text.trim()).map_err(|e| {
            Error::configuration(format!(
                "Invalid date bound: {} (expected 'YYYY-MM-DD HH:MM' or 'YYYYMMDD')",
                e
            ))
        })
    }

    /// Parse an upper date bound. A `YYYYMMDD` bound covers that whole day.
    pub fn parse_end_bound(text: &str) -> Result<NaiveDateTime> {
        let bound = Self::parse_date_bound(text)?;
        if !is_date_only(text.trim()) {
            return Ok(bound);
        }
        bound
            .date()
            .and_hms_micro_opt(23, 59, 59, 999_999)
            .ok_or_else(|| Error::configuration(format!("Invalid date bound: {}", text)))
    }

    /// Convert a separator given as text into a single byte
    pub fn parse_separator(text: &str) -> Result<u8> {
        let separator = match text {
            "\\t" | "tab" => "\t",
            other => other,
        };
        match separator.as_bytes() {
            [byte] => Ok(*byte),
            _ => Err(Error::configuration(format!(
                "Separator must be a single ASCII character, got '{}'",
                text
            ))),
        }
    }

    /// Check the configuration for contradictions
    pub fn validate(&self) -> Result<()> {
        let separator = self.separator;
        if !separator.is_ascii()
            || separator.is_ascii_alphanumeric()
            || matches!(separator, b'"' | b'\n' | b'\r' | b'.' | b'-')
        {
            return Err(Error::configuration(format!(
                "Unusable field separator {:?}",
                char::from(separator)
            )));
        }

        if let (Some(from), Some(to)) = (self.fromdate, self.todate) {
            if from > to {
                return Err(Error::configuration(format!(
                    "fromdate {} is after todate {}",
                    from, to
                )));
            }
        }

        debug!(
            "Feed configuration: headers={}, separator={:?}, fromdate={:?}, todate={:?}",
            self.headers,
            char::from(self.separator),
            self.fromdate,
            self.todate
        );
        Ok(())
    }

    /// Whether a bar at `local` falls before the configured start
    pub fn is_before_start(&self, local: &NaiveDateTime) -> bool {
        self.fromdate.is_some_and(|from| *local < from)
    }

    /// Whether a bar at `local` falls after the configured end
    pub fn is_after_end(&self, local: &NaiveDateTime) -> bool {
        self.todate.is_some_and(|to| *local > to)
    }
}
