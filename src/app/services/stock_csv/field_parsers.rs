//! Field parsing utilities for stock CSV rows
//!
//! Dates are tried against the two accepted formats in order and then
//! labeled with the fixed source timezone. Numbers are plain `f64`
//! conversions without range checks.
//!
//! chrono's `%Y` takes one to four digits and its whitespace items match
//! nothing at all, so each token is checked against an anchored shape
//! before chrono sees it.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::OnceLock;

use crate::constants::{
    DATE_FORMAT, DATE_PATTERN, DATETIME_FORMAT, DATETIME_PATTERN, SOURCE_STANDARD_OFFSET_SECS,
    SOURCE_TIMEZONE,
};
use crate::error::RowError;

static DATETIME_RE: OnceLock<Regex> = OnceLock::new();
static DATE_RE: OnceLock<Regex> = OnceLock::new();

fn datetime_shape() -> &'static Regex {
    DATETIME_RE.get_or_init(|| Regex::new(DATETIME_PATTERN).expect("valid datetime pattern"))
}

fn date_shape() -> &'static Regex {
    DATE_RE.get_or_init(|| Regex::new(DATE_PATTERN).expect("valid date pattern"))
}

/// Parse date text as `YYYY-MM-DD HH:MM`, falling back to `YYYYMMDD` (midnight)
pub fn parse_naive_datetime(text: &str) -> Result<NaiveDateTime, RowError> {
    if datetime_shape().is_match(text) {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, DATETIME_FORMAT) {
            return Ok(dt);
        }
    }

    if date_shape().is_match(text) {
        if let Some(dt) = NaiveDate::parse_from_str(text, DATE_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return Ok(dt);
        }
    }

    Err(RowError::unparseable_date(text))
}

/// Whether text has the date-only `YYYYMMDD` shape
pub fn is_date_only(text: &str) -> bool {
    date_shape().is_match(text)
}

/// Attach the source timezone to a naive local time.
///
/// The wall-clock value is kept as is. Local times that are ambiguous or
/// skipped by a historical DST transition take the standard-offset reading.
pub fn localize(naive: &NaiveDateTime) -> DateTime<Tz> {
    match SOURCE_TIMEZONE.from_local_datetime(naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(..) | LocalResult::None => {
            let utc = *naive - TimeDelta::seconds(i64::from(SOURCE_STANDARD_OFFSET_SECS));
            SOURCE_TIMEZONE.from_utc_datetime(&utc)
        }
    }
}

/// Parse date text and label it with the source timezone
pub fn parse_source_datetime(text: &str) -> Result<DateTime<Tz>, RowError> {
    parse_naive_datetime(text).map(|naive| localize(&naive))
}

/// Parse a numeric token, ignoring surrounding whitespace
pub fn parse_number(field: &'static str, text: &str) -> Result<f64, RowError> {
    text.trim()
        .parse::<f64>()
        .map_err(|e| RowError::invalid_number(field, text, e))
}

/// Pull the next token of a row, naming the field it was meant for
pub fn next_token<I, S>(
    tokens: &mut I,
    field: &'static str,
    position: usize,
) -> Result<S, RowError>
where
    I: Iterator<Item = S>,
{
    tokens
        .next()
        .ok_or_else(|| RowError::missing_field(field, position))
}
