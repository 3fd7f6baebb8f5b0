//! Data models for parsed bars and the line buffers they are written into
//!
//! A feed owns one [`LineBuffer`]: seven `f64` series (`datetime`, `open`,
//! `high`, `low`, `close`, `volume`, `openinterest`), one slot per bar.
//! Parsers write through the [`LineSink`] trait so any buffer implementation
//! can receive bars.

use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Result;
use crate::constants::{DATA_FIELDS, DEFAULT_OPEN_INTEREST, LINE_NAMES, SOURCE_TIMEZONE};
use crate::datenum::DateNum;

/// Logical input field of the stock CSV format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Date,
    Open,
    High,
    Low,
    Close,
    Volume,
    OpenInterest,
}

impl Field {
    /// All fields in declaration order
    pub const ALL: [Field; 7] = [
        Field::Date,
        Field::Open,
        Field::High,
        Field::Low,
        Field::Close,
        Field::Volume,
        Field::OpenInterest,
    ];

    /// Declared field name
    pub fn name(self) -> &'static str {
        DATA_FIELDS[self as usize]
    }

    /// Look up a field by its declared name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Output line this field is written to
    pub fn line(self) -> Line {
        Line::ALL[self as usize]
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output slot of a line buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Line {
    Datetime,
    Open,
    High,
    Low,
    Close,
    Volume,
    OpenInterest,
}

impl Line {
    /// All lines in slot order
    pub const ALL: [Line; 7] = [
        Line::Datetime,
        Line::Open,
        Line::High,
        Line::Low,
        Line::Close,
        Line::Volume,
        Line::OpenInterest,
    ];

    /// Line name as exposed to consumers
    pub fn name(self) -> &'static str {
        LINE_NAMES[self as usize]
    }

    /// Slot index inside a line buffer
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One parsed row of the stock CSV format
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    /// Input time labeled with the source timezone
    pub datetime: DateTime<Tz>,

    /// Internal numeric encoding of `datetime`
    pub datenum: DateNum,

    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,

    /// Always zero, the input column is never read
    pub openinterest: f64,
}

impl Bar {
    /// Build a bar from a labeled timestamp and its price/volume values
    pub fn new(
        datetime: DateTime<Tz>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        let datenum = DateNum::from_datetime(&datetime);
        Self {
            datetime,
            datenum,
            open,
            high,
            low,
            close,
            volume,
            openinterest: DEFAULT_OPEN_INTEREST,
        }
    }

    /// Naive local time in the source timezone
    pub fn local_datetime(&self) -> NaiveDateTime {
        self.datetime.naive_local()
    }

    /// Value held for a given output line
    pub fn value(&self, line: Line) -> f64 {
        match line {
            Line::Datetime => self.datenum.value(),
            Line::Open => self.open,
            Line::High => self.high,
            Line::Low => self.low,
            Line::Close => self.close,
            Line::Volume => self.volume,
            Line::OpenInterest => self.openinterest,
        }
    }

    /// Write every line of this bar into the sink's current slot
    pub fn write_to<S: LineSink + ?Sized>(&self, sink: &mut S) {
        for line in Line::ALL {
            sink.set(line, self.value(line));
        }
    }
}

/// Destination for parsed values, one current slot per line
pub trait LineSink {
    /// Write `value` into the current slot of `line`
    fn set(&mut self, line: Line, value: f64);
}

/// Columnar storage for the seven output lines of a feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineBuffer {
    lines: [Vec<f64>; 7],
}

impl LineBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` bars
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: std::array::from_fn(|_| Vec::with_capacity(capacity)),
        }
    }

    /// Open a new current slot on every line, initialized to NaN
    pub fn forward(&mut self) {
        for line in &mut self.lines {
            line.push(f64::NAN);
        }
    }

    /// Drop the current slot from every line
    pub fn backward(&mut self) {
        for line in &mut self.lines {
            line.pop();
        }
    }

    /// Number of bars stored
    pub fn len(&self) -> usize {
        self.lines[0].len()
    }

    /// Whether no bars are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full series of one line
    pub fn line(&self, line: Line) -> &[f64] {
        &self.lines[line.index()]
    }

    /// Value of `line` at bar `index`
    pub fn get(&self, line: Line, index: usize) -> Option<f64> {
        self.lines[line.index()].get(index).copied()
    }

    /// Value of `line` in the current (most recent) slot
    pub fn current(&self, line: Line) -> Option<f64> {
        self.lines[line.index()].last().copied()
    }

    /// Reassemble the bar stored at `index`, relabeled in the source timezone
    pub fn bar(&self, index: usize) -> Option<Result<Bar>> {
        if index >= self.len() {
            return None;
        }
        let value = |line: Line| self.lines[line.index()][index];
        let datenum = DateNum::from_raw(value(Line::Datetime));
        Some(datenum.to_timezone(&SOURCE_TIMEZONE).map(|datetime| Bar {
            datetime,
            datenum,
            open: value(Line::Open),
            high: value(Line::High),
            low: value(Line::Low),
            close: value(Line::Close),
            volume: value(Line::Volume),
            openinterest: value(Line::OpenInterest),
        }))
    }

    /// Iterate over all stored bars in order
    pub fn bars(&self) -> impl Iterator<Item = Result<Bar>> + '_ {
        (0..self.len()).filter_map(|index| self.bar(index))
    }
}

impl LineSink for LineBuffer {
    fn set(&mut self, line: Line, value: f64) {
        // A write without a prior forward() opens the slot itself
        if self.is_empty() {
            self.forward();
        }
        if let Some(slot) = self.lines[line.index()].last_mut() {
            *slot = value;
        }
    }
}
