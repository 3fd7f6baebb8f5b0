//! Internal date-number encoding.
//!
//! Line buffers store every value as `f64`, timestamps included. A timestamp
//! is encoded as its UTC proleptic Gregorian day ordinal (0001-01-01 = 1)
//! plus the elapsed fraction of that day. Decoding rounds the fraction to the
//! nearest microsecond and snaps values within a few microseconds of a whole
//! second onto it, so timestamps with whole-second precision round-trip
//! exactly.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::datenum::{
    HOURS_PER_DAY, MICROS_PER_DAY, MICROS_PER_DAY_I64, MINUTES_PER_DAY, SECONDS_PER_DAY,
};
use crate::{Error, Result};

const MICROS_PER_SECOND: i64 = 1_000_000;

/// Float noise at present-day ordinals is a few microseconds
const ROUNDING_TOLERANCE_MICROS: i64 = 10;

/// A timestamp in the internal numeric date encoding
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateNum(f64);

impl DateNum {
    /// Wrap a raw value read back from a line buffer
    pub const fn from_raw(value: f64) -> Self {
        Self(value)
    }

    /// Raw floating-point value as stored in a line buffer
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Encode a zone-aware timestamp. The instant is converted to UTC first.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self::from_naive_utc(&dt.naive_utc())
    }

    /// Encode a naive timestamp that is already expressed in UTC
    pub fn from_naive_utc(naive: &NaiveDateTime) -> Self {
        let ordinal = f64::from(naive.date().num_days_from_ce());
        let time = naive.time();
        let fraction = f64::from(time.hour()) / HOURS_PER_DAY
            + f64::from(time.minute()) / MINUTES_PER_DAY
            + f64::from(time.second()) / SECONDS_PER_DAY
            + f64::from(time.nanosecond() / 1_000) / MICROS_PER_DAY;
        Self(ordinal + fraction)
    }

    /// Decode to a naive UTC timestamp
    pub fn to_naive_utc(self) -> Result<NaiveDateTime> {
        if !self.0.is_finite() {
            return Err(Error::datenum_out_of_range(self.0));
        }

        let ordinal = self.0.floor();
        if ordinal < f64::from(i32::MIN) || ordinal > f64::from(i32::MAX) {
            return Err(Error::datenum_out_of_range(self.0));
        }

        let mut micros = ((self.0 - ordinal) * MICROS_PER_DAY).round() as i64;
        let sub_second = micros.rem_euclid(MICROS_PER_SECOND);
        if sub_second < ROUNDING_TOLERANCE_MICROS {
            micros -= sub_second;
        } else if sub_second > MICROS_PER_SECOND - ROUNDING_TOLERANCE_MICROS {
            micros += MICROS_PER_SECOND - sub_second;
        }

        let mut days = ordinal as i32;
        if micros >= MICROS_PER_DAY_I64 {
            micros -= MICROS_PER_DAY_I64;
            days += 1;
        }

        let date = NaiveDate::from_num_days_from_ce_opt(days)
            .ok_or_else(|| Error::datenum_out_of_range(self.0))?;
        date.and_hms_opt(0, 0, 0)
            .and_then(|midnight| midnight.checked_add_signed(TimeDelta::microseconds(micros)))
            .ok_or_else(|| Error::datenum_out_of_range(self.0))
    }

    /// Decode to a UTC timestamp
    pub fn to_utc(self) -> Result<DateTime<Utc>> {
        Ok(self.to_naive_utc()?.and_utc())
    }

    /// Decode and express the instant in the given timezone
    pub fn to_timezone<Tz: TimeZone>(self, tz: &Tz) -> Result<DateTime<Tz>> {
        Ok(tz.from_utc_datetime(&self.to_naive_utc()?))
    }
}

impl From<DateNum> for f64 {
    fn from(value: DateNum) -> Self {
        value.0
    }
}

impl fmt::Display for DateNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
