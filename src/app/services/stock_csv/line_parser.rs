//! Per-row parsing for the stock CSV format
//!
//! A row is consumed strictly in order: the date token first, then `open`,
//! `high`, `low`, `close` and `volume`. Anything after the volume token is
//! ignored and open interest is always written as zero, although the schema
//! maps it to column 6.

use tracing::trace;

use super::field_parsers::{next_token, parse_number, parse_source_datetime};
use crate::app::models::{Bar, Field, LineSink};
use crate::error::RowError;

/// Numeric fields in the order they are read after the date
const NUMERIC_FIELDS: [Field; 5] = [
    Field::Open,
    Field::High,
    Field::Low,
    Field::Close,
    Field::Volume,
];

/// Parse one tokenized row into a bar without writing it anywhere
pub fn parse_line<I, S>(tokens: I) -> Result<Bar, RowError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens = tokens.into_iter();

    let date_text = next_token(&mut tokens, Field::Date.name(), 0)?;
    let datetime = parse_source_datetime(date_text.as_ref())?;

    let mut values = [0.0; 5];
    for (offset, (field, slot)) in NUMERIC_FIELDS.iter().zip(values.iter_mut()).enumerate() {
        let token = next_token(&mut tokens, field.name(), offset + 1)?;
        *slot = parse_number(field.name(), token.as_ref())?;
    }
    let [open, high, low, close, volume] = values;

    Ok(Bar::new(datetime, open, high, low, close, volume))
}

/// Parse one tokenized row and write it into the sink's current slot.
///
/// `Ok(())` means one bar was emitted. On error nothing has been written:
/// the row is parsed completely before the first slot is touched.
pub fn load_line<I, S, K>(tokens: I, sink: &mut K) -> Result<(), RowError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    K: LineSink + ?Sized,
{
    let bar = parse_line(tokens)?;
    trace!("Loaded bar at {}", bar.datetime);
    bar.write_to(sink);
    Ok(())
}
