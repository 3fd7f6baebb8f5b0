//! Static field-to-column mapping for the stock CSV format
//!
//! The mapping is declared once and describes the schema to consumers. It is
//! not enforced against the line parser, which consumes tokens positionally
//! and never reads the open interest column.

use crate::app::models::Field;

/// Immutable association between field names and column positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    entries: [(Field, usize); 7],
}

impl FieldMapping {
    /// The stock CSV layout: `date, open, high, low, close, volume, openinterest`
    pub const fn stock_csv() -> Self {
        Self {
            entries: [
                (Field::Date, 0),
                (Field::Open, 1),
                (Field::High, 2),
                (Field::Low, 3),
                (Field::Close, 4),
                (Field::Volume, 5),
                (Field::OpenInterest, 6),
            ],
        }
    }

    /// Field names in declaration order
    pub fn datafields(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(field, _)| field.name()).collect()
    }

    /// `(field, column)` pairs in declaration order
    pub fn entries(&self) -> &[(Field, usize)] {
        &self.entries
    }

    /// Column position of a field
    pub fn position(&self, field: Field) -> usize {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, index)| *index)
            .unwrap_or(field as usize)
    }

    /// Get the index for a given field name
    pub fn get_index(&self, name: &str) -> Option<usize> {
        Field::from_name(name).map(|field| self.position(field))
    }

    /// Check if a field name is declared
    pub fn has_column(&self, name: &str) -> bool {
        self.get_index(name).is_some()
    }

    /// Highest mapped column index
    pub fn max_position(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, index)| *index)
            .max()
            .unwrap_or_default()
    }

    /// Minimum number of tokens a row needs to cover every mapped column
    pub fn min_row_width(&self) -> usize {
        self.max_position() + 1
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::stock_csv()
    }
}
