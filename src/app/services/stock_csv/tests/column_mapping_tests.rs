//! Tests for the declared field mapping

use crate::app::models::Field;
use crate::app::services::stock_csv::column_mapping::FieldMapping;
use crate::constants::DATA_FIELDS;

#[test]
fn test_stock_csv_layout() {
    let mapping = FieldMapping::stock_csv();

    assert_eq!(mapping.datafields(), DATA_FIELDS.to_vec());
    for (index, field) in Field::ALL.into_iter().enumerate() {
        assert_eq!(mapping.position(field), index);
    }
    assert_eq!(mapping.entries().len(), 7);
}

#[test]
fn test_name_lookup() {
    let mapping = FieldMapping::default();

    assert_eq!(mapping.get_index("date"), Some(0));
    assert_eq!(mapping.get_index("volume"), Some(5));
    assert_eq!(mapping.get_index("openinterest"), Some(6));
    assert_eq!(mapping.get_index("amount"), None);
    assert!(mapping.has_column("close"));
    assert!(!mapping.has_column("Close"));
}

#[test]
fn test_row_width() {
    let mapping = FieldMapping::stock_csv();
    assert_eq!(mapping.max_position(), 6);
    assert_eq!(mapping.min_row_width(), 7);
}
