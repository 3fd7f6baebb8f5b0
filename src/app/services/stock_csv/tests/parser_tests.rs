//! Tests for the stock CSV feed loader

use super::*;
use crate::app::models::Line;
use crate::app::services::stock_csv::StockCsvParser;
use crate::config::FeedConfig;
use crate::error::{Error, RowError};

fn parser(config: FeedConfig) -> StockCsvParser {
    StockCsvParser::new(config).unwrap()
}

#[test]
fn test_parse_daily_file() {
    let temp_file = create_temp_file(&create_daily_csv());
    let result = parser(FeedConfig::default())
        .parse_file(temp_file.path())
        .unwrap();

    assert_eq!(result.stats.total_records, 4);
    assert_eq!(result.stats.bars_loaded, 4);
    assert_eq!(result.lines.len(), 4);
    assert_eq!(result.lines.line(Line::Close), &[10.30, 10.50, 10.15, 10.30]);
    assert!(result.lines.line(Line::OpenInterest).iter().all(|oi| *oi == 0.0));

    let first = result.lines.bar(0).unwrap().unwrap();
    assert_eq!(first.datetime, shanghai(2023, 1, 3, 0, 0));
    assert_eq!(first.volume, 125000.0);
}

#[test]
fn test_file_name_is_default_feed_name() {
    let temp_file = create_temp_file(&create_daily_csv());
    let result = parser(FeedConfig::default())
        .parse_file(temp_file.path())
        .unwrap();
    let stem = temp_file.path().file_stem().unwrap().to_string_lossy();
    assert_eq!(result.name, stem);

    let named = parser(FeedConfig::default().with_name("600000"))
        .parse_file(temp_file.path())
        .unwrap();
    assert_eq!(named.name, "600000");
}

#[test]
fn test_parse_intraday_without_open_interest_column() {
    let result = parser(FeedConfig::default())
        .parse_reader(create_intraday_csv().as_bytes(), "intraday")
        .unwrap();

    assert_eq!(result.stats.bars_loaded, 3);
    let bars: Vec<_> = result.lines.bars().map(|bar| bar.unwrap()).collect();
    assert_eq!(bars[1].datetime, shanghai(2023, 5, 4, 9, 31));
    assert_eq!(bars[2].high, 11.20);
    assert_eq!(bars[2].openinterest, 0.0);
}

#[test]
fn test_no_headers() {
    let data = "20230103,10,11,9,10.5,100\n20230104,10.5,11,10,10.8,200\n";
    let result = parser(FeedConfig::default().with_headers(false))
        .parse_reader(data.as_bytes(), "raw")
        .unwrap();
    assert_eq!(result.stats.bars_loaded, 2);

    // With headers enabled the first data row is consumed as the header
    let result = parser(FeedConfig::default())
        .parse_reader(data.as_bytes(), "raw")
        .unwrap();
    assert_eq!(result.stats.bars_loaded, 1);
}

#[test]
fn test_custom_separator() {
    let data = "date;open;high;low;close;volume\n2023-05-01 09:30;10.5;11.2;10.1;11.0;1000\n";
    let result = parser(FeedConfig::default().with_separator(b';'))
        .parse_reader(data.as_bytes(), "semicolon")
        .unwrap();
    assert_eq!(result.lines.current(Line::High), Some(11.2));
}

#[test]
fn test_blank_lines_are_skipped() {
    let data = "date,open,high,low,close,volume\n\n20230103,1,2,0.5,1.5,10\n\n";
    let result = parser(FeedConfig::default())
        .parse_reader(data.as_bytes(), "blank")
        .unwrap();
    assert_eq!(result.stats.total_records, 1);
    assert_eq!(result.stats.bars_loaded, 1);
}

#[test]
fn test_date_range_filtering() {
    let config = FeedConfig::default()
        .with_fromdate(FeedConfig::parse_date_bound("20230104").unwrap())
        .with_todate(FeedConfig::parse_end_bound("20230105").unwrap());
    let result = parser(config)
        .parse_reader(create_daily_csv().as_bytes(), "ranged")
        .unwrap();

    assert_eq!(result.stats.before_fromdate, 1);
    assert!(result.stats.stopped_at_todate);
    assert_eq!(result.stats.bars_loaded, 2);
    assert_eq!(result.stats.total_records, 4);
    assert_eq!(result.lines.line(Line::Open), &[10.30, 10.50]);
    assert_eq!(
        result.stats.first_datetime.unwrap().to_string(),
        "2023-01-04 00:00:00"
    );
    assert_eq!(
        result.stats.last_datetime.unwrap().to_string(),
        "2023-01-05 00:00:00"
    );
}

#[test]
fn test_date_only_todate_keeps_intraday_bars_of_that_day() {
    let data = "date,open,high,low,close,volume\n\
                2023-01-05 09:30,1,2,0.5,1.5,10\n\
                2023-01-05 15:00,1,2,0.5,1.6,20\n\
                2023-01-06 09:30,1,2,0.5,1.7,30\n";
    let config = FeedConfig::default().with_todate(FeedConfig::parse_end_bound("20230105").unwrap());
    let result = parser(config).parse_reader(data.as_bytes(), "intraday").unwrap();

    assert_eq!(result.stats.bars_loaded, 2);
    assert!(result.stats.stopped_at_todate);
    assert_eq!(result.lines.line(Line::Close), &[1.5, 1.6]);
    assert_eq!(
        result.stats.last_datetime.unwrap().to_string(),
        "2023-01-05 15:00:00"
    );
}

#[test]
fn test_todate_stops_before_malformed_tail() {
    let data = "date,open,high,low,close,volume\n\
                20230103,1,2,0.5,1.5,10\n\
                20230110,1,2,0.5,1.5,10\n\
                garbage,1,2,0.5,1.5,10\n";
    let config = FeedConfig::default().with_todate(FeedConfig::parse_end_bound("20230105").unwrap());
    let result = parser(config).parse_reader(data.as_bytes(), "tail").unwrap();

    assert_eq!(result.stats.bars_loaded, 1);
    assert!(result.stats.stopped_at_todate);
}

#[test]
fn test_unparseable_date_stops_loading() {
    let data = "date,open,high,low,close,volume\n\
                20230103,1,2,0.5,1.5,10\n\
                not-a-date,1,2,0.5,1.5,10\n\
                20230105,1,2,0.5,1.5,10\n";
    let err = parser(FeedConfig::default())
        .parse_reader(data.as_bytes(), "broken")
        .unwrap_err();

    match &err {
        Error::MalformedRow {
            source_name,
            line,
            source,
        } => {
            assert_eq!(source_name, "broken");
            assert_eq!(*line, 3);
            assert_eq!(source, &RowError::unparseable_date("not-a-date"));
        }
        other => panic!("Expected MalformedRow, got {other:?}"),
    }
    assert!(err.to_string().contains("not-a-date"));
}

#[test]
fn test_non_numeric_field_stops_loading() {
    let data = "date,open,high,low,close,volume\n20230103,1,2,n/a,1.5,10\n";
    let err = parser(FeedConfig::default())
        .parse_reader(data.as_bytes(), "numeric")
        .unwrap_err();

    assert!(matches!(
        err.row_error(),
        Some(RowError::InvalidNumber { field: "low", .. })
    ));
}

#[test]
fn test_short_row_stops_loading() {
    let data = "date,open,high,low,close,volume\n20230103,1,2,0.5\n";
    let err = parser(FeedConfig::default())
        .parse_reader(data.as_bytes(), "short")
        .unwrap_err();

    assert!(matches!(
        err.row_error(),
        Some(RowError::MissingField { field: "close", position: 4 })
    ));
}

#[test]
fn test_missing_file() {
    let err = parser(FeedConfig::default())
        .parse_file(std::path::Path::new("/nonexistent/600000.csv"))
        .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_invalid_config_rejected() {
    let config = FeedConfig::default().with_separator(b'x');
    assert!(StockCsvParser::new(config).is_err());
}

#[test]
fn test_empty_input() {
    let result = parser(FeedConfig::default())
        .parse_reader("date,open,high,low,close,volume\n".as_bytes(), "empty")
        .unwrap();
    assert!(result.lines.is_empty());
    assert_eq!(result.stats.total_records, 0);
}
