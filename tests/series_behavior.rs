//! Behavior tests for the price series builder and the 52-week range.

use earnlens_tests::{
    date, fifty_two_week_range, goog_history, DailyQuote, PriceSeries, QuoteHistory,
};

#[test]
fn series_keeps_one_row_per_input_date() {
    let history = goog_history();
    let series = PriceSeries::build(&history).expect("series");

    assert_eq!(series.len(), history.len());
}

#[test]
fn series_preserves_the_newest_first_feed_order() {
    let series = PriceSeries::build(&goog_history()).expect("series");

    let dates: Vec<String> = series
        .points()
        .iter()
        .map(|point| point.date.to_string())
        .collect();
    assert_eq!(
        dates,
        ["2020-04-29", "2020-04-28", "2020-04-27", "2020-04-24"]
    );
    assert_eq!(series.points()[3].close, 1279.31);
}

#[test]
fn each_row_derives_exactly_a_close_and_a_return() {
    let series = PriceSeries::build(&goog_history()).expect("series");

    let row = serde_json::to_value(series.points()[1]).expect("row json");
    let columns = row.as_object().expect("row object");
    assert_eq!(columns.len(), 3);
    assert!(columns.contains_key("date"));
    assert!(columns.contains_key("close"));
    assert!(columns.contains_key("window_return"));
}

#[test]
fn boundary_rows_stay_in_the_series_with_a_missing_return() {
    let series = PriceSeries::build(&goog_history()).expect("series");

    assert!(series.points()[0].window_return.is_none());
    assert!(series.points()[3].window_return.is_none());
}

#[test]
fn interior_returns_span_the_adjacent_sessions() {
    let series = PriceSeries::build(&goog_history()).expect("series");

    let expected_28 = (1341.48f64 / 1275.88).ln();
    let expected_27 = (1233.67f64 / 1279.31).ln();
    let actual_28 = series.points()[1].window_return.expect("return");
    let actual_27 = series.points()[2].window_return.expect("return");

    assert!((actual_28 - expected_28).abs() < 1e-12);
    assert!((actual_27 - expected_27).abs() < 1e-12);
    assert!(actual_28 > 0.0);
    assert!(actual_27 < 0.0);
}

#[test]
fn empty_history_yields_an_empty_series() {
    let history = QuoteHistory::from_entries(Vec::new()).expect("empty history");
    let series = PriceSeries::build(&history).expect("series");

    assert!(series.is_empty());
}

#[test]
fn non_numeric_close_fails_with_the_offending_value() {
    let history = QuoteHistory::from_entries(vec![(
        date("2020-04-29"),
        DailyQuote::new("1341.46", "1359.99", "1325.34", "not-a-price", "3764617"),
    )])
    .expect("history");

    let error = PriceSeries::build(&history).expect_err("must fail");
    assert_eq!(error.field, "close");
    assert_eq!(error.value, "not-a-price");
    assert_eq!(error.date, date("2020-04-29"));
}

#[test]
fn range_spans_the_extremes_of_the_window() {
    let range = fifty_two_week_range(&goog_history()).expect("range");

    assert_eq!(range.low, 1232.20);
    assert_eq!(range.high, 1359.99);
    assert_eq!(range.last_close, 1341.48);
    assert!(range.low <= range.high);
}
