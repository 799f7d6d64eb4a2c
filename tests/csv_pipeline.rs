//! End-to-end checks for pasted CSV: ingest, analyze, export, re-ingest.

use chart_table::data::{to_csv_string, DataLoader, Value, ValueKind};
use chart_table::stats::{TrendAnalyzer, TrendSignal};
use chart_table::{Analysis, AppConfig, DataError, Pipeline, Source};

const SAMPLES: [&str; 4] = [
    "Date,Open,High,Low,Close\n2025-08-01,81018.72,81500.00,80800.00,81200.00",
    "Name,Qty,Price\n\"Widget, large\",3,9.5\nGadget,,12\n",
    "A,A,\n1,x,2025-01-02\n2,y,2025/01/03\n,,\n",
    "Symbol,Volume\nBTC,100000000000\nETH,-42\n",
];

fn ohlc(closes: &[f64]) -> String {
    let mut text = String::from("Date,Open,High,Low,Close\n");
    for (i, close) in closes.iter().enumerate() {
        text.push_str(&format!(
            "2025-07-{:02},{:.2},{:.2},{:.2},{:.2}\n",
            i + 1,
            close - 1.0,
            close + 5.0,
            close - 5.0,
            close
        ));
    }
    text
}

#[test]
fn row_and_column_counts_follow_input() {
    for text in SAMPLES {
        let ds = DataLoader::parse_csv(text).unwrap();
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        let header_fields = lines.next().unwrap().split(',').count();
        assert_eq!(ds.column_count(), header_fields, "{}", text);
        assert_eq!(ds.row_count(), lines.count(), "{}", text);
    }
}

#[test]
fn export_reingests_to_same_dataset() {
    for text in SAMPLES {
        let ds = DataLoader::parse_csv(text).unwrap();
        let exported = to_csv_string(&ds).unwrap();
        let again = DataLoader::parse_csv(&exported).unwrap();
        assert_eq!(again, ds, "round trip of {:?} via {:?}", text, exported);
    }
}

#[test]
fn exported_analysis_round_trips_with_sma_column() {
    let closes: Vec<f64> = (0..22).map(|i| 100.0 + i as f64 * 0.5).collect();
    let ds = DataLoader::parse_csv(&ohlc(&closes)).unwrap();
    let summary = TrendAnalyzer::analyze(&ds, "Close", 20).unwrap();
    let with_sma = summary.append_to(&ds);

    let exported = to_csv_string(&with_sma).unwrap();
    assert!(exported.starts_with("Date,Open,High,Low,Close,20_Day_SMA\n"));
    let first_row = exported.lines().nth(1).unwrap();
    assert!(first_row.ends_with(','), "undefined average exports empty: {}", first_row);

    let again = DataLoader::parse_csv(&exported).unwrap();
    assert_eq!(again.columns()[5].kind, ValueKind::Float);
    assert_eq!(again.rows()[0][5], Value::Missing);
    assert_eq!(again, with_sma);
}

#[test]
fn mismatched_row_is_parse_error() {
    let err = DataLoader::parse_csv("A,B\n1,2,3").unwrap_err();
    assert!(matches!(err, DataError::Parse(_)));
    assert!(err.user_message().contains("header row"));
}

#[test]
fn pipeline_classifies_trends() {
    let pipeline = Pipeline::new(AppConfig::default()).unwrap();

    let rising: Vec<f64> = (0..25).map(|i| 81000.0 + i as f64 * 10.0).collect();
    let reports = pipeline.run(&Source::CsvText(ohlc(&rising))).unwrap();
    let summary = reports[0].analysis.summary().unwrap();
    assert_eq!(summary.signal, TrendSignal::Bullish);
    assert!(summary.latest_average.unwrap() < summary.latest_value.unwrap());

    let falling: Vec<f64> = rising.iter().rev().copied().collect();
    let reports = pipeline.run(&Source::CsvText(ohlc(&falling))).unwrap();
    assert_eq!(reports[0].analysis.summary().unwrap().signal, TrendSignal::Bearish);

    let short = "Date,Open,High,Low,Close\n2025-08-01,81018.72,81500.00,80800.00,81200.00";
    let reports = pipeline.run(&Source::CsvText(short.to_string())).unwrap();
    assert_eq!(
        reports[0].analysis.summary().unwrap().signal,
        TrendSignal::InsufficientData
    );
}

#[test]
fn non_numeric_close_keeps_raw_table() {
    let pipeline = Pipeline::new(AppConfig::default()).unwrap();
    let reports = pipeline
        .run(&Source::CsvText("Date,Close\n2025-08-01,n/a\n".to_string()))
        .unwrap();
    let report = &reports[0];
    assert!(matches!(
        report.analysis,
        Analysis::Skipped(DataError::NonNumericColumn { .. })
    ));
    assert_eq!(report.dataset.column_names(), vec!["Date", "Close"]);
    assert_eq!(
        String::from_utf8(report.export.bytes.clone()).unwrap(),
        "Date,Close\n2025-08-01,n/a\n"
    );
}

#[test]
fn configured_column_and_window_are_used() {
    let mut config = AppConfig::default();
    config.analysis.column = "Price".to_string();
    config.analysis.window = 2;
    let pipeline = Pipeline::new(config).unwrap();

    let reports = pipeline
        .run(&Source::CsvText("Price\n1\n2\n4\n".to_string()))
        .unwrap();
    let summary = reports[0].analysis.summary().unwrap();
    assert_eq!(summary.rolling_average, vec![None, Some(1.5), Some(3.0)]);
    assert_eq!(summary.signal, TrendSignal::Bullish);
    assert_eq!(reports[0].dataset.column_names(), vec!["Price", "2_Day_SMA"]);
}
