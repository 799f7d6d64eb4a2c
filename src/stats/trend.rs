//! Trend Analysis Module
//! Simple moving average over a price column and the latest-value signal.

use crate::data::{Dataset, Value, ValueKind};
use crate::error::DataError;
use statrs::statistics::Statistics;
use std::fmt;

/// Column conventionally holding the closing price.
pub const DEFAULT_PRICE_COLUMN: &str = "Close";
/// Default moving average window, in rows.
pub const DEFAULT_WINDOW: usize = 20;

/// Latest close relative to its moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendSignal {
    Bullish,
    Bearish,
    Neutral,
    InsufficientData,
}

impl TrendSignal {
    fn classify(latest_value: Option<f64>, latest_average: Option<f64>) -> Self {
        match (latest_value, latest_average) {
            (Some(v), Some(avg)) if v > avg => TrendSignal::Bullish,
            (Some(v), Some(avg)) if v < avg => TrendSignal::Bearish,
            (Some(_), Some(_)) => TrendSignal::Neutral,
            _ => TrendSignal::InsufficientData,
        }
    }

    /// One-line conclusion for display.
    pub fn conclusion(&self) -> &'static str {
        match self {
            TrendSignal::Bullish => {
                "The short-term trend is currently bullish (above the moving average)."
            }
            TrendSignal::Bearish => {
                "The short-term trend is currently bearish (below the moving average)."
            }
            TrendSignal::Neutral => "The latest close sits exactly on the moving average.",
            TrendSignal::InsufficientData => {
                "Not enough rows to compute the moving average for the latest close."
            }
        }
    }
}

impl fmt::Display for TrendSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrendSignal::Bullish => "bullish",
            TrendSignal::Bearish => "bearish",
            TrendSignal::Neutral => "neutral",
            TrendSignal::InsufficientData => "insufficient data",
        };
        f.write_str(s)
    }
}

/// Result of analyzing one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSummary {
    pub column: String,
    pub window: usize,
    /// Price column values, one per row.
    pub values: Vec<Option<f64>>,
    /// Moving average per row; `None` until a full window is available.
    pub rolling_average: Vec<Option<f64>>,
    pub latest_value: Option<f64>,
    pub latest_average: Option<f64>,
    pub signal: TrendSignal,
}

impl TrendSummary {
    /// Name of the appended moving average column, e.g. `20_Day_SMA`.
    pub fn average_column_name(&self) -> String {
        format!("{}_Day_SMA", self.window)
    }

    /// Copy of `dataset` with the moving average appended as a float column.
    pub fn append_to(&self, dataset: &Dataset) -> Dataset {
        let values = self
            .rolling_average
            .iter()
            .map(|avg| avg.map(Value::Float).unwrap_or(Value::Missing))
            .collect();
        dataset.with_column(&self.average_column_name(), ValueKind::Float, values)
    }
}

/// Moving average calculator.
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    /// Analyze `column` of `dataset` with a `window`-row simple moving average.
    pub fn analyze(dataset: &Dataset, column: &str, window: usize) -> Result<TrendSummary, DataError> {
        if window == 0 {
            return Err(DataError::InvalidWindow);
        }

        let (index, meta) = dataset
            .column(column)
            .ok_or_else(|| DataError::MissingColumn(column.to_string()))?;
        if !meta.kind.is_numeric() {
            return Err(DataError::NonNumericColumn {
                column: column.to_string(),
                kind: meta.kind.to_string(),
            });
        }

        let values: Vec<Option<f64>> = dataset.column_values(index).map(Value::as_f64).collect();
        let rolling_average = Self::rolling_mean(&values, window);

        let latest_value = values.last().copied().flatten();
        let latest_average = rolling_average.last().copied().flatten();

        Ok(TrendSummary {
            column: column.to_string(),
            window,
            signal: TrendSignal::classify(latest_value, latest_average),
            values,
            rolling_average,
            latest_value,
            latest_average,
        })
    }

    /// Simple moving average.
    ///
    /// Entry `i` is the mean of `values[i + 1 - window..=i]`; it is `None` for
    /// `i < window - 1` and for any window that contains a missing value.
    pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
        if window == 0 {
            return vec![None; values.len()];
        }

        (0..values.len())
            .map(|i| {
                if i + 1 < window {
                    return None;
                }
                let slice = &values[i + 1 - window..=i];
                let present: Option<Vec<f64>> = slice.iter().copied().collect();
                present.map(|w| w.iter().mean())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataLoader;

    fn close_series(closes: &[f64]) -> Dataset {
        let mut text = String::from("Day,Close\n");
        for (i, c) in closes.iter().enumerate() {
            text.push_str(&format!("{},{:.2}\n", i + 1, c));
        }
        DataLoader::parse_csv(&text).unwrap()
    }

    #[test]
    fn rolling_mean_is_undefined_before_full_window() {
        let values: Vec<Option<f64>> = (1..=5).map(|v| Some(v as f64)).collect();
        let avg = TrendAnalyzer::rolling_mean(&values, 3);
        assert_eq!(avg, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn rolling_mean_skips_windows_with_gaps() {
        let values = vec![Some(1.0), None, Some(3.0), Some(5.0)];
        let avg = TrendAnalyzer::rolling_mean(&values, 2);
        assert_eq!(avg, vec![None, None, None, Some(4.0)]);
    }

    #[test]
    fn single_row_is_insufficient_data() {
        let ds = DataLoader::parse_csv(
            "Date,Open,High,Low,Close\n2025-08-01,81018.72,81500.00,80800.00,81200.00",
        )
        .unwrap();
        let summary = TrendAnalyzer::analyze(&ds, DEFAULT_PRICE_COLUMN, DEFAULT_WINDOW).unwrap();
        assert_eq!(summary.signal, TrendSignal::InsufficientData);
        assert_eq!(summary.latest_value, Some(81200.0));
        assert_eq!(summary.latest_average, None);
    }

    #[test]
    fn increasing_closes_are_bullish() {
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        let summary = TrendAnalyzer::analyze(&close_series(&closes), "Close", 20).unwrap();
        assert_eq!(summary.signal, TrendSignal::Bullish);
        // mean of 105..=124
        assert!((summary.latest_average.unwrap() - 114.5).abs() < 1e-9);
        assert!(summary.rolling_average[..19].iter().all(Option::is_none));
        assert!(summary.rolling_average[19..].iter().all(Option::is_some));
    }

    #[test]
    fn decreasing_closes_are_bearish() {
        let closes: Vec<f64> = (0..25).map(|i| 200.0 - i as f64).collect();
        let summary = TrendAnalyzer::analyze(&close_series(&closes), "Close", 20).unwrap();
        assert_eq!(summary.signal, TrendSignal::Bearish);
    }

    #[test]
    fn flat_closes_are_neutral() {
        let summary = TrendAnalyzer::analyze(&close_series(&[5.0; 20]), "Close", 20).unwrap();
        assert_eq!(summary.signal, TrendSignal::Neutral);
    }

    #[test]
    fn precondition_errors() {
        let ds = DataLoader::parse_csv("Date,Price\n2025-08-01,1\n").unwrap();
        assert!(matches!(
            TrendAnalyzer::analyze(&ds, "Close", 20),
            Err(DataError::MissingColumn(c)) if c == "Close"
        ));
        assert!(matches!(
            TrendAnalyzer::analyze(&ds, "Date", 20),
            Err(DataError::NonNumericColumn { .. })
        ));
        assert!(matches!(
            TrendAnalyzer::analyze(&ds, "Price", 0),
            Err(DataError::InvalidWindow)
        ));
    }

    #[test]
    fn append_adds_sma_column() {
        let ds = close_series(&[1.0, 2.0, 3.0]);
        let summary = TrendAnalyzer::analyze(&ds, "Close", 2).unwrap();
        let with_sma = summary.append_to(&ds);
        assert_eq!(with_sma.column_names(), vec!["Day", "Close", "2_Day_SMA"]);
        assert_eq!(with_sma.rows()[0][2], Value::Missing);
        assert_eq!(with_sma.rows()[2][2], Value::Float(2.5));
    }
}
