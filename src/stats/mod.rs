//! Stats module - moving average trend analysis

mod trend;

pub use trend::{TrendAnalyzer, TrendSignal, TrendSummary, DEFAULT_PRICE_COLUMN, DEFAULT_WINDOW};
