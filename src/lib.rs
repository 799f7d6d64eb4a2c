//! Chart Table - CSV & HTML table ingestion, moving average trend analysis and CSV export
//!
//! Paste CSV text or point at a web page; every resulting table is analyzed
//! against a simple moving average of its closing price and offered as CSV.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod gui;
pub mod pipeline;
pub mod remote;
pub mod stats;

pub use config::AppConfig;
pub use error::DataError;
pub use pipeline::{Analysis, Pipeline, Source, TableReport};
