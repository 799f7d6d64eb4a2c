//! Data module - tabular model, CSV loading and export

mod dataset;
pub mod export;
mod loader;
mod value;

pub use dataset::{dedupe_headers, Column, Dataset};
pub use export::{to_csv_string, ExportFile, CSV_MIME};
pub use loader::DataLoader;
pub use value::{NumberFormat, Value, ValueKind};
