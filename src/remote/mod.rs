//! Remote module - fetch a page and extract its HTML tables

mod fetcher;
mod html;

pub use fetcher::{DocumentSource, HttpFetcher};
pub use html::extract_tables;

use crate::data::Dataset;
use crate::error::DataError;
use tracing::info;

/// Fetch `url` and extract its tables in document order.
pub fn fetch_tables(source: &dyn DocumentSource, url: &str) -> Result<Vec<Dataset>, DataError> {
    let body = source.fetch(url)?;
    let tables = extract_tables(&body)?;
    info!(url, tables = tables.len(), "extracted HTML tables");
    Ok(tables)
}
