//! HTML Table Extraction Module
//! Turns every `<table>` of a document into a dataset, in document order.

use crate::data::{Dataset, NumberFormat};
use crate::error::DataError;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Upper bound on `colspan` and `rowspan`.
const MAX_SPAN: usize = 1000;

/// Extract all well-formed tables from an HTML document.
///
/// A page without any `<table>` yields an empty list. A page whose tables
/// are all unusable (no rows, or a header without data rows) is an
/// extraction error.
pub fn extract_tables(html: &str) -> Result<Vec<Dataset>, DataError> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse("table")
        .map_err(|e| DataError::Extraction(format!("invalid selector: {}", e)))?;

    let mut found = 0usize;
    let mut tables = Vec::new();

    for table in document.select(&table_selector) {
        found += 1;
        match table_to_dataset(table) {
            Some(ds) => tables.push(ds),
            None => debug!(table = found, "skipping table without data rows"),
        }
    }

    if found > 0 && tables.is_empty() {
        return Err(DataError::Extraction(format!(
            "found {} <table> element(s) but none had a header and data rows",
            found
        )));
    }

    Ok(tables)
}

fn table_to_dataset(table: ElementRef<'_>) -> Option<Dataset> {
    let mut rows = grid_rows(table);
    rows.retain(|r| !r.is_empty());

    if rows.len() < 2 {
        return None;
    }

    let header = rows.remove(0);
    Some(Dataset::from_raw(header, rows, NumberFormat::GROUPED))
}

/// `<tr>` elements of this table, excluding those of nested tables.
/// Footer rows always come last, wherever the `<tfoot>` is written.
fn own_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();
    let mut footer = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" => rows.extend(section_rows(child)),
            "tfoot" => footer.extend(section_rows(child)),
            _ => {}
        }
    }
    rows.extend(footer);
    rows
}

fn section_rows(section: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    section
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr")
        .collect()
}

/// A `rowspan` cell still owed to the rows below.
struct Carry {
    text: String,
    remaining: usize,
}

fn take_carry(pending: &mut [Option<Carry>], col: usize) -> Option<String> {
    let slot = pending.get_mut(col)?;
    let carry = slot.as_mut()?;
    let text = carry.text.clone();
    carry.remaining -= 1;
    if carry.remaining == 0 {
        *slot = None;
    }
    Some(text)
}

/// Cell texts of every row, with `colspan` and `rowspan` cells repeated
/// into the positions they cover.
fn grid_rows(table: ElementRef<'_>) -> Vec<Vec<String>> {
    let mut pending: Vec<Option<Carry>> = Vec::new();
    let mut rows = Vec::new();

    for row in own_rows(table) {
        let mut cells = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| matches!(el.value().name(), "td" | "th"));
        let mut texts = Vec::new();

        loop {
            if let Some(text) = take_carry(&mut pending, texts.len()) {
                texts.push(text);
                continue;
            }
            let Some(cell) = cells.next() else {
                break;
            };
            let colspan = span_attr(cell, "colspan");
            let rowspan = span_attr(cell, "rowspan");
            let text = cell_text(cell);
            for _ in 0..colspan {
                if rowspan > 1 {
                    let col = texts.len();
                    if pending.len() <= col {
                        pending.resize_with(col + 1, || None);
                    }
                    pending[col] = Some(Carry {
                        text: text.clone(),
                        remaining: rowspan - 1,
                    });
                }
                texts.push(text.clone());
            }
        }

        // Carried cells right of this row's own cells, with gaps left empty.
        if let Some(last) = pending.iter().rposition(Option::is_some) {
            for col in texts.len()..=last {
                texts.push(take_carry(&mut pending, col).unwrap_or_default());
            }
        }

        rows.push(texts);
    }
    rows
}

/// `colspan` / `rowspan` value, at least 1.
fn span_attr(cell: ElementRef<'_>, name: &str) -> usize {
    cell.value()
        .attr(name)
        .and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, MAX_SPAN)
}

/// Flattened cell text with whitespace runs collapsed.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
