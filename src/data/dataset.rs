//! Tabular Dataset Module
//! Ordered named columns with typed cells, built from raw text grids.

use super::value::{infer_kind, parse_cell, NumberFormat, Value, ValueKind};
use std::collections::HashSet;

/// Column metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ValueKind,
}

/// In-memory table. Every row holds exactly one value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Build a dataset from a header and rows of raw cell text.
    ///
    /// Header names are de-duplicated, short rows are padded with empty cells,
    /// and each column's kind is inferred once from all of its cells.
    pub fn from_raw(header: Vec<String>, raw_rows: Vec<Vec<String>>, format: NumberFormat) -> Self {
        let width = raw_rows
            .iter()
            .map(|r| r.len())
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0);

        let mut header = header;
        header.resize(width, String::new());
        let names = dedupe_headers(&header);

        let kinds: Vec<ValueKind> = (0..width)
            .map(|col| {
                let cells: Vec<&str> = raw_rows
                    .iter()
                    .map(|r| r.get(col).map(String::as_str).unwrap_or(""))
                    .collect();
                infer_kind(&cells, format)
            })
            .collect();

        let rows = raw_rows
            .iter()
            .map(|r| {
                kinds
                    .iter()
                    .enumerate()
                    .map(|(col, &kind)| {
                        let raw = r.get(col).map(String::as_str).unwrap_or("");
                        parse_cell(raw, kind, format)
                    })
                    .collect()
            })
            .collect();

        let columns = names
            .into_iter()
            .zip(kinds)
            .map(|(name, kind)| Column { name, kind })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position and metadata of a named column.
    pub fn column(&self, name: &str) -> Option<(usize, &Column)> {
        self.columns.iter().enumerate().find(|(_, c)| c.name == name)
    }

    /// All values of one column, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |r| &r[index])
    }

    /// Copy of the dataset with one more column on the right.
    ///
    /// The new column's name is de-duplicated against the existing ones and
    /// `values` is padded with `Missing` (or truncated) to the row count.
    pub fn with_column(&self, name: &str, kind: ValueKind, values: Vec<Value>) -> Dataset {
        let mut header = self.column_names();
        header.push(name.to_string());
        let name = dedupe_headers(&header).pop().unwrap_or_default();

        let mut columns = self.columns.clone();
        columns.push(Column { name, kind });

        let mut values = values.into_iter();
        let rows = self
            .rows
            .iter()
            .map(|r| {
                let mut row = r.clone();
                row.push(values.next().unwrap_or(Value::Missing));
                row
            })
            .collect();

        Dataset { columns, rows }
    }
}

/// Make header names unique and non-empty.
///
/// A repeated name gets a `.N` suffix (`Price`, `Price.1`, ...); a blank name
/// becomes `Unnamed: {index}`.
pub fn dedupe_headers(names: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(names.len());

    for (idx, raw) in names.iter().enumerate() {
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            raw.trim().to_string()
        };

        let mut candidate = base.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", base, n);
            n += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }

    out
}
