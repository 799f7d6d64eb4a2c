//! Cell Value Module
//! Tagged cell values and per-column kind inference.

use chrono::NaiveDate;
use std::fmt;

/// Date layouts recognized when inferring a date column.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d %b %Y", "%b %d, %Y"];

/// Date layout used on export.
pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Value kind of a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Float,
    Date,
    Text,
}

impl ValueKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueKind::Integer | ValueKind::Float)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Integer => "integer",
            ValueKind::Float => "floating-point",
            ValueKind::Date => "date",
            ValueKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Missing,
}

impl Value {
    /// Numeric view of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Text form used for CSV export.
    ///
    /// Floats always keep a decimal point so they are re-read as floats.
    pub fn to_field(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Integer(v) => v.to_string(),
            Value::Float(v) => {
                let s = v.to_string();
                if s.contains('.') || !v.is_finite() {
                    s
                } else {
                    format!("{}.0", s)
                }
            }
            Value::Date(d) => d.format(EXPORT_DATE_FORMAT).to_string(),
            Value::Missing => String::new(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{:.2}", v),
            Value::Missing => f.write_str("-"),
            other => f.write_str(&other.to_field()),
        }
    }
}

/// Numeric text conventions of the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberFormat {
    /// Thousands separator stripped before numeric parsing (HTML tables use `,`).
    pub thousands: Option<char>,
}

impl NumberFormat {
    pub const PLAIN: NumberFormat = NumberFormat { thousands: None };
    pub const GROUPED: NumberFormat = NumberFormat {
        thousands: Some(','),
    };

    fn normalize<'a>(&self, raw: &'a str) -> std::borrow::Cow<'a, str> {
        match self.thousands {
            Some(sep) if raw.contains(sep) && looks_grouped(raw, sep) => {
                std::borrow::Cow::Owned(raw.replace(sep, ""))
            }
            _ => std::borrow::Cow::Borrowed(raw),
        }
    }
}

/// `1,234,567.5` style grouping: digits in groups of three after the first.
fn looks_grouped(raw: &str, sep: char) -> bool {
    let unsigned = raw.strip_prefix(&['-', '+'][..]).unwrap_or(raw);
    let int_part = unsigned.split('.').next().unwrap_or("");
    let mut groups = int_part.split(sep);
    let Some(first) = groups.next() else {
        return false;
    };
    if first.is_empty() || first.len() > 3 || !first.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()))
}

pub fn parse_integer(raw: &str, format: NumberFormat) -> Option<i64> {
    let text = format.normalize(raw);
    let digits = text.strip_prefix(&['-', '+'][..]).unwrap_or(&*text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>().ok()
}

pub fn parse_float(raw: &str, format: NumberFormat) -> Option<f64> {
    format
        .normalize(raw)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Infer the kind of a column from its raw (already trimmed) cells.
///
/// The first kind into which every non-empty cell parses wins, in the order
/// integer, float, date, text.
pub fn infer_kind(cells: &[&str], format: NumberFormat) -> ValueKind {
    let present: Vec<&str> = cells.iter().copied().filter(|c| !c.is_empty()).collect();
    if present.is_empty() {
        return ValueKind::Text;
    }
    if present.iter().all(|c| parse_integer(c, format).is_some()) {
        ValueKind::Integer
    } else if present.iter().all(|c| parse_float(c, format).is_some()) {
        ValueKind::Float
    } else if present.iter().all(|c| parse_date(c).is_some()) {
        ValueKind::Date
    } else {
        ValueKind::Text
    }
}

/// Convert one raw cell into a value of the column's kind.
pub fn parse_cell(raw: &str, kind: ValueKind, format: NumberFormat) -> Value {
    if raw.is_empty() {
        return Value::Missing;
    }
    let parsed = match kind {
        ValueKind::Integer => parse_integer(raw, format).map(Value::Integer),
        ValueKind::Float => parse_float(raw, format).map(Value::Float),
        ValueKind::Date => parse_date(raw).map(Value::Date),
        ValueKind::Text => None,
    };
    parsed.unwrap_or_else(|| Value::Text(raw.to_string()))
}
