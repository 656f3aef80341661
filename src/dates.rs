//! Date parsing and formatting utilities.
//!
//! The backend hands dates back in several shapes: ISO strings, `DD/MM/YYYY`
//! display strings, numeric epoch milliseconds, and gviz `Date(y,m,d)`
//! literals. Everything is collapsed here into `chrono::NaiveDate` so the
//! rest of the core only ever sees one canonical date type. Unparseable
//! input yields `None`, never a panic — callers treat `None` as "exclude
//! this record".

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::ports::CellValue;

/// Parses a spreadsheet cell into a date.
///
/// Numeric cells are read as epoch milliseconds; text cells go through
/// [`parse_date_text`]. Boolean cells never parse.
#[must_use]
pub fn parse_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Text(s) => parse_date_text(s),
        #[allow(clippy::cast_possible_truncation)]
        CellValue::Number(n) => DateTime::from_timestamp_millis(*n as i64).map(|dt| dt.date_naive()),
        CellValue::Bool(_) => None,
    }
}

/// Parses date text in any of the accepted shapes.
///
/// Tried in order: ISO date, RFC 3339 datetime, `YYYY-MM-DD HH:MM:SS`,
/// `DD/MM/YYYY`, and the gviz `Date(y,m,d[,...])` literal (0-based month).
#[must_use]
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(t, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(t, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(d) = NaiveDate::parse_from_str(t, "%d/%m/%Y") {
        return Some(d);
    }
    parse_gviz_literal(t)
}

/// Parses a `Date(year,month,day[,...])` literal as emitted by the gviz
/// endpoint. The month component is 0-based.
fn parse_gviz_literal(text: &str) -> Option<NaiveDate> {
    let inner = text.strip_prefix("Date(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month + 1, day)
}

/// Formats a date as `DD/MM/YYYY`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Parses a cell and formats it as `DD/MM/YYYY`, or `""` when unparseable.
#[must_use]
pub fn format_date_cell(cell: &CellValue) -> String {
    parse_date(cell).map(format_date).unwrap_or_default()
}

/// Day-equality over two date texts; `false` when either side fails to
/// parse.
#[must_use]
pub fn same_day(a: &str, b: &str) -> bool {
    match (parse_date_text(a), parse_date_text(b)) {
        (Some(da), Some(db)) => da == db,
        _ => false,
    }
}
