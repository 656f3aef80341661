//! Spreadsheet gateway port for fetching sheet tables and writing tasks back.

use std::collections::BTreeMap;
use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// Boxed future type alias used by [`SheetGateway`] fetches to keep the trait
/// dyn-compatible.
pub type TableFuture<'a> =
    Pin<Box<dyn Future<Output = Result<SheetTable, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Boxed future type alias used by [`SheetGateway`] write-backs.
pub type WriteFuture<'a> =
    Pin<Box<dyn Future<Output = Result<(), Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// A single spreadsheet cell value.
///
/// Backend cells are loosely typed; anything else (absent cell, explicit
/// null) is represented as `None` in [`SheetRow::cells`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// A text cell.
    Text(String),
    /// A numeric cell.
    Number(f64),
    /// A boolean cell.
    Bool(bool),
}

impl CellValue {
    /// Renders the cell as display text.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Self::Bool(b) => b.to_string(),
        }
    }

    /// Returns `true` when the cell carries no usable content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }
}

/// One row of a sheet table; positions map to column indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetRow {
    /// Cells by column index; `None` marks an absent or null cell.
    pub cells: Vec<Option<CellValue>>,
}

impl SheetRow {
    /// Builds a row from plain text cells; empty strings become absent cells.
    #[must_use]
    pub fn of_texts(cells: &[&str]) -> Self {
        Self {
            cells: cells
                .iter()
                .map(|c| {
                    if c.is_empty() {
                        None
                    } else {
                        Some(CellValue::Text((*c).to_string()))
                    }
                })
                .collect(),
        }
    }

    /// Returns the cell at `index`, treating short rows as absent cells.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    /// Returns the display text at `index`, or `""` for absent cells.
    #[must_use]
    pub fn text(&self, index: usize) -> String {
        self.cell(index).map(CellValue::as_text).unwrap_or_default()
    }

    /// Returns `true` when every cell is absent or blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.as_ref().map_or(true, CellValue::is_blank))
    }
}

/// A fetched sheet: row 0 is the header row and is skipped by transformers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetTable {
    /// All rows, header included.
    pub rows: Vec<SheetRow>,
}

/// Gateway to the spreadsheet-backed task store.
///
/// Abstracting the backend allows deterministic tests to script tables and
/// inject fetch failures without a live endpoint.
pub trait SheetGateway: Send + Sync {
    /// Fetches the full table of the named sheet.
    ///
    /// # Errors
    ///
    /// Resolves to an error on network failure, timeout, or a payload that
    /// does not carry table rows.
    fn fetch_table(&self, sheet: &str) -> TableFuture<'_>;

    /// Updates the row identified by `task_id`, writing the given
    /// header-keyed field values.
    ///
    /// # Errors
    ///
    /// Resolves to an error when the request fails or the backend reports an
    /// unsuccessful write.
    fn update_task(
        &self,
        sheet: &str,
        task_id: &str,
        fields: &BTreeMap<String, String>,
    ) -> WriteFuture<'_>;

    /// Deletes the row identified by `task_id`.
    ///
    /// # Errors
    ///
    /// Resolves to an error when the request fails or the backend reports an
    /// unsuccessful delete.
    fn delete_task(&self, sheet: &str, task_id: &str) -> WriteFuture<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_cells_render_without_fraction() {
        assert_eq!(CellValue::Number(42.0).as_text(), "42");
        assert_eq!(CellValue::Number(2.5).as_text(), "2.5");
    }

    #[test]
    fn short_rows_read_as_absent_cells() {
        let row = SheetRow::of_texts(&["a"]);
        assert_eq!(row.cell(5), None);
        assert_eq!(row.text(5), "");
    }

    #[test]
    fn blank_and_absent_cells_make_a_row_empty() {
        assert!(SheetRow::of_texts(&["", "", ""]).is_empty());
        assert!(SheetRow { cells: vec![None, Some(CellValue::Text("  ".into()))] }.is_empty());
        assert!(!SheetRow::of_texts(&["", "x"]).is_empty());
    }
}
