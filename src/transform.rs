//! Row-to-record transformation.
//!
//! Converts raw backend tables into typed task records under the fixed
//! per-sheet schemas. Bad rows are skipped, never fatal: a malformed row
//! must not abort the batch.

use chrono::NaiveDate;

use crate::dates;
use crate::ports::{SheetRow, SheetTable};
use crate::schema::{self, SheetSchema};
use crate::task::{Frequency, TaskRecord};

/// Transforms a fetched sheet into task records.
///
/// Row 0 is the header and is always skipped. A data row is skipped when
/// every cell is blank, or when its task id or start date fail validation —
/// no partial records are produced.
#[must_use]
pub fn task_records(table: &SheetTable, schema: &SheetSchema) -> Vec<TaskRecord> {
    let mut tasks = Vec::new();
    for (sheet_row, row) in table.rows.iter().enumerate().skip(1) {
        if let Some(task) = task_record(row, schema, sheet_row + 1) {
            tasks.push(task);
        }
    }
    tasks
}

/// Transforms one data row, or `None` when the row must be skipped.
fn task_record(row: &SheetRow, schema: &SheetSchema, row_index: usize) -> Option<TaskRecord> {
    if row.is_empty() {
        return None;
    }

    let task_id = row.text(schema.task_id.index);
    if task_id.trim().is_empty() {
        return None;
    }
    let start_date = row.cell(schema.start_date.index).and_then(dates::parse_date)?;

    let frequency_text = row.text(schema.frequency.index).trim().to_string();
    let frequency = Frequency::classify(Some(&frequency_text));
    let time = non_empty(row.text(schema.time.index));

    Some(TaskRecord {
        task_id,
        timestamp: row.text(schema.timestamp.index),
        department: row.text(schema.department.index),
        given_by: row.text(schema.given_by.index),
        name: row.text(schema.name.index),
        description: row.text(schema.description.index),
        start_date,
        frequency_text,
        frequency,
        time,
        status: non_empty(row.text(schema.status.index)).unwrap_or_else(|| "pending".into()),
        remarks: row.text(schema.remarks.index),
        priority: non_empty(row.text(schema.priority.index)).unwrap_or_else(|| "normal".into()),
        completion: row.text(schema.completion.index),
        sheet_kind: schema.kind,
        row_index,
    })
}

/// Extracts the ordered working-date set from the calendar sheet.
///
/// The header row and unparseable cells are skipped; sheet order is
/// preserved.
#[must_use]
pub fn working_dates(table: &SheetTable) -> Vec<NaiveDate> {
    table
        .rows
        .iter()
        .skip(1)
        .filter_map(|row| row.cell(schema::WORKING_DATE_COLUMN).and_then(dates::parse_date))
        .collect()
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
