//! `taskcal update` command.

use std::collections::BTreeMap;

use crate::context::ServiceContext;
use crate::schema::SheetSchema;
use crate::task::SheetKind;

/// Execute the `update` command.
///
/// Parses `HEADER=VALUE` assignments against the sheet's schema and posts
/// the write-back. The read/aggregate core never depends on the outcome.
///
/// # Errors
///
/// Returns an error string for malformed assignments, unknown columns, or
/// a failed or rejected write.
pub async fn run(
    ctx: &ServiceContext,
    kind: SheetKind,
    task_id: &str,
    fields: &[String],
) -> Result<(), String> {
    let schema = SheetSchema::for_kind(kind);
    let mut row_data = BTreeMap::new();
    for assignment in fields {
        let (header, value) = assignment
            .split_once('=')
            .ok_or_else(|| format!("Invalid field assignment '{assignment}' (expected HEADER=VALUE)"))?;
        let column = schema
            .editable_column(header)
            .ok_or_else(|| format!("Unknown column '{header}' for the {} sheet", schema.sheet))?;
        row_data.insert(column.header.to_string(), value.to_string());
    }

    ctx.sheets
        .update_task(schema.sheet, task_id, &row_data)
        .await
        .map_err(|e| format!("Update failed: {e}"))?;
    println!("Updated task {task_id} on {}.", schema.sheet);
    Ok(())
}
