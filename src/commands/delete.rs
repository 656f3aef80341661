//! `taskcal delete` command.

use crate::context::ServiceContext;
use crate::schema::SheetSchema;
use crate::task::SheetKind;

/// Execute the `delete` command: remove a task row by its task id.
///
/// # Errors
///
/// Returns an error string when the request fails or the backend rejects
/// the delete.
pub async fn run(ctx: &ServiceContext, kind: SheetKind, task_id: &str) -> Result<(), String> {
    if task_id.trim().is_empty() {
        return Err("Task id must not be empty".to_string());
    }
    let schema = SheetSchema::for_kind(kind);
    ctx.sheets
        .delete_task(schema.sheet, task_id)
        .await
        .map_err(|e| format!("Delete failed: {e}"))?;
    println!("Deleted task {task_id} from {}.", schema.sheet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fixed::FixedSheetGateway;

    #[tokio::test]
    async fn rejects_empty_task_ids() {
        let ctx = ServiceContext::fixed(FixedSheetGateway::new());
        let err = run(&ctx, SheetKind::Checklist, "  ").await.unwrap_err();
        assert!(err.contains("must not be empty"));
    }

    #[tokio::test]
    async fn posts_the_delete_action() {
        let ctx = ServiceContext::fixed(FixedSheetGateway::new());
        assert!(run(&ctx, SheetKind::Delegation, "T-9").await.is_ok());
    }
}
