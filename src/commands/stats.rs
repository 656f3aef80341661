//! `taskcal stats` command.

use crate::aggregate::NameFilter;
use crate::context::ServiceContext;
use crate::refresh::Dashboard;
use crate::session::Session;

/// Execute the `stats` command.
///
/// Refreshes all three sheets and prints total and pending counts per
/// sheet kind.
///
/// # Errors
///
/// Returns an error string when the refresh fails.
pub async fn run(ctx: &ServiceContext, session: &Session) -> Result<(), String> {
    let mut dashboard = Dashboard::new(session.clone(), NameFilter::All);
    dashboard.refresh(ctx.sheets.as_ref()).await?;
    let stats = dashboard.stats;

    println!("{:<12}  {:>5}  {:>7}", "SHEET", "TOTAL", "PENDING");
    println!("{:-<12}  {:->5}  {:->7}", "", "", "");
    println!(
        "{:<12}  {:>5}  {:>7}",
        "Delegation", stats.delegation.total, stats.delegation.pending
    );
    println!("{:<12}  {:>5}  {:>7}", "Checklist", stats.checklist.total, stats.checklist.pending);
    println!(
        "\n{} working date(s), {} calendar event(s).",
        dashboard.working_dates.len(),
        dashboard.events.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fixed::FixedSheetGateway;
    use crate::ports::{SheetRow, SheetTable};
    use crate::schema;
    use crate::session::Role;

    fn session() -> Session {
        Session {
            username: "admin".into(),
            display_name: String::new(),
            role: Role::Admin,
            base_url: "http://localhost/exec".into(),
        }
    }

    #[tokio::test]
    async fn prints_counts_for_scripted_sheets() {
        let gateway = FixedSheetGateway::new();
        let header = SheetRow::of_texts(&["Timestamp", "Task ID"]);
        gateway.insert_table(
            schema::WORKING_DAY_CALENDAR,
            SheetTable {
                rows: vec![SheetRow::of_texts(&["Date"]), SheetRow::of_texts(&["07/07/2025"])],
            },
        );
        gateway.insert_table(
            schema::DELEGATION.sheet,
            SheetTable {
                rows: vec![
                    header.clone(),
                    SheetRow::of_texts(&["", "T-1", "", "", "Alice", "", "07/07/2025", "Daily"]),
                ],
            },
        );
        gateway.insert_table(schema::CHECKLIST.sheet, SheetTable { rows: vec![header] });
        let ctx = ServiceContext::fixed(gateway);
        assert!(run(&ctx, &session()).await.is_ok());
    }

    #[tokio::test]
    async fn fails_when_any_sheet_is_unreachable() {
        let gateway = FixedSheetGateway::new();
        gateway.insert_table(
            schema::WORKING_DAY_CALENDAR,
            SheetTable { rows: vec![SheetRow::of_texts(&["Date"])] },
        );
        // Delegation and checklist sheets are not scripted.
        let ctx = ServiceContext::fixed(gateway);
        assert!(run(&ctx, &session()).await.is_err());
    }
}
