//! `taskcal calendar` command.

use chrono::{Local, NaiveDate};

use crate::aggregate::{drill_down, CalendarEvent, NameFilter, TaskSplit, ViewScope};
use crate::cli::ViewArg;
use crate::context::ServiceContext;
use crate::dates;
use crate::refresh::Dashboard;
use crate::session::Session;
use crate::task::TaskRecord;

/// Execute the `calendar` command.
///
/// Refreshes all three sheets, prints the per-slot event lines, then the
/// drill-down task listing for the selected focus date and scope.
///
/// # Errors
///
/// Returns an error string when the focus date is unparseable or the
/// refresh fails.
pub async fn run(
    ctx: &ServiceContext,
    session: &Session,
    date: Option<&str>,
    view: ViewArg,
    name: Option<&str>,
) -> Result<(), String> {
    let focus = match date {
        Some(text) => dates::parse_date_text(text)
            .ok_or_else(|| format!("Unrecognized date '{text}' (expected DD/MM/YYYY)"))?,
        None => Local::now().date_naive(),
    };
    let scope = match view {
        ViewArg::Day => ViewScope::Day,
        ViewArg::Week => ViewScope::Week,
        ViewArg::Month => ViewScope::Month,
    };

    let mut dashboard = Dashboard::new(session.clone(), NameFilter::from_arg(name));
    dashboard.refresh(ctx.sheets.as_ref()).await?;

    print_events(&dashboard.events);
    let split = drill_down(&dashboard.date_map, focus, scope);
    print_drill_down(focus, scope, &split);
    Ok(())
}

fn print_events(events: &[CalendarEvent]) {
    if events.is_empty() {
        println!("No pending tasks on the calendar.");
        return;
    }
    println!("{:<12}  {:<10}  TASKS", "DATE", "TIME");
    for event in events {
        let time = match event.start {
            Some(start) => start.format("%H:%M").to_string(),
            None => "all-day".to_string(),
        };
        println!(
            "{:<12}  {:<10}  {}",
            dates::format_date(event.date),
            time,
            event.title(),
        );
    }
    println!();
}

fn print_drill_down(focus: NaiveDate, scope: ViewScope, split: &TaskSplit) {
    let scope_label = match scope {
        ViewScope::Day => "on",
        ViewScope::Week => "in the week of",
        ViewScope::Month => "in the month of",
    };
    println!("Tasks {scope_label} {}:", dates::format_date(focus));
    if split.is_empty() {
        println!("  (none)");
        return;
    }
    print_section("Delegation", &split.delegation);
    print_section("Checklist", &split.checklist);
}

fn print_section(label: &str, tasks: &[TaskRecord]) {
    if tasks.is_empty() {
        return;
    }
    println!("{label} ({}):", tasks.len());
    for task in tasks {
        let title = if task.description.is_empty() { &task.name } else { &task.description };
        let mut details = vec![format!("id {}", task.task_id)];
        if let Some(time) = &task.time {
            details.push(time.clone());
        }
        if !task.name.is_empty() {
            details.push(task.name.clone());
        }
        if task.priority != "normal" {
            details.push(task.priority.to_uppercase());
        }
        println!("  {} [{}]", title, details.join(", "));
        if !task.remarks.is_empty() {
            println!("    {}", task.remarks);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fixed::FixedSheetGateway;
    use crate::ports::{SheetRow, SheetTable};
    use crate::schema;
    use crate::session::Role;

    fn scripted_context() -> ServiceContext {
        let gateway = FixedSheetGateway::new();
        gateway.insert_table(
            schema::WORKING_DAY_CALENDAR,
            SheetTable {
                rows: vec![
                    SheetRow::of_texts(&["Date"]),
                    SheetRow::of_texts(&["07/07/2025"]),
                    SheetRow::of_texts(&["08/07/2025"]),
                ],
            },
        );
        gateway.insert_table(
            schema::DELEGATION.sheet,
            SheetTable {
                rows: vec![
                    SheetRow::of_texts(&["Timestamp", "Task ID"]),
                    SheetRow::of_texts(&[
                        "",
                        "T-1",
                        "Ops",
                        "boss",
                        "Alice",
                        "File the report",
                        "07/07/2025",
                        "Daily",
                    ]),
                ],
            },
        );
        gateway.insert_table(
            schema::CHECKLIST.sheet,
            SheetTable { rows: vec![SheetRow::of_texts(&["Timestamp", "Task ID"])] },
        );
        ServiceContext::fixed(gateway)
    }

    fn session() -> Session {
        Session {
            username: "alice".into(),
            display_name: "Alice".into(),
            role: Role::Admin,
            base_url: "http://localhost/exec".into(),
        }
    }

    #[tokio::test]
    async fn runs_against_scripted_sheets() {
        let ctx = scripted_context();
        let result = run(&ctx, &session(), Some("07/07/2025"), ViewArg::Day, None).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejects_bad_focus_dates() {
        let ctx = scripted_context();
        let err = run(&ctx, &session(), Some("someday"), ViewArg::Day, None).await.unwrap_err();
        assert!(err.contains("Unrecognized date"));
    }

    #[tokio::test]
    async fn surfaces_refresh_failures() {
        let gateway = FixedSheetGateway::new();
        let ctx = ServiceContext::fixed(gateway);
        let err = run(&ctx, &session(), Some("07/07/2025"), ViewArg::Day, None).await.unwrap_err();
        assert!(err.contains("Failed to load data"));
    }
}
