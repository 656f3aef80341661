//! `taskcal delegation` / `taskcal checklist` listing commands.

use crate::cli::ListArgs;
use crate::context::ServiceContext;
use crate::dates;
use crate::schema::SheetSchema;
use crate::session::Session;
use crate::task::{SheetKind, TaskRecord};
use crate::transform;

/// Execute a sheet listing command.
///
/// Fetches and transforms one sheet, applies the role rule and the
/// user-selected filters, sorts, and prints an aligned table.
///
/// # Errors
///
/// Returns an error string when the fetch fails or the sort column is
/// unknown.
pub async fn run(
    ctx: &ServiceContext,
    session: &Session,
    kind: SheetKind,
    args: &ListArgs,
) -> Result<(), String> {
    let schema = SheetSchema::for_kind(kind);
    let table = ctx
        .sheets
        .fetch_table(schema.sheet)
        .await
        .map_err(|e| format!("Failed to load {}: {e}", schema.sheet))?;
    let tasks = transform::task_records(&table, schema);

    let headers: Vec<&str> = schema.display_columns().iter().map(|c| c.header).collect();
    let sort_column = match &args.sort {
        Some(header) => Some(
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(header.trim()))
                .ok_or_else(|| format!("Unknown column '{header}' for the {} sheet", schema.sheet))?,
        ),
        None => None,
    };

    let mut rows: Vec<Vec<String>> = tasks
        .iter()
        .filter(|t| visible_to(session, t))
        .filter(|t| keeps(t, args))
        .map(row_values)
        .collect();
    if let Some(column) = sort_column {
        sort_rows(&mut rows, column, args.desc);
    }

    if rows.is_empty() {
        let filtered = args.search.is_some() || args.name.is_some() || args.freq.is_some();
        if filtered {
            println!("No {} tasks matching your filters.", kind.label().to_lowercase());
        } else if session.is_admin() {
            println!("No {} tasks available.", kind.label().to_lowercase());
        } else {
            println!("No {} tasks assigned to you.", kind.label().to_lowercase());
        }
        return Ok(());
    }

    print_table(&headers, &rows);
    println!("\n{} task(s).", rows.len());
    Ok(())
}

/// Role rule for listings: admins see every row; users see tasks they are
/// assigned or that they gave out.
fn visible_to(session: &Session, task: &TaskRecord) -> bool {
    session.is_admin() || session.owns_name(&task.name) || session.owns_name(&task.given_by)
}

/// Applies the search, name, and frequency filters.
fn keeps(task: &TaskRecord, args: &ListArgs) -> bool {
    if let Some(name) = &args.name {
        if !task.name.trim().eq_ignore_ascii_case(name.trim()) {
            return false;
        }
    }
    if let Some(freq) = &args.freq {
        if !task.frequency_text.trim().eq_ignore_ascii_case(freq.trim()) {
            return false;
        }
    }
    if let Some(search) = &args.search {
        let query = search.trim().to_lowercase();
        if !query.is_empty()
            && !row_values(task).iter().any(|value| value.to_lowercase().contains(&query))
        {
            return false;
        }
    }
    true
}

/// Display values in `display_columns` order.
fn row_values(task: &TaskRecord) -> Vec<String> {
    vec![
        task.timestamp.clone(),
        task.task_id.clone(),
        task.department.clone(),
        task.given_by.clone(),
        task.name.clone(),
        task.description.clone(),
        dates::format_date(task.start_date),
        task.frequency_text.clone(),
        task.time.clone().unwrap_or_default(),
        task.status.clone(),
        task.remarks.clone(),
        task.priority.clone(),
    ]
}

/// Stable lexicographic sort on one column.
fn sort_rows(rows: &mut [Vec<String>], column: usize, descending: bool) {
    rows.sort_by(|a, b| {
        let ordering = a[column].cmp(&b[column]);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

/// Prints an aligned table with a dashed header underline.
fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter().map(|row| row[i].len()).max().unwrap_or(0).max(header.len())
        })
        .collect();

    let header_line: Vec<String> =
        headers.iter().zip(&widths).map(|(h, w)| format!("{h:<width$}", width = *w)).collect();
    println!("{}", header_line.join("  "));
    let underline: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("{}", underline.join("  "));
    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(value, w)| format!("{value:<width$}", width = *w))
            .collect();
        println!("{}", line.join("  ").trim_end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fixed::FixedSheetGateway;
    use crate::ports::{SheetRow, SheetTable};
    use crate::schema;
    use crate::session::Role;

    fn task(id: &str, name: &str, given_by: &str, freq: &str) -> TaskRecord {
        TaskRecord {
            task_id: id.into(),
            timestamp: String::new(),
            department: "Ops".into(),
            given_by: given_by.into(),
            name: name.into(),
            description: format!("{id} work"),
            start_date: chrono::NaiveDate::from_ymd_opt(2025, 7, 7).unwrap(),
            frequency_text: freq.into(),
            frequency: crate::task::Frequency::classify(Some(freq)),
            time: None,
            status: "pending".into(),
            remarks: String::new(),
            priority: "normal".into(),
            completion: String::new(),
            sheet_kind: SheetKind::Delegation,
            row_index: 2,
        }
    }

    fn args() -> ListArgs {
        ListArgs { search: None, name: None, freq: None, sort: None, desc: false }
    }

    fn user_session(name: &str) -> Session {
        Session {
            username: name.into(),
            display_name: String::new(),
            role: Role::User,
            base_url: "http://localhost/exec".into(),
        }
    }

    #[test]
    fn users_see_tasks_they_own_or_gave() {
        let session = user_session("alice");
        assert!(visible_to(&session, &task("T-1", "Alice", "boss", "Daily")));
        assert!(visible_to(&session, &task("T-2", "Bob", "alice", "Daily")));
        assert!(!visible_to(&session, &task("T-3", "Bob", "boss", "Daily")));
    }

    #[test]
    fn filters_narrow_by_name_freq_and_search() {
        let t = task("T-1", "Alice", "boss", "Weekly");

        let mut by_name = args();
        by_name.name = Some("alice".into());
        assert!(keeps(&t, &by_name));
        by_name.name = Some("bob".into());
        assert!(!keeps(&t, &by_name));

        let mut by_freq = args();
        by_freq.freq = Some("weekly".into());
        assert!(keeps(&t, &by_freq));
        by_freq.freq = Some("Daily".into());
        assert!(!keeps(&t, &by_freq));

        let mut by_search = args();
        by_search.search = Some("t-1 WORK".into());
        assert!(keeps(&t, &by_search));
        by_search.search = Some("missing".into());
        assert!(!keeps(&t, &by_search));
    }

    #[test]
    fn sorting_is_stable_and_reversible() {
        let mut rows = vec![
            vec!["b".to_string(), "1".to_string()],
            vec!["a".to_string(), "2".to_string()],
            vec!["a".to_string(), "3".to_string()],
        ];
        sort_rows(&mut rows, 0, false);
        assert_eq!(rows[0][1], "2");
        assert_eq!(rows[1][1], "3");
        assert_eq!(rows[2][0], "b");
        sort_rows(&mut rows, 0, true);
        assert_eq!(rows[0][0], "b");
    }

    #[tokio::test]
    async fn lists_a_scripted_sheet() {
        let gateway = FixedSheetGateway::new();
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
        let ctx = ServiceContext::fixed(gateway);
        let session = Session {
            username: "admin".into(),
            display_name: String::new(),
            role: Role::Admin,
            base_url: "http://localhost/exec".into(),
        };
        assert!(run(&ctx, &session, SheetKind::Delegation, &args()).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_sort_column_errors() {
        let gateway = FixedSheetGateway::new();
        gateway.insert_table(
            schema::CHECKLIST.sheet,
            SheetTable { rows: vec![SheetRow::of_texts(&["Timestamp"])] },
        );
        let ctx = ServiceContext::fixed(gateway);
        let mut listing = args();
        listing.sort = Some("Nonsense".into());
        let err = run(&ctx, &user_session("alice"), SheetKind::Checklist, &listing)
            .await
            .unwrap_err();
        assert!(err.contains("Unknown column"));
    }
}
