//! `taskcal names` command.

use crate::aggregate::NameFilter;
use crate::context::ServiceContext;
use crate::refresh::Dashboard;
use crate::session::Session;

/// Execute the `names` command: print the unique assignee names seen
/// across both task sheets, one per line.
///
/// # Errors
///
/// Returns an error string when the refresh fails.
pub async fn run(ctx: &ServiceContext, session: &Session) -> Result<(), String> {
    let mut dashboard = Dashboard::new(session.clone(), NameFilter::All);
    dashboard.refresh(ctx.sheets.as_ref()).await?;

    if dashboard.names.is_empty() {
        println!("No assignee names found.");
        return Ok(());
    }
    for name in &dashboard.names {
        println!("{name}");
    }
    Ok(())
}
