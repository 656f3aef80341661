//! Command dispatch and handlers.

pub mod calendar;
pub mod delete;
pub mod list;
pub mod names;
pub mod stats;
pub mod update;

use crate::cli::{Command, SheetArg};
use crate::context::ServiceContext;
use crate::session::Session;
use crate::task::SheetKind;

/// Dispatch a parsed command to its handler.
///
/// Loads the session, wires up the live backend gateway, and drives the
/// selected handler on a current-thread async runtime.
///
/// # Errors
///
/// Returns an error string when configuration is missing or the selected
/// command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let session = Session::from_env()?;
    let ctx = ServiceContext::live(&session.base_url)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start the async runtime: {e}"))?;
    runtime.block_on(dispatch_with_context(command, &ctx, &session))
}

/// Dispatch a command with the given context and session.
///
/// # Errors
///
/// Returns an error string when the selected command handler fails.
pub async fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    session: &Session,
) -> Result<(), String> {
    match command {
        Command::Calendar { date, view, name } => {
            calendar::run(ctx, session, date.as_deref(), *view, name.as_deref()).await
        }
        Command::Delegation(args) => list::run(ctx, session, SheetKind::Delegation, args).await,
        Command::Checklist(args) => list::run(ctx, session, SheetKind::Checklist, args).await,
        Command::Stats => stats::run(ctx, session).await,
        Command::Names => names::run(ctx, session).await,
        Command::Update { sheet, task_id, fields } => {
            update::run(ctx, sheet_kind(*sheet), task_id, fields).await
        }
        Command::Delete { sheet, task_id } => delete::run(ctx, sheet_kind(*sheet), task_id).await,
    }
}

fn sheet_kind(arg: SheetArg) -> SheetKind {
    match arg {
        SheetArg::Delegation => SheetKind::Delegation,
        SheetArg::Checklist => SheetKind::Checklist,
    }
}
