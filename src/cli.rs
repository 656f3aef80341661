//! CLI argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for `taskcal`.
#[derive(Debug, Parser)]
#[command(name = "taskcal", version, about = "Task calendar and delegation dashboard")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the aggregated task calendar with a drill-down listing.
    Calendar {
        /// Focus date as DD/MM/YYYY (defaults to today).
        #[arg(long)]
        date: Option<String>,
        /// Drill-down scope around the focus date.
        #[arg(long, value_enum, default_value = "day")]
        view: ViewArg,
        /// Only include tasks assigned to this name ("all" disables).
        #[arg(long)]
        name: Option<String>,
    },
    /// List delegation tasks.
    Delegation(ListArgs),
    /// List checklist tasks.
    Checklist(ListArgs),
    /// Show totals and pending counts per sheet.
    Stats,
    /// List the assignee names seen across both sheets.
    Names,
    /// Update fields of a task by id; fields are HEADER=VALUE pairs.
    Update {
        /// Target sheet.
        #[arg(value_enum)]
        sheet: SheetArg,
        /// Task identifier.
        task_id: String,
        /// Field assignments, e.g. "Name=Alice" "Freq=Weekly".
        #[arg(required = true)]
        fields: Vec<String>,
    },
    /// Delete a task by id.
    Delete {
        /// Target sheet.
        #[arg(value_enum)]
        sheet: SheetArg,
        /// Task identifier.
        task_id: String,
    },
}

/// Drill-down scope choices for the calendar command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    /// The focus date only.
    Day,
    /// The week containing the focus date.
    Week,
    /// The month containing the focus date.
    Month,
}

/// Sheet choices for write-back commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SheetArg {
    /// The delegation sheet.
    Delegation,
    /// The checklist sheet.
    Checklist,
}

/// Shared filtering and sorting options for the listing commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive substring match across all columns.
    #[arg(long)]
    pub search: Option<String>,
    /// Keep only tasks assigned to this name.
    #[arg(long)]
    pub name: Option<String>,
    /// Keep only tasks with this exact frequency text.
    #[arg(long)]
    pub freq: Option<String>,
    /// Column header to sort by.
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort descending instead of ascending.
    #[arg(long)]
    pub desc: bool,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, SheetArg, ViewArg};
    use clap::Parser;

    #[test]
    fn parses_calendar_with_defaults() {
        let cli = Cli::parse_from(["taskcal", "calendar"]);
        match cli.command {
            Command::Calendar { date, view, name } => {
                assert_eq!(date, None);
                assert_eq!(view, ViewArg::Day);
                assert_eq!(name, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_calendar_options() {
        let cli = Cli::parse_from([
            "taskcal", "calendar", "--date", "04/07/2025", "--view", "week", "--name", "Alice",
        ]);
        match cli.command {
            Command::Calendar { date, view, name } => {
                assert_eq!(date.as_deref(), Some("04/07/2025"));
                assert_eq!(view, ViewArg::Week);
                assert_eq!(name.as_deref(), Some("Alice"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_listing_filters() {
        let cli = Cli::parse_from([
            "taskcal", "delegation", "--search", "report", "--sort", "Name", "--desc",
        ]);
        match cli.command {
            Command::Delegation(args) => {
                assert_eq!(args.search.as_deref(), Some("report"));
                assert_eq!(args.sort.as_deref(), Some("Name"));
                assert!(args.desc);
                assert_eq!(args.name, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_update_field_assignments() {
        let cli =
            Cli::parse_from(["taskcal", "update", "checklist", "C-7", "Name=Bob", "Freq=Daily"]);
        match cli.command {
            Command::Update { sheet, task_id, fields } => {
                assert_eq!(sheet, SheetArg::Checklist);
                assert_eq!(task_id, "C-7");
                assert_eq!(fields, vec!["Name=Bob", "Freq=Daily"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn update_requires_at_least_one_field() {
        assert!(Cli::try_parse_from(["taskcal", "update", "checklist", "C-7"]).is_err());
    }

    #[test]
    fn parses_delete() {
        let cli = Cli::parse_from(["taskcal", "delete", "delegation", "T-3"]);
        match cli.command {
            Command::Delete { sheet, task_id } => {
                assert_eq!(sheet, SheetArg::Delegation);
                assert_eq!(task_id, "T-3");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
