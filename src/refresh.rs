//! Refresh orchestration and dashboard state.
//!
//! One refresh issues the three backend fetches strictly in sequence and is
//! all-or-nothing: any failure clears every piece of derived state and
//! records a single consolidated error, leaving retry to the user. Partial
//! success is not supported.

use chrono::NaiveDate;

use crate::aggregate::{self, CalendarEvent, DateMap, NameFilter};
use crate::ports::SheetGateway;
use crate::schema::{self, CHECKLIST, DELEGATION};
use crate::session::Session;
use crate::task::TaskRecord;
use crate::transform;

/// Total and pending task counts for one sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    /// All fetched tasks.
    pub total: usize,
    /// Tasks still pending under the sheet kind's rule.
    pub pending: usize,
}

/// Per-sheet counts over the unfiltered fetched collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Delegation sheet counts.
    pub delegation: Counts,
    /// Checklist sheet counts.
    pub checklist: Counts,
}

impl Stats {
    /// Computes counts over the raw collections, before any filtering.
    #[must_use]
    pub fn compute(delegation: &[TaskRecord], checklist: &[TaskRecord]) -> Self {
        Self { delegation: counts(delegation), checklist: counts(checklist) }
    }
}

fn counts(tasks: &[TaskRecord]) -> Counts {
    Counts { total: tasks.len(), pending: tasks.iter().filter(|t| t.is_pending()).count() }
}

/// Unique trimmed assignee names across both collections, sorted.
#[must_use]
pub fn unique_names(delegation: &[TaskRecord], checklist: &[TaskRecord]) -> Vec<String> {
    let mut names: Vec<String> = delegation
        .iter()
        .chain(checklist)
        .map(|t| t.name.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Dashboard state for one session: the fetched collections plus every
/// derived view, replaced wholesale on each refresh.
#[derive(Debug)]
pub struct Dashboard {
    session: Session,
    name_filter: NameFilter,
    refreshing: bool,
    /// Working-date calendar of the last successful refresh.
    pub working_dates: Vec<NaiveDate>,
    /// Delegation tasks of the last successful refresh.
    pub delegation: Vec<TaskRecord>,
    /// Checklist tasks of the last successful refresh.
    pub checklist: Vec<TaskRecord>,
    /// Per-sheet totals.
    pub stats: Stats,
    /// Unique assignee names for the name-filter choices.
    pub names: Vec<String>,
    /// The date-aggregation map.
    pub date_map: DateMap,
    /// Renderable calendar events derived from the map.
    pub events: Vec<CalendarEvent>,
    /// Consolidated message of the last failed refresh.
    pub error: Option<String>,
}

impl Dashboard {
    /// Creates an empty dashboard for the given session and name filter.
    #[must_use]
    pub fn new(session: Session, name_filter: NameFilter) -> Self {
        Self {
            session,
            name_filter,
            refreshing: false,
            working_dates: Vec::new(),
            delegation: Vec::new(),
            checklist: Vec::new(),
            stats: Stats::default(),
            names: Vec::new(),
            date_map: DateMap::new(),
            events: Vec::new(),
            error: None,
        }
    }

    /// Fetches all three sheets and rebuilds every derived view.
    ///
    /// A refresh attempted while one is already in flight is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the consolidated failure message; the same message is kept
    /// in [`Dashboard::error`] and all derived state is cleared.
    pub async fn refresh(&mut self, sheets: &dyn SheetGateway) -> Result<(), String> {
        if self.refreshing {
            return Ok(());
        }
        self.refreshing = true;
        let outcome = self.refresh_inner(sheets).await;
        self.refreshing = false;
        if let Err(message) = &outcome {
            self.clear();
            self.error = Some(message.clone());
        }
        outcome
    }

    async fn refresh_inner(&mut self, sheets: &dyn SheetGateway) -> Result<(), String> {
        let calendar = sheets
            .fetch_table(schema::WORKING_DAY_CALENDAR)
            .await
            .map_err(|e| format!("Failed to load data: {e}"))?;
        let working_dates = transform::working_dates(&calendar);

        let delegation_table = sheets
            .fetch_table(DELEGATION.sheet)
            .await
            .map_err(|e| format!("Failed to load data: {e}"))?;
        let delegation = transform::task_records(&delegation_table, &DELEGATION);

        let checklist_table = sheets
            .fetch_table(CHECKLIST.sheet)
            .await
            .map_err(|e| format!("Failed to load data: {e}"))?;
        let checklist = transform::task_records(&checklist_table, &CHECKLIST);

        self.stats = Stats::compute(&delegation, &checklist);
        self.names = unique_names(&delegation, &checklist);
        self.working_dates = working_dates;
        self.delegation = delegation;
        self.checklist = checklist;
        self.rebuild();
        self.error = None;
        Ok(())
    }

    /// Replaces the name filter and rebuilds the derived views.
    pub fn set_name_filter(&mut self, name_filter: NameFilter) {
        self.name_filter = name_filter;
        self.rebuild();
    }

    /// Rebuilds the date map and event list from the current collections.
    fn rebuild(&mut self) {
        self.date_map = aggregate::build_date_map(
            &self.delegation,
            &self.checklist,
            &self.working_dates,
            &self.session,
            &self.name_filter,
        );
        self.events = aggregate::events(&self.date_map);
    }

    fn clear(&mut self) {
        self.working_dates.clear();
        self.delegation.clear();
        self.checklist.clear();
        self.stats = Stats::default();
        self.names.clear();
        self.date_map.clear();
        self.events.clear();
    }
}
