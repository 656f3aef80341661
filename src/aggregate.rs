//! Filtering and date/time-slot aggregation of task collections.
//!
//! The aggregation map is a derived, disposable view: it is rebuilt
//! wholesale on every refresh or filter change and never patched in place.
//! Tasks flow through a fixed filter order — role, pending, optional name —
//! before recurrence expansion and placement.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Timelike};

use crate::recur;
use crate::session::Session;
use crate::task::{SheetKind, TaskRecord, NO_TIME};

/// Optional assignee-name filter; the `all` sentinel disables it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFilter {
    /// No name filtering.
    All,
    /// Retain only tasks assigned to this name.
    Name(String),
}

impl NameFilter {
    /// Builds a filter from an optional CLI argument; absent input or the
    /// literal `all` (case-insensitive) disables filtering.
    #[must_use]
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None => Self::All,
            Some(name) if name.trim().eq_ignore_ascii_case("all") => Self::All,
            Some(name) => Self::Name(name.to_string()),
        }
    }

    fn keeps(&self, task: &TaskRecord) -> bool {
        match self {
            Self::All => true,
            Self::Name(name) => normalize(&task.name) == normalize(name),
        }
    }
}

/// Delegation/checklist occurrence lists for one date or one time slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskSplit {
    /// Delegation occurrences.
    pub delegation: Vec<TaskRecord>,
    /// Checklist occurrences.
    pub checklist: Vec<TaskRecord>,
}

impl TaskSplit {
    /// Total occurrences across both lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.delegation.len() + self.checklist.len()
    }

    /// Whether both lists are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.delegation.is_empty() && self.checklist.is_empty()
    }

    fn list_mut(&mut self, kind: SheetKind) -> &mut Vec<TaskRecord> {
        match kind {
            SheetKind::Delegation => &mut self.delegation,
            SheetKind::Checklist => &mut self.checklist,
        }
    }
}

/// All occurrences of one date, plus the same split scoped per time slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayTasks {
    /// Every occurrence on the date.
    pub all: TaskSplit,
    /// Occurrences keyed by time-slot text (or the no-time sentinel).
    pub by_slot: BTreeMap<String, TaskSplit>,
}

/// The date-aggregation map: occurrences keyed by date, sub-keyed by slot.
pub type DateMap = BTreeMap<NaiveDate, DayTasks>;

/// Builds the date-aggregation map from the two task collections.
///
/// Each collection independently passes the role filter, the pending
/// filter, and the optional name filter, in that order; survivors are
/// expanded over the working-date set and placed under every occurrence
/// date. Deterministic and idempotent for identical inputs.
#[must_use]
pub fn build_date_map(
    delegation: &[TaskRecord],
    checklist: &[TaskRecord],
    working_dates: &[NaiveDate],
    session: &Session,
    name_filter: &NameFilter,
) -> DateMap {
    let mut map = DateMap::new();
    for collection in [delegation, checklist] {
        for task in filtered(collection, session, name_filter) {
            for date in recur::occurrences(task.start_date, working_dates, task.frequency) {
                let day = map.entry(date).or_default();
                day.all.list_mut(task.sheet_kind).push(task.clone());
                day.by_slot
                    .entry(task.slot_key().to_string())
                    .or_default()
                    .list_mut(task.sheet_kind)
                    .push(task.clone());
            }
        }
    }
    map
}

/// Applies the role, pending, and name filters in their fixed order.
fn filtered<'a>(
    tasks: &'a [TaskRecord],
    session: &Session,
    name_filter: &NameFilter,
) -> Vec<&'a TaskRecord> {
    tasks
        .iter()
        .filter(|t| session.is_admin() || session.owns_name(&t.name))
        .filter(|t| t.is_pending())
        .filter(|t| name_filter.keeps(t))
        .collect()
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// One renderable calendar event: the occurrence counts of a (date, slot)
/// pair, with a parsed start time and a synthetic one-hour end when the
/// slot text carries a clock time.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    /// Occurrence date.
    pub date: NaiveDate,
    /// Slot text (or the no-time sentinel).
    pub slot: String,
    /// Parsed start time; `None` renders as an all-day event.
    pub start: Option<NaiveTime>,
    /// End time, one hour after the start (wrapping past midnight).
    pub end: Option<NaiveTime>,
    /// Number of delegation occurrences in the slot.
    pub delegation: usize,
    /// Number of checklist occurrences in the slot.
    pub checklist: usize,
}

impl CalendarEvent {
    /// Stable event identifier: `YYYY-MM-DD-<slot>`.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}-{}", self.date.format("%Y-%m-%d"), self.slot)
    }

    /// Whether the event spans the whole day.
    #[must_use]
    pub fn all_day(&self) -> bool {
        self.start.is_none()
    }

    /// Compact count label, e.g. `2D 1C`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{}D {}C", self.delegation, self.checklist)
    }
}

/// Derives the renderable event list from a date map.
///
/// One event per (date, slot) with a non-zero occurrence count, ordered by
/// date, then all-day events first, then start time.
#[must_use]
pub fn events(map: &DateMap) -> Vec<CalendarEvent> {
    let mut events = Vec::new();
    for (date, day) in map {
        for (slot, split) in &day.by_slot {
            if split.is_empty() {
                continue;
            }
            let start = if slot == NO_TIME { None } else { parse_slot_time(slot) };
            let end = start.map(|t| {
                let (hour, minute) = (t.hour(), t.minute());
                NaiveTime::from_hms_opt((hour + 1) % 24, minute, 0).unwrap_or(t)
            });
            events.push(CalendarEvent {
                date: *date,
                slot: slot.clone(),
                start,
                end,
                delegation: split.delegation.len(),
                checklist: split.checklist.len(),
            });
        }
    }
    // `None` sorts first, so all-day events lead each date.
    events.sort_by(|a, b| (a.date, a.start, &a.slot).cmp(&(b.date, b.start, &b.slot)));
    events
}

/// Parses slot text into a clock time.
///
/// A trailing `AM`/`PM` marker selects 12-hour interpretation with the
/// usual noon adjustment (12 PM stays 12, 12 AM becomes 0, PM adds 12);
/// otherwise the text parses as 24-hour `H:MM`. Unparseable text yields
/// `None` and the slot renders as all-day.
#[must_use]
pub fn parse_slot_time(text: &str) -> Option<NaiveTime> {
    let t = text.trim();
    let upper = t.to_ascii_uppercase();
    if let Some(rest) = upper.strip_suffix("AM") {
        let (hour, minute) = hour_minute(rest)?;
        if !(1..=12).contains(&hour) {
            return None;
        }
        return NaiveTime::from_hms_opt(if hour == 12 { 0 } else { hour }, minute, 0);
    }
    if let Some(rest) = upper.strip_suffix("PM") {
        let (hour, minute) = hour_minute(rest)?;
        if !(1..=12).contains(&hour) {
            return None;
        }
        return NaiveTime::from_hms_opt(if hour == 12 { 12 } else { hour + 12 }, minute, 0);
    }
    let (hour, minute) = hour_minute(t)?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Splits `H:MM` text (with optional trailing seconds) into hour and
/// minute.
fn hour_minute(text: &str) -> Option<(u32, u32)> {
    let (hour, rest) = text.trim().split_once(':')?;
    let hour: u32 = hour.trim().parse().ok()?;
    let minutes: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if minutes.len() != 2 {
        return None;
    }
    let minute: u32 = minutes.parse().ok()?;
    (hour <= 23 && minute <= 59).then_some((hour, minute))
}

/// Drill-down scope around a focus date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewScope {
    /// The focus date only.
    Day,
    /// The Sunday-started week containing the focus date.
    Week,
    /// The calendar month containing the focus date.
    Month,
}

/// Collects the tasks visible in a drill-down view.
///
/// Week and month scopes union the per-day lists and deduplicate by task
/// id within each list, so a daily task shows once per view rather than
/// once per day.
#[must_use]
pub fn drill_down(map: &DateMap, focus: NaiveDate, scope: ViewScope) -> TaskSplit {
    match scope {
        ViewScope::Day => map.get(&focus).map(|day| day.all.clone()).unwrap_or_default(),
        ViewScope::Week => {
            let start = focus - Days::new(u64::from(focus.weekday().num_days_from_sunday()));
            let end = start + Days::new(6);
            collect_range(map, |date| *date >= start && *date <= end)
        }
        ViewScope::Month => {
            collect_range(map, |date| date.year() == focus.year() && date.month() == focus.month())
        }
    }
}

fn collect_range(map: &DateMap, keep: impl Fn(&NaiveDate) -> bool) -> TaskSplit {
    let mut split = TaskSplit::default();
    for (_, day) in map.iter().filter(|(date, _)| keep(date)) {
        for task in &day.all.delegation {
            if !split.delegation.iter().any(|t| t.task_id == task.task_id) {
                split.delegation.push(task.clone());
            }
        }
        for task in &day.all.checklist {
            if !split.checklist.iter().any(|t| t.task_id == task.task_id) {
                split.checklist.push(task.clone());
            }
        }
    }
    split
}
