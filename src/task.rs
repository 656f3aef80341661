//! Task records and their classification enums.

use chrono::NaiveDate;

/// Slot key used for tasks that carry no clock time.
pub const NO_TIME: &str = "no-time";

/// Origin sheet of a task record; drives the pending/done interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    /// The delegation sheet; complete when the sentinel cell reads `done`.
    Delegation,
    /// The checklist sheet; complete when the sentinel cell reads `yes`.
    Checklist,
}

impl SheetKind {
    /// Short display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Delegation => "Delegation",
            Self::Checklist => "Checklist",
        }
    }
}

/// Recurrence class of a task, derived from free-text frequency cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// Recurs on every working date from the start date onward.
    Daily,
    /// Recurs on every 7th working-date position from the start date.
    Weekly,
    /// Recurs on each calendar-month anniversary that is a working date.
    Monthly,
    /// Occurs exactly once, on the start date.
    OneTime,
}

impl Frequency {
    /// Classifies free-text frequency by case-insensitive prefix match.
    ///
    /// Leading `d` is daily, `w` weekly, `m` monthly; anything else —
    /// including absent or empty text — is one-time. Total over all input.
    #[must_use]
    pub fn classify(text: Option<&str>) -> Self {
        let Some(text) = text else { return Self::OneTime };
        let normalized = text.trim().to_lowercase();
        if normalized.starts_with('d') {
            Self::Daily
        } else if normalized.starts_with('w') {
            Self::Weekly
        } else if normalized.starts_with('m') {
            Self::Monthly
        } else {
            Self::OneTime
        }
    }
}

/// One task row, transformed from a sheet into typed fields.
///
/// Constructed only when both the task id and the start date are present
/// and parseable; rows failing that are skipped entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    /// Unique identifier within the source sheet.
    pub task_id: String,
    /// Submission timestamp text, as stored in the sheet.
    pub timestamp: String,
    /// Owning department.
    pub department: String,
    /// Who assigned the task.
    pub given_by: String,
    /// Assignee name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Anchor date for recurrence.
    pub start_date: NaiveDate,
    /// Raw frequency text, kept for display and listing filters.
    pub frequency_text: String,
    /// Classified recurrence class.
    pub frequency: Frequency,
    /// Optional clock-time text (`HH:MM` or `HH:MM AM/PM`).
    pub time: Option<String>,
    /// Display status, default `pending`.
    pub status: String,
    /// Free-text remarks.
    pub remarks: String,
    /// Display priority, default `normal`.
    pub priority: String,
    /// Raw completion sentinel cell for the pending check.
    pub completion: String,
    /// Origin sheet.
    pub sheet_kind: SheetKind,
    /// 1-based sheet row (the header is row 1), for write-back correlation.
    pub row_index: usize,
}

impl TaskRecord {
    /// Whether the task is still pending under its sheet kind's rule.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        let sentinel = self.completion.trim();
        match self.sheet_kind {
            SheetKind::Checklist => !sentinel.eq_ignore_ascii_case("yes"),
            SheetKind::Delegation => !sentinel.eq_ignore_ascii_case("done"),
        }
    }

    /// Time-slot key: the task's time text, or the no-time sentinel.
    #[must_use]
    pub fn slot_key(&self) -> &str {
        self.time.as_deref().unwrap_or(NO_TIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: SheetKind, completion: &str) -> TaskRecord {
        TaskRecord {
            task_id: "T-1".into(),
            timestamp: String::new(),
            department: String::new(),
            given_by: String::new(),
            name: "alice".into(),
            description: String::new(),
            start_date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
            frequency_text: "Daily".into(),
            frequency: Frequency::Daily,
            time: None,
            status: "pending".into(),
            remarks: String::new(),
            priority: "normal".into(),
            completion: completion.into(),
            sheet_kind: kind,
            row_index: 2,
        }
    }

    #[test]
    fn classify_matches_prefixes_case_insensitively() {
        assert_eq!(Frequency::classify(Some("D")), Frequency::Daily);
        assert_eq!(Frequency::classify(Some("daily")), Frequency::Daily);
        assert_eq!(Frequency::classify(Some("Days")), Frequency::Daily);
        assert_eq!(Frequency::classify(Some("  Weekly ")), Frequency::Weekly);
        assert_eq!(Frequency::classify(Some("monthly")), Frequency::Monthly);
    }

    #[test]
    fn classify_defaults_to_one_time() {
        assert_eq!(Frequency::classify(None), Frequency::OneTime);
        assert_eq!(Frequency::classify(Some("")), Frequency::OneTime);
        assert_eq!(Frequency::classify(Some("quarterly")), Frequency::OneTime);
        assert_eq!(Frequency::classify(Some("One Time")), Frequency::OneTime);
    }

    #[test]
    fn checklist_pending_unless_yes() {
        assert!(record(SheetKind::Checklist, "").is_pending());
        assert!(record(SheetKind::Checklist, "no").is_pending());
        assert!(!record(SheetKind::Checklist, "Yes").is_pending());
        assert!(!record(SheetKind::Checklist, " YES ").is_pending());
    }

    #[test]
    fn delegation_pending_unless_done() {
        assert!(record(SheetKind::Delegation, "").is_pending());
        assert!(record(SheetKind::Delegation, "in progress").is_pending());
        assert!(!record(SheetKind::Delegation, "Done").is_pending());
        // The checklist sentinel does not complete a delegation task.
        assert!(record(SheetKind::Delegation, "yes").is_pending());
    }

    #[test]
    fn slot_key_falls_back_to_no_time() {
        let mut t = record(SheetKind::Checklist, "");
        assert_eq!(t.slot_key(), NO_TIME);
        t.time = Some("14:30".into());
        assert_eq!(t.slot_key(), "14:30");
    }
}
