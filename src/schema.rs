//! Per-sheet column schemas.
//!
//! Column positions are a configuration contract with the spreadsheet
//! backend: changing them requires a coordinated schema update on both
//! sides, never a scattered code change. Each sheet kind gets an explicit
//! schema struct instead of magic numeric offsets.

use crate::task::SheetKind;

/// Name of the working-day calendar sheet.
pub const WORKING_DAY_CALENDAR: &str = "Working Day Calendar";

/// Column index of the date column in the working-day calendar sheet.
pub const WORKING_DATE_COLUMN: usize = 0;

/// One named column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Header label, also used as the field key in write-back payloads.
    pub header: &'static str,
    /// Zero-based column index in the sheet.
    pub index: usize,
}

/// Fixed column layout of one task sheet.
#[derive(Debug, Clone, Copy)]
pub struct SheetSchema {
    /// Backend sheet name used in fetch and write-back requests.
    pub sheet: &'static str,
    /// The sheet kind this schema describes.
    pub kind: SheetKind,
    /// Submission timestamp.
    pub timestamp: Column,
    /// Unique task identifier.
    pub task_id: Column,
    /// Owning department.
    pub department: Column,
    /// Who assigned the task.
    pub given_by: Column,
    /// Assignee name, matched by the role and name filters.
    pub name: Column,
    /// Free-text task description.
    pub description: Column,
    /// Recurrence anchor date.
    pub start_date: Column,
    /// Free-text frequency.
    pub frequency: Column,
    /// Optional clock-time text.
    pub time: Column,
    /// Display status.
    pub status: Column,
    /// Free-text remarks.
    pub remarks: Column,
    /// Display priority.
    pub priority: Column,
    /// Completion sentinel cell: `yes` marks a checklist task complete,
    /// `done` marks a delegation task complete.
    pub completion: Column,
}

/// Schema of the delegation sheet.
pub const DELEGATION: SheetSchema = SheetSchema {
    sheet: "DELEGATION",
    kind: SheetKind::Delegation,
    timestamp: Column { header: "Timestamp", index: 0 },
    task_id: Column { header: "Task ID", index: 1 },
    department: Column { header: "Department", index: 2 },
    given_by: Column { header: "Given By", index: 3 },
    name: Column { header: "Name", index: 4 },
    description: Column { header: "Task Description", index: 5 },
    start_date: Column { header: "Task Start Date", index: 6 },
    frequency: Column { header: "Freq", index: 7 },
    time: Column { header: "Time", index: 8 },
    status: Column { header: "Status", index: 12 },
    remarks: Column { header: "Remarks", index: 13 },
    priority: Column { header: "Priority", index: 15 },
    completion: Column { header: "Remarks", index: 13 },
};

/// Schema of the checklist sheet.
pub const CHECKLIST: SheetSchema = SheetSchema {
    sheet: "Checklist",
    kind: SheetKind::Checklist,
    timestamp: Column { header: "Timestamp", index: 0 },
    task_id: Column { header: "Task ID", index: 1 },
    department: Column { header: "Department", index: 2 },
    given_by: Column { header: "Given By", index: 3 },
    name: Column { header: "Name", index: 4 },
    description: Column { header: "Task Description", index: 5 },
    start_date: Column { header: "Start Date", index: 6 },
    frequency: Column { header: "Frequency", index: 7 },
    time: Column { header: "Time", index: 8 },
    status: Column { header: "Status", index: 12 },
    remarks: Column { header: "Remarks", index: 13 },
    priority: Column { header: "Priority", index: 15 },
    completion: Column { header: "Status", index: 12 },
};

impl SheetSchema {
    /// Returns the schema for a sheet kind.
    #[must_use]
    pub fn for_kind(kind: SheetKind) -> &'static Self {
        match kind {
            SheetKind::Delegation => &DELEGATION,
            SheetKind::Checklist => &CHECKLIST,
        }
    }

    /// Columns shown in listings, in sheet order.
    #[must_use]
    pub fn display_columns(&self) -> [&Column; 12] {
        [
            &self.timestamp,
            &self.task_id,
            &self.department,
            &self.given_by,
            &self.name,
            &self.description,
            &self.start_date,
            &self.frequency,
            &self.time,
            &self.status,
            &self.remarks,
            &self.priority,
        ]
    }

    /// Resolves a user-supplied header name to an editable column.
    ///
    /// The timestamp and task-id columns are not editable; lookup is
    /// case-insensitive on the header label.
    #[must_use]
    pub fn editable_column(&self, header: &str) -> Option<&Column> {
        self.display_columns()
            .into_iter()
            .skip(2)
            .find(|c| c.header.eq_ignore_ascii_case(header.trim()))
    }
}
