//! Fixed adapter for the `SheetGateway` port.
//!
//! Serves scripted tables from memory and can inject per-sheet fetch
//! failures, so refresh and aggregation behavior is testable without a
//! live backend. Write-backs are recorded instead of sent anywhere.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use crate::ports::{SheetGateway, SheetTable, TableFuture, WriteFuture};

/// One recorded write-back call.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteCall {
    /// A recorded `update_task` call.
    Update {
        /// Target sheet name.
        sheet: String,
        /// Target task id.
        task_id: String,
        /// Header-keyed field values.
        fields: BTreeMap<String, String>,
    },
    /// A recorded `delete_task` call.
    Delete {
        /// Target sheet name.
        sheet: String,
        /// Target task id.
        task_id: String,
    },
}

/// In-memory scripted gateway.
#[derive(Debug, Default)]
pub struct FixedSheetGateway {
    tables: Mutex<HashMap<String, SheetTable>>,
    failing: Mutex<HashSet<String>>,
    writes: Mutex<Vec<WriteCall>>,
}

impl FixedSheetGateway {
    /// Creates an empty gateway; every fetch fails until tables are
    /// scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the table served for a sheet name.
    pub fn insert_table(&self, sheet: &str, table: SheetTable) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.insert(sheet.to_string(), table);
        }
    }

    /// Makes subsequent fetches of the sheet fail with a simulated network
    /// error.
    pub fn fail_sheet(&self, sheet: &str) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(sheet.to_string());
        }
    }

    /// Clears a previously injected failure.
    pub fn restore_sheet(&self, sheet: &str) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.remove(sheet);
        }
    }

    /// Returns all recorded write-back calls, in order.
    #[must_use]
    pub fn writes(&self) -> Vec<WriteCall> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    fn record(&self, call: WriteCall) {
        if let Ok(mut writes) = self.writes.lock() {
            writes.push(call);
        }
    }
}

impl SheetGateway for FixedSheetGateway {
    fn fetch_table(&self, sheet: &str) -> TableFuture<'_> {
        let sheet = sheet.to_string();
        Box::pin(async move {
            let failing = self.failing.lock().map(|f| f.contains(&sheet)).unwrap_or(false);
            if failing {
                return Err(format!("simulated network error for sheet {sheet}").into());
            }
            self.tables
                .lock()
                .ok()
                .and_then(|tables| tables.get(&sheet).cloned())
                .ok_or_else(|| format!("no table scripted for sheet {sheet}").into())
        })
    }

    fn update_task(
        &self,
        sheet: &str,
        task_id: &str,
        fields: &BTreeMap<String, String>,
    ) -> WriteFuture<'_> {
        let call = WriteCall::Update {
            sheet: sheet.to_string(),
            task_id: task_id.to_string(),
            fields: fields.clone(),
        };
        Box::pin(async move {
            self.record(call);
            Ok(())
        })
    }

    fn delete_task(&self, sheet: &str, task_id: &str) -> WriteFuture<'_> {
        let call = WriteCall::Delete { sheet: sheet.to_string(), task_id: task_id.to_string() };
        Box::pin(async move {
            self.record(call);
            Ok(())
        })
    }
}
