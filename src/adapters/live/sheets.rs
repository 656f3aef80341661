//! Live adapter for the `SheetGateway` port over the Apps-Script endpoint.

use std::collections::BTreeMap;
use std::error::Error;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::ports::{CellValue, SheetGateway, SheetRow, SheetTable, TableFuture, WriteFuture};

/// Fixed per-request ceiling; a request exceeding it fails like any other
/// fetch failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Live gateway that talks to the spreadsheet backend over HTTP.
///
/// Reads use `GET {base}?sheet=<name>&action=fetch`; writes are
/// form-encoded `POST`s carrying an `action` discriminator.
pub struct LiveSheetGateway {
    client: Client,
    base_url: String,
}

impl LiveSheetGateway {
    /// Creates a gateway against the given backend base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;
        Ok(Self { client, base_url: base_url.into() })
    }
}

/// Fetch payload shape: `{ table: { rows: [ { c: [ {v: ...} ] } ] } }`.
#[derive(Deserialize)]
struct FetchPayload {
    table: Option<PayloadTable>,
}

#[derive(Deserialize)]
struct PayloadTable {
    rows: Option<Vec<PayloadRow>>,
}

#[derive(Deserialize)]
struct PayloadRow {
    #[serde(default)]
    c: Option<Vec<Option<PayloadCell>>>,
}

#[derive(Deserialize)]
struct PayloadCell {
    #[serde(default)]
    v: Option<serde_json::Value>,
}

/// Acknowledgement returned by write-back actions.
#[derive(Deserialize)]
struct WriteAck {
    #[serde(default)]
    success: bool,
    error: Option<String>,
}

/// Converts the fetch payload into a sheet table.
///
/// A payload without `table.rows` is a malformed response and fails the
/// whole fetch; individual odd cells just become absent.
fn parse_fetch_payload(body: &str) -> Result<SheetTable, Box<dyn Error + Send + Sync>> {
    let payload: FetchPayload =
        serde_json::from_str(body).map_err(|e| format!("Failed to parse sheet response: {e}"))?;
    let rows = payload
        .table
        .and_then(|t| t.rows)
        .ok_or("Sheet response is missing table rows")?;
    Ok(SheetTable {
        rows: rows
            .into_iter()
            .map(|row| SheetRow {
                cells: row
                    .c
                    .unwrap_or_default()
                    .into_iter()
                    .map(|cell| cell.and_then(|c| c.v).and_then(cell_value))
                    .collect(),
            })
            .collect(),
    })
}

fn cell_value(value: serde_json::Value) -> Option<CellValue> {
    match value {
        serde_json::Value::String(s) => Some(CellValue::Text(s)),
        serde_json::Value::Number(n) => n.as_f64().map(CellValue::Number),
        serde_json::Value::Bool(b) => Some(CellValue::Bool(b)),
        _ => None,
    }
}

/// Parses a write acknowledgement, surfacing backend-reported failures.
fn parse_write_ack(body: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let ack: WriteAck =
        serde_json::from_str(body).map_err(|_| "Invalid server response".to_string())?;
    if ack.success {
        Ok(())
    } else {
        Err(ack.error.unwrap_or_else(|| "Backend rejected the write".to_string()).into())
    }
}

impl LiveSheetGateway {
    async fn post_form(
        &self,
        form: Vec<(&'static str, String)>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .post(&self.base_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| format!("Backend request failed: {e}"))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read backend response: {e}"))?;
        if !status.is_success() {
            return Err(format!("Backend error ({}): {body}", status.as_u16()).into());
        }
        parse_write_ack(&body)
    }
}

impl SheetGateway for LiveSheetGateway {
    fn fetch_table(&self, sheet: &str) -> TableFuture<'_> {
        let sheet = sheet.to_string();
        Box::pin(async move {
            let response = self
                .client
                .get(&self.base_url)
                .query(&[("sheet", sheet.as_str()), ("action", "fetch")])
                .send()
                .await
                .map_err(|e| format!("Failed to fetch sheet {sheet}: {e}"))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| format!("Failed to read sheet {sheet}: {e}"))?;
            if !status.is_success() {
                return Err(format!("Backend error ({}) for sheet {sheet}", status.as_u16()).into());
            }
            parse_fetch_payload(&body)
        })
    }

    fn update_task(
        &self,
        sheet: &str,
        task_id: &str,
        fields: &BTreeMap<String, String>,
    ) -> WriteFuture<'_> {
        let row_data = serde_json::to_string(fields).unwrap_or_else(|_| "{}".to_string());
        let form = vec![
            ("action", "updateTask".to_string()),
            ("sheetName", sheet.to_string()),
            ("taskId", task_id.to_string()),
            ("rowData", row_data),
        ];
        Box::pin(async move { self.post_form(form).await })
    }

    fn delete_task(&self, sheet: &str, task_id: &str) -> WriteFuture<'_> {
        let form = vec![
            ("action", "deleteTaskByID".to_string()),
            ("sheetName", sheet.to_string()),
            ("taskId", task_id.to_string()),
        ];
        Box::pin(async move { self.post_form(form).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_gviz_payload() {
        let body = r#"{
            "table": { "rows": [
                { "c": [ {"v": "Date"} ] },
                { "c": [ {"v": "01/07/2025"}, null, {"v": 7}, {"v": true}, {"v": null} ] }
            ] }
        }"#;
        let table = parse_fetch_payload(body).unwrap();
        assert_eq!(table.rows.len(), 2);
        let row = &table.rows[1];
        assert_eq!(row.cell(0), Some(&CellValue::Text("01/07/2025".into())));
        assert_eq!(row.cell(1), None);
        assert_eq!(row.cell(2), Some(&CellValue::Number(7.0)));
        assert_eq!(row.cell(3), Some(&CellValue::Bool(true)));
        assert_eq!(row.cell(4), None);
    }

    #[test]
    fn missing_table_rows_is_an_error() {
        assert!(parse_fetch_payload("{}").is_err());
        assert!(parse_fetch_payload(r#"{"table": {}}"#).is_err());
        assert!(parse_fetch_payload("not json").is_err());
    }

    #[test]
    fn rows_without_cells_become_empty_rows() {
        let table = parse_fetch_payload(r#"{"table": {"rows": [{}]}}"#).unwrap();
        assert!(table.rows[0].is_empty());
    }

    #[test]
    fn write_ack_requires_success() {
        assert!(parse_write_ack(r#"{"success": true}"#).is_ok());
        let err = parse_write_ack(r#"{"success": false, "error": "no such task"}"#).unwrap_err();
        assert!(err.to_string().contains("no such task"));
        assert!(parse_write_ack(r#"{}"#).is_err());
        let err = parse_write_ack("<html>").unwrap_err();
        assert!(err.to_string().contains("Invalid server response"));
    }
}
