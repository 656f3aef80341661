//! Port traits defining external boundaries.
//!
//! The one external system this application talks to is the spreadsheet
//! backend. Implementations live in `src/adapters/`.

pub mod sheets;

pub use sheets::{CellValue, SheetGateway, SheetRow, SheetTable, TableFuture, WriteFuture};
