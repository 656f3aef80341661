//! Fixed adapters serving scripted data for tests.

pub mod sheets;

pub use sheets::{FixedSheetGateway, WriteCall};
