//! Live adapters for real external interactions.

pub mod sheets;

pub use sheets::LiveSheetGateway;
