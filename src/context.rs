//! Service context bundling the port trait objects.

use crate::adapters::fixed::FixedSheetGateway;
use crate::adapters::live::LiveSheetGateway;
use crate::ports::SheetGateway;

/// Bundles the application's port trait objects.
///
/// The spreadsheet backend is the one external boundary; constructors wire
/// up the live or the fixed adapter.
pub struct ServiceContext {
    /// Gateway to the spreadsheet backend.
    pub sheets: Box<dyn SheetGateway>,
}

impl ServiceContext {
    /// Creates a live context talking to the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn live(base_url: &str) -> Result<Self, String> {
        let gateway = LiveSheetGateway::new(base_url)
            .map_err(|e| format!("Failed to set up the backend gateway: {e}"))?;
        Ok(Self { sheets: Box::new(gateway) })
    }

    /// Creates a context over a scripted in-memory gateway.
    #[must_use]
    pub fn fixed(gateway: FixedSheetGateway) -> Self {
        Self { sheets: Box::new(gateway) }
    }
}
