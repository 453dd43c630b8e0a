use std::sync::Arc;

use crate::export::ReportExporter;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; cloning shares the exporter.
#[derive(Clone)]
pub struct AppState {
    /// Report exporter carrying the configured `ReportSettings`.
    pub exporter: Arc<ReportExporter>,
}

impl AppState {
    pub fn new(exporter: ReportExporter) -> Self {
        AppState {
            exporter: Arc::new(exporter),
        }
    }
}
