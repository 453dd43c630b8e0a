pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Reports API
        .route("/api/v1/reports/text", post(handlers::handle_export_text))
        .route("/api/v1/reports/pdf", post(handlers::handle_export_pdf))
        .route("/api/v1/reports/layout", post(handlers::handle_layout))
        .route("/api/v1/reports/preview", post(handlers::handle_preview))
        .with_state(state)
}
