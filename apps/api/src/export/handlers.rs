//! Axum route handlers for the Reports API.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::{AppError, ReportError};
use crate::export::Artifact;
use crate::layout::PageLayout;
use crate::models::{AnalysisResult, ResultPayload};
use crate::report::{build_preview, CompactPreview};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Body of every report endpoint. `result` is null when no analysis has run yet.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub result: Option<ResultPayload>,
}

impl ExportRequest {
    fn into_result(self) -> Option<AnalysisResult> {
        self.result.map(AnalysisResult::from)
    }
}

fn artifact_response(artifact: Artifact) -> Result<Response, AppError> {
    let disposition = HeaderValue::from_str(&artifact.content_disposition()).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("invalid Content-Disposition header: {e}"))
    })?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(artifact.content_type),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/reports/text
///
/// Returns the plain-text report as an attachment.
pub async fn handle_export_text(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let result = request.into_result();
    let artifact = state.exporter.export_text(result.as_ref())?;
    artifact_response(artifact)
}

/// POST /api/v1/reports/pdf
///
/// Lays out, renders and encodes the one-page PDF on the blocking pool.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let result = request.into_result();
    let exporter = Arc::clone(&state.exporter);

    let artifact = tokio::task::spawn_blocking(move || exporter.export_document(result.as_ref()))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF export: {e}")))??;

    artifact_response(artifact)
}

/// POST /api/v1/reports/layout
///
/// Returns the computed page geometry without rendering it.
pub async fn handle_layout(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<PageLayout>, AppError> {
    let result = request.into_result();
    let layout = state.exporter.layout(result.as_ref())?;
    Ok(Json(layout))
}

/// POST /api/v1/reports/preview
///
/// Returns the compact score card: clamped score, tier, label, color, emoji,
/// tooltip and the first keywords.
pub async fn handle_preview(
    Json(request): Json<ExportRequest>,
) -> Result<Json<CompactPreview>, AppError> {
    let result = request
        .into_result()
        .ok_or_else(|| ReportError::InvalidInput("no analysis result to preview".to_string()))?;
    Ok(Json(build_preview(&result)))
}
