//! Export facade: the two download actions behind one type.
//!
//! Both exports are pure functions of the result and the immutable settings;
//! each call derives its output from scratch.

use bytes::Bytes;
use tracing::info;

use crate::config::ReportSettings;
use crate::errors::ReportError;
use crate::layout::{compute_layout, PageLayout};
use crate::models::AnalysisResult;
use crate::render::{encode_pdf, render};
use crate::report::format_text_report;

pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";
/// Base name used when the result carries no filename.
pub const FALLBACK_BASENAME: &str = "resume";

/// A finished download: bytes plus how to offer them.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

impl Artifact {
    /// `Content-Disposition` value offering the artifact as a download.
    ///
    /// Characters that cannot appear in a quoted ASCII header value become `_`.
    pub fn content_disposition(&self) -> String {
        let safe: String = self
            .filename
            .chars()
            .map(|c| match c {
                '"' | '\\' => '_',
                c if c.is_ascii_graphic() || c == ' ' => c,
                _ => '_',
            })
            .collect();
        format!("attachment; filename=\"{safe}\"")
    }
}

fn base_name(result: &AnalysisResult) -> &str {
    result
        .filename
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_BASENAME)
}

/// `<name>.txt`, always appended: `cv.pdf` exports as `cv.pdf.txt`.
pub fn text_filename(result: &AnalysisResult) -> String {
    format!("{}.txt", base_name(result))
}

/// `<name>` when it already ends in `.pdf` (any case), otherwise `<name>.pdf`.
pub fn pdf_filename(result: &AnalysisResult) -> String {
    let name = base_name(result);
    if name.to_ascii_lowercase().ends_with(".pdf") {
        name.to_string()
    } else {
        format!("{name}.pdf")
    }
}

fn require(result: Option<&AnalysisResult>) -> Result<&AnalysisResult, ReportError> {
    result.ok_or_else(|| ReportError::InvalidInput("no analysis result to export".to_string()))
}

/// Produces the text and visual artifacts for an analysis result.
#[derive(Debug, Clone, Default)]
pub struct ReportExporter {
    settings: ReportSettings,
}

impl ReportExporter {
    pub fn new(settings: ReportSettings) -> Self {
        ReportExporter { settings }
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Plain-text report as a UTF-8 download.
    pub fn export_text(&self, result: Option<&AnalysisResult>) -> Result<Artifact, ReportError> {
        let result = require(result)?;
        let text = format_text_report(result, &self.settings);
        let artifact = Artifact {
            filename: text_filename(result),
            content_type: TEXT_CONTENT_TYPE,
            bytes: Bytes::from(text),
        };

        info!(
            filename = %artifact.filename,
            bytes = artifact.bytes.len(),
            "Text report exported"
        );
        Ok(artifact)
    }

    /// Page layout for a result, without rendering it.
    pub fn layout(&self, result: Option<&AnalysisResult>) -> Result<PageLayout, ReportError> {
        compute_layout(require(result)?, &self.settings)
    }

    /// Single-page PDF report. CPU-bound; async callers run it on the blocking pool.
    pub fn export_document(
        &self,
        result: Option<&AnalysisResult>,
    ) -> Result<Artifact, ReportError> {
        let result = require(result)?;
        let layout = compute_layout(result, &self.settings)?;
        let document = render(&layout, result);
        let artifact = Artifact {
            filename: pdf_filename(result),
            content_type: PDF_CONTENT_TYPE,
            bytes: Bytes::from(encode_pdf(&document)),
        };

        info!(
            filename = %artifact.filename,
            bytes = artifact.bytes.len(),
            draw_ops = document.ops.len(),
            truncated_sections = layout.overflow.len(),
            hidden_keywords = layout.keyword_overflow,
            "Visual report exported"
        );
        Ok(artifact)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
