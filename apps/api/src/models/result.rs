use serde::{Deserialize, Serialize};

/// One analysis outcome as delivered by the upstream analyzer, plus the metadata
/// the upload client attaches (size, capture time, contact).
///
/// Field names match the upstream JSON so the payload can be forwarded verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultPayload {
    #[serde(default)]
    pub filename: Option<String>,
    /// Size of the uploaded document in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Capture time as Unix epoch milliseconds.
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    /// Explicit suggestions. When absent they are derived from `summary`.
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
}

/// Immutable analysis result consumed by both report formatters.
///
/// `score` is kept exactly as received; consumers that derive geometry or a tier
/// from it clamp on their side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub filename: Option<String>,
    pub size_bytes: Option<u64>,
    pub captured_at_ms: Option<i64>,
    pub contact: Option<String>,
    pub score: i64,
    pub keywords: Vec<String>,
    pub summary: Option<String>,
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    /// Contact line, if one is present and not blank.
    pub fn contact(&self) -> Option<&str> {
        self.contact.as_deref().filter(|c| !c.trim().is_empty())
    }

    /// Summary text, if one is present and not blank.
    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.trim().is_empty())
    }
}

impl From<ResultPayload> for AnalysisResult {
    fn from(payload: ResultPayload) -> Self {
        let suggestions = match payload.suggestions {
            Some(explicit) => explicit,
            None => derive_suggestions(payload.summary.as_deref()),
        };

        AnalysisResult {
            filename: payload.filename,
            size_bytes: payload.size,
            captured_at_ms: payload.timestamp,
            contact: payload.contact,
            score: payload.score,
            keywords: payload.keywords,
            summary: payload.summary,
            suggestions,
        }
    }
}

/// Characters that end a summary line, for suggestions and for wrapped paragraphs.
pub const LINE_BREAKS: [char; 2] = ['\n', '\r'];

/// Splits a summary into suggestion items on runs of line breaks.
///
/// Blank segments are dropped; order and duplicates are kept. Segments are not
/// trimmed beyond the line-break split, matching what the analyzer emitted.
pub fn derive_suggestions(summary: Option<&str>) -> Vec<String> {
    summary
        .map(|text| {
            text.split(LINE_BREAKS)
                .filter(|segment| !segment.trim().is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_suggestions_splits_on_line_breaks() {
        let items = derive_suggestions(Some("Strong fit.\nAdd more metrics."));
        assert_eq!(items, vec!["Strong fit.", "Add more metrics."]);
    }

    #[test]
    fn test_derive_suggestions_drops_blank_segments() {
        let items = derive_suggestions(Some("One\r\n\r\n   \nTwo\n"));
        assert_eq!(items, vec!["One", "Two"]);
    }

    #[test]
    fn test_derive_suggestions_keeps_duplicates_in_order() {
        let items = derive_suggestions(Some("Same\nOther\nSame"));
        assert_eq!(items, vec!["Same", "Other", "Same"]);
    }

    #[test]
    fn test_derive_suggestions_absent_summary_is_empty() {
        assert!(derive_suggestions(None).is_empty());
    }

    #[test]
    fn test_payload_with_explicit_suggestions_keeps_them() {
        let payload = ResultPayload {
            summary: Some("A\nB".to_string()),
            suggestions: Some(vec!["custom".to_string()]),
            ..Default::default()
        };
        let result = AnalysisResult::from(payload);
        assert_eq!(result.suggestions, vec!["custom"]);
    }

    #[test]
    fn test_payload_deserializes_upstream_shape() {
        let json = r#"{
            "filename": "cv.pdf",
            "score": 82,
            "keywords": ["python", "sql"],
            "summary": "Strong fit.\nAdd more metrics."
        }"#;
        let payload: ResultPayload = serde_json::from_str(json).unwrap();
        let result = AnalysisResult::from(payload);
        assert_eq!(result.filename.as_deref(), Some("cv.pdf"));
        assert_eq!(result.score, 82);
        assert_eq!(result.size_bytes, None);
        assert_eq!(result.suggestions.len(), 2);
    }

    #[test]
    fn test_blank_contact_counts_as_absent() {
        let result = AnalysisResult::from(ResultPayload {
            contact: Some("   ".to_string()),
            ..Default::default()
        });
        assert_eq!(result.contact(), None);
    }
}
