//! Plain-text report: one labeled line per field, fixed order, no wrapping.

use chrono::{DateTime, FixedOffset};

use crate::config::ReportSettings;
use crate::models::AnalysisResult;

/// Rendered wherever a metadata field is absent.
pub const PLACEHOLDER: &str = "N/A";

const SIZE_UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Formats a result as the downloadable text report.
///
/// The score is printed raw, even when outside 0..=100.
pub fn format_text_report(result: &AnalysisResult, settings: &ReportSettings) -> String {
    let mut lines = vec![
        format!(
            "Filename: {}",
            result.filename.as_deref().unwrap_or(PLACEHOLDER)
        ),
        format!("Size: {}", format_size(result.size_bytes)),
        format!(
            "Uploaded: {}",
            format_timestamp(result.captured_at_ms, settings.utc_offset)
        ),
        format!("Score: {}", result.score),
        format!("Keywords: {}", result.keywords.join(", ")),
        format!(
            "Summary: {}",
            result.summary.as_deref().unwrap_or(PLACEHOLDER)
        ),
        "Suggestions:".to_string(),
    ];
    lines.extend(result.suggestions.iter().map(|s| format!("- {s}")));
    lines.join("\n")
}

/// Human-readable size with binary prefixes and two decimals, e.g. `1.50 KiB`.
pub fn format_size(size_bytes: Option<u64>) -> String {
    let Some(bytes) = size_bytes else {
        return PLACEHOLDER.to_string();
    };

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", SIZE_UNITS[unit])
}

/// Capture time in the configured offset, e.g. `3/14/2024, 9:05:00 AM`.
pub fn format_timestamp(captured_at_ms: Option<i64>, offset: FixedOffset) -> String {
    captured_at_ms
        .and_then(DateTime::from_timestamp_millis)
        .map(|ts| {
            ts.with_timezone(&offset)
                .format("%-m/%-d/%Y, %-I:%M:%S %p")
                .to_string()
        })
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_result() -> AnalysisResult {
        AnalysisResult {
            filename: Some("cv.pdf".to_string()),
            size_bytes: Some(1536),
            captured_at_ms: Some(1_710_407_100_000), // 2024-03-14 09:05:00 UTC
            contact: None,
            score: 82,
            keywords: vec!["python".to_string(), "sql".to_string()],
            summary: Some("Strong fit.\nAdd more metrics.".to_string()),
            suggestions: vec!["Strong fit.".to_string(), "Add more metrics.".to_string()],
        }
    }

    fn empty_result() -> AnalysisResult {
        AnalysisResult {
            filename: None,
            size_bytes: None,
            captured_at_ms: None,
            contact: None,
            score: 0,
            keywords: vec![],
            summary: None,
            suggestions: vec![],
        }
    }

    /// Reads back the single-line labeled fields of a text report.
    fn parse_field<'a>(report: &'a str, label: &str) -> Option<&'a str> {
        let prefix = format!("{label}: ");
        report
            .lines()
            .find_map(|line| line.strip_prefix(prefix.as_str()))
    }

    #[test]
    fn test_full_report_layout() {
        let report = format_text_report(&make_result(), &ReportSettings::default());
        let expected = "\
Filename: cv.pdf
Size: 1.50 KiB
Uploaded: 3/14/2024, 9:05:00 AM
Score: 82
Keywords: python, sql
Summary: Strong fit.
Add more metrics.
Suggestions:
- Strong fit.
- Add more metrics.";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_absent_metadata_uses_placeholder() {
        let report = format_text_report(&empty_result(), &ReportSettings::default());
        assert!(report.contains("Filename: N/A"));
        assert!(report.contains("Size: N/A"));
        assert!(report.contains("Uploaded: N/A"));
        assert!(report.contains("Summary: N/A"));
    }

    #[test]
    fn test_empty_keywords_keep_the_line() {
        let report = format_text_report(&empty_result(), &ReportSettings::default());
        assert!(report.lines().any(|l| l == "Keywords: "));
        assert!(report.ends_with("Suggestions:"));
    }

    #[test]
    fn test_out_of_range_score_printed_raw() {
        let mut result = make_result();
        result.score = 140;
        let report = format_text_report(&result, &ReportSettings::default());
        assert!(report.lines().any(|l| l == "Score: 140"));

        result.score = -3;
        let report = format_text_report(&result, &ReportSettings::default());
        assert!(report.lines().any(|l| l == "Score: -3"));
    }

    #[test]
    fn test_round_trip_recovers_filename_score_keywords() {
        let mut result = make_result();
        result.filename = Some("Jane Doe – Resume v2.pdf".to_string());
        result.keywords = vec!["machine learning".to_string(), "C++".to_string()];
        let report = format_text_report(&result, &ReportSettings::default());

        assert_eq!(
            parse_field(&report, "Filename"),
            Some("Jane Doe – Resume v2.pdf")
        );
        assert_eq!(
            parse_field(&report, "Score").and_then(|s| s.parse::<i64>().ok()),
            Some(result.score)
        );
        assert_eq!(
            parse_field(&report, "Keywords"),
            Some(result.keywords.join(", ").as_str())
        );
    }

    // ── format_size ─────────────────────────────────────────────────────────

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(Some(0)), "0.00 B");
        assert_eq!(format_size(Some(1023)), "1023.00 B");
        assert_eq!(format_size(Some(1024)), "1.00 KiB");
        assert_eq!(format_size(Some(5 * 1024 * 1024)), "5.00 MiB");
        assert_eq!(format_size(None), "N/A");
    }

    // ── format_timestamp ────────────────────────────────────────────────────

    #[test]
    fn test_format_timestamp_applies_offset() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            format_timestamp(Some(1_710_407_100_000), plus_two),
            "3/14/2024, 11:05:00 AM"
        );
    }

    #[test]
    fn test_format_timestamp_absent() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(format_timestamp(None, utc), "N/A");
    }
}
