use serde::Serialize;

use crate::models::AnalysisResult;
use crate::report::tier::{clamp_score, ScoreTier};

/// Keywords shown in the compact preview card.
pub const PREVIEW_KEYWORD_CAP: usize = 7;

/// Compact, display-ready summary of a result: the score card of the upload view.
#[derive(Debug, Clone, Serialize)]
pub struct CompactPreview {
    pub score: u8,
    pub tier: ScoreTier,
    pub label: &'static str,
    pub color: String,
    pub emoji: &'static str,
    pub tooltip: &'static str,
    pub keywords: Vec<String>,
    /// Keywords beyond the cap. Reported instead of silently dropped.
    pub hidden_keywords: usize,
}

pub fn build_preview(result: &AnalysisResult) -> CompactPreview {
    let tier = ScoreTier::from_score(result.score);
    let shown = result.keywords.len().min(PREVIEW_KEYWORD_CAP);

    CompactPreview {
        score: clamp_score(result.score),
        tier,
        label: tier.label(),
        color: tier.color().hex(),
        emoji: tier.emoji(),
        tooltip: tier.tooltip(),
        keywords: result.keywords[..shown].to_vec(),
        hidden_keywords: result.keywords.len() - shown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResultPayload;

    fn make_result(score: i64, keyword_count: usize) -> AnalysisResult {
        AnalysisResult::from(ResultPayload {
            score,
            keywords: (0..keyword_count).map(|i| format!("kw{i}")).collect(),
            ..Default::default()
        })
    }

    #[test]
    fn test_preview_caps_keywords_at_seven() {
        let preview = build_preview(&make_result(60, 9));
        assert_eq!(preview.keywords.len(), 7);
        assert_eq!(preview.keywords[6], "kw6");
        assert_eq!(preview.hidden_keywords, 2);
    }

    #[test]
    fn test_preview_short_keyword_list_has_no_hidden() {
        let preview = build_preview(&make_result(60, 3));
        assert_eq!(preview.keywords.len(), 3);
        assert_eq!(preview.hidden_keywords, 0);
    }

    #[test]
    fn test_preview_uses_shared_tier_policy() {
        let preview = build_preview(&make_result(76, 0));
        assert_eq!(preview.tier, ScoreTier::Excellent);
        assert_eq!(preview.label, "Excellent");
        assert_eq!(preview.emoji, ScoreTier::Excellent.emoji());
        assert_eq!(preview.color, "#22c55e");
    }

    #[test]
    fn test_preview_clamps_display_score() {
        assert_eq!(build_preview(&make_result(130, 0)).score, 100);
        assert_eq!(build_preview(&make_result(-4, 0)).score, 0);
    }
}
