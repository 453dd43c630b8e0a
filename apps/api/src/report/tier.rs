//! Score tiers. The one place that maps a score to its presentation.
//!
//! Every surface that shows a tier (bar color, score label, preview emoji,
//! tooltip copy, suggestion highlight) calls `ScoreTier::from_score`.
//! Boundaries: `< 50` needs improvement, `50..76` moderate, `>= 76` excellent.

use serde::{Deserialize, Serialize};

pub const MODERATE_THRESHOLD: i64 = 50;
pub const EXCELLENT_THRESHOLD: i64 = 76;

/// An sRGB color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    NeedsImprovement,
    Moderate,
    Excellent,
}

impl ScoreTier {
    /// Tier for a raw score. Out-of-range scores land in the nearest tier.
    pub fn from_score(score: i64) -> Self {
        if score < MODERATE_THRESHOLD {
            ScoreTier::NeedsImprovement
        } else if score < EXCELLENT_THRESHOLD {
            ScoreTier::Moderate
        } else {
            ScoreTier::Excellent
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::NeedsImprovement => "Needs Improvement",
            ScoreTier::Moderate => "Moderate",
            ScoreTier::Excellent => "Excellent",
        }
    }

    /// Red, yellow, green.
    pub fn color(&self) -> Rgb {
        match self {
            ScoreTier::NeedsImprovement => Rgb(0xef, 0x44, 0x44),
            ScoreTier::Moderate => Rgb(0xfa, 0xcc, 0x15),
            ScoreTier::Excellent => Rgb(0x22, 0xc5, 0x5e),
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ScoreTier::NeedsImprovement => "😟",
            ScoreTier::Moderate => "🙂",
            ScoreTier::Excellent => "🚀",
        }
    }

    pub fn tooltip(&self) -> &'static str {
        match self {
            ScoreTier::NeedsImprovement => {
                "Needs improvement. Try adding more relevant skills and experience."
            }
            ScoreTier::Moderate => "Average match. Consider tailoring your resume further.",
            ScoreTier::Excellent => "Excellent! Your resume is highly relevant.",
        }
    }
}

/// Clamps a raw score into the displayable 0..=100 range.
pub fn clamp_score(score: i64) -> u8 {
    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ScoreTier::from_score(49), ScoreTier::NeedsImprovement);
        assert_eq!(ScoreTier::from_score(50), ScoreTier::Moderate);
        assert_eq!(ScoreTier::from_score(75), ScoreTier::Moderate);
        assert_eq!(ScoreTier::from_score(76), ScoreTier::Excellent);
    }

    #[test]
    fn test_tier_out_of_range_scores() {
        assert_eq!(ScoreTier::from_score(-20), ScoreTier::NeedsImprovement);
        assert_eq!(ScoreTier::from_score(250), ScoreTier::Excellent);
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(ScoreTier::from_score(10).label(), "Needs Improvement");
        assert_eq!(ScoreTier::from_score(60).label(), "Moderate");
        assert_eq!(ScoreTier::from_score(90).label(), "Excellent");
    }

    #[test]
    fn test_tier_colors_are_distinct() {
        let colors = [
            ScoreTier::NeedsImprovement.color(),
            ScoreTier::Moderate.color(),
            ScoreTier::Excellent.color(),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_eq!(ScoreTier::Excellent.color().hex(), "#22c55e");
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-5), 0);
        assert_eq!(clamp_score(42), 42);
        assert_eq!(clamp_score(140), 100);
    }
}
