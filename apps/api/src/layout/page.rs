//! Page model and the fixed dimensions of every report section.
//!
//! All values are millimetres on an A4 page with the origin at the top-left.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::Face;

/// Dimensions of the single report page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    /// Outer margin; the card border is drawn inside it.
    pub margin: f32,
    /// Left edge of text and shapes inside the card.
    pub content_x: f32,
    pub content_width: f32,
}

impl PageGeometry {
    pub fn a4() -> Self {
        PageGeometry {
            width: 210.0,
            height: 297.0,
            margin: 10.0,
            content_x: 20.0,
            content_width: 180.0,
        }
    }

    /// Right edge of the content box.
    pub fn content_right(&self) -> f32 {
        self.content_x + self.content_width
    }

    /// Top edge of the anchored footer.
    pub fn footer_top(&self) -> f32 {
        self.height - FOOTER_BOTTOM_OFFSET - FOOTER_HEIGHT
    }

    /// Lowest Y the flow sections may reach.
    pub fn flow_limit(&self) -> f32 {
        self.footer_top() - SECTION_GAP
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

// Vertical rhythm.
pub const HEADER_HEIGHT: f32 = 22.0;
pub const SECTION_GAP: f32 = 8.0;
pub const LINE_HEIGHT: f32 = 6.0;
pub const TITLE_HEIGHT: f32 = 9.0;
/// Baseline offset of body text inside a `LINE_HEIGHT` slot.
pub const LINE_BASELINE: f32 = 4.5;
/// Baseline offset of a section heading inside its `TITLE_HEIGHT` slot.
pub const TITLE_BASELINE: f32 = 6.5;

// Header band.
pub const HEADER_TITLE_X: f32 = 15.0;
pub const HEADER_TITLE_BASELINE: f32 = 14.0;
pub const BADGE_RADIUS: f32 = 6.0;
pub const BADGE_CENTER_X: f32 = 195.0;
pub const BADGE_CENTER_Y: f32 = 11.0;
pub const BADGE_TEXT: &str = "IE";
/// Space between the header band and the card border.
pub const CARD_INSET: f32 = 3.0;

// Score block.
pub const SCORE_READOUT_HEIGHT: f32 = 8.0;
pub const SCORE_LABEL_HEIGHT: f32 = 7.0;
pub const SCORE_BAR_HEIGHT: f32 = 8.0;
pub const SCORE_BLOCK_HEIGHT: f32 = SCORE_READOUT_HEIGHT + SCORE_LABEL_HEIGHT + SCORE_BAR_HEIGHT;

// Keyword grid.
pub const KEYWORD_COLUMNS: usize = 5;
pub const KEYWORD_CAP: usize = 10;
pub const KEYWORD_ROW_PITCH: f32 = 10.0;
pub const PILL_HEIGHT: f32 = 8.0;
pub const PILL_GUTTER: f32 = 2.0;
pub const PILL_PADDING: f32 = 3.0;
pub const PILL_BASELINE: f32 = 5.7;

// Suggestions.
pub const SUGGESTION_ROW_PITCH: f32 = 9.0;
pub const SUGGESTION_ROW_HEIGHT: f32 = 8.0;
pub const SUGGESTION_TEXT_INSET: f32 = 3.0;
pub const SUGGESTION_BASELINE: f32 = 5.7;

// Footer.
pub const FOOTER_HEIGHT: f32 = 10.0;
pub const FOOTER_BOTTOM_OFFSET: f32 = 5.0;
pub const FOOTER_BASELINE: f32 = 6.0;

/// Text style used by a laid-out line. Colors are semantic; the renderer
/// resolves them against its palette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub face: Face,
    pub size_pt: f32,
    pub color: ColorRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    /// Brand blue: section titles, pill text.
    Accent,
    /// Secondary gray: metadata, body text.
    Muted,
    /// White on the header band.
    OnAccent,
    /// The color of the result's score tier.
    Tier,
}

pub const TITLE_STYLE: TextStyle = TextStyle {
    face: Face::HelveticaBold,
    size_pt: 22.0,
    color: ColorRole::OnAccent,
};
pub const BADGE_STYLE: TextStyle = TextStyle {
    face: Face::HelveticaBold,
    size_pt: 12.0,
    color: ColorRole::Accent,
};
pub const HEADING_STYLE: TextStyle = TextStyle {
    face: Face::HelveticaBold,
    size_pt: 13.0,
    color: ColorRole::Accent,
};
pub const BODY_STYLE: TextStyle = TextStyle {
    face: Face::Helvetica,
    size_pt: 11.0,
    color: ColorRole::Muted,
};
pub const SCORE_STYLE: TextStyle = TextStyle {
    face: Face::HelveticaBold,
    size_pt: 17.0,
    color: ColorRole::Tier,
};
pub const LABEL_STYLE: TextStyle = TextStyle {
    face: Face::Helvetica,
    size_pt: 12.0,
    color: ColorRole::Muted,
};
pub const PILL_STYLE: TextStyle = TextStyle {
    face: Face::HelveticaBold,
    size_pt: 11.0,
    color: ColorRole::Accent,
};
pub const SUGGESTION_STYLE: TextStyle = TextStyle {
    face: Face::HelveticaBold,
    size_pt: 11.0,
    color: ColorRole::Muted,
};
pub const NOTE_STYLE: TextStyle = TextStyle {
    face: Face::Helvetica,
    size_pt: 10.0,
    color: ColorRole::Muted,
};
