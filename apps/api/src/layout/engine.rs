//! Document layout engine. Places the seven report sections on one page.
//!
//! # Flow
//! Header and footer are anchored. Everything between them is an ordered list of
//! `FlowBlock`s folded over a running Y cursor: each block yields its content and
//! height, the next block starts `SECTION_GAP` lower, and a divider sits at the
//! midpoint of every gap.
//!
//! Optional content (the contact line) is an `Option` entry in the block's own
//! list, so its presence moves every later block without any offset bookkeeping.
//!
//! # Overflow
//! Before a block is placed, the minimum height of every later block is reserved.
//! Summary and suggestions are cut to whole slots when they do not fit; see
//! `layout::overflow`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ReportSettings;
use crate::errors::ReportError;
use crate::layout::font_metrics::get_metrics;
use crate::layout::overflow::{enforce_policy, fit_slots, OverflowNotice, SlotFit};
use crate::layout::page::{
    PageGeometry, TextStyle, BADGE_CENTER_X, BADGE_CENTER_Y, BADGE_RADIUS, BADGE_STYLE,
    BADGE_TEXT, BODY_STYLE, CARD_INSET, FOOTER_BASELINE, FOOTER_HEIGHT, HEADER_HEIGHT,
    HEADER_TITLE_BASELINE, HEADER_TITLE_X, HEADING_STYLE, KEYWORD_CAP, KEYWORD_COLUMNS,
    KEYWORD_ROW_PITCH, LABEL_STYLE, LINE_BASELINE, LINE_HEIGHT, NOTE_STYLE, PILL_BASELINE,
    PILL_GUTTER, PILL_HEIGHT, PILL_PADDING, PILL_STYLE, SCORE_BAR_HEIGHT, SCORE_BLOCK_HEIGHT,
    SCORE_LABEL_HEIGHT, SCORE_READOUT_HEIGHT, SCORE_STYLE, SECTION_GAP, SUGGESTION_BASELINE,
    SUGGESTION_ROW_HEIGHT, SUGGESTION_ROW_PITCH, SUGGESTION_STYLE, SUGGESTION_TEXT_INSET,
    TITLE_BASELINE, TITLE_HEIGHT, TITLE_STYLE,
};
use crate::layout::wrap::wrap_lines;
use crate::models::AnalysisResult;
use crate::report::text::{format_timestamp, PLACEHOLDER};
use crate::report::tier::{clamp_score, ScoreTier};

const KEYWORDS_HEADING: &str = "Top Keywords";
const SUMMARY_HEADING: &str = "Summary / Insights";
const SUGGESTIONS_HEADING: &str = "Actionable Points";
const NO_KEYWORDS: &str = "None detected";
const NO_SUMMARY: &str = "No summary available.";
const NO_SUGGESTIONS: &str = "No suggestions available.";
const SUMMARY_TRUNCATED: &str = "… (truncated)";

// ────────────────────────────────────────────────────────────────────────────
// Geometry types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    Metadata,
    Score,
    Keywords,
    Summary,
    Suggestions,
    Footer,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Metadata => "metadata",
            SectionKind::Score => "score",
            SectionKind::Keywords => "keywords",
            SectionKind::Summary => "summary",
            SectionKind::Suggestions => "suggestions",
            SectionKind::Footer => "footer",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned box, top-left origin, millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// One positioned run of text. `baseline` is the Y of the text baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
    pub style: TextStyle,
}

impl TextLine {
    fn new(text: impl Into<String>, x: f32, baseline: f32, style: TextStyle) -> Self {
        TextLine {
            text: text.into(),
            x,
            baseline,
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pill {
    pub bounds: Bounds,
    pub label: TextLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRow {
    pub bounds: Bounds,
    pub text: TextLine,
    /// True for the row that stands in for truncated suggestions.
    pub marker: bool,
}

/// Everything the renderer needs to draw a section, already positioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionContent {
    Header {
        title: TextLine,
        badge: TextLine,
        badge_center_x: f32,
        badge_center_y: f32,
        badge_radius: f32,
    },
    Metadata {
        lines: Vec<TextLine>,
    },
    Score {
        readout: TextLine,
        label: TextLine,
        track: Bounds,
        fill: Bounds,
        tier: ScoreTier,
    },
    Keywords {
        title: TextLine,
        pills: Vec<Pill>,
        placeholder: Option<TextLine>,
        more_note: Option<TextLine>,
        hidden: usize,
    },
    Summary {
        title: TextLine,
        lines: Vec<TextLine>,
        truncated: bool,
    },
    Suggestions {
        title: TextLine,
        rows: Vec<SuggestionRow>,
        placeholder: Option<TextLine>,
        hidden: usize,
    },
    Footer {
        text: TextLine,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    pub kind: SectionKind,
    pub bounds: Bounds,
    /// Y of the divider drawn in the gap above this section, if any.
    pub divider_y: Option<f32>,
    pub content: SectionContent,
}

/// The computed page: sections in drawing order plus what did not fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub page: PageGeometry,
    /// Border box drawn around the flow sections.
    pub card: Bounds,
    pub sections: Vec<SectionGeometry>,
    /// Keywords beyond the grid cap.
    pub keyword_overflow: usize,
    pub overflow: Vec<OverflowNotice>,
}

#[cfg(test)]
impl PageLayout {
    pub fn section(&self, kind: SectionKind) -> Option<&SectionGeometry> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public helpers
// ────────────────────────────────────────────────────────────────────────────

/// Filled width of the score bar: `clamp(score, 0, 100) / 100 × content_width`.
pub fn bar_fill_width(score: i64, content_width: f32) -> f32 {
    clamp_score(score) as f32 / 100.0 * content_width
}

/// Rows in the keyword grid: `ceil(min(count, 10) / 5)`, or one placeholder row.
pub fn keyword_rows(count: usize) -> usize {
    let shown = count.min(KEYWORD_CAP);
    shown.div_ceil(KEYWORD_COLUMNS).max(1)
}

// ────────────────────────────────────────────────────────────────────────────
// Flow blocks
// ────────────────────────────────────────────────────────────────────────────

enum FlowBlock<'a> {
    Metadata(Vec<String>),
    Score(i64),
    Keywords(&'a [String]),
    /// Wrapped summary lines; empty renders the placeholder.
    Summary(Vec<String>),
    Suggestions(&'a [String]),
}

struct Placed {
    content: SectionContent,
    height: f32,
    notice: Option<OverflowNotice>,
}

impl FlowBlock<'_> {
    fn kind(&self) -> SectionKind {
        match self {
            FlowBlock::Metadata(_) => SectionKind::Metadata,
            FlowBlock::Score(_) => SectionKind::Score,
            FlowBlock::Keywords(_) => SectionKind::Keywords,
            FlowBlock::Summary(_) => SectionKind::Summary,
            FlowBlock::Suggestions(_) => SectionKind::Suggestions,
        }
    }

    fn natural_height(&self) -> f32 {
        match self {
            FlowBlock::Metadata(lines) => lines.len() as f32 * LINE_HEIGHT,
            FlowBlock::Score(_) => SCORE_BLOCK_HEIGHT,
            FlowBlock::Keywords(keywords) => {
                TITLE_HEIGHT + keyword_rows(keywords.len()) as f32 * KEYWORD_ROW_PITCH
            }
            FlowBlock::Summary(lines) => TITLE_HEIGHT + lines.len().max(1) as f32 * LINE_HEIGHT,
            FlowBlock::Suggestions(items) => {
                TITLE_HEIGHT + items.len().max(1) as f32 * SUGGESTION_ROW_PITCH
            }
        }
    }

    /// Smallest height the block can be cut down to.
    fn min_height(&self) -> f32 {
        match self {
            FlowBlock::Summary(_) => TITLE_HEIGHT + LINE_HEIGHT,
            FlowBlock::Suggestions(_) => TITLE_HEIGHT + SUGGESTION_ROW_PITCH,
            _ => self.natural_height(),
        }
    }

    fn place(&self, top: f32, budget: f32, page: &PageGeometry) -> Placed {
        match self {
            FlowBlock::Metadata(lines) => place_metadata(lines, top, page),
            FlowBlock::Score(score) => place_score(*score, top, page),
            FlowBlock::Keywords(keywords) => place_keywords(keywords, top, page),
            FlowBlock::Summary(lines) => {
                place_summary(lines, top, budget, self.natural_height(), page)
            }
            FlowBlock::Suggestions(items) => {
                place_suggestions(items, top, budget, self.natural_height(), page)
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Computes the page layout for a result. Pure and deterministic.
///
/// Fails only with `ReportError::LayoutOverflow`, and only under the `reject`
/// overflow policy.
pub fn compute_layout(
    result: &AnalysisResult,
    settings: &ReportSettings,
) -> Result<PageLayout, ReportError> {
    let page = PageGeometry::a4();

    let metadata: Vec<String> = [
        Some(format!(
            "Date: {}",
            format_timestamp(result.captured_at_ms, settings.utc_offset)
        )),
        Some(format!(
            "Filename: {}",
            result.filename.as_deref().unwrap_or(PLACEHOLDER)
        )),
        result.contact().map(|contact| format!("Contact: {contact}")),
    ]
    .into_iter()
    .flatten()
    .collect();

    let summary_lines = result
        .summary_text()
        .map(|summary| {
            wrap_lines(
                summary,
                get_metrics(BODY_STYLE.face),
                page.content_width,
                BODY_STYLE.size_pt,
            )
        })
        .unwrap_or_default();

    let blocks = [
        FlowBlock::Metadata(metadata),
        FlowBlock::Score(result.score),
        FlowBlock::Keywords(&result.keywords),
        FlowBlock::Summary(summary_lines),
        FlowBlock::Suggestions(&result.suggestions),
    ];
    let min_heights: Vec<f32> = blocks.iter().map(FlowBlock::min_height).collect();
    let limit = page.flow_limit();

    let mut sections = vec![place_header(&page, settings)];
    let mut overflow = Vec::new();
    let mut top = HEADER_HEIGHT + SECTION_GAP;

    for (i, block) in blocks.iter().enumerate() {
        let reserved: f32 = min_heights[i + 1..].iter().map(|h| h + SECTION_GAP).sum();
        let budget = limit - top - reserved;
        let placed = block.place(top, budget, &page);

        if let Some(notice) = placed.notice {
            let notice = enforce_policy(notice, settings.overflow_policy)?;
            warn!(
                section = %notice.section,
                hidden = notice.hidden,
                required_mm = notice.required_mm,
                available_mm = notice.available_mm,
                "Report layout: section truncated to fit the page"
            );
            overflow.push(notice);
        }

        debug!(section = %block.kind(), top, height = placed.height, "Report layout: section placed");

        sections.push(SectionGeometry {
            kind: block.kind(),
            bounds: Bounds {
                x: page.content_x,
                y: top,
                w: page.content_width,
                h: placed.height,
            },
            divider_y: (i > 0).then(|| top - SECTION_GAP / 2.0),
            content: placed.content,
        });
        top += placed.height + SECTION_GAP;
    }

    sections.push(place_footer(&page, settings));

    let card_top = HEADER_HEIGHT + CARD_INSET;
    let card = Bounds {
        x: page.margin,
        y: card_top,
        w: page.width - 2.0 * page.margin,
        h: page.footer_top() - CARD_INSET - card_top,
    };

    Ok(PageLayout {
        page,
        card,
        sections,
        keyword_overflow: result.keywords.len().saturating_sub(KEYWORD_CAP),
        overflow,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Section placement
// ────────────────────────────────────────────────────────────────────────────

fn heading(text: &str, top: f32, page: &PageGeometry) -> TextLine {
    TextLine::new(text, page.content_x, top + TITLE_BASELINE, HEADING_STYLE)
}

fn place_header(page: &PageGeometry, settings: &ReportSettings) -> SectionGeometry {
    let title_room = BADGE_CENTER_X - BADGE_RADIUS - HEADER_TITLE_X - 2.0;
    let title = get_metrics(TITLE_STYLE.face).fit_to_width(
        &settings.title,
        title_room,
        TITLE_STYLE.size_pt,
    );
    let badge_width = get_metrics(BADGE_STYLE.face).measure_mm(BADGE_TEXT, BADGE_STYLE.size_pt);

    SectionGeometry {
        kind: SectionKind::Header,
        bounds: Bounds {
            x: 0.0,
            y: 0.0,
            w: page.width,
            h: HEADER_HEIGHT,
        },
        divider_y: None,
        content: SectionContent::Header {
            title: TextLine::new(title, HEADER_TITLE_X, HEADER_TITLE_BASELINE, TITLE_STYLE),
            badge: TextLine::new(
                BADGE_TEXT,
                BADGE_CENTER_X - badge_width / 2.0,
                BADGE_CENTER_Y + 1.5,
                BADGE_STYLE,
            ),
            badge_center_x: BADGE_CENTER_X,
            badge_center_y: BADGE_CENTER_Y,
            badge_radius: BADGE_RADIUS,
        },
    }
}

fn place_metadata(lines: &[String], top: f32, page: &PageGeometry) -> Placed {
    let body = get_metrics(BODY_STYLE.face);
    let lines: Vec<TextLine> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            TextLine::new(
                body.fit_to_width(line, page.content_width, BODY_STYLE.size_pt),
                page.content_x,
                top + i as f32 * LINE_HEIGHT + LINE_BASELINE,
                BODY_STYLE,
            )
        })
        .collect();

    Placed {
        height: lines.len() as f32 * LINE_HEIGHT,
        content: SectionContent::Metadata { lines },
        notice: None,
    }
}

fn place_score(score: i64, top: f32, page: &PageGeometry) -> Placed {
    let tier = ScoreTier::from_score(score);
    let track = Bounds {
        x: page.content_x,
        y: top + SCORE_READOUT_HEIGHT + SCORE_LABEL_HEIGHT,
        w: page.content_width,
        h: SCORE_BAR_HEIGHT,
    };
    let fill = Bounds {
        w: bar_fill_width(score, page.content_width),
        ..track
    };

    Placed {
        content: SectionContent::Score {
            readout: TextLine::new(
                format!("Score: {}%", clamp_score(score)),
                page.content_x,
                top + 6.5,
                SCORE_STYLE,
            ),
            label: TextLine::new(
                tier.label(),
                page.content_x,
                top + SCORE_READOUT_HEIGHT + 5.0,
                LABEL_STYLE,
            ),
            track,
            fill,
            tier,
        },
        height: SCORE_BLOCK_HEIGHT,
        notice: None,
    }
}

fn place_keywords(keywords: &[String], top: f32, page: &PageGeometry) -> Placed {
    let shown = &keywords[..keywords.len().min(KEYWORD_CAP)];
    let hidden = keywords.len() - shown.len();
    let grid_top = top + TITLE_HEIGHT;
    let cell_width = page.content_width / KEYWORD_COLUMNS as f32;
    let pill_metrics = get_metrics(PILL_STYLE.face);

    let pills: Vec<Pill> = shown
        .iter()
        .enumerate()
        .map(|(i, keyword)| {
            let row = i / KEYWORD_COLUMNS;
            let col = i % KEYWORD_COLUMNS;
            let bounds = Bounds {
                x: page.content_x + col as f32 * cell_width,
                y: grid_top + row as f32 * KEYWORD_ROW_PITCH,
                w: cell_width - PILL_GUTTER,
                h: PILL_HEIGHT,
            };
            let label = pill_metrics.fit_to_width(
                keyword,
                bounds.w - 2.0 * PILL_PADDING,
                PILL_STYLE.size_pt,
            );
            Pill {
                label: TextLine::new(
                    label,
                    bounds.x + PILL_PADDING,
                    bounds.y + PILL_BASELINE,
                    PILL_STYLE,
                ),
                bounds,
            }
        })
        .collect();

    let placeholder = keywords
        .is_empty()
        .then(|| TextLine::new(NO_KEYWORDS, page.content_x, grid_top + LINE_BASELINE, BODY_STYLE));

    let more_note = (hidden > 0).then(|| {
        let text = format!("+{hidden} more");
        let width = get_metrics(NOTE_STYLE.face).measure_mm(&text, NOTE_STYLE.size_pt);
        TextLine::new(
            text,
            page.content_right() - width,
            top + TITLE_BASELINE,
            NOTE_STYLE,
        )
    });

    Placed {
        content: SectionContent::Keywords {
            title: heading(KEYWORDS_HEADING, top, page),
            pills,
            placeholder,
            more_note,
            hidden,
        },
        height: TITLE_HEIGHT + keyword_rows(keywords.len()) as f32 * KEYWORD_ROW_PITCH,
        notice: None,
    }
}

fn place_summary(
    lines: &[String],
    top: f32,
    budget: f32,
    natural_height: f32,
    page: &PageGeometry,
) -> Placed {
    let (visible, notice) = match fit_slots(lines.len(), TITLE_HEIGHT, LINE_HEIGHT, budget) {
        SlotFit::All if lines.is_empty() => (vec![NO_SUMMARY.to_string()], None),
        SlotFit::All => (lines.to_vec(), None),
        SlotFit::Truncated { shown, hidden } => {
            let mut visible = lines[..shown].to_vec();
            visible.push(SUMMARY_TRUNCATED.to_string());
            let notice = OverflowNotice {
                section: SectionKind::Summary,
                required_mm: natural_height,
                available_mm: budget.max(0.0),
                hidden,
            };
            (visible, Some(notice))
        }
    };

    let body_top = top + TITLE_HEIGHT;
    let text_lines: Vec<TextLine> = visible
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            TextLine::new(
                text,
                page.content_x,
                body_top + i as f32 * LINE_HEIGHT + LINE_BASELINE,
                BODY_STYLE,
            )
        })
        .collect();

    Placed {
        height: TITLE_HEIGHT + text_lines.len() as f32 * LINE_HEIGHT,
        content: SectionContent::Summary {
            title: heading(SUMMARY_HEADING, top, page),
            lines: text_lines,
            truncated: notice.is_some(),
        },
        notice,
    }
}

fn place_suggestions(
    items: &[String],
    top: f32,
    budget: f32,
    natural_height: f32,
    page: &PageGeometry,
) -> Placed {
    let rows_top = top + TITLE_HEIGHT;
    let text_width = page.content_width - 2.0 * SUGGESTION_TEXT_INSET;
    let row_metrics = get_metrics(SUGGESTION_STYLE.face);

    let row_at = |slot: usize, text: String, style: TextStyle, marker: bool| {
        let bounds = Bounds {
            x: page.content_x,
            y: rows_top + slot as f32 * SUGGESTION_ROW_PITCH,
            w: page.content_width,
            h: SUGGESTION_ROW_HEIGHT,
        };
        SuggestionRow {
            text: TextLine::new(
                text,
                bounds.x + SUGGESTION_TEXT_INSET,
                bounds.y + SUGGESTION_BASELINE,
                style,
            ),
            bounds,
            marker,
        }
    };
    let bullet_row = |slot: usize, item: &String| {
        let text = row_metrics.fit_to_width(
            &format!("• {item}"),
            text_width,
            SUGGESTION_STYLE.size_pt,
        );
        row_at(slot, text, SUGGESTION_STYLE, false)
    };

    let (rows, notice): (Vec<SuggestionRow>, Option<OverflowNotice>) =
        match fit_slots(items.len(), TITLE_HEIGHT, SUGGESTION_ROW_PITCH, budget) {
            SlotFit::All => (
                items.iter().enumerate().map(|(i, s)| bullet_row(i, s)).collect(),
                None,
            ),
            SlotFit::Truncated { shown, hidden } => {
                let mut rows: Vec<SuggestionRow> = items[..shown]
                    .iter()
                    .enumerate()
                    .map(|(i, s)| bullet_row(i, s))
                    .collect();
                rows.push(row_at(
                    shown,
                    format!("… {hidden} more suggestions (truncated)"),
                    BODY_STYLE,
                    true,
                ));
                let notice = OverflowNotice {
                    section: SectionKind::Suggestions,
                    required_mm: natural_height,
                    available_mm: budget.max(0.0),
                    hidden,
                };
                (rows, Some(notice))
            }
        };

    let placeholder = items.is_empty().then(|| {
        TextLine::new(
            NO_SUGGESTIONS,
            page.content_x + SUGGESTION_TEXT_INSET,
            rows_top + SUGGESTION_BASELINE,
            BODY_STYLE,
        )
    });
    let hidden = notice.as_ref().map_or(0, |n| n.hidden);

    Placed {
        height: TITLE_HEIGHT + rows.len().max(1) as f32 * SUGGESTION_ROW_PITCH,
        content: SectionContent::Suggestions {
            title: heading(SUGGESTIONS_HEADING, top, page),
            rows,
            placeholder,
            hidden,
        },
        notice,
    }
}

fn place_footer(page: &PageGeometry, settings: &ReportSettings) -> SectionGeometry {
    let metrics = get_metrics(NOTE_STYLE.face);
    let max_width = page.width - 2.0 * page.margin;
    let text = metrics.fit_to_width(&settings.footer, max_width, NOTE_STYLE.size_pt);
    let width = metrics.measure_mm(&text, NOTE_STYLE.size_pt);
    let top = page.footer_top();

    SectionGeometry {
        kind: SectionKind::Footer,
        bounds: Bounds {
            x: page.margin,
            y: top,
            w: max_width,
            h: FOOTER_HEIGHT,
        },
        divider_y: None,
        content: SectionContent::Footer {
            text: TextLine::new(
                text,
                (page.width - width) / 2.0,
                top + FOOTER_BASELINE,
                NOTE_STYLE,
            ),
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
