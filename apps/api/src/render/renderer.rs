//! Turns a computed `PageLayout` into a flat list of drawing primitives.
//!
//! The renderer owns color policy: the layout only names semantic roles
//! (`ColorRole`), and this module resolves them against the palette and the
//! result's score tier. It does no positioning of its own.

use crate::layout::engine::{Bounds, SectionContent, TextLine};
use crate::layout::font_metrics::Face;
use crate::layout::page::{ColorRole, PILL_HEIGHT, SCORE_BAR_HEIGHT};
use crate::layout::PageLayout;
use crate::models::AnalysisResult;
use crate::report::tier::{Rgb, ScoreTier};

const CARD_RADIUS: f32 = 6.0;
const CARD_STROKE: f32 = 0.5;
const DIVIDER_STROKE: f32 = 0.3;
const BAR_RADIUS: f32 = SCORE_BAR_HEIGHT / 2.0;
const PILL_RADIUS: f32 = PILL_HEIGHT / 2.0;
const ROW_RADIUS: f32 = 2.0;
/// Share of the tier color in a suggestion-row highlight; the rest is white.
const ROW_TINT: f32 = 0.35;

/// Fixed report colors. Tier colors come from `ScoreTier::color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub primary: Rgb,
    pub light: Rgb,
    pub muted: Rgb,
    pub divider: Rgb,
    pub white: Rgb,
}

pub const PALETTE: Palette = Palette {
    primary: Rgb(0x25, 0x63, 0xeb),
    light: Rgb(0xe0, 0xe7, 0xff),
    muted: Rgb(0x64, 0x74, 0x8b),
    divider: Rgb(0xe5, 0xe7, 0xeb),
    white: Rgb(0xff, 0xff, 0xff),
};

impl Palette {
    pub fn resolve(&self, role: ColorRole, tier: ScoreTier) -> Rgb {
        match role {
            ColorRole::Accent => self.primary,
            ColorRole::Muted => self.muted,
            ColorRole::OnAccent => self.white,
            ColorRole::Tier => tier.color(),
        }
    }
}

/// Mixes `color` with white; `weight` is the share of `color`.
pub fn tint(color: Rgb, weight: f32) -> Rgb {
    let mix = |c: u8| (c as f32 * weight + 255.0 * (1.0 - weight)).round() as u8;
    Rgb(mix(color.0), mix(color.1), mix(color.2))
}

/// How a shape is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Fill(Rgb),
    Stroke { color: Rgb, width: f32 },
}

/// One drawing primitive. Coordinates are millimetres, top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        bounds: Bounds,
        fill: Rgb,
    },
    RoundedRect {
        bounds: Bounds,
        radius: f32,
        paint: Paint,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Rgb,
    },
    Text {
        x: f32,
        baseline: f32,
        text: String,
        face: Face,
        size_pt: f32,
        color: Rgb,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        width: f32,
    },
}

/// A single rendered page, ready for encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualDocument {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

struct Painter {
    palette: Palette,
    tier: ScoreTier,
    ops: Vec<DrawOp>,
}

impl Painter {
    fn text(&mut self, line: &TextLine) {
        self.ops.push(DrawOp::Text {
            x: line.x,
            baseline: line.baseline,
            text: line.text.clone(),
            face: line.style.face,
            size_pt: line.style.size_pt,
            color: self.palette.resolve(line.style.color, self.tier),
        });
    }

    fn maybe_text(&mut self, line: Option<&TextLine>) {
        if let Some(line) = line {
            self.text(line);
        }
    }

    /// Rounded fill; zero-width shapes are skipped and the radius never exceeds
    /// half the shorter side.
    fn rounded_fill(&mut self, bounds: Bounds, radius: f32, fill: Rgb) {
        if bounds.w <= 0.0 || bounds.h <= 0.0 {
            return;
        }
        self.ops.push(DrawOp::RoundedRect {
            bounds,
            radius: radius.min(bounds.w / 2.0).min(bounds.h / 2.0),
            paint: Paint::Fill(fill),
        });
    }

    fn divider(&mut self, y: f32, x1: f32, x2: f32) {
        self.ops.push(DrawOp::Line {
            x1,
            y1: y,
            x2,
            y2: y,
            color: self.palette.divider,
            width: DIVIDER_STROKE,
        });
    }
}

/// Renders a layout into drawing primitives.
///
/// `result` only supplies the score tier; all positions come from `layout`.
pub fn render(layout: &PageLayout, result: &AnalysisResult) -> VisualDocument {
    let mut painter = Painter {
        palette: PALETTE,
        tier: ScoreTier::from_score(result.score),
        ops: Vec::new(),
    };
    let palette = painter.palette;

    // Card border goes down first so section fills paint over it.
    painter.ops.push(DrawOp::RoundedRect {
        bounds: layout.card,
        radius: CARD_RADIUS,
        paint: Paint::Stroke {
            color: palette.divider,
            width: CARD_STROKE,
        },
    });

    for section in &layout.sections {
        if let Some(y) = section.divider_y {
            painter.divider(y, layout.page.content_x, layout.page.content_right());
        }

        match &section.content {
            SectionContent::Header {
                title,
                badge,
                badge_center_x,
                badge_center_y,
                badge_radius,
            } => {
                painter.ops.push(DrawOp::Rect {
                    bounds: section.bounds,
                    fill: palette.primary,
                });
                painter.text(title);
                painter.ops.push(DrawOp::Circle {
                    cx: *badge_center_x,
                    cy: *badge_center_y,
                    r: *badge_radius,
                    fill: palette.light,
                });
                painter.text(badge);
            }
            SectionContent::Metadata { lines } => {
                lines.iter().for_each(|line| painter.text(line));
            }
            SectionContent::Score {
                readout,
                label,
                track,
                fill,
                tier,
            } => {
                painter.text(readout);
                painter.text(label);
                painter.rounded_fill(*track, BAR_RADIUS, palette.light);
                painter.rounded_fill(*fill, BAR_RADIUS, tier.color());
            }
            SectionContent::Keywords {
                title,
                pills,
                placeholder,
                more_note,
                ..
            } => {
                painter.text(title);
                painter.maybe_text(more_note.as_ref());
                for pill in pills {
                    painter.rounded_fill(pill.bounds, PILL_RADIUS, palette.light);
                    painter.text(&pill.label);
                }
                painter.maybe_text(placeholder.as_ref());
            }
            SectionContent::Summary { title, lines, .. } => {
                painter.text(title);
                lines.iter().for_each(|line| painter.text(line));
            }
            SectionContent::Suggestions {
                title,
                rows,
                placeholder,
                ..
            } => {
                painter.text(title);
                let highlight = tint(painter.tier.color(), ROW_TINT);
                for row in rows {
                    if !row.marker {
                        painter.rounded_fill(row.bounds, ROW_RADIUS, highlight);
                    }
                    painter.text(&row.text);
                }
                painter.maybe_text(placeholder.as_ref());
            }
            SectionContent::Footer { text } => painter.text(text),
        }
    }

    VisualDocument {
        width: layout.page.width,
        height: layout.page.height,
        ops: painter.ops,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportSettings;
    use crate::layout::compute_layout;
    use crate::models::ResultPayload;

    fn render_payload(payload: ResultPayload) -> VisualDocument {
        let result = AnalysisResult::from(payload);
        let layout = compute_layout(&result, &ReportSettings::default()).unwrap();
        render(&layout, &result)
    }

    fn scenario() -> ResultPayload {
        ResultPayload {
            filename: Some("cv.pdf".to_string()),
            score: 82,
            keywords: vec!["python".to_string(), "sql".to_string()],
            summary: Some("Strong fit.\nAdd more metrics.".to_string()),
            ..Default::default()
        }
    }

    fn texts(doc: &VisualDocument) -> Vec<(&str, Rgb)> {
        doc.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, color, .. } => Some((text.as_str(), *color)),
                _ => None,
            })
            .collect()
    }

    fn rounded_fills(doc: &VisualDocument) -> Vec<(Bounds, Rgb)> {
        doc.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::RoundedRect {
                    bounds,
                    paint: Paint::Fill(fill),
                    ..
                } => Some((*bounds, *fill)),
                _ => None,
            })
            .collect()
    }

    // ── palette ─────────────────────────────────────────────────────────────

    #[test]
    fn test_palette_hex_values() {
        assert_eq!(PALETTE.primary.hex(), "#2563eb");
        assert_eq!(PALETTE.light.hex(), "#e0e7ff");
        assert_eq!(PALETTE.muted.hex(), "#64748b");
        assert_eq!(PALETTE.divider.hex(), "#e5e7eb");
    }

    #[test]
    fn test_tier_role_resolves_to_tier_color() {
        for tier in [
            ScoreTier::NeedsImprovement,
            ScoreTier::Moderate,
            ScoreTier::Excellent,
        ] {
            assert_eq!(PALETTE.resolve(ColorRole::Tier, tier), tier.color());
        }
    }

    #[test]
    fn test_tint_bounds() {
        let green = ScoreTier::Excellent.color();
        assert_eq!(tint(green, 1.0), green);
        assert_eq!(tint(green, 0.0), PALETTE.white);
    }

    // ── scenario ────────────────────────────────────────────────────────────

    #[test]
    fn test_scenario_score_in_excellent_color() {
        let doc = render_payload(scenario());
        let green = Rgb(0x22, 0xc5, 0x5e);

        let readout = texts(&doc)
            .into_iter()
            .find(|(text, _)| text.starts_with("Score:"))
            .unwrap();
        assert_eq!(readout, ("Score: 82%", green));

        let fills = rounded_fills(&doc);
        let bar = fills.iter().find(|(_, fill)| *fill == green).unwrap();
        assert!((bar.0.w - 0.82 * 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_scenario_draws_two_pills() {
        let doc = render_payload(scenario());
        let pills: Vec<Bounds> = rounded_fills(&doc)
            .into_iter()
            // The score track shares the fill and height; pills are one grid cell wide.
            .filter(|(bounds, fill)| *fill == PALETTE.light && bounds.w < 40.0)
            .map(|(bounds, _)| bounds)
            .collect();
        assert_eq!(pills.len(), 2);
        assert_eq!(pills[0].y, pills[1].y);
    }

    // ── shapes ──────────────────────────────────────────────────────────────

    #[test]
    fn test_header_band_and_badge() {
        let doc = render_payload(scenario());
        assert!(doc.ops.iter().any(|op| matches!(
            op,
            DrawOp::Rect { bounds, fill } if bounds.w == 210.0 && *fill == PALETTE.primary
        )));
        assert!(doc
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Circle { fill, .. } if *fill == PALETTE.light)));
        assert!(texts(&doc).contains(&("IE", PALETTE.primary)));
    }

    #[test]
    fn test_zero_score_skips_bar_fill() {
        let doc = render_payload(ResultPayload::default());
        let red = ScoreTier::NeedsImprovement.color();
        assert!(rounded_fills(&doc).iter().all(|(_, fill)| *fill != red));
    }

    #[test]
    fn test_dividers_between_flow_sections() {
        let doc = render_payload(scenario());
        let dividers = doc
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { color, .. } if *color == PALETTE.divider))
            .count();
        // metadata → score → keywords → summary → suggestions
        assert_eq!(dividers, 4);
    }

    #[test]
    fn test_suggestion_rows_highlighted_except_marker() {
        let doc = render_payload(ResultPayload {
            suggestions: Some((0..80).map(|i| format!("Suggestion {i}")).collect()),
            ..Default::default()
        });
        let highlight = tint(ScoreTier::NeedsImprovement.color(), ROW_TINT);
        let highlighted = rounded_fills(&doc)
            .iter()
            .filter(|(_, fill)| *fill == highlight)
            .count();
        let bullets = texts(&doc)
            .iter()
            .filter(|(text, _)| text.starts_with('•'))
            .count();
        assert_eq!(highlighted, bullets);
        assert!(texts(&doc)
            .iter()
            .any(|(text, _)| text.contains("more suggestions (truncated)")));
    }

    #[test]
    fn test_all_ops_inside_page() {
        let doc = render_payload(ResultPayload {
            keywords: (0..14).map(|i| format!("keyword{i}")).collect(),
            summary: Some("word ".repeat(2000)),
            ..scenario()
        });
        for op in &doc.ops {
            let (x, y) = match op {
                DrawOp::Rect { bounds, .. } | DrawOp::RoundedRect { bounds, .. } => {
                    (bounds.x + bounds.w, bounds.y + bounds.h)
                }
                DrawOp::Circle { cx, cy, r, .. } => (cx + r, cy + r),
                DrawOp::Text { x, baseline, .. } => (*x, *baseline),
                DrawOp::Line { x2, y2, .. } => (*x2, *y2),
            };
            assert!(x <= doc.width + 1e-3 && y <= doc.height + 1e-3, "{op:?}");
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(render_payload(scenario()), render_payload(scenario()));
    }
}
