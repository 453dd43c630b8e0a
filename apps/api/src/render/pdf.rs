//! PDF serialization of a `VisualDocument`.
//!
//! One page, two base-14 Type1 fonts with WinAnsiEncoding, an uncompressed
//! content stream and no document info dictionary. The same document always
//! encodes to the same bytes.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::layout::font_metrics::Face;
use crate::render::renderer::{DrawOp, Paint, VisualDocument};
use crate::report::tier::Rgb;

/// Points per millimetre.
const PT_PER_MM: f32 = 72.0 / 25.4;
/// Bézier handle length for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

const CATALOG_ID: Ref = Ref::new(1);
const PAGE_TREE_ID: Ref = Ref::new(2);
const PAGE_ID: Ref = Ref::new(3);
const CONTENT_ID: Ref = Ref::new(4);
const REGULAR_FONT_ID: Ref = Ref::new(5);
const BOLD_FONT_ID: Ref = Ref::new(6);

fn resource_name(face: Face) -> Name<'static> {
    match face {
        Face::Helvetica => Name(b"F1"),
        Face::HelveticaBold => Name(b"F2"),
    }
}

/// Maps page millimetres (top-left origin) to PDF points (bottom-left origin).
struct Frame {
    height_pt: f32,
}

impl Frame {
    fn x(&self, mm: f32) -> f32 {
        mm * PT_PER_MM
    }

    fn y(&self, mm: f32) -> f32 {
        self.height_pt - mm * PT_PER_MM
    }

    fn dist(&self, mm: f32) -> f32 {
        mm * PT_PER_MM
    }
}

/// Encodes `text` as WinAnsi (Windows-1252). Unmappable characters become `?`.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

fn set_fill(content: &mut Content, color: Rgb) {
    content.set_fill_rgb(
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
    );
}

fn set_stroke(content: &mut Content, color: Rgb) {
    content.set_stroke_rgb(
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
    );
}

/// Appends a rounded-rectangle path. `(x, y)` is the bottom-left corner in points.
fn rounded_rect_path(content: &mut Content, x: f32, y: f32, w: f32, h: f32, r: f32) {
    let k = r * KAPPA;
    let (right, top) = (x + w, y + h);
    content.move_to(x + r, y);
    content.line_to(right - r, y);
    content.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    content.line_to(right, top - r);
    content.cubic_to(right, top - r + k, right - r + k, top, right - r, top);
    content.line_to(x + r, top);
    content.cubic_to(x + r - k, top, x, top - r + k, x, top - r);
    content.line_to(x, y + r);
    content.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    content.close_path();
}

fn circle_path(content: &mut Content, cx: f32, cy: f32, r: f32) {
    let k = r * KAPPA;
    content.move_to(cx + r, cy);
    content.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
    content.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
    content.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
    content.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
    content.close_path();
}

fn draw(content: &mut Content, frame: &Frame, op: &DrawOp) {
    match op {
        DrawOp::Rect { bounds, fill } => {
            set_fill(content, *fill);
            content.rect(
                frame.x(bounds.x),
                frame.y(bounds.bottom()),
                frame.dist(bounds.w),
                frame.dist(bounds.h),
            );
            content.fill_nonzero();
        }
        DrawOp::RoundedRect {
            bounds,
            radius,
            paint,
        } => {
            rounded_rect_path(
                content,
                frame.x(bounds.x),
                frame.y(bounds.bottom()),
                frame.dist(bounds.w),
                frame.dist(bounds.h),
                frame.dist(*radius),
            );
            match paint {
                Paint::Fill(color) => {
                    set_fill(content, *color);
                    content.fill_nonzero();
                }
                Paint::Stroke { color, width } => {
                    set_stroke(content, *color);
                    content.set_line_width(frame.dist(*width));
                    content.stroke();
                }
            }
        }
        DrawOp::Circle { cx, cy, r, fill } => {
            set_fill(content, *fill);
            circle_path(content, frame.x(*cx), frame.y(*cy), frame.dist(*r));
            content.fill_nonzero();
        }
        DrawOp::Text {
            x,
            baseline,
            text,
            face,
            size_pt,
            color,
        } => {
            let bytes = encode_winansi(text);
            set_fill(content, *color);
            content
                .begin_text()
                .set_font(resource_name(*face), *size_pt)
                .next_line(frame.x(*x), frame.y(*baseline))
                .show(Str(&bytes))
                .end_text();
        }
        DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            width,
        } => {
            set_stroke(content, *color);
            content.set_line_width(frame.dist(*width));
            content.move_to(frame.x(*x1), frame.y(*y1));
            content.line_to(frame.x(*x2), frame.y(*y2));
            content.stroke();
        }
    }
}

/// Serializes the document into a single-page PDF.
pub fn encode_pdf(doc: &VisualDocument) -> Vec<u8> {
    let width_pt = doc.width * PT_PER_MM;
    let height_pt = doc.height * PT_PER_MM;
    let frame = Frame { height_pt };

    let mut content = Content::new();
    for op in &doc.ops {
        // Each op sets its own colors and line width; isolate them.
        content.save_state();
        draw(&mut content, &frame, op);
        content.restore_state();
    }
    let stream = content.finish();

    let mut pdf = Pdf::new();
    pdf.catalog(CATALOG_ID).pages(PAGE_TREE_ID);
    pdf.pages(PAGE_TREE_ID).kids([PAGE_ID]).count(1);

    {
        let mut page = pdf.page(PAGE_ID);
        page.media_box(Rect::new(0.0, 0.0, width_pt, height_pt))
            .parent(PAGE_TREE_ID)
            .contents(CONTENT_ID);
        page.resources()
            .fonts()
            .pair(resource_name(Face::Helvetica), REGULAR_FONT_ID)
            .pair(resource_name(Face::HelveticaBold), BOLD_FONT_ID);
    }

    for (id, face) in [
        (REGULAR_FONT_ID, Face::Helvetica),
        (BOLD_FONT_ID, Face::HelveticaBold),
    ] {
        pdf.type1_font(id)
            .base_font(Name(face.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    pdf.stream(CONTENT_ID, &stream);
    pdf.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
