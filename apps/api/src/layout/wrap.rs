//! Greedy word wrap against the static font metrics.
//!
//! # Rules
//! - Line breaks (`\n` or `\r`) in the input are paragraph breaks; blank paragraphs
//!   are dropped.
//! - Whitespace runs collapse to a single space.
//! - Words are never split across lines. A word wider than the line sits alone on
//!   its own line, cut to the width with a trailing `...`.
//!
//! Re-wrapping already-wrapped output (lines joined with `\n`) returns the same lines.

use std::borrow::Cow;

use crate::layout::font_metrics::FontMetricTable;
use crate::models::result::LINE_BREAKS;

/// Wraps `text` into the minimum number of greedy lines no wider than `max_width_mm`.
///
/// An empty or whitespace-only string returns no lines.
pub fn wrap_lines(
    text: &str,
    metrics: &FontMetricTable,
    max_width_mm: f32,
    size_pt: f32,
) -> Vec<String> {
    text.split(LINE_BREAKS)
        .flat_map(|paragraph| wrap_paragraph(paragraph, metrics, max_width_mm, size_pt))
        .collect()
}

fn wrap_paragraph(
    paragraph: &str,
    metrics: &FontMetricTable,
    max_width_mm: f32,
    size_pt: f32,
) -> Vec<String> {
    let space_w = metrics.space_mm(size_pt);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in paragraph.split_whitespace() {
        let mut word = Cow::Borrowed(word);
        let mut word_w = metrics.measure_mm(&word, size_pt);
        if word_w > max_width_mm {
            word = Cow::Owned(metrics.fit_to_width(&word, max_width_mm, size_pt));
            word_w = metrics.measure_mm(&word, size_pt);
        }

        if current.is_empty() {
            current.push_str(&word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width_mm {
            // Current line is full: push it and start a new one with this word.
            lines.push(std::mem::take(&mut current));
            current.push_str(&word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(&word);
            current_width += space_w + word_w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
