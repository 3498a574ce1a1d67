//! Greedy word wrap against measured glyph widths.
//!
//! Words are never split: a single word wider than the line sits alone on its
//! own (overflowing) line. Explicit line breaks in the input start a new line.

use crate::layout::font_metrics::FontMetricTable;

/// Wraps `text` to `max_width_pt` at `size_pt`, returning the lines in order.
///
/// Leading and trailing whitespace is dropped, runs of spaces collapse to one,
/// and blank input yields no lines. Blank lines between paragraphs are kept.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let max_width_em = if size_pt > 0.0 {
        max_width_pt / size_pt
    } else {
        f32::INFINITY
    };

    let mut lines = Vec::new();
    for paragraph in trimmed.lines() {
        wrap_paragraph(paragraph, metrics, max_width_em, &mut lines);
    }
    lines
}

fn wrap_paragraph(
    paragraph: &str,
    metrics: &FontMetricTable,
    max_width_em: f32,
    lines: &mut Vec<String>,
) {
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in paragraph.split_whitespace() {
        let word_w = metrics.measure_str(word);

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + metrics.space_width + word_w > max_width_em {
            // Line is full; this word starts the next one.
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += metrics.space_width + word_w;
        }
    }

    // An empty paragraph still occupies a line.
    lines.push(current);
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
