//! Splits a document body into raw slide chunks.

use crate::code_fence::FencePhase;

/// Explicit slide separator: a line holding exactly `---`.
pub const SLIDE_SEPARATOR: &str = "\n---\n";

/// Split a document body into ordered raw-markdown slides.
///
/// Explicit `---` separator lines win when present. Otherwise every heading
/// line outside a code fence starts a new slide. Whitespace-only slides are
/// dropped either way.
pub fn segment_slides(body: &str) -> Vec<String> {
    let body = body.trim();
    if body.contains(SLIDE_SEPARATOR) {
        split_on_separators(body)
    } else {
        split_on_headings(body)
    }
}

fn split_on_separators(body: &str) -> Vec<String> {
    body.split(SLIDE_SEPARATOR)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_on_headings(body: &str) -> Vec<String> {
    let mut slides = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut fence = FencePhase::Outside;

    for line in body.split('\n') {
        let next_fence = fence.advance(line);
        if next_fence != fence {
            fence = next_fence;
            current.push(line);
            continue;
        }

        if !fence.is_inside() && line.starts_with('#') {
            flush(&mut slides, &mut current);
        }
        current.push(line);
    }
    flush(&mut slides, &mut current);

    slides
}

fn flush(slides: &mut Vec<String>, current: &mut Vec<&str>) {
    if current.is_empty() {
        return;
    }
    let slide = current.join("\n");
    current.clear();
    if !slide.trim().is_empty() {
        slides.push(slide);
    }
}
