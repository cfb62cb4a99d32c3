//! Strips non-informative annotations from a song title.
//!
//! Annotations removed (case-insensitive):
//! - live markers: "(Live)", "(live at the Ace of Spades, 8/29/17)"
//! - bare years: "(1972)", "(2014, Mongolia)", "(1990s)"
//! - content warnings: "(WARNING: loud)"
//! - memorials: "(RIP)", "(R.I.P.)"
//! - tilde notes: "~Bad Tango remix~"
//!
//! Each pattern is matched on its own; overlapping hits resolve to the
//! earliest start, then to pattern order.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Annotation patterns, in priority order.
pub static ANNOTATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // "live" must be a whole word: "(Lively)" stays
        Regex::new(r"(?i)\(\s*live\b[^()]*\)").unwrap(),
        Regex::new(r"\(\s*(?:19|20)\d{2}[^()]*\)").unwrap(),
        Regex::new(r"(?i)\(\s*warning\b[^()]*\)").unwrap(),
        Regex::new(r"(?i)\(\s*r\.?i\.?p\.?\s*\)").unwrap(),
        Regex::new(r"~[^~]+~").unwrap(),
    ]
});

/// Cleaned title plus the removed spans, in order. Each removed span
/// includes the whitespace taken with it, e.g. " (Live)".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stripped {
    pub text: String,
    pub removed: Vec<String>,
}

/// Remove every annotation span from `song`, along with the whitespace
/// around it. Text on both sides of a removed span is rejoined with one space.
///
/// Text with no annotations left comes back unchanged.
pub fn strip_annotations(song: &str) -> Stripped {
    let mut spans: Vec<(usize, usize)> = ANNOTATION_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.find_iter(song).map(|m| (m.start(), m.end())))
        .collect();
    // Stable sort keeps pattern order for equal starts.
    spans.sort_by_key(|&(start, _)| start);

    let mut kept: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for span in spans {
        if kept.last().map_or(true, |&(_, end)| span.0 >= end) {
            kept.push(span);
        }
    }

    if kept.is_empty() {
        return Stripped {
            text: song.to_string(),
            removed: Vec::new(),
        };
    }

    let removed: Vec<String> = with_adjacent_whitespace(song, &kept)
        .into_iter()
        .map(|(start, end)| song[start..end].to_string())
        .collect();
    for annotation in &removed {
        debug!(annotation = annotation.as_str(), "stripped annotation");
    }

    Stripped {
        text: remove_spans(song, &kept),
        removed,
    }
}

/// Widen each span over the whitespace on both sides of it. Whitespace
/// already taken by the previous span is not claimed twice.
fn with_adjacent_whitespace(text: &str, spans: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut widened: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for &(start, end) in spans {
        let floor = widened.last().map_or(0, |&(_, prev_end)| prev_end);
        let before = text[floor..start].trim_end().len();
        let after = text[end..].len() - text[end..].trim_start().len();
        widened.push((floor + before, end + after));
    }
    widened
}

/// Cut sorted, non-overlapping byte spans out of `text`.
///
/// Whitespace touching a cut is dropped; surviving pieces are joined with a
/// single space. Whitespace at the outer edges of `text` is left alone.
pub fn remove_spans(text: &str, spans: &[(usize, usize)]) -> String {
    let mut pieces: Vec<&str> = Vec::with_capacity(spans.len() + 1);
    let mut last = 0;
    for (i, &(start, end)) in spans.iter().enumerate() {
        let piece = &text[last..start];
        let piece = if i == 0 { piece.trim_end() } else { piece.trim() };
        pieces.push(piece);
        last = end;
    }
    pieces.push(if spans.is_empty() { &text[last..] } else { text[last..].trim_start() });

    let mut out = String::with_capacity(text.len());
    for piece in pieces.into_iter().filter(|p| !p.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(piece);
    }
    out
}
