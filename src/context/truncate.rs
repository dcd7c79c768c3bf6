//! Deterministic text truncation with line-boundary preference.

use crate::constants::TRUNCATION_MARKER;

/// Outcome of a truncation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncationResult {
    pub text: String,
    pub truncated: bool,
}

/// Shorten `text` to at most `max_chars` characters.
///
/// Text within budget passes through unchanged. Oversized text is cut
/// at `max_chars`, then moved back to the last line break inside the
/// slice when that break sits at or past 80% of the budget; a cut at
/// an earlier break would discard too much. The fixed marker is
/// appended to any cut text, so the output of a cut may exceed
/// `max_chars` by the marker's length.
///
/// Counts Unicode scalar values, so multi-byte input never splits a
/// character. Not idempotent: re-truncating cut output can slice into
/// the marker itself.
pub fn truncate(text: &str, max_chars: usize) -> TruncationResult {
    let cut_byte = match text.char_indices().nth(max_chars) {
        Some((idx, _)) => idx,
        None => {
            return TruncationResult {
                text: text.to_string(),
                truncated: false,
            };
        }
    };

    let head = &text[..cut_byte];
    let keep = match head.rfind('\n') {
        Some(nl) if head[..nl].chars().count() >= line_cut_floor(max_chars) => &head[..nl],
        _ => head,
    };

    TruncationResult {
        text: format!("{keep}{TRUNCATION_MARKER}"),
        truncated: true,
    }
}

/// Minimum character position a line break must reach for the cut to
/// land on it (80% of the budget).
fn line_cut_floor(max_chars: usize) -> usize {
    max_chars * 4 / 5
}
