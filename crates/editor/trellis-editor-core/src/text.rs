//! Shared label cleanup.
//!
//! Every consumer of user-facing text (slot labels, node titles, selector
//! options) goes through [`clean_label`] so collaborating features render
//! byte-identical strings for the same input.

/// Labels longer than this are truncated and suffixed with `…`.
pub const LABEL_MAX_LEN: usize = 40;

/// Trim the ends, collapse interior whitespace runs to a single space, and
/// cap the result at [`LABEL_MAX_LEN`] characters plus an ellipsis.
///
/// Whitespace-only input cleans to the empty string, which callers treat as
/// "no label".
pub fn clean_label(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for part in text.split_whitespace() {
        if !cleaned.is_empty() {
            cleaned.push(' ');
        }
        cleaned.push_str(part);
    }
    if cleaned.chars().count() > LABEL_MAX_LEN {
        let mut capped: String = cleaned.chars().take(LABEL_MAX_LEN).collect();
        capped.push('…');
        return capped;
    }
    cleaned
}
