//! Extraction window applied before text goes to the model

/// Characters of document text sent with each request
pub const EXTRACTION_WINDOW: usize = 20_000;

/// First `max_chars` characters of `text`; the remainder is discarded.
pub fn truncate_to_window(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
