//! Page text cleanup

use tracing::warn;

/// Normalize raw page text: trim every line and drop blank ones.
///
/// A non-empty result always ends with `\n` so that concatenated pages stay
/// on separate lines.
pub fn clean_page_text(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        cleaned.push_str(line);
        cleaned.push('\n');
    }

    cleaned
}

/// Split pdf-extract output into exactly `page_count` pages on form feeds.
///
/// Missing pages are padded with empty text. Surplus chunks are appended to
/// the last page so no extracted text is lost.
pub fn split_form_feeds(text: &str, page_count: usize) -> Vec<String> {
    let mut pages: Vec<String> = if text.contains('\x0C') {
        text.split('\x0C').map(str::to_string).collect()
    } else {
        vec![text.to_string()]
    };

    // Trailing form feed leaves an empty tail
    while pages.len() > page_count.max(1) && pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }

    if page_count > 0 && pages.len() > page_count {
        let surplus = pages.split_off(page_count);
        warn!(
            pages = page_count,
            extra_chunks = surplus.len(),
            "More form feeds than pages, merging surplus text into the last page"
        );
        if let Some(last) = pages.last_mut() {
            for chunk in surplus {
                last.push('\n');
                last.push_str(&chunk);
            }
        }
    }

    while pages.len() < page_count {
        pages.push(String::new());
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clean_strips_whitespace_and_blank_lines() {
        let raw = "  Universal Credit Act 2025  \n\n\n   1 Overview\r\n\t\n";
        assert_eq!(clean_page_text(raw), "Universal Credit Act 2025\n1 Overview\n");
    }

    #[test]
    fn test_clean_empty_page_stays_empty() {
        assert_eq!(clean_page_text(""), "");
        assert_eq!(clean_page_text("   \n \n"), "");
    }

    #[test]
    fn test_split_form_feeds_pads_to_page_count() {
        let pages = split_form_feeds("first\x0Csecond", 4);
        assert_eq!(pages, vec!["first", "second", "", ""]);
    }

    #[test]
    fn test_split_form_feeds_drops_trailing_empty_page() {
        let pages = split_form_feeds("first\x0Csecond\x0C", 2);
        assert_eq!(pages, vec!["first", "second"]);
    }

    #[test]
    fn test_split_form_feeds_keeps_surplus_text() {
        let pages = split_form_feeds("a\x0Cb\x0Cc", 2);
        assert_eq!(pages, vec!["a", "b\nc"]);
    }

    #[test]
    fn test_split_without_form_feed_is_single_page() {
        let pages = split_form_feeds("whole document", 1);
        assert_eq!(pages, vec!["whole document"]);
    }

    proptest! {
        #[test]
        fn cleaned_lines_are_trimmed_and_non_empty(raw in "[ a-zA-Z0-9\t\n]{0,200}") {
            let cleaned = clean_page_text(&raw);
            for line in cleaned.lines() {
                prop_assert!(!line.is_empty());
                prop_assert_eq!(line, line.trim());
            }
            prop_assert!(cleaned.is_empty() || cleaned.ends_with('\n'));
        }

        #[test]
        fn split_preserves_every_chunk(
            chunks in prop::collection::vec("[a-z]{1,8}", 1..8),
            page_count in 1usize..6,
        ) {
            let pages = split_form_feeds(&chunks.join("\x0C"), page_count);
            prop_assert_eq!(pages.len(), page_count.max(1));
            let joined = pages.join("\n");
            for chunk in &chunks {
                prop_assert!(joined.contains(chunk.as_str()));
            }
        }

        #[test]
        fn cleaning_is_idempotent(raw in "[ a-z\n]{0,120}") {
            let once = clean_page_text(&raw);
            prop_assert_eq!(clean_page_text(&once), once);
        }
    }
}
