//! Excerpt of original text around the first query-term hit.
//!
//! The raw text is split on whitespace and each piece normalized on the fly,
//! which is the same split that produced `Document::normalized_tokens`, so
//! position `i` means the same token in both forms. The window starts
//! `SNIPPET_BEFORE` tokens ahead of the hit (clamped at zero) and spans at most
//! `SNIPPET_WINDOW` original tokens joined by single spaces.

use std::collections::HashSet;

use docsearch_core::normalize::normalize_token;
use docsearch_core::types::Document;

pub const SNIPPET_BEFORE: usize = 25;
pub const SNIPPET_WINDOW: usize = 50;

/// Index of the first original token whose normalized form is a query term.
pub fn first_match(raw_text: &str, query_terms: &HashSet<String>) -> Option<usize> {
    raw_text
        .split_whitespace()
        .position(|tok| {
            let norm = normalize_token(tok);
            !norm.is_empty() && query_terms.contains(&norm)
        })
}

/// Snippet for `doc`, or an empty string when no token matches.
pub fn extract(doc: &Document, query_terms: &HashSet<String>) -> String {
    let hit = doc.normalized_tokens.iter().position(|t| !t.is_empty() && query_terms.contains(t));
    hit.map_or_else(String::new, |hit| window(&doc.raw_text, hit))
}

/// Same as [`extract`] for text that was never loaded as a document.
pub fn extract_from_text(raw_text: &str, query_terms: &HashSet<String>) -> String {
    first_match(raw_text, query_terms).map_or_else(String::new, |hit| window(raw_text, hit))
}

fn window(raw_text: &str, hit: usize) -> String {
    let start = hit.saturating_sub(SNIPPET_BEFORE);
    raw_text
        .split_whitespace()
        .skip(start)
        .take(SNIPPET_WINDOW)
        .collect::<Vec<_>>()
        .join(" ")
}
