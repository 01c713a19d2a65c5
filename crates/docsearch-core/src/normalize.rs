//! Canonical token form shared by indexing, querying and snippet matching.
//!
//! Tokens are produced by splitting on whitespace only. Each token is then
//! lowercased, decomposed (NFD) with combining marks dropped, and reduced to
//! its ASCII letters. A token made only of digits or punctuation therefore
//! normalizes to the empty string; callers keep those empties so positions stay
//! aligned with the raw whitespace split.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize a single raw token. The result holds only `a-z` and may be empty.
pub fn normalize_token(token: &str) -> String {
    token
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Split on runs of whitespace. No punctuation handling.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Tokenize then normalize, keeping empty results in place.
pub fn normalize_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(normalize_token).collect()
}

/// Normalized query terms: empties removed, duplicates removed, first-seen order kept.
pub fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for t in text_terms(query) {
        if !terms.contains(&t) {
            terms.push(t);
        }
    }
    terms
}

fn text_terms(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(normalize_token).filter(|t| !t.is_empty())
}

/// Accent- and case-fold a whole string without dropping punctuation or digits.
///
/// This is the form handed to embedding collaborators: it keeps enough surface
/// text for a model to work with while matching the lexical side on accents.
pub fn fold_text(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
