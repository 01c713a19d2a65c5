//! docsearch-text
//!
//! In-memory BM25 over normalized tokens, plus the snippet extractor that maps
//! a normalized hit back onto the original text.

pub mod inverted_index;
pub mod scorer;
pub mod snippet;

pub use inverted_index::{InvertedIndex, Posting};
pub use scorer::{LexicalIndex, BM25_B, BM25_K1};
