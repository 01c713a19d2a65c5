//! BM25 scoring over an [`InvertedIndex`].
//!
//! `IDF(t) = ln(1 + (N - df + 0.5) / (df + 0.5))`, always positive, and each
//! distinct query term contributes
//! `IDF(t) * tf * (k1 + 1) / (tf + k1 * (1 - b + b * |d| / avgdl))`.

use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info};

use docsearch_core::types::Corpus;

use crate::inverted_index::InvertedIndex;

pub const BM25_K1: f32 = 1.5;
pub const BM25_B: f32 = 0.75;

/// Lexical index for one corpus generation. Immutable once built, so any
/// number of threads may score against it.
#[derive(Debug)]
pub struct LexicalIndex {
    index: InvertedIndex,
}

impl LexicalIndex {
    pub fn build(corpus: &Corpus) -> Self {
        let start = Instant::now();
        let index = InvertedIndex::build(corpus);
        info!(
            documents = index.doc_count(),
            vocabulary = index.vocabulary_size(),
            avg_doc_len = index.average_doc_length(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "lexical index built"
        );
        Self { index }
    }

    pub fn inverted_index(&self) -> &InvertedIndex { &self.index }

    pub fn doc_count(&self) -> usize { self.index.doc_count() }

    pub fn vocabulary_size(&self) -> usize { self.index.vocabulary_size() }

    pub fn average_doc_length(&self) -> f32 { self.index.average_doc_length() }

    pub fn idf(&self, term: &str) -> f32 {
        let n = self.index.doc_count() as f32;
        let df = self.index.document_frequency(term) as f32;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    /// Score every document. `result[i]` is the score of corpus document `i`;
    /// documents sharing no term with the query score zero.
    pub fn score(&self, query_terms: &[String]) -> Vec<f32> {
        let mut scores = vec![0.0f32; self.index.doc_count()];
        let avgdl = self.index.average_doc_length();
        if avgdl <= 0.0 {
            return scores;
        }
        let mut seen = HashSet::new();
        for term in query_terms.iter().filter(|t| !t.is_empty()) {
            if !seen.insert(term.as_str()) { continue; }
            let Some(postings) = self.index.postings(term) else { continue };
            let idf = self.idf(term);
            for posting in postings {
                let dl = self.index.doc_length(posting.doc_index as usize) as f32;
                let tf = posting.term_frequency as f32;
                let tf_norm = (tf * (BM25_K1 + 1.0)) / (tf + BM25_K1 * (1.0 - BM25_B + BM25_B * dl / avgdl));
                scores[posting.doc_index as usize] += idf * tf_norm;
            }
        }
        debug!(terms = seen.len(), "lexical scores computed");
        scores
    }
}
