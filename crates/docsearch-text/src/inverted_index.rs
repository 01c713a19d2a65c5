//! Inverted index over normalized document tokens.
//!
//! Maps terms to postings lists (document index + term frequency). Document
//! indexes are corpus positions. Empty tokens are not terms and do not count
//! toward document length.

use std::collections::HashMap;

use docsearch_core::types::Corpus;

/// A single entry in a term's postings list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_index: u32,
    pub term_frequency: u32,
}

#[derive(Debug, Default)]
pub struct InvertedIndex {
    /// term → postings, ascending by `doc_index`
    postings: HashMap<String, Vec<Posting>>,
    /// doc_index → number of non-empty tokens
    doc_lengths: Vec<u32>,
    total_doc_length: u64,
}

impl InvertedIndex {
    pub fn build(corpus: &Corpus) -> Self {
        let mut index = Self { doc_lengths: Vec::with_capacity(corpus.len()), ..Self::default() };
        for (doc_index, doc) in corpus.iter().enumerate() {
            index.add_tokens(doc_index as u32, &doc.normalized_tokens);
        }
        index
    }

    fn add_tokens(&mut self, doc_index: u32, tokens: &[String]) {
        let mut tf_map: HashMap<&str, u32> = HashMap::new();
        for token in tokens.iter().filter(|t| !t.is_empty()) {
            *tf_map.entry(token.as_str()).or_insert(0) += 1;
        }
        let doc_len: u32 = tf_map.values().sum();
        self.doc_lengths.push(doc_len);
        self.total_doc_length += u64::from(doc_len);

        for (term, tf) in tf_map {
            self.postings.entry(term.to_string()).or_default().push(Posting { doc_index, term_frequency: tf });
        }
    }

    pub fn postings(&self, term: &str) -> Option<&[Posting]> { self.postings.get(term).map(Vec::as_slice) }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize { self.postings.get(term).map_or(0, Vec::len) }

    pub fn doc_length(&self, doc_index: usize) -> u32 { self.doc_lengths.get(doc_index).copied().unwrap_or(0) }

    pub fn doc_count(&self) -> usize { self.doc_lengths.len() }

    pub fn vocabulary_size(&self) -> usize { self.postings.len() }

    pub fn average_doc_length(&self) -> f32 {
        if self.doc_lengths.is_empty() {
            return 0.0;
        }
        self.total_doc_length as f32 / self.doc_lengths.len() as f32
    }
}
