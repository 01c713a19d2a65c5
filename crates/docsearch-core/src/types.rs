//! Domain types shared by the lexical and dense engines.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::normalize::normalize_tokens;

pub type DocId = String;

/// One retrievable unit of the corpus.
///
/// - `id`: stable identity within a corpus generation (JSONL `id` or file stem)
/// - `title`: possibly empty
/// - `raw_text`: `title + " " + text`, trimmed
/// - `normalized_tokens`: one entry per whitespace token of `raw_text`,
///   empty strings included
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub raw_text: String,
    pub normalized_tokens: Vec<String>,
}

impl Document {
    pub fn new(id: impl Into<DocId>, title: impl Into<String>, text: &str) -> Self {
        let title = title.into();
        let raw_text = format!("{title} {text}").trim().to_string();
        let normalized_tokens = normalize_tokens(&raw_text);
        Self { id: id.into(), title, raw_text, normalized_tokens }
    }

    /// Number of tokens that carry at least one letter.
    pub fn term_count(&self) -> usize {
        self.normalized_tokens.iter().filter(|t| !t.is_empty()).count()
    }
}

/// Ordered, immutable collection of documents. Position is the document index
/// used by every index built on top of it.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self { Self { documents } }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    pub fn get(&self, index: usize) -> Option<&Document> { self.documents.get(index) }

    pub fn documents(&self) -> &[Document] { &self.documents }

    pub fn iter(&self) -> impl Iterator<Item = &Document> { self.documents.iter() }
}

/// Which index answers a query.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Lexical,
    Dense,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Lexical => f.write_str("lexical"),
            Strategy::Dense => f.write_str("dense"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lexical" | "bm25" | "exact" => Ok(Strategy::Lexical),
            "dense" | "semantic" | "transformer" => Ok(Strategy::Dense),
            other => Err(format!("unknown strategy '{other}' (expected lexical or dense)")),
        }
    }
}

/// Pointer to the original file backing a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    /// File name relative to the artifacts directory, e.g. `a.pdf`.
    pub file_name: String,
    pub path: PathBuf,
}

/// A ranked hit. Every field is always present; `snippet` is empty when no
/// query term was located and `artifact` is `None` when no file was found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
    pub id: DocId,
    pub title: String,
    pub score: f32,
    pub snippet: String,
    pub artifact: Option<ArtifactRef>,
}

/// Summary of the generation currently serving queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusStats {
    pub generation: u64,
    pub documents: usize,
    pub vocabulary: usize,
    pub avg_doc_len: f32,
    pub dense_dim: Option<usize>,
}
