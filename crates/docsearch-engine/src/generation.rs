//! One immutable build of the corpus and both of its indexes.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use docsearch_core::types::{Corpus, CorpusStats};
use docsearch_core::Embedder;
use docsearch_text::LexicalIndex;
use docsearch_vector::DenseIndex;

/// Dense side of a generation. The embedder that built the vectors is kept
/// with them so queries are always embedded by the same model.
pub enum DenseSlot {
    Unavailable(String),
    Ready { index: DenseIndex, embedder: Arc<dyn Embedder> },
}

impl DenseSlot {
    pub fn is_ready(&self) -> bool { matches!(self, DenseSlot::Ready { .. }) }
}

impl std::fmt::Debug for DenseSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DenseSlot::Unavailable(reason) => f.debug_tuple("Unavailable").field(reason).finish(),
            DenseSlot::Ready { index, .. } => f.debug_struct("Ready").field("len", &index.len()).field("dim", &index.dim()).finish(),
        }
    }
}

/// Position `i` in `corpus`, `lexical` and `dense` always refers to the same
/// document: all three are built here from the one `Corpus` value.
#[derive(Debug)]
pub struct Generation {
    number: u64,
    source: PathBuf,
    corpus: Corpus,
    lexical: LexicalIndex,
    dense: DenseSlot,
}

impl Generation {
    /// Build both indexes over `corpus`. A dense build failure leaves the dense
    /// side unavailable; the lexical side is always built.
    pub fn build(number: u64, source: &Path, corpus: Corpus, embedder: Option<Arc<dyn Embedder>>, batch_size: usize) -> Self {
        let start = Instant::now();
        let lexical = LexicalIndex::build(&corpus);
        let dense = match embedder {
            None => DenseSlot::Unavailable("dense retrieval is not enabled".to_string()),
            Some(embedder) => match DenseIndex::build(&corpus, embedder.as_ref(), batch_size) {
                Ok(index) => DenseSlot::Ready { index, embedder },
                Err(e) => {
                    warn!(error = %e, generation = number, "dense index build failed; dense search disabled for this generation");
                    DenseSlot::Unavailable(e.to_string())
                }
            },
        };
        info!(
            generation = number,
            documents = corpus.len(),
            dense = dense.is_ready(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "generation built"
        );
        Self { number, source: source.to_path_buf(), corpus, lexical, dense }
    }

    pub fn number(&self) -> u64 { self.number }

    pub fn source(&self) -> &Path { &self.source }

    pub fn corpus(&self) -> &Corpus { &self.corpus }

    pub fn lexical(&self) -> &LexicalIndex { &self.lexical }

    pub fn dense(&self) -> &DenseSlot { &self.dense }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            generation: self.number,
            documents: self.corpus.len(),
            vocabulary: self.lexical.vocabulary_size(),
            avg_doc_len: self.lexical.average_doc_length(),
            dense_dim: match &self.dense { DenseSlot::Ready { index, .. } => Some(index.dim()), DenseSlot::Unavailable(_) => None },
        }
    }
}
