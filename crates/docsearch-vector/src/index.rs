use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Instant;
use tracing::{debug, info};

use docsearch_core::normalize::fold_text;
use docsearch_core::types::Corpus;
use docsearch_core::{Embedder, IndexError};

use crate::distance::dot_product;

pub const DEFAULT_BATCH_SIZE: usize = 8;

/// Flat table of one vector per corpus document, in corpus order.
#[derive(Debug, Clone)]
pub struct DenseIndex {
    dim: usize,
    vectors: Vec<Vec<f32>>,
}

impl DenseIndex {
    /// Embed every document's folded text in batches of `batch_size`.
    pub fn build(corpus: &Corpus, embedder: &dyn Embedder, batch_size: usize) -> Result<Self, IndexError> {
        let start = Instant::now();
        let texts: Vec<String> = corpus.iter().map(|d| fold_text(&d.raw_text)).collect();
        let pb = progress_bar(texts.len());
        let mut vectors = Vec::with_capacity(texts.len());
        for batch in texts.chunks(batch_size.max(1)) {
            let embedded = embedder.embed_batch(batch).map_err(|e| IndexError::Embedding(format!("{e:#}")))?;
            if embedded.len() != batch.len() {
                return Err(IndexError::CountMismatch { expected: batch.len(), actual: embedded.len() });
            }
            vectors.extend(embedded);
            pb.inc(batch.len() as u64);
        }
        pb.finish_and_clear();
        let index = Self::from_vectors(vectors, embedder.dim())?;
        info!(
            documents = index.len(),
            dim = index.dim,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "dense index built"
        );
        Ok(index)
    }

    /// Wrap precomputed vectors. Every vector must have `expected_dim` entries;
    /// `expected_dim == 0` takes the dimension from the first vector.
    pub fn from_vectors(vectors: Vec<Vec<f32>>, expected_dim: usize) -> Result<Self, IndexError> {
        let dim = if expected_dim > 0 { expected_dim } else { vectors.first().map_or(0, Vec::len) };
        if dim == 0 && !vectors.is_empty() {
            return Err(IndexError::EmptyVector);
        }
        if let Some((index, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != dim) {
            return Err(IndexError::DimensionMismatch { expected: dim, actual: v.len(), index });
        }
        Ok(Self { dim, vectors })
    }

    pub fn dim(&self) -> usize { self.dim }

    pub fn len(&self) -> usize { self.vectors.len() }

    pub fn is_empty(&self) -> bool { self.vectors.is_empty() }

    pub fn vector(&self, doc_index: usize) -> Option<&[f32]> { self.vectors.get(doc_index).map(Vec::as_slice) }

    /// Embed a query the same way documents were embedded.
    pub fn embed_query(&self, embedder: &dyn Embedder, query: &str) -> Result<Vec<f32>, IndexError> {
        let mut out = embedder
            .embed_batch(&[fold_text(query)])
            .map_err(|e| IndexError::Embedding(format!("{e:#}")))?;
        if out.len() != 1 {
            return Err(IndexError::CountMismatch { expected: 1, actual: out.len() });
        }
        Ok(out.remove(0))
    }

    /// Dot-product similarity of `query` against every document, in corpus order.
    pub fn score(&self, query: &[f32]) -> Result<Vec<f32>, IndexError> {
        if query.len() != self.dim {
            return Err(IndexError::QueryDimension { expected: self.dim, actual: query.len() });
        }
        let scores: Vec<f32> = self.vectors.iter().map(|v| dot_product(query, v)).collect();
        debug!(documents = scores.len(), "dense scores computed");
        Ok(scores)
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if len < 2 { pb.set_draw_target(ProgressDrawTarget::hidden()); }
    if let Ok(style) = ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({percent}%) {msg}") {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message("embedding corpus");
    pb
}
