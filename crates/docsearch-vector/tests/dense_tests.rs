use docsearch_core::types::{Corpus, Document};
use docsearch_core::{Embedder, IndexError};
use docsearch_embed::HashEmbedder;
use docsearch_vector::DenseIndex;

fn corpus() -> Corpus {
    Corpus::new(vec![
        Document::new("a", "Contract Law", "This contract governs the sale of goods."),
        Document::new("b", "Tort Law", "Negligence requires a breach of duty."),
        Document::new("c", "", "CONTRACT contract"),
    ])
}

struct Ragged;
impl Embedder for Ragged {
    fn dim(&self) -> usize { 0 }
    fn max_len(&self) -> usize { 16 }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| vec![1.0; t.len() % 3 + 1]).collect())
    }
}

struct Broken;
impl Embedder for Broken {
    fn dim(&self) -> usize { 4 }
    fn max_len(&self) -> usize { 16 }
    fn embed_batch(&self, _texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> { anyhow::bail!("model offline") }
}

#[test]
fn build_and_score_in_corpus_order() {
    let embedder = HashEmbedder::new(256);
    let index = DenseIndex::build(&corpus(), &embedder, 2).expect("build");
    assert_eq!(index.len(), 3);
    assert_eq!(index.dim(), 256);

    let q = index.embed_query(&embedder, "Contract").expect("query");
    let scores = index.score(&q).expect("score");
    assert_eq!(scores.len(), 3);
    assert!(scores[2] > scores[0], "folded duplicates dominate");
    assert!(scores[0] > 0.0);
}

#[test]
fn vectors_are_computed_on_folded_text() {
    let embedder = HashEmbedder::new(64);
    let index = DenseIndex::build(&corpus(), &embedder, 8).expect("build");
    let expected = embedder.embed_text("contract contract");
    assert_eq!(index.vector(2).unwrap(), expected.as_slice());
}

#[test]
fn ragged_dimensions_are_rejected() {
    let err = DenseIndex::build(&corpus(), &Ragged, 8).unwrap_err();
    assert!(matches!(err, IndexError::DimensionMismatch { .. }), "{err}");
}

#[test]
fn embedder_failure_surfaces() {
    let err = DenseIndex::build(&corpus(), &Broken, 8).unwrap_err();
    assert!(matches!(err, IndexError::Embedding(ref m) if m.contains("model offline")));
}

#[test]
fn query_dimension_checked() {
    let index = DenseIndex::from_vectors(vec![vec![1.0, 0.0], vec![0.0, 1.0]], 2).expect("index");
    assert!(matches!(index.score(&[1.0]), Err(IndexError::QueryDimension { expected: 2, actual: 1 })));
    let scores = index.score(&[0.5, -1.0]).expect("score");
    assert_eq!(scores, vec![0.5, -1.0]);
}

#[test]
fn empty_corpus_builds() {
    let index = DenseIndex::build(&Corpus::default(), &HashEmbedder::new(16), 8).expect("build");
    assert!(index.is_empty());
    assert!(index.score(&[0.0; 16]).expect("score").is_empty());
}
