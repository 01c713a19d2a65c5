//! Strategy dispatch, top-k selection and result assembly.

use std::collections::HashSet;

use docsearch_core::normalize::query_terms;
use docsearch_core::types::{ScoredResult, Strategy};
use docsearch_core::{ArtifactLocator, SearchError};
use docsearch_text::snippet;

use crate::generation::{DenseSlot, Generation};

/// Reject empty queries and a zero result count.
pub fn validate(query: &str, top_k: usize) -> Result<(), SearchError> {
    if query.trim().is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    if top_k == 0 {
        return Err(SearchError::InvalidTopK);
    }
    Ok(())
}

/// Keep positive scores, sort descending (stable, so ties stay in corpus
/// order) and cut to `top_k`. Returns `(doc_index, score)` pairs.
pub fn select_top_k(scores: &[f32], top_k: usize) -> Vec<(usize, f32)> {
    let mut hits: Vec<(usize, f32)> = scores.iter().copied().enumerate().filter(|(_, s)| *s > 0.0 && s.is_finite()).collect();
    hits.sort_by(|a, b| b.1.total_cmp(&a.1));
    hits.truncate(top_k);
    hits
}

fn strategy_scores(generation: &Generation, strategy: Strategy, query: &str, terms: &[String]) -> Result<Vec<f32>, SearchError> {
    match strategy {
        Strategy::Lexical => Ok(generation.lexical().score(terms)),
        Strategy::Dense => {
            let unavailable = |reason: String| SearchError::StrategyUnavailable { strategy, reason };
            match generation.dense() {
                DenseSlot::Unavailable(reason) => Err(unavailable(reason.clone())),
                DenseSlot::Ready { index, embedder } => {
                    let q = index.embed_query(embedder.as_ref(), query).map_err(|e| unavailable(e.to_string()))?;
                    index.score(&q).map_err(|e| unavailable(e.to_string()))
                }
            }
        }
    }
}

/// Rank `generation` for `query`.
///
/// A query with no letters at all yields no results rather than an error.
pub fn rank(
    generation: &Generation,
    artifacts: &dyn ArtifactLocator,
    query: &str,
    top_k: usize,
    strategy: Strategy,
) -> Result<Vec<ScoredResult>, SearchError> {
    validate(query, top_k)?;
    let terms = query_terms(query);
    if terms.is_empty() {
        return Ok(vec![]);
    }
    let scores = strategy_scores(generation, strategy, query, &terms)?;
    let term_set: HashSet<String> = terms.into_iter().collect();
    let corpus = generation.corpus();
    let results = select_top_k(&scores, top_k)
        .into_iter()
        .filter_map(|(doc_index, score)| {
            let doc = corpus.get(doc_index)?;
            Some(ScoredResult {
                id: doc.id.clone(),
                title: doc.title.clone(),
                score,
                snippet: snippet::extract(doc, &term_set),
                artifact: artifacts.locate(&doc.id),
            })
        })
        .collect();
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_k_filters_and_orders() {
        let hits = select_top_k(&[0.0, 2.0, -1.0, 3.0, 2.0, f32::NAN, 1.0], 10);
        assert_eq!(hits, vec![(3, 3.0), (1, 2.0), (4, 2.0), (6, 1.0)]);
    }

    #[test]
    fn ties_keep_corpus_order_across_truncation() {
        let hits = select_top_k(&[1.0, 1.0, 1.0, 1.0], 2);
        assert_eq!(hits, vec![(0, 1.0), (1, 1.0)]);
    }

    #[test]
    fn all_zero_is_empty() {
        assert!(select_top_k(&[0.0, 0.0], 5).is_empty());
    }

    #[test]
    fn validation() {
        assert!(matches!(validate("   ", 3), Err(SearchError::EmptyQuery)));
        assert!(matches!(validate("", 3), Err(SearchError::EmptyQuery)));
        assert!(matches!(validate("law", 0), Err(SearchError::InvalidTopK)));
        assert!(validate("law", 1).is_ok());
    }
}
