use parking_lot::{Mutex, RwLock};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use docsearch_core::types::{CorpusStats, ScoredResult, Strategy};
use docsearch_core::{ArtifactLocator, CorpusLoader, Embedder, LoadError, NoArtifacts, SearchError};
use docsearch_vector::DEFAULT_BATCH_SIZE;

use crate::generation::Generation;
use crate::ranker;

/// What queries currently see.
#[derive(Debug, Clone, Default)]
pub enum EngineState {
    #[default]
    Uninitialized,
    Ready(Arc<Generation>),
}

/// Owns the current generation and swaps in new ones.
///
/// Queries clone the `Arc` of the current generation under a read lock and
/// then run without holding any lock, so a rebuild never blocks a query for
/// longer than the pointer swap and a query never sees two generations.
pub struct SearchEngine {
    state: RwLock<EngineState>,
    rebuild: Mutex<u64>,
    loader: CorpusLoader,
    embedder: Option<Arc<dyn Embedder>>,
    artifacts: Arc<dyn ArtifactLocator>,
    batch_size: usize,
}

impl Default for SearchEngine {
    fn default() -> Self { Self::new(CorpusLoader::default()) }
}

impl SearchEngine {
    pub fn new(loader: CorpusLoader) -> Self {
        Self {
            state: RwLock::new(EngineState::Uninitialized),
            rebuild: Mutex::new(0),
            loader,
            embedder: None,
            artifacts: Arc::new(NoArtifacts),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self { self.embedder = Some(embedder); self }

    pub fn with_artifacts(mut self, artifacts: Arc<dyn ArtifactLocator>) -> Self { self.artifacts = artifacts; self }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self { self.batch_size = batch_size.max(1); self }

    pub fn dense_configured(&self) -> bool { self.embedder.is_some() }

    /// Load `source`, build a new generation and publish it.
    ///
    /// Rebuilds are serialized. On failure the previous generation stays
    /// current and keeps serving queries.
    pub fn build_or_rebuild_corpus(&self, source: &Path) -> Result<Arc<Generation>, LoadError> {
        let mut counter = self.rebuild.lock();
        let start = Instant::now();
        let corpus = self.loader.load(source).map_err(|e| {
            warn!(source = %source.display(), error = %e, "rebuild failed; keeping current generation");
            e
        })?;
        let number = *counter + 1;
        let generation = Arc::new(Generation::build(number, source, corpus, self.embedder.clone(), self.batch_size));
        *self.state.write() = EngineState::Ready(Arc::clone(&generation));
        *counter = number;
        info!(
            generation = number,
            source = %source.display(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "generation published"
        );
        Ok(generation)
    }

    pub fn state(&self) -> EngineState { self.state.read().clone() }

    /// Current generation, if one has been built.
    pub fn snapshot(&self) -> Option<Arc<Generation>> {
        match &*self.state.read() {
            EngineState::Ready(generation) => Some(Arc::clone(generation)),
            EngineState::Uninitialized => None,
        }
    }

    pub fn search(&self, query: &str, top_k: usize, strategy: Strategy) -> Result<Vec<ScoredResult>, SearchError> {
        let start = Instant::now();
        let Some(generation) = self.snapshot() else {
            ranker::validate(query, top_k)?;
            return match strategy {
                Strategy::Lexical => Ok(vec![]),
                Strategy::Dense => Err(SearchError::StrategyUnavailable { strategy, reason: "no corpus has been loaded".to_string() }),
            };
        };
        let results = ranker::rank(&generation, self.artifacts.as_ref(), query, top_k, strategy)?;
        info!(
            generation = generation.number(),
            %strategy,
            top_k,
            hits = results.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search"
        );
        Ok(results)
    }

    pub fn stats(&self) -> Option<CorpusStats> { self.snapshot().map(|g| g.stats()) }
}
