//! Shared setup for the `docsearch` binaries.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use docsearch_core::config::{Config, Settings};
use docsearch_core::types::ScoredResult;
use docsearch_core::{CorpusLoader, FsArtifactLocator};
use docsearch_embed::get_default_embedder;
use docsearch_engine::SearchEngine;

/// Log to stderr so stdout carries only results. `RUST_LOG` overrides `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

pub struct App {
    pub settings: Settings,
    pub corpus_dir: PathBuf,
    pub engine: Arc<SearchEngine>,
}

impl App {
    /// Load configuration relative to the working directory and build the
    /// first generation. An unloadable embedding model only disables dense
    /// search.
    pub fn bootstrap() -> Result<Self> {
        let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
        let settings = config.settings()?;
        let base = std::env::current_dir()?;
        Self::from_settings(settings, &base)
    }

    pub fn from_settings(settings: Settings, base: &Path) -> Result<Self> {
        let corpus_dir = settings.corpus_dir(base);
        let mut engine = SearchEngine::new(CorpusLoader::with_jsonl_name(settings.jsonl_name()))
            .with_artifacts(Arc::new(FsArtifactLocator::new(settings.artifacts_dir(base))))
            .with_batch_size(settings.embedding.batch_size);
        if settings.dense_enabled() {
            let model_dir = settings.model_dir(base);
            match get_default_embedder(&settings.embedding, model_dir.as_deref()) {
                Ok(embedder) => engine = engine.with_embedder(embedder),
                Err(e) => warn!(error = %e, "embedding model unavailable; dense search disabled"),
            }
        }
        info!(mode = ?settings.mode, corpus = %corpus_dir.display(), dense = engine.dense_configured(), "starting");
        let engine = Arc::new(engine);
        engine.build_or_rebuild_corpus(&corpus_dir)?;
        Ok(Self { settings, corpus_dir, engine })
    }
}

pub fn print_results(query: &str, results: &[ScoredResult], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }
    println!("Found {} results for: \"{}\"", results.len(), query);
    for (i, r) in results.iter().enumerate() {
        println!("\n  {}. score={:.4}  id={}  title={}", i + 1, r.score, r.id, r.title);
        if let Some(a) = &r.artifact { println!("     file: {}", a.path.display()); }
        if !r.snippet.is_empty() { println!("     {}", r.snippet); }
    }
    Ok(())
}
