//! docsearch-embed
//!
//! Embedding collaborators behind `docsearch_core::Embedder`: a local BGE-M3
//! (XLM-RoBERTa) model run with candle, and a hashing embedder that needs no
//! model files. `APP_USE_FAKE_EMBEDDINGS=1` or `embedding.fake = true` selects
//! the hashing one.

use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use candle_core::{Device, Tensor, DType};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{XLMRobertaModel, Config as XLMRobertaConfig};
use tokenizers::Tokenizer;

use docsearch_core::config::EmbeddingSettings;
use docsearch_core::Embedder;

pub mod device;
pub mod pool;
pub mod tokenize;

pub use pool::{masked_mean_l2, Pooling};

pub const FAKE_EMBEDDING_DIM: usize = 1024;

pub struct EmbeddingModel { model: XLMRobertaModel, tokenizer: Tokenizer, device: Device, dim: usize, max_len: usize, pooling: Pooling }

impl EmbeddingModel {
    pub fn load(model_dir: &Path, max_len: usize) -> Result<Self> {
        let device = device::select_device();
        info!(model_dir = %model_dir.display(), "loading BGE-M3 model");
        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", tokenizer_path.display(), e))?;
        let config_path = model_dir.join("config.json");
        let config: XLMRobertaConfig = serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;
        let dtype = DType::F32;
        let safetensors = model_dir.join("model.safetensors");
        let vb = if safetensors.exists() {
            debug!(path = %safetensors.display(), "mapping safetensors weights");
            // SAFETY: the weights file is not modified while the model is alive.
            unsafe { VarBuilder::from_mmaped_safetensors(&[safetensors], dtype, &device)? }
        } else {
            let weights_path = model_dir.join("pytorch_model.bin");
            debug!(path = %weights_path.display(), "reading pickled weights");
            let weights = candle_core::pickle::read_all(&weights_path)?;
            let weights_map: std::collections::HashMap<String, Tensor> = weights.into_iter().collect();
            VarBuilder::from_tensors(weights_map, dtype, &device)
        };
        let model = XLMRobertaModel::new(&config, vb)?;
        // Two positions are reserved for the padding offset of RoBERTa position ids.
        let max_len = max_len.min(config.max_position_embeddings.saturating_sub(2)).max(1);
        info!(dim = config.hidden_size, max_len, "BGE-M3 model loaded");
        Ok(Self { model, tokenizer, device, dim: config.hidden_size, max_len, pooling: Pooling::Cls })
    }

    pub fn with_pooling(mut self, pooling: Pooling) -> Self { self.pooling = pooling; self }

    pub fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let start = Instant::now();
        let (input_ids, attention_mask) = tokenize::tokenize_on_device(&self.tokenizer, text, self.max_len, &self.device)?;
        let token_type_ids = input_ids.zeros_like()?;
        let hidden = self.model.forward(&input_ids, &attention_mask, &token_type_ids, None, None, None)?;
        let emb = pool::pool_l2(self.pooling, &hidden, &attention_mask)?;
        let emb_cpu: Vec<f32> = emb.to_device(&Device::Cpu)?.squeeze(0)?.to_vec1()?;
        if emb_cpu.len() != self.dim {
            return Err(anyhow!("model produced {} dims, expected {}", emb_cpu.len(), self.dim));
        }
        if start.elapsed().as_millis() > 1000 { warn!(elapsed_ms = start.elapsed().as_millis() as u64, "slow embedding"); }
        Ok(emb_cpu)
    }
}

impl Embedder for EmbeddingModel {
    fn dim(&self) -> usize { self.dim }
    fn max_len(&self) -> usize { self.max_len }
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> { texts.iter().map(|t| self.embed_text(t)).collect() }
}

/// Bag-of-words hashing embedder. Each whitespace token lands in one of `dim`
/// buckets, then the vector is L2-normalized. Deterministic, all components
/// non-negative, and texts sharing no token are (barring collisions) orthogonal.
#[derive(Debug, Clone)]
pub struct HashEmbedder { dim: usize }

impl HashEmbedder {
    pub fn new(dim: usize) -> Self { Self { dim: dim.max(1) } }

    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        use std::hash::{Hash, Hasher}; use twox_hash::XxHash64;
        let mut v = vec![0f32; self.dim];
        for token in text.split_whitespace() {
            let mut hasher = XxHash64::with_seed(0); token.hash(&mut hasher); let h = hasher.finish();
            let idx = (h % self.dim as u64) as usize;
            v[idx] += 0.5 + (((h >> 32) as u32) as f32) / (u32::MAX as f32) * 0.5;
        }
        let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6); for x in &mut v { *x /= norm; }
        v
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize { self.dim }
    fn max_len(&self) -> usize { usize::MAX }
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> { Ok(texts.iter().map(|t| self.embed_text(t)).collect()) }
}

fn fake_requested(settings: &EmbeddingSettings) -> bool {
    settings.fake || std::env::var("APP_USE_FAKE_EMBEDDINGS").ok().is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Build the configured embedder. `model_dir` overrides the search list in
/// [`resolve_model_dir`].
pub fn get_default_embedder(settings: &EmbeddingSettings, model_dir: Option<&Path>) -> Result<Arc<dyn Embedder>> {
    if fake_requested(settings) { info!(dim = FAKE_EMBEDDING_DIM, "using hash embedder"); return Ok(Arc::new(HashEmbedder::new(FAKE_EMBEDDING_DIM))); }
    let dir = resolve_model_dir(model_dir)?;
    Ok(Arc::new(EmbeddingModel::load(&dir, settings.max_len)?))
}

pub fn resolve_model_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit { if p.exists() { return Ok(p.to_path_buf()); } return Err(anyhow!("Model directory {} does not exist", p.display())); }
    for var in ["APP_MODEL_DIR", "MODEL_DIR"] {
        if let Ok(dir) = std::env::var(var) { let p = PathBuf::from(&dir); if p.exists() { debug!(var, dir = %p.display(), "model dir from env"); return Ok(p); } }
    }
    for candidate in ["../models/bge-m3", "models/bge-m3"] {
        let p = Path::new(candidate); if p.exists() { return Ok(p.to_path_buf()); }
    }
    Err(anyhow!("Could not locate BGE-M3 model directory"))
}
