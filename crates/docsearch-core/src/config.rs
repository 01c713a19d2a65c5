//! Configuration loader and path helpers.
//!
//! Figment merges `config.toml`, `config.<env>.toml` and
//! `APP_*` env vars (`__` separates nesting: `APP_CORPUS__DIR`).

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::loader::DEFAULT_JSONL_NAME;

/// Deployment flavour. `Thesis` serves a curated static corpus with dense
/// retrieval; `Public` serves an uploads directory with lexical only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Thesis,
    #[default]
    Public,
}

impl Mode {
    pub fn default_corpus_dir(self) -> &'static str {
        match self {
            Mode::Thesis => "data/static_corpus",
            Mode::Public => "data/uploads",
        }
    }

    pub fn dense_by_default(self) -> bool { matches!(self, Mode::Thesis) }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusSettings {
    pub dir: Option<String>,
    pub artifacts_dir: Option<String>,
    pub jsonl_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub default_top_k: usize,
    pub max_top_k: usize,
}

impl Default for SearchSettings {
    fn default() -> Self { Self { default_top_k: 30, max_top_k: 100 } }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub enabled: Option<bool>,
    pub model_dir: Option<String>,
    pub batch_size: usize,
    pub max_len: usize,
    pub fake: bool,
}

impl Default for EmbeddingSettings {
    fn default() -> Self { Self { enabled: None, model_dir: None, batch_size: 8, max_len: 1024, fake: false } }
}

/// Typed view over the merged configuration. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: Mode,
    pub corpus: CorpusSettings,
    pub search: SearchSettings,
    pub embedding: EmbeddingSettings,
}

impl Settings {
    pub fn corpus_dir(&self, base: &Path) -> PathBuf {
        let dir = self.corpus.dir.as_deref().unwrap_or(self.mode.default_corpus_dir());
        resolve_with_base(base, dir)
    }

    pub fn artifacts_dir(&self, base: &Path) -> PathBuf {
        match self.corpus.artifacts_dir.as_deref() {
            Some(dir) => resolve_with_base(base, dir),
            None => self.corpus_dir(base),
        }
    }

    pub fn jsonl_name(&self) -> &str { self.corpus.jsonl_name.as_deref().unwrap_or(DEFAULT_JSONL_NAME) }

    pub fn dense_enabled(&self) -> bool { self.embedding.enabled.unwrap_or(self.mode.dense_by_default()) }

    pub fn model_dir(&self, base: &Path) -> Option<PathBuf> {
        self.embedding.model_dir.as_deref().map(|d| resolve_with_base(base, d))
    }

    /// Caller-supplied `top_k`, defaulted and clamped. Zero is passed through
    /// so the engine can reject it.
    pub fn effective_top_k(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.search.default_top_k).min(self.search.max_top_k.max(1))
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    /// Build from an explicit figment, e.g. in tests.
    pub fn from_figment(figment: Figment) -> anyhow::Result<Self> {
        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment.extract().map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))
    }

    fn validate(&self) -> anyhow::Result<()> {
        let settings = self.settings()?;
        if settings.search.default_top_k == 0 {
            anyhow::bail!("search.default_top_k must be greater than zero");
        }
        if settings.embedding.batch_size == 0 {
            anyhow::bail!("embedding.batch_size must be greater than zero");
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
