use std::path::PathBuf;

use crate::types::ArtifactRef;

/// Turns normalized text into fixed-length vectors.
///
/// Implementations must be deterministic for identical input and return
/// vectors of `dim()` length, one per input text, in input order.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn max_len(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// Finds the original file backing a document, if any.
pub trait ArtifactLocator: Send + Sync {
    fn locate(&self, doc_id: &str) -> Option<ArtifactRef>;
}

/// Probe order for artifact files; first existing match wins.
pub const ARTIFACT_EXTENSIONS: [&str; 8] = [".pdf", ".PDF", ".htm", ".html", ".HTML", ".docx", ".doc", ".txt"];

/// Probes `<root>/<id><ext>` on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsArtifactLocator {
    root: PathBuf,
}

impl FsArtifactLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }
}

impl ArtifactLocator for FsArtifactLocator {
    fn locate(&self, doc_id: &str) -> Option<ArtifactRef> {
        if doc_id.is_empty() || doc_id.contains(['/', '\\']) || doc_id == ".." { return None; }
        ARTIFACT_EXTENSIONS.iter().find_map(|ext| {
            let file_name = format!("{doc_id}{ext}");
            let path = self.root.join(&file_name);
            path.is_file().then_some(ArtifactRef { file_name, path })
        })
    }
}

/// Resolves nothing. Used when the calling layer serves no original files.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoArtifacts;

impl ArtifactLocator for NoArtifacts {
    fn locate(&self, _doc_id: &str) -> Option<ArtifactRef> { None }
}
