//! Corpus loading from a JSONL collection or a directory of `.txt` files.
//!
//! `<root>/corpus.jsonl` wins when it exists. Otherwise every `*.txt` file under
//! `<root>` (recursive, sorted by path) becomes one document whose id is the
//! file stem. Malformed JSONL lines are skipped, never fatal.

use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{LoadError, Result};
use crate::types::{Corpus, Document};

pub const DEFAULT_JSONL_NAME: &str = "corpus.jsonl";

#[derive(Debug, Clone)]
pub struct CorpusLoader {
    jsonl_name: String,
}

impl Default for CorpusLoader {
    fn default() -> Self { Self { jsonl_name: DEFAULT_JSONL_NAME.to_string() } }
}

impl CorpusLoader {
    pub fn new() -> Self { Self::default() }

    pub fn with_jsonl_name(jsonl_name: impl Into<String>) -> Self { Self { jsonl_name: jsonl_name.into() } }

    pub fn jsonl_path(&self, root: &Path) -> PathBuf { root.join(&self.jsonl_name) }

    /// Load the corpus rooted at `root` (or the JSONL file `root` itself).
    /// A missing root is an error; a root with nothing usable in it yields an
    /// empty corpus.
    pub fn load(&self, root: &Path) -> Result<Corpus> {
        if !root.exists() {
            return Err(LoadError::SourceMissing(root.to_path_buf()));
        }
        let jsonl = self.jsonl_path(root);
        let documents = if root.is_file() {
            self.load_jsonl(root)?
        } else if jsonl.is_file() {
            self.load_jsonl(&jsonl)?
        } else {
            self.load_txt_dir(root)?
        };
        let documents = dedupe_ids(documents);
        info!(root = %root.display(), documents = documents.len(), "corpus loaded");
        Ok(Corpus::new(documents))
    }

    pub fn load_jsonl(&self, path: &Path) -> Result<Vec<Document>> {
        let content = self.read_file_content(path)?;
        let mut documents = Vec::new();
        let mut skipped = 0usize;
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() { continue; }
            match parse_record(line) {
                Some(doc) => documents.push(doc),
                None => { skipped += 1; debug!(line = line_no + 1, "skipping malformed corpus record"); }
            }
        }
        if skipped > 0 { warn!(skipped, path = %path.display(), "malformed corpus records skipped"); }
        Ok(documents)
    }

    pub fn load_txt_dir(&self, root: &Path) -> Result<Vec<Document>> {
        let files = self.list_txt_files(root);
        if files.is_empty() {
            info!(root = %root.display(), "no .txt files found");
            return Ok(vec![]);
        }
        let mut documents = Vec::with_capacity(files.len());
        for file_path in &files {
            let content = self.read_file_content(file_path)?;
            let Some(doc_id) = extract_doc_id(file_path) else { continue };
            documents.push(Document::new(doc_id, "", &content));
        }
        debug!(files = files.len(), "text files loaded");
        Ok(documents)
    }

    fn read_file_content(&self, file_path: &Path) -> Result<String> {
        let bytes = fs::read(file_path).map_err(|source| LoadError::Io { path: file_path.to_path_buf(), source })?;
        match String::from_utf8(bytes) {
            Ok(content) => Ok(content),
            Err(e) => Ok(String::from_utf8_lossy(e.as_bytes()).into_owned()),
        }
    }

    fn list_txt_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut txt_files = Vec::new();
        for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let path = entry.path(); if path.extension().and_then(|s| s.to_str()) == Some("txt") { txt_files.push(path.to_path_buf()); }
        }
        txt_files.sort(); txt_files
    }
}

fn extract_doc_id(file_path: &Path) -> Option<String> { file_path.file_stem().map(|s| s.to_string_lossy().to_string()) }

/// Parse one JSONL line. Requires an object with a string or numeric `id`;
/// `title` and `text` default to empty when absent or null.
fn parse_record(line: &str) -> Option<Document> {
    let obj = serde_json::from_str::<Value>(line).ok()?;
    let obj = obj.as_object()?;
    let id = match obj.get("id")? {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let title = optional_str(obj.get("title"))?;
    let text = optional_str(obj.get("text"))?;
    Some(Document::new(id, title, &text))
}

// Outer None: present but not a string. Inner: absent/null becomes empty.
fn optional_str(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => None,
    }
}

fn dedupe_ids(documents: Vec<Document>) -> Vec<Document> {
    let mut seen = HashSet::with_capacity(documents.len());
    let before = documents.len();
    let kept: Vec<Document> = documents.into_iter().filter(|d| seen.insert(d.id.clone())).collect();
    if kept.len() < before { warn!(dropped = before - kept.len(), "duplicate document ids skipped"); }
    kept
}
