//! docsearch-core
//!
//! Shared vocabulary of the workspace: the token normalizer, documents and the
//! ordered corpus, the corpus loader, typed errors, collaborator traits and
//! configuration.

#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod traits;
pub mod types;

pub use error::{IndexError, LoadError, SearchError};
pub use loader::CorpusLoader;
pub use traits::{ArtifactLocator, Embedder, FsArtifactLocator, NoArtifacts};
pub use types::{ArtifactRef, Corpus, CorpusStats, DocId, Document, ScoredResult, Strategy};
