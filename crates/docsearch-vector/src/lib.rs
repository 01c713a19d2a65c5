//! docsearch-vector
//!
//! In-memory dense index: one embedding per document, scored exhaustively by
//! dot product. Vectors come from a `docsearch_core::Embedder`.

pub mod distance;
pub mod index;

pub use index::{DenseIndex, DEFAULT_BATCH_SIZE};
