//! docsearch-engine
//!
//! Ties the corpus loader and both indexes into generations, ranks queries
//! against the current generation, and publishes rebuilt generations
//! atomically.

pub mod engine;
pub mod generation;
pub mod ranker;

pub use engine::{EngineState, SearchEngine};
pub use generation::{DenseSlot, Generation};
