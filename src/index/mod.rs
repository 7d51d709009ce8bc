//! In-memory index for examine
//!
//! A reference implementation of the [`Searcher`](crate::search::Searcher)
//! and [`StoredFields`](crate::search::StoredFields) capabilities.
//!
//! - Documents are loaded from a JSON array of flat objects
//! - Term and match queries are scored with BM25
//! - Composite field sorts break remaining ties by document id

mod memory;
mod scorer;
mod sorter;
mod tokenizer;

pub use memory::MemoryIndex;
pub use scorer::{bm25, FieldStats, BM25_B, BM25_K1};
pub use tokenizer::{normalize_term, tokenize};
