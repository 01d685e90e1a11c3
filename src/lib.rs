//! # WEAT: Word Embedding Association Test
//!
//! Measures differential association between two sets of target words
//! (X, Y) and two sets of attribute words (A, B) in a word embedding space.
//! Reports a standardized effect size and an exact one-sided permutation
//! p-value.
//!
//! ## Quick Start
//!
//! ```rust
//! use weat::{Embeddings, Weat, word_set};
//! use std::io::Cursor;
//!
//! let vectors = "\
//! rose 0.9 0.1
//! tulip 0.8 0.3
//! ant 0.2 0.9
//! wasp 0.1 0.8
//! love 1.0 0.0
//! hate 0.0 1.0
//! ";
//! let store = Embeddings::from_reader(Cursor::new(vectors), true)?;
//!
//! let result = Weat::new(&store).run(
//!     &word_set(["rose", "tulip"]),
//!     &word_set(["ant", "wasp"]),
//!     &word_set(["love"]),
//!     &word_set(["hate"]),
//! )?;
//! println!("{}", result); // "<effect size> <p-value>"
//! # Ok::<(), weat::WeatError>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Association score**: `sigma(w) = mean cos(w, A) - mean cos(w, B)`
//! - **Statistic**: `s(X, Y) = Σ sigma(X) - Σ sigma(Y)`
//! - **Effect size**: difference of mean scores over the pooled standard deviation
//! - **p-value**: fraction of all equal-size relabelings of `X ++ Y` whose
//!   statistic strictly exceeds `s(X, Y)`
//!
//! Vectors must be unit-normalized: similarities are plain dot products.
//! [`Embeddings::from_reader`] normalizes on load when asked to.
//!
//! ## Layers
//!
//! - [`kernel`]: vectors, similarity, embedding stores
//! - [`stats`]: association cache, partitions, statistic, effect size,
//!   permutation test
//! - [`highlevel`]: the [`Weat`] runner

pub mod config;
pub mod error;
pub mod highlevel;
pub mod kernel;
pub mod stats;
pub mod wordlist;

// Re-exports for convenience
pub use config::WeatConfig;
pub use error::{Result, WeatError};
pub use highlevel::{TestReport, TestResult, Weat};
pub use kernel::{Embeddings, Similarity, SimilarityProvider, Vector, VectorManager};
pub use stats::{AssociationCache, PermutationOptions, PermutationOutcome};
pub use wordlist::{load_word_list, read_word_list, word_set, WordSet};
