//! Kernel layer: embedding vectors and the similarity seam.
//!
//! The kernel provides everything the association test reads from an
//! embedding space:
//! - Dense word vectors ([`Vector`])
//! - Dot-product similarity ([`Similarity`])
//! - The provider capability injected into the test ([`SimilarityProvider`])
//! - An in-memory store with a text-format loader ([`Embeddings`])
//! - Deterministic synthetic vectors ([`VectorManager`])
//!
//! This layer has no dependencies on [`stats`](crate::stats) or
//! [`highlevel`](crate::highlevel).
//!
//! # Example
//!
//! ```rust
//! use weat::kernel::{SimilarityProvider, VectorManager};
//!
//! let vm = VectorManager::with_seed(64, 1);
//! let store = vm.embeddings(["rose", "ant"]);
//!
//! let sim = store.cosine("rose", "ant").unwrap();
//! assert!((-1.0..=1.0).contains(&sim));
//! ```

pub mod embeddings;
pub mod similarity;
pub mod vector;
pub mod vector_manager;

pub use embeddings::Embeddings;
pub use similarity::{Similarity, SimilarityProvider};
pub use vector::Vector;
pub use vector_manager::VectorManager;
