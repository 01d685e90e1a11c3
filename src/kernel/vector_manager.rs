//! Vector Manager: deterministic word → unit vector generation.
//!
//! Produces reproducible synthetic embeddings: the same word and seed ALWAYS
//! produce the SAME unit vector. Useful for tests, benchmarks, and
//! demonstrations that need an embedding space without a vector file.

use crate::kernel::embeddings::Embeddings;
use crate::kernel::vector::Vector;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Generates deterministic, unit-normalized vectors for arbitrary words.
///
/// Uses hash-based seeding so vectors are independent of generation order.
#[derive(Clone, Debug)]
pub struct VectorManager {
    dimensions: usize,
    global_seed: u64,
}

impl VectorManager {
    /// Create a new VectorManager with default seed.
    pub fn new(dimensions: usize) -> Self {
        Self::with_seed(dimensions, 0)
    }

    /// Create a new VectorManager with a specific global seed.
    pub fn with_seed(dimensions: usize, global_seed: u64) -> Self {
        Self {
            dimensions,
            global_seed,
        }
    }

    /// Get the dimensions.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Compute the unit vector for a word.
    ///
    /// Uses SHA-256 of (global_seed || word) to seed a ChaCha8 RNG, draws
    /// uniform components in [-1, 1), then normalizes.
    pub fn vector(&self, word: &str) -> Vector {
        let mut hasher = Sha256::new();
        hasher.update(self.global_seed.to_le_bytes());
        hasher.update(word.as_bytes());
        let hash = hasher.finalize();

        let mut seed = [0u8; 8];
        seed.copy_from_slice(&hash[0..8]);
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from_le_bytes(seed));

        let data: Vec<f64> = (0..self.dimensions)
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect();

        Vector::from_data(data).normalized()
    }

    /// Build an [`Embeddings`] store holding the vector of every given word.
    pub fn embeddings<I, S>(&self, words: I) -> Embeddings
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Embeddings::new(self.dimensions);
        for word in words {
            let word = word.as_ref();
            // Dimensions always match: every vector comes from this manager.
            let _ = store.insert(word, self.vector(word));
        }
        store
    }
}
