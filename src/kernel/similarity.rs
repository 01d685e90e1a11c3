//! Similarity between embedding vectors and the provider seam used by the
//! association test.
//!
//! When compiled with the `simd` feature, the dot product uses SIMD-accelerated
//! kernels on supported hardware.

use crate::error::{Result, WeatError};
use crate::kernel::vector::Vector;

/// Vector similarity computation.
pub struct Similarity;

impl Similarity {
    /// Raw dot product.
    ///
    /// For unit-normalized vectors this is the cosine similarity.
    #[cfg(feature = "simd")]
    pub fn dot(a: &Vector, b: &Vector) -> f64 {
        use simsimd::SpatialSimilarity;
        f64::dot(a.data(), b.data()).unwrap_or_else(|| Self::dot_raw(a, b))
    }

    #[cfg(not(feature = "simd"))]
    pub fn dot(a: &Vector, b: &Vector) -> f64 {
        Self::dot_raw(a, b)
    }

    fn dot_raw(a: &Vector, b: &Vector) -> f64 {
        a.data()
            .iter()
            .zip(b.data().iter())
            .map(|(&x, &y)| x * y)
            .sum()
    }
}

/// Source of word vectors and word-to-word similarities.
///
/// This is the only capability the association test needs from an embedding
/// space. Vectors returned by [`resolve`](Self::resolve) must already be
/// unit-normalized: the default [`cosine`](Self::cosine) is a plain dot
/// product and does not normalize.
pub trait SimilarityProvider {
    /// Look up the vector for `word`.
    ///
    /// Fails with [`WeatError::Lookup`] when the word is not in the vocabulary.
    fn resolve(&self, word: &str) -> Result<&Vector>;

    /// Cosine similarity of two words, computed as the dot product of their
    /// vectors.
    fn cosine(&self, word_a: &str, word_b: &str) -> Result<f64> {
        let a = self.resolve(word_a)?;
        let b = self.resolve(word_b)?;
        if a.dimensions() != b.dimensions() {
            return Err(WeatError::DimensionMismatch {
                expected: a.dimensions(),
                got: b.dimensions(),
            });
        }
        Ok(Similarity::dot(a, b))
    }
}

impl<P: SimilarityProvider + ?Sized> SimilarityProvider for &P {
    fn resolve(&self, word: &str) -> Result<&Vector> {
        (**self).resolve(word)
    }

    fn cosine(&self, word_a: &str, word_b: &str) -> Result<f64> {
        (**self).cosine(word_a, word_b)
    }
}
