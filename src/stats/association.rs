//! Association cache: memoized differential association scores.
//!
//! A word's association score against attribute sets A and B is
//!
//! ```text
//! sigma(w) = mean(cos(w, a) for a in A) - mean(cos(w, b) for b in B)
//! ```
//!
//! The permutation test evaluates the same words over and over, so each
//! score is computed once per cache and reused. A cache is bound to one
//! (A, B) pair for its whole lifetime; build a new one for different
//! attributes.

use crate::error::{Result, WeatError};
use crate::kernel::SimilarityProvider;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::trace;

/// Memoized association scores for one fixed pair of attribute sets.
///
/// Safe to share between threads when the provider is `Sync`. Concurrent
/// misses on the same word may both compute it; the scores are identical and
/// the map stays consistent.
pub struct AssociationCache<'a, P: ?Sized> {
    provider: &'a P,
    attributes_a: &'a [String],
    attributes_b: &'a [String],
    scores: RwLock<HashMap<String, f64>>,
}

impl<'a, P: SimilarityProvider + ?Sized> AssociationCache<'a, P> {
    /// Bind a cache to a provider and the attribute sets A and B.
    ///
    /// Both attribute sets must be non-empty.
    pub fn new(provider: &'a P, attributes_a: &'a [String], attributes_b: &'a [String]) -> Result<Self> {
        if attributes_a.is_empty() || attributes_b.is_empty() {
            return Err(WeatError::InputValidation(format!(
                "attribute sets must be non-empty (|A| = {}, |B| = {})",
                attributes_a.len(),
                attributes_b.len()
            )));
        }
        Ok(Self {
            provider,
            attributes_a,
            attributes_b,
            scores: RwLock::new(HashMap::new()),
        })
    }

    /// Association score of `word`, computed on first use.
    pub fn sigma(&self, word: &str) -> Result<f64> {
        if let Some(&score) = self.scores.read().get(word) {
            return Ok(score);
        }

        let score = self.compute(word)?;
        self.scores.write().entry(word.to_string()).or_insert(score);
        Ok(score)
    }

    /// Populate the cache for every word in `words`.
    ///
    /// Stops at the first word the provider cannot resolve.
    pub fn warm<I, S>(&self, words: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.sigma(word.as_ref())?;
        }
        Ok(())
    }

    /// Number of memoized words.
    pub fn len(&self) -> usize {
        self.scores.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.read().is_empty()
    }

    fn compute(&self, word: &str) -> Result<f64> {
        let mean_a = self.mean_similarity(word, self.attributes_a)?;
        let mean_b = self.mean_similarity(word, self.attributes_b)?;
        trace!(word, mean_a, mean_b, "computed association");
        Ok(mean_a - mean_b)
    }

    fn mean_similarity(&self, word: &str, attributes: &[String]) -> Result<f64> {
        let mut sum = 0.0;
        for attribute in attributes {
            sum += self.provider.cosine(word, attribute)?;
        }
        Ok(sum / attributes.len() as f64)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::kernel::Vector;
    use crate::wordlist::word_set;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider with a fixed similarity table that counts `cosine` calls.
    ///
    /// Unknown pairs are a lookup failure on the first word.
    pub(crate) struct CountingProvider {
        pub table: HashMap<(String, String), f64>,
        pub calls: AtomicUsize,
    }

    impl CountingProvider {
        pub fn new() -> Self {
            Self {
                table: HashMap::new(),
                calls: AtomicUsize::new(0),
            }
        }

        /// Every `word` gets `similarity` to `attribute`.
        pub fn with(mut self, words: &[&str], attribute: &str, similarity: f64) -> Self {
            for word in words {
                self.table
                    .insert((word.to_string(), attribute.to_string()), similarity);
            }
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl SimilarityProvider for CountingProvider {
        fn resolve(&self, word: &str) -> Result<&Vector> {
            Err(WeatError::lookup(word))
        }

        fn cosine(&self, word_a: &str, word_b: &str) -> Result<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.table
                .get(&(word_a.to_string(), word_b.to_string()))
                .copied()
                .ok_or_else(|| WeatError::lookup(word_a))
        }
    }

    #[test]
    fn test_sigma_formula() {
        let provider = CountingProvider::new()
            .with(&["w"], "a1", 0.8)
            .with(&["w"], "a2", 0.4)
            .with(&["w"], "b1", 0.1)
            .with(&["w"], "b2", 0.3);
        let a = word_set(["a1", "a2"]);
        let b = word_set(["b1", "b2"]);
        let cache = AssociationCache::new(&provider, &a, &b).unwrap();

        let sigma = cache.sigma("w").unwrap();
        assert!((sigma - (0.6 - 0.2)).abs() < 1e-12);
    }

    #[test]
    fn test_memoized() {
        let provider = CountingProvider::new()
            .with(&["w", "v"], "p", 0.5)
            .with(&["w", "v"], "q", 0.25);
        let a = word_set(["p"]);
        let b = word_set(["q"]);
        let cache = AssociationCache::new(&provider, &a, &b).unwrap();

        let first = cache.sigma("w").unwrap();
        assert_eq!(provider.calls(), 2);

        for _ in 0..10 {
            assert_eq!(cache.sigma("w").unwrap().to_bits(), first.to_bits());
        }
        assert_eq!(provider.calls(), 2);
        assert_eq!(cache.len(), 1);

        cache.sigma("v").unwrap();
        assert_eq!(provider.calls(), 4);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_warm() {
        let provider = CountingProvider::new()
            .with(&["x", "y"], "p", 1.0)
            .with(&["x", "y"], "q", 0.0);
        let a = word_set(["p"]);
        let b = word_set(["q"]);
        let cache = AssociationCache::new(&provider, &a, &b).unwrap();

        cache.warm(["x", "y", "x"]).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(provider.calls(), 4);
    }

    #[test]
    fn test_lookup_failure_propagates() {
        let provider = CountingProvider::new().with(&["known"], "p", 1.0);
        let a = word_set(["p"]);
        let b = word_set(["q"]);
        let cache = AssociationCache::new(&provider, &a, &b).unwrap();

        match cache.sigma("unknown") {
            Err(WeatError::Lookup { word }) => assert_eq!(word, "unknown"),
            other => panic!("expected lookup error, got {:?}", other),
        }
        assert!(cache.is_empty());
    }

    #[test]
    fn test_empty_attributes_rejected() {
        let provider = CountingProvider::new();
        let a = word_set(["p"]);
        let empty: Vec<String> = Vec::new();

        assert!(matches!(
            AssociationCache::new(&provider, &a, &empty),
            Err(WeatError::InputValidation(_))
        ));
        assert!(matches!(
            AssociationCache::new(&provider, &empty, &a),
            Err(WeatError::InputValidation(_))
        ));
    }

    #[test]
    fn test_separate_caches_for_separate_attributes() {
        let provider = CountingProvider::new()
            .with(&["w"], "p", 0.9)
            .with(&["w"], "q", 0.1);
        let p = word_set(["p"]);
        let q = word_set(["q"]);

        let forward = AssociationCache::new(&provider, &p, &q).unwrap();
        let reverse = AssociationCache::new(&provider, &q, &p).unwrap();

        let s1 = forward.sigma("w").unwrap();
        let s2 = reverse.sigma("w").unwrap();
        assert!((s1 + s2).abs() < 1e-12);
    }

    #[test]
    fn test_shared_across_threads() {
        let words: Vec<String> = (0..32).map(|i| format!("w{}", i)).collect();
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let provider = CountingProvider::new()
            .with(&refs, "p", 0.75)
            .with(&refs, "q", 0.25);
        let a = word_set(["p"]);
        let b = word_set(["q"]);
        let cache = AssociationCache::new(&provider, &a, &b).unwrap();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for word in &words {
                        assert!((cache.sigma(word).unwrap() - 0.5).abs() < 1e-12);
                    }
                });
            }
        });

        assert_eq!(cache.len(), 32);
    }
}
