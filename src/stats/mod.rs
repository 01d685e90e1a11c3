//! Stats layer: the association test itself.
//!
//! - [`AssociationCache`]: memoized per-word association scores for one
//!   (A, B) attribute pair
//! - [`statistic()`]: the test statistic `s(G1, G2)`
//! - [`effect_size()`]: standardized mean difference of X versus Y
//! - [`Partitions`]: lazy enumeration of every relabeling of `X ++ Y`
//! - [`permutation_test`]: exact one-sided p-value
//!
//! One [`AssociationCache`] serves the whole of a test invocation.
//!
//! # Example
//!
//! ```rust
//! use weat::kernel::VectorManager;
//! use weat::stats::{effect_size, permutation_test, AssociationCache, PermutationOptions};
//! use weat::word_set;
//!
//! let x = word_set(["rose", "tulip"]);
//! let y = word_set(["ant", "wasp"]);
//! let a = word_set(["love", "peace"]);
//! let b = word_set(["hate", "war"]);
//!
//! let store = VectorManager::with_seed(50, 3).embeddings(x.iter().chain(&y).chain(&a).chain(&b));
//! let cache = AssociationCache::new(&store, &a, &b)?;
//!
//! let d = effect_size(&cache, &x, &y)?;
//! let outcome = permutation_test(&cache, &x, &y, &PermutationOptions::default())?;
//! assert_eq!(outcome.total, 6);
//! assert!((0.0..=1.0).contains(&outcome.p_value()));
//! # let _ = d;
//! # Ok::<(), weat::WeatError>(())
//! ```

pub mod association;
pub mod effect_size;
pub mod partition;
pub mod permutation;
pub mod statistic;

pub use association::AssociationCache;
pub use effect_size::{effect_size, mean, sample_variance};
pub use partition::{binomial, Combinations, Partition, Partitions};
pub use permutation::{p_value, permutation_test, PermutationOptions, PermutationOutcome};
pub use statistic::{association_sum, statistic};
