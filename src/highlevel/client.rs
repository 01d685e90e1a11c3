//! Convenience wrapper that owns a [`SimilarityProvider`] and a
//! [`WeatConfig`] and runs complete tests through the stats layer.
//!
//! For full control, use [`stats`](crate::stats) directly.

use crate::config::WeatConfig;
use crate::error::{Result, WeatError};
use crate::kernel::SimilarityProvider;
use crate::stats::{effect_size, permutation_test, AssociationCache, PermutationOutcome};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Effect size and p-value of one test.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub effect_size: f64,
    pub p_value: f64,
}

impl fmt::Display for TestResult {
    /// `d p`, both with 16 fractional digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.16} {:.16}", self.effect_size, self.p_value)
    }
}

/// A test result together with the permutation counts behind its p-value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    pub result: TestResult,
    pub permutations: PermutationOutcome,
}

/// Runs Word Embedding Association Tests against one embedding space.
///
/// # Example
///
/// ```rust
/// use weat::highlevel::Weat;
/// use weat::kernel::VectorManager;
/// use weat::word_set;
///
/// let x = word_set(["rose", "tulip", "daisy"]);
/// let y = word_set(["ant", "wasp", "moth"]);
/// let a = word_set(["love", "peace"]);
/// let b = word_set(["hate", "war"]);
///
/// let store = VectorManager::new(64).embeddings(x.iter().chain(&y).chain(&a).chain(&b));
/// let weat = Weat::new(&store);
///
/// let result = weat.run(&x, &y, &a, &b)?;
/// assert!((0.0..=1.0).contains(&result.p_value));
/// # Ok::<(), weat::WeatError>(())
/// ```
pub struct Weat<P> {
    provider: P,
    config: WeatConfig,
}

impl<P: SimilarityProvider + Sync> Weat<P> {
    /// Create a runner with default configuration.
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, WeatConfig::default())
    }

    pub fn with_config(provider: P, config: WeatConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &WeatConfig {
        &self.config
    }

    /// Effect size and p-value of X versus Y with respect to A and B.
    pub fn run(&self, x: &[String], y: &[String], a: &[String], b: &[String]) -> Result<TestResult> {
        Ok(self.run_detailed(x, y, a, b)?.result)
    }

    /// Like [`run`](Self::run), also returning the permutation counts.
    ///
    /// Inputs are validated before any vector is looked up. Each call builds
    /// its own association cache, so runs never share scores.
    pub fn run_detailed(
        &self,
        x: &[String],
        y: &[String],
        a: &[String],
        b: &[String],
    ) -> Result<TestReport> {
        validate(x, y, a, b)?;
        self.config.validate()?;
        info!(
            targets = x.len(),
            attributes = a.len(),
            parallel = self.config.parallel,
            "running association test"
        );

        let cache = AssociationCache::new(&self.provider, a, b)?;
        let d = effect_size(&cache, x, y)?;
        debug!(effect_size = d, "effect size computed");

        let options = self.config.permutation_options();
        let permutations = match self.config.threads.filter(|_| self.config.parallel) {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| WeatError::InputValidation(format!("thread pool: {}", e)))?;
                pool.install(|| permutation_test(&cache, x, y, &options))?
            }
            None => permutation_test(&cache, x, y, &options)?,
        };

        let result = TestResult {
            effect_size: d,
            p_value: permutations.p_value(),
        };
        info!(
            effect_size = result.effect_size,
            p_value = result.p_value,
            "association test complete"
        );
        Ok(TestReport {
            result,
            permutations,
        })
    }
}

/// Size constraints checked before any computation.
fn validate(x: &[String], y: &[String], a: &[String], b: &[String]) -> Result<()> {
    if x.len() != y.len() {
        return Err(WeatError::InputValidation(format!(
            "target sets must have equal size (|X| = {}, |Y| = {})",
            x.len(),
            y.len()
        )));
    }
    if a.len() != b.len() {
        return Err(WeatError::InputValidation(format!(
            "attribute sets must have equal size (|A| = {}, |B| = {})",
            a.len(),
            b.len()
        )));
    }
    if x.len() < 2 {
        return Err(WeatError::InputValidation(format!(
            "target sets need at least two words each, got {}",
            x.len()
        )));
    }
    if a.is_empty() {
        return Err(WeatError::InputValidation(
            "attribute sets must not be empty".to_string(),
        ));
    }
    Ok(())
}
