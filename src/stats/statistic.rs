//! The WEAT test statistic.
//!
//! `s(G1, G2) = Σ sigma(w ∈ G1) − Σ sigma(w ∈ G2)`

use crate::error::Result;
use crate::kernel::SimilarityProvider;
use crate::stats::association::AssociationCache;

/// Test statistic of two groups under a shared association cache.
///
/// Sums left to right in group order, so the result is reproducible bit for
/// bit for the same inputs.
pub fn statistic<P, S>(cache: &AssociationCache<'_, P>, group1: &[S], group2: &[S]) -> Result<f64>
where
    P: SimilarityProvider + ?Sized,
    S: AsRef<str>,
{
    Ok(association_sum(cache, group1)? - association_sum(cache, group2)?)
}

/// Sum of association scores over a group.
pub fn association_sum<P, S>(cache: &AssociationCache<'_, P>, group: &[S]) -> Result<f64>
where
    P: SimilarityProvider + ?Sized,
    S: AsRef<str>,
{
    group
        .iter()
        .try_fold(0.0, |sum, word| Ok(sum + cache.sigma(word.as_ref())?))
}
