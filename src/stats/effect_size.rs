//! Effect size: standardized difference in mean association.
//!
//! ```text
//! d = (mean(sx) - mean(sy)) / sqrt((var(sx) + var(sy)) / 2)
//! ```
//!
//! where `sx`, `sy` are the association scores of the X and Y target words
//! and `var` is the unbiased (n − 1) sample variance.

use crate::error::{Result, WeatError};
use crate::kernel::SimilarityProvider;
use crate::stats::association::AssociationCache;

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample variance (n − 1 divisor).
///
/// `None` when fewer than two values are given.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|&v| (v - m) * (v - m)).sum();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// Effect size of X versus Y.
///
/// Both target sets need at least two words; this is checked before any
/// association is computed. A zero pooled standard deviation or a
/// non-finite result is reported as [`WeatError::NumericDegeneracy`].
pub fn effect_size<P, S>(cache: &AssociationCache<'_, P>, x: &[S], y: &[S]) -> Result<f64>
where
    P: SimilarityProvider + ?Sized,
    S: AsRef<str>,
{
    if x.len() < 2 || y.len() < 2 {
        return Err(WeatError::InputValidation(format!(
            "effect size needs at least two words per target set (|X| = {}, |Y| = {})",
            x.len(),
            y.len()
        )));
    }

    let sx = scores(cache, x)?;
    let sy = scores(cache, y)?;

    let mean_diff = mean(&sx) - mean(&sy);
    // Both variances exist: lengths were checked above.
    let var_x = sample_variance(&sx).unwrap_or(f64::NAN);
    let var_y = sample_variance(&sy).unwrap_or(f64::NAN);
    let pooled_sd = ((var_x + var_y) / 2.0).sqrt();

    if pooled_sd == 0.0 {
        return Err(WeatError::NumericDegeneracy(
            "pooled standard deviation is zero; association scores do not vary".to_string(),
        ));
    }

    let d = mean_diff / pooled_sd;
    if !d.is_finite() {
        return Err(WeatError::NumericDegeneracy(format!(
            "effect size is not finite (mean difference {}, pooled sd {})",
            mean_diff, pooled_sd
        )));
    }
    Ok(d)
}

fn scores<P, S>(cache: &AssociationCache<'_, P>, words: &[S]) -> Result<Vec<f64>>
where
    P: SimilarityProvider + ?Sized,
    S: AsRef<str>,
{
    words.iter().map(|w| cache.sigma(w.as_ref())).collect()
}
