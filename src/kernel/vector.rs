//! Vector type for word embeddings.
//!
//! Embedding vectors are dense `f64` sequences. The association test reads
//! them only through dot products, so a vector is expected to be
//! unit-normalized before it is handed to the core.

use serde::{Deserialize, Serialize};

/// A dense, fixed-length embedding vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    /// The actual vector data
    data: Vec<f64>,
}

impl Vector {
    /// Create a vector from raw data.
    pub fn from_data(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Get the dimensionality.
    pub fn dimensions(&self) -> usize {
        self.data.len()
    }

    /// Get the raw data as a slice.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Compute the L2 norm.
    pub fn norm(&self) -> f64 {
        self.data.iter().map(|&v| v * v).sum::<f64>().sqrt()
    }

    /// Return a unit-normalized copy.
    ///
    /// A zero vector has no direction and is returned unchanged.
    pub fn normalized(&self) -> Vector {
        let norm = self.norm();
        if norm < 1e-12 {
            return self.clone();
        }
        Self {
            data: self.data.iter().map(|&v| v / norm).collect(),
        }
    }

    /// Whether the L2 norm is within `tolerance` of 1.
    pub fn is_unit(&self, tolerance: f64) -> bool {
        (self.norm() - 1.0).abs() <= tolerance
    }
}
