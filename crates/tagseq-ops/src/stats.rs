//! Streaming moments for mean/variance reductions.

use serde::{Deserialize, Serialize};

/// Count, sum and sum of squares of a group of samples.
///
/// Partial moments of disjoint groups combine with [`Moments::merge`], which
/// is how two pre-aggregated sequences are merged after a union.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    pub count: u64,
    pub sum: f64,
    pub sum_sq: f64,
}

impl Moments {
    pub fn of(x: f64) -> Self {
        Self {
            count: 1,
            sum: x,
            sum_sq: x * x,
        }
    }

    #[must_use]
    pub fn push(self, x: f64) -> Self {
        self.merge(&Self::of(x))
    }

    #[must_use]
    pub fn merge(self, other: &Self) -> Self {
        Self {
            count: self.count + other.count,
            sum: self.sum + other.sum,
            sum_sq: self.sum_sq + other.sum_sq,
        }
    }

    /// NaN for an empty group.
    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }

    /// Population variance (divides by `count`). Clamped at zero against
    /// rounding.
    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        (self.sum_sq / self.count as f64 - mean * mean).max(0.0)
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}
