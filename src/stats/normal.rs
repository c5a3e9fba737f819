//! Normal distribution represented by its sufficient statistics.

use crate::error::RsaError;
use crate::stats::distribution::Distribution;
use log::warn;
use serde::{Deserialize, Serialize};

/// Relative tolerance on negative variances caused by cancellation.
const CANCELLATION_TOLERANCE: f64 = 1e-9;

// =#========================================================================#=
// NORMAL STATS
// =#========================================================================#=
/// Sufficient statistics of a finite multiset of samples:
/// count `n`, sum `s` and sum of squares `q`.
///
/// Mean and variance are recoverable without the raw samples, and samples
/// can be added and removed exactly in O(1). Plain value type: copy it into
/// speculative computations, write it back explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalStats {
    /// Number of samples
    pub n: usize,
    /// Sum of samples
    pub s: f64,
    /// Sum of squared samples
    pub q: f64,
}

impl NormalStats {
    /// Computes the statistics of `samples` from scratch.
    pub fn from_samples(samples: &[f64]) -> Self {
        samples.iter().fold(NormalStats::default(), |acc, &x| NormalStats {
            n: acc.n + 1,
            s: acc.s + x,
            q: acc.q + x * x,
        })
    }

    /// Returns `true` if no samples are held.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Mean `s/n`, or `None` if empty.
    pub fn mean(&self) -> Option<f64> {
        if self.n == 0 {
            None
        } else {
            Some(self.s / self.n as f64)
        }
    }

    /// Population variance `q/n - (s/n)^2`, clamped at zero,
    /// or `None` if empty.
    pub fn variance(&self) -> Option<f64> {
        let mean = self.mean()?;
        let raw = self.q / self.n as f64 - mean * mean;
        if raw < -CANCELLATION_TOLERANCE * (self.q / self.n as f64).max(1.0) {
            warn!("NormalStats: clamping negative variance {:e} to zero ({:?})", raw, self);
        }
        Some(raw.max(0.0))
    }

    /// Approximate equality of statistics, within `tolerance` on `s` and `q`.
    pub fn approx_eq(&self, other: &NormalStats, tolerance: f64) -> bool {
        self.n == other.n
            && (self.s - other.s).abs() <= tolerance
            && (self.q - other.q).abs() <= tolerance
    }
}

// =#========================================================================#=
// NORMAL
// =#========================================================================#=
/// Normal distribution strategy over [NormalStats].
///
/// # Example
/// ```
/// use rsamerge::stats::{Distribution, Normal};
///
/// let normal = Normal;
/// let mut params = normal.fit(&[1.0, 2.0, 3.0, 4.0])?;
/// assert!((normal.std(&params)? - 1.25f64.sqrt()).abs() < 1e-12);
///
/// // Merge of samples 1.0 and 2.0 into 1.5
/// normal.replace(&mut params, &[1.0, 2.0], &[1.5])?;
/// assert_eq!(params.n, 3);
/// # Ok::<(), rsamerge::RsaError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Normal;

impl Distribution for Normal {
    type Params = NormalStats;

    fn fit(&self, samples: &[f64]) -> Result<NormalStats, RsaError> {
        if samples.is_empty() {
            return Err(RsaError::invalid_input(
                "cannot fit a normal distribution to zero samples",
            ));
        }
        Ok(NormalStats::from_samples(samples))
    }

    fn std(&self, params: &NormalStats) -> Result<f64, RsaError> {
        params
            .variance()
            .map(f64::sqrt)
            .ok_or_else(|| RsaError::invalid_input("standard deviation of zero samples"))
    }

    fn mean(&self, params: &NormalStats) -> Result<f64, RsaError> {
        params
            .mean()
            .ok_or_else(|| RsaError::invalid_input("mean of zero samples"))
    }

    fn replace(&self, params: &mut NormalStats, remove: &[f64], add: &[f64]) -> Result<(), RsaError> {
        // n - |remove| + |add| < 0
        if params.n + add.len() < remove.len() {
            return Err(RsaError::invalid_state(format!(
                "removing {} samples from {} (adding {}) leaves a negative count",
                remove.len(),
                params.n,
                add.len()
            )));
        }

        let mut updated = *params;
        updated.n = params.n + add.len() - remove.len();
        for &x in remove {
            updated.s -= x;
            updated.q -= x * x;
        }
        for &x in add {
            updated.s += x;
            updated.q += x * x;
        }

        *params = updated;
        Ok(())
    }

    fn num_samples(&self, params: &NormalStats) -> usize {
        params.n
    }
}
