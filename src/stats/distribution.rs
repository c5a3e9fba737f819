//! Strategy trait for incrementally updatable univariate distributions.
//!
//! A [`Distribution`] is passed into a
//! [`LateralAxisModel`](crate::lateral::LateralAxisModel) to fit the
//! modelled variable. The distribution itself is stateless; everything it
//! learns lives in its [`Params`](Distribution::Params) value, which the
//! model owns, copies for speculative merge evaluations, and replaces
//! wholesale when a merge is committed.

use crate::error::RsaError;
use std::fmt::Debug;

// =#========================================================================#=
// DISTRIBUTION (trait)
// =#========================================================================T=
/// Univariate distribution supporting fit, dispersion and exact in-place
/// replacement of samples.
///
/// # Implementing this trait
/// [`replace`](Self::replace) must not require the raw sample set: merge
/// evaluation removes two samples and adds one on a copy of the parameters,
/// repeatedly, without access to history.
pub trait Distribution {
    /// Sufficient statistics of a fitted distribution.
    ///
    /// Copied (never shared) into speculative contexts.
    type Params: Clone + Debug + PartialEq;

    /// Fits the distribution to the given samples.
    ///
    /// # Errors
    /// Fails with `InvalidInput` if `samples` is empty.
    fn fit(&self, samples: &[f64]) -> Result<Self::Params, RsaError>;

    /// Returns the standard deviation of the fitted distribution.
    ///
    /// # Errors
    /// Fails with `InvalidInput` if the parameters hold no samples.
    fn std(&self, params: &Self::Params) -> Result<f64, RsaError>;

    /// Returns the mean of the fitted distribution.
    ///
    /// # Errors
    /// Fails with `InvalidInput` if the parameters hold no samples.
    fn mean(&self, params: &Self::Params) -> Result<f64, RsaError>;

    /// Removes the samples `remove` and adds the samples `add`, in place.
    ///
    /// On failure, `params` is left unchanged.
    ///
    /// # Errors
    /// Fails with `InvalidState` if more samples would be removed than held.
    fn replace(&self, params: &mut Self::Params, remove: &[f64], add: &[f64]) -> Result<(), RsaError>;

    /// Returns the number of samples the parameters hold.
    fn num_samples(&self, params: &Self::Params) -> usize;
}
