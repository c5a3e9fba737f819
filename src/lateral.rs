//! Statistical model of lateral axes and merge evaluation.
//!
//! A [LateralAxisModel] fits a [Distribution] to the
//! [metric](crate::metric) values of all lateral axes of an RSA. Its
//! dispersion is the score a merge optimizer minimizes: a merge of two axes
//! into one is good if the lateral population afterwards looks more like a
//! single coherent distribution.
//!
//! # Merge evaluation
//! Trying a merge is speculative and cheap. [`LateralAxisModel::evaluate_merge`]
//! copies the parameters, removes the values of the two original axes, adds
//! the value of the merged candidate, and returns the resulting dispersion
//! together with the copy. The model's own parameters are untouched; the
//! caller commits an accepted merge with [`LateralAxisModel::update`] (or
//! [`LateralAxisModel::commit`]).
//!
//! ```text
//! fit(rsa) ──→ evaluate_merge(..)* ──→ update(best.params) ──→ evaluate_merge(..)* ──→ ...
//! ```

use crate::error::RsaError;
use crate::metric::{AxeMetric, ModelKey};
use crate::model::{Axe, AxeId, RsaBuilder};
use crate::stats::{Distribution, Normal};
use log::debug;

// =#========================================================================#=
// MERGE EVALUATION
// =#========================================================================#=
/// Outcome of a speculative merge, see [LateralAxisModel::evaluate_merge].
#[derive(Debug, Clone, PartialEq)]
pub struct MergeEvaluation<P> {
    /// Dispersion of the lateral population after the merge
    pub std: f64,
    /// Parameters the model would have after the merge
    pub params: P,
}

// =#========================================================================#=
// LATERAL AXIS MODEL
// =#========================================================================#=
/// Model of the lateral axes of an RSA, generic over the [Distribution]
/// strategy (default [Normal]).
///
/// Cloning a model deep-copies its parameters and measurement cache; the
/// clone shares no mutable state with the original.
///
/// # Example
/// ```
/// use rsamerge::model::{Axe, AxeArena};
/// use rsamerge::lateral::LateralAxisModel;
///
/// let mut rsa = AxeArena::new();
/// let s0 = rsa.add_segment(10.0);
/// let s1 = rsa.add_segment(90.0);
/// let s2 = rsa.add_segment(20.0);
/// rsa.add_axe(Axe::new(0, vec![s0, s1], 100.0, 100.0).with_order(1));
/// rsa.add_axe(Axe::new(0, vec![s0, s2], 30.0, 20.0));
/// rsamerge::set_axe_type(&mut rsa)?;
///
/// let mut model = LateralAxisModel::new();
/// model.fit(&rsa)?;
/// assert_eq!(model.value()?, 0.0);
/// # Ok::<(), rsamerge::RsaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LateralAxisModel<D: Distribution = Normal> {
    /// Distribution strategy
    distribution: D,
    /// Fitted parameters; `None` until fitted
    params: Option<D::Params>,
    /// Memoized axe measurements
    metric: AxeMetric,
    /// Identity of this model in the measurement cache
    key: ModelKey,
}

impl LateralAxisModel<Normal> {
    /// Creates an unfitted model using the [Normal] distribution.
    pub fn new() -> Self {
        Self::with_distribution(Normal)
    }

    /// Returns a builder to configure a model.
    pub fn builder() -> LateralModelBuilder<Normal> {
        LateralModelBuilder::new()
    }
}

impl Default for LateralAxisModel<Normal> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Distribution> LateralAxisModel<D> {
    /// Creates an unfitted model using the given distribution strategy.
    pub fn with_distribution(distribution: D) -> Self {
        LateralAxisModel {
            distribution,
            params: None,
            metric: AxeMetric::new(),
            key: ModelKey::fresh(),
        }
    }

    /// Fits the distribution to the measurements of all lateral axes.
    ///
    /// Starts from an empty measurement cache, so a model can be fitted on
    /// several builders in turn.
    ///
    /// # Errors
    /// - `InvalidInput` if `builder` holds no lateral axe
    /// - Any error of [AxeMetric::axe_measurement] on a lateral axe
    pub fn fit<B: RsaBuilder>(&mut self, builder: &B) -> Result<(), RsaError> {
        self.metric.invalidate_all();
        let laterals: Vec<AxeId> = builder
            .iter_axes()
            .filter(|(_, axe)| axe.is_lateral())
            .map(|(id, _)| id)
            .collect();
        if laterals.is_empty() {
            return Err(RsaError::invalid_input("no lateral axe to fit model on"));
        }

        let samples = self
            .metric
            .axes_measurement(&laterals, self.key, builder)
            .collect::<Result<Vec<f64>, RsaError>>()?;

        let params = self.distribution.fit(&samples)?;
        debug!(
            "LateralAxisModel::fit {}: {} lateral axes -> {:?}",
            self.key,
            samples.len(),
            params
        );
        self.params = Some(params);
        Ok(())
    }

    /// Fits again, e.g. after the hierarchy of `builder` changed.
    /// Same as [fit](LateralAxisModel::fit).
    pub fn refit<B: RsaBuilder>(&mut self, builder: &B) -> Result<(), RsaError> {
        self.fit(builder)
    }

    /// Returns the current dispersion, the score to minimize.
    ///
    /// # Errors
    /// Fails with `InvalidState` if the model is not fitted.
    pub fn value(&self) -> Result<f64, RsaError> {
        self.distribution.std(self.fitted_params()?)
    }

    /// Returns the current central tendency of the modelled variable.
    ///
    /// # Errors
    /// Fails with `InvalidState` if the model is not fitted.
    pub fn mean(&self) -> Result<f64, RsaError> {
        self.distribution.mean(self.fitted_params()?)
    }

    /// Evaluates merging `axe1` and `axe2` into the candidate `merged`.
    ///
    /// `merged` is a fully formed axe supplied by the caller, not part of
    /// `builder`; its value is computed against the parent it names.
    /// Neither the parameters of this model nor `builder` are changed; only
    /// the measurements of `axe1` and `axe2` get cached.
    ///
    /// # Errors
    /// - `InvalidState` if the model is not fitted, or the merge would
    ///   remove more samples than the model holds
    /// - `InvalidInput` if the merge leaves no sample
    /// - Any error of [AxeMetric::axe_measurement] on the three axes
    pub fn evaluate_merge<B: RsaBuilder>(
        &self,
        builder: &B,
        axe1: AxeId,
        axe2: AxeId,
        merged: &Axe,
    ) -> Result<MergeEvaluation<D::Params>, RsaError> {
        let v1 = self.metric.axe_measurement(axe1, self.key, builder)?;
        let v2 = self.metric.axe_measurement(axe2, self.key, builder)?;
        let v_merged = AxeMetric::measure(merged, builder)?;

        let mut params = self.fitted_params()?.clone();
        self.distribution.replace(&mut params, &[v1, v2], &[v_merged])?;
        let std = self.distribution.std(&params)?;

        debug!(
            "LateralAxisModel::evaluate_merge {}: ({axe1}: {v1:.4}, {axe2}: {v2:.4}) -> {v_merged:.4}, std {std:.4}",
            self.key
        );
        Ok(MergeEvaluation { std, params })
    }

    /// Replaces the parameters wholesale, e.g. with those of an accepted
    /// [MergeEvaluation].
    pub fn update(&mut self, params: D::Params) {
        self.params = Some(params);
    }

    /// Commits an accepted merge evaluation.
    pub fn commit(&mut self, evaluation: MergeEvaluation<D::Params>) {
        self.update(evaluation.params);
    }

    /// Drops the cached measurement of an axe, e.g. after its parent or
    /// geometry changed.
    pub fn invalidate(&mut self, id: AxeId) {
        self.metric.invalidate(id);
    }

    /// Returns the fitted parameters, or `None` if not fitted.
    pub fn params(&self) -> Option<&D::Params> {
        self.params.as_ref()
    }

    /// Returns the number of samples the model holds (0 if not fitted).
    pub fn num_samples(&self) -> usize {
        self.params
            .as_ref()
            .map_or(0, |params| self.distribution.num_samples(params))
    }

    /// Returns the distribution strategy.
    pub fn distribution(&self) -> &D {
        &self.distribution
    }

    /// Returns the cache key of this model.
    pub fn key(&self) -> ModelKey {
        self.key
    }

    /// Returns the measurement cache.
    pub fn metric(&self) -> &AxeMetric {
        &self.metric
    }

    /// Returns an independent copy of this model.
    pub fn copy(&self) -> Self
    where
        D: Clone,
    {
        self.clone()
    }

    fn fitted_params(&self) -> Result<&D::Params, RsaError> {
        self.params
            .as_ref()
            .ok_or_else(|| RsaError::invalid_state("lateral axis model is not fitted"))
    }
}

// =#========================================================================#=
// LATERAL MODEL BUILDER
// =#========================================================================#=
/// Builder to configure a [LateralAxisModel].
///
/// # Example
/// ```
/// use rsamerge::lateral::LateralAxisModel;
/// use rsamerge::metric::ModelKey;
/// use rsamerge::stats::Normal;
///
/// let key = ModelKey::fresh();
/// let model = LateralAxisModel::builder()
///     .with_distribution(Normal)
///     .with_key(key)
///     .build();
/// assert_eq!(model.key(), key);
/// ```
#[derive(Debug, Clone)]
pub struct LateralModelBuilder<D> {
    distribution: D,
    key: Option<ModelKey>,
}

impl LateralModelBuilder<Normal> {
    /// Creates a builder with the [Normal] distribution and a fresh key.
    pub fn new() -> Self {
        LateralModelBuilder {
            distribution: Normal,
            key: None,
        }
    }
}

impl Default for LateralModelBuilder<Normal> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Distribution> LateralModelBuilder<D> {
    /// Sets the distribution strategy.
    pub fn with_distribution<E: Distribution>(self, distribution: E) -> LateralModelBuilder<E> {
        LateralModelBuilder {
            distribution,
            key: self.key,
        }
    }

    /// Sets the cache key, e.g. to keep it stable across rebuilt models.
    pub fn with_key(mut self, key: ModelKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Builds the unfitted model.
    pub fn build(self) -> LateralAxisModel<D> {
        let mut model = LateralAxisModel::with_distribution(self.distribution);
        if let Some(key) = self.key {
            model.key = key;
        }
        model
    }
}
