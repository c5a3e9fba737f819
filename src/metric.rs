//! Geometric merge-affinity of an axe to its parent.
//!
//! The value modelled by lateral axe models is
//! ```text
//! overlap  = axe.length - axe.branch_length
//! tip_dist = parent.length - overlap
//! value    = (tip_dist - axe.branch_length) / parent.length
//! ```
//! that is, the distance from the branching point to the parent's tip minus
//! the axe's own branch length, relative to the parent's length.
//!
//! [AxeMetric] memoizes values per `(axe id, model key)` in an explicit map
//! it owns, so axes carry no cached state and invalidation (e.g. after a
//! parent changed) is an explicit call. The map is filled through `&self`,
//! so read-only callers such as merge evaluation can share a metric.
//! Being a [RefCell], it is not `Sync`.

use crate::error::RsaError;
use crate::model::{Axe, AxeId, RsaBuilder};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MODEL_KEY: AtomicU64 = AtomicU64::new(0);

/// Identity of an independently parameterized model, used to keep cached
/// measurements of different models apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelKey(u64);

impl ModelKey {
    /// Returns a key not returned before in this process.
    pub fn fresh() -> Self {
        ModelKey(NEXT_MODEL_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "model#{}", self.0)
    }
}

/// Computes the merge-affinity value of `axe` with respect to `parent`.
///
/// # Errors
/// Fails with `DivisionUndefined` if `parent` has zero length.
///
/// # Example
/// ```
/// use rsamerge::metric::axe_value;
/// use rsamerge::model::Axe;
///
/// let parent = Axe::new(0, vec![], 100.0, 100.0);
/// let lateral = Axe::new(0, vec![], 30.0, 20.0);
/// assert!((axe_value(&lateral, &parent)? - 0.7).abs() < 1e-12);
/// # Ok::<(), rsamerge::RsaError>(())
/// ```
pub fn axe_value(axe: &Axe, parent: &Axe) -> Result<f64, RsaError> {
    let parent_length = parent.length();
    if parent_length == 0.0 {
        return Err(RsaError::division_undefined(format!(
            "parent {} of axe {} has zero length",
            fmt_id(parent.id()),
            fmt_id(axe.id())
        )));
    }

    let tip_dist = parent_length - axe.overlap();
    Ok((tip_dist - axe.branch_length()) / parent_length)
}

fn fmt_id(id: Option<AxeId>) -> String {
    id.map_or_else(|| "<candidate>".to_string(), |id| id.to_string())
}

// =#========================================================================#=
// AXE METRIC
// =#========================================================================#=
/// Memoizing evaluator of [axe_value] over axes of an [RsaBuilder].
///
/// Caching is an optimization only: a value is computed from the builder
/// state on first request and identical on recomputation, as long as the
/// axe and its parent are not changed. After changing them, call
/// [invalidate](AxeMetric::invalidate). Ids are only meaningful within one
/// builder: before measuring axes of another builder, call
/// [invalidate_all](AxeMetric::invalidate_all).
#[derive(Debug, Clone, Default)]
pub struct AxeMetric {
    cache: RefCell<HashMap<(AxeId, ModelKey), f64>>,
}

impl AxeMetric {
    /// Creates a metric with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the measurement of axe `id` for model `key`, computing and
    /// caching it on first request.
    ///
    /// # Errors
    /// - `NotFound` if the axe or its parent is unknown to `builder`
    /// - `InvalidState` if the axe has no parent
    /// - `DivisionUndefined` if the parent has zero length
    pub fn axe_measurement<B: RsaBuilder>(
        &self,
        id: AxeId,
        key: ModelKey,
        builder: &B,
    ) -> Result<f64, RsaError> {
        if let Some(value) = self.cached(id, key) {
            return Ok(value);
        }

        let value = Self::measure(builder.get_axe(id)?, builder)?;
        self.cache.borrow_mut().insert((id, key), value);
        Ok(value)
    }

    /// Computes the measurement of an axe against the parent it names,
    /// resolved via `builder`, without touching any cache.
    ///
    /// Used for merge candidates, which are not part of the builder.
    pub fn measure<B: RsaBuilder>(axe: &Axe, builder: &B) -> Result<f64, RsaError> {
        let parent_id = axe.parent().ok_or_else(|| {
            RsaError::invalid_state(format!("axe {} has no parent", fmt_id(axe.id())))
        })?;
        axe_value(axe, builder.get_axe(parent_id)?)
    }

    /// Returns a lazy iterator of the measurements of `ids`, in order.
    pub fn axes_measurement<'a, B: RsaBuilder>(
        &'a self,
        ids: &'a [AxeId],
        key: ModelKey,
        builder: &'a B,
    ) -> MeasurementIter<'a, B> {
        MeasurementIter {
            metric: self,
            ids: ids.iter(),
            key,
            builder,
        }
    }

    /// Returns the cached value of axe `id` for model `key`, if any.
    pub fn cached(&self, id: AxeId, key: ModelKey) -> Option<f64> {
        self.cache.borrow().get(&(id, key)).copied()
    }

    /// Drops cached values of axe `id`, for all models.
    pub fn invalidate(&mut self, id: AxeId) {
        self.cache
            .get_mut()
            .retain(|&(cached_id, _), _| cached_id != id);
    }

    /// Drops all cached values.
    pub fn invalidate_all(&mut self) {
        self.cache.get_mut().clear();
    }

    /// Returns the number of cached values.
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }
}

// =#========================================================================#=
// ITERATOR
// =#========================================================================#=
/// Lazy sequence of measurements, see [AxeMetric::axes_measurement].
///
/// Finite and single-pass; call `axes_measurement` again to restart.
pub struct MeasurementIter<'a, B> {
    metric: &'a AxeMetric,
    ids: std::slice::Iter<'a, AxeId>,
    key: ModelKey,
    builder: &'a B,
}

impl<B: RsaBuilder> Iterator for MeasurementIter<'_, B> {
    type Item = Result<f64, RsaError>;

    fn next(&mut self) -> Option<Self::Item> {
        let &id = self.ids.next()?;
        Some(self.metric.axe_measurement(id, self.key, self.builder))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}
