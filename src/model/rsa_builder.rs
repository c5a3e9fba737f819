//! Trait for the storage of axes and segment geometry of an RSA.
//!
//! The [`RsaBuilder`] trait decouples hierarchy inference and lateral axe
//! models from a concrete representation of a root system architecture.
//! Whatever extracts axes from images stores them in a builder, and the
//! algorithms of this crate only iterate, look up and (for hierarchy
//! inference) retype the axes through this contract.
//!
//! # Access pattern
//! ```text
//! load axes ──→ set_axe_type() ──→ LateralAxisModel::fit() ──→ evaluate_merge()* / update()
//!               (mutates type,      (reads type, parent)        (reads only)
//!                parent, offset)
//! ```
//! Callers must serialize access: hierarchy inference must not run while a
//! model reads the same builder.
//!
//! # Built-in implementation
//! * [`AxeArena`](crate::model::AxeArena) - arena of axes plus a
//!   [`SegmentMap`](crate::model::SegmentMap)
//!
//! # Custom implementations
//! You can implement [`RsaBuilder`] on your own RSA representation to reuse
//! the algorithms without adopting this crate's storage.

use crate::error::RsaError;
use crate::model::axe::{Axe, AxeId, SegmentId};

// =#========================================================================#=
// RSA BUILDER (trait)
// =#========================================================================T=
/// Abstraction over the storage of axes of one or several plants.
pub trait RsaBuilder {
    /// Iterator over all `(id, axe)` pairs.
    type AxeIter<'a>: Iterator<Item = (AxeId, &'a Axe)>
    where
        Self: 'a;

    /// Returns an iterator covering every axe exactly once.
    ///
    /// No stable order is required by the contract, but hierarchy inference
    /// breaks ties by this order, so implementations should keep it
    /// deterministic.
    fn iter_axes(&self) -> Self::AxeIter<'_>;

    /// Returns the axe with the given id.
    ///
    /// # Errors
    /// Fails with `NotFound` if no axe has this id.
    fn get_axe(&self, id: AxeId) -> Result<&Axe, RsaError>;

    /// Returns the axe with the given id for retyping.
    ///
    /// # Errors
    /// Fails with `NotFound` if no axe has this id.
    fn get_axe_mut(&mut self, id: AxeId) -> Result<&mut Axe, RsaError>;

    /// Returns the geometric length of a segment.
    ///
    /// # Errors
    /// Fails with `NotFound` if the segment is unknown.
    fn segment_length(&self, id: SegmentId) -> Result<f64, RsaError>;

    /// Returns the number of axes.
    fn num_axes(&self) -> usize {
        self.iter_axes().count()
    }
}
