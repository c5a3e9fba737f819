//! Segment geometry storage shared by all axes of an RSA.
//!
//! - `SegmentMap`: Maps segment ids to their geometric length.

use crate::model::axe::{Length, SegmentId};
use std::fmt;

// =#========================================================================#=
// SEGMENT MAP
// =#========================================================================#=
/// Stores the geometric length of each segment of an RSA graph.
///
/// Axes describe their path as a sequence of [SegmentId]s, several axes
/// sharing the leading segments of their paths. Overlaps between axes are
/// measured as cumulative length of shared segments, looked up here.
///
/// # Example
/// ```
/// use rsamerge::model::SegmentMap;
///
/// let mut segments = SegmentMap::new(3);
/// let s0 = segments.insert(2.5);
/// let s1 = segments.insert(1.0);
///
/// assert_eq!(segments.get_length(s0), Some(2.5));
/// assert_eq!(segments.path_length(&[s0, s1]), Some(3.5));
/// assert_eq!(segments.get_length(7), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SegmentMap {
    /// Length of each segment, indexed by id
    lengths: Vec<Length>,
}

impl SegmentMap {
    /// Creates a new SegmentMap with pre-allocated capacity.
    ///
    /// # Arguments
    /// * `num_segments` - Expected number of segments
    pub fn new(num_segments: usize) -> Self {
        SegmentMap {
            lengths: Vec::with_capacity(num_segments),
        }
    }

    /// Adds a segment and returns its id.
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn insert(&mut self, length: f64) -> SegmentId {
        let id = self.lengths.len();
        self.lengths.push(Length::new(length));
        id
    }

    /// Retrieves the length of a segment.
    ///
    /// # Returns
    /// `Some(length)` if the id is valid, `None` otherwise
    pub fn get_length(&self, id: SegmentId) -> Option<f64> {
        self.lengths.get(id).map(|length| **length)
    }

    /// Returns the cumulative length of a sequence of segments,
    /// or `None` if any of them is unknown.
    pub fn path_length(&self, path: &[SegmentId]) -> Option<f64> {
        path.iter().map(|&id| self.get_length(id)).sum()
    }

    /// Checks if a segment exists.
    pub fn contains(&self, id: SegmentId) -> bool {
        id < self.lengths.len()
    }

    /// Returns the number of segments currently stored.
    pub fn num_segments(&self) -> usize {
        self.lengths.len()
    }
}

impl fmt::Display for SegmentMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "SegmentMap ({} segments):", self.lengths.len())?;
        for (id, length) in self.lengths.iter().enumerate() {
            writeln!(f, "  [{}] {:.3}", id, **length)?;
        }
        Ok(())
    }
}

impl std::ops::Index<SegmentId> for SegmentMap {
    type Output = f64;

    fn index(&self, index: SegmentId) -> &Self::Output {
        &self.lengths[index]
    }
}
