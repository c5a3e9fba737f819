//! Provides the arena representation of a root system architecture.
//!
//! * [AxeArena] - Axes of one or several plants, stored with the arena
//!   pattern, together with the [SegmentMap] describing their geometry.
//! * [ArenaAxeIter] - Iterator over `(id, axe)` pairs in insertion order.

use crate::error::RsaError;
use crate::model::axe::{Axe, AxeId, AxeType, PlantId, SegmentId};
use crate::model::rsa_builder::RsaBuilder;
use crate::model::segment_map::SegmentMap;
use std::collections::HashMap;

/// Float comparison tolerance
const EPSILON: f64 = 1e-7;

// =$========================================================================$=
// AXE ARENA
// =$========================================================================$=
/// A root system architecture represented using the arena pattern on [Axe].
///
/// Axes are stored in a contiguous vector and referenced by [AxeId], which
/// is their position in the arena. Parent links are ids too, so no axe holds
/// a reference to another.
///
/// # Structure
/// - Axes of all plants live in the same arena.
/// - Ids are assigned on [`AxeArena::add_axe`] and never change.
/// - Segment geometry is held by a [SegmentMap], axes only store ids.
/// - Iteration order (see [RsaBuilder::iter_axes]) is insertion order.
///
/// # Example
/// ```
/// use rsamerge::model::{Axe, AxeArena};
///
/// let mut rsa = AxeArena::new();
/// let s0 = rsa.add_segment(10.0);
/// let s1 = rsa.add_segment(90.0);
/// let s2 = rsa.add_segment(20.0);
///
/// let primary = rsa.add_axe(Axe::new(0, vec![s0, s1], 100.0, 100.0).with_order(1));
/// let lateral = rsa.add_axe(Axe::new(0, vec![s0, s2], 30.0, 20.0).with_order(2));
///
/// rsamerge::set_axe_type(&mut rsa)?;
/// assert_eq!(rsa[lateral].parent(), Some(primary));
/// assert!(rsa.is_valid_hierarchy());
/// # Ok::<(), rsamerge::RsaError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AxeArena {
    /// Axes of this RSA (arena pattern)
    axes: Vec<Axe>,

    /// Geometry of the segments axes refer to
    segments: SegmentMap,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl AxeArena {
    /// Creates a new empty RSA.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty RSA with capacity for the given numbers of
    /// axes and segments.
    pub fn with_capacity(num_axes: usize, num_segments: usize) -> Self {
        AxeArena {
            axes: Vec::with_capacity(num_axes),
            segments: SegmentMap::new(num_segments),
        }
    }

    /// Adds a segment of the given length, returning its id.
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn add_segment(&mut self, length: f64) -> SegmentId {
        self.segments.insert(length)
    }

    /// Adds an axe, assigning a unique id, which gets returned.
    pub fn add_axe(&mut self, mut axe: Axe) -> AxeId {
        let id = self.axes.len();
        axe.set_id(id);
        self.axes.push(axe);
        id
    }

    /// Returns a reference to the segment geometry.
    pub fn segments(&self) -> &SegmentMap {
        &self.segments
    }

    /// Returns the ids of all axes of the given plant, in insertion order.
    pub fn axes_of_plant(&self, plant: PlantId) -> impl Iterator<Item = AxeId> + '_ {
        self.axes
            .iter()
            .enumerate()
            .filter(move |(_, axe)| axe.plant() == plant)
            .map(|(id, _)| id)
    }

    /// Returns the id of the primary axe of the given plant,
    /// or `None` if hierarchy was not inferred or the plant is unknown.
    pub fn primary_of(&self, plant: PlantId) -> Option<AxeId> {
        self.axes_of_plant(plant).find(|&id| self.axes[id].is_primary())
    }

    /// Returns the ids of all lateral axes, in insertion order.
    pub fn laterals(&self) -> impl Iterator<Item = AxeId> + '_ {
        self.axes
            .iter()
            .enumerate()
            .filter(|(_, axe)| axe.is_lateral())
            .map(|(id, _)| id)
    }

    /// Returns the number of distinct plants.
    pub fn num_plants(&self) -> usize {
        let mut plants: Vec<PlantId> = self.axes.iter().map(|axe| axe.plant()).collect();
        plants.sort_unstable();
        plants.dedup();
        plants.len()
    }

    /// Validates the hierarchy assigned by
    /// [set_axe_type](crate::hierarchy::set_axe_type).
    ///
    /// Checks:
    /// - All axe ids match their position in the arena
    /// - Branch lengths do not exceed the length of their axe
    /// - Every axe is typed and every plant has exactly one primary axe
    /// - Primary axes have no parent and a zero offset
    /// - Lateral axes have a parent in bounds, which is a primary axe
    /// - Parent offsets do not exceed the length of the axe
    /// - All segments referred to are known
    ///
    /// # Returns
    /// `true` if the hierarchy is valid, `false` otherwise
    pub fn is_valid_hierarchy(&self) -> bool {
        let mut primaries_per_plant: HashMap<PlantId, usize> = HashMap::new();

        for (index, axe) in self.axes.iter().enumerate() {
            // Check axe id matches its arena position
            if axe.id() != Some(index) {
                return false;
            }

            if axe.branch_length() > axe.length() + EPSILON {
                return false;
            }

            // Check segments are known
            if !axe.segments().iter().all(|&s| self.segments.contains(s)) {
                return false;
            }

            let count = primaries_per_plant.entry(axe.plant()).or_insert(0);
            match axe.axe_type() {
                AxeType::Unset => return false,
                AxeType::Primary => {
                    *count += 1;
                    if axe.has_parent() || axe.parent_start_offset() != 0.0 {
                        return false;
                    }
                }
                AxeType::Lateral => {
                    let Some(parent) = axe.parent() else {
                        return false;
                    };
                    if parent >= self.axes.len() || !self.axes[parent].is_primary() {
                        return false;
                    }
                    if axe.parent_start_offset() > axe.length() + EPSILON {
                        return false;
                    }
                }
            }
        }

        primaries_per_plant.values().all(|&count| count == 1)
    }
}

impl RsaBuilder for AxeArena {
    type AxeIter<'a> = ArenaAxeIter<'a>;

    fn iter_axes(&self) -> ArenaAxeIter<'_> {
        ArenaAxeIter {
            inner: self.axes.iter().enumerate(),
        }
    }

    fn get_axe(&self, id: AxeId) -> Result<&Axe, RsaError> {
        self.axes.get(id).ok_or_else(|| RsaError::axe_not_found(id))
    }

    fn get_axe_mut(&mut self, id: AxeId) -> Result<&mut Axe, RsaError> {
        self.axes.get_mut(id).ok_or_else(|| RsaError::axe_not_found(id))
    }

    fn segment_length(&self, id: SegmentId) -> Result<f64, RsaError> {
        self.segments
            .get_length(id)
            .ok_or_else(|| RsaError::segment_not_found(id))
    }

    fn num_axes(&self) -> usize {
        self.axes.len()
    }
}

impl std::ops::Index<AxeId> for AxeArena {
    type Output = Axe;

    fn index(&self, index: AxeId) -> &Self::Output {
        &self.axes[index]
    }
}

impl std::ops::IndexMut<AxeId> for AxeArena {
    fn index_mut(&mut self, index: AxeId) -> &mut Self::Output {
        &mut self.axes[index]
    }
}

// ============================================================================
// Printing (pub)
// ============================================================================
impl AxeArena {
    /// Prints a visual representation of the hierarchy to the console.
    ///
    /// # Example Output
    /// ```text
    /// RSA with 3 axes on 1 plant(s):
    /// Plant 0
    ///   [0] Primary (length: 100.000)
    ///     └─ [1] Lateral (length: 30.000, branch: 20.000, offset: 10.000)
    /// Unattached:
    ///   [2] Unset (length: 5.000)
    /// ```
    pub fn print_hierarchy(&self) {
        let mut plants: Vec<PlantId> = self.axes.iter().map(|axe| axe.plant()).collect();
        plants.sort_unstable();
        plants.dedup();

        println!(
            "RSA with {} axes on {} plant(s):",
            self.axes.len(),
            plants.len()
        );

        for plant in plants {
            println!("Plant {}", plant);
            for id in self.axes_of_plant(plant) {
                if self.axes[id].is_primary() {
                    println!("  [{}] Primary (length: {:.3})", id, self.axes[id].length());
                    let children: Vec<AxeId> = self
                        .axes
                        .iter()
                        .enumerate()
                        .filter(|(_, axe)| axe.parent() == Some(id))
                        .map(|(child, _)| child)
                        .collect();
                    for (i, &child) in children.iter().enumerate() {
                        let connector = if i + 1 == children.len() { "└─ " } else { "├─ " };
                        let axe = &self.axes[child];
                        println!(
                            "    {}[{}] Lateral (length: {:.3}, branch: {:.3}, offset: {:.3})",
                            connector,
                            child,
                            axe.length(),
                            axe.branch_length(),
                            axe.parent_start_offset()
                        );
                    }
                }
            }
        }

        let unattached: Vec<&Axe> = self
            .axes
            .iter()
            .filter(|axe| axe.axe_type() == AxeType::Unset)
            .collect();
        if !unattached.is_empty() {
            println!("Unattached:");
            for axe in unattached {
                println!(
                    "  [{}] Unset (length: {:.3})",
                    axe.id().unwrap_or_default(),
                    axe.length()
                );
            }
        }
    }
}

// =$========================================================================$=
// ITERATOR
// =$========================================================================$=
/// Iterator over the `(id, axe)` pairs of an [AxeArena] in insertion order.
pub struct ArenaAxeIter<'a> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, Axe>>,
}

impl<'a> Iterator for ArenaAxeIter<'a> {
    type Item = (AxeId, &'a Axe);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
