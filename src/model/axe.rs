//! Axe module for root system architecture representation.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Index of an axe in an RSA builder (arena).
pub type AxeId = usize;

/// Identifier of the plant an axe belongs to.
pub type PlantId = usize;

/// Identifier of a geometric segment of the RSA graph.
pub type SegmentId = usize;

/// Until added to a builder, an axe has no id.
const NO_ID_SET: AxeId = usize::MAX;

/// Order hint of axes that may become the primary axe of their plant.
pub const PRIMARY_ORDER: u8 = 1;

// =#========================================================================#=
// AXE TYPE
// =#========================================================================#=
/// Role of an axe in the hierarchy of its plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxeType {
    /// Not typed yet, see [set_axe_type](crate::hierarchy::set_axe_type)
    #[default]
    Unset,
    /// Main root of a plant, has no parent
    Primary,
    /// Any other axe, attached to a primary axe
    Lateral,
}

// =#========================================================================#=
// AXE
// =#========================================================================#=
/// A single traced root branch (polyline) within a plant.
///
/// The path of an axe is given as ordered [SegmentId]s from the plant's
/// origin to the axe's tip. Geometry of the segments is owned by the
/// builder holding the axe, see [RsaBuilder](crate::model::RsaBuilder).
///
/// # Invariants
/// - `length` and `branch_length` are non-negative (enforced by [Length])
/// - `branch_length <= length` (enforced, also on deserialization)
/// - `parent_start_offset` is non-negative (enforced by [Length])
/// - After hierarchy inference, `parent` is `None` iff type is `Primary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AxeRecord", into = "AxeRecord")]
pub struct Axe {
    /// Index of this axe in its builder; `NO_ID_SET` until added
    id: AxeId,
    /// Plant this axe belongs to
    plant: PlantId,
    /// Path from the plant's origin to the tip of this axe
    segments: Vec<SegmentId>,
    /// Length from origin to tip, including overlap with parent
    length: Length,
    /// Length of the part not shared with the parent
    branch_length: Length,
    /// Upstream order hint, only used to filter primary candidates
    order: Option<u8>,
    /// Role assigned by hierarchy inference
    axe_type: AxeType,
    /// Parent axe, `None` for primary (and untyped) axes
    parent: Option<AxeId>,
    /// Overlap length used to attach this axe to its parent's path
    parent_start_offset: Length,
}

impl Axe {
    /// Creates a new untyped axe without parent.
    ///
    /// # Arguments
    /// * `plant` - Plant this axe belongs to
    /// * `segments` - Ordered segments from plant origin to tip
    /// * `length` - Total length from origin to tip
    /// * `branch_length` - Length not shared with the parent
    ///
    /// # Panics
    /// Panics if a length is negative or not finite,
    /// or if `branch_length` exceeds `length`.
    pub fn new(plant: PlantId, segments: Vec<SegmentId>, length: f64, branch_length: f64) -> Self {
        assert!(
            branch_length <= length,
            "Branch length {} must not exceed axe length {}",
            branch_length,
            length
        );
        Axe {
            id: NO_ID_SET,
            plant,
            segments,
            length: Length::new(length),
            branch_length: Length::new(branch_length),
            order: None,
            axe_type: AxeType::Unset,
            parent: None,
            parent_start_offset: Length::ZERO,
        }
    }

    /// Attaches an order hint to this axe.
    pub fn with_order(mut self, order: u8) -> Self {
        self.order = Some(order);
        self
    }

    /// Attaches a parent to this axe, e.g. for a merge candidate
    /// that is not part of any builder.
    pub fn with_parent(mut self, parent: AxeId, offset: f64) -> Self {
        self.set_parent(Some(parent), offset);
        self
    }

    /// Returns the id of this axe, or `None` if not added to a builder yet.
    pub fn id(&self) -> Option<AxeId> {
        if self.id == NO_ID_SET {
            None
        } else {
            Some(self.id)
        }
    }

    /// Sets the id; done by the builder when the axe gets added.
    pub(crate) fn set_id(&mut self, id: AxeId) {
        self.id = id;
    }

    /// Returns the plant of this axe.
    pub fn plant(&self) -> PlantId {
        self.plant
    }

    /// Returns the segments from origin to tip.
    pub fn segments(&self) -> &[SegmentId] {
        &self.segments
    }

    /// Returns the length from origin to tip.
    pub fn length(&self) -> f64 {
        *self.length
    }

    /// Returns the length of the part not shared with the parent.
    pub fn branch_length(&self) -> f64 {
        *self.branch_length
    }

    /// Returns the part of the path shared with the parent.
    pub fn overlap(&self) -> f64 {
        *self.length - *self.branch_length
    }

    /// Returns the order hint, if any.
    pub fn order(&self) -> Option<u8> {
        self.order
    }

    /// Returns `true` if this axe may be selected as primary axe.
    pub fn is_primary_candidate(&self) -> bool {
        self.order == Some(PRIMARY_ORDER)
    }

    /// Returns the type of this axe.
    pub fn axe_type(&self) -> AxeType {
        self.axe_type
    }

    /// Returns `true` if this axe is typed primary.
    pub fn is_primary(&self) -> bool {
        self.axe_type == AxeType::Primary
    }

    /// Returns `true` if this axe is typed lateral.
    pub fn is_lateral(&self) -> bool {
        self.axe_type == AxeType::Lateral
    }

    /// Returns the parent id, `None` for primary and untyped axes.
    pub fn parent(&self) -> Option<AxeId> {
        self.parent
    }

    /// Returns `true` if this axe has a parent set.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Returns the overlap length used to attach this axe to its parent.
    pub fn parent_start_offset(&self) -> f64 {
        *self.parent_start_offset
    }

    /// Sets the parent and the attachment offset.
    ///
    /// # Panics
    /// Panics if `offset` is negative or not finite.
    pub fn set_parent(&mut self, parent: Option<AxeId>, offset: f64) {
        self.parent = parent;
        self.parent_start_offset = Length::new(offset);
    }

    /// Sets the type of this axe.
    pub fn set_type(&mut self, axe_type: AxeType) {
        self.axe_type = axe_type;
    }
}

// =#========================================================================#=
// AXE RECORD
// =#========================================================================#=
/// Serialized form of an [Axe], checked on conversion back.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AxeRecord {
    id: Option<AxeId>,
    plant: PlantId,
    segments: Vec<SegmentId>,
    length: Length,
    branch_length: Length,
    #[serde(default)]
    order: Option<u8>,
    #[serde(default)]
    axe_type: AxeType,
    #[serde(default)]
    parent: Option<AxeId>,
    #[serde(default = "zero_length")]
    parent_start_offset: Length,
}

fn zero_length() -> Length {
    Length::ZERO
}

impl From<Axe> for AxeRecord {
    fn from(axe: Axe) -> Self {
        AxeRecord {
            id: axe.id(),
            plant: axe.plant,
            segments: axe.segments,
            length: axe.length,
            branch_length: axe.branch_length,
            order: axe.order,
            axe_type: axe.axe_type,
            parent: axe.parent,
            parent_start_offset: axe.parent_start_offset,
        }
    }
}

impl TryFrom<AxeRecord> for Axe {
    type Error = String;

    fn try_from(record: AxeRecord) -> Result<Self, Self::Error> {
        if *record.branch_length > *record.length {
            return Err(format!(
                "Branch length {} must not exceed axe length {}",
                *record.branch_length, *record.length
            ));
        }
        if record.id == Some(NO_ID_SET) {
            return Err(format!("Axe id {} is reserved", NO_ID_SET));
        }
        Ok(Axe {
            id: record.id.unwrap_or(NO_ID_SET),
            plant: record.plant,
            segments: record.segments,
            length: record.length,
            branch_length: record.branch_length,
            order: record.order,
            axe_type: record.axe_type,
            parent: record.parent,
            parent_start_offset: record.parent_start_offset,
        })
    }
}

// =#========================================================================#=
// LENGTH
// =#========================================================================#=
/// Geometric length along an axe, enforced non-negative.
///
/// The value is guaranteed to be non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Length(f64);

impl Length {
    /// Zero length.
    pub const ZERO: Length = Length(0.0);

    /// Creates a new length.
    ///
    /// # Arguments
    /// * `length` - The length value (must be non-negative)
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        assert!(length >= 0.0, "Length must be non-negative, got {}", length);
        assert!(length.is_finite(), "Length must be finite, got {}", length);
        Length(length)
    }
}

impl Deref for Length {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl TryFrom<f64> for Length {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value >= 0.0 && value.is_finite() {
            Ok(Length(value))
        } else {
            Err(format!("Length must be non-negative and finite, got {value}"))
        }
    }
}

impl From<Length> for f64 {
    fn from(value: Length) -> Self {
        value.0
    }
}
