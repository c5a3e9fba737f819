//! Inference of the axe hierarchy (primary/lateral, parent links) of an RSA.
//!
//! [set_axe_type] runs once on a freshly loaded builder, before any model is
//! fitted. It infers one tree per plant purely from geometry:
//! 1. Per plant, the longest axe with order hint 1 becomes the primary axe.
//! 2. Every other axe becomes lateral. Its parent is the primary axe sharing
//!    the longest leading run of segments with it (first strictly longer
//!    overlap wins), falling back to its own plant's primary axe.
//!
//! Order hints other than 1 are ignored, so axes whose recorded order
//! disagrees with their geometric attachment are still parented correctly.

use crate::error::RsaError;
use crate::model::{AxeId, AxeType, PlantId, RsaBuilder, SegmentId};
use log::debug;
use std::collections::HashMap;

/// Returns the cumulative length of the common leading segments of two
/// paths.
///
/// # Errors
/// Fails with `NotFound` if a shared segment is unknown to `builder`.
pub fn shared_prefix_length<B: RsaBuilder>(
    builder: &B,
    path1: &[SegmentId],
    path2: &[SegmentId],
) -> Result<f64, RsaError> {
    path1
        .iter()
        .zip(path2)
        .take_while(|(s1, s2)| s1 == s2)
        .map(|(&segment, _)| builder.segment_length(segment))
        .sum()
}

/// Assignment of one axe, computed before anything is written.
struct Assignment {
    id: AxeId,
    axe_type: AxeType,
    parent: Option<AxeId>,
    offset: f64,
}

/// Assigns primary/lateral types, parents and parent offsets to all axes.
///
/// # Errors
/// - `MissingPrimary` if a plant has no axe with order hint 1; nothing is
///   written in that case
/// - `NotFound` if an axe refers to an unknown segment
///
/// # Example
/// ```
/// use rsamerge::model::{Axe, AxeArena, AxeType};
/// use rsamerge::hierarchy::set_axe_type;
///
/// let mut rsa = AxeArena::new();
/// let trunk = rsa.add_segment(5.0);
/// let tip = rsa.add_segment(5.0);
/// let side = rsa.add_segment(3.0);
/// let primary = rsa.add_axe(Axe::new(7, vec![trunk, tip], 10.0, 10.0).with_order(1));
/// let lateral = rsa.add_axe(Axe::new(7, vec![trunk, side], 8.0, 3.0).with_order(2));
///
/// set_axe_type(&mut rsa)?;
/// assert_eq!(rsa[primary].axe_type(), AxeType::Primary);
/// assert_eq!(rsa[lateral].parent(), Some(primary));
/// assert_eq!(rsa[lateral].parent_start_offset(), 5.0);
/// # Ok::<(), rsamerge::RsaError>(())
/// ```
pub fn set_axe_type<B: RsaBuilder>(builder: &mut B) -> Result<(), RsaError> {
    let ids: Vec<AxeId> = builder.iter_axes().map(|(id, _)| id).collect();

    // Longest order-1 candidate per plant; first one wins ties
    let mut plants: Vec<PlantId> = Vec::new();
    let mut best: HashMap<PlantId, (AxeId, f64)> = HashMap::new();
    for &id in &ids {
        let axe = builder.get_axe(id)?;
        let plant = axe.plant();
        if !plants.contains(&plant) {
            plants.push(plant);
        }
        if !axe.is_primary_candidate() {
            continue;
        }
        match best.get(&plant) {
            Some(&(_, length)) if length >= axe.length() => {}
            _ => {
                best.insert(plant, (id, axe.length()));
            }
        }
    }

    let mut primary_of_plant: HashMap<PlantId, AxeId> = HashMap::with_capacity(plants.len());
    for &plant in &plants {
        let &(primary, _) = best.get(&plant).ok_or_else(|| RsaError::missing_primary(plant))?;
        primary_of_plant.insert(plant, primary);
    }

    // Primaries in builder iteration order, for tie-breaking
    let primaries: Vec<AxeId> = ids
        .iter()
        .copied()
        .filter(|id| primary_of_plant.values().any(|p| p == id))
        .collect();

    let mut assignments = Vec::with_capacity(ids.len());
    for &id in &ids {
        if primaries.contains(&id) {
            assignments.push(Assignment {
                id,
                axe_type: AxeType::Primary,
                parent: None,
                offset: 0.0,
            });
            continue;
        }

        let axe = builder.get_axe(id)?;
        let mut parent = primary_of_plant[&axe.plant()];
        let mut offset = 0.0;
        for &primary in &primaries {
            let overlap =
                shared_prefix_length(builder, axe.segments(), builder.get_axe(primary)?.segments())?;
            if overlap > offset {
                parent = primary;
                offset = overlap;
            }
        }

        assignments.push(Assignment {
            id,
            axe_type: AxeType::Lateral,
            parent: Some(parent),
            offset,
        });
    }

    for assignment in assignments {
        let axe = builder.get_axe_mut(assignment.id)?;
        axe.set_parent(assignment.parent, assignment.offset);
        axe.set_type(assignment.axe_type);
    }

    debug!(
        "set_axe_type: {} plants, {} primary and {} lateral axes",
        plants.len(),
        primaries.len(),
        ids.len() - primaries.len()
    );
    Ok(())
}
