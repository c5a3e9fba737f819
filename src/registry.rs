//! Registry of the known lateral axe models.
//!
//! Models are selected by name through [get_model] (or [ModelKind]'s
//! [FromStr] implementation). Names are matched case-insensitively.

use crate::error::RsaError;
use crate::lateral::LateralAxisModel;
use crate::stats::Normal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known kinds of lateral axe models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    /// Arabidopsis: normal distribution over the metric of lateral axes
    Arabidopsis,
}

impl ModelKind {
    /// All known kinds.
    pub const ALL: [ModelKind; 1] = [ModelKind::Arabidopsis];

    /// Returns the canonical name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Arabidopsis => "arabidopsis",
        }
    }

    /// Creates a new unfitted model of this kind, with its own cache key.
    pub fn build(&self) -> LateralAxisModel<Normal> {
        match self {
            ModelKind::Arabidopsis => LateralAxisModel::with_distribution(Normal),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ModelKind {
    type Err = RsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RsaError::unrecognized_model(s))
    }
}

/// Returns a new unfitted model for a recognized model name.
///
/// # Errors
/// Fails with `UnrecognizedModel` if `name` is not known.
///
/// # Example
/// ```
/// use rsamerge::get_model;
///
/// assert!(get_model("Arabidopsis").is_ok());
/// assert!(get_model("rice").is_err());
/// ```
pub fn get_model(name: &str) -> Result<LateralAxisModel<Normal>, RsaError> {
    Ok(name.parse::<ModelKind>()?.build())
}
