//! Error types for hierarchy inference and lateral axe modelling.
//!
//! This module provides [RsaError] and [RsaErrorType] for representing
//! and reporting errors that occur while working on a root system
//! architecture (RSA). None of them is recoverable within the crate: they
//! indicate a malformed builder or a misuse of a model and are propagated
//! to the caller, which decides whether to skip a plant/axe or abort.

use crate::model::{AxeId, PlantId};
use std::error::Error;
use std::fmt;

// =#========================================================================#=
// RSA ERROR TYPE
// =#========================================================================€=
/// Error types that can occur while typing axes or evaluating models.
#[derive(thiserror::Error, PartialEq, Debug, Clone)]
pub enum RsaErrorType {
    /// Empty sample set, no lateral axe to fit on, or similar
    #[error("Invalid input")]
    InvalidInput,
    /// Statistics or model used in a state they cannot be in
    #[error("Invalid state")]
    InvalidState,
    /// Ratio with a zero denominator (e.g. zero-length parent axe)
    #[error("Division undefined")]
    DivisionUndefined,
    /// Lookup of a nonexistent axe or segment
    #[error("Not found")]
    NotFound,
    /// Model name not known to the registry
    #[error("Unrecognized model")]
    UnrecognizedModel,
    /// Plant without any primary axe candidate
    #[error("Missing primary axe")]
    MissingPrimary,
}

// =#========================================================================#=
// RSA ERROR
// =#========================================================================$=
/// Error with its [RsaErrorType] and a message on what went wrong.
#[derive(Debug, Clone, PartialEq)]
pub struct RsaError {
    kind: RsaErrorType,
    context: String,
}

impl RsaError {
    /// Create an RsaError from an error type and a context message
    pub fn new(kind: RsaErrorType, context: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.into(),
        }
    }

    /// Convenience constructor for InvalidInput
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(RsaErrorType::InvalidInput, msg)
    }

    /// Convenience constructor for InvalidState
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::new(RsaErrorType::InvalidState, msg)
    }

    /// Convenience constructor for DivisionUndefined
    pub fn division_undefined(msg: impl Into<String>) -> Self {
        Self::new(RsaErrorType::DivisionUndefined, msg)
    }

    /// Convenience constructor for NotFound on an axe id
    pub fn axe_not_found(id: AxeId) -> Self {
        Self::new(RsaErrorType::NotFound, format!("no axe with id {id}"))
    }

    /// Convenience constructor for NotFound on a segment id
    pub fn segment_not_found(id: usize) -> Self {
        Self::new(RsaErrorType::NotFound, format!("no segment with id {id}"))
    }

    /// Convenience constructor for UnrecognizedModel
    pub fn unrecognized_model(name: &str) -> Self {
        Self::new(RsaErrorType::UnrecognizedModel, format!("'{name}'"))
    }

    /// Convenience constructor for MissingPrimary
    pub fn missing_primary(plant: PlantId) -> Self {
        Self::new(
            RsaErrorType::MissingPrimary,
            format!("plant {plant} has no axe of order 1"),
        )
    }

    /// Get the error kind
    pub fn kind(&self) -> &RsaErrorType {
        &self.kind
    }

    /// Get the context message
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl fmt::Display for RsaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if !self.context.is_empty() {
            write!(f, " - {}", self.context)?;
        }

        Ok(())
    }
}

impl Error for RsaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}
