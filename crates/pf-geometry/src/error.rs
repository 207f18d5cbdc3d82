//! Error types for conduit geometry.

use pf_core::{PfError, Real, ThroatId};
use thiserror::Error;

use crate::conduit::Segment;

/// A conduit violates the geometric precondition of the selected archetype.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error(
        "Throat {throat}: {segment} can not be modeled as ball-and-stick \
         (D = {diameter}, L = {length}; requires D > 2L)"
    )]
    BallAndStickInvalid {
        throat: ThroatId,
        segment: Segment,
        diameter: Real,
        length: Real,
    },

    #[error("Throat {throat}: non-physical conduit for {archetype}: {what}")]
    NonPhysical {
        throat: ThroatId,
        archetype: &'static str,
        what: &'static str,
    },

    #[error("Throat {throat}: invalid {segment} conductance ({value})")]
    NonFinite {
        throat: ThroatId,
        segment: Segment,
        value: Real,
    },

    #[error("Conduit lengths have {actual} entries (expected {expected})")]
    LengthMismatch { expected: usize, actual: usize },
}

pub type GeometryResult<T> = Result<T, GeometryError>;

impl From<GeometryError> for PfError {
    fn from(e: GeometryError) -> Self {
        match e {
            GeometryError::NonFinite { value, .. } => PfError::NonFinite {
                what: "conduit conductance",
                value,
            },
            other => PfError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}
