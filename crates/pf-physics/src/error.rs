//! Error types for physics models.

use pf_core::{PfError, Real};
use pf_geometry::GeometryError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("{what} has {actual} entries (expected {expected})")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{what}[{index}] must be finite and positive, got {value}")]
    InvalidProperty {
        what: &'static str,
        index: usize,
        value: Real,
    },

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;

impl From<PhysicsError> for PfError {
    fn from(e: PhysicsError) -> Self {
        match e {
            PhysicsError::Geometry(g) => g.into(),
            other => PfError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}
