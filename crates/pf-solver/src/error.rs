//! Error types for assembly, boundary conditions and the linear solve.

use pf_core::{PfError, PoreId, Real, ThroatId};
use pf_geometry::GeometryError;
use pf_graph::GraphError;
use pf_physics::PhysicsError;
use thiserror::Error;

use crate::bc::BcKind;

/// Errors that can occur while setting up or solving a transport problem.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Pore {pore} already has a {existing} condition, refusing {requested}")]
    BoundaryConditionConflict {
        pore: PoreId,
        existing: BcKind,
        requested: BcKind,
    },

    #[error("Pore {pore} has no boundary condition")]
    UndefinedBoundaryCondition { pore: PoreId },

    #[error("Invalid conductance for throat {throat}: {value}")]
    InvalidConductance { throat: ThroatId, value: Real },

    #[error("Singular system: {what}")]
    SingularSystem { what: String },

    #[error("Convergence failed after {iterations} iterations (residual {residual:e})")]
    ConvergenceFailed { iterations: usize, residual: Real },

    #[error("Non-finite solution value at pore {pore}")]
    NonFiniteSolution { pore: PoreId },

    #[error("Non-physical result: {what}")]
    NonPhysical { what: String },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for PfError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::Graph(g) => g.into(),
            SolverError::Geometry(g) => g.into(),
            SolverError::Physics(p) => p.into(),
            SolverError::InvalidConductance { value, .. } => PfError::NonFinite {
                what: "conductance",
                value,
            },
            SolverError::ProblemSetup { what } => PfError::InvalidArg { what },
            other => PfError::Invariant {
                what: other.to_string(),
            },
        }
    }
}
