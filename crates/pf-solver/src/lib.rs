//! Steady-state linear transport on pore networks.
//!
//! Given a network and one conductance per throat, this crate assembles the
//! weighted graph Laplacian, applies boundary conditions, solves `A x = b`
//! with preconditioned conjugate gradients, and derives fluxes, boundary
//! rates and effective transport properties from the potential field.
//!
//! The unknown is generic: mole fraction for Fickian diffusion, temperature
//! for Fourier conduction, pressure for Stokes flow.

pub mod assembly;
pub mod bc;
pub mod error;
pub mod linear;
pub mod postprocess;
pub mod sparse;
pub mod transport;

pub use assembly::{LinearSystem, assemble, validate_conductance};
pub use bc::{BcKind, BcPolicy, BoundaryConditions, PoreConstraint};
pub use error::{SolverError, SolverResult};
pub use linear::{LinearSolution, Preconditioner, SolverConfig, solve_pcg};
pub use postprocess::{effective_property, rate, rate_per_pore, throat_flux};
pub use sparse::CsrMatrix;
pub use transport::{TransportKind, TransportProblem, TransportSolution};
