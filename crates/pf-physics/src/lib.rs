//! pf-physics: property-weighted conductance models.
//!
//! Geometry yields shape coefficients that depend only on the conduit. The
//! diffusive and thermal models scale them by a transport property and
//! combine the segments in series. Hydraulic conductance is Poiseuille flow
//! through the resolved conduit segments.

pub mod error;
pub mod models;
pub mod property;

pub use error::{PhysicsError, PhysicsResult};
pub use models::{
    diffusive_conductance, hagen_poiseuille, hydraulic_conductance, thermal_conductance,
};
pub use property::PoreProperty;
