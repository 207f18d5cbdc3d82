//! pf-geometry: conduit geometry and conductance shape factors.
//!
//! A conduit is the path through half of pore 1, the throat, and half of
//! pore 2. For each throat this crate computes a conductance shape coefficient
//! per segment under one of the supported geometric archetypes:
//! - spheres and cylinders (ball-and-stick)
//! - cones and cylinders
//! - pyramids and cuboids
//!
//! The three segment values are either returned separately or reduced to one
//! effective value by series (harmonic) combination.
//!
//! # Example
//!
//! ```
//! use pf_geometry::{Archetype, compute_conduit_conductance};
//! use pf_graph::NetworkBuilder;
//!
//! let mut builder = NetworkBuilder::new();
//! let p0 = builder.add_pore_with_diameter([0.0, 0.0, 0.0], 1.0);
//! let p1 = builder.add_pore_with_diameter([2.0, 0.0, 0.0], 1.0);
//! let t = builder.add_throat(p0, p1);
//! builder.set_throat_diameter(t, 0.5);
//! let network = builder.build().unwrap();
//!
//! let g = compute_conduit_conductance(&network, Archetype::SpheresAndCylinders, None).unwrap();
//! assert_eq!(g.len(), 1);
//! assert!(g[0] > 0.0);
//! ```

pub mod archetypes;
pub mod compute;
pub mod conduit;
pub mod error;
pub mod shape;

pub use archetypes::{ConesAndCylinders, PyramidsAndCuboids, SpheresAndCylinders};
pub use compute::{
    compute_conduit_conductance, compute_conduit_segments, compute_shape_factors,
    conduit_dims, conduit_lengths,
};
pub use conduit::{
    ConduitDims, ConduitInput, ConduitLengths, ConduitSegments, Segment, SegmentArrays, Segments,
};
pub use error::{GeometryError, GeometryResult};
pub use shape::{Archetype, ConduitShape};
