//! pf-graph: pore network model for poreflow.
//!
//! Provides:
//! - The immutable `Network` (pores, throats, typed geometric attributes, labels)
//! - Incremental `NetworkBuilder` with validation
//! - Adjacency, boundary-throat and cluster queries
//! - Domain extents (length between faces, face area)
//!
//! # Example
//!
//! ```
//! use pf_graph::NetworkBuilder;
//!
//! let mut builder = NetworkBuilder::new();
//! let p0 = builder.add_pore([0.0, 0.0, 0.0]);
//! let p1 = builder.add_pore([1.0, 0.0, 0.0]);
//! builder.add_throat(p0, p1);
//! builder.add_label("inlet", &[p0]);
//! let network = builder.build().unwrap();
//!
//! assert_eq!(network.num_pores(), 2);
//! assert_eq!(network.num_throats(), 1);
//! assert_eq!(network.pores("inlet").unwrap(), &[p0]);
//! ```

pub mod builder;
pub mod domain;
pub mod error;
pub mod network;
pub(crate) mod validate;

pub use builder::NetworkBuilder;
pub use error::{GraphError, GraphResult};
pub use network::{Clusters, Network};
