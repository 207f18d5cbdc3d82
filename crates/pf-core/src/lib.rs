//! pf-core: stable foundation for poreflow.
//!
//! Contains:
//! - units (uom SI types + constructors for domain extents)
//! - numeric (Real + series and mean helpers)
//! - ids (compact pore/throat IDs)
//! - error (shared error type)
//! - timing (opt-in phase timers reported through `tracing`)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod timing;
pub mod units;

pub use error::PfError;
pub use ids::*;
pub use numeric::*;
pub use units::*;
