//! The conduit-shape capability and the closed set of archetypes.

use core::fmt;
use core::f64::consts::FRAC_PI_4;

use pf_core::{Real, ThroatId};

use crate::archetypes::{ConesAndCylinders, PyramidsAndCuboids, SpheresAndCylinders};
use crate::conduit::{ConduitDims, ConduitInput, Segment, Segments};
use crate::error::{GeometryError, GeometryResult};

/// A geometric idealization of a conduit.
///
/// Implementors infer segment lengths from pore and throat diameters and turn
/// resolved dimensions into per-segment conductance shape coefficients.
pub trait ConduitShape: Send + Sync {
    /// Archetype name for diagnostics.
    fn name(&self) -> &'static str;

    /// Infer segment lengths when the caller does not supply them.
    fn segment_lengths(
        &self,
        throat: ThroatId,
        input: &ConduitInput,
    ) -> GeometryResult<Segments<Real>>;

    /// Conductance shape coefficient of each segment.
    ///
    /// A segment of zero length has infinite conductance.
    fn segment_conductances(
        &self,
        throat: ThroatId,
        dims: &ConduitDims,
    ) -> GeometryResult<Segments<Real>>;

    /// Reference cross-section used to express a coefficient as a shape factor.
    fn cross_section(&self, diameter: Real) -> Real {
        FRAC_PI_4 * diameter * diameter
    }

    /// Dimensionless shape factors `g L / A` relative to a prism of the same
    /// reference cross-section. Degenerate segments report 1.
    fn shape_factors(
        &self,
        throat: ThroatId,
        dims: &ConduitDims,
    ) -> GeometryResult<Segments<Real>> {
        let g = self.segment_conductances(throat, dims)?;
        Ok(Segments::from_fn(|s| {
            let length = dims.lengths[s];
            let area = self.cross_section(dims.diameters[s]);
            if length == 0.0 || area == 0.0 || g[s].is_infinite() {
                1.0
            } else {
                g[s] * length / area
            }
        }))
    }
}

/// Supported conduit archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Archetype {
    /// Spherical pore bodies joined by cylindrical throats.
    #[default]
    SpheresAndCylinders,
    /// Conical pore halves tapering into cylindrical throats.
    ConesAndCylinders,
    /// Square-pyramid pore halves joined by cuboid throats.
    PyramidsAndCuboids,
}

impl Archetype {
    pub const ALL: [Archetype; 3] = [
        Archetype::SpheresAndCylinders,
        Archetype::ConesAndCylinders,
        Archetype::PyramidsAndCuboids,
    ];

    pub fn shape(self) -> &'static dyn ConduitShape {
        match self {
            Archetype::SpheresAndCylinders => &SpheresAndCylinders,
            Archetype::ConesAndCylinders => &ConesAndCylinders,
            Archetype::PyramidsAndCuboids => &PyramidsAndCuboids,
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.shape().name())
    }
}

impl ConduitShape for Archetype {
    fn name(&self) -> &'static str {
        self.shape().name()
    }

    fn segment_lengths(
        &self,
        throat: ThroatId,
        input: &ConduitInput,
    ) -> GeometryResult<Segments<Real>> {
        self.shape().segment_lengths(throat, input)
    }

    fn segment_conductances(
        &self,
        throat: ThroatId,
        dims: &ConduitDims,
    ) -> GeometryResult<Segments<Real>> {
        self.shape().segment_conductances(throat, dims)
    }

    fn cross_section(&self, diameter: Real) -> Real {
        self.shape().cross_section(diameter)
    }
}

/// Reject NaN coefficients; `+inf` is a legal zero-resistance segment.
pub(crate) fn check_finite(throat: ThroatId, g: Segments<Real>) -> GeometryResult<Segments<Real>> {
    for s in Segment::ALL {
        if g[s].is_nan() || g[s] < 0.0 {
            return Err(GeometryError::NonFinite {
                throat,
                segment: s,
                value: g[s],
            });
        }
    }
    Ok(g)
}

/// Throat length between two pore segments: explicit, else the remainder of
/// the center-to-center distance.
pub(crate) fn remaining_throat_length(
    throat: ThroatId,
    archetype: &'static str,
    input: &ConduitInput,
    pore1: Real,
    pore2: Real,
) -> GeometryResult<Real> {
    let length = input.throat_length.unwrap_or(input.ctc - pore1 - pore2);
    if length < 0.0 {
        return Err(GeometryError::NonPhysical {
            throat,
            archetype,
            what: "pore segments overlap (negative throat length)",
        });
    }
    Ok(length)
}
