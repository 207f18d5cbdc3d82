//! The three conduit archetypes.

use core::f64::consts::PI;

use pf_core::{Real, ThroatId};

use crate::conduit::{ConduitDims, ConduitInput, Segment, Segments};
use crate::error::{GeometryError, GeometryResult};
use crate::shape::{ConduitShape, check_finite, remaining_throat_length};

/// Spheres joined by cylinders, the ball-and-stick reference case.
///
/// Pore segments are the spherical caps between the pore center and the
/// throat mouth. Their conductance is the cylinder value `A/L` divided by a
/// shape correction `F` that depends on how the sphere meets the throat.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpheresAndCylinders;

impl SpheresAndCylinders {
    const NAME: &'static str = "spheres and cylinders";

    /// Distance from a sphere's center to the circle where a throat of
    /// `throat_diameter` pierces it.
    pub fn cap_length(pore_diameter: Real, throat_diameter: Real) -> Real {
        let r = 0.5 * pore_diameter;
        if r <= 0.0 {
            return 0.0;
        }
        let ratio = (0.5 * throat_diameter / r).clamp(0.0, 1.0);
        r * ratio.asin().cos()
    }

    /// Integrated resistance factor of a spherical pore segment.
    ///
    /// `diameter > 2 * length` must hold; the caller checks it.
    pub fn shape_correction(diameter: Real, throat_diameter: Real, length: Real) -> Real {
        if diameter <= throat_diameter {
            4.0 * length / (diameter * throat_diameter * PI)
        } else {
            2.0 / (diameter * PI) * (2.0 * length / diameter).atanh()
        }
    }

    fn pore_segment(
        throat: ThroatId,
        segment: Segment,
        diameter: Real,
        throat_diameter: Real,
        length: Real,
    ) -> GeometryResult<Real> {
        if length == 0.0 {
            return Ok(Real::INFINITY);
        }
        if diameter <= 2.0 * length {
            return Err(GeometryError::BallAndStickInvalid {
                throat,
                segment,
                diameter,
                length,
            });
        }
        Ok(1.0 / Self::shape_correction(diameter, throat_diameter, length))
    }
}

impl ConduitShape for SpheresAndCylinders {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn segment_lengths(
        &self,
        throat: ThroatId,
        input: &ConduitInput,
    ) -> GeometryResult<Segments<Real>> {
        let d = input.diameters;
        let l1 = Self::cap_length(d.pore1, d.throat);
        let l2 = Self::cap_length(d.pore2, d.throat);
        let lt = remaining_throat_length(throat, Self::NAME, input, l1, l2)?;
        Ok(Segments::new(l1, lt, l2))
    }

    fn segment_conductances(
        &self,
        throat: ThroatId,
        dims: &ConduitDims,
    ) -> GeometryResult<Segments<Real>> {
        let d = dims.diameters;
        let l = dims.lengths;
        let g1 = Self::pore_segment(throat, Segment::Pore1, d.pore1, d.throat, l.pore1)?;
        let g2 = Self::pore_segment(throat, Segment::Pore2, d.pore2, d.throat, l.pore2)?;
        let gt = if l.throat == 0.0 {
            Real::INFINITY
        } else {
            self.cross_section(d.throat) / l.throat
        };
        check_finite(throat, Segments::new(g1, gt, g2))
    }
}

/// Conical pore halves tapering into a cylindrical throat.
///
/// Each pore half runs from the pore radius down to the throat radius; the
/// throat itself is a Poiseuille-type cylinder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConesAndCylinders;

impl ConesAndCylinders {
    const NAME: &'static str = "cones and cylinders";

    fn non_physical(throat: ThroatId, what: &'static str) -> GeometryError {
        GeometryError::NonPhysical {
            throat,
            archetype: Self::NAME,
            what,
        }
    }

    fn cone(throat: ThroatId, r: Real, rt: Real, length: Real) -> GeometryResult<Real> {
        if length <= 0.0 {
            return Err(Self::non_physical(throat, "cone length must be positive"));
        }
        if r <= rt {
            return Err(Self::non_physical(throat, "pore radius must exceed throat radius"));
        }
        let alpha = (r - rt) / length;
        let beta = 1.0 / (1.0 / rt.powi(3) - 1.0 / r.powi(3));
        Ok(3.0 * alpha * PI / 8.0 * beta)
    }
}

impl ConduitShape for ConesAndCylinders {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn segment_lengths(
        &self,
        _throat: ThroatId,
        input: &ConduitInput,
    ) -> GeometryResult<Segments<Real>> {
        let lt = input.throat_length.unwrap_or(input.ctc);
        let d = input.diameters;
        Ok(Segments::new(lt - 0.5 * d.pore1, lt, lt - 0.5 * d.pore2))
    }

    fn segment_conductances(
        &self,
        throat: ThroatId,
        dims: &ConduitDims,
    ) -> GeometryResult<Segments<Real>> {
        let r = dims.diameters.map(|d| 0.5 * d);
        let l = dims.lengths;
        if r.throat <= 0.0 {
            return Err(Self::non_physical(throat, "throat radius must be positive"));
        }
        if l.throat <= 0.0 {
            return Err(Self::non_physical(throat, "throat length must be positive"));
        }
        let g1 = Self::cone(throat, r.pore1, r.throat, l.pore1)?;
        let g2 = Self::cone(throat, r.pore2, r.throat, l.pore2)?;
        let gt = PI * r.throat.powi(4) / (8.0 * l.throat);
        check_finite(throat, Segments::new(g1, gt, g2))
    }
}

/// Square-pyramid frusta joined by a cuboid throat.
///
/// A pore half tapers linearly from side `D` to side `Dt` over `D/2`, which
/// integrates to `g = D * Dt / L`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PyramidsAndCuboids;

impl PyramidsAndCuboids {
    const NAME: &'static str = "pyramids and cuboids";
}

impl ConduitShape for PyramidsAndCuboids {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn segment_lengths(
        &self,
        throat: ThroatId,
        input: &ConduitInput,
    ) -> GeometryResult<Segments<Real>> {
        let d = input.diameters;
        let l1 = 0.5 * d.pore1;
        let l2 = 0.5 * d.pore2;
        let lt = remaining_throat_length(throat, Self::NAME, input, l1, l2)?;
        Ok(Segments::new(l1, lt, l2))
    }

    fn segment_conductances(
        &self,
        throat: ThroatId,
        dims: &ConduitDims,
    ) -> GeometryResult<Segments<Real>> {
        let d = dims.diameters;
        let l = dims.lengths;
        let frustum = |side: Real, length: Real| {
            if length == 0.0 {
                Real::INFINITY
            } else {
                side * d.throat / length
            }
        };
        let gt = if l.throat == 0.0 {
            Real::INFINITY
        } else {
            self.cross_section(d.throat) / l.throat
        };
        check_finite(
            throat,
            Segments::new(frustum(d.pore1, l.pore1), gt, frustum(d.pore2, l.pore2)),
        )
    }

    fn cross_section(&self, side: Real) -> Real {
        side * side
    }
}
