//! Conductance models.
//!
//! Pore segments take the property of their own pore, the throat segment takes
//! the throat value. Segments combine in series; a segment with infinite
//! coefficient adds no resistance.

use core::f64::consts::PI;

use pf_core::{Real, ThroatId};
use pf_geometry::{
    Archetype, ConduitLengths, ConduitSegments, ConduitShape, SegmentArrays, Segments,
    conduit_dims,
};
use pf_graph::Network;

use crate::error::{PhysicsError, PhysicsResult};
use crate::property::PoreProperty;

fn check_segments(
    network: &Network,
    what: &'static str,
    arrays: &SegmentArrays,
) -> PhysicsResult<()> {
    let actual = arrays.checked_len()?;
    if actual != network.num_throats() {
        return Err(PhysicsError::LengthMismatch {
            what,
            expected: network.num_throats(),
            actual,
        });
    }
    Ok(())
}

/// Property sampled at the three segments of a throat.
fn sampled(network: &Network, property: &PoreProperty, throat: ThroatId) -> Segments<Real> {
    let [p1, p2] = network.conns(throat);
    Segments::new(
        property.at_pore(p1),
        property.at_throat(network, throat),
        property.at_pore(p2),
    )
}

/// Series conductance of `coefficient[s] * scale(property[s])` per throat.
fn weighted<F>(
    network: &Network,
    segments: &ConduitSegments,
    property: &PoreProperty,
    what: &'static str,
    scale: F,
) -> PhysicsResult<Vec<Real>>
where
    F: Fn(Real) -> Real,
{
    check_segments(network, "conduit segments", segments)?;
    property.validate(network, what)?;
    let g = network
        .throat_ids()
        .map(|t| {
            let coeff = segments.row(t);
            let prop = sampled(network, property, t);
            Segments::new(
                coeff.pore1 * scale(prop.pore1),
                coeff.throat * scale(prop.throat),
                coeff.pore2 * scale(prop.pore2),
            )
            .series()
        })
        .collect::<Vec<_>>();
    tracing::debug!(model = what, throats = g.len(), "conductance evaluated");
    Ok(g)
}

/// Diffusive conductance: shape coefficient times diffusivity.
pub fn diffusive_conductance(
    network: &Network,
    segments: &ConduitSegments,
    diffusivity: &PoreProperty,
) -> PhysicsResult<Vec<Real>> {
    weighted(network, segments, diffusivity, "diffusivity", |d| d)
}

/// Thermal conductance: shape coefficient times thermal conductivity.
pub fn thermal_conductance(
    network: &Network,
    segments: &ConduitSegments,
    conductivity: &PoreProperty,
) -> PhysicsResult<Vec<Real>> {
    weighted(network, segments, conductivity, "thermal conductivity", |k| k)
}

/// Hydraulic conductance of the archetype's conduits.
///
/// Segment dimensions are resolved as for the shape coefficients (explicit
/// `lengths` win); each segment is then a Poiseuille duct of the
/// archetype's cross-section, so `g` grows with the fourth power of the
/// diameter over the length.
pub fn hydraulic_conductance(
    network: &Network,
    archetype: Archetype,
    lengths: Option<&ConduitLengths>,
    viscosity: &PoreProperty,
) -> PhysicsResult<Vec<Real>> {
    let dims = conduit_dims(network, archetype, lengths)?;
    let areas = SegmentArrays::from_rows(
        dims.iter()
            .map(|d| d.diameters.map(|diameter| archetype.cross_section(diameter))),
    );
    let resolved = ConduitLengths::from_rows(dims.iter().map(|d| d.lengths));
    hagen_poiseuille(network, &areas, &resolved, viscosity)
}

/// Hagen-Poiseuille conductance from explicit segment areas and lengths.
///
/// Each segment is a straight circular duct, `A^2 / (8 pi mu L)`.
pub fn hagen_poiseuille(
    network: &Network,
    areas: &SegmentArrays,
    lengths: &ConduitLengths,
    viscosity: &PoreProperty,
) -> PhysicsResult<Vec<Real>> {
    check_segments(network, "conduit areas", areas)?;
    check_segments(network, "conduit lengths", lengths)?;
    viscosity.validate(network, "viscosity")?;

    let duct = |area: Real, length: Real, mu: Real| {
        if length == 0.0 {
            Real::INFINITY
        } else {
            area * area / (8.0 * PI * mu * length)
        }
    };
    let g = network
        .throat_ids()
        .map(|t| {
            let a = areas.row(t);
            let l = lengths.row(t);
            let mu = sampled(network, viscosity, t);
            Segments::new(
                duct(a.pore1, l.pore1, mu.pore1),
                duct(a.throat, l.throat, mu.throat),
                duct(a.pore2, l.pore2, mu.pore2),
            )
            .series()
        })
        .collect::<Vec<_>>();
    tracing::debug!(
        model = "hagen-poiseuille",
        throats = g.len(),
        "conductance evaluated"
    );
    Ok(g)
}
