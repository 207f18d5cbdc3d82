//! Network-wide conduit computations.
//!
//! Every throat is independent, so the per-throat work runs on the rayon pool.
//! Results are collected in throat order and the first error aborts.

use pf_core::timing::Timer;
use pf_core::{Real, ThroatId};
use pf_graph::Network;
use rayon::prelude::*;

use crate::conduit::{
    ConduitDims, ConduitInput, ConduitLengths, ConduitSegments, SegmentArrays, Segments,
};
use crate::error::{GeometryError, GeometryResult};
use crate::shape::{Archetype, ConduitShape};

fn conduit_input(network: &Network, throat: ThroatId) -> ConduitInput {
    let [p1, p2] = network.conns(throat);
    ConduitInput {
        diameters: Segments::new(
            network.pore_diameter(p1),
            network.throat_diameter(throat),
            network.pore_diameter(p2),
        ),
        ctc: network.ctc_distance(throat),
        throat_length: network.throat_length(throat),
    }
}

fn per_throat<T, F>(network: &Network, f: F) -> GeometryResult<Vec<T>>
where
    T: Send,
    F: Fn(ThroatId) -> GeometryResult<T> + Sync,
{
    (0..network.num_throats())
        .into_par_iter()
        .map(|i| f(ThroatId::from_usize(i)))
        .collect()
}

/// Segment lengths inferred from the archetype for every throat.
pub fn conduit_lengths(network: &Network, archetype: Archetype) -> GeometryResult<ConduitLengths> {
    let rows = per_throat(network, |t| archetype.segment_lengths(t, &conduit_input(network, t)))?;
    Ok(SegmentArrays::from_rows(rows))
}

/// Resolved dimensions for every throat.
///
/// Explicit `lengths` override the archetype's inferred lengths and must have
/// one entry per throat.
pub fn conduit_dims(
    network: &Network,
    archetype: Archetype,
    lengths: Option<&ConduitLengths>,
) -> GeometryResult<Vec<ConduitDims>> {
    if let Some(explicit) = lengths {
        let n = explicit.checked_len()?;
        if n != network.num_throats() {
            return Err(GeometryError::LengthMismatch {
                expected: network.num_throats(),
                actual: n,
            });
        }
    }
    per_throat(network, |t| {
        let input = conduit_input(network, t);
        let resolved = match lengths {
            Some(explicit) => explicit.row(t),
            None => archetype.segment_lengths(t, &input)?,
        };
        Ok(ConduitDims {
            diameters: input.diameters,
            lengths: resolved,
        })
    })
}

/// Per-segment conductance coefficients for every throat.
pub fn compute_conduit_segments(
    network: &Network,
    archetype: Archetype,
    lengths: Option<&ConduitLengths>,
) -> GeometryResult<ConduitSegments> {
    let timer = Timer::start("conduit_segments");
    let dims = conduit_dims(network, archetype, lengths)?;
    let rows: Vec<Segments<Real>> = dims
        .par_iter()
        .enumerate()
        .map(|(i, d)| archetype.segment_conductances(ThroatId::from_usize(i), d))
        .collect::<GeometryResult<_>>()?;
    tracing::debug!(
        archetype = %archetype,
        throats = rows.len(),
        explicit_lengths = lengths.is_some(),
        "conduit segments computed"
    );
    timer.finish();
    Ok(SegmentArrays::from_rows(rows))
}

/// One effective coefficient per throat: the series combination of its
/// three segments.
pub fn compute_conduit_conductance(
    network: &Network,
    archetype: Archetype,
    lengths: Option<&ConduitLengths>,
) -> GeometryResult<Vec<Real>> {
    Ok(compute_conduit_segments(network, archetype, lengths)?.combined())
}

/// Dimensionless shape factors per segment for every throat.
pub fn compute_shape_factors(
    network: &Network,
    archetype: Archetype,
    lengths: Option<&ConduitLengths>,
) -> GeometryResult<SegmentArrays> {
    let dims = conduit_dims(network, archetype, lengths)?;
    let rows: Vec<Segments<Real>> = dims
        .par_iter()
        .enumerate()
        .map(|(i, d)| archetype.shape_factors(ThroatId::from_usize(i), d))
        .collect::<GeometryResult<_>>()?;
    Ok(SegmentArrays::from_rows(rows))
}
