//! Fluxes, boundary rates and effective properties from a solved field.
//!
//! Sign convention: a throat flux is positive from its first pore to its
//! second, and a rate is positive when it enters the pore set.

use pf_core::{PoreId, Real, mean};
use pf_graph::Network;

use crate::assembly::validate_conductance;
use crate::error::{SolverError, SolverResult};

fn check_field(
    network: &Network,
    conductance: &[Real],
    potential: &[Real],
) -> SolverResult<()> {
    validate_conductance(network, conductance)?;
    if potential.len() != network.num_pores() {
        return Err(SolverError::ProblemSetup {
            what: format!(
                "potential has {} entries, network has {} pores",
                potential.len(),
                network.num_pores()
            ),
        });
    }
    Ok(())
}

/// Each pore once, in index order.
fn distinct(pores: &[PoreId]) -> Vec<PoreId> {
    let mut unique = pores.to_vec();
    unique.sort_unstable();
    unique.dedup();
    unique
}

/// `q_t = g_t (x[p1] - x[p2])` for every throat.
pub fn throat_flux(
    network: &Network,
    conductance: &[Real],
    potential: &[Real],
) -> SolverResult<Vec<Real>> {
    check_field(network, conductance, potential)?;
    Ok(network
        .throat_ids()
        .zip(conductance)
        .map(|(t, &g)| {
            let [p1, p2] = network.conns(t);
            g * (potential[p1.as_usize()] - potential[p2.as_usize()])
        })
        .collect())
}

/// Net rate into `pores` through the throats that cross its boundary.
///
/// `pores` is a set: a pore listed twice is counted once.
pub fn rate(
    network: &Network,
    conductance: &[Real],
    potential: &[Real],
    pores: &[PoreId],
) -> SolverResult<Real> {
    let unique = distinct(pores);
    Ok(rate_per_pore(network, conductance, potential, &unique)?.iter().sum())
}

/// Rate into each listed pore from neighbors outside the set, one entry per
/// listed pore.
pub fn rate_per_pore(
    network: &Network,
    conductance: &[Real],
    potential: &[Real],
    pores: &[PoreId],
) -> SolverResult<Vec<Real>> {
    check_field(network, conductance, potential)?;
    let inside = network.pore_mask(pores)?;
    Ok(pores
        .iter()
        .map(|&p| {
            let x_in = potential[p.as_usize()];
            network
                .pore_throats(p)
                .iter()
                .filter_map(|&t| network.other_end(t, p).map(|q| (t, q)))
                .filter(|(_, q)| !inside[q.as_usize()])
                .map(|(t, q)| conductance[t.as_usize()] * (potential[q.as_usize()] - x_in))
                .sum()
        })
        .collect())
}

/// Effective transport coefficient between two faces.
///
/// `k = Q L / (A dx)` with `Q` the rate leaving `face_a`, `L` the distance
/// between the faces, `A` the area of `face_a` and `dx` the drop in mean
/// potential from `face_a` to `face_b`.
pub fn effective_property(
    network: &Network,
    conductance: &[Real],
    potential: &[Real],
    face_a: &[PoreId],
    face_b: &[PoreId],
) -> SolverResult<Real> {
    let (face_a, face_b) = (distinct(face_a), distinct(face_b));
    let flow = -rate(network, conductance, potential, &face_a)?;
    network.check_pores(&face_b)?;

    let mean_at = |face: &[PoreId]| {
        mean(face.iter().map(|p| potential[p.as_usize()])).unwrap_or(0.0)
    };
    let (xa, xb) = (mean_at(&face_a), mean_at(&face_b));
    let drop = xa - xb;
    if drop.abs() <= Real::EPSILON * xa.abs().max(xb.abs()) {
        return Err(SolverError::NonPhysical {
            what: format!("faces share the same mean potential ({xa})"),
        });
    }

    let length = network.domain_length(&face_a, &face_b)?.value;
    let area = network.domain_area(&face_a)?.value;

    let k = flow * length / (area * drop);
    tracing::debug!(flow, length, area, drop, k, "effective property");
    Ok(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_graph::NetworkBuilder;

    /// 0 - 1 - 2 chain, unit spacing.
    fn chain() -> (Network, Vec<PoreId>) {
        let mut b = NetworkBuilder::new();
        let p: Vec<_> = (0..3).map(|i| b.add_pore([i as f64, 0.0, 0.0])).collect();
        b.add_throat(p[0], p[1]);
        b.add_throat(p[1], p[2]);
        (b.build().unwrap(), p)
    }

    #[test]
    fn flux_follows_throat_orientation() {
        let (net, _) = chain();
        let q = throat_flux(&net, &[2.0, 1.0], &[1.0, 0.5, 0.0]).unwrap();
        assert_eq!(q, vec![1.0, 0.5]);
    }

    #[test]
    fn rate_counts_only_boundary_throats() {
        let (net, p) = chain();
        let x = [1.0, 0.5, 0.0];
        let g = [1.0, 1.0];
        // inflow from pore 1 into the sink
        assert_eq!(rate(&net, &g, &x, &[p[2]]).unwrap(), 0.5);
        // source loses what it sends to pore 1
        assert_eq!(rate(&net, &g, &x, &[p[0]]).unwrap(), -0.5);
        // the middle pore is interior to {0, 1}
        assert_eq!(rate_per_pore(&net, &g, &x, &[p[0], p[1]]).unwrap(), vec![0.0, -0.5]);
    }

    #[test]
    fn repeated_pores_count_once() {
        let (net, p) = chain();
        let x = [1.0, 0.5, 0.0];
        let g = [1.0, 1.0];
        assert_eq!(rate(&net, &g, &x, &[p[2], p[2]]).unwrap(), 0.5);
        assert_eq!(rate(&net, &g, &x, &[p[1], p[0], p[1]]).unwrap(), -0.5);
        assert_eq!(rate_per_pore(&net, &g, &x, &[p[2], p[2]]).unwrap(), vec![0.5, 0.5]);
    }

    #[test]
    fn field_length_is_checked() {
        let (net, p) = chain();
        assert!(matches!(
            rate(&net, &[1.0, 1.0], &[0.0], &[p[0]]),
            Err(SolverError::ProblemSetup { .. })
        ));
    }

    #[test]
    fn equal_face_potentials_are_non_physical() {
        let (net, p) = chain();
        assert!(matches!(
            effective_property(&net, &[1.0, 1.0], &[1.0, 1.0, 1.0], &[p[0]], &[p[2]]),
            Err(SolverError::NonPhysical { .. })
        ));
    }
}
