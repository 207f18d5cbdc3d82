//! Weighted graph Laplacian assembly.

use nalgebra::DVector;
use pf_core::timing::Timer;
use pf_core::{Real, ThroatId};
use pf_graph::Network;

use crate::error::{SolverError, SolverResult};
use crate::sparse::CsrMatrix;

/// `A x = b` before or after boundary conditions.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    pub a: CsrMatrix,
    pub b: DVector<Real>,
}

/// One finite, non-negative conductance per throat.
pub fn validate_conductance(network: &Network, conductance: &[Real]) -> SolverResult<()> {
    if conductance.len() != network.num_throats() {
        return Err(SolverError::ProblemSetup {
            what: format!(
                "conductance has {} entries, network has {} throats",
                conductance.len(),
                network.num_throats()
            ),
        });
    }
    match conductance.iter().position(|g| !(g.is_finite() && *g >= 0.0)) {
        Some(i) => Err(SolverError::InvalidConductance {
            throat: ThroatId::from_usize(i),
            value: conductance[i],
        }),
        None => Ok(()),
    }
}

/// Assemble the conductance matrix with a zero right-hand side.
///
/// Every throat contributes `+g` to both diagonals and `-g` to both
/// off-diagonals. Every pore gets a diagonal slot, so isolated pores can
/// still be pinned. The result is symmetric with zero row sums and is
/// singular until boundary conditions are applied.
pub fn assemble(network: &Network, conductance: &[Real]) -> SolverResult<LinearSystem> {
    validate_conductance(network, conductance)?;
    let timer = Timer::start("assemble");

    let n = network.num_pores();
    let mut triplets = Vec::with_capacity(n + 4 * network.num_throats());
    triplets.extend((0..n).map(|i| (i, i, 0.0)));
    for (t, &g) in network.throat_ids().zip(conductance) {
        let [p1, p2] = network.conns(t);
        let (i, j) = (p1.as_usize(), p2.as_usize());
        triplets.push((i, i, g));
        triplets.push((j, j, g));
        triplets.push((i, j, -g));
        triplets.push((j, i, -g));
    }

    let a = CsrMatrix::from_triplets(n, triplets);
    tracing::debug!(pores = n, throats = network.num_throats(), nnz = a.nnz(), "system assembled");
    timer.finish();
    Ok(LinearSystem {
        a,
        b: DVector::zeros(n),
    })
}
