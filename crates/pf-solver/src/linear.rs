//! Preconditioned conjugate gradient for the assembled system.

use std::time::{Duration, Instant};

use nalgebra::DVector;
use pf_core::timing::Timer;
use pf_core::{PoreId, Real};

use crate::error::{SolverError, SolverResult};
use crate::sparse::CsrMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Preconditioner {
    None,
    /// Diagonal scaling.
    #[default]
    Jacobi,
}

/// Linear solver configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Maximum CG iterations
    pub max_iterations: usize,
    /// Residual tolerance relative to `||b||`
    pub rel_tol: Real,
    /// Absolute residual tolerance, zero to rely on `rel_tol` alone
    pub abs_tol: Real,
    pub preconditioner: Preconditioner,
    /// Wall-clock limit for one solve
    pub time_limit: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            rel_tol: 1e-11,
            abs_tol: 0.0,
            preconditioner: Preconditioner::Jacobi,
            time_limit: None,
        }
    }
}

/// Converged linear solve.
#[derive(Debug, Clone)]
pub struct LinearSolution {
    pub x: DVector<Real>,
    pub iterations: usize,
    pub residual_norm: Real,
}

fn precondition(inv_diag: &Option<DVector<Real>>, r: &DVector<Real>) -> DVector<Real> {
    match inv_diag {
        Some(d) => r.component_mul(d),
        None => r.clone(),
    }
}

fn finish(
    x: DVector<Real>,
    iterations: usize,
    residual_norm: Real,
) -> SolverResult<LinearSolution> {
    if let Some(i) = x.iter().position(|v| !v.is_finite()) {
        return Err(SolverError::NonFiniteSolution {
            pore: PoreId::from_usize(i),
        });
    }
    tracing::debug!(iterations, residual_norm, "linear solve converged");
    Ok(LinearSolution {
        x,
        iterations,
        residual_norm,
    })
}

/// Solve `A x = b` for symmetric positive definite `A`, starting from zero.
///
/// Converges when `||r|| <= max(abs_tol, rel_tol * ||b||)`. A non-positive
/// curvature `p^T A p` means `A` is not positive definite and is reported as
/// a singular system. An unconverged iterate that has used up `time_limit`
/// fails with [`SolverError::ConvergenceFailed`].
pub fn solve_pcg(
    a: &CsrMatrix,
    b: &DVector<Real>,
    config: &SolverConfig,
) -> SolverResult<LinearSolution> {
    let n = b.len();
    if a.nrows() != n {
        return Err(SolverError::ProblemSetup {
            what: format!("matrix has {} rows, right-hand side {}", a.nrows(), n),
        });
    }
    let timer = Timer::start("linear_solve");
    let started = Instant::now();

    let inv_diag = match config.preconditioner {
        Preconditioner::None => None,
        Preconditioner::Jacobi => Some(a.diagonal().map(|d| if d > 0.0 { 1.0 / d } else { 1.0 })),
    };

    let mut x = DVector::zeros(n);
    let mut r = b.clone();
    let tol = config.abs_tol.max(config.rel_tol * b.norm());
    let mut residual = r.norm();
    if residual <= tol {
        timer.finish();
        return finish(x, 0, residual);
    }

    let mut z = precondition(&inv_diag, &r);
    let mut p = z.clone();
    let mut rz = r.dot(&z);
    let mut ap = DVector::zeros(n);

    for iteration in 1..=config.max_iterations {
        a.mul_vec_into(&p, &mut ap);
        let curvature = p.dot(&ap);
        if !(curvature > 0.0) {
            return Err(SolverError::SingularSystem {
                what: format!("CG breakdown at iteration {iteration} (p^T A p = {curvature:e})"),
            });
        }

        let alpha = rz / curvature;
        x.axpy(alpha, &p, 1.0);
        r.axpy(-alpha, &ap, 1.0);
        residual = r.norm();
        tracing::trace!(iteration, residual, "cg");

        if residual <= tol {
            timer.finish();
            return finish(x, iteration, residual);
        }
        if config.time_limit.is_some_and(|limit| started.elapsed() >= limit) {
            tracing::warn!(iteration, residual, "linear solve hit its time limit");
            return Err(SolverError::ConvergenceFailed {
                iterations: iteration,
                residual,
            });
        }

        z = precondition(&inv_diag, &r);
        let rz_next = r.dot(&z);
        let beta = rz_next / rz;
        rz = rz_next;
        p = &z + p * beta;
    }

    tracing::warn!(
        iterations = config.max_iterations,
        residual,
        "linear solve did not converge"
    );
    Err(SolverError::ConvergenceFailed {
        iterations: config.max_iterations,
        residual,
    })
}
