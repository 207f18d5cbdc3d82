//! Steady linear transport: one problem, many independent runs.

use core::fmt;

use pf_core::timing::Timer;
use pf_core::{PoreId, Real};
use pf_graph::Network;

use crate::assembly::{assemble, validate_conductance};
use crate::bc::{BcKind, BcPolicy, BoundaryConditions, PoreConstraint};
use crate::error::SolverResult;
use crate::linear::{SolverConfig, solve_pcg};
use crate::postprocess;

/// The physical process being solved. The mathematics is the same for all;
/// the kind names the potential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportKind {
    #[default]
    FickianDiffusion,
    FourierConduction,
    StokesFlow,
}

impl TransportKind {
    /// Name of the solved quantity.
    pub fn quantity(self) -> &'static str {
        match self {
            TransportKind::FickianDiffusion => "mole fraction",
            TransportKind::FourierConduction => "temperature",
            TransportKind::StokesFlow => "pressure",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransportKind::FickianDiffusion => "Fickian diffusion",
            TransportKind::FourierConduction => "Fourier conduction",
            TransportKind::StokesFlow => "Stokes flow",
        })
    }
}

/// Result of one [`TransportProblem::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransportSolution {
    pub kind: TransportKind,
    /// Potential per pore.
    pub potential: Vec<Real>,
    pub iterations: usize,
    pub residual_norm: Real,
}

impl TransportSolution {
    pub fn at(&self, pore: PoreId) -> Real {
        self.potential[pore.as_usize()]
    }
}

/// A network, its throat conductances and a set of boundary conditions.
///
/// The problem owns no solution state: [`run`](Self::run) borrows it
/// immutably and returns a fresh [`TransportSolution`].
#[derive(Debug, Clone)]
pub struct TransportProblem<'a> {
    network: &'a Network,
    conductance: &'a [Real],
    kind: TransportKind,
    bcs: BoundaryConditions,
    config: SolverConfig,
}

impl<'a> TransportProblem<'a> {
    pub fn new(
        network: &'a Network,
        conductance: &'a [Real],
        kind: TransportKind,
    ) -> SolverResult<Self> {
        validate_conductance(network, conductance)?;
        Ok(Self {
            network,
            conductance,
            kind,
            bcs: BoundaryConditions::for_network(network),
            config: SolverConfig::default(),
        })
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_policy(mut self, policy: BcPolicy) -> Self {
        self.bcs.set_policy(policy);
        self
    }

    pub fn network(&self) -> &'a Network {
        self.network
    }

    pub fn conductance(&self) -> &'a [Real] {
        self.conductance
    }

    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SolverConfig {
        &mut self.config
    }

    pub fn boundary_conditions(&self) -> &BoundaryConditions {
        &self.bcs
    }

    pub fn set_boundary_condition(
        &mut self,
        kind: BcKind,
        pores: &[PoreId],
        value: Real,
    ) -> SolverResult<()> {
        self.bcs.set(kind, pores, value)
    }

    /// Set a condition on every pore carrying `label`.
    pub fn set_label_boundary_condition(
        &mut self,
        kind: BcKind,
        label: &str,
        value: Real,
    ) -> SolverResult<()> {
        let pores = self.network.pores(label)?;
        self.bcs.set(kind, pores, value)
    }

    /// Prescribed potential.
    pub fn set_value_bc(&mut self, pores: &[PoreId], value: Real) -> SolverResult<()> {
        self.bcs.set_dirichlet(pores, value)
    }

    /// Prescribed rate at each pore; positive injects.
    pub fn set_rate_bc(&mut self, pores: &[PoreId], rate: Real) -> SolverResult<()> {
        self.bcs.set_neumann(pores, rate)
    }

    /// Prescribed total rate shared across the pores.
    pub fn set_total_rate_bc(&mut self, pores: &[PoreId], total_rate: Real) -> SolverResult<()> {
        self.bcs.set_neumann_group(pores, total_rate)
    }

    pub fn clear_boundary_conditions(&mut self, pores: &[PoreId]) -> SolverResult<()> {
        self.bcs.clear(pores)
    }

    /// Assemble, apply boundary conditions and solve.
    pub fn run(&self) -> SolverResult<TransportSolution> {
        let timer = Timer::start("transport_run");
        self.bcs.check_solvable(self.network, self.conductance)?;

        let mut system = assemble(self.network, self.conductance)?;
        self.bcs.apply(&mut system)?;
        let solution = solve_pcg(&system.a, &system.b, &self.config)?;

        let mut potential: Vec<Real> = solution.x.iter().copied().collect();
        for (x, pore) in potential.iter_mut().zip(self.network.pore_ids()) {
            if let PoreConstraint::Dirichlet { value } = self.bcs.constraint(pore) {
                *x = value;
            }
        }

        tracing::debug!(
            kind = %self.kind,
            quantity = self.kind.quantity(),
            pores = potential.len(),
            iterations = solution.iterations,
            residual = solution.residual_norm,
            "transport solved"
        );
        timer.finish();
        Ok(TransportSolution {
            kind: self.kind,
            potential,
            iterations: solution.iterations,
            residual_norm: solution.residual_norm,
        })
    }

    pub fn throat_flux(&self, solution: &TransportSolution) -> SolverResult<Vec<Real>> {
        postprocess::throat_flux(self.network, self.conductance, &solution.potential)
    }

    /// Net rate into `pores`.
    pub fn rate(&self, solution: &TransportSolution, pores: &[PoreId]) -> SolverResult<Real> {
        postprocess::rate(self.network, self.conductance, &solution.potential, pores)
    }

    pub fn rate_per_pore(
        &self,
        solution: &TransportSolution,
        pores: &[PoreId],
    ) -> SolverResult<Vec<Real>> {
        postprocess::rate_per_pore(self.network, self.conductance, &solution.potential, pores)
    }

    pub fn effective_property(
        &self,
        solution: &TransportSolution,
        face_a: &[PoreId],
        face_b: &[PoreId],
    ) -> SolverResult<Real> {
        postprocess::effective_property(
            self.network,
            self.conductance,
            &solution.potential,
            face_a,
            face_b,
        )
    }
}
