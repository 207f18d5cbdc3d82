//! Boundary conditions on pores.
//!
//! Each pore carries at most one constraint. A group condition stores its
//! total rate once; membership is read back from the per-pore tags, so
//! re-targeting a member removes it from its old group. A group left with
//! no members gives its table slot to the next group that is set.

use core::fmt;

use pf_core::{PoreId, Real};
use pf_graph::{GraphError, Network};

use crate::assembly::LinearSystem;
use crate::error::{SolverError, SolverResult};

/// The kind of a boundary condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BcKind {
    /// Prescribed potential.
    Dirichlet,
    /// Prescribed rate at each listed pore.
    Neumann,
    /// Prescribed total rate shared across the listed pores.
    NeumannGroup,
}

impl fmt::Display for BcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BcKind::Dirichlet => "Dirichlet",
            BcKind::Neumann => "Neumann",
            BcKind::NeumannGroup => "NeumannGroup",
        })
    }
}

/// What to do when a constrained pore receives a condition of another kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BcPolicy {
    /// Last write wins.
    #[default]
    Overwrite,
    /// Reject with `BoundaryConditionConflict`.
    Strict,
}

/// Constraint stored on one pore.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoreConstraint {
    #[default]
    Unconstrained,
    Dirichlet { value: Real },
    Neumann { rate: Real },
    /// Member of the group at this index of the group table.
    NeumannGroup { group: usize },
}

impl PoreConstraint {
    pub fn kind(&self) -> Option<BcKind> {
        match self {
            PoreConstraint::Unconstrained => None,
            PoreConstraint::Dirichlet { .. } => Some(BcKind::Dirichlet),
            PoreConstraint::Neumann { .. } => Some(BcKind::Neumann),
            PoreConstraint::NeumannGroup { .. } => Some(BcKind::NeumannGroup),
        }
    }
}

/// Per-pore boundary conditions for one transport problem.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryConditions {
    policy: BcPolicy,
    constraints: Vec<PoreConstraint>,
    group_totals: Vec<Real>,
}

impl BoundaryConditions {
    pub fn new(num_pores: usize, policy: BcPolicy) -> Self {
        Self {
            policy,
            constraints: vec![PoreConstraint::Unconstrained; num_pores],
            group_totals: Vec::new(),
        }
    }

    pub fn for_network(network: &Network) -> Self {
        Self::new(network.num_pores(), BcPolicy::default())
    }

    pub fn policy(&self) -> BcPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: BcPolicy) {
        self.policy = policy;
    }

    pub fn num_pores(&self) -> usize {
        self.constraints.len()
    }

    fn check_pores(&self, pores: &[PoreId]) -> SolverResult<()> {
        let len = self.num_pores();
        match pores.iter().find(|p| p.as_usize() >= len) {
            Some(&pore) => Err(GraphError::PoreOutOfRange { pore, len }.into()),
            None => Ok(()),
        }
    }

    /// Apply one condition kind to every pore in `pores`.
    ///
    /// For `Dirichlet` the value is a potential, for `Neumann` a per-pore rate
    /// and for `NeumannGroup` the total rate shared by the pores. Positive
    /// rates inject into the network. Under `Strict` the call is rejected as a
    /// whole if any pore already has a different kind.
    pub fn set(&mut self, kind: BcKind, pores: &[PoreId], value: Real) -> SolverResult<()> {
        if !value.is_finite() {
            return Err(SolverError::ProblemSetup {
                what: format!("{kind} value must be finite, got {value}"),
            });
        }
        self.check_pores(pores)?;

        if self.policy == BcPolicy::Strict {
            for &pore in pores {
                match self.constraints[pore.as_usize()].kind() {
                    Some(existing) if existing != kind => {
                        return Err(SolverError::BoundaryConditionConflict {
                            pore,
                            existing,
                            requested: kind,
                        });
                    }
                    _ => {}
                }
            }
        }

        let constraint = match kind {
            BcKind::Dirichlet => PoreConstraint::Dirichlet { value },
            BcKind::Neumann => PoreConstraint::Neumann { rate: value },
            BcKind::NeumannGroup => PoreConstraint::NeumannGroup {
                group: self.group_slot(pores, value),
            },
        };

        let mut replaced = 0_usize;
        for &pore in pores {
            let slot = &mut self.constraints[pore.as_usize()];
            if slot.kind().is_some_and(|k| k != kind) {
                replaced += 1;
            }
            *slot = constraint;
        }
        if replaced > 0 {
            tracing::warn!(kind = %kind, replaced, "boundary condition replaced a different kind");
        }
        tracing::debug!(kind = %kind, pores = pores.len(), value, "boundary condition set");
        Ok(())
    }

    /// Slot for a new group total: the first one that no pore outside
    /// `pores` still belongs to, else a new one.
    fn group_slot(&mut self, pores: &[PoreId], total: Real) -> usize {
        let mut leaving = vec![false; self.num_pores()];
        for pore in pores {
            leaving[pore.as_usize()] = true;
        }
        let mut live = vec![false; self.group_totals.len()];
        for (c, &gone) in self.constraints.iter().zip(&leaving) {
            if let PoreConstraint::NeumannGroup { group } = *c {
                live[group] |= !gone;
            }
        }
        match live.iter().position(|used| !used) {
            Some(slot) => {
                self.group_totals[slot] = total;
                slot
            }
            None => {
                self.group_totals.push(total);
                self.group_totals.len() - 1
            }
        }
    }

    pub fn set_dirichlet(&mut self, pores: &[PoreId], value: Real) -> SolverResult<()> {
        self.set(BcKind::Dirichlet, pores, value)
    }

    pub fn set_neumann(&mut self, pores: &[PoreId], rate: Real) -> SolverResult<()> {
        self.set(BcKind::Neumann, pores, rate)
    }

    pub fn set_neumann_group(&mut self, pores: &[PoreId], total_rate: Real) -> SolverResult<()> {
        self.set(BcKind::NeumannGroup, pores, total_rate)
    }

    /// Remove any constraint from `pores`.
    pub fn clear(&mut self, pores: &[PoreId]) -> SolverResult<()> {
        self.check_pores(pores)?;
        for &pore in pores {
            self.constraints[pore.as_usize()] = PoreConstraint::Unconstrained;
        }
        Ok(())
    }

    /// Constraint on a pore; `Unconstrained` for pores outside the set.
    pub fn constraint(&self, pore: PoreId) -> PoreConstraint {
        self.constraints
            .get(pore.as_usize())
            .copied()
            .unwrap_or_default()
    }

    /// The value set on a pore: potential, rate, or group total.
    pub fn get(&self, pore: PoreId) -> SolverResult<Real> {
        match self.constraint(pore) {
            PoreConstraint::Unconstrained => {
                Err(SolverError::UndefinedBoundaryCondition { pore })
            }
            PoreConstraint::Dirichlet { value } => Ok(value),
            PoreConstraint::Neumann { rate } => Ok(rate),
            PoreConstraint::NeumannGroup { group } => Ok(self.group_totals[group]),
        }
    }

    fn pores_where<F>(&self, pred: F) -> Vec<PoreId>
    where
        F: Fn(&PoreConstraint) -> bool,
    {
        self.constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| pred(c))
            .map(|(i, _)| PoreId::from_usize(i))
            .collect()
    }

    pub fn dirichlet_pores(&self) -> Vec<PoreId> {
        self.pores_where(|c| matches!(c, PoreConstraint::Dirichlet { .. }))
    }

    /// Pores with a rate condition, single or grouped.
    pub fn neumann_pores(&self) -> Vec<PoreId> {
        self.pores_where(|c| {
            matches!(
                c,
                PoreConstraint::Neumann { .. } | PoreConstraint::NeumannGroup { .. }
            )
        })
    }

    /// Current members of a group.
    pub fn group_members(&self, group: usize) -> Vec<PoreId> {
        self.pores_where(|c| *c == PoreConstraint::NeumannGroup { group })
    }

    /// Size of the group table, never more than the largest number of groups
    /// that had members at the same time.
    pub fn num_groups(&self) -> usize {
        self.group_totals.len()
    }

    pub fn has_dirichlet(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c, PoreConstraint::Dirichlet { .. }))
    }

    /// Check that every connected cluster is anchored by a Dirichlet pore.
    ///
    /// Clusters are formed over throats with positive conductance; a cluster
    /// without a Dirichlet pore leaves the system singular.
    pub fn check_solvable(&self, network: &Network, conductance: &[Real]) -> SolverResult<()> {
        if self.num_pores() != network.num_pores() {
            return Err(SolverError::ProblemSetup {
                what: format!(
                    "boundary conditions cover {} pores, network has {}",
                    self.num_pores(),
                    network.num_pores()
                ),
            });
        }
        if !self.has_dirichlet() {
            return Err(SolverError::SingularSystem {
                what: "no pore has a Dirichlet condition".to_string(),
            });
        }

        let clusters =
            network.clusters(|t| conductance.get(t.as_usize()).is_some_and(|&g| g > 0.0));
        let mut anchored = vec![false; clusters.count];
        for (label, c) in clusters.labels.iter().zip(&self.constraints) {
            if matches!(c, PoreConstraint::Dirichlet { .. }) {
                anchored[*label] = true;
            }
        }
        match anchored.iter().position(|a| !a) {
            Some(cluster) => {
                let size = clusters.sizes()[cluster];
                Err(SolverError::SingularSystem {
                    what: format!("a cluster of {size} pores has no Dirichlet pore"),
                })
            }
            None => Ok(()),
        }
    }

    /// Write the conditions into an assembled system.
    ///
    /// Rates are added to the right-hand side first. Group totals are split
    /// over their current members in proportion to the assembled diagonal,
    /// or evenly when that is zero throughout. Dirichlet pores are then
    /// eliminated symmetrically so the matrix stays symmetric positive
    /// definite.
    pub fn apply(&self, system: &mut LinearSystem) -> SolverResult<()> {
        if system.b.len() != self.num_pores() {
            return Err(SolverError::ProblemSetup {
                what: format!(
                    "system has {} rows, boundary conditions cover {} pores",
                    system.b.len(),
                    self.num_pores()
                ),
            });
        }

        let diag = system.a.diagonal();
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); self.group_totals.len()];
        let mut fixed = Vec::new();
        for (i, c) in self.constraints.iter().enumerate() {
            match *c {
                PoreConstraint::Unconstrained => {}
                PoreConstraint::Dirichlet { value } => fixed.push((i, value)),
                PoreConstraint::Neumann { rate } => system.b[i] += rate,
                PoreConstraint::NeumannGroup { group } => members[group].push(i),
            }
        }

        for (group, pores) in members.iter().enumerate() {
            if pores.is_empty() {
                continue;
            }
            let total = self.group_totals[group];
            let weight: Real = pores.iter().map(|&i| diag[i]).sum();
            for &i in pores {
                let share = if weight > 0.0 {
                    diag[i] / weight
                } else {
                    1.0 / pores.len() as Real
                };
                system.b[i] += total * share;
            }
        }

        system.a.pin_symmetric(&mut system.b, &fixed);
        tracing::debug!(
            dirichlet = fixed.len(),
            groups = members.iter().filter(|m| !m.is_empty()).count(),
            "boundary conditions applied"
        );
        Ok(())
    }
}
