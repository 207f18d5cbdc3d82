//! Transport properties sampled at pores.

use pf_core::{PoreId, Real, ThroatId};
use pf_graph::Network;

use crate::error::{PhysicsError, PhysicsResult};

/// A pore-sampled transport property such as diffusivity or viscosity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoreProperty {
    Uniform(Real),
    PerPore(Vec<Real>),
}

impl From<Real> for PoreProperty {
    fn from(v: Real) -> Self {
        PoreProperty::Uniform(v)
    }
}

impl From<Vec<Real>> for PoreProperty {
    fn from(v: Vec<Real>) -> Self {
        PoreProperty::PerPore(v)
    }
}

impl PoreProperty {
    /// Check the property against a network: one entry per pore, each finite
    /// and strictly positive.
    pub fn validate(&self, network: &Network, what: &'static str) -> PhysicsResult<()> {
        let values: &[Real] = match self {
            PoreProperty::Uniform(v) => core::slice::from_ref(v),
            PoreProperty::PerPore(v) => {
                if v.len() != network.num_pores() {
                    return Err(PhysicsError::LengthMismatch {
                        what,
                        expected: network.num_pores(),
                        actual: v.len(),
                    });
                }
                v
            }
        };
        match values.iter().position(|v| !(v.is_finite() && *v > 0.0)) {
            Some(index) => Err(PhysicsError::InvalidProperty {
                what,
                index,
                value: values[index],
            }),
            None => Ok(()),
        }
    }

    /// Value at a pore. Call [`validate`](Self::validate) first.
    pub fn at_pore(&self, pore: PoreId) -> Real {
        match self {
            PoreProperty::Uniform(v) => *v,
            PoreProperty::PerPore(v) => v[pore.as_usize()],
        }
    }

    /// Value at a throat: the mean of its two pores.
    pub fn at_throat(&self, network: &Network, throat: ThroatId) -> Real {
        match self {
            PoreProperty::Uniform(v) => *v,
            PoreProperty::PerPore(_) => {
                let [p1, p2] = network.conns(throat);
                0.5 * (self.at_pore(p1) + self.at_pore(p2))
            }
        }
    }
}
