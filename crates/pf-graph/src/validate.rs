//! Network validation logic.

use std::collections::{BTreeMap, HashMap};

use pf_core::{PoreId, Real, ThroatId};

use crate::error::{GraphError, GraphResult};

/// Every throat joins two distinct, existing pores, and no pair repeats.
pub(crate) fn validate_throats(n_pores: usize, conns: &[[PoreId; 2]]) -> GraphResult<()> {
    let mut seen: HashMap<(PoreId, PoreId), ThroatId> = HashMap::with_capacity(conns.len());

    for (i, &[a, b]) in conns.iter().enumerate() {
        let throat = ThroatId::from_usize(i);
        for pore in [a, b] {
            if pore.as_usize() >= n_pores {
                return Err(GraphError::InvalidPoreRef { throat, pore });
            }
        }
        if a == b {
            return Err(GraphError::SelfLoop { throat, pore: a });
        }
        let key = (a.min(b), a.max(b));
        if let Some(&first) = seen.get(&key) {
            return Err(GraphError::DuplicateThroat { throat, first });
        }
        seen.insert(key, throat);
    }

    Ok(())
}

/// Attribute arrays match the entity counts and hold finite, non-negative values.
pub(crate) fn validate_attributes(
    n_pores: usize,
    n_throats: usize,
    pore_diameter: &[Real],
    throat_diameter: &[Real],
    throat_length: &[Option<Real>],
) -> GraphResult<()> {
    check_len("pore.diameter", n_pores, pore_diameter.len())?;
    check_len("throat.diameter", n_throats, throat_diameter.len())?;
    check_len("throat.length", n_throats, throat_length.len())?;

    check_values("pore.diameter", pore_diameter.iter().copied().map(Some))?;
    check_values("throat.diameter", throat_diameter.iter().copied().map(Some))?;
    check_values("throat.length", throat_length.iter().copied())?;
    Ok(())
}

pub(crate) fn validate_labels(
    n_pores: usize,
    labels: &BTreeMap<String, Vec<PoreId>>,
) -> GraphResult<()> {
    for (label, members) in labels {
        if let Some(&pore) = members.iter().find(|p| p.as_usize() >= n_pores) {
            return Err(GraphError::LabelPoreRef {
                label: label.clone(),
                pore,
            });
        }
    }
    Ok(())
}

/// Each throat appears exactly once in the slice of each of its endpoints.
pub(crate) fn validate_adjacency(
    conns: &[[PoreId; 2]],
    offsets: &[usize],
    pore_throats: &[ThroatId],
) -> GraphResult<()> {
    if pore_throats.len() != 2 * conns.len() {
        return Err(GraphError::AttributeLength {
            what: "adjacency",
            expected: 2 * conns.len(),
            actual: pore_throats.len(),
        });
    }

    for (p, w) in offsets.windows(2).enumerate() {
        let pore = PoreId::from_usize(p);
        for &t in &pore_throats[w[0]..w[1]] {
            let [a, b] = conns[t.as_usize()];
            if a != pore && b != pore {
                return Err(GraphError::InvalidPoreRef { throat: t, pore });
            }
        }
    }
    Ok(())
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> GraphResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(GraphError::AttributeLength {
            what,
            expected,
            actual,
        })
    }
}

fn check_values<I>(what: &'static str, values: I) -> GraphResult<()>
where
    I: IntoIterator<Item = Option<Real>>,
{
    for (index, value) in values.into_iter().enumerate() {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                return Err(GraphError::InvalidAttribute { what, index, value });
            }
        }
    }
    Ok(())
}
