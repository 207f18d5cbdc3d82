//! Incremental network builder.

use std::collections::BTreeMap;

use nalgebra::Point3;
use pf_core::{PoreId, Real, ThroatId};

use crate::error::GraphResult;
use crate::network::Network;
use crate::validate;

/// Builder for constructing a network incrementally.
///
/// Use `add_pore` and `add_throat` to build up the topology, attach geometric
/// attributes and labels, then call `build()` to validate and freeze it into
/// an immutable `Network`.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    coords: Vec<Point3<Real>>,
    pore_diameter: Vec<Real>,
    conns: Vec<[PoreId; 2]>,
    throat_diameter: Vec<Real>,
    throat_length: Vec<Option<Real>>,
    labels: BTreeMap<String, Vec<PoreId>>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pore at `coords` (diameter 0 until set).
    pub fn add_pore(&mut self, coords: [Real; 3]) -> PoreId {
        self.add_pore_with_diameter(coords, 0.0)
    }

    pub fn add_pore_with_diameter(&mut self, coords: [Real; 3], diameter: Real) -> PoreId {
        let id = PoreId::from_usize(self.coords.len());
        self.coords.push(Point3::from(coords));
        self.pore_diameter.push(diameter);
        id
    }

    /// Add a throat between two pores (diameter 0, no explicit length).
    pub fn add_throat(&mut self, p1: PoreId, p2: PoreId) -> ThroatId {
        let id = ThroatId::from_usize(self.conns.len());
        self.conns.push([p1, p2]);
        self.throat_diameter.push(0.0);
        self.throat_length.push(None);
        id
    }

    pub fn set_pore_diameter(&mut self, pore: PoreId, diameter: Real) {
        if let Some(d) = self.pore_diameter.get_mut(pore.as_usize()) {
            *d = diameter;
        }
    }

    pub fn set_throat_diameter(&mut self, throat: ThroatId, diameter: Real) {
        if let Some(d) = self.throat_diameter.get_mut(throat.as_usize()) {
            *d = diameter;
        }
    }

    pub fn set_throat_length(&mut self, throat: ThroatId, length: Real) {
        if let Some(l) = self.throat_length.get_mut(throat.as_usize()) {
            *l = Some(length);
        }
    }

    /// Replace all pore diameters at once. Length is checked in `build()`.
    pub fn set_pore_diameters(&mut self, diameters: Vec<Real>) {
        self.pore_diameter = diameters;
    }

    /// Replace all throat diameters at once. Length is checked in `build()`.
    pub fn set_throat_diameters(&mut self, diameters: Vec<Real>) {
        self.throat_diameter = diameters;
    }

    /// Replace all throat lengths with explicit values.
    pub fn set_throat_lengths(&mut self, lengths: Vec<Real>) {
        self.throat_length = lengths.into_iter().map(Some).collect();
    }

    /// Tag pores with a label. Repeated calls extend the label.
    pub fn add_label(&mut self, name: impl Into<String>, pores: &[PoreId]) {
        self.labels
            .entry(name.into())
            .or_default()
            .extend_from_slice(pores);
    }

    pub fn num_pores(&self) -> usize {
        self.coords.len()
    }

    pub fn num_throats(&self) -> usize {
        self.conns.len()
    }

    /// Validate and build the network.
    pub fn build(mut self) -> GraphResult<Network> {
        let n_pores = self.coords.len();
        validate::validate_throats(n_pores, &self.conns)?;
        validate::validate_attributes(
            n_pores,
            self.conns.len(),
            &self.pore_diameter,
            &self.throat_diameter,
            &self.throat_length,
        )?;
        validate::validate_labels(n_pores, &self.labels)?;

        for members in self.labels.values_mut() {
            members.sort();
            members.dedup();
        }

        let (pore_throat_offsets, pore_throats) = Self::build_adjacency(n_pores, &self.conns);
        validate::validate_adjacency(&self.conns, &pore_throat_offsets, &pore_throats)?;

        tracing::debug!(
            pores = n_pores,
            throats = self.conns.len(),
            labels = self.labels.len(),
            "network built"
        );

        Ok(Network {
            coords: self.coords,
            pore_diameter: self.pore_diameter,
            conns: self.conns,
            throat_diameter: self.throat_diameter,
            throat_length: self.throat_length,
            labels: self.labels,
            pore_throat_offsets,
            pore_throats,
        })
    }

    /// Compact pore -> throat adjacency via a counting pass.
    fn build_adjacency(n_pores: usize, conns: &[[PoreId; 2]]) -> (Vec<usize>, Vec<ThroatId>) {
        let mut degree = vec![0_usize; n_pores];
        for [a, b] in conns {
            degree[a.as_usize()] += 1;
            degree[b.as_usize()] += 1;
        }

        let mut offsets = Vec::with_capacity(n_pores + 1);
        offsets.push(0);
        for d in &degree {
            let last = offsets[offsets.len() - 1];
            offsets.push(last + d);
        }

        // Throats are visited in index order, so each pore's slice ends up sorted.
        let mut cursor = offsets[..n_pores].to_vec();
        let mut flat = vec![ThroatId::from_index(0); 2 * conns.len()];
        for (t, [a, b]) in conns.iter().enumerate() {
            for p in [a, b] {
                let slot = &mut cursor[p.as_usize()];
                flat[*slot] = ThroatId::from_usize(t);
                *slot += 1;
            }
        }

        (offsets, flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;

    #[test]
    fn builder_basic() {
        let mut builder = NetworkBuilder::new();
        let p1 = builder.add_pore([0.0, 0.0, 0.0]);
        let p2 = builder.add_pore([1.0, 0.0, 0.0]);
        let t1 = builder.add_throat(p1, p2);

        assert_eq!(p1.index(), 0);
        assert_eq!(p2.index(), 1);
        assert_eq!(t1.index(), 0);
        assert_eq!(builder.num_pores(), 2);
        assert_eq!(builder.num_throats(), 1);
    }

    #[test]
    fn builder_attributes() {
        let mut builder = NetworkBuilder::new();
        let p1 = builder.add_pore([0.0, 0.0, 0.0]);
        let p2 = builder.add_pore_with_diameter([1.0, 0.0, 0.0], 0.4);
        let t = builder.add_throat(p1, p2);
        builder.set_pore_diameter(p1, 0.5);
        builder.set_throat_diameter(t, 0.2);
        builder.set_throat_length(t, 0.3);

        let net = builder.build().unwrap();
        assert_eq!(net.pore_diameter(p1), 0.5);
        assert_eq!(net.pore_diameter(p2), 0.4);
        assert_eq!(net.throat_diameter(t), 0.2);
        assert_eq!(net.throat_length(t), Some(0.3));
    }

    #[test]
    fn builder_adjacency_sorted() {
        let mut builder = NetworkBuilder::new();
        let p: Vec<_> = (0..4).map(|i| builder.add_pore([i as f64, 0.0, 0.0])).collect();
        let t0 = builder.add_throat(p[1], p[0]);
        let t1 = builder.add_throat(p[1], p[2]);
        let t2 = builder.add_throat(p[3], p[1]);

        let net = builder.build().unwrap();
        assert_eq!(net.pore_throats(p[1]), &[t0, t1, t2]);
        assert_eq!(net.pore_throats(p[0]), &[t0]);
        assert_eq!(net.pore_throats(PoreId::from_index(99)), &[]);
    }

    #[test]
    fn builder_rejects_bulk_length_mismatch() {
        let mut builder = NetworkBuilder::new();
        builder.add_pore([0.0, 0.0, 0.0]);
        builder.set_pore_diameters(vec![1.0, 2.0]);
        assert!(matches!(
            builder.build(),
            Err(GraphError::AttributeLength {
                what: "pore.diameter",
                ..
            })
        ));
    }

    #[test]
    fn labels_are_sorted_and_deduplicated() {
        let mut builder = NetworkBuilder::new();
        let a = builder.add_pore([0.0, 0.0, 0.0]);
        let b = builder.add_pore([1.0, 0.0, 0.0]);
        builder.add_label("face", &[b, a]);
        builder.add_label("face", &[a]);
        let net = builder.build().unwrap();
        assert_eq!(net.pores("face").unwrap(), &[a, b]);
        assert!(net.pores("missing").is_err());
    }
}
