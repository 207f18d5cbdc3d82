//! Core network data structures.

use std::collections::BTreeMap;

use nalgebra::Point3;
use pf_core::{PoreId, Real, ThroatId};
use petgraph::unionfind::UnionFind;

use crate::error::{GraphError, GraphResult};

/// The pore network: a validated, immutable set of pores and throats.
///
/// Geometric attributes live in fixed-schema arrays indexed by pore or throat
/// index. Adjacency is stored compactly: pore `i`'s throats are
/// `pore_throats[pore_throat_offsets[i]..pore_throat_offsets[i + 1]]`.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) coords: Vec<Point3<Real>>,
    pub(crate) pore_diameter: Vec<Real>,
    pub(crate) conns: Vec<[PoreId; 2]>,
    pub(crate) throat_diameter: Vec<Real>,
    pub(crate) throat_length: Vec<Option<Real>>,
    pub(crate) labels: BTreeMap<String, Vec<PoreId>>,
    pub(crate) pore_throat_offsets: Vec<usize>,
    pub(crate) pore_throats: Vec<ThroatId>,
}

/// Connected-component labelling of the pores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clusters {
    /// Cluster index per pore, dense in `0..count`, numbered by first pore.
    pub labels: Vec<usize>,
    pub count: usize,
}

impl Clusters {
    /// Number of pores in each cluster.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.count];
        for &c in &self.labels {
            sizes[c] += 1;
        }
        sizes
    }
}

impl Network {
    pub fn num_pores(&self) -> usize {
        self.coords.len()
    }

    pub fn num_throats(&self) -> usize {
        self.conns.len()
    }

    /// All pore ids in index order.
    pub fn pore_ids(&self) -> impl Iterator<Item = PoreId> + '_ {
        (0..self.num_pores()).map(PoreId::from_usize)
    }

    /// All throat ids in index order.
    pub fn throat_ids(&self) -> impl Iterator<Item = ThroatId> + '_ {
        (0..self.num_throats()).map(ThroatId::from_usize)
    }

    pub fn coords(&self, pore: PoreId) -> Point3<Real> {
        self.coords[pore.as_usize()]
    }

    pub fn all_coords(&self) -> &[Point3<Real>] {
        &self.coords
    }

    /// Endpoints of a throat, in the order they were added.
    pub fn conns(&self, throat: ThroatId) -> [PoreId; 2] {
        self.conns[throat.as_usize()]
    }

    pub fn throat_conns(&self) -> &[[PoreId; 2]] {
        &self.conns
    }

    pub fn pore_diameter(&self, pore: PoreId) -> Real {
        self.pore_diameter[pore.as_usize()]
    }

    pub fn pore_diameters(&self) -> &[Real] {
        &self.pore_diameter
    }

    /// Circular cross-section derived from the pore diameter.
    pub fn pore_area(&self, pore: PoreId) -> Real {
        let d = self.pore_diameter(pore);
        std::f64::consts::FRAC_PI_4 * d * d
    }

    pub fn throat_diameter(&self, throat: ThroatId) -> Real {
        self.throat_diameter[throat.as_usize()]
    }

    pub fn throat_diameters(&self) -> &[Real] {
        &self.throat_diameter
    }

    /// Explicit throat length, if one was supplied.
    pub fn throat_length(&self, throat: ThroatId) -> Option<Real> {
        self.throat_length[throat.as_usize()]
    }

    /// Center-to-center distance between a throat's pores.
    pub fn ctc_distance(&self, throat: ThroatId) -> Real {
        let [p1, p2] = self.conns(throat);
        nalgebra::distance(&self.coords(p1), &self.coords(p2))
    }

    /// Throats incident to a pore, sorted by throat index.
    pub fn pore_throats(&self, pore: PoreId) -> &[ThroatId] {
        let idx = pore.as_usize();
        if idx >= self.num_pores() {
            return &[];
        }
        let start = self.pore_throat_offsets[idx];
        let end = self.pore_throat_offsets[idx + 1];
        &self.pore_throats[start..end]
    }

    /// The pore at the far end of `throat` as seen from `pore`.
    pub fn other_end(&self, throat: ThroatId, pore: PoreId) -> Option<PoreId> {
        match self.conns(throat) {
            [a, b] if a == pore => Some(b),
            [a, b] if b == pore => Some(a),
            _ => None,
        }
    }

    /// Pores sharing a throat with `pore`.
    pub fn neighbor_pores(&self, pore: PoreId) -> Vec<PoreId> {
        self.pore_throats(pore)
            .iter()
            .filter_map(|&t| self.other_end(t, pore))
            .collect()
    }

    /// Number of throats incident to each pore.
    pub fn coordination_numbers(&self) -> Vec<usize> {
        self.pore_throat_offsets
            .windows(2)
            .map(|w| w[1] - w[0])
            .collect()
    }

    /// Pores carrying a label.
    pub fn pores(&self, label: &str) -> GraphResult<&[PoreId]> {
        self.labels
            .get(label)
            .map(Vec::as_slice)
            .ok_or_else(|| GraphError::UnknownLabel {
                label: label.to_string(),
            })
    }

    /// All label names, sorted.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }

    /// Check every pore in `pores` exists.
    pub fn check_pores(&self, pores: &[PoreId]) -> GraphResult<()> {
        let len = self.num_pores();
        match pores.iter().find(|p| p.as_usize() >= len) {
            Some(&pore) => Err(GraphError::PoreOutOfRange { pore, len }),
            None => Ok(()),
        }
    }

    /// Membership mask for a pore set.
    pub fn pore_mask(&self, pores: &[PoreId]) -> GraphResult<Vec<bool>> {
        self.check_pores(pores)?;
        let mut mask = vec![false; self.num_pores()];
        for p in pores {
            mask[p.as_usize()] = true;
        }
        Ok(mask)
    }

    /// Throats with exactly one endpoint in `pores`.
    pub fn boundary_throats(&self, pores: &[PoreId]) -> GraphResult<Vec<ThroatId>> {
        let mask = self.pore_mask(pores)?;
        Ok(self
            .throat_ids()
            .filter(|&t| {
                let [a, b] = self.conns(t);
                mask[a.as_usize()] != mask[b.as_usize()]
            })
            .collect())
    }

    /// Connected components over the throats accepted by `active`.
    ///
    /// Pores without any active throat form singleton clusters.
    pub fn clusters<F>(&self, active: F) -> Clusters
    where
        F: Fn(ThroatId) -> bool,
    {
        let n = self.num_pores();
        let mut uf = UnionFind::<usize>::new(n);
        for t in self.throat_ids().filter(|&t| active(t)) {
            let [a, b] = self.conns(t);
            uf.union(a.as_usize(), b.as_usize());
        }

        let roots = uf.into_labeling();
        let mut dense = vec![usize::MAX; n];
        let mut labels = Vec::with_capacity(n);
        let mut count = 0;
        for root in roots {
            if dense[root] == usize::MAX {
                dense[root] = count;
                count += 1;
            }
            labels.push(dense[root]);
        }
        Clusters { labels, count }
    }
}

#[cfg(test)]
mod tests {
    use crate::NetworkBuilder;
    use pf_core::{PoreId, ThroatId};

    fn chain(n: usize) -> crate::Network {
        let mut b = NetworkBuilder::new();
        let pores: Vec<_> = (0..n).map(|i| b.add_pore([i as f64, 0.0, 0.0])).collect();
        for w in pores.windows(2) {
            b.add_throat(w[0], w[1]);
        }
        b.build().unwrap()
    }

    #[test]
    fn other_end_and_neighbors() {
        let net = chain(3);
        let t0 = ThroatId::from_index(0);
        let p0 = PoreId::from_index(0);
        let p1 = PoreId::from_index(1);
        assert_eq!(net.other_end(t0, p0), Some(p1));
        assert_eq!(net.other_end(t0, PoreId::from_index(2)), None);
        assert_eq!(net.neighbor_pores(p1), vec![p0, PoreId::from_index(2)]);
        assert_eq!(net.coordination_numbers(), vec![1, 2, 1]);
    }

    #[test]
    fn ctc_distance_uses_coordinates() {
        let net = chain(2);
        assert!((net.ctc_distance(ThroatId::from_index(0)) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn clusters_respect_active_filter() {
        let net = chain(4);
        let all = net.clusters(|_| true);
        assert_eq!(all.count, 1);

        // Cutting the middle throat splits the chain in two.
        let cut = net.clusters(|t| t.index() != 1);
        assert_eq!(cut.count, 2);
        assert_eq!(cut.labels, vec![0, 0, 1, 1]);
        assert_eq!(cut.sizes(), vec![2, 2]);
    }
}
