//! Domain extents measured from face pores.
//!
//! Effective-property calculations need the length between two boundary faces
//! and the cross-sectional area of a face. Both are measured from pore
//! coordinates at call time.

use pf_core::{Area, Length, PoreId, Real, m, m2};

use crate::error::{GraphError, GraphResult};
use crate::network::Network;

impl Network {
    /// Distance between two faces.
    ///
    /// For every pore of `face_b` the nearest pore of `face_a` is found; the
    /// median of those distances is the domain length.
    pub fn domain_length(&self, face_a: &[PoreId], face_b: &[PoreId]) -> GraphResult<Length> {
        if face_a.is_empty() || face_b.is_empty() {
            return Err(GraphError::EmptyPoreSet {
                what: "domain length",
            });
        }
        self.check_pores(face_a)?;
        self.check_pores(face_b)?;

        let mut nearest: Vec<Real> = face_b
            .iter()
            .map(|&pb| {
                let cb = self.coords(pb);
                face_a
                    .iter()
                    .map(|&pa| nalgebra::distance(&self.coords(pa), &cb))
                    .fold(Real::INFINITY, Real::min)
            })
            .collect();
        nearest.sort_by(Real::total_cmp);

        let mid = nearest.len() / 2;
        let length = if nearest.len() % 2 == 0 {
            0.5 * (nearest[mid - 1] + nearest[mid])
        } else {
            nearest[mid]
        };

        if length > 0.0 {
            Ok(m(length))
        } else {
            Err(GraphError::DegenerateDomain {
                what: "faces coincide",
            })
        }
    }

    /// Cross-sectional area of a planar face.
    ///
    /// The face normal is the axis along which the pore coordinates spread
    /// least. The area is the product of the two in-plane extents of the
    /// face's bounding box, grown by each pore's radius.
    pub fn domain_area(&self, face: &[PoreId]) -> GraphResult<Area> {
        if face.is_empty() {
            return Err(GraphError::EmptyPoreSet { what: "domain area" });
        }
        self.check_pores(face)?;

        let mut lo = [Real::INFINITY; 3];
        let mut hi = [Real::NEG_INFINITY; 3];
        let mut lo_r = [Real::INFINITY; 3];
        let mut hi_r = [Real::NEG_INFINITY; 3];
        for &p in face {
            let c = self.coords(p);
            let r = 0.5 * self.pore_diameter(p);
            for axis in 0..3 {
                lo[axis] = lo[axis].min(c[axis]);
                hi[axis] = hi[axis].max(c[axis]);
                lo_r[axis] = lo_r[axis].min(c[axis] - r);
                hi_r[axis] = hi_r[axis].max(c[axis] + r);
            }
        }

        let normal = (0..3)
            .min_by(|&a, &b| (hi[a] - lo[a]).total_cmp(&(hi[b] - lo[b])))
            .unwrap_or(0);
        let area: Real = (0..3)
            .filter(|&axis| axis != normal)
            .map(|axis| hi_r[axis] - lo_r[axis])
            .product();

        if area > 0.0 {
            Ok(m2(area))
        } else {
            Err(GraphError::DegenerateDomain {
                what: "face has zero area",
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::NetworkBuilder;
    use pf_core::PoreId;

    /// 2 x 3 x 2 grid with unit spacing and unit pore diameter.
    fn slab() -> (crate::Network, Vec<PoreId>, Vec<PoreId>) {
        let mut b = NetworkBuilder::new();
        let mut left = Vec::new();
        let mut right = Vec::new();
        for i in 0..2 {
            for j in 0..3 {
                for k in 0..2 {
                    let p = b.add_pore_with_diameter([i as f64, j as f64, k as f64], 1.0);
                    if i == 0 {
                        left.push(p);
                    } else {
                        right.push(p);
                    }
                }
            }
        }
        (b.build().unwrap(), left, right)
    }

    #[test]
    fn length_between_opposite_faces() {
        let (net, left, right) = slab();
        let l = net.domain_length(&left, &right).unwrap();
        assert!((l.value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn area_includes_pore_radius() {
        let (net, left, _) = slab();
        let a = net.domain_area(&left).unwrap();
        // y spans 0..2 plus radius -> 3, z spans 0..1 plus radius -> 2
        assert!((a.value - 6.0).abs() < 1e-12);
    }

    #[test]
    fn empty_face_is_rejected() {
        let (net, left, _) = slab();
        assert!(net.domain_length(&left, &[]).is_err());
        assert!(net.domain_area(&[]).is_err());
    }

    #[test]
    fn single_point_face_without_diameter_is_degenerate() {
        let mut b = NetworkBuilder::new();
        let p = b.add_pore([0.0, 0.0, 0.0]);
        let net = b.build().unwrap();
        assert!(net.domain_area(&[p]).is_err());
    }
}
