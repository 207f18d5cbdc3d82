//! Shared network fixtures for solver tests.
#![allow(dead_code)]

use pf_core::PoreId;
use pf_graph::{Network, NetworkBuilder};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Regular lattice of `shape[0] x shape[1] x shape[2]` pores.
///
/// Pore `(i, j, k)` sits at `(i, j, k) * spacing` with diameter `spacing`;
/// throats join axis neighbors and have diameter `spacing / 2`. Faces are
/// labelled `front`/`back` (x), `left`/`right` (y) and `bottom`/`top` (z).
pub struct Lattice {
    pub network: Network,
    pub shape: [usize; 3],
}

impl Lattice {
    pub fn cubic(shape: [usize; 3], spacing: f64) -> Self {
        let [nx, ny, nz] = shape;
        let mut b = NetworkBuilder::new();
        let mut faces: [Vec<PoreId>; 6] = Default::default();
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    let c = [i as f64 * spacing, j as f64 * spacing, k as f64 * spacing];
                    let p = b.add_pore_with_diameter(c, spacing);
                    let on_face = [i == 0, i + 1 == nx, j == 0, j + 1 == ny, k == 0, k + 1 == nz];
                    for (face, on) in on_face.into_iter().enumerate() {
                        if on {
                            faces[face].push(p);
                        }
                    }
                }
            }
        }

        let lattice = |i: usize, j: usize, k: usize| PoreId::from_usize((i * ny + j) * nz + k);
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    let p = lattice(i, j, k);
                    let mut link = |q: PoreId| {
                        let t = b.add_throat(p, q);
                        b.set_throat_diameter(t, 0.5 * spacing);
                    };
                    if i + 1 < nx {
                        link(lattice(i + 1, j, k));
                    }
                    if j + 1 < ny {
                        link(lattice(i, j + 1, k));
                    }
                    if k + 1 < nz {
                        link(lattice(i, j, k + 1));
                    }
                }
            }
        }

        for (name, pores) in ["front", "back", "left", "right", "bottom", "top"]
            .into_iter()
            .zip(faces)
        {
            b.add_label(name, &pores);
        }

        Self {
            network: b.build().expect("lattice fixture"),
            shape,
        }
    }

    pub fn pore(&self, i: usize, j: usize, k: usize) -> PoreId {
        let [_, ny, nz] = self.shape;
        PoreId::from_usize((i * ny + j) * nz + k)
    }

    pub fn face(&self, label: &str) -> Vec<PoreId> {
        self.network.pores(label).expect("face label").to_vec()
    }

    /// Pores in the x-layer `i`.
    pub fn layer(&self, i: usize) -> Vec<PoreId> {
        let [_, ny, nz] = self.shape;
        (0..ny)
            .flat_map(|j| (0..nz).map(move |k| (j, k)))
            .map(|(j, k)| self.pore(i, j, k))
            .collect()
    }
}

/// A hub pore joined to `k` leaves on a unit circle.
pub fn star(k: usize) -> (Network, PoreId, Vec<PoreId>) {
    let mut b = NetworkBuilder::new();
    let hub = b.add_pore_with_diameter([0.0, 0.0, 0.0], 0.2);
    let leaves: Vec<_> = (0..k)
        .map(|n| {
            let angle = std::f64::consts::TAU * n as f64 / k as f64;
            b.add_pore_with_diameter([angle.cos(), angle.sin(), 0.0], 0.2)
        })
        .collect();
    for &leaf in &leaves {
        b.add_throat(hub, leaf);
    }
    (b.build().expect("star fixture"), hub, leaves)
}
