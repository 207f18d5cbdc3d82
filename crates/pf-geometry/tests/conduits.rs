use pf_core::ThroatId;
use pf_geometry::{
    Archetype, ConduitLengths, ConduitShape, GeometryError, SegmentArrays, Segments,
    SpheresAndCylinders, compute_conduit_conductance, compute_conduit_segments,
    compute_shape_factors, conduit_lengths,
};
use pf_graph::{Network, NetworkBuilder};
use proptest::prelude::*;

/// Two pores `ctc` apart joined by one throat.
fn pair(d1: f64, dt: f64, d2: f64, ctc: f64) -> Network {
    let mut b = NetworkBuilder::new();
    let p0 = b.add_pore_with_diameter([0.0, 0.0, 0.0], d1);
    let p1 = b.add_pore_with_diameter([ctc, 0.0, 0.0], d2);
    let t = b.add_throat(p0, p1);
    b.set_throat_diameter(t, dt);
    b.build().unwrap()
}

/// Chain of `n` unit pores with unit spacing.
fn chain(n: usize, dt: f64) -> Network {
    let mut b = NetworkBuilder::new();
    let pores: Vec<_> = (0..n)
        .map(|i| b.add_pore_with_diameter([i as f64, 0.0, 0.0], 1.0))
        .collect();
    for w in pores.windows(2) {
        let t = b.add_throat(w[0], w[1]);
        b.set_throat_diameter(t, dt);
    }
    b.build().unwrap()
}

#[test]
fn combined_matches_series_of_segments() {
    let net = pair(1.0, 0.5, 1.0, 2.0);
    let segs = compute_conduit_segments(&net, Archetype::SpheresAndCylinders, None).unwrap();
    let g = compute_conduit_conductance(&net, Archetype::SpheresAndCylinders, None).unwrap();
    let row = segs.row(ThroatId::from_index(0));
    let expected = 1.0 / (1.0 / row.pore1 + 1.0 / row.throat + 1.0 / row.pore2);
    assert!((g[0] - expected).abs() < 1e-12 * expected);
    assert!(g[0] <= row.pore1.min(row.throat).min(row.pore2));
}

#[test]
fn results_are_in_throat_order() {
    let net = chain(20, 0.4);
    let g = compute_conduit_conductance(&net, Archetype::SpheresAndCylinders, None).unwrap();
    assert_eq!(g.len(), 19);
    // identical conduits give identical coefficients
    assert!(g.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn explicit_lengths_override_inferred() {
    let net = pair(1.0, 0.5, 1.0, 2.0);
    let lengths = ConduitLengths {
        pore1: vec![0.25],
        throat: vec![0.6],
        pore2: vec![0.15],
    };
    let segs =
        compute_conduit_segments(&net, Archetype::PyramidsAndCuboids, Some(&lengths)).unwrap();
    let row = segs.row(ThroatId::from_index(0));
    assert!((row.pore1 - 0.5 / 0.25).abs() < 1e-12);
    assert!((row.throat - 0.25 / 0.6).abs() < 1e-12);
    assert!((row.pore2 - 0.5 / 0.15).abs() < 1e-12);
}

#[test]
fn explicit_lengths_must_cover_every_throat() {
    let net = chain(3, 0.4);
    let lengths = SegmentArrays::from_rows([Segments::new(0.1, 0.1, 0.1)]);
    let err = compute_conduit_segments(&net, Archetype::SpheresAndCylinders, Some(&lengths))
        .unwrap_err();
    assert_eq!(
        err,
        GeometryError::LengthMismatch {
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn inferred_lengths_span_the_conduit() {
    let net = pair(1.0, 0.5, 0.8, 2.0);
    for archetype in [Archetype::SpheresAndCylinders, Archetype::PyramidsAndCuboids] {
        let l = conduit_lengths(&net, archetype).unwrap();
        let total = l.pore1[0] + l.throat[0] + l.pore2[0];
        assert!((total - 2.0).abs() < 1e-12, "{archetype}");
    }
}

#[test]
fn zero_throat_diameter_breaks_ball_and_stick() {
    // The cap length equals the pore radius, so D > 2L fails.
    let net = pair(1.0, 0.0, 1.0, 2.0);
    let err = compute_conduit_segments(&net, Archetype::SpheresAndCylinders, None).unwrap_err();
    assert!(matches!(err, GeometryError::BallAndStickInvalid { .. }));
}

#[test]
fn cones_need_wider_pores() {
    let net = pair(1.0, 1.2, 1.0, 2.0);
    assert!(matches!(
        compute_conduit_segments(&net, Archetype::ConesAndCylinders, None),
        Err(GeometryError::NonPhysical { .. })
    ));
}

#[test]
fn shape_factors_per_archetype() {
    let net = chain(4, 0.4);
    for archetype in Archetype::ALL {
        let sf = compute_shape_factors(&net, archetype, None).unwrap();
        assert_eq!(sf.len(), 3);
        assert!(sf.pore1.iter().all(|&s| s.is_finite() && s > 0.0), "{archetype}");
        if archetype != Archetype::ConesAndCylinders {
            // prismatic throats carry exactly their base conductance
            assert!(sf.throat.iter().all(|&s| (s - 1.0).abs() < 1e-12), "{archetype}");
        }
    }
}

proptest! {
    #[test]
    fn degenerate_segments_have_unit_shape_factor(
        d in 0.01f64..10.0,
        dt in 0.0f64..10.0,
        lt in 0.01f64..10.0
    ) {
        let dims = pf_geometry::ConduitDims {
            diameters: Segments::new(d, dt, d),
            lengths: Segments::new(0.0, lt, 0.0),
        };
        let t = ThroatId::from_index(0);
        let sf = SpheresAndCylinders.shape_factors(t, &dims).unwrap();
        prop_assert_eq!(sf.pore1, 1.0);
        prop_assert_eq!(sf.pore2, 1.0);
        let g = SpheresAndCylinders.segment_conductances(t, &dims).unwrap();
        prop_assert!(g.pore1.is_infinite());
    }

    #[test]
    fn conduit_never_beats_its_weakest_segment(
        d in 0.2f64..2.0,
        ratio in 0.05f64..0.95,
        gap in 0.1f64..3.0
    ) {
        let dt = d * ratio;
        let net = pair(d, dt, d, d + gap);
        let segs = compute_conduit_segments(&net, Archetype::SpheresAndCylinders, None).unwrap();
        let row = segs.row(ThroatId::from_index(0));
        let g = row.series();
        prop_assert!(g > 0.0);
        prop_assert!(g <= row.pore1.min(row.throat).min(row.pore2) * (1.0 + 1e-12));
    }
}
