use pf_geometry::{
    Archetype, ConduitLengths, SegmentArrays, Segments, compute_conduit_segments, conduit_lengths,
};
use pf_graph::{Network, NetworkBuilder};
use pf_physics::{
    PhysicsError, PoreProperty, diffusive_conductance, hagen_poiseuille, hydraulic_conductance,
    thermal_conductance,
};
use proptest::prelude::*;

fn pair() -> Network {
    scaled_pair(1.0)
}

/// Two pores `scale` apart with diameter `scale`, throat diameter `scale / 2`.
fn scaled_pair(scale: f64) -> Network {
    let mut b = NetworkBuilder::new();
    let p0 = b.add_pore_with_diameter([0.0, 0.0, 0.0], scale);
    let p1 = b.add_pore_with_diameter([scale, 0.0, 0.0], scale);
    let t = b.add_throat(p0, p1);
    b.set_throat_diameter(t, 0.5 * scale);
    b.build().unwrap()
}

#[test]
fn hagen_poiseuille_reference_value() {
    let net = pair();
    let areas = SegmentArrays::from_rows([Segments::new(1.0, 0.5, 1.0)]);
    let lengths = ConduitLengths::from_rows([Segments::new(0.25, 0.6, 0.15)]);
    let g = hagen_poiseuille(&net, &areas, &lengths, &PoreProperty::Uniform(1e-5)).unwrap();
    assert!((g[0] - 1421.0262776).abs() < 1e-6, "{}", g[0]);
}

#[test]
fn hagen_poiseuille_zero_length_adds_no_resistance() {
    let net = pair();
    let areas = SegmentArrays::from_rows([Segments::new(1.0, 0.5, 1.0)]);
    let lengths = ConduitLengths::from_rows([Segments::new(0.0, 0.6, 0.0)]);
    let g = hagen_poiseuille(&net, &areas, &lengths, &PoreProperty::Uniform(1e-5)).unwrap();
    let throat_only = 0.25 / (8.0 * std::f64::consts::PI * 1e-5 * 0.6);
    assert!((g[0] - throat_only).abs() < 1e-9 * throat_only);
}

#[test]
fn uniform_properties_scale_the_geometric_coefficient() {
    let net = pair();
    let segs = compute_conduit_segments(&net, Archetype::SpheresAndCylinders, None).unwrap();
    let base = segs.combined()[0];

    let gd = diffusive_conductance(&net, &segs, &PoreProperty::Uniform(2.0)).unwrap();
    let gk = thermal_conductance(&net, &segs, &PoreProperty::Uniform(3.0)).unwrap();
    assert!((gd[0] - 2.0 * base).abs() < 1e-12 * base);
    assert!((gk[0] - 3.0 * base).abs() < 1e-12 * base);
}

#[test]
fn hydraulic_conductance_follows_poiseuille_scaling() {
    let mu = PoreProperty::Uniform(1e-3);
    for archetype in Archetype::ALL {
        let g1 = hydraulic_conductance(&scaled_pair(1.0), archetype, None, &mu).unwrap()[0];
        let g2 = hydraulic_conductance(&scaled_pair(2.0), archetype, None, &mu).unwrap()[0];
        let ratio = g2 / g1;
        assert!((ratio - 8.0).abs() < 1e-9, "{archetype}: ratio {ratio}");
    }
}

#[test]
fn hydraulic_conductance_is_inverse_in_viscosity() {
    let net = pair();
    let archetype = Archetype::SpheresAndCylinders;
    let thin = hydraulic_conductance(&net, archetype, None, &PoreProperty::Uniform(1e-3));
    let thick = hydraulic_conductance(&net, archetype, None, &PoreProperty::Uniform(4e-3));
    let (thin, thick) = (thin.unwrap()[0], thick.unwrap()[0]);
    assert!((thin - 4.0 * thick).abs() < 1e-12 * thin);
}

#[test]
fn hydraulic_conductance_matches_circular_ducts() {
    let net = pair();
    let mu = PoreProperty::Uniform(1e-5);
    let archetype = Archetype::SpheresAndCylinders;
    let lengths = conduit_lengths(&net, archetype).unwrap();
    let g = hydraulic_conductance(&net, archetype, Some(&lengths), &mu).unwrap();

    let area = |d: f64| std::f64::consts::FRAC_PI_4 * d * d;
    let areas = SegmentArrays::from_rows([Segments::new(area(1.0), area(0.5), area(1.0))]);
    let expected = hagen_poiseuille(&net, &areas, &lengths, &mu).unwrap();
    assert!((g[0] - expected[0]).abs() < 1e-12 * expected[0]);
}

#[test]
fn hydraulic_conductance_rejects_bad_viscosity() {
    let net = pair();
    let err = hydraulic_conductance(
        &net,
        Archetype::ConesAndCylinders,
        None,
        &PoreProperty::Uniform(0.0),
    );
    assert!(matches!(err, Err(PhysicsError::InvalidProperty { .. })));
}

#[test]
fn per_pore_property_weights_each_segment() {
    let net = pair();
    let segs = SegmentArrays::from_rows([Segments::new(1.0, 1.0, 1.0)]);
    let g = diffusive_conductance(&net, &segs, &PoreProperty::from(vec![1.0, 3.0])).unwrap();
    // segments 1, 2, 3 in series
    let expected = 1.0 / (1.0 + 0.5 + 1.0 / 3.0);
    assert!((g[0] - expected).abs() < 1e-12);
}

#[test]
fn segment_count_must_match_network() {
    let net = pair();
    let segs = SegmentArrays::default();
    assert!(matches!(
        diffusive_conductance(&net, &segs, &PoreProperty::Uniform(1.0)),
        Err(PhysicsError::LengthMismatch { expected: 1, actual: 0, .. })
    ));
}

proptest! {
    #[test]
    fn doubling_diffusivity_doubles_conductance(d in 1e-3f64..1e3) {
        let net = pair();
        let segs = compute_conduit_segments(&net, Archetype::SpheresAndCylinders, None).unwrap();
        let g1 = diffusive_conductance(&net, &segs, &PoreProperty::Uniform(d)).unwrap()[0];
        let g2 = diffusive_conductance(&net, &segs, &PoreProperty::Uniform(2.0 * d)).unwrap()[0];
        prop_assert!((g2 - 2.0 * g1).abs() <= 1e-12 * g2);
    }
}
