//! Filter-width providers on a Cartesian channel.

use pans_config::DeltaCoeffsDef;
use pans_core::units::m;
use pans_delta::{FilterWidth, UniformDelta, build_filter_width, filter_width_catalog};
use pans_mesh::{ChannelSpec, MeshGeometry, channel};
use std::collections::BTreeMap;

fn cube_channel() -> pans_mesh::CellMesh {
    // 0.1 m cubes: 4 x 10 x 1 cells over 0.4 x 1.0 x 0.1
    channel(&ChannelSpec {
        nx: 4,
        ny: 10,
        nz: 1,
        length: m(0.4),
        height: m(1.0),
        depth: m(0.1),
        ..ChannelSpec::default()
    })
    .unwrap()
}

#[test]
fn cube_root_vol_on_cubic_cells_equals_edge_length() {
    let mesh = cube_channel();
    let delta = build_filter_width("cubeRootVol", &BTreeMap::new())
        .unwrap()
        .delta(&mesh);

    assert_eq!(delta.len(), mesh.n_cells());
    for &d in delta.iter() {
        assert!((d - 0.1).abs() < 1e-12);
    }
}

#[test]
fn delta_coeff_scales_width() {
    let mesh = cube_channel();
    let mut coeffs = BTreeMap::new();
    coeffs.insert(
        "maxDeltaxyz".to_string(),
        DeltaCoeffsDef {
            delta_coeff: Some(2.0),
            ..DeltaCoeffsDef::default()
        },
    );
    let delta = build_filter_width("maxDeltaxyz", &coeffs)
        .unwrap()
        .delta(&mesh);
    assert!((delta[0] - 0.2).abs() < 1e-12);
}

#[test]
fn prandtl_damps_near_wall_only() {
    let mesh = cube_channel();
    let delta = build_filter_width("Prandtl", &BTreeMap::new())
        .unwrap()
        .delta(&mesh);

    // First cell centre at y = 0.05: kappa y / Cdelta = 0.41 * 0.05 / 0.158 ~ 0.13 > 0.1
    // so only very thin near-wall cells are damped; here the geometric width wins.
    let y = mesh.wall_distance();
    let scale = 0.41 / 0.158;
    for (cell, &d) in delta.iter().enumerate() {
        let expected = (scale * y[cell]).min(0.1);
        assert!((d - expected).abs() < 1e-12);
    }

    // A larger Cdelta damps the first row
    let mut coeffs = BTreeMap::new();
    coeffs.insert(
        "Prandtl".to_string(),
        DeltaCoeffsDef {
            c_delta: Some(1.0),
            ..DeltaCoeffsDef::default()
        },
    );
    let damped = build_filter_width("Prandtl", &coeffs)
        .unwrap()
        .delta(&mesh);
    assert!((damped[0] - 0.41 * 0.05).abs() < 1e-12);
    assert!(damped[0] < delta[0]);
}

#[test]
fn uniform_zero_width_is_allowed() {
    let mesh = cube_channel();
    let provider = UniformDelta::new(m(0.0)).unwrap();
    let delta = provider.delta(&mesh);
    assert!(delta.iter().all(|&d| d == 0.0));
    assert_eq!(provider.name(), "uniform");
}

#[test]
fn catalog_lists_every_provider() {
    let names: Vec<&str> = filter_width_catalog()
        .iter()
        .map(|e| e.canonical_id)
        .collect();
    assert_eq!(names, ["cubeRootVol", "maxDeltaxyz", "Prandtl", "uniform"]);
}
