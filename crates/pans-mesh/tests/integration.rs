//! Integration tests for pans-mesh.

use pans_core::ScalarField;
use pans_core::units::m;
use pans_mesh::cartesian::ChannelWalls;
use pans_mesh::{ChannelSpec, MeshGeometry, channel};
use proptest::prelude::*;

#[test]
fn channel_cell_count_and_volume() {
    let spec = ChannelSpec {
        nx: 4,
        ny: 5,
        nz: 2,
        length: m(2.0),
        height: m(1.0),
        depth: m(0.4),
        walls: ChannelWalls::Bottom,
    };
    let mesh = channel(&spec).unwrap();

    assert_eq!(mesh.n_cells(), 40);
    let total: f64 = mesh.cell_volumes().iter().sum();
    assert!((total - 0.8).abs() < 1e-12);

    // Bottom-layer cell away from x/y faces has 5 neighbours, corner cell has 3
    assert_eq!(mesh.cell_neighbours(spec.index(1, 2, 0)).len(), 5);
    assert_eq!(mesh.cell_neighbours(spec.index(0, 0, 0)).len(), 3);
}

#[test]
fn wall_distance_is_symmetric_in_plane_channel() {
    let spec = ChannelSpec {
        ny: 10,
        walls: ChannelWalls::BottomAndTop,
        ..ChannelSpec::default()
    };
    let mesh = channel(&spec).unwrap();
    let y = mesh.wall_distance();

    let bottom = y[spec.index(0, 0, 0)];
    let top = y[spec.index(0, 9, 0)];
    assert!((bottom - top).abs() < 1e-12);
    assert!((bottom - 0.05).abs() < 1e-12);
}

#[test]
fn least_squares_gradient_is_exact_for_linear_fields() {
    let spec = ChannelSpec {
        nx: 4,
        ny: 4,
        nz: 3,
        ..ChannelSpec::default()
    };
    let mesh = channel(&spec).unwrap();
    let phi: ScalarField = mesh
        .centres()
        .iter()
        .map(|c| 2.0 * c.x - 5.0 * c.y + 0.5 * c.z)
        .collect();

    let g = mesh.grad(&phi).unwrap();
    for gi in &g {
        assert!((gi.x - 2.0).abs() < 1e-9);
        assert!((gi.y + 5.0).abs() < 1e-9);
        assert!((gi.z - 0.5).abs() < 1e-9);
    }
}

#[test]
fn zero_sized_channel_is_rejected() {
    let spec = ChannelSpec {
        nx: 0,
        ..ChannelSpec::default()
    };
    assert!(channel(&spec).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn channel_geometry_is_consistent(
        nx in 1_usize..6,
        ny in 1_usize..12,
        height in 0.1_f64..5.0,
        two_walls in any::<bool>(),
    ) {
        let spec = ChannelSpec {
            nx,
            ny,
            nz: 1,
            length: m(1.0),
            height: m(height),
            depth: m(0.1),
            walls: if two_walls { ChannelWalls::BottomAndTop } else { ChannelWalls::Bottom },
        };
        let mesh = channel(&spec).unwrap();

        prop_assert_eq!(mesh.n_cells(), nx * ny);
        let total: f64 = mesh.cell_volumes().iter().sum();
        prop_assert!((total - 0.1 * height).abs() < 1e-9 * height);

        let limit = if two_walls { 0.5 * height } else { height };
        for &y in mesh.wall_distance() {
            prop_assert!(y > 0.0 && y <= limit + 1e-12);
        }
    }
}
