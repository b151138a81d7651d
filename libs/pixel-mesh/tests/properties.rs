use approx::assert_relative_eq;
use pixel_mesh::{
    build_backing_plate, extrude_cells, extrude_rectangles, merge_rectangles, merge_regions,
    trim_disconnected, validate_mesh, ColorGrid, ConnectivityMode, ConversionConfig, ExtrudeParams,
    HexColorNamer, Pipeline, PixelGrid, Region, Rgb,
};

const PALETTE: [Rgb; 3] = [Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Rgb::new(0, 0, 255)];

/// Deterministic xorshift grid with roughly `fill` percent of filled cells.
fn noise_grid(width: usize, height: usize, seed: u64, fill: u64) -> ColorGrid {
    let mut state = seed.max(1);
    ColorGrid::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 100 < fill).then(|| PALETTE[(state / 100 % 3) as usize])
    })
}

fn fixtures() -> Vec<ColorGrid> {
    (1..=12)
        .map(|seed| noise_grid(12, 10, seed * 7919, 40 + seed * 4))
        .collect()
}

fn all_modes() -> [ConnectivityMode; 3] {
    [ConnectivityMode::None, ConnectivityMode::Edge, ConnectivityMode::EdgeAndCorner]
}

#[test]
fn every_mesh_is_closed_and_outward() {
    let params = ExtrudeParams::region(0.8, 1.2);
    for grid in fixtures() {
        for mode in all_modes() {
            for region in merge_regions(&grid, mode) {
                for mesh in [
                    extrude_cells(region.cells(), &params),
                    extrude_rectangles(&merge_rectangles(region.cells()), &params),
                ] {
                    let report = validate_mesh(&mesh);
                    assert!(report.is_valid(), "{} region {:?}: {}", mode, region.cells(), report);
                    assert!(mesh.signed_volume() > 0.0);
                }
            }
        }
    }
}

#[test]
fn pipeline_validates_every_combination() {
    for grid in fixtures() {
        for connectivity in [0, 4, 8] {
            for trim_disconnected in [false, true] {
                for optimize in [false, true] {
                    let config = ConversionConfig {
                        trim_disconnected,
                        optimize,
                        validate_meshes: true,
                        ..ConversionConfig::default()
                    }
                    .with_connectivity(connectivity)
                    .unwrap();
                    let conversion = Pipeline::new(config)
                        .unwrap()
                        .convert(&grid, &HexColorNamer)
                        .unwrap_or_else(|e| panic!("{}", e));

                    let extruded: usize = conversion.stats.cells_extruded;
                    let expected = conversion.stats.cells_trimmed + extruded;
                    assert_eq!(expected, grid.filled_count());
                }
            }
        }
    }
}

#[test]
fn paths_agree_on_volume_and_footprint() {
    let params = ExtrudeParams::region(0.4, 2.0);
    for grid in fixtures() {
        for region in merge_regions(&grid, ConnectivityMode::EdgeAndCorner) {
            let baseline = extrude_cells(region.cells(), &params);
            let optimized = extrude_rectangles(&merge_rectangles(region.cells()), &params);

            let expected_area = region.len() as f64 * 0.16;
            assert_relative_eq!(baseline.footprint_area(), expected_area, epsilon = 1e-6);
            assert_relative_eq!(optimized.footprint_area(), expected_area, epsilon = 1e-6);
            assert_relative_eq!(
                baseline.signed_volume(),
                optimized.signed_volume(),
                epsilon = 1e-6
            );
            assert!(optimized.triangle_count() <= baseline.triangle_count());
        }
    }
}

#[test]
fn solid_rectangles_share_lattice_vertices() {
    let params = ExtrudeParams::default();
    for (width, height) in [(1, 1), (2, 5), (7, 3), (6, 6)] {
        let grid = ColorGrid::from_fn(width, height, |_, _| Some(PALETTE[0]));
        let region = merge_regions(&grid, ConnectivityMode::Edge).remove(0);
        let mesh = extrude_cells(region.cells(), &params);
        assert_eq!(mesh.vertex_count(), (width + 1) * (height + 1) * 2);
    }
}

#[test]
fn trimming_is_idempotent() {
    for grid in fixtures() {
        for region in merge_regions(&grid, ConnectivityMode::EdgeAndCorner) {
            if let Some(once) = trim_disconnected(region) {
                assert_eq!(trim_disconnected(once.clone()), Some(once.clone()));
                assert!(once
                    .cells()
                    .iter()
                    .all(|&cell| once.edge_neighbor_count(cell) > 0));
            }
        }
    }
}

#[test]
fn larger_neighbourhood_never_increases_region_count() {
    for grid in fixtures() {
        let none = merge_regions(&grid, ConnectivityMode::None).len();
        let edge = merge_regions(&grid, ConnectivityMode::Edge).len();
        let corner = merge_regions(&grid, ConnectivityMode::EdgeAndCorner).len();
        assert_eq!(none, grid.filled_count());
        assert!(none >= edge && edge >= corner);
    }
}

#[test]
fn regions_partition_filled_cells() {
    for grid in fixtures() {
        for mode in all_modes() {
            let regions = merge_regions(&grid, mode);
            let total: usize = regions.iter().map(Region::len).sum();
            assert_eq!(total, grid.filled_count());
            for region in &regions {
                for cell in region.cells() {
                    let color = grid.is_filled(cell.x as usize, cell.y as usize);
                    assert_eq!(color, Some(region.color()));
                }
            }
        }
    }
}

#[test]
fn region_order_is_reproducible() {
    for grid in fixtures() {
        assert_eq!(
            merge_regions(&grid, ConnectivityMode::Edge),
            merge_regions(&grid, ConnectivityMode::Edge)
        );
    }
}

#[test]
fn backing_plate_is_closed_under_mixed_colors() {
    let params = ExtrudeParams::backing(0.5, 1.5);
    for grid in fixtures() {
        let regions: Vec<Region> = merge_regions(&grid, ConnectivityMode::EdgeAndCorner)
            .into_iter()
            .filter_map(trim_disconnected)
            .collect();
        let cells: usize = regions.iter().map(Region::len).sum();

        for optimize in [false, true] {
            match build_backing_plate(&regions, &params, optimize) {
                Some(plate) => {
                    assert!(validate_mesh(&plate).is_valid());
                    let area = cells as f64 * 0.25;
                    assert_relative_eq!(plate.footprint_area(), area, epsilon = 1e-6);
                    assert_relative_eq!(plate.signed_volume(), area * 1.5, epsilon = 1e-6);
                }
                None => assert_eq!(cells, 0),
            }
        }
    }
}
