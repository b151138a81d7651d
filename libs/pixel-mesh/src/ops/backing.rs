//! # Backing Plate
//!
//! A single slab under the union footprint of every surviving region, so
//! colored regions print on a common base.

use super::extrude::{extrude_cells, extrude_rectangles, ExtrudeParams};
use super::rectangles::merge_rectangles;
use crate::grid::Cell;
use crate::mesh::Mesh;
use crate::region::Region;
use config::constants::COORDINATE_STEP;
use std::collections::BTreeSet;
use tracing::debug;

/// Builds the backing plate under `regions`.
///
/// Region colors are discarded; only the union of their cells matters.
/// Pass post-trim regions so trimmed cells leave no plate behind.
///
/// # Returns
///
/// `None` when the union is empty or the slab is thinner than one
/// coordinate step.
///
/// # Example
///
/// ```rust
/// use pixel_mesh::{build_backing_plate, Cell, ExtrudeParams, Region, Rgb};
///
/// let red = Region::from_cells(Rgb::new(255, 0, 0), [Cell::new(0, 0)]).unwrap();
/// let blue = Region::from_cells(Rgb::new(0, 0, 255), [Cell::new(1, 0)]).unwrap();
///
/// let params = ExtrudeParams::backing(1.0, 2.0);
/// let plate = build_backing_plate(&[red, blue], &params, true).unwrap();
/// assert_eq!(plate.vertex_count(), 8);
/// assert!(build_backing_plate(&[], &params, true).is_none());
/// ```
pub fn build_backing_plate(
    regions: &[Region],
    params: &ExtrudeParams,
    optimize: bool,
) -> Option<Mesh> {
    if params.thickness() < COORDINATE_STEP {
        return None;
    }

    let footprint: BTreeSet<Cell> = regions
        .iter()
        .flat_map(|r| r.cells().iter().copied())
        .collect();
    if footprint.is_empty() {
        return None;
    }

    let mesh = if optimize {
        extrude_rectangles(&merge_rectangles(&footprint), params)
    } else {
        extrude_cells(&footprint, params)
    };

    debug!(
        "Backing plate over {} cells from {} regions",
        footprint.len(),
        regions.len()
    );
    Some(mesh)
}
