//! # Per-Cell Extrusion
//!
//! Baseline path: every cell contributes its own top and bottom quad, and a
//! wall on each edge that borders a cell outside the set. Corners shared by
//! neighbouring cells resolve to one vertex through the builder's map.

use super::builder::{Level, MeshBuilder};
use super::ExtrudeParams;
use crate::grid::Cell;
use crate::mesh::Mesh;
use crate::ops::rectangles::Rectangle;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Extrudes a cell set into a closed slab, one quad per cell face.
///
/// Cells are processed row-major regardless of input order. An isolated
/// cell gets walls on all four sides.
///
/// # Arguments
///
/// * `cells` - The cells to extrude (a region's cells or a backing footprint)
/// * `params` - Cell size and z range
///
/// # Example
///
/// ```rust
/// use pixel_mesh::{extrude_cells, Cell, ExtrudeParams};
///
/// // 2x1 bar: 6 lattice corners on each cap
/// let mesh = extrude_cells(&[Cell::new(0, 0), Cell::new(1, 0)], &ExtrudeParams::default());
/// assert_eq!(mesh.vertex_count(), 12);
/// // 4 cap triangles per cell + 6 perimeter edges x 2
/// assert_eq!(mesh.triangle_count(), 20);
/// ```
pub fn extrude_cells<'a, I>(cells: I, params: &ExtrudeParams) -> Mesh
where
    I: IntoIterator<Item = &'a Cell>,
{
    let ordered: BTreeSet<Cell> = cells.into_iter().copied().collect();
    let occupied: HashSet<Cell> = ordered.iter().copied().collect();
    let mut builder = MeshBuilder::new(&occupied, params, ordered.len() * 12);

    for &cell in &ordered {
        let unit = Rectangle::unit(cell);
        let span = [cell.x, cell.x + 1];
        builder.cap(&unit, &span, &span, Level::Top);
        builder.cap(&unit, &span, &span, Level::Bottom);
        builder.walls(&unit);
    }

    let mesh = builder.finish();
    debug!(
        "Extruded {} cells: {} vertices, {} triangles",
        ordered.len(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    mesh
}
