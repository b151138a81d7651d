//! # Rectangle Extrusion
//!
//! Optimized path: one cap pair per merged rectangle. Where another
//! rectangle's corner lands strictly inside a cap's front or back side, the
//! cap is split at that point so the shared edge matches on both sides.

use super::builder::{Level, MeshBuilder};
use super::ExtrudeParams;
use crate::mesh::Mesh;
use crate::ops::rectangles::Rectangle;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Extrudes a set of non-overlapping rectangles into a closed slab.
///
/// Rectangles are processed in the order given. The output covers exactly
/// the union of the rectangles, with walls only on the union's perimeter.
///
/// # Example
///
/// ```rust
/// use pixel_mesh::{extrude_rectangles, ExtrudeParams, Rectangle};
///
/// let mesh = extrude_rectangles(&[Rectangle::new(0, 3, 0, 3)], &ExtrudeParams::default());
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn extrude_rectangles(rects: &[Rectangle], params: &ExtrudeParams) -> Mesh {
    let mut occupied = HashSet::new();
    for rect in rects {
        for cell in rect.cells() {
            let fresh = occupied.insert(cell);
            debug_assert!(fresh, "rectangles overlap at {:?}", cell);
        }
    }

    let corners: BTreeSet<(i32, i32)> = rects
        .iter()
        .flat_map(|r| r.corners())
        .map(|c| (c.y, c.x))
        .collect();

    let mut builder = MeshBuilder::new(&occupied, params, rects.len() * 12);
    for rect in rects {
        debug_assert!(
            !has_interior_corner_on_vertical_sides(rect, &corners),
            "corner inside a vertical side of {:?}",
            rect
        );

        let front = side_chain(rect, rect.y_start, &corners);
        let back = side_chain(rect, rect.y_end, &corners);
        builder.cap(rect, &front, &back, Level::Top);
        builder.cap(rect, &front, &back, Level::Bottom);
        builder.walls(rect);
    }

    let mesh = builder.finish();
    debug!(
        "Extruded {} rectangles ({} cells): {} vertices, {} triangles",
        rects.len(),
        occupied.len(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    mesh
}

/// Sorted lattice x coordinates along the horizontal side at `y`: both
/// endpoints plus every corner lying strictly between them.
fn side_chain(rect: &Rectangle, y: i32, corners: &BTreeSet<(i32, i32)>) -> Vec<i32> {
    let mut chain = vec![rect.x_start];
    chain.extend(
        corners
            .range((y, rect.x_start + 1)..(y, rect.x_end))
            .map(|&(_, x)| x),
    );
    chain.push(rect.x_end);
    chain
}

/// Strips are maximal per row and the rectangles within a region are edge
/// connected, so no corner should ever split a left or right side.
fn has_interior_corner_on_vertical_sides(rect: &Rectangle, corners: &BTreeSet<(i32, i32)>) -> bool {
    (rect.y_start + 1..rect.y_end)
        .any(|y| corners.contains(&(y, rect.x_start)) || corners.contains(&(y, rect.x_end)))
}
