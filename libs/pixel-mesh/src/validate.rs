//! # Mesh Validation
//!
//! Topology checks for printable meshes: every undirected edge must border
//! exactly two triangles, the two triangles must traverse it in opposite
//! directions, and no triangle may be degenerate.

use crate::mesh::Mesh;
use config::constants::AREA_EPSILON;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Result of validating one mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MeshReport {
    /// Total vertex count.
    pub vertex_count: usize,
    /// Total triangle count.
    pub triangle_count: usize,
    /// Distinct undirected edges.
    pub edge_count: usize,
    /// Edges bordered by a single triangle (holes).
    pub boundary_edge_count: usize,
    /// Edges bordered by more than two triangles.
    pub non_manifold_edge_count: usize,
    /// Two-triangle edges traversed in the same direction by both.
    pub inconsistent_winding_count: usize,
    /// Triangles with a repeated index or zero area.
    pub degenerate_triangle_count: usize,
    /// Whether the enclosed signed volume is negative.
    pub is_inside_out: bool,
}

impl MeshReport {
    /// No boundary and no non-manifold edges.
    #[must_use]
    pub const fn is_manifold(&self) -> bool {
        self.boundary_edge_count == 0 && self.non_manifold_edge_count == 0
    }

    /// Manifold, consistently wound outward, no degenerate triangles.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.is_manifold()
            && self.inconsistent_winding_count == 0
            && self.degenerate_triangle_count == 0
            && !self.is_inside_out
    }
}

impl fmt::Display for MeshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} triangles, {} boundary edges, {} non-manifold edges, \
             {} inconsistent windings, {} degenerate triangles{}",
            self.vertex_count,
            self.triangle_count,
            self.boundary_edge_count,
            self.non_manifold_edge_count,
            self.inconsistent_winding_count,
            self.degenerate_triangle_count,
            if self.is_inside_out { ", inside out" } else { "" }
        )
    }
}

/// Validate mesh topology and winding.
///
/// # Example
///
/// ```rust
/// use pixel_mesh::{extrude_cells, validate_mesh, Cell, ExtrudeParams};
///
/// let cells = [Cell::new(0, 0), Cell::new(1, 0)];
/// let mesh = extrude_cells(&cells, &ExtrudeParams::region(2.0, 1.0));
/// assert!(validate_mesh(&mesh).is_valid());
/// ```
#[must_use]
pub fn validate_mesh(mesh: &Mesh) -> MeshReport {
    // Undirected edge -> (forward uses, backward uses)
    let mut edges: HashMap<(u32, u32), (u32, u32)> = HashMap::new();

    for tri in mesh.triangles() {
        for i in 0..3 {
            let a = tri[i];
            let b = tri[(i + 1) % 3];
            let entry = edges.entry((a.min(b), a.max(b))).or_default();
            if a < b {
                entry.0 += 1;
            } else {
                entry.1 += 1;
            }
        }
    }

    let mut report = MeshReport {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        edge_count: edges.len(),
        degenerate_triangle_count: count_degenerate_triangles(mesh),
        is_inside_out: mesh.signed_volume() < 0.0,
        ..MeshReport::default()
    };

    for &(forward, backward) in edges.values() {
        match forward + backward {
            1 => report.boundary_edge_count += 1,
            2 if forward != 1 => report.inconsistent_winding_count += 1,
            2 => {}
            _ => report.non_manifold_edge_count += 1,
        }
    }

    if report.is_valid() {
        debug!("Mesh validation passed: {}", report);
    } else {
        warn!("Mesh validation failed: {}", report);
    }

    report
}

/// Count triangles with a repeated index or an area below `AREA_EPSILON`.
fn count_degenerate_triangles(mesh: &Mesh) -> usize {
    (0..mesh.triangle_count())
        .filter(|&i| {
            let [a, b, c] = mesh.triangle(i);
            if a == b || b == c || a == c {
                return true;
            }
            let [v0, v1, v2] = mesh.triangle_positions(i);
            (v1 - v0).cross(v2 - v0).length() / 2.0 < AREA_EPSILON
        })
        .count()
}
