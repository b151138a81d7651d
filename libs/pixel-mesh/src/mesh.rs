//! # Mesh Data Structure
//!
//! Core mesh representation: vertices plus triangle indices. Meshes are
//! assembled inside this crate and are read-only once handed to the caller.

use config::constants::AREA_EPSILON;
use glam::DVec3;
use serde::Serialize;

/// A triangle mesh with vertices and indices.
///
/// All geometry is f64 in millimetres. Triangles wind counter-clockwise when
/// seen from outside the solid.
///
/// # Example
///
/// ```rust
/// use pixel_mesh::{extrude_cells, Cell, ExtrudeParams};
///
/// let mesh = extrude_cells(&[Cell::new(0, 0)], &ExtrudeParams::region(1.0, 1.0));
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Mesh {
    /// Vertex positions (f64 for precision)
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates a mesh with pre-allocated capacity.
    pub(crate) fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Adds a vertex and returns its index.
    pub(crate) fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub(crate) fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the triangle at the given index.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    /// Returns the three corner positions of a triangle.
    #[inline]
    pub fn triangle_positions(&self, index: usize) -> [DVec3; 3] {
        let [a, b, c] = self.triangles[index];
        [self.vertex(a), self.vertex(b), self.vertex(c)]
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Signed volume enclosed by the mesh (mm³).
    ///
    /// Positive for a closed mesh with outward winding.
    pub fn signed_volume(&self) -> f64 {
        (0..self.triangles.len())
            .map(|i| {
                let [v0, v1, v2] = self.triangle_positions(i);
                v0.dot(v1.cross(v2))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Area of the mesh projected onto the XY plane (mm²).
    ///
    /// Only upward-facing triangles contribute, so for an extruded slab this
    /// is the area of its footprint.
    pub fn footprint_area(&self) -> f64 {
        (0..self.triangles.len())
            .map(|i| {
                let [v0, v1, v2] = self.triangle_positions(i);
                (v1 - v0).cross(v2 - v0).z / 2.0
            })
            .filter(|&area| area > 0.0)
            .sum()
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No degenerate triangles (repeated index or zero area)
    ///
    /// Returns true if valid. Topology is checked by
    /// [`validate_mesh`](crate::validate::validate_mesh).
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        for tri in &self.triangles {
            if tri[0] >= vertex_count || tri[1] >= vertex_count || tri[2] >= vertex_count {
                return false;
            }

            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return false;
            }

            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            let area = (v1 - v0).cross(v2 - v0).length() / 2.0;
            if area < AREA_EPSILON {
                return false;
            }
        }

        true
    }

    /// Exports vertices as f32 array for serializers and GPUs.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.vertices.len() * 3);
        for v in &self.vertices {
            result.push(v.x as f32);
            result.push(v.y as f32);
            result.push(v.z as f32);
        }
        result
    }

    /// Exports triangle indices as u32 array.
    ///
    /// Returns flattened [i0, i1, i2, i0, i1, i2, ...] array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}
