//! # Extrusion Operations
//!
//! Turns a set of grid cells into a closed slab mesh between two z levels:
//! - **extrude_cells**: baseline path, two cap triangles per cell
//! - **extrude_rectangles**: optimized path over merged rectangles
//!
//! Both paths share one coordinate-keyed vertex map, cap triangulation and
//! wall emission order, so a 1×1 rectangle produces exactly the geometry of
//! a single cell.

mod builder;
mod cells;
mod rectangles;


pub use cells::extrude_cells;
pub use rectangles::extrude_rectangles;

use config::constants::{DEFAULT_CELL_SIZE_MM, DEFAULT_TOP_HEIGHT_MM};
use serde::{Deserialize, Serialize};

/// Scaling parameters for extrusion.
///
/// # Example
///
/// ```rust
/// use pixel_mesh::ExtrudeParams;
///
/// let colored = ExtrudeParams::region(0.4, 1.2);
/// assert_eq!((colored.z_bottom_mm, colored.z_top_mm), (0.0, 1.2));
///
/// let plate = ExtrudeParams::backing(0.4, 2.0);
/// assert_eq!((plate.z_bottom_mm, plate.z_top_mm), (-2.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtrudeParams {
    /// Edge length of one cell in millimetres
    pub cell_size_mm: f64,
    /// Z of the bottom cap
    pub z_bottom_mm: f64,
    /// Z of the top cap
    pub z_top_mm: f64,
}

impl ExtrudeParams {
    /// Colored region slab occupying `z ∈ [0, top_height_mm]`.
    pub fn region(cell_size_mm: f64, top_height_mm: f64) -> Self {
        Self {
            cell_size_mm,
            z_bottom_mm: 0.0,
            z_top_mm: top_height_mm,
        }
    }

    /// Backing plate slab occupying `z ∈ [-bottom_height_mm, 0]`.
    pub fn backing(cell_size_mm: f64, bottom_height_mm: f64) -> Self {
        Self {
            cell_size_mm,
            z_bottom_mm: -bottom_height_mm,
            z_top_mm: 0.0,
        }
    }

    /// Slab thickness.
    #[inline]
    pub fn thickness(&self) -> f64 {
        self.z_top_mm - self.z_bottom_mm
    }
}

impl Default for ExtrudeParams {
    fn default() -> Self {
        Self::region(DEFAULT_CELL_SIZE_MM, DEFAULT_TOP_HEIGHT_MM)
    }
}
