//! # Mesh Operations
//!
//! Rectangle merging, extrusion of cell sets and the backing plate.

pub mod backing;
pub mod extrude;
pub mod rectangles;

pub use backing::build_backing_plate;
pub use extrude::{extrude_cells, extrude_rectangles, ExtrudeParams};
pub use rectangles::{merge_rectangles, Rectangle, Strip};
