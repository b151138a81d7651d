//! # Configuration Constants
//!
//! Centralized constants for the pixel mesh pipeline. Coordinate precision,
//! default print dimensions and safety limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Vertex rounding and floating-point tolerances
//! - **Defaults**: Print dimensions and connectivity used when the caller is silent
//! - **Limits**: Maximum values for safety bounds
//! - **Labels**: Fixed object names handed to the serializer

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Number of decimal places kept in vertex coordinates (millimetres).
///
/// Vertices are rounded to this precision before being used as
/// deduplication keys, so two corners that land on the same point after
/// scaling always share one vertex.
///
/// # Example
///
/// ```rust
/// use config::constants::COORDINATE_PRECISION;
///
/// // Micrometre resolution
/// assert_eq!(COORDINATE_PRECISION, 3);
/// ```
pub const COORDINATE_PRECISION: u32 = 3;

/// Scaling factor for converting f64 millimetres to i64 keys.
///
/// Equal to `10^COORDINATE_PRECISION`. Coordinates are multiplied by this
/// factor and rounded to obtain exact integer keys for hashing.
///
/// # Example
///
/// ```rust
/// use config::constants::COORDINATE_SCALE;
///
/// fn to_integer_coord(value: f64) -> i64 {
///     (value * COORDINATE_SCALE).round() as i64
/// }
///
/// assert_eq!(to_integer_coord(1.2345), 1235);
/// ```
pub const COORDINATE_SCALE: f64 = 1e3;

/// Smallest distinct coordinate difference after rounding (mm).
///
/// Any configured dimension below this collapses to zero in vertex keys.
///
/// # Example
///
/// ```rust
/// use config::constants::{round_to_precision, COORDINATE_STEP};
///
/// assert_eq!(round_to_precision(COORDINATE_STEP), 0.001);
/// assert_eq!(round_to_precision(COORDINATE_STEP * 0.4), 0.0);
/// ```
pub const COORDINATE_STEP: f64 = 1.0 / COORDINATE_SCALE;

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Minimum triangle area (mm²) below which a triangle counts as degenerate.
///
/// The smallest legal triangle is half a cell of `1 / COORDINATE_SCALE` mm,
/// which is still far above this threshold.
pub const AREA_EPSILON: f64 = 1e-9;

// =============================================================================
// DEFAULT CONSTANTS
// =============================================================================

/// Default edge length of one grid cell in millimetres.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_CELL_SIZE_MM;
///
/// let width_mm = 64.0 * DEFAULT_CELL_SIZE_MM;
/// assert_eq!(width_mm, 64.0);
/// ```
pub const DEFAULT_CELL_SIZE_MM: f64 = 1.0;

/// Default height of the colored layer above z = 0, in millimetres.
pub const DEFAULT_TOP_HEIGHT_MM: f64 = 1.0;

/// Default thickness of the backing plate below z = 0, in millimetres.
///
/// A value of 0 disables the backing plate entirely.
pub const DEFAULT_BOTTOM_HEIGHT_MM: f64 = 1.0;

/// Default connectivity mode (0, 4 or 8).
///
/// 8-connectivity merges cells that share an edge or a corner.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_CONNECTIVITY, SUPPORTED_CONNECTIVITY};
///
/// assert!(SUPPORTED_CONNECTIVITY.contains(&DEFAULT_CONNECTIVITY));
/// ```
pub const DEFAULT_CONNECTIVITY: u8 = 8;

/// Connectivity values accepted at the configuration boundary.
pub const SUPPORTED_CONNECTIVITY: [u8; 3] = [0, 4, 8];

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of vertices in a single mesh.
///
/// Safety limit to prevent memory exhaustion from extremely large grids.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_VERTICES;
///
/// let vertex_count = 1000;
/// assert!(vertex_count < MAX_VERTICES);
/// ```
pub const MAX_VERTICES: usize = 10_000_000;

/// Maximum number of triangles in a single mesh.
///
/// Safety limit to prevent memory exhaustion from extremely large grids.
pub const MAX_TRIANGLES: usize = 10_000_000;

/// Largest accepted dimension or print extent, in millimetres.
///
/// Scaled by `COORDINATE_SCALE` this stays far inside the `i64` key range.
pub const MAX_DIMENSION_MM: f64 = 1e6;

/// Largest accepted grid width or height, in cells.
///
/// Keeps every lattice coordinate, including `x + 1` on the far edge,
/// inside `i32`.
pub const MAX_GRID_DIMENSION: usize = 1 << 20;

// =============================================================================
// LABEL CONSTANTS
// =============================================================================

/// Object label attached to the backing plate mesh.
pub const BACKING_PLATE_LABEL: &str = "Backing";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Rounds a millimetre value to `COORDINATE_PRECISION` decimal places.
///
/// # Example
///
/// ```rust
/// use config::constants::round_to_precision;
///
/// assert_eq!(round_to_precision(2.00049), 2.0);
/// assert_eq!(round_to_precision(-0.0004), 0.0);
/// ```
#[inline]
pub fn round_to_precision(value: f64) -> f64 {
    let rounded = to_scaled_coordinate(value) as f64 / COORDINATE_SCALE;
    // Normalize -0.0 so it hashes and prints like +0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Converts a millimetre value to its scaled integer key.
///
/// # Example
///
/// ```rust
/// use config::constants::to_scaled_coordinate;
///
/// assert_eq!(to_scaled_coordinate(0.5), 500);
/// assert_eq!(to_scaled_coordinate(-1.0), -1000);
/// ```
#[inline]
pub fn to_scaled_coordinate(value: f64) -> i64 {
    (value * COORDINATE_SCALE).round() as i64
}

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
