//! # Mesh Errors
//!
//! Error types for configuration and mesh generation.
//!
//! Empty results (an all-transparent grid, a region trimmed away) are not
//! errors inside the core. Only the caller-level check in
//! [`Conversion::ensure_renderable`](crate::Conversion::ensure_renderable)
//! turns "nothing produced" into [`MeshError::NothingToRender`].

use crate::validate::MeshReport;
use thiserror::Error;

/// Invalid configuration, rejected before any region is processed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Connectivity other than 0, 4 or 8
    #[error("Unsupported connectivity: {0} (expected 0, 4 or 8)")]
    UnsupportedConnectivity(u8),

    /// Cell size zero or negative
    #[error("Cell size must be positive: {0}")]
    NonPositiveCellSize(f64),

    /// Cell size too small to survive coordinate rounding
    #[error("Cell size {size} is below the coordinate precision step {step}")]
    CellSizeBelowPrecision { size: f64, step: f64 },

    /// Colored layer height zero or negative
    #[error("Top height must be positive: {0}")]
    NonPositiveTopHeight(f64),

    /// Colored layer too thin to survive coordinate rounding
    #[error("Top height {height} is below the coordinate precision step {step}")]
    TopHeightBelowPrecision { height: f64, step: f64 },

    /// Backing plate height negative
    #[error("Bottom height must not be negative: {0}")]
    NegativeBottomHeight(f64),

    /// Backing plate neither disabled (0) nor thick enough to survive rounding
    #[error("Bottom height {height} is below the coordinate precision step {step}")]
    BottomHeightBelowPrecision { height: f64, step: f64 },

    /// Dimension too large for the scaled vertex key
    #[error("{field} exceeds the maximum dimension: {value} (max: {max})")]
    DimensionTooLarge { field: &'static str, value: f64, max: f64 },

    /// NaN or infinite dimension
    #[error("{field} must be finite: {value}")]
    NonFiniteValue { field: &'static str, value: f64 },
}

/// Errors that can occur during mesh generation.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Configuration rejected at the boundary
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// No colored region survived and no backing plate was produced
    #[error("Nothing to render: no colored regions and no backing plate")]
    NothingToRender,

    /// A produced mesh failed manifold validation
    #[error("Mesh '{label}' is not manifold: {report}")]
    NonManifold { label: String, report: MeshReport },

    /// Grid wider or taller than the lattice supports
    #[error("Grid too large: {width}x{height} cells (max: {max} per side)")]
    GridTooLarge { width: usize, height: usize, max: usize },

    /// Grid extent in millimetres exceeds the maximum dimension
    #[error("Print extent too large: {extent_mm} mm (max: {max} mm)")]
    ExtentTooLarge { extent_mm: f64, max: f64 },

    /// Too many vertices
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },

    /// Too many triangles
    #[error("Too many triangles: {count} (max: {max})")]
    TooManyTriangles { count: usize, max: usize },

    /// The caller's cancellation flag was raised between regions
    #[error("Conversion cancelled")]
    Cancelled,
}

impl MeshError {
    /// Creates a non-manifold validation error.
    pub fn non_manifold(label: impl Into<String>, report: MeshReport) -> Self {
        Self::NonManifold {
            label: label.into(),
            report,
        }
    }
}
