//! # Pixel Mesh
//!
//! Manifold mesh generation for pixel art prints.
//! Converts a quantized color grid into one watertight mesh per color
//! region plus an optional backing plate.
//!
//! ## Architecture
//!
//! ```text
//! PixelGrid → region (merge, trim) → ops (rectangles, extrude, backing) → Mesh
//! ```
//!
//! ## Algorithms
//!
//! - **Region merging**: BFS flood fill under 0-, 4- or 8-connectivity
//! - **Trimming**: queue-driven removal of corner-only cells
//! - **Rectangle merging**: maximal strips stacked greedily
//! - **Extrusion**: coordinate-keyed vertex sharing, zipper caps at T-junctions
//!
//! ## Usage
//!
//! ```rust
//! use pixel_mesh::{convert, ColorGrid, ConversionConfig, Rgb};
//!
//! let (red, blue) = (Rgb::new(255, 0, 0), Rgb::new(0, 0, 255));
//! let grid = ColorGrid::from_fn(4, 4, |x, _| Some(if x < 2 { red } else { blue }));
//! let conversion = convert(&grid, ConversionConfig::default())?;
//!
//! // Two colored regions and the backing plate
//! assert_eq!(conversion.objects.len(), 3);
//! # Ok::<(), pixel_mesh::MeshError>(())
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod mesh;
pub mod ops;
pub mod pipeline;
pub mod region;
pub mod validate;

pub use crate::config::ConversionConfig;
pub use error::{ConfigError, MeshError};
pub use grid::{Cell, ColorGrid, PixelGrid, Rgb};
pub use mesh::Mesh;
pub use ops::{
    build_backing_plate, extrude_cells, extrude_rectangles, merge_rectangles, ExtrudeParams,
    Rectangle, Strip,
};
pub use pipeline::{ColorNamer, Conversion, ConversionStats, HexColorNamer, MeshObject, Pipeline};
pub use region::{
    merge_regions, trim_disconnected, trim_region, ConnectivityMode, Region, TrimOutcome,
};
pub use validate::{validate_mesh, MeshReport};

/// Converts a grid with hex-labelled regions.
///
/// This is the main entry point. Unlike [`Pipeline::convert`], an output
/// with no objects at all is an error.
///
/// # Errors
///
/// - [`MeshError::Config`] if `config` is invalid
/// - [`MeshError::NothingToRender`] if no region survives and no backing
///   plate is built
/// - [`MeshError::NonManifold`] if validation is enabled and a mesh fails it
pub fn convert<G>(grid: &G, config: ConversionConfig) -> Result<Conversion, MeshError>
where
    G: PixelGrid + ?Sized,
{
    Pipeline::new(config)?
        .convert(grid, &HexColorNamer)?
        .ensure_renderable()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_transparent_grid_is_nothing_to_render() {
        let result = convert(&ColorGrid::new(8, 8), ConversionConfig::default());
        assert!(matches!(result, Err(MeshError::NothingToRender)));
    }

    #[test]
    fn test_convert_rejects_bad_config() {
        let config = ConversionConfig {
            top_height_mm: -1.0,
            ..Default::default()
        };
        let result = convert(&ColorGrid::new(1, 1), config);
        assert!(matches!(
            result,
            Err(MeshError::Config(ConfigError::NonPositiveTopHeight(_)))
        ));
    }
}
