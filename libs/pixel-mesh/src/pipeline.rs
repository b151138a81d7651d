//! # Conversion Pipeline
//!
//! Drives a grid through every stage and collects one mesh per surviving
//! region plus the optional backing plate:
//!
//! ```text
//! PixelGrid → merge_regions → trim_region → merge_rectangles → extrude ─→ MeshObject
//!                                 └─→ build_backing_plate ───────────────→ MeshObject
//! ```
//!
//! Regions are processed sequentially in discovery order; each stage owns
//! its output and nothing is shared between conversions.

use crate::config::ConversionConfig;
use crate::error::MeshError;
use crate::grid::{PixelGrid, Rgb};
use crate::mesh::Mesh;
use crate::ops::backing::build_backing_plate;
use crate::ops::extrude::{extrude_cells, extrude_rectangles};
use crate::ops::rectangles::{merge_efficiency, merge_rectangles};
use crate::region::{merge_regions, trim_region, ConnectivityMode, Region};
use crate::validate::validate_mesh;
use ::config::constants::{
    BACKING_PLATE_LABEL, MAX_DIMENSION_MM, MAX_GRID_DIMENSION, MAX_TRIANGLES, MAX_VERTICES,
};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Names colored meshes for output.
pub trait ColorNamer {
    /// Returns a label for the region with `color` at position `index` in
    /// discovery order.
    fn name(&self, color: Rgb, index: usize) -> String;
}

/// Labels regions as `region_<index>_<rrggbb>`.
///
/// # Example
///
/// ```rust
/// use pixel_mesh::{ColorNamer, HexColorNamer, Rgb};
///
/// assert_eq!(HexColorNamer.name(Rgb::new(255, 128, 0), 2), "region_2_ff8000");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HexColorNamer;

impl ColorNamer for HexColorNamer {
    fn name(&self, color: Rgb, index: usize) -> String {
        format!("region_{}_{:02x}{:02x}{:02x}", index, color.r, color.g, color.b)
    }
}

impl<F> ColorNamer for F
where
    F: Fn(Rgb, usize) -> String,
{
    fn name(&self, color: Rgb, index: usize) -> String {
        self(color, index)
    }
}

/// A labelled output mesh. The backing plate carries no color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshObject {
    pub label: String,
    pub color: Option<Rgb>,
    pub mesh: Mesh,
}

impl MeshObject {
    /// Whether this object is the backing plate.
    pub fn is_backing(&self) -> bool {
        self.color.is_none()
    }
}

/// Counters collected during one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ConversionStats {
    /// Regions produced by merging
    pub regions_found: usize,
    /// Regions emptied by trimming
    pub regions_dropped: usize,
    /// Cells removed by trimming
    pub cells_trimmed: usize,
    /// Cells extruded into colored meshes
    pub cells_extruded: usize,
    /// Rectangles extruded into colored meshes (0 unless optimizing)
    pub rectangles: usize,
    /// `1 - rectangles / cells` over colored meshes (0 unless optimizing)
    pub merge_efficiency: f64,
    /// Vertices across every output mesh
    pub vertex_count: usize,
    /// Triangles across every output mesh
    pub triangle_count: usize,
}

/// Result of a conversion: colored meshes in region order, backing plate last.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub objects: Vec<MeshObject>,
    pub stats: ConversionStats,
}

impl Conversion {
    /// The colored region meshes.
    pub fn regions(&self) -> impl Iterator<Item = &MeshObject> {
        self.objects.iter().filter(|o| !o.is_backing())
    }

    /// The backing plate, if one was built.
    pub fn backing(&self) -> Option<&MeshObject> {
        self.objects.iter().find(|o| o.is_backing())
    }

    /// Fails with [`MeshError::NothingToRender`] when no object was produced.
    pub fn ensure_renderable(self) -> Result<Self, MeshError> {
        if self.objects.is_empty() {
            Err(MeshError::NothingToRender)
        } else {
            Ok(self)
        }
    }
}

/// A validated conversion setup, reusable across grids.
///
/// # Example
///
/// ```rust
/// use pixel_mesh::{ColorGrid, ConversionConfig, HexColorNamer, Pipeline, Rgb};
///
/// let red = Rgb::new(255, 0, 0);
/// let grid = ColorGrid::from_fn(3, 3, |_, _| Some(red));
///
/// let pipeline = Pipeline::new(ConversionConfig::default()).unwrap();
/// let conversion = pipeline.convert(&grid, &HexColorNamer).unwrap();
///
/// assert_eq!(conversion.objects.len(), 2);
/// assert_eq!(conversion.objects[0].label, "region_0_ff0000");
/// assert!(conversion.objects[1].is_backing());
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: ConversionConfig,
}

impl Pipeline {
    /// Validates `config` and builds a pipeline around it.
    pub fn new(config: ConversionConfig) -> Result<Self, MeshError> {
        config.validate()?;
        if config.trim_disconnected && config.connectivity == ConnectivityMode::None {
            warn!("Trimming with 0-connectivity removes every cell; only empty output is possible");
        }
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Converts a grid into labelled meshes.
    ///
    /// An empty result is not an error here; see
    /// [`Conversion::ensure_renderable`].
    pub fn convert<G, N>(&self, grid: &G, namer: &N) -> Result<Conversion, MeshError>
    where
        G: PixelGrid + ?Sized,
        N: ColorNamer + ?Sized,
    {
        self.convert_cancellable(grid, namer, &AtomicBool::new(false))
    }

    /// Like [`convert`](Self::convert), checking `cancel` between regions.
    ///
    /// Returns [`MeshError::Cancelled`] once the flag is observed set.
    pub fn convert_cancellable<G, N>(
        &self,
        grid: &G,
        namer: &N,
        cancel: &AtomicBool,
    ) -> Result<Conversion, MeshError>
    where
        G: PixelGrid + ?Sized,
        N: ColorNamer + ?Sized,
    {
        let config = &self.config;
        self.check_grid(grid)?;
        let mut stats = ConversionStats::default();

        let regions = merge_regions(grid, config.connectivity);
        stats.regions_found = regions.len();
        info!(
            "Found {} regions in {}x{} grid",
            regions.len(),
            grid.width(),
            grid.height()
        );

        let survivors = if config.trim_disconnected {
            self.trim(regions, &mut stats)
        } else {
            regions
        };

        let params = config.region_params();
        let mut objects = Vec::with_capacity(survivors.len() + 1);

        for (index, region) in survivors.iter().enumerate() {
            if cancel.load(Ordering::Relaxed) {
                info!("Conversion cancelled after {} of {} regions", index, survivors.len());
                return Err(MeshError::Cancelled);
            }

            let mesh = if config.optimize {
                let rects = merge_rectangles(region.cells());
                stats.rectangles += rects.len();
                extrude_rectangles(&rects, &params)
            } else {
                extrude_cells(region.cells(), &params)
            };
            stats.cells_extruded += region.len();

            let label = namer.name(region.color(), index);
            debug!(
                "Region '{}': {} cells, {} vertices, {} triangles",
                label,
                region.len(),
                mesh.vertex_count(),
                mesh.triangle_count()
            );
            self.accept(&label, &mesh, &mut stats)?;
            objects.push(MeshObject {
                label,
                color: Some(region.color()),
                mesh,
            });
        }

        if config.optimize {
            stats.merge_efficiency = merge_efficiency(stats.cells_extruded, stats.rectangles);
            debug!(
                "Merged {} cells into {} rectangles ({:.1}% reduction)",
                stats.cells_extruded,
                stats.rectangles,
                stats.merge_efficiency * 100.0
            );
        }

        if config.has_backing() {
            if cancel.load(Ordering::Relaxed) {
                return Err(MeshError::Cancelled);
            }
            let backing_params = config.backing_params();
            if let Some(mesh) = build_backing_plate(&survivors, &backing_params, config.optimize) {
                self.accept(BACKING_PLATE_LABEL, &mesh, &mut stats)?;
                objects.push(MeshObject {
                    label: BACKING_PLATE_LABEL.to_string(),
                    color: None,
                    mesh,
                });
            }
        }

        info!(
            "Converted {} objects: {} vertices, {} triangles",
            objects.len(),
            stats.vertex_count,
            stats.triangle_count
        );

        Ok(Conversion { objects, stats })
    }

    /// Rejects grids whose lattice or millimetre extent the vertex keys
    /// cannot represent.
    fn check_grid<G: PixelGrid + ?Sized>(&self, grid: &G) -> Result<(), MeshError> {
        let (width, height) = (grid.width(), grid.height());
        if width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
            return Err(MeshError::GridTooLarge {
                width,
                height,
                max: MAX_GRID_DIMENSION,
            });
        }

        let extent_mm = width.max(height) as f64 * self.config.cell_size_mm;
        if extent_mm > MAX_DIMENSION_MM {
            return Err(MeshError::ExtentTooLarge {
                extent_mm,
                max: MAX_DIMENSION_MM,
            });
        }
        Ok(())
    }

    fn trim(&self, regions: Vec<Region>, stats: &mut ConversionStats) -> Vec<Region> {
        let mut survivors = Vec::with_capacity(regions.len());
        for region in regions {
            let outcome = trim_region(region);
            stats.cells_trimmed += outcome.removed;
            match outcome.region {
                Some(region) => survivors.push(region),
                None => stats.regions_dropped += 1,
            }
        }

        if stats.cells_trimmed > 0 {
            info!(
                "Trimmed {} cells, dropped {} regions",
                stats.cells_trimmed, stats.regions_dropped
            );
        }
        if survivors.is_empty() && stats.regions_found > 0 {
            warn!("Trimming removed every region");
        }
        survivors
    }

    /// Enforces size limits and optional validation, then counts the mesh.
    fn accept(
        &self,
        label: &str,
        mesh: &Mesh,
        stats: &mut ConversionStats,
    ) -> Result<(), MeshError> {
        let vertex_count = stats.vertex_count + mesh.vertex_count();
        if vertex_count > MAX_VERTICES {
            return Err(MeshError::TooManyVertices {
                count: vertex_count,
                max: MAX_VERTICES,
            });
        }
        let triangle_count = stats.triangle_count + mesh.triangle_count();
        if triangle_count > MAX_TRIANGLES {
            return Err(MeshError::TooManyTriangles {
                count: triangle_count,
                max: MAX_TRIANGLES,
            });
        }

        if self.config.validate_meshes {
            let report = validate_mesh(mesh);
            if !report.is_valid() {
                warn!("Mesh '{}' failed validation: {}", label, report);
                return Err(MeshError::non_manifold(label, report));
            }
        }

        stats.vertex_count = vertex_count;
        stats.triangle_count = triangle_count;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ColorGrid;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    fn grid(rows: &[&str]) -> ColorGrid {
        ColorGrid::from_fn(rows[0].len(), rows.len(), |x, y| match rows[y].as_bytes()[x] {
            b'R' => Some(RED),
            b'B' => Some(BLUE),
            _ => None,
        })
    }

    fn pipeline(config: ConversionConfig) -> Pipeline {
        Pipeline::new(config).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ConversionConfig {
            cell_size_mm: -1.0,
            ..Default::default()
        };
        assert!(matches!(Pipeline::new(config), Err(MeshError::Config(_))));
    }

    #[test]
    fn test_objects_in_region_order_backing_last() {
        let conversion = pipeline(ConversionConfig::default())
            .convert(&grid(&["RRBB", "RRBB"]), &HexColorNamer)
            .unwrap();

        let labels: Vec<&str> = conversion.objects.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["region_0_ff0000", "region_1_0000ff", BACKING_PLATE_LABEL]);
        assert_eq!(conversion.regions().count(), 2);
        assert_eq!(conversion.backing().map(|o| o.mesh.vertex_count()), Some(8));
    }

    #[test]
    fn test_no_backing_when_bottom_is_zero() {
        let config = ConversionConfig {
            bottom_height_mm: 0.0,
            ..Default::default()
        };
        let conversion = pipeline(config).convert(&grid(&["RR"]), &HexColorNamer).unwrap();
        assert!(conversion.backing().is_none());
        assert_eq!(conversion.objects.len(), 1);
    }

    #[test]
    fn test_stats_track_trimming() {
        // A 2x2 block plus a corner-only spur
        let conversion = pipeline(ConversionConfig::default())
            .convert(&grid(&["RR.", "RR.", "..R"]), &HexColorNamer)
            .unwrap();
        assert_eq!(conversion.stats.regions_found, 1);
        assert_eq!(conversion.stats.cells_trimmed, 1);
        assert_eq!(conversion.stats.regions_dropped, 0);
        assert_eq!(conversion.stats.cells_extruded, 4);
        assert_eq!(conversion.stats.rectangles, 1);
        assert_eq!(conversion.stats.merge_efficiency, 0.75);
    }

    #[test]
    fn test_stats_totals_match_objects() {
        let conversion = pipeline(ConversionConfig::default())
            .convert(&grid(&["RB.", "RBB"]), &HexColorNamer)
            .unwrap();
        let vertices: usize = conversion.objects.iter().map(|o| o.mesh.vertex_count()).sum();
        let triangles: usize = conversion.objects.iter().map(|o| o.mesh.triangle_count()).sum();
        assert_eq!(conversion.stats.vertex_count, vertices);
        assert_eq!(conversion.stats.triangle_count, triangles);
    }

    #[test]
    fn test_empty_grid_converts_to_nothing() {
        let conversion = pipeline(ConversionConfig::default())
            .convert(&ColorGrid::new(3, 3), &HexColorNamer)
            .unwrap();
        assert!(conversion.objects.is_empty());
        assert!(matches!(
            conversion.ensure_renderable(),
            Err(MeshError::NothingToRender)
        ));
    }

    #[test]
    fn test_raised_flag_cancels() {
        let cancel = AtomicBool::new(true);
        let result = pipeline(ConversionConfig::default()).convert_cancellable(
            &grid(&["RR"]),
            &HexColorNamer,
            &cancel,
        );
        assert!(matches!(result, Err(MeshError::Cancelled)));
    }

    #[test]
    fn test_closure_namer() {
        let namer = |color: Rgb, index: usize| format!("{}:{}", index, color);
        let conversion = pipeline(ConversionConfig::default())
            .convert(&grid(&["B"]), &namer)
            .unwrap_or_else(|e| panic!("{}", e));
        // A lone cell is trimmed away
        assert!(conversion.objects.is_empty());

        let config = ConversionConfig {
            trim_disconnected: false,
            ..Default::default()
        };
        let conversion = pipeline(config).convert(&grid(&["B"]), &namer).unwrap();
        assert_eq!(conversion.objects[0].label, "0:#0000ff");
    }

    #[test]
    fn test_baseline_path_counts_no_rectangles() {
        let config = ConversionConfig {
            optimize: false,
            ..Default::default()
        };
        let conversion = pipeline(config).convert(&grid(&["RRR"]), &HexColorNamer).unwrap();
        assert_eq!(conversion.stats.rectangles, 0);
        assert_eq!(conversion.stats.merge_efficiency, 0.0);
        assert_eq!(conversion.objects[0].mesh.vertex_count(), 16);
    }

    /// Reports a size without backing storage; never queried past the bounds check.
    struct HugeGrid {
        width: usize,
        height: usize,
    }

    impl PixelGrid for HugeGrid {
        fn width(&self) -> usize {
            self.width
        }

        fn height(&self) -> usize {
            self.height
        }

        fn is_filled(&self, _x: usize, _y: usize) -> Option<Rgb> {
            None
        }
    }

    #[test]
    fn test_rejects_grid_beyond_lattice() {
        let huge = HugeGrid {
            width: MAX_GRID_DIMENSION + 1,
            height: 1,
        };
        let result = pipeline(ConversionConfig::default()).convert(&huge, &HexColorNamer);
        assert!(matches!(
            result,
            Err(MeshError::GridTooLarge { width, max: MAX_GRID_DIMENSION, .. })
                if width == MAX_GRID_DIMENSION + 1
        ));
    }

    #[test]
    fn test_rejects_extent_beyond_limit() {
        let config = ConversionConfig {
            cell_size_mm: 1e5,
            trim_disconnected: false,
            ..Default::default()
        };
        let wide = ColorGrid::from_fn(20, 1, |_, _| Some(RED));
        let result = pipeline(config).convert(&wide, &HexColorNamer);
        assert!(matches!(
            result,
            Err(MeshError::ExtentTooLarge { extent_mm, max })
                if extent_mm == 2e6 && max == MAX_DIMENSION_MM
        ));

        // Ten cells land exactly on the limit and still convert
        let narrow = ColorGrid::from_fn(10, 1, |_, _| Some(RED));
        assert!(pipeline(config).convert(&narrow, &HexColorNamer).is_ok());
    }
}
