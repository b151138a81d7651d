//! Conversion configuration building on the shared `config` crate.
//!
//! Every tunable is an explicit field passed to
//! [`Pipeline::new`](crate::Pipeline::new), validated once at the boundary.

use crate::error::ConfigError;
use crate::ops::extrude::ExtrudeParams;
use crate::region::ConnectivityMode;
use ::config::constants::{
    COORDINATE_STEP, DEFAULT_BOTTOM_HEIGHT_MM, DEFAULT_CELL_SIZE_MM, DEFAULT_TOP_HEIGHT_MM,
    MAX_DIMENSION_MM,
};
use serde::{Deserialize, Serialize};

/// Settings for one grid conversion.
///
/// Deserializes from partial input; missing fields take their defaults.
///
/// # Examples
/// ```
/// use pixel_mesh::{ConnectivityMode, ConversionConfig};
///
/// let cfg: ConversionConfig = serde_json::from_str(r#"{ "connectivity": 4 }"#).unwrap();
/// assert_eq!(cfg.connectivity, ConnectivityMode::Edge);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Adjacency rule for merging same-color cells (0, 4 or 8).
    pub connectivity: ConnectivityMode,
    /// Remove cells attached to their region only by a corner.
    pub trim_disconnected: bool,
    /// Extrude merged rectangles instead of individual cells.
    pub optimize: bool,
    /// Edge length of one cell in millimetres.
    pub cell_size_mm: f64,
    /// Height of the colored layer.
    pub top_height_mm: f64,
    /// Height of the backing plate; 0 disables it.
    pub bottom_height_mm: f64,
    /// Run manifold validation on every produced mesh.
    pub validate_meshes: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            connectivity: ConnectivityMode::default(),
            trim_disconnected: true,
            optimize: true,
            cell_size_mm: DEFAULT_CELL_SIZE_MM,
            top_height_mm: DEFAULT_TOP_HEIGHT_MM,
            bottom_height_mm: DEFAULT_BOTTOM_HEIGHT_MM,
            validate_meshes: true,
        }
    }
}

impl ConversionConfig {
    /// Checks every dimension.
    ///
    /// # Examples
    /// ```
    /// use pixel_mesh::{ConfigError, ConversionConfig};
    ///
    /// let cfg = ConversionConfig { cell_size_mm: 0.0, ..Default::default() };
    /// assert_eq!(cfg.validate(), Err(ConfigError::NonPositiveCellSize(0.0)));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("cell_size_mm", self.cell_size_mm),
            ("top_height_mm", self.top_height_mm),
            ("bottom_height_mm", self.bottom_height_mm),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteValue { field, value });
            }
            if value > MAX_DIMENSION_MM {
                return Err(ConfigError::DimensionTooLarge {
                    field,
                    value,
                    max: MAX_DIMENSION_MM,
                });
            }
        }

        if self.cell_size_mm <= 0.0 {
            return Err(ConfigError::NonPositiveCellSize(self.cell_size_mm));
        }
        if self.cell_size_mm < COORDINATE_STEP {
            return Err(ConfigError::CellSizeBelowPrecision {
                size: self.cell_size_mm,
                step: COORDINATE_STEP,
            });
        }
        if self.top_height_mm <= 0.0 {
            return Err(ConfigError::NonPositiveTopHeight(self.top_height_mm));
        }
        if self.top_height_mm < COORDINATE_STEP {
            return Err(ConfigError::TopHeightBelowPrecision {
                height: self.top_height_mm,
                step: COORDINATE_STEP,
            });
        }
        if self.bottom_height_mm < 0.0 {
            return Err(ConfigError::NegativeBottomHeight(self.bottom_height_mm));
        }
        if self.bottom_height_mm > 0.0 && self.bottom_height_mm < COORDINATE_STEP {
            return Err(ConfigError::BottomHeightBelowPrecision {
                height: self.bottom_height_mm,
                step: COORDINATE_STEP,
            });
        }
        Ok(())
    }

    /// Sets connectivity from its numeric form.
    pub fn with_connectivity(mut self, connectivity: u8) -> Result<Self, ConfigError> {
        self.connectivity = ConnectivityMode::try_from(connectivity)?;
        Ok(self)
    }

    /// Whether a backing plate will be built.
    #[inline]
    pub fn has_backing(&self) -> bool {
        self.bottom_height_mm >= COORDINATE_STEP
    }

    /// Extrusion parameters for colored regions.
    pub fn region_params(&self) -> ExtrudeParams {
        ExtrudeParams::region(self.cell_size_mm, self.top_height_mm)
    }

    /// Extrusion parameters for the backing plate.
    pub fn backing_params(&self) -> ExtrudeParams {
        ExtrudeParams::backing(self.cell_size_mm, self.bottom_height_mm)
    }
}
