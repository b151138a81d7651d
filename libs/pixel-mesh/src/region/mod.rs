//! # Regions
//!
//! Connected groups of same-color cells.
//!
//! - **merge**: flood-fill the grid into regions under a connectivity rule
//! - **trim**: remove cells that touch the rest of their region only by a corner

mod merge;
mod trim;

pub use merge::merge_regions;
pub use trim::{trim_disconnected, trim_region, TrimOutcome};

use crate::error::ConfigError;
use crate::grid::{Cell, Rgb};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Edge-adjacent offsets: left, right, up, down.
const EDGE_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Edge and corner offsets.
const ALL_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Adjacency rule used to decide which same-color cells merge.
///
/// Serializes as the numeric mode (0, 4 or 8).
///
/// # Example
///
/// ```rust
/// use pixel_mesh::ConnectivityMode;
///
/// assert_eq!(ConnectivityMode::try_from(4).unwrap(), ConnectivityMode::Edge);
/// assert!(ConnectivityMode::try_from(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ConnectivityMode {
    /// Mode 0: every cell is its own region
    None,
    /// Mode 4: shared edges only
    Edge,
    /// Mode 8: shared edges or shared corners
    #[default]
    EdgeAndCorner,
}

impl ConnectivityMode {
    /// Neighbor offsets visited by the flood fill.
    pub(crate) fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::None => &[],
            Self::Edge => &EDGE_OFFSETS,
            Self::EdgeAndCorner => &ALL_OFFSETS,
        }
    }
}

impl TryFrom<u8> for ConnectivityMode {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            4 => Ok(Self::Edge),
            8 => Ok(Self::EdgeAndCorner),
            other => Err(ConfigError::UnsupportedConnectivity(other)),
        }
    }
}

impl From<ConnectivityMode> for u8 {
    fn from(mode: ConnectivityMode) -> Self {
        match mode {
            ConnectivityMode::None => 0,
            ConnectivityMode::Edge => 4,
            ConnectivityMode::EdgeAndCorner => 8,
        }
    }
}

impl fmt::Display for ConnectivityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-connectivity", u8::from(*self))
    }
}

/// A color plus the non-empty set of cells carrying it.
///
/// Cells iterate in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    color: Rgb,
    cells: BTreeSet<Cell>,
}

impl Region {
    /// Creates a region, or `None` if `cells` is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixel_mesh::{Cell, Region, Rgb};
    ///
    /// let region = Region::from_cells(Rgb::new(0, 0, 0), [Cell::new(0, 0)]).unwrap();
    /// assert_eq!(region.len(), 1);
    /// assert!(Region::from_cells(Rgb::new(0, 0, 0), []).is_none());
    /// ```
    pub fn from_cells(color: Rgb, cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        (!cells.is_empty()).then_some(Self { color, cells })
    }

    /// The region's color.
    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// The region's cells, row-major.
    #[inline]
    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the region has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the region contains `cell`.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of edge-adjacent neighbors of `cell` inside the region.
    pub fn edge_neighbor_count(&self, cell: Cell) -> usize {
        cell.edge_neighbors()
            .iter()
            .filter(|n| self.cells.contains(n))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_round_trips_through_u8() {
        for value in config::constants::SUPPORTED_CONNECTIVITY {
            let mode = ConnectivityMode::try_from(value).unwrap();
            assert_eq!(u8::from(mode), value);
        }
    }

    #[test]
    fn test_connectivity_rejects_unsupported() {
        assert_eq!(
            ConnectivityMode::try_from(6).unwrap_err(),
            ConfigError::UnsupportedConnectivity(6)
        );
    }

    #[test]
    fn test_connectivity_serde_numeric() {
        let mode: ConnectivityMode = serde_json::from_str("4").unwrap();
        assert_eq!(mode, ConnectivityMode::Edge);
        assert_eq!(serde_json::to_string(&ConnectivityMode::None).unwrap(), "0");
        assert!(serde_json::from_str::<ConnectivityMode>("3").is_err());
    }

    #[test]
    fn test_default_connectivity_matches_config() {
        assert_eq!(
            u8::from(ConnectivityMode::default()),
            config::constants::DEFAULT_CONNECTIVITY
        );
    }

    #[test]
    fn test_edge_neighbor_count_ignores_diagonals() {
        let region = Region::from_cells(
            Rgb::new(1, 2, 3),
            [Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)],
        )
        .unwrap();
        assert_eq!(region.edge_neighbor_count(Cell::new(0, 0)), 1);
        assert_eq!(region.edge_neighbor_count(Cell::new(1, 0)), 2);
        assert_eq!(region.edge_neighbor_count(Cell::new(0, 1)), 2);
    }

    #[test]
    fn test_is_empty_tracks_len() {
        let region = Region::from_cells(Rgb::new(1, 2, 3), [Cell::new(4, 4)]).unwrap();
        assert_eq!(region.len(), 1);
        assert!(!region.is_empty());
        assert!(Region::from_cells(Rgb::new(1, 2, 3), Vec::<Cell>::new()).is_none());
    }
}
