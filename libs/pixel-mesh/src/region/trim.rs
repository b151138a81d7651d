//! # Disconnected Cell Trimming
//!
//! Removes cells whose only contact with the rest of their region is a
//! shared corner. Must run before extrusion.

use super::Region;
use crate::grid::Cell;
use std::collections::VecDeque;
use tracing::debug;

/// Result of trimming one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimOutcome {
    /// The trimmed region, or `None` if every cell was removed.
    pub region: Option<Region>,
    /// Number of cells removed.
    pub removed: usize,
}

/// Removes every cell with no edge-adjacent sibling.
///
/// Returns `None` if trimming empties the region.
///
/// # Example
///
/// ```rust
/// use pixel_mesh::{trim_disconnected, Cell, Region, Rgb};
///
/// // Two cells touching only at a corner
/// let region = Region::from_cells(Rgb::new(0, 0, 0), [Cell::new(0, 0), Cell::new(1, 1)]).unwrap();
/// assert!(trim_disconnected(region).is_none());
/// ```
pub fn trim_disconnected(region: Region) -> Option<Region> {
    trim_region(region).region
}

/// Removes every cell with no edge-adjacent sibling and reports how many went.
pub fn trim_region(region: Region) -> TrimOutcome {
    let Region { color, mut cells } = region;
    let before = cells.len();

    // A removed cell had no edge neighbours, so removing it never changes
    // another cell's edge count: one pass over the queue is a fixed point.
    let mut candidates: VecDeque<Cell> = cells.iter().copied().collect();
    while let Some(cell) = candidates.pop_front() {
        let connected = cell.edge_neighbors().iter().any(|n| cells.contains(n));
        if !connected {
            cells.remove(&cell);
        }
    }

    let removed = before - cells.len();
    if removed > 0 {
        debug!("Trimmed {} corner-only cells from {} region", removed, color);
    }

    let region = Region::from_cells(color, cells);
    debug_assert!(region
        .as_ref()
        .map_or(true, |r| r.cells().iter().all(|&c| r.edge_neighbor_count(c) > 0)));

    TrimOutcome { region, removed }
}
