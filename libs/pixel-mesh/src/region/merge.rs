//! # Region Merging
//!
//! Breadth-first flood fill over the pixel grid. Cells are scanned
//! row-major, so region discovery order (and every region index derived
//! from it) is reproducible for identical input.

use super::{ConnectivityMode, Region};
use crate::grid::{Cell, PixelGrid};
use config::constants::MAX_GRID_DIMENSION;
use std::collections::{BTreeSet, VecDeque};
use tracing::debug;

/// Groups same-color cells into connected regions.
///
/// # Arguments
///
/// * `grid` - The quantized pixel grid
/// * `mode` - Adjacency rule deciding which neighbors merge
///
/// # Returns
///
/// Regions in row-major discovery order. An empty grid yields an empty list.
///
/// # Panics
///
/// Panics if either grid dimension exceeds `MAX_GRID_DIMENSION`.
/// [`Pipeline`](crate::Pipeline) rejects such grids with an error first.
///
/// # Example
///
/// ```rust
/// use pixel_mesh::{merge_regions, ColorGrid, ConnectivityMode, Rgb};
///
/// let red = Rgb::new(255, 0, 0);
/// let grid = ColorGrid::from_fn(2, 2, |x, y| (x == y).then_some(red));
///
/// assert_eq!(merge_regions(&grid, ConnectivityMode::EdgeAndCorner).len(), 1);
/// assert_eq!(merge_regions(&grid, ConnectivityMode::Edge).len(), 2);
/// ```
pub fn merge_regions<G: PixelGrid + ?Sized>(grid: &G, mode: ConnectivityMode) -> Vec<Region> {
    let width = grid.width();
    let height = grid.height();
    assert!(
        width <= MAX_GRID_DIMENSION && height <= MAX_GRID_DIMENSION,
        "{width}x{height} grid exceeds the {MAX_GRID_DIMENSION} cell lattice"
    );

    let mut visited = vec![false; width * height];
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
    let mut regions = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if visited[y * width + x] {
                continue;
            }
            let Some(color) = grid.is_filled(x, y) else {
                continue;
            };

            visited[y * width + x] = true;
            queue.push_back((x, y));
            let mut cells = BTreeSet::new();

            while let Some((cx, cy)) = queue.pop_front() {
                // Both below MAX_GRID_DIMENSION, so the casts are lossless
                cells.insert(Cell::new(cx as i32, cy as i32));

                for &(dx, dy) in mode.offsets() {
                    let (Some(nx), Some(ny)) = (
                        cx.checked_add_signed(dx as isize),
                        cy.checked_add_signed(dy as isize),
                    ) else {
                        continue;
                    };
                    if nx >= width || ny >= height {
                        continue;
                    }
                    let index = ny * width + nx;
                    if !visited[index] && grid.is_filled(nx, ny) == Some(color) {
                        visited[index] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }

            regions.push(Region { color, cells });
        }
    }

    debug!(
        "Merged {}x{} grid into {} regions ({})",
        width,
        height,
        regions.len(),
        mode
    );

    regions
}
