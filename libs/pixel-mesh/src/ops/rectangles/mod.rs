//! # Rectangle Merging
//!
//! Greedy decomposition of a cell set into axis-aligned rectangles, in
//! three phases:
//!
//! 1. **split_edge_connected** - 4-connected sub-regions
//! 2. **build_strips** - maximal horizontal runs per row
//! 3. **merge_strips** - stack strips with identical x ranges downward
//!
//! Output order is row-major by each rectangle's top-left cell and fully
//! determined by the input set.

#[cfg(test)]
mod tests;

use crate::grid::Cell;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, VecDeque};
use tracing::debug;

/// A maximal horizontal run of cells in one row. `x_end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Strip {
    pub x_start: i32,
    pub x_end: i32,
    pub y: i32,
}

impl Strip {
    /// Number of cells in the strip.
    #[inline]
    pub fn len(&self) -> usize {
        (self.x_end - self.x_start) as usize
    }

    /// Whether the strip covers no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x_end <= self.x_start
    }
}

/// A filled axis-aligned box of cells on the lattice.
///
/// Both ends are exclusive: the box covers cells
/// `x_start..x_end` × `y_start..y_end`, and its corners sit on lattice
/// points `(x_start, y_start)` through `(x_end, y_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub x_start: i32,
    pub x_end: i32,
    pub y_start: i32,
    pub y_end: i32,
}

impl Rectangle {
    /// Creates a rectangle from exclusive lattice bounds.
    pub const fn new(x_start: i32, x_end: i32, y_start: i32, y_end: i32) -> Self {
        Self {
            x_start,
            x_end,
            y_start,
            y_end,
        }
    }

    /// The 1×1 rectangle covering a single cell.
    pub const fn unit(cell: Cell) -> Self {
        Self::new(cell.x, cell.x + 1, cell.y, cell.y + 1)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.x_end - self.x_start
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.y_end - self.y_start
    }

    /// Number of cells covered.
    #[inline]
    pub fn area(&self) -> usize {
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the box covers `cell`.
    pub fn contains(&self, cell: Cell) -> bool {
        (self.x_start..self.x_end).contains(&cell.x) && (self.y_start..self.y_end).contains(&cell.y)
    }

    /// Covered cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.y_start..self.y_end)
            .flat_map(move |y| (self.x_start..self.x_end).map(move |x| Cell::new(x, y)))
    }

    /// The four lattice corner points, as cells naming their coordinates.
    pub fn corners(&self) -> [Cell; 4] {
        [
            Cell::new(self.x_start, self.y_start),
            Cell::new(self.x_end, self.y_start),
            Cell::new(self.x_end, self.y_end),
            Cell::new(self.x_start, self.y_end),
        ]
    }
}

/// Splits a cell set into 4-connected sub-regions.
///
/// Sub-regions come out in row-major order of their first cell.
pub fn split_edge_connected(cells: &BTreeSet<Cell>) -> Vec<BTreeSet<Cell>> {
    let mut remaining = cells.clone();
    let mut components = Vec::new();

    while let Some(seed) = remaining.pop_first() {
        let mut component = BTreeSet::from([seed]);
        let mut queue = VecDeque::from([seed]);
        while let Some(cell) = queue.pop_front() {
            for neighbor in cell.edge_neighbors() {
                if remaining.remove(&neighbor) {
                    component.insert(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }
        components.push(component);
    }

    components
}

/// Builds the maximal horizontal strips of a cell set, row-major.
pub fn build_strips(cells: &BTreeSet<Cell>) -> Vec<Strip> {
    let mut strips: Vec<Strip> = Vec::new();
    for &cell in cells {
        match strips.last_mut() {
            Some(strip) if strip.y == cell.y && strip.x_end == cell.x => strip.x_end += 1,
            _ => strips.push(Strip {
                x_start: cell.x,
                x_end: cell.x + 1,
                y: cell.y,
            }),
        }
    }
    strips
}

/// Stacks strips into rectangles.
///
/// Strips are taken in `(y, x_start)` order; each unused strip starts a
/// rectangle that grows downward while the next row holds an unused strip
/// with the same `x_start` and `x_end`.
pub fn merge_strips(strips: &[Strip]) -> Vec<Rectangle> {
    let mut sorted = strips.to_vec();
    sorted.sort_by_key(|s| (s.y, s.x_start));

    let index: HashMap<(i32, i32, i32), usize> = sorted
        .iter()
        .enumerate()
        .map(|(i, s)| ((s.y, s.x_start, s.x_end), i))
        .collect();
    let mut consumed = vec![false; sorted.len()];
    let mut rects = Vec::new();

    for (i, strip) in sorted.iter().enumerate() {
        if consumed[i] {
            continue;
        }
        consumed[i] = true;

        let mut y_end = strip.y + 1;
        while let Some(&next) = index.get(&(y_end, strip.x_start, strip.x_end)) {
            if consumed[next] {
                break;
            }
            consumed[next] = true;
            y_end += 1;
        }

        rects.push(Rectangle::new(strip.x_start, strip.x_end, strip.y, y_end));
    }

    rects
}

/// Decomposes a cell set into non-overlapping filled rectangles.
///
/// The rectangles cover exactly the input cells. An empty input yields an
/// empty list; a single cell yields one 1×1 rectangle.
///
/// # Example
///
/// ```rust
/// use pixel_mesh::{merge_rectangles, Cell, Rectangle};
///
/// // L shape: a 2-wide bar over a single cell
/// let cells = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 1)];
/// let rects = merge_rectangles(&cells);
/// assert_eq!(rects, vec![Rectangle::new(0, 2, 0, 1), Rectangle::new(0, 1, 1, 2)]);
/// ```
pub fn merge_rectangles<'a, I>(cells: I) -> Vec<Rectangle>
where
    I: IntoIterator<Item = &'a Cell>,
{
    let cells: BTreeSet<Cell> = cells.into_iter().copied().collect();

    let mut rects: Vec<Rectangle> = split_edge_connected(&cells)
        .iter()
        .flat_map(|component| merge_strips(&build_strips(component)))
        .collect();
    rects.sort_by_key(|r| (r.y_start, r.x_start));

    debug_assert_eq!(rects.iter().map(Rectangle::area).sum::<usize>(), cells.len());
    debug_assert!(rects.iter().all(|r| r.cells().all(|c| cells.contains(&c))));

    if !cells.is_empty() {
        debug!(
            "Merged {} cells into {} rectangles ({:.1}% reduction)",
            cells.len(),
            rects.len(),
            merge_efficiency(cells.len(), rects.len()) * 100.0
        );
    }

    rects
}

/// Fraction of per-cell caps saved by merging: `1 - rectangles / cells`.
pub fn merge_efficiency(cell_count: usize, rectangle_count: usize) -> f64 {
    if cell_count == 0 {
        0.0
    } else {
        1.0 - rectangle_count as f64 / cell_count as f64
    }
}
