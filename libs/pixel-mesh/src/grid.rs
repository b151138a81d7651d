//! # Pixel Grid
//!
//! Input data for the pipeline: a width × height lattice of cells, each
//! either empty or carrying a color. Image loading and color quantization
//! live outside this crate and hand their result over through [`PixelGrid`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// An opaque 8-bit RGB color.
///
/// # Example
///
/// ```rust
/// use pixel_mesh::Rgb;
///
/// let red = Rgb::new(255, 0, 0);
/// assert_eq!(red.to_hex(), "#ff0000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats the color as a lowercase `#rrggbb` string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Integer cell coordinate on the grid lattice.
///
/// Cells order row-major (`y` first, then `x`), so ordered collections of
/// cells iterate in the same order the grid is scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Creates a cell coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the cell shifted by `(dx, dy)`.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four edge-adjacent neighbors: left, right, up, down.
    #[inline]
    pub const fn edge_neighbors(self) -> [Cell; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }

    /// The four corner-adjacent (diagonal) neighbors.
    #[inline]
    pub const fn corner_neighbors(self) -> [Cell; 4] {
        [
            self.offset(-1, -1),
            self.offset(1, -1),
            self.offset(-1, 1),
            self.offset(1, 1),
        ]
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Read access to a quantized raster.
///
/// Implemented by whatever component loads and quantizes the image.
/// Coordinates outside `0..width` × `0..height` are never queried.
pub trait PixelGrid {
    /// Number of columns.
    fn width(&self) -> usize;

    /// Number of rows.
    fn height(&self) -> usize;

    /// Returns the color of the cell, or `None` if it is transparent.
    fn is_filled(&self, x: usize, y: usize) -> Option<Rgb>;
}

/// Dense in-memory grid, row-major.
///
/// # Example
///
/// ```rust
/// use pixel_mesh::{ColorGrid, PixelGrid, Rgb};
///
/// let mut grid = ColorGrid::new(2, 2);
/// grid.set(1, 0, Some(Rgb::new(0, 0, 255)));
/// assert_eq!(grid.is_filled(1, 0), Some(Rgb::new(0, 0, 255)));
/// assert_eq!(grid.is_filled(0, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid {
    width: usize,
    height: usize,
    cells: Vec<Option<Rgb>>,
}

impl ColorGrid {
    /// Creates a fully transparent grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Creates a grid by evaluating `f` for every cell.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Option<Rgb>,
    ) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self { width, height, cells }
    }

    /// Sets the color of one cell.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid.
    pub fn set(&mut self, x: usize, y: usize, color: Option<Rgb>) {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        self.cells[y * self.width + x] = color;
    }

    /// Number of non-transparent cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl PixelGrid for ColorGrid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn is_filled(&self, x: usize, y: usize) -> Option<Rgb> {
        self.cells[y * self.width + x]
    }
}
