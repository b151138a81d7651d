//! # Mesh Builder
//!
//! Coordinate-keyed vertex deduplication shared by both extruders. Every
//! vertex is addressed by its lattice corner plus a z level; the first
//! request inserts it, later requests from neighbouring cells or
//! rectangles reuse the index.

use super::ExtrudeParams;
use crate::ops::rectangles::Rectangle;
use crate::grid::Cell;
use crate::mesh::Mesh;
use config::constants::{round_to_precision, to_scaled_coordinate};
use glam::DVec3;
use std::collections::{HashMap, HashSet};

/// Which horizontal plane a vertex lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    Top,
    Bottom,
}

/// Deduplication key: rounded, scaled position plus pinch sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VertexKey {
    x: i64,
    y: i64,
    z: i64,
    sheet: u8,
}

/// One boundary side of a cell or rectangle.
///
/// Sides are emitted in this order by both extruders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    /// y = y_start, outward normal -Y
    Front,
    /// x = x_end, outward normal +X
    Right,
    /// y = y_end, outward normal +Y
    Back,
    /// x = x_start, outward normal -X
    Left,
}

impl Side {
    pub(crate) const ALL: [Side; 4] = [Side::Front, Side::Right, Side::Back, Side::Left];

    /// The side's line coordinate and the lattice range it covers.
    pub(crate) fn span(self, rect: &Rectangle) -> (i32, i32, i32) {
        match self {
            Side::Front => (rect.y_start, rect.x_start, rect.x_end),
            Side::Back => (rect.y_end, rect.x_start, rect.x_end),
            Side::Right => (rect.x_end, rect.y_start, rect.y_end),
            Side::Left => (rect.x_start, rect.y_start, rect.y_end),
        }
    }

    /// The cell across the unit segment `k..k + 1` of this side.
    pub(crate) fn across(self, line: i32, k: i32) -> Cell {
        match self {
            Side::Front => Cell::new(k, line - 1),
            Side::Back => Cell::new(k, line),
            Side::Right => Cell::new(line, k),
            Side::Left => Cell::new(line - 1, k),
        }
    }
}

/// Incremental mesh construction over a fixed, occupied cell set.
pub(crate) struct MeshBuilder<'a> {
    occupied: &'a HashSet<Cell>,
    params: ExtrudeParams,
    index: HashMap<VertexKey, u32>,
    mesh: Mesh,
}

impl<'a> MeshBuilder<'a> {
    pub(crate) fn new(
        occupied: &'a HashSet<Cell>,
        params: &ExtrudeParams,
        triangle_hint: usize,
    ) -> Self {
        Self {
            occupied,
            params: *params,
            index: HashMap::new(),
            mesh: Mesh::with_capacity(triangle_hint / 2 + 4, triangle_hint),
        }
    }

    #[inline]
    fn is_occupied(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    /// Returns the vertex for lattice corner `(cx, cy)` as seen from `owner`.
    ///
    /// `owner` is a cell touching the corner. When the corner is a pinch
    /// (exactly two diagonally opposite cells present) the cell in the upper
    /// row gets its own copy, so each side of the pinch closes separately.
    pub(crate) fn vertex(&mut self, cx: i32, cy: i32, owner: Cell, level: Level) -> u32 {
        debug_assert!(
            (owner.x == cx || owner.x == cx - 1) && (owner.y == cy || owner.y == cy - 1),
            "cell {:?} does not touch corner ({}, {})",
            owner,
            cx,
            cy
        );
        let sheet = u8::from(self.is_pinch(cx, cy) && owner.y == cy);

        let cell_size = self.params.cell_size_mm;
        let z = match level {
            Level::Top => self.params.z_top_mm,
            Level::Bottom => self.params.z_bottom_mm,
        };
        let position = DVec3::new(
            round_to_precision(cx as f64 * cell_size),
            round_to_precision(cy as f64 * cell_size),
            round_to_precision(z),
        );
        let key = VertexKey {
            x: to_scaled_coordinate(position.x),
            y: to_scaled_coordinate(position.y),
            z: to_scaled_coordinate(position.z),
            sheet,
        };

        let mesh = &mut self.mesh;
        *self.index.entry(key).or_insert_with(|| mesh.add_vertex(position))
    }

    /// Two diagonally opposite cells around the corner, the other two empty.
    fn is_pinch(&self, cx: i32, cy: i32) -> bool {
        let lower_left = self.is_occupied(Cell::new(cx - 1, cy - 1));
        let lower_right = self.is_occupied(Cell::new(cx, cy - 1));
        let upper_left = self.is_occupied(Cell::new(cx - 1, cy));
        let upper_right = self.is_occupied(Cell::new(cx, cy));
        (lower_left && upper_right && !lower_right && !upper_left)
            || (lower_right && upper_left && !lower_left && !upper_right)
    }

    /// Emits the top (CCW from +z) or bottom (CCW from -z) cap of `rect`.
    ///
    /// `front` and `back` are the sorted lattice x coordinates on the
    /// `y_start` and `y_end` sides, each running from `x_start` to `x_end`.
    /// Extra points split a side where a neighbour's corner touches it. The
    /// cap is zipped between both chains; every triangle spans the two
    /// sides, so none is degenerate.
    pub(crate) fn cap(&mut self, rect: &Rectangle, front: &[i32], back: &[i32], level: Level) {
        debug_assert!(front.first() == Some(&rect.x_start) && front.last() == Some(&rect.x_end));
        debug_assert!(back.first() == Some(&rect.x_start) && back.last() == Some(&rect.x_end));

        let mut i = 0;
        let mut j = 0;
        while i + 1 < front.len() || j + 1 < back.len() {
            // Advance the back chain on ties, so a plain 1x1 cap splits along
            // its (x0, y0)-(x1, y1) diagonal.
            let advance_back =
                i + 1 == front.len() || (j + 1 < back.len() && back[j + 1] <= front[i + 1]);

            let v_front = self.front_vertex(rect, front[i], level);
            let v_back = self.back_vertex(rect, back[j], level);
            if advance_back {
                let v_back_next = self.back_vertex(rect, back[j + 1], level);
                self.triangle(level, v_front, v_back_next, v_back);
                j += 1;
            } else {
                let v_front_next = self.front_vertex(rect, front[i + 1], level);
                self.triangle(level, v_front, v_front_next, v_back);
                i += 1;
            }
        }
    }

    /// Vertex at `(x, y_start)`, owned by the box cell next to it.
    fn front_vertex(&mut self, rect: &Rectangle, x: i32, level: Level) -> u32 {
        let owner = Cell::new(x.clamp(rect.x_start, rect.x_end - 1), rect.y_start);
        self.vertex(x, rect.y_start, owner, level)
    }

    /// Vertex at `(x, y_end)`, owned by the box cell next to it.
    fn back_vertex(&mut self, rect: &Rectangle, x: i32, level: Level) -> u32 {
        let owner = Cell::new(x.clamp(rect.x_start, rect.x_end - 1), rect.y_end - 1);
        self.vertex(x, rect.y_end, owner, level)
    }

    /// Adds a cap triangle given in top (CCW from +z) order.
    fn triangle(&mut self, level: Level, a: u32, b: u32, c: u32) {
        match level {
            Level::Top => self.mesh.add_triangle(a, b, c),
            Level::Bottom => self.mesh.add_triangle(a, c, b),
        }
    }

    /// Emits a vertical wall quad along `side` of a box, spanning lattice
    /// positions `from..to` on that side.
    ///
    /// For `Front`/`Back`, `line` is the y coordinate and `from..to` runs in x.
    /// For `Left`/`Right`, `line` is the x coordinate and `from..to` runs in y.
    fn wall(&mut self, side: Side, line: i32, from: i32, to: i32) {
        // Corner coordinates at the start and end of the run, and the box
        // cells owning them.
        let (start, end, start_owner, end_owner) = match side {
            Side::Front => (
                (from, line),
                (to, line),
                Cell::new(from, line),
                Cell::new(to - 1, line),
            ),
            Side::Back => (
                (to, line),
                (from, line),
                Cell::new(to - 1, line - 1),
                Cell::new(from, line - 1),
            ),
            Side::Right => (
                (line, from),
                (line, to),
                Cell::new(line - 1, from),
                Cell::new(line - 1, to - 1),
            ),
            Side::Left => (
                (line, to),
                (line, from),
                Cell::new(line, to - 1),
                Cell::new(line, from),
            ),
        };

        // Walk the outline with the solid on the left: bottom start, bottom
        // end, top end, top start is CCW seen from outside.
        let b0 = self.vertex(start.0, start.1, start_owner, Level::Bottom);
        let b1 = self.vertex(end.0, end.1, end_owner, Level::Bottom);
        let t1 = self.vertex(end.0, end.1, end_owner, Level::Top);
        let t0 = self.vertex(start.0, start.1, start_owner, Level::Top);
        self.mesh.add_triangle(b0, b1, t1);
        self.mesh.add_triangle(b0, t1, t0);
    }

    /// Emits walls along every side of `rect`, one quad per maximal run of
    /// unit segments whose across cell is empty.
    pub(crate) fn walls(&mut self, rect: &Rectangle) {
        for side in Side::ALL {
            let (line, from, to) = side.span(rect);
            let mut run_start = None;
            for k in from..to {
                let open = !self.is_occupied(side.across(line, k));
                match (open, run_start) {
                    (true, None) => run_start = Some(k),
                    (false, Some(start)) => {
                        self.wall(side, line, start, k);
                        run_start = None;
                    }
                    _ => {}
                }
            }
            if let Some(start) = run_start {
                self.wall(side, line, start, to);
            }
        }
    }

    pub(crate) fn finish(self) -> Mesh {
        self.mesh
    }
}
