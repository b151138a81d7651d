//! # Rectangle Merging Tests
//!
//! Tests for the split, strip and merge phases and the combined merger.

use super::*;

/// Collects the cells marked '#' in rows of '#' and '.' characters.
fn cells(rows: &[&str]) -> BTreeSet<Cell> {
    rows.iter()
        .enumerate()
        .flat_map(|(y, row)| {
            row.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'#')
                .map(move |(x, _)| Cell::new(x as i32, y as i32))
        })
        .collect()
}

// =============================================================================
// RECTANGLE TESTS
// =============================================================================

#[test]
fn test_unit_rectangle() {
    let rect = Rectangle::unit(Cell::new(3, -2));
    assert_eq!(rect, Rectangle::new(3, 4, -2, -1));
    assert_eq!(rect.area(), 1);
    assert!(rect.contains(Cell::new(3, -2)));
    assert!(!rect.contains(Cell::new(4, -2)));
}

#[test]
fn test_rectangle_cells_row_major() {
    let rect = Rectangle::new(0, 2, 5, 7);
    let covered: Vec<Cell> = rect.cells().collect();
    assert_eq!(
        covered,
        vec![Cell::new(0, 5), Cell::new(1, 5), Cell::new(0, 6), Cell::new(1, 6)]
    );
}

#[test]
fn test_rectangle_corners_on_lattice() {
    let rect = Rectangle::new(1, 4, 2, 3);
    assert_eq!(rect.width(), 3);
    assert_eq!(rect.height(), 1);
    assert_eq!(rect.corners()[0], Cell::new(1, 2));
    assert_eq!(rect.corners()[2], Cell::new(4, 3));
}

// =============================================================================
// PHASE TESTS
// =============================================================================

#[test]
fn test_split_separates_diagonal_touch() {
    let parts = split_edge_connected(&cells(&["##..", "##..", "..##", "..##"]));
    assert_eq!(parts.len(), 2);
    assert!(parts[0].contains(&Cell::new(0, 0)));
    assert!(parts[1].contains(&Cell::new(3, 3)));
    assert!(parts.iter().all(|p| p.len() == 4));
}

#[test]
fn test_split_keeps_u_shape_together() {
    let parts = split_edge_connected(&cells(&["#.#", "#.#", "###"]));
    assert_eq!(parts.len(), 1);
}

#[test]
fn test_strips_break_at_gaps() {
    let strips = build_strips(&cells(&["##.#", "####"]));
    assert_eq!(
        strips,
        vec![
            Strip { x_start: 0, x_end: 2, y: 0 },
            Strip { x_start: 3, x_end: 4, y: 0 },
            Strip { x_start: 0, x_end: 4, y: 1 },
        ]
    );
    assert_eq!(strips[2].len(), 4);
    assert!(strips.iter().all(|s| !s.is_empty()));
    assert!(Strip { x_start: 2, x_end: 2, y: 0 }.is_empty());
}

#[test]
fn test_merge_strips_requires_identical_range() {
    let strips = [
        Strip { x_start: 0, x_end: 2, y: 0 },
        Strip { x_start: 0, x_end: 2, y: 1 },
        Strip { x_start: 0, x_end: 3, y: 2 },
    ];
    assert_eq!(
        merge_strips(&strips),
        vec![Rectangle::new(0, 2, 0, 2), Rectangle::new(0, 3, 2, 3)]
    );
}

#[test]
fn test_merge_strips_ignores_input_order() {
    let strips = [
        Strip { x_start: 0, x_end: 1, y: 2 },
        Strip { x_start: 0, x_end: 1, y: 0 },
        Strip { x_start: 0, x_end: 1, y: 1 },
    ];
    assert_eq!(merge_strips(&strips), vec![Rectangle::new(0, 1, 0, 3)]);
}

// =============================================================================
// MERGER TESTS
// =============================================================================

#[test]
fn test_single_cell_one_unit_rectangle() {
    assert_eq!(
        merge_rectangles(&[Cell::new(7, 7)]),
        vec![Rectangle::unit(Cell::new(7, 7))]
    );
}

#[test]
fn test_empty_input() {
    assert!(merge_rectangles(&Vec::<Cell>::new()).is_empty());
}

#[test]
fn test_solid_block_one_rectangle() {
    let set = cells(&["###", "###", "###"]);
    assert_eq!(merge_rectangles(&set), vec![Rectangle::new(0, 3, 0, 3)]);
}

#[test]
fn test_l_shape_two_rectangles() {
    let set = cells(&["#..", "#..", "###"]);
    assert_eq!(
        merge_rectangles(&set),
        vec![Rectangle::new(0, 1, 0, 2), Rectangle::new(0, 3, 2, 3)]
    );
}

#[test]
fn test_diagonal_blocks_never_share_rectangle() {
    let set = cells(&["##..", "##..", "..##", "..##"]);
    assert_eq!(
        merge_rectangles(&set),
        vec![Rectangle::new(0, 2, 0, 2), Rectangle::new(2, 4, 2, 4)]
    );
}

#[test]
fn test_rectangles_cover_exactly() {
    let set = cells(&["##.##", "#####", ".###.", "..#.."]);
    let rects = merge_rectangles(&set);

    let mut covered = BTreeSet::new();
    for rect in &rects {
        for cell in rect.cells() {
            assert!(covered.insert(cell), "overlap at {:?}", cell);
        }
    }
    assert_eq!(covered, set);
}

#[test]
fn test_merger_is_deterministic() {
    let set = cells(&["#.##", "####", "##.#"]);
    let reversed: Vec<Cell> = set.iter().rev().copied().collect();
    assert_eq!(merge_rectangles(&set), merge_rectangles(&reversed));
}

#[test]
fn test_merge_efficiency() {
    assert_eq!(merge_efficiency(0, 0), 0.0);
    assert_eq!(merge_efficiency(9, 1), 1.0 - 1.0 / 9.0);
    assert_eq!(merge_efficiency(4, 4), 0.0);
}
