use std::collections::{HashSet, VecDeque};

use maze_escape_core::{CellCoord, MazeView, WallSide};
use maze_escape_world::Maze;
use proptest::prelude::*;

fn open_passage_count(view: &MazeView<'_>) -> usize {
    view.iter()
        .map(|(coord, _)| {
            [WallSide::Right, WallSide::Bottom]
                .into_iter()
                .filter(|side| view.is_passage(coord, *side))
                .count()
        })
        .sum()
}

fn reachable_from(view: &MazeView<'_>, start: CellCoord) -> HashSet<CellCoord> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    let _ = seen.insert(start);
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        for side in WallSide::ALL {
            if !view.is_passage(cell, side) {
                continue;
            }
            let neighbor = cell.neighbor(side);
            if seen.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    seen
}

/// Every wall between two in-grid cells must agree on both sides.
fn assert_walls_symmetric(view: &MazeView<'_>) {
    for (coord, cell) in view.iter() {
        for side in [WallSide::Right, WallSide::Bottom] {
            let neighbor = coord.neighbor(side);
            if !view.contains(neighbor) {
                continue;
            }
            assert_eq!(
                cell.has_wall(side),
                view.cell(neighbor).has_wall(side.opposite()),
                "asymmetric wall between {coord} and {neighbor}"
            );
        }
    }
}

/// Outer boundary walls may only be open on the start and end cells.
fn assert_boundary_closed_except_markers(view: &MazeView<'_>) {
    for (coord, cell) in view.iter() {
        if cell.is_start() || cell.is_end() {
            continue;
        }
        for side in WallSide::ALL {
            if !view.contains(coord.neighbor(side)) {
                assert!(cell.has_wall(side), "boundary opened at {coord} {side:?}");
            }
        }
    }
}

#[test]
fn five_by_five_maze_is_a_spanning_tree() {
    let mut maze = Maze::new(5, 5, 7);
    let _ = maze.generate(CellCoord::new(0, 0));
    let view = maze.view();

    assert!(maze.cell(CellCoord::new(0, 0)).is_start());
    assert_eq!(reachable_from(&view, CellCoord::new(0, 0)).len(), 25);
    assert_eq!(open_passage_count(&view), 24);
}

#[test]
fn regeneration_leaves_no_stale_state() {
    let mut maze = Maze::new(9, 6, 21);
    let _ = maze.generate(CellCoord::new(0, 0));
    let _ = maze.generate(CellCoord::new(4, 3));
    let view = maze.view();

    let starts: Vec<_> = view.iter().filter(|(_, cell)| cell.is_start()).collect();
    let ends: Vec<_> = view.iter().filter(|(_, cell)| cell.is_end()).collect();
    assert_eq!(starts.len(), 1);
    assert_eq!(ends.len(), 1);
    assert_eq!(starts[0].0, CellCoord::new(4, 3));
    assert_eq!(open_passage_count(&view), 9 * 6 - 1);
    assert_eq!(reachable_from(&view, CellCoord::new(4, 3)).len(), 9 * 6);
    assert_walls_symmetric(&view);
}

#[test]
fn cells_outside_grid_are_solid() {
    let mut maze = Maze::new(3, 4, 2);
    let _ = maze.generate(CellCoord::new(0, 0));

    for coord in [
        CellCoord::new(-1, 0),
        CellCoord::new(3, 0),
        CellCoord::new(0, -1),
        CellCoord::new(0, 4),
        CellCoord::new(100, 100),
    ] {
        let cell = maze.cell(coord);
        assert!(WallSide::ALL.into_iter().all(|side| cell.has_wall(side)));
    }
}

#[test]
fn setters_keep_a_single_marker() {
    let mut maze = Maze::new(4, 4, 8);
    let _ = maze.generate(CellCoord::new(0, 0));

    assert!(maze.set_end_cell(CellCoord::new(1, 2)));
    assert!(maze.set_end_cell(CellCoord::new(2, 1)));

    let ends = maze.view().iter().filter(|(_, cell)| cell.is_end()).count();
    assert_eq!(ends, 1);
    assert_eq!(maze.end_cell(), Some(CellCoord::new(2, 1)));
}

proptest! {
    #[test]
    fn generated_mazes_are_perfect(
        width in 1i32..16,
        height in 1i32..16,
        seed in any::<u64>(),
        start_column in 0i32..16,
        start_row in 0i32..16,
    ) {
        let mut maze = Maze::new(width, height, seed);
        let layout = maze.generate(CellCoord::new(start_column, start_row));
        let view = maze.view();
        let cell_count = (width * height) as usize;

        prop_assert!(view.contains(layout.start));
        prop_assert_eq!(reachable_from(&view, layout.start).len(), cell_count);
        prop_assert_eq!(open_passage_count(&view), cell_count - 1);
        assert_walls_symmetric(&view);
        assert_boundary_closed_except_markers(&view);

        let starts = view.iter().filter(|(_, cell)| cell.is_start()).count();
        let ends = view.iter().filter(|(_, cell)| cell.is_end()).count();
        prop_assert_eq!(starts, 1);
        prop_assert_eq!(ends, 1);
        if cell_count > 1 {
            prop_assert_ne!(layout.start, layout.end);
        }
        prop_assert_eq!(maze.start_cell(), Some(layout.start));
        prop_assert_eq!(maze.end_cell(), Some(layout.end));
    }
}
