use std::time::Duration;

use glam::Vec3;
use maze_escape_core::{Cell, CellCoord, MazeView, WallSide, DEFAULT_PLAYER_RADIUS, WALK_SPEED};
use maze_escape_world::{collision, Player, PlayerTuning};
use proptest::prelude::*;

/// Grid with every interior wall open and only the outer boundary closed.
fn open_room(width: u32, height: u32) -> Vec<Cell> {
    let mut cells = vec![Cell::default(); (width * height) as usize];
    for row in 0..height {
        for column in 0..width {
            let cell = &mut cells[(row * width + column) as usize];
            cell.set_wall(WallSide::Top, row == 0);
            cell.set_wall(WallSide::Bottom, row == height - 1);
            cell.set_wall(WallSide::Left, column == 0);
            cell.set_wall(WallSide::Right, column == width - 1);
        }
    }
    cells
}

#[test]
fn diagonal_move_slides_along_blocking_wall() {
    let cells = open_room(2, 2);
    let view = MazeView::new(&cells, 2, 2);
    let mut player = Player::new(PlayerTuning::default());
    player.set_position(Vec3::new(1.6, 0.0, 0.5));
    let from = player.position();

    let direction = Vec3::new(1.0, 0.0, 1.0).normalize();
    let dt = Duration::from_millis(100);
    let displacement = direction * WALK_SPEED * dt.as_secs_f32();

    assert!(player.check_collision(from + displacement, &view));
    assert!(player.process_movement(direction, dt, &view));

    let moved = player.position() - from;
    assert_eq!(moved.x, 0.0);
    assert_eq!(player.position().z, from.z + displacement.z);
    assert!(moved.z > 0.0);
}

#[test]
fn each_free_axis_commits_independently() {
    // Wall between (0, 1) and (1, 1) only; the diagonal target lands against it.
    let mut cells = open_room(2, 2);
    cells[3].set_wall(WallSide::Left, true);
    cells[2].set_wall(WallSide::Right, true);
    let view = MazeView::new(&cells, 2, 2);

    let from = Vec3::new(0.5, 1.0, 0.5);
    let displacement = Vec3::new(0.6, 0.0, 0.6);
    assert!(collision::is_blocked(
        &view,
        from.x + displacement.x,
        from.z + displacement.z,
        DEFAULT_PLAYER_RADIUS
    ));

    let resolved = collision::resolve_slide(&view, from, displacement, DEFAULT_PLAYER_RADIUS);
    assert_eq!(
        resolved,
        Vec3::new(from.x + displacement.x, from.y, from.z + displacement.z)
    );
}

#[test]
fn walking_through_an_open_doorway_changes_cell() {
    let cells = open_room(3, 1);
    let view = MazeView::new(&cells, 3, 1);
    let mut player = Player::new(PlayerTuning::default());

    for _ in 0..10 {
        let _ = player.process_movement(Vec3::X, Duration::from_millis(100), &view);
    }

    assert_eq!(player.current_cell(), CellCoord::new(2, 0));
    assert!(player.position().x <= 3.0 - DEFAULT_PLAYER_RADIUS);
}

#[test]
fn cell_is_derived_from_position_after_every_move() {
    let cells = open_room(4, 4);
    let view = MazeView::new(&cells, 4, 4);
    let mut player = Player::new(PlayerTuning::default());
    player.set_position(Vec3::new(1.5, 0.0, 1.5));

    for direction in [Vec3::X, Vec3::Z, -Vec3::X, -Vec3::Z, Vec3::new(0.6, 0.0, 0.8)] {
        let _ = player.process_movement(direction, Duration::from_millis(250), &view);
        let position = player.position();
        assert_eq!(
            player.current_cell(),
            CellCoord::containing(position.x, position.z)
        );
    }
}

proptest! {
    #[test]
    fn interior_positions_clear_of_edges_are_free(
        offset_x in 0.31f32..0.69,
        offset_z in 0.31f32..0.69,
    ) {
        let mut cells = open_room(3, 3);
        for cell in &mut cells {
            for side in WallSide::ALL {
                cell.set_wall(side, false);
            }
        }
        let view = MazeView::new(&cells, 3, 3);

        prop_assert!(!collision::is_blocked(
            &view,
            1.0 + offset_x,
            1.0 + offset_z,
            DEFAULT_PLAYER_RADIUS
        ));
    }

    #[test]
    fn walled_cell_interior_is_free(
        offset_x in 0.31f32..0.69,
        offset_z in 0.31f32..0.69,
    ) {
        let cells = vec![Cell::default(); 9];
        let view = MazeView::new(&cells, 3, 3);

        prop_assert!(!collision::is_blocked(
            &view,
            1.0 + offset_x,
            1.0 + offset_z,
            DEFAULT_PLAYER_RADIUS
        ));
    }
}
