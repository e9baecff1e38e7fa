//! Circle-versus-wall collision queries against the maze grid.
//!
//! The player is approximated by a circle of radius `r` in the `(x, z)`
//! plane. A position is blocked when the circle reaches into a closed wall of
//! the cell it occupies, or into the facing wall of the neighbour it is
//! pressing against. The neighbour check keeps asymmetric wall data from
//! letting the circle through a shared wall from the far side.

use glam::Vec3;
use maze_escape_core::{CellCoord, MazeView, WallSide};

/// Reports whether a circle centred at `(x, z)` overlaps any wall.
///
/// Positions outside the grid, and non-finite positions, are always blocked.
#[must_use]
pub fn is_blocked(maze: &MazeView<'_>, x: f32, z: f32, radius: f32) -> bool {
    if !x.is_finite() || !z.is_finite() {
        return true;
    }

    let cell = CellCoord::containing(x, z);
    if !maze.contains(cell) {
        return true;
    }

    let offset_x = x - cell.column() as f32;
    let offset_z = z - cell.row() as f32;
    let touches = |side: WallSide| match side {
        WallSide::Top => offset_z < radius,
        WallSide::Bottom => offset_z > 1.0 - radius,
        WallSide::Left => offset_x < radius,
        WallSide::Right => offset_x > 1.0 - radius,
    };

    let walls = maze.cell(cell);
    if WallSide::ALL
        .into_iter()
        .any(|side| touches(side) && walls.has_wall(side))
    {
        return true;
    }

    WallSide::ALL.into_iter().any(|side| {
        let neighbor = cell.neighbor(side);
        touches(side) && maze.contains(neighbor) && maze.cell(neighbor).has_wall(side.opposite())
    })
}

/// Resolves a planar displacement against the walls, sliding along them when blocked.
///
/// The full move is taken when it is free. Otherwise the x-only and z-only
/// moves are tested independently from `from`, and each free one contributes
/// its own axis, so a diagonal move into a wall keeps its parallel component.
/// The vertical component of `from` is preserved.
#[must_use]
pub fn resolve_slide(maze: &MazeView<'_>, from: Vec3, displacement: Vec3, radius: f32) -> Vec3 {
    let target_x = from.x + displacement.x;
    let target_z = from.z + displacement.z;

    if !is_blocked(maze, target_x, target_z, radius) {
        return Vec3::new(target_x, from.y, target_z);
    }

    let mut resolved = from;
    if !is_blocked(maze, target_x, from.z, radius) {
        resolved.x = target_x;
    }
    if !is_blocked(maze, from.x, target_z, radius) {
        resolved.z = target_z;
    }
    resolved
}
