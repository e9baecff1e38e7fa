#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Maze Escape experience.

use maze_escape_core::{CellCoord, Command, MazeView};
use maze_escape_world::{query, World};

/// Produces data and commands required to open a session.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the maze grid required for rendering.
    #[must_use]
    pub fn maze_view<'world>(&self, world: &'world World) -> MazeView<'world> {
        query::maze_view(world)
    }

    /// Emits the commands that size the maze and carve it from `start`.
    pub fn opening_commands(
        &self,
        width: i32,
        height: i32,
        start: CellCoord,
        out: &mut Vec<Command>,
    ) {
        out.push(Command::ConfigureMaze { width, height });
        out.push(Command::GenerateMaze { start });
    }
}
