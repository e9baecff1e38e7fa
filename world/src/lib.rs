#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Escape.

pub mod collision;
mod maze;
mod player;

use std::time::Duration;

use glam::Vec3;
use log::debug;
use maze_escape_core::{
    CellCoord, Command, Event, DEFAULT_MAZE_HEIGHT, DEFAULT_MAZE_WIDTH, WELCOME_BANNER,
};

pub use maze::{Layout, Maze};
pub use player::{Player, PlayerTuning};

/// Seed used when the caller does not supply one.
pub const DEFAULT_MAZE_SEED: u64 = 0x42f0_e1eb_d4a5_3c21;

/// Parameters used to construct a [`World`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    /// Requested number of maze columns; non-positive values are corrected.
    pub width: i32,
    /// Requested number of maze rows; non-positive values are corrected.
    pub height: i32,
    /// Seed for the maze's random source.
    pub seed: u64,
    /// Player collision and speed parameters.
    pub player: PlayerTuning,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAZE_WIDTH as i32,
            height: DEFAULT_MAZE_HEIGHT as i32,
            seed: DEFAULT_MAZE_SEED,
            player: PlayerTuning::default(),
        }
    }
}

/// Represents the authoritative Maze Escape world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    seed: u64,
    maze: Maze,
    player: Player,
    tick_index: u64,
    elapsed: Duration,
}

impl World {
    /// Creates a world with the default configuration.
    ///
    /// The maze starts fully walled; issue [`Command::GenerateMaze`] to carve it.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates a world from an explicit configuration.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            seed: config.seed,
            maze: Maze::new(config.width, config.height, config.seed),
            player: Player::new(config.player),
            tick_index: 0,
            elapsed: Duration::ZERO,
        }
    }

    fn emit_player_motion(
        &self,
        moved: bool,
        from: Vec3,
        from_cell: CellCoord,
        out_events: &mut Vec<Event>,
    ) {
        let to = self.player.position();
        if !moved {
            out_events.push(Event::PlayerBlocked { at: to });
            return;
        }

        let to_cell = self.player.current_cell();

        out_events.push(Event::PlayerMoved { from, to });
        if to_cell != from_cell {
            out_events.push(Event::PlayerCellChanged {
                from: from_cell,
                to: to_cell,
            });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureMaze { width, height } => {
            world.maze = Maze::new(width, height, world.seed);
            out_events.push(Event::MazeConfigured {
                width: world.maze.width(),
                height: world.maze.height(),
            });
        }
        Command::GenerateMaze { start } => {
            let layout = world.maze.generate(start);
            out_events.push(Event::MazeGenerated {
                start: layout.start,
                end: layout.end,
            });
        }
        Command::SetStartCell { cell } => {
            if world.maze.set_start_cell(cell) {
                out_events.push(Event::StartCellChanged { cell });
            }
        }
        Command::SetEndCell { cell } => {
            if world.maze.set_end_cell(cell) {
                out_events.push(Event::EndCellChanged { cell });
            }
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            world.elapsed = world.elapsed.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::MovePlayer { intent, dt } => {
            let from = world.player.position();
            let from_cell = world.player.current_cell();
            let direction = world.player.direction_for(intent);
            let moved = world
                .player
                .process_movement(direction, dt, &world.maze.view());
            world.emit_player_motion(moved, from, from_cell, out_events);
        }
        Command::TurnPlayer {
            yaw_delta,
            pitch_delta,
        } => {
            world.player.turn(yaw_delta, pitch_delta);
            out_events.push(Event::PlayerTurned {
                yaw: world.player.yaw(),
                pitch: world.player.pitch(),
            });
        }
        Command::SetSprinting { sprinting } => {
            world.player.set_sprinting(sprinting);
        }
        Command::PlacePlayer { position } => {
            let from = world.player.position();
            let from_cell = world.player.current_cell();
            world.player.set_position(position);
            debug!("player placed at {}", world.player.current_cell());
            let moved = world.player.position() != from;
            world.emit_player_motion(moved, from, from_cell, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use maze_escape_core::{CellCoord, MazeView, PlayerSnapshot};

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides a read-only view of the maze grid.
    #[must_use]
    pub fn maze_view(world: &World) -> MazeView<'_> {
        world.maze.view()
    }

    /// Cell carrying the start marker, if any.
    #[must_use]
    pub fn start_cell(world: &World) -> Option<CellCoord> {
        world.maze.start_cell()
    }

    /// Cell carrying the end marker, if any.
    #[must_use]
    pub fn end_cell(world: &World) -> Option<CellCoord> {
        world.maze.end_cell()
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Eye height the player is pinned to.
    #[must_use]
    pub fn eye_height(world: &World) -> f32 {
        world.player.tuning().eye_height
    }

    /// Reports whether the player stands in the end cell.
    #[must_use]
    pub fn is_player_at_exit(world: &World) -> bool {
        world.player.is_at_exit(&world.maze.view())
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Total simulated time accumulated across ticks.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_escape_core::MoveIntent;

    fn generated_world(width: i32, height: i32) -> World {
        let mut world = World::with_config(WorldConfig {
            width,
            height,
            ..WorldConfig::default()
        });
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::GenerateMaze {
                start: CellCoord::new(0, 0),
            },
            &mut events,
        );
        world
    }

    #[test]
    fn configure_maze_reports_corrected_dimensions() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::ConfigureMaze {
                width: -4,
                height: 6,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::MazeConfigured {
                width: DEFAULT_MAZE_WIDTH,
                height: DEFAULT_MAZE_HEIGHT,
            }]
        );
        assert_eq!(query::maze_view(&world).width(), DEFAULT_MAZE_WIDTH);
    }

    #[test]
    fn generate_reports_layout() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::GenerateMaze {
                start: CellCoord::new(0, 0),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::MazeGenerated {
                start: CellCoord::new(0, 0),
                end: CellCoord::new(9, 9),
            }]
        );
        assert_eq!(query::start_cell(&world), Some(CellCoord::new(0, 0)));
        assert_eq!(query::end_cell(&world), Some(CellCoord::new(9, 9)));
    }

    #[test]
    fn tick_advances_clock() {
        let mut world = World::new();
        let mut events = Vec::new();
        let dt = Duration::from_millis(16);

        apply(&mut world, Command::Tick { dt }, &mut events);
        apply(&mut world, Command::Tick { dt }, &mut events);

        assert_eq!(query::tick_index(&world), 2);
        assert_eq!(query::elapsed(&world), dt * 2);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn place_player_reports_cell_change() {
        let mut world = generated_world(4, 4);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::PlacePlayer {
                position: Vec3::new(2.5, 0.0, 3.5),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::PlayerMoved {
                    from: Vec3::new(0.5, 1.0, 0.5),
                    to: Vec3::new(2.5, 1.0, 3.5),
                },
                Event::PlayerCellChanged {
                    from: CellCoord::new(0, 0),
                    to: CellCoord::new(2, 3),
                },
            ]
        );
        assert!(!query::is_player_at_exit(&world));
    }

    #[test]
    fn moving_into_sealed_cell_keeps_player_in_cell() {
        let mut world = World::with_config(WorldConfig {
            width: 1,
            height: 1,
            ..WorldConfig::default()
        });
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MovePlayer {
                intent: MoveIntent::Forward,
                dt: Duration::from_secs(1),
            },
            &mut events,
        );

        let player = query::player(&world);
        assert_eq!(player.cell, CellCoord::new(0, 0));
        assert_eq!(player.position.z, 0.5);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::PlayerCellChanged { .. })));
    }

    #[test]
    fn stationary_move_reports_blocked() {
        let mut world = World::with_config(WorldConfig {
            width: 1,
            height: 1,
            ..WorldConfig::default()
        });
        let before = query::player(&world).position;
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MovePlayer {
                intent: MoveIntent::Forward,
                dt: Duration::ZERO,
            },
            &mut events,
        );

        assert_eq!(events, vec![Event::PlayerBlocked { at: before }]);
        assert_eq!(query::player(&world).position, before);
    }

    #[test]
    fn out_of_range_setter_emits_nothing() {
        let mut world = generated_world(3, 3);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::SetEndCell {
                cell: CellCoord::new(3, 3),
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert_eq!(query::end_cell(&world), Some(CellCoord::new(2, 2)));
    }
}
