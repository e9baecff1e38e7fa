//! Tick pipeline tying the world to the movement and progression systems.

use std::time::Duration;

use log::debug;
use maze_escape_core::{Command, Event};
use maze_escape_rendering::{FrameInput, Scene};
use maze_escape_system_bootstrap::Bootstrap;
use maze_escape_system_movement::{InputContext, Movement};
use maze_escape_system_progression::Progression;
use maze_escape_world::{self as world, query, World};

use crate::config::GameConfig;

/// One play session: world state plus the systems that drive it.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    bootstrap: Bootstrap,
    movement: Movement,
    progression: Progression,
}

impl Session {
    /// Builds the world, carves the maze, and places the player at the start.
    pub(crate) fn new(config: &GameConfig, seed: u64) -> Self {
        let mut session = Self {
            world: World::with_config(config.world_config(seed)),
            bootstrap: Bootstrap,
            movement: Movement::default(),
            progression: Progression::default(),
        };

        let mut commands = Vec::new();
        session.bootstrap.opening_commands(
            config.maze.width,
            config.maze.height,
            config.start(),
            &mut commands,
        );
        let _ = session.execute(commands);

        let mut commands = Vec::new();
        session.reset_player(&mut commands);
        let _ = session.execute(commands);
        session
    }

    /// Banner shown before the first frame.
    pub(crate) fn banner(&self) -> &str {
        self.bootstrap.welcome_banner(&self.world)
    }

    /// Scene describing the current state.
    pub(crate) fn scene(&self) -> Scene {
        let player = query::player(&self.world);
        Scene::from_view(&self.bootstrap.maze_view(&self.world), Some(&player))
    }

    /// Advances the session by one frame and refreshes `scene`.
    pub(crate) fn step(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        let mut commands = Vec::new();
        self.movement.handle(&input_context(dt, &input), &mut commands);
        commands.push(Command::Tick { dt });
        let events = self.execute(commands);

        let player = query::player(&self.world);
        if let Some(victory) =
            self.progression
                .handle(&events, &player, query::end_cell(&self.world))
        {
            scene.push_message(victory.message());
        }

        if input.reset {
            let mut commands = Vec::new();
            self.reset_player(&mut commands);
            let _ = self.execute(commands);
            scene.push_message("Back at the start.");
        }

        let player = query::player(&self.world);
        scene.refresh(&query::maze_view(&self.world), Some(&player));
    }

    fn reset_player(&mut self, out: &mut Vec<Command>) {
        self.progression.reset(
            query::start_cell(&self.world),
            query::eye_height(&self.world),
            out,
        );
    }

    fn execute(&mut self, commands: Vec<Command>) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }
        debug!("frame produced {} events", events.len());
        events
    }
}

fn input_context(dt: Duration, input: &FrameInput) -> InputContext {
    InputContext {
        forward: input.forward,
        backward: input.backward,
        left: input.left,
        right: input.right,
        sprint: input.sprint,
        yaw_delta: input.yaw_delta,
        pitch_delta: input.pitch_delta,
        dt,
    }
}
