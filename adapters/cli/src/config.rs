//! Layered session configuration: built-in defaults, an optional TOML file, then flags.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use clap::Parser;
use maze_escape_core::{CellCoord, DEFAULT_PLAYER_RADIUS, EYE_HEIGHT, SPRINT_SPEED, WALK_SPEED};
use maze_escape_world::{PlayerTuning, WorldConfig};
use serde::Deserialize;
use thiserror::Error;

/// Maze edge length used by the console session when nothing else is configured.
pub(crate) const SESSION_MAZE_SIZE: i32 = 15;

/// Command-line flags accepted by the `maze-escape` binary.
#[derive(Debug, Parser)]
#[command(name = "maze-escape", version, about = "Find the way out of a generated maze", long_about = None)]
pub(crate) struct Args {
    /// TOML file with `[maze]` and `[player]` sections.
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,
    /// Number of maze columns.
    #[arg(long, allow_negative_numbers = true)]
    width: Option<i32>,
    /// Number of maze rows.
    #[arg(long, allow_negative_numbers = true)]
    height: Option<i32>,
    /// Seed for the maze generator; a random seed is drawn when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Column of the start cell.
    #[arg(long, allow_negative_numbers = true)]
    start_x: Option<i32>,
    /// Row of the start cell.
    #[arg(long, allow_negative_numbers = true)]
    start_y: Option<i32>,
    /// Player collision radius in cell units.
    #[arg(long)]
    radius: Option<f32>,
}

impl Args {
    /// Overwrites every configuration value that was given on the command line.
    pub(crate) fn apply_to(&self, config: &mut GameConfig) {
        let maze = &mut config.maze;
        if let Some(width) = self.width {
            maze.width = width;
        }
        if let Some(height) = self.height {
            maze.height = height;
        }
        if let Some(seed) = self.seed {
            maze.seed = Some(seed);
        }
        if let Some(start_x) = self.start_x {
            maze.start_x = start_x;
        }
        if let Some(start_y) = self.start_y {
            maze.start_y = start_y;
        }
        if let Some(radius) = self.radius {
            config.player.radius = radius;
        }
    }
}

/// Failures while loading the configuration file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {}", path.display())]
    Read {
        /// Location that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML or has unexpected keys.
    #[error("failed to parse config file {}", path.display())]
    Parse {
        /// Location that was requested.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: toml::de::Error,
    },
}

/// Fully resolved session settings.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    pub(crate) maze: MazeSection,
    pub(crate) player: PlayerSection,
}

/// `[maze]` table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct MazeSection {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) seed: Option<u64>,
    pub(crate) start_x: i32,
    pub(crate) start_y: i32,
}

impl Default for MazeSection {
    fn default() -> Self {
        Self {
            width: SESSION_MAZE_SIZE,
            height: SESSION_MAZE_SIZE,
            seed: None,
            start_x: 0,
            start_y: 0,
        }
    }
}

/// `[player]` table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PlayerSection {
    pub(crate) radius: f32,
    pub(crate) eye_height: f32,
    pub(crate) walk_speed: f32,
    pub(crate) sprint_speed: f32,
}

impl Default for PlayerSection {
    fn default() -> Self {
        Self {
            radius: DEFAULT_PLAYER_RADIUS,
            eye_height: EYE_HEIGHT,
            walk_speed: WALK_SPEED,
            sprint_speed: SPRINT_SPEED,
        }
    }
}

impl GameConfig {
    /// Reads and parses the TOML file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Cell the maze is carved from.
    #[must_use]
    pub(crate) fn start(&self) -> CellCoord {
        CellCoord::new(self.maze.start_x, self.maze.start_y)
    }

    /// World parameters for the resolved seed.
    #[must_use]
    pub(crate) fn world_config(&self, seed: u64) -> WorldConfig {
        WorldConfig {
            width: self.maze.width,
            height: self.maze.height,
            seed,
            player: PlayerTuning {
                radius: self.player.radius,
                eye_height: self.player.eye_height,
                walk_speed: self.player.walk_speed,
                sprint_speed: self.player.sprint_speed,
            },
        }
    }
}
