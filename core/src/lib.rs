#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Escape engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! views such as [`MazeView`], and respond exclusively with new command batches.

use std::{fmt, time::Duration};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Escape.";

/// Number of columns substituted when a maze is configured with an invalid width.
pub const DEFAULT_MAZE_WIDTH: u32 = 10;

/// Number of rows substituted when a maze is configured with an invalid height.
pub const DEFAULT_MAZE_HEIGHT: u32 = 10;

/// Fixed height of the player's eye above the maze floor.
pub const EYE_HEIGHT: f32 = 1.0;

/// Radius of the circle approximating the player in the movement plane.
pub const DEFAULT_PLAYER_RADIUS: f32 = 0.3;

/// Walking speed measured in cells per second.
pub const WALK_SPEED: f32 = 2.5;

/// Sprinting speed measured in cells per second.
pub const SPRINT_SPEED: f32 = 5.0;

/// Degrees of rotation applied per unit of look input.
pub const LOOK_SENSITIVITY: f32 = 0.1;

/// Heading assigned to a freshly created player, in degrees.
pub const DEFAULT_YAW_DEGREES: f32 = -90.0;

/// Maximum absolute pitch the player may look up or down, in degrees.
pub const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the maze with a fresh, ungenerated grid of the provided size.
    ///
    /// Non-positive dimensions are corrected to the default size.
    ConfigureMaze {
        /// Requested number of columns.
        width: i32,
        /// Requested number of rows.
        height: i32,
    },
    /// Carves a new perfect maze starting from the provided cell.
    GenerateMaze {
        /// Cell the carving starts from. Out-of-range cells fall back to the origin.
        start: CellCoord,
    },
    /// Moves the start marker onto the provided cell.
    SetStartCell {
        /// Cell that should carry the start marker.
        cell: CellCoord,
    },
    /// Moves the end marker onto the provided cell.
    SetEndCell {
        /// Cell that should carry the end marker.
        cell: CellCoord,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player walk along a heading-relative direction.
    MovePlayer {
        /// Direction of travel relative to the player's heading.
        intent: MoveIntent,
        /// Duration over which the movement is integrated.
        dt: Duration,
    },
    /// Rotates the player's view by raw look deltas.
    TurnPlayer {
        /// Horizontal look input, scaled by [`LOOK_SENSITIVITY`].
        yaw_delta: f32,
        /// Vertical look input, scaled by [`LOOK_SENSITIVITY`].
        pitch_delta: f32,
    },
    /// Switches the player between walking and sprinting speed.
    SetSprinting {
        /// Whether the sprint speed should be used for subsequent moves.
        sprinting: bool,
    },
    /// Teleports the player to the provided world position.
    PlacePlayer {
        /// Target position. The vertical component is replaced by the eye height.
        position: Vec3,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that the maze grid was replaced.
    MazeConfigured {
        /// Number of columns in the new grid.
        width: u32,
        /// Number of rows in the new grid.
        height: u32,
    },
    /// Confirms that a new maze layout was carved.
    MazeGenerated {
        /// Cell carrying the start marker.
        start: CellCoord,
        /// Cell carrying the end marker.
        end: CellCoord,
    },
    /// Reports that the start marker moved.
    StartCellChanged {
        /// Cell that now carries the start marker.
        cell: CellCoord,
    },
    /// Reports that the end marker moved.
    EndCellChanged {
        /// Cell that now carries the end marker.
        cell: CellCoord,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player's position changed.
    PlayerMoved {
        /// Position before the move.
        from: Vec3,
        /// Position after the move.
        to: Vec3,
    },
    /// Reports that a movement request was fully absorbed by walls.
    PlayerBlocked {
        /// Position the player remained at.
        at: Vec3,
    },
    /// Reports that the player's discrete cell changed.
    PlayerCellChanged {
        /// Cell occupied before the change.
        from: CellCoord,
        /// Cell occupied after the change.
        to: CellCoord,
    },
    /// Reports that the player's view orientation changed.
    PlayerTurned {
        /// Heading after the turn, in degrees.
        yaw: f32,
        /// Pitch after the turn, in degrees.
        pitch: f32,
    },
}

/// Lifecycle of a single play session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameState {
    /// The player is still searching for the exit.
    #[default]
    Playing,
    /// The player reached the exit cell.
    Won,
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Continuous world position; `y` is always the eye height.
    pub position: Vec3,
    /// Discrete cell derived from the position.
    pub cell: CellCoord,
    /// Heading in degrees.
    pub yaw: f32,
    /// Pitch in degrees.
    pub pitch: f32,
    /// Radius of the collision circle.
    pub radius: f32,
    /// Whether sprint speed is active.
    pub sprinting: bool,
}

/// Heading-relative movement directions requested by the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveIntent {
    /// Along the player's heading.
    Forward,
    /// Against the player's heading.
    Backward,
    /// Perpendicular to the heading, towards the player's left.
    Left,
    /// Perpendicular to the heading, towards the player's right.
    Right,
}

/// Side of a cell that may carry a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallSide {
    /// Towards decreasing row indices.
    Top,
    /// Towards increasing column indices.
    Right,
    /// Towards increasing row indices.
    Bottom,
    /// Towards decreasing column indices.
    Left,
}

impl WallSide {
    /// All sides in clockwise order starting at the top.
    pub const ALL: [WallSide; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Side of the neighbouring cell that faces this side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Column and row offset towards the neighbour across this side.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Top => (0, -1),
            Self::Right => (1, 0),
            Self::Bottom => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so that positions outside the grid still map to a
/// well-defined cell, which callers then treat as solid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: i32,
    row: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Cell containing the provided point of the movement plane.
    ///
    /// The world `x` axis maps to columns and the world `z` axis maps to rows.
    #[must_use]
    pub fn containing(x: f32, z: f32) -> Self {
        Self::new(x.floor() as i32, z.floor() as i32)
    }

    /// Neighbouring cell across the provided side.
    #[must_use]
    pub const fn neighbor(self, side: WallSide) -> Self {
        let (dx, dy) = side.offset();
        Self::new(self.column + dx, self.row + dy)
    }

    /// World position at the centre of the cell, lifted to the provided height.
    #[must_use]
    pub fn center(self, height: f32) -> Vec3 {
        Vec3::new(self.column as f32 + 0.5, height, self.row as f32 + 0.5)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// One square of the maze grid with four independent walls and start/end markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    visited: bool,
    wall_top: bool,
    wall_right: bool,
    wall_bottom: bool,
    wall_left: bool,
    is_start: bool,
    is_end: bool,
}

impl Cell {
    /// Unvisited cell with every wall closed and no markers.
    ///
    /// Also returned for queries outside the grid so that callers treat
    /// off-grid space as impassable.
    pub const SOLID: Cell = Cell {
        visited: false,
        wall_top: true,
        wall_right: true,
        wall_bottom: true,
        wall_left: true,
        is_start: false,
        is_end: false,
    };

    /// Whether the generator already reached this cell.
    #[must_use]
    pub const fn visited(&self) -> bool {
        self.visited
    }

    /// Whether the wall on the top side is closed.
    #[must_use]
    pub const fn wall_top(&self) -> bool {
        self.wall_top
    }

    /// Whether the wall on the right side is closed.
    #[must_use]
    pub const fn wall_right(&self) -> bool {
        self.wall_right
    }

    /// Whether the wall on the bottom side is closed.
    #[must_use]
    pub const fn wall_bottom(&self) -> bool {
        self.wall_bottom
    }

    /// Whether the wall on the left side is closed.
    #[must_use]
    pub const fn wall_left(&self) -> bool {
        self.wall_left
    }

    /// Whether the wall on the provided side is closed.
    #[must_use]
    pub const fn has_wall(&self, side: WallSide) -> bool {
        match side {
            WallSide::Top => self.wall_top,
            WallSide::Right => self.wall_right,
            WallSide::Bottom => self.wall_bottom,
            WallSide::Left => self.wall_left,
        }
    }

    /// Whether the cell carries the start marker.
    #[must_use]
    pub const fn is_start(&self) -> bool {
        self.is_start
    }

    /// Whether the cell carries the end marker.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.is_end
    }

    /// Opens or closes the wall on the provided side.
    pub fn set_wall(&mut self, side: WallSide, closed: bool) {
        match side {
            WallSide::Top => self.wall_top = closed,
            WallSide::Right => self.wall_right = closed,
            WallSide::Bottom => self.wall_bottom = closed,
            WallSide::Left => self.wall_left = closed,
        }
    }

    /// Records whether the generator reached this cell.
    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    /// Adds or removes the start marker.
    pub fn set_start(&mut self, is_start: bool) {
        self.is_start = is_start;
    }

    /// Adds or removes the end marker.
    pub fn set_end(&mut self, is_end: bool) {
        self.is_end = is_end;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::SOLID
    }
}

/// Read-only view into a dense row-major maze grid.
#[derive(Clone, Copy, Debug)]
pub struct MazeView<'a> {
    cells: &'a [Cell],
    width: u32,
    height: u32,
}

impl<'a> MazeView<'a> {
    /// Captures a new maze view backed by the provided cell slice.
    #[must_use]
    pub fn new(cells: &'a [Cell], width: u32, height: u32) -> Self {
        Self {
            cells,
            width,
            height,
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.index(cell).is_some()
    }

    /// Returns the cell at the coordinate, or [`Cell::SOLID`] outside the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Cell {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(Cell::SOLID)
    }

    /// Iterates every cell in row-major order together with its coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Cell)> + 'a {
        let width = self.width.max(1) as usize;
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let column = (index % width) as i32;
            let row = (index / width) as i32;
            (CellCoord::new(column, row), *cell)
        })
    }

    /// Coordinate of the cell carrying the start marker, if any.
    #[must_use]
    pub fn start_cell(&self) -> Option<CellCoord> {
        self.iter()
            .find(|(_, cell)| cell.is_start())
            .map(|(coord, _)| coord)
    }

    /// Coordinate of the cell carrying the end marker, if any.
    #[must_use]
    pub fn end_cell(&self) -> Option<CellCoord> {
        self.iter()
            .find(|(_, cell)| cell.is_end())
            .map(|(coord, _)| coord)
    }

    /// Reports whether the shared wall between two adjacent in-grid cells is open on both sides.
    #[must_use]
    pub fn is_passage(&self, cell: CellCoord, side: WallSide) -> bool {
        let neighbor = cell.neighbor(side);
        self.contains(cell)
            && self.contains(neighbor)
            && !self.cell(cell).has_wall(side)
            && !self.cell(neighbor).has_wall(side.opposite())
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        let column = u32::try_from(cell.column()).ok()?;
        let row = u32::try_from(cell.row()).ok()?;
        if column < self.width && row < self.height {
            let width = usize::try_from(self.width).ok()?;
            let row = usize::try_from(row).ok()?;
            let column = usize::try_from(column).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
