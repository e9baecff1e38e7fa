#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Escape adapters.

pub mod ascii;

use std::time::Duration;

use anyhow::Result as AnyResult;
use glam::{Mat4, Vec2, Vec3};
use maze_escape_core::{CellCoord, MazeView, PlayerSnapshot, WallSide};

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Forward movement key is held.
    pub forward: bool,
    /// Backward movement key is held.
    pub backward: bool,
    /// Strafe-left key is held.
    pub left: bool,
    /// Strafe-right key is held.
    pub right: bool,
    /// Sprint modifier is held.
    pub sprint: bool,
    /// Horizontal look delta captured this frame.
    pub yaw_delta: f32,
    /// Vertical look delta captured this frame.
    pub pitch_delta: f32,
    /// The player asked to restart from the start cell.
    pub reset: bool,
}

/// Which marker a floor tile carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Entrance of the maze.
    Start,
    /// Exit of the maze.
    End,
}

impl MarkerKind {
    /// Word shown next to the marker's cell.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "exit",
        }
    }
}

/// Floor marker drawn under a start or end cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FloorMarker {
    /// Cell carrying the marker.
    pub cell: CellCoord,
    /// Marker type.
    pub kind: MarkerKind,
}

/// Single closed wall edge to be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WallSegment {
    /// Cell owning the edge.
    pub cell: CellCoord,
    /// Side of the cell the edge lies on.
    pub side: WallSide,
}

impl WallSegment {
    /// Floor-plane endpoints of the edge as `(x, z)` pairs.
    #[must_use]
    pub fn endpoints(&self) -> (Vec2, Vec2) {
        let x = self.cell.column() as f32;
        let z = self.cell.row() as f32;
        match self.side {
            WallSide::Top => (Vec2::new(x, z), Vec2::new(x + 1.0, z)),
            WallSide::Bottom => (Vec2::new(x, z + 1.0), Vec2::new(x + 1.0, z + 1.0)),
            WallSide::Left => (Vec2::new(x, z), Vec2::new(x, z + 1.0)),
            WallSide::Right => (Vec2::new(x + 1.0, z), Vec2::new(x + 1.0, z + 1.0)),
        }
    }
}

/// First-person camera derived from the player's state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Eye position in world space.
    pub eye: Vec3,
    /// Heading in degrees.
    pub yaw: f32,
    /// Pitch in degrees.
    pub pitch: f32,
}

impl CameraPose {
    /// Builds the camera that looks out of the player's eyes.
    #[must_use]
    pub fn from_player(player: &PlayerSnapshot) -> Self {
        Self {
            eye: player.position,
            yaw: player.yaw,
            pitch: player.pitch,
        }
    }

    /// Unit view direction including pitch.
    #[must_use]
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    /// Right-handed view matrix with +Y up.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.eye + self.front(), Vec3::Y)
    }
}

/// Declarative description of everything a backend needs to draw a frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Number of maze columns.
    pub width: u32,
    /// Number of maze rows.
    pub height: u32,
    /// Closed wall edges, each drawn once.
    pub walls: Vec<WallSegment>,
    /// Start and end floor markers.
    pub markers: Vec<FloorMarker>,
    /// Camera, present once a player exists.
    pub camera: Option<CameraPose>,
    /// Cell the player stands in.
    pub player_cell: Option<CellCoord>,
    /// Text dump of the maze as produced by [`ascii::render`].
    pub dump: String,
    /// Notifications queued for display; backends drain this.
    pub messages: Vec<String>,
}

impl Scene {
    /// Builds a scene from the maze and optional player.
    #[must_use]
    pub fn from_view(view: &MazeView<'_>, player: Option<&PlayerSnapshot>) -> Self {
        let mut scene = Self::default();
        scene.refresh(view, player);
        scene
    }

    /// Rebuilds the maze-derived parts of the scene, keeping queued messages.
    pub fn refresh(&mut self, view: &MazeView<'_>, player: Option<&PlayerSnapshot>) {
        self.width = view.width();
        self.height = view.height();
        self.walls = wall_segments(view);
        self.markers = view
            .iter()
            .filter_map(|(cell, data)| {
                if data.is_start() {
                    Some(FloorMarker {
                        cell,
                        kind: MarkerKind::Start,
                    })
                } else if data.is_end() {
                    Some(FloorMarker {
                        cell,
                        kind: MarkerKind::End,
                    })
                } else {
                    None
                }
            })
            .collect();
        self.camera = player.map(CameraPose::from_player);
        self.player_cell = player.map(|snapshot| snapshot.cell);
        self.dump = ascii::render(view, self.player_cell);
    }

    /// Queues a notification for the backend.
    pub fn push_message<T>(&mut self, message: T)
    where
        T: Into<String>,
    {
        self.messages.push(message.into());
    }
}

fn wall_segments(view: &MazeView<'_>) -> Vec<WallSegment> {
    let last_column = view.width() as i32 - 1;
    let last_row = view.height() as i32 - 1;
    let mut walls = Vec::new();

    for (cell, data) in view.iter() {
        let mut sides = vec![WallSide::Top, WallSide::Left];
        if cell.column() == last_column {
            sides.push(WallSide::Right);
        }
        if cell.row() == last_row {
            sides.push(WallSide::Bottom);
        }
        walls.extend(
            sides
                .into_iter()
                .filter(|side| data.has_wall(*side))
                .map(|side| WallSegment { cell, side }),
        );
    }

    walls
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title shown by the backend.
    pub window_title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting Maze Escape scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta,
    /// per-frame input captured by the adapter, and may mutate the scene before
    /// it is presented.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}
