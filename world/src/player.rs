//! Player position, orientation, and wall-aware movement.

use std::time::Duration;

use glam::Vec3;
use log::warn;
use maze_escape_core::{
    CellCoord, MazeView, MoveIntent, PlayerSnapshot, DEFAULT_PLAYER_RADIUS, DEFAULT_YAW_DEGREES,
    EYE_HEIGHT, LOOK_SENSITIVITY, PITCH_LIMIT_DEGREES, SPRINT_SPEED, WALK_SPEED,
};

use crate::collision;

/// Tunable player parameters supplied when the world is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerTuning {
    /// Radius of the collision circle.
    pub radius: f32,
    /// Fixed eye height above the floor.
    pub eye_height: f32,
    /// Speed used while walking, in cells per second.
    pub walk_speed: f32,
    /// Speed used while sprinting, in cells per second.
    pub sprint_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: DEFAULT_PLAYER_RADIUS,
            eye_height: EYE_HEIGHT,
            walk_speed: WALK_SPEED,
            sprint_speed: SPRINT_SPEED,
        }
    }
}

/// Continuous-space player with a derived discrete cell.
///
/// The cell is recomputed from the position on every change and is never
/// written independently.
#[derive(Clone, Debug)]
pub struct Player {
    tuning: PlayerTuning,
    position: Vec3,
    cell: CellCoord,
    yaw: f32,
    pitch: f32,
    sprinting: bool,
}

impl Player {
    /// Creates a player standing at the centre of the origin cell.
    #[must_use]
    pub fn new(tuning: PlayerTuning) -> Self {
        let position = CellCoord::new(0, 0).center(tuning.eye_height);
        Self {
            tuning,
            position,
            cell: CellCoord::containing(position.x, position.z),
            yaw: DEFAULT_YAW_DEGREES,
            pitch: 0.0,
            sprinting: false,
        }
    }

    /// Current world position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Cell containing the current position.
    #[must_use]
    pub fn current_cell(&self) -> CellCoord {
        self.cell
    }

    /// Parameters the player was created with.
    #[must_use]
    pub fn tuning(&self) -> PlayerTuning {
        self.tuning
    }

    /// Places the player at the provided position, pinned to the eye height.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = Vec3::new(position.x, self.tuning.eye_height, position.z);
        self.refresh_cell();
    }

    /// Speed currently applied to movement requests.
    #[must_use]
    pub fn speed(&self) -> f32 {
        if self.sprinting {
            self.tuning.sprint_speed
        } else {
            self.tuning.walk_speed
        }
    }

    /// Switches between walking and sprinting.
    pub fn set_sprinting(&mut self, sprinting: bool) {
        self.sprinting = sprinting;
    }

    /// Rotates the view by raw look deltas, keeping the pitch inside its limits.
    ///
    /// Non-finite deltas are ignored. The heading is kept within one turn.
    pub fn turn(&mut self, yaw_delta: f32, pitch_delta: f32) {
        if !yaw_delta.is_finite() || !pitch_delta.is_finite() {
            warn!("ignoring non-finite look input ({yaw_delta}, {pitch_delta})");
            return;
        }

        self.yaw = (self.yaw + yaw_delta * LOOK_SENSITIVITY) % 360.0;
        self.pitch = (self.pitch + pitch_delta * LOOK_SENSITIVITY)
            .clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
    }

    /// Heading in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Unit vector along the heading, flattened onto the movement plane.
    #[must_use]
    pub fn front(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        Vec3::new(yaw.cos(), 0.0, yaw.sin())
    }

    /// Unit vector to the player's right, in the movement plane.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::Y).normalize_or_zero()
    }

    /// Planar direction vector for a heading-relative intent.
    #[must_use]
    pub fn direction_for(&self, intent: MoveIntent) -> Vec3 {
        match intent {
            MoveIntent::Forward => self.front(),
            MoveIntent::Backward => -self.front(),
            MoveIntent::Left => -self.right(),
            MoveIntent::Right => self.right(),
        }
    }

    /// Moves along `direction` for `dt`, sliding along walls when blocked.
    ///
    /// Returns `true` when the position changed.
    pub fn process_movement(&mut self, direction: Vec3, dt: Duration, maze: &MazeView<'_>) -> bool {
        let mut displacement = direction * self.speed() * dt.as_secs_f32();
        displacement.y = 0.0;

        let resolved =
            collision::resolve_slide(maze, self.position, displacement, self.tuning.radius);
        if resolved == self.position {
            return false;
        }

        self.position = resolved;
        self.refresh_cell();
        true
    }

    /// Reports whether the position would overlap a wall.
    #[must_use]
    pub fn check_collision(&self, position: Vec3, maze: &MazeView<'_>) -> bool {
        collision::is_blocked(maze, position.x, position.z, self.tuning.radius)
    }

    /// Reports whether the player stands in the maze's end cell.
    #[must_use]
    pub fn is_at_exit(&self, maze: &MazeView<'_>) -> bool {
        maze.end_cell() == Some(self.cell)
    }

    /// Captures an immutable snapshot of the player.
    #[must_use]
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            cell: self.cell,
            yaw: self.yaw,
            pitch: self.pitch,
            radius: self.tuning.radius,
            sprinting: self.sprinting,
        }
    }

    fn refresh_cell(&mut self) {
        self.cell = CellCoord::containing(self.position.x, self.position.z);
    }
}
