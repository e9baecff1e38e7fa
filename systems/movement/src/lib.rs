#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement system that turns per-frame input into player commands.

use std::time::Duration;

use maze_escape_core::{Command, MoveIntent};

/// Input snapshot distilled from adapter-provided frame input data.
///
/// A fresh context is built for every tick; nothing is retained between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputContext {
    /// Forward key is held.
    pub forward: bool,
    /// Backward key is held.
    pub backward: bool,
    /// Strafe-left key is held.
    pub left: bool,
    /// Strafe-right key is held.
    pub right: bool,
    /// Sprint modifier is held.
    pub sprint: bool,
    /// Horizontal look delta accumulated this frame.
    pub yaw_delta: f32,
    /// Vertical look delta accumulated this frame.
    pub pitch_delta: f32,
    /// Time step covered by this frame.
    pub dt: Duration,
}

impl InputContext {
    /// Creates an idle context covering the provided time step.
    #[must_use]
    pub fn idle(dt: Duration) -> Self {
        Self {
            dt,
            ..Self::default()
        }
    }

    fn intents(&self) -> impl Iterator<Item = MoveIntent> {
        [
            (self.forward, MoveIntent::Forward),
            (self.backward, MoveIntent::Backward),
            (self.left, MoveIntent::Left),
            (self.right, MoveIntent::Right),
        ]
        .into_iter()
        .filter_map(|(held, intent)| held.then_some(intent))
    }
}

/// Pure system that emits sprint, look, and movement commands.
#[derive(Debug, Default)]
pub struct Movement {
    sprinting: bool,
}

impl Movement {
    /// Translates one frame of input into commands for the world.
    ///
    /// Sprint changes are emitted first so the subsequent moves use the
    /// updated speed. Opposing keys are both forwarded and cancel out in the
    /// world.
    pub fn handle(&mut self, input: &InputContext, out: &mut Vec<Command>) {
        if input.sprint != self.sprinting {
            self.sprinting = input.sprint;
            out.push(Command::SetSprinting {
                sprinting: input.sprint,
            });
        }

        if input.yaw_delta != 0.0 || input.pitch_delta != 0.0 {
            out.push(Command::TurnPlayer {
                yaw_delta: input.yaw_delta,
                pitch_delta: input.pitch_delta,
            });
        }

        if input.dt.is_zero() {
            return;
        }

        out.extend(input.intents().map(|intent| Command::MovePlayer {
            intent,
            dt: input.dt,
        }));
    }

    /// Reports whether the last processed frame requested sprinting.
    #[must_use]
    pub fn sprinting(&self) -> bool {
        self.sprinting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_frame_emits_nothing() {
        let mut movement = Movement::default();
        let mut commands = Vec::new();

        movement.handle(&InputContext::idle(Duration::from_millis(16)), &mut commands);

        assert!(commands.is_empty());
    }

    #[test]
    fn zero_dt_suppresses_moves_but_not_look() {
        let mut movement = Movement::default();
        let mut commands = Vec::new();

        movement.handle(
            &InputContext {
                forward: true,
                yaw_delta: 4.0,
                ..InputContext::default()
            },
            &mut commands,
        );

        assert_eq!(
            commands,
            vec![Command::TurnPlayer {
                yaw_delta: 4.0,
                pitch_delta: 0.0,
            }]
        );
    }
}
