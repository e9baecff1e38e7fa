#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure progression system that tracks whether the player has escaped.

use glam::Vec3;
use log::{debug, info};
use maze_escape_core::{CellCoord, Command, Event, GameState, PlayerSnapshot};

/// Message announced once when the player reaches the exit.
pub const VICTORY_MESSAGE: &str = "Congratulations! You've reached the exit!";

/// Records the transition into [`GameState::Won`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Victory {
    /// Exit cell the player was standing in.
    pub cell: CellCoord,
}

impl Victory {
    /// Text shown to the player for this victory.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        VICTORY_MESSAGE
    }
}

/// Two-state machine driven by the player's cell once per tick.
#[derive(Debug, Default)]
pub struct Progression {
    state: GameState,
}

impl Progression {
    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Evaluates the win condition for the provided player cell.
    ///
    /// Returns the victory only on the tick the transition happens; `Won`
    /// is absorbing until [`Progression::reset`] is called.
    pub fn update(&mut self, player_cell: CellCoord, exit: Option<CellCoord>) -> Option<Victory> {
        if self.state != GameState::Playing || exit != Some(player_cell) {
            return None;
        }

        self.state = GameState::Won;
        info!("{VICTORY_MESSAGE} (exit {player_cell})");
        Some(Victory { cell: player_cell })
    }

    /// Consumes world events and evaluates the win condition once per tick.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: &PlayerSnapshot,
        exit: Option<CellCoord>,
    ) -> Option<Victory> {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return None;
        }

        self.update(player.cell, exit)
    }

    /// Returns to [`GameState::Playing`] and requests the player be placed at the start.
    ///
    /// Falls back to the centre of the origin cell when no start is marked.
    pub fn reset(&mut self, start: Option<CellCoord>, eye_height: f32, out: &mut Vec<Command>) {
        self.state = GameState::Playing;
        let position = start.map_or(Vec3::new(0.5, eye_height, 0.5), |cell| {
            cell.center(eye_height)
        });
        debug!("game reset; player returns to {position}");
        out.push(Command::PlacePlayer { position });
    }
}
