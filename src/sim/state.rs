//! Game state and core simulation types
//!
//! One `GameState` is one session. Restart replaces the map, the player and
//! the bodies together, so no tick ever observes a half-reset world.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::bodies::{Bodies, realize_row};
use super::grid::{GridPosition, MoveIntent};
use super::map::MapState;
use super::motion::{MotionSynchronizer, PlayerPose};
use super::player::PlayerState;
use crate::error::SimResult;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Accepting input and advancing
    Playing,
    /// Hit by a vehicle; inert until restart
    GameOver,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A step was committed; carries the current row as score
    Score(u32),
    /// Rows were appended and realized (0-based map indices)
    MapExtended { rows: Range<usize> },
    /// A vehicle hit the player
    GameOver { score: u32 },
    /// A fresh run began with this seed
    Restarted { seed: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) settings: Settings,
    /// Seed of the current run
    pub(crate) seed: u64,
    /// Restarts since the session began
    pub(crate) restarts: u32,
    pub(crate) phase: GamePhase,
    /// Seconds simulated in the current run
    pub(crate) time_secs: f32,
    pub(crate) map: MapState,
    pub(crate) player: PlayerState,
    pub(crate) motion: MotionSynchronizer,
    pub(crate) pose: PlayerPose,
    pub(crate) bodies: Bodies,
}

impl GameState {
    /// Start a session with a freshly generated map
    pub fn new(settings: Settings) -> SimResult<Self> {
        settings.validate()?;
        let map = MapState::new(&settings)?;
        Self::from_map(settings, map)
    }

    /// Start a session on a prepared map (scripted scenarios)
    pub fn from_map(settings: Settings, map: MapState) -> SimResult<Self> {
        settings.validate()?;
        let mut state = Self {
            seed: settings.seed,
            restarts: 0,
            phase: GamePhase::Playing,
            time_secs: 0.0,
            player: PlayerState::new(),
            motion: MotionSynchronizer::new(&settings),
            pose: PlayerPose::at(GridPosition::ORIGIN, settings.tile_size),
            bodies: Bodies::new(),
            map,
            settings,
        };
        state.realize_rows(0..state.map.len());
        log::info!("Game started with seed {}", state.seed);
        Ok(state)
    }

    /// Begin a new run on the next seed of this session
    pub fn restart(&mut self) -> SimResult<()> {
        let seed = self
            .settings
            .seed
            .wrapping_add(u64::from(self.restarts) + 1);
        self.restart_with_seed(seed)
    }

    /// Begin a new run with an explicit seed
    pub fn restart_with_seed(&mut self, seed: u64) -> SimResult<()> {
        // The only fallible part goes first so a failure leaves the old run intact
        self.map.initialize(&self.settings, seed)?;
        self.bodies.clear();
        self.realize_rows(0..self.map.len());
        self.player.initialize();
        self.motion.reset();
        self.pose = PlayerPose::at(GridPosition::ORIGIN, self.settings.tile_size);
        self.phase = GamePhase::Playing;
        self.time_secs = 0.0;
        self.seed = seed;
        self.restarts += 1;
        log::info!("Game restarted with seed {}", seed);
        Ok(())
    }

    /// Input entry point; returns whether the intent was buffered
    pub fn queue_move(&mut self, intent: MoveIntent) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        self.player.queue_move(&self.map, intent)
    }

    /// Commit the animated step, realizing any rows the map grew by
    pub(crate) fn commit_step(&mut self, events: &mut Vec<GameEvent>) -> SimResult<()> {
        let Some(step) = self.player.complete_step(&mut self.map)? else {
            return Ok(());
        };
        if let Some(rows) = step.extended {
            self.realize_rows(rows.clone());
            events.push(GameEvent::MapExtended { rows });
        }
        events.push(GameEvent::Score(self.score()));
        Ok(())
    }

    fn realize_rows(&mut self, rows: Range<usize>) {
        let tile_size = self.settings.tile_size;
        for index in rows {
            if let Some(row) = self.map.rows_mut().get_mut(index) {
                realize_row(index as i32 + 1, row, &mut self.bodies, tile_size);
            }
        }
    }

    /// Current score: the committed row
    pub fn score(&self) -> u32 {
        u32::try_from(self.player.position().row).unwrap_or(0)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn time_secs(&self) -> f32 {
        self.time_secs
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn position(&self) -> GridPosition {
        self.player.position()
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn pose(&self) -> &PlayerPose {
        &self.pose
    }

    pub fn map(&self) -> &MapState {
        &self.map
    }

    pub fn bodies(&self) -> &Bodies {
        &self.bodies
    }

    pub fn motion(&self) -> &MotionSynchronizer {
        &self.motion
    }
}
