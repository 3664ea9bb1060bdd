//! Continuous motion driven by the discrete simulation
//!
//! Two behaviors run every tick:
//! - the hop animation of the step at the head of the player's queue,
//!   which reports completion exactly once when progress reaches 1
//! - scrolling of every lane's vehicles, wrapping past the row edges

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bodies::{Aabb, Bodies, bound_body};
use super::grid::{GridPosition, MoveIntent};
use super::map::MapState;
use crate::consts::*;
use crate::error::SimResult;
use crate::settings::Settings;
use crate::{grid_to_world, lerp, tile_to_x};

/// Time since the animating step began
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StepTimer {
    elapsed: f32,
    running: bool,
}

impl StepTimer {
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn advance(&mut self, dt: f32) {
        if self.running {
            self.elapsed += dt;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Visible player transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPose {
    /// Ground-plane position in world units
    pub pos: Vec2,
    /// Height above the ground
    pub hop: f32,
    /// Facing angle (radians, 0 = forward)
    pub heading: f32,
}

impl Default for PlayerPose {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            hop: 0.0,
            heading: 0.0,
        }
    }
}

impl PlayerPose {
    /// Player standing still on a cell
    pub fn at(position: GridPosition, tile_size: f32) -> Self {
        Self {
            pos: grid_to_world(position.row, position.tile, tile_size),
            ..Self::default()
        }
    }

    /// Ground-plane bounds used for collision
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::new(PLAYER_SIZE.0, PLAYER_SIZE.1))
    }
}

/// One tick of step animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepFrame {
    pub intent: MoveIntent,
    /// Fraction of the step done, clamped to [0, 1]
    pub progress: f32,
    /// Set on the single tick where progress first reaches 1
    pub complete: bool,
}

/// Drives the step animation and lane scrolling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionSynchronizer {
    timer: StepTimer,
    step_duration: f32,
    hop_height: f32,
    tile_size: f32,
    wrap_start: f32,
    wrap_end: f32,
}

impl MotionSynchronizer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            timer: StepTimer::default(),
            step_duration: settings.step_duration,
            hop_height: settings.hop_height,
            tile_size: settings.tile_size,
            wrap_start: tile_to_x(settings.min_tile - WRAP_OVERHANG, settings.tile_size),
            wrap_end: tile_to_x(settings.max_tile + WRAP_OVERHANG, settings.tile_size),
        }
    }

    /// Drop any in-flight step
    pub fn reset(&mut self) {
        self.timer = StepTimer::default();
    }

    pub fn timer(&self) -> &StepTimer {
        &self.timer
    }

    /// Horizontal span traffic scrolls through before wrapping
    pub fn wrap_bounds(&self) -> (f32, f32) {
        (self.wrap_start, self.wrap_end)
    }

    /// Animate the step at the head of the queue
    ///
    /// A step starts on the first tick that sees it queued (progress 0) and
    /// accumulates `dt` on later ticks. When progress reaches 1 the timer
    /// stops and the frame is marked complete; the caller must then commit
    /// the step. Returns `None` when nothing is queued.
    pub fn advance_player(
        &mut self,
        position: GridPosition,
        intent: Option<MoveIntent>,
        pose: &mut PlayerPose,
        dt: f32,
    ) -> Option<StepFrame> {
        let intent = intent?;

        if self.timer.is_running() {
            self.timer.advance(dt);
        } else {
            self.timer.start();
        }
        let progress = (self.timer.elapsed() / self.step_duration).min(1.0);

        let start = grid_to_world(position.row, position.tile, self.tile_size);
        let target = position.step(intent);
        let end = grid_to_world(target.row, target.tile, self.tile_size);
        pose.pos = start.lerp(end, progress);
        pose.heading = lerp(pose.heading, intent.heading(), progress);

        let complete = progress >= 1.0;
        if complete {
            pose.hop = 0.0;
            self.timer.stop();
        } else {
            pose.hop = (progress * PI).sin() * self.hop_height;
        }

        Some(StepFrame {
            intent,
            progress,
            complete,
        })
    }

    /// Move every lane's vehicles by `speed * dt`, wrapping at the edges
    pub fn scroll_lanes(&self, map: &MapState, bodies: &mut Bodies, dt: f32) -> SimResult<()> {
        for (index, row) in map.rows().iter().enumerate() {
            let Some(lane) = row.as_lane() else {
                continue;
            };
            let delta = lane.direction.sign() * lane.speed * dt;
            for (vehicle_index, vehicle) in lane.vehicles.iter().enumerate() {
                let handle = bound_body(index + 1, vehicle_index, vehicle.body)?;
                let body = bodies.get_mut(handle)?;
                body.pos.x = self.wrap(body.pos.x + delta);
            }
        }
        Ok(())
    }

    /// Fold an x coordinate back into `[wrap_start, wrap_end)`
    fn wrap(&self, x: f32) -> f32 {
        let span = self.wrap_end - self.wrap_start;
        if (self.wrap_start..self.wrap_end).contains(&x) {
            x
        } else {
            self.wrap_start + (x - self.wrap_start).rem_euclid(span)
        }
    }
}
