//! Deterministic grid simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Rows, vehicles and bodies iterate in generation order
//! - No rendering or platform dependencies

pub mod bodies;
pub mod collision;
pub mod grid;
pub mod lanegen;
pub mod map;
pub mod motion;
pub mod player;
pub mod row;
pub mod state;
pub mod tick;
pub mod validate;

pub use bodies::{Aabb, Bodies, Body, BodyHandle, bound_body, realize_row};
pub use collision::{VehicleHit, detect_collision};
pub use grid::{GridPosition, MoveIntent, apply_moves};
pub use lanegen::LaneGenerator;
pub use map::MapState;
pub use motion::{MotionSynchronizer, PlayerPose, StepFrame, StepTimer};
pub use player::{CommittedStep, PlayerPhase, PlayerState};
pub use row::{Direction, Lane, LaneKind, Row, RowKind, Tree, Vehicle};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use validate::is_valid;
