//! Lane Hopper - an endless lane-crossing game engine
//!
//! Core modules:
//! - `sim`: Deterministic grid simulation (moves, lanes, motion, collisions)
//! - `settings`: Data-driven tuning for the simulation
//! - `leaderboard`: Best runs of the current session
//! - `error`: Fatal integrity violations
//!
//! Rendering, input wiring and the frame loop live outside this crate. They
//! talk to the engine through `GameState::queue_move`, `tick` and the
//! `Bodies` store.

pub mod error;
pub mod leaderboard;
pub mod settings;
pub mod sim;

pub use error::{SimError, SimResult};
pub use leaderboard::Leaderboard;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Leftmost tile a player or tree may occupy
    pub const MIN_TILE: i32 = -8;
    /// Rightmost tile a player or tree may occupy
    pub const MAX_TILE: i32 = 8;
    /// Number of tiles per row
    pub const TILES_PER_ROW: i32 = MAX_TILE - MIN_TILE + 1;
    /// Size of one tile in world units
    pub const TILE_SIZE: f32 = 48.0;

    /// Seconds a single hop takes
    pub const STEP_DURATION: f32 = 0.2;
    /// Peak height of the hop arc
    pub const HOP_HEIGHT: f32 = 8.0;

    /// Rows generated on (re)start
    pub const INITIAL_ROWS: usize = 20;
    /// Rows appended each time the horizon is approached
    pub const EXTEND_BATCH: usize = 20;
    /// Minimum number of generated rows kept ahead of the player
    pub const HORIZON_ROWS: usize = 10;

    /// Draws per obstacle before placement falls back to a slot scan
    pub const PLACEMENT_RETRIES: u32 = 64;

    /// Obstacle counts per row kind
    pub const TREES_PER_ROW: usize = 4;
    pub const CARS_PER_LANE: usize = 3;
    pub const TRUCKS_PER_LANE: usize = 2;

    /// Lateral safety margin (tiles either side of the spawn tile)
    pub const CAR_MARGIN: i32 = 1;
    pub const TRUCK_MARGIN: i32 = 2;

    /// Lane speeds in world units per second
    pub const LANE_SPEEDS: [f32; 3] = [125.0, 156.0, 188.0];
    /// Tree crown heights
    pub const TREE_HEIGHTS: [u32; 3] = [20, 45, 60];
    /// Vehicle body colors (0xRRGGBB)
    pub const VEHICLE_COLORS: [u32; 3] = [0xa52523, 0xbdb638, 0x78b14b];

    /// Footprint sizes on the ground plane (width along the row, depth across it)
    pub const PLAYER_SIZE: (f32, f32) = (15.0, 15.0);
    pub const CAR_SIZE: (f32, f32) = (60.0, 30.0);
    pub const TRUCK_SIZE: (f32, f32) = (100.0, 35.0);

    /// Tiles past the edge where scrolling traffic wraps around
    pub const WRAP_OVERHANG: i32 = 2;
}

/// World-space x coordinate of a tile center
#[inline]
pub fn tile_to_x(tile: i32, tile_size: f32) -> f32 {
    tile as f32 * tile_size
}

/// World-space y coordinate of a row center
#[inline]
pub fn row_to_y(row: i32, tile_size: f32) -> f32 {
    row as f32 * tile_size
}

/// World-space center of a grid cell
#[inline]
pub fn grid_to_world(row: i32, tile: i32, tile_size: f32) -> Vec2 {
    Vec2::new(tile_to_x(tile, tile_size), row_to_y(row, tile_size))
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
