//! Simulation settings
//!
//! Defaults reproduce the shipped game. A JSON file can override any subset
//! of fields; missing fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SimError, SimResult};
use crate::sim::row::RowKind;

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed for the lane generator
    pub seed: u64,

    // === Grid ===
    /// Leftmost legal tile
    pub min_tile: i32,
    /// Rightmost legal tile
    pub max_tile: i32,
    /// World units per tile
    pub tile_size: f32,

    // === Motion ===
    /// Seconds per hop
    pub step_duration: f32,
    /// Peak hop height
    pub hop_height: f32,

    // === Map ===
    /// Rows generated on (re)start
    pub initial_rows: usize,
    /// Rows appended per extension
    pub extend_batch: usize,
    /// Rows that must stay generated ahead of the player
    pub horizon_rows: usize,
    /// Random draws per obstacle before falling back to a slot scan
    pub placement_retries: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,

            min_tile: MIN_TILE,
            max_tile: MAX_TILE,
            tile_size: TILE_SIZE,

            step_duration: STEP_DURATION,
            hop_height: HOP_HEIGHT,

            initial_rows: INITIAL_ROWS,
            extend_batch: EXTEND_BATCH,
            horizon_rows: HORIZON_ROWS,
            placement_retries: PLACEMENT_RETRIES,
        }
    }
}

impl Settings {
    /// Default settings with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse settings from a JSON document
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Number of legal tiles in a row
    pub fn tiles_per_row(&self) -> i32 {
        self.max_tile - self.min_tile + 1
    }

    /// Check that every row kind can be generated, the player can leave the
    /// start tile, and the timing is sane
    pub fn validate(&self) -> SimResult<()> {
        // Written so NaN fails too
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(invalid("tile_size", "must be a finite positive number"));
        }
        if !(self.step_duration.is_finite() && self.step_duration > 0.0) {
            return Err(invalid("step_duration", "must be a finite positive number"));
        }
        if !(self.hop_height.is_finite() && self.hop_height >= 0.0) {
            return Err(invalid("hop_height", "must be a finite non-negative number"));
        }
        if !(self.min_tile..=self.max_tile).contains(&0) {
            return Err(invalid(
                "min_tile",
                format!(
                    "tile range {}..={} must contain the start tile 0",
                    self.min_tile, self.max_tile
                ),
            ));
        }
        if self.extend_batch == 0 {
            return Err(invalid("extend_batch", "must be at least 1"));
        }
        if self.horizon_rows < HORIZON_ROWS {
            return Err(invalid(
                "horizon_rows",
                format!("must be at least {HORIZON_ROWS}"),
            ));
        }
        if self.initial_rows < self.horizon_rows {
            return Err(invalid(
                "initial_rows",
                format!("must be at least horizon_rows ({})", self.horizon_rows),
            ));
        }

        for kind in RowKind::ALL {
            if self.tiles_per_row() < kind.min_tiles() {
                return Err(SimError::InsufficientTileRange {
                    row_kind: kind,
                    min_tile: self.min_tile,
                    max_tile: self.max_tile,
                });
            }
        }

        Ok(())
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> SimError {
    SimError::InvalidSetting {
        name,
        reason: reason.into(),
    }
}
