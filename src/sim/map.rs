//! Append-only map of generated rows
//!
//! Row `n` of the world (1-based) lives at `rows[n - 1]`; row 0 is the
//! start strip and is never stored. Rows are only ever appended, in
//! batches, so indices handed out earlier stay valid for the whole run.

use std::ops::Range;

use super::lanegen::LaneGenerator;
use super::row::Row;
use crate::error::SimResult;
use crate::settings::Settings;

/// Generated rows plus the generator that extends them
#[derive(Debug, Clone)]
pub struct MapState {
    rows: Vec<Row>,
    generator: LaneGenerator,
    min_tile: i32,
    max_tile: i32,
    initial_rows: usize,
    extend_batch: usize,
    horizon_rows: usize,
}

impl MapState {
    /// Create a map and generate its initial batch
    pub fn new(settings: &Settings) -> SimResult<Self> {
        let mut map = Self {
            rows: Vec::new(),
            generator: LaneGenerator::new(settings),
            min_tile: settings.min_tile,
            max_tile: settings.max_tile,
            initial_rows: settings.initial_rows,
            extend_batch: settings.extend_batch,
            horizon_rows: settings.horizon_rows,
        };
        map.append(settings.initial_rows)?;
        log::info!("Map initialized with {} rows", map.len());
        Ok(map)
    }

    /// Map with hand-authored rows (scenarios and tests)
    pub fn from_rows(settings: &Settings, rows: Vec<Row>) -> Self {
        Self {
            rows,
            generator: LaneGenerator::new(settings),
            min_tile: settings.min_tile,
            max_tile: settings.max_tile,
            initial_rows: settings.initial_rows,
            extend_batch: settings.extend_batch,
            horizon_rows: settings.horizon_rows,
        }
    }

    /// Drop every row, reseed, and generate a fresh initial batch
    ///
    /// On failure the map keeps its previous rows.
    pub fn initialize(&mut self, settings: &Settings, seed: u64) -> SimResult<()> {
        let mut generator = LaneGenerator::with_seed(settings, seed);
        let rows = generator.generate_rows(self.initial_rows)?;
        self.rows = rows;
        self.generator = generator;
        log::info!("Map reset with seed {} ({} rows)", seed, self.len());
        Ok(())
    }

    /// Append one batch; returns the 0-based indices of the new rows
    pub fn extend(&mut self) -> SimResult<Range<usize>> {
        let added = self.append(self.extend_batch)?;
        log::info!(
            "Map extended by {} rows (now {})",
            added.len(),
            self.len()
        );
        Ok(added)
    }

    fn append(&mut self, amount: usize) -> SimResult<Range<usize>> {
        let start = self.rows.len();
        // Generate first so a failed batch leaves the map untouched
        let mut batch = self.generator.generate_rows(amount)?;
        self.rows.append(&mut batch);
        Ok(start..self.rows.len())
    }

    /// True once `row` is within the horizon of the generated edge
    pub fn needs_extension(&self, row: i32) -> bool {
        i64::from(row) > self.rows.len() as i64 - self.horizon_rows as i64
    }

    /// Row at a 1-based world row index
    pub fn row(&self, row_index: i32) -> Option<&Row> {
        let index = usize::try_from(row_index).ok()?.checked_sub(1)?;
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Legal tile range (inclusive)
    pub fn tile_range(&self) -> (i32, i32) {
        (self.min_tile, self.max_tile)
    }

    pub fn horizon_rows(&self) -> usize {
        self.horizon_rows
    }
}
