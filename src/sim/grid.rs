//! Grid positions and move algebra
//!
//! Pure geometry: folding intents over a position never checks bounds.

use serde::{Deserialize, Serialize};

/// A cell on the discrete grid
///
/// `row` counts from the start strip (0) forward; `tile` is centered on 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: i32,
    pub tile: i32,
}

impl GridPosition {
    pub const ORIGIN: Self = Self { row: 0, tile: 0 };

    pub fn new(row: i32, tile: i32) -> Self {
        Self { row, tile }
    }

    /// Position after a single intent
    #[inline]
    pub fn step(self, intent: MoveIntent) -> Self {
        let (d_row, d_tile) = intent.delta();
        Self {
            row: self.row + d_row,
            tile: self.tile + d_tile,
        }
    }
}

/// A buffered player input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveIntent {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveIntent {
    pub const ALL: [MoveIntent; 4] = [
        MoveIntent::Forward,
        MoveIntent::Backward,
        MoveIntent::Left,
        MoveIntent::Right,
    ];

    /// (row, tile) offset of one step
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            MoveIntent::Forward => (1, 0),
            MoveIntent::Backward => (-1, 0),
            MoveIntent::Left => (0, -1),
            MoveIntent::Right => (0, 1),
        }
    }

    /// Heading the player faces while performing this step (radians)
    pub fn heading(self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            MoveIntent::Forward => 0.0,
            MoveIntent::Left => FRAC_PI_2,
            MoveIntent::Right => -FRAC_PI_2,
            MoveIntent::Backward => PI,
        }
    }
}

/// Fold a sequence of intents over a starting position
pub fn apply_moves<'a, I>(start: GridPosition, moves: I) -> GridPosition
where
    I: IntoIterator<Item = &'a MoveIntent>,
{
    moves
        .into_iter()
        .fold(start, |position, &intent| position.step(intent))
}
