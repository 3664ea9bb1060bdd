//! Fatal integrity violations
//!
//! Rejected moves are not errors and never show up here. Everything in
//! `SimError` means an invariant broke and the session cannot continue.

use thiserror::Error;

use crate::sim::row::RowKind;

/// Errors that abort the simulation
#[derive(Debug, Error)]
pub enum SimError {
    /// A lane obstacle was never realized into a body
    #[error("vehicle {vehicle} in row {row} has no bound body")]
    MissingBody { row: usize, vehicle: usize },

    /// A body handle points past the end of the body store
    #[error("body handle {0} is not in the body store")]
    UnknownBody(u32),

    /// The row could not fit all of its obstacles without overlapping footprints
    #[error("placed {placed} of {wanted} obstacles in a {row_kind:?} row")]
    PlacementExhausted {
        row_kind: RowKind,
        placed: usize,
        wanted: usize,
    },

    /// The configured tile range cannot hold the configured obstacle counts
    #[error("tile range [{min_tile}, {max_tile}] too narrow for {row_kind:?} rows")]
    InsufficientTileRange {
        row_kind: RowKind,
        min_tile: i32,
        max_tile: i32,
    },

    /// A setting is out of its legal range
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for fallible simulation steps
pub type SimResult<T> = Result<T, SimError>;
