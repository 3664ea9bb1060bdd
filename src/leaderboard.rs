//! Best runs of the current session
//!
//! Fed from `GameEvent::GameOver`. Lives only as long as the process; runs
//! are never written anywhere.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_ENTRIES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEntry {
    /// Row reached
    pub score: u32,
    /// Seed the run was generated from
    pub seed: u64,
    /// Seconds survived
    pub duration_secs: f32,
}

/// Top runs, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<RunEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Record a finished run; returns its rank (1-indexed) if it made the board
    pub fn record(&mut self, score: u32, seed: u64, duration_secs: f32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = RunEntry {
            score,
            seed,
            duration_secs,
        };

        // Ties keep the earlier run ahead
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_ENTRIES);

        log::info!("Run with score {} ranked #{}", score, pos + 1);
        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&RunEntry> {
        self.entries.first()
    }
}
