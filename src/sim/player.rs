//! Player state machine
//!
//! The committed grid position changes in exactly one place,
//! `complete_step`, and only after the motion layer has finished animating
//! the step at the head of the queue.

use std::collections::VecDeque;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::grid::{GridPosition, MoveIntent};
use super::map::MapState;
use super::validate::is_valid;
use crate::error::SimResult;

/// Whether a step is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPhase {
    /// Nothing queued
    Idle,
    /// The head of the queue is being animated
    Stepping,
}

/// Result of committing one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedStep {
    pub intent: MoveIntent,
    pub position: GridPosition,
    /// 0-based indices of rows appended because the horizon came close
    pub extended: Option<Range<usize>>,
}

/// Committed position plus buffered input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerState {
    position: GridPosition,
    pending: VecDeque<MoveIntent>,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the start strip with an empty queue
    pub fn initialize(&mut self) {
        self.position = GridPosition::ORIGIN;
        self.pending.clear();
    }

    pub fn position(&self) -> GridPosition {
        self.position
    }

    pub fn pending(&self) -> &VecDeque<MoveIntent> {
        &self.pending
    }

    /// Step currently being animated, if any
    pub fn active_intent(&self) -> Option<MoveIntent> {
        self.pending.front().copied()
    }

    pub fn phase(&self) -> PlayerPhase {
        if self.pending.is_empty() {
            PlayerPhase::Idle
        } else {
            PlayerPhase::Stepping
        }
    }

    /// Buffer an intent if the whole queue plus it stays legal
    ///
    /// Illegal intents are dropped; returns whether it was accepted.
    pub fn queue_move(&mut self, map: &MapState, intent: MoveIntent) -> bool {
        let candidate = self.pending.iter().chain(std::iter::once(&intent));
        if !is_valid(map, self.position, candidate) {
            log::debug!(
                "Rejected {:?} from {:?} with {} queued",
                intent,
                self.position,
                self.pending.len()
            );
            return false;
        }
        self.pending.push_back(intent);
        true
    }

    /// Commit the head of the queue and grow the map if the horizon is close
    pub fn complete_step(&mut self, map: &mut MapState) -> SimResult<Option<CommittedStep>> {
        let Some(intent) = self.pending.pop_front() else {
            return Ok(None);
        };
        self.position = self.position.step(intent);
        log::debug!("Step {:?} committed at {:?}", intent, self.position);

        let extended = if map.needs_extension(self.position.row) {
            Some(map.extend()?)
        } else {
            None
        };

        Ok(Some(CommittedStep {
            intent,
            position: self.position,
            extended,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::row::{Row, Tree};

    fn forest_with_tree_on_row_three() -> MapState {
        let rows = (1..=30)
            .map(|row| Row::Forest {
                trees: if row == 3 {
                    vec![Tree {
                        tile: 0,
                        height: 20,
                    }]
                } else {
                    Vec::new()
                },
            })
            .collect();
        MapState::from_rows(&Settings::default(), rows)
    }

    #[test]
    fn test_queue_rejects_third_forward() {
        let map = forest_with_tree_on_row_three();
        let mut player = PlayerState::new();
        assert!(player.queue_move(&map, MoveIntent::Forward));
        assert!(player.queue_move(&map, MoveIntent::Forward));
        assert!(!player.queue_move(&map, MoveIntent::Forward));
        assert_eq!(player.pending().len(), 2);
        // Position is untouched until a step completes
        assert_eq!(player.position(), GridPosition::ORIGIN);
        assert_eq!(player.phase(), PlayerPhase::Stepping);
    }

    #[test]
    fn test_sidestep_then_forward_passes_tree() {
        let map = forest_with_tree_on_row_three();
        let mut player = PlayerState::new();
        for intent in [
            MoveIntent::Forward,
            MoveIntent::Forward,
            MoveIntent::Right,
            MoveIntent::Forward,
        ] {
            assert!(player.queue_move(&map, intent));
        }
    }

    #[test]
    fn test_complete_step_pops_and_moves() {
        let mut map = forest_with_tree_on_row_three();
        let mut player = PlayerState::new();
        player.queue_move(&map, MoveIntent::Forward);
        player.queue_move(&map, MoveIntent::Right);

        let step = player.complete_step(&mut map).expect("ok").expect("step");
        assert_eq!(step.intent, MoveIntent::Forward);
        assert_eq!(step.position, GridPosition::new(1, 0));
        assert!(step.extended.is_none());
        assert_eq!(player.active_intent(), Some(MoveIntent::Right));

        player.complete_step(&mut map).expect("ok");
        assert_eq!(player.position(), GridPosition::new(1, 1));
        assert_eq!(player.phase(), PlayerPhase::Idle);
        assert!(player.complete_step(&mut map).expect("ok").is_none());
    }

    #[test]
    fn test_extends_when_horizon_is_close() {
        let settings = Settings::with_seed(11);
        let open_rows = (0..INITIAL_ROWS).map(|_| Row::Forest { trees: Vec::new() }).collect();
        let mut map = MapState::from_rows(&settings, open_rows);
        let mut player = PlayerState::new();
        let threshold = (INITIAL_ROWS - HORIZON_ROWS) as i32;

        for row in 1..=threshold + 1 {
            assert!(player.queue_move(&map, MoveIntent::Forward));
            let step = player.complete_step(&mut map).expect("ok").expect("step");
            assert_eq!(step.position.row, row);
            if row > threshold {
                assert_eq!(step.extended, Some(INITIAL_ROWS..INITIAL_ROWS + EXTEND_BATCH));
            } else {
                assert!(step.extended.is_none());
            }
        }
        assert_eq!(map.len(), INITIAL_ROWS + EXTEND_BATCH);
    }
}
