//! Per-frame simulation tick
//!
//! The external render loop calls `tick` once per frame. Within a tick the
//! order is fixed: traffic scrolls, then the player's step advances (and may
//! commit, growing the map), then collisions are checked against the
//! committed row.

use super::collision::detect_collision;
use super::grid::MoveIntent;
use super::state::{GameEvent, GamePhase, GameState};
use crate::error::SimResult;

/// Input gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Intents in the order they were pressed
    pub moves: Vec<MoveIntent>,
    /// Start a new run before advancing
    pub restart: bool,
}

/// Advance the game by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> SimResult<Vec<GameEvent>> {
    let mut events = Vec::new();

    if input.restart {
        state.restart()?;
        events.push(GameEvent::Restarted { seed: state.seed });
    }

    // Nothing moves after a crash
    if state.phase == GamePhase::GameOver {
        return Ok(events);
    }

    for &intent in &input.moves {
        state.queue_move(intent);
    }
    state.time_secs += dt;

    state.motion.scroll_lanes(&state.map, &mut state.bodies, dt)?;

    let frame = state.motion.advance_player(
        state.player.position(),
        state.player.active_intent(),
        &mut state.pose,
        dt,
    );
    if let Some(frame) = frame {
        log::trace!("Step {:?} at {:.2}", frame.intent, frame.progress);
        if frame.complete {
            state.commit_step(&mut events)?;
        }
    }

    let hit = detect_collision(&state.map, &state.bodies, state.player.position(), &state.pose)?;
    if let Some(hit) = hit {
        let score = state.score();
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: vehicle {} in row {} hit the player (score {})",
            hit.vehicle,
            hit.row,
            score
        );
        events.push(GameEvent::GameOver { score });
    }

    Ok(events)
}
