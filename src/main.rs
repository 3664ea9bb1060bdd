//! Lane Hopper headless runner
//!
//! Drives the simulation at a fixed frame rate with a simple autopilot in
//! place of keyboard input, then prints the session leaderboard. Useful
//! for smoke-testing settings files and seeds without a renderer.
//!
//! Usage: `lane-hopper [settings.json] [seed]`

use std::process::ExitCode;

use lane_hopper::sim::{
    Bodies, GameEvent, GamePhase, GameState, Lane, MoveIntent, TickInput, bound_body, tick,
};
use lane_hopper::{Leaderboard, Settings, SimError, SimResult};

/// Simulated frame length (60 fps)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Runs per session
const RUNS: u32 = 5;
/// Give up on a run after two simulated minutes
const MAX_TICKS_PER_RUN: u32 = 60 * 120;
/// Seconds of look-ahead when judging whether a lane is safe to enter
const LOOKAHEAD_SECS: f32 = 0.45;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Lane Hopper (headless) starting...");

    match run_session() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Simulation aborted: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_session() -> SimResult<()> {
    let mut args = std::env::args().skip(1);
    let mut settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(seed) = args.next() {
        settings.seed = seed.parse().map_err(|_| SimError::InvalidSetting {
            name: "seed",
            reason: format!("`{seed}` is not an unsigned integer"),
        })?;
    }

    let mut state = GameState::new(settings)?;
    let mut board = Leaderboard::new();

    for run in 0..RUNS {
        let mut input = TickInput {
            restart: run > 0,
            ..Default::default()
        };
        let mut finished = false;

        for _ in 0..MAX_TICKS_PER_RUN {
            if state.phase() == GamePhase::Playing && state.player().pending().is_empty() {
                if let Some(intent) = autopilot(&state)? {
                    input.moves.push(intent);
                }
            }

            for event in tick(&mut state, &input, FRAME_DT)? {
                match event {
                    GameEvent::Score(score) => log::debug!("Score {}", score),
                    GameEvent::MapExtended { rows } => {
                        log::debug!("Rows {}..{} realized", rows.start, rows.end)
                    }
                    GameEvent::Restarted { seed } => log::info!("Run {} seed {}", run + 1, seed),
                    GameEvent::GameOver { score } => {
                        board.record(score, state.seed(), state.time_secs());
                        finished = true;
                    }
                }
            }
            input = TickInput::default();

            if finished {
                break;
            }
        }

        if !finished {
            log::info!("Run {} survived the time limit at row {}", run + 1, state.score());
            board.record(state.score(), state.seed(), state.time_secs());
        }
    }

    for (rank, entry) in board.entries.iter().enumerate() {
        log::info!(
            "#{} row {} (seed {}, {:.1}s)",
            rank + 1,
            entry.score,
            entry.seed,
            entry.duration_secs
        );
    }
    Ok(())
}

/// Pick the next hop, or wait
///
/// Hops forward when the next row will be clear for the length of a step,
/// sidesteps around trees, and otherwise stands still.
fn autopilot(state: &GameState) -> SimResult<Option<MoveIntent>> {
    let position = state.position();

    // Standing in a lane with traffic coming is worse than gambling forward
    if !row_is_clear(state, position.row + 1, position.tile)?
        && row_is_clear(state, position.row, position.tile)?
    {
        return Ok(None);
    }

    let sidestep = if state.time_secs() as u32 % 2 == 0 {
        [MoveIntent::Left, MoveIntent::Right]
    } else {
        [MoveIntent::Right, MoveIntent::Left]
    };
    let mut trial = state.player().clone();
    Ok(std::iter::once(MoveIntent::Forward)
        .chain(sidestep)
        .find(|&intent| trial.queue_move(state.map(), intent)))
}

/// True if `row` is not a lane, or its traffic stays clear of `tile`
fn row_is_clear(state: &GameState, row: i32, tile: i32) -> SimResult<bool> {
    let Some(lane) = state.map().row(row).and_then(|r| r.as_lane()) else {
        return Ok(true);
    };
    let tile_size = state.settings().tile_size;
    let x = lane_hopper::tile_to_x(tile, tile_size);
    lane_is_clear(lane, row as usize, state.bodies(), x, tile_size)
}

/// True if no vehicle in `lane` will pass `x` within the look-ahead window
///
/// An unbound vehicle or a dangling handle is an integrity error, not a
/// clear lane.
fn lane_is_clear(
    lane: &Lane,
    row_index: usize,
    bodies: &Bodies,
    x: f32,
    tile_size: f32,
) -> SimResult<bool> {
    let reach = lane.kind.body_size().0 / 2.0 + tile_size;
    let travel = lane.direction.sign() * lane.speed * LOOKAHEAD_SECS;

    for (index, vehicle) in lane.vehicles.iter().enumerate() {
        let handle = bound_body(row_index, index, vehicle.body)?;
        let body = bodies.get(handle)?;
        let (from, to) = (body.pos.x, body.pos.x + travel);
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        if x >= lo - reach && x <= hi + reach {
            return Ok(false);
        }
    }
    Ok(true)
}
