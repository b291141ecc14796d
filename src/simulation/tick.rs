//! Tick system - orchestrates one simulation step
//!
//! propagation -> overload -> perturbation
//!
//! Each tick runs every pass to completion before returning. Nothing here
//! can fail; passes that find nothing to do simply report nothing.

use serde::{Deserialize, Serialize};

use crate::core::types::{GridPos, Tick};
use crate::simulation::overload::{run_overload_pass, OverloadResult};
use crate::simulation::perturbation::relocate_random_generator;
use crate::simulation::propagation::propagate;
use crate::simulation::session::Session;

/// Events generated during a simulation tick
///
/// Returned in the `TickReport` for display in the host's log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationEvent {
    /// A tile carried more than its capacity and lost health
    TileOverloaded { pos: GridPos, health: u8 },
    /// A tile's health reached zero and its cell was cleared
    TileDestroyed { pos: GridPos },
    GeneratorRelocated { from: GridPos, to: GridPos },
    /// The session reached its tick limit
    SessionOver { tick: Tick },
}

/// Summary of a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: Tick,
    /// Total sink absorption this tick
    pub consumed: u64,
    pub rounds: u32,
    pub hit_round_cap: bool,
    pub events: Vec<SimulationEvent>,
}

/// Run a single simulation tick
///
/// A finished session is left untouched and yields an empty report for
/// its final tick. The tick that reaches `max_ticks` ends the session
/// instead of simulating.
pub fn run_simulation_tick(session: &mut Session) -> TickReport {
    if session.game_over {
        return TickReport {
            tick: session.tick,
            ..TickReport::default()
        };
    }

    session.tick += 1;
    let tick = session.tick;
    let mut report = TickReport {
        tick,
        ..TickReport::default()
    };

    let max_ticks = session.config.max_ticks;
    if max_ticks > 0 && tick >= max_ticks {
        session.game_over = true;
        session.last_consumed = 0;
        report.events.push(SimulationEvent::SessionOver { tick });
        tracing::info!("Session over at tick {} with score {}", tick, session.score);
        return report;
    }

    // 1. Propagation
    let outcome = propagate(&mut session.grid, session.config.max_propagation_rounds);
    report.consumed = outcome.consumed;
    report.rounds = outcome.rounds;
    report.hit_round_cap = outcome.hit_round_cap;

    // 2. Overload
    for change in run_overload_pass(&mut session.grid, session.config.overload_damage) {
        let event = match change.result {
            OverloadResult::Damaged { health } => SimulationEvent::TileOverloaded {
                pos: change.pos,
                health,
            },
            OverloadResult::BurnedOut => SimulationEvent::TileDestroyed { pos: change.pos },
            OverloadResult::Stable => continue,
        };
        report.events.push(event);
    }

    // 3. Perturbation
    let interval = session.config.relocation_interval;
    if interval > 0 && tick % interval == 0 {
        if let Some((from, to)) = relocate_random_generator(
            &mut session.grid,
            &mut session.rng,
            session.config.relocation_attempts,
        ) {
            report
                .events
                .push(SimulationEvent::GeneratorRelocated { from, to });
        }
    }

    session.last_consumed = report.consumed;
    session.score += report.consumed;

    tracing::trace!(
        "Tick {}: consumed {} in {} rounds, {} events",
        tick,
        report.consumed,
        report.rounds,
        report.events.len()
    );

    report
}
