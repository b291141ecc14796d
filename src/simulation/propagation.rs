//! Power propagation - the per-tick wavefront pass
//!
//! Every generator seeds pulses into its neighbours at once. Each round,
//! pulses are grouped by destination and each destination:
//! - accepts only pulses arriving through one of its open sides
//! - adds the accepted total to its `power`
//! - splits the total evenly (floored) over its open sides, skipping the
//!   sides it was fed from this round
//!
//! Sinks absorb up to their demand and forward nothing. Generators keep
//! their fixed output as power and re-emit it when hit. The pass stops when
//! no pulses remain or the round cap is reached.
//!
//! Back-flow is only blocked toward same-round sources, so a tile on a loop
//! can be fed again from another side in a later round and its power keeps
//! growing until the pulses die out or the cap is hit.

use std::collections::BTreeMap;

use crate::core::types::{GridPos, Power};
use crate::grid::{Grid, TileKind};

/// Power in flight from `source` to the adjacent `destination`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub destination: GridPos,
    pub input_power: Power,
    pub source: GridPos,
}

/// What one propagation pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationOutcome {
    /// Sum of sink absorption this pass
    pub consumed: u64,
    pub rounds: u32,
    /// Pulses were still pending when the round cap stopped the pass
    pub hit_round_cap: bool,
}

/// Run one full pass: reset, seed from generators, then wavefront rounds
pub fn propagate(grid: &mut Grid, max_rounds: u32) -> PropagationOutcome {
    grid.refresh();

    let mut pending = seed_pulses(grid);
    let mut outcome = PropagationOutcome::default();

    while !pending.is_empty() && outcome.rounds < max_rounds {
        let (next, consumed) = run_round(grid, pending);
        outcome.consumed += consumed;
        outcome.rounds += 1;
        tracing::trace!(
            "Propagation round {}: {} pulses queued",
            outcome.rounds,
            next.len()
        );
        pending = next;
    }

    if !pending.is_empty() {
        outcome.hit_round_cap = true;
        tracing::debug!(
            "Propagation stopped at round cap {} with {} pulses pending",
            max_rounds,
            pending.len()
        );
    }

    outcome
}

/// Initial pulses from every registered generator, which also get their
/// display power set to their output
pub fn seed_pulses(grid: &mut Grid) -> Vec<Pulse> {
    let mut pulses = Vec::new();

    for pos in grid.generators().to_vec() {
        let Some(tile) = grid.get_mut(pos) else {
            continue;
        };
        let TileKind::Generator { output } = tile.kind else {
            continue;
        };
        tile.power = output;
        let connections = tile.connections();

        for dir in connections.open_sides() {
            if let Some(neighbor) = grid.neighbor(pos, dir) {
                pulses.push(Pulse {
                    destination: neighbor,
                    input_power: output,
                    source: pos,
                });
            }
        }
    }

    pulses
}

/// Process one round of pulses. Returns next round's pulses and the power
/// absorbed by sinks this round.
fn run_round(grid: &mut Grid, pulses: Vec<Pulse>) -> (Vec<Pulse>, u64) {
    let mut by_destination: BTreeMap<GridPos, Vec<Pulse>> = BTreeMap::new();
    for pulse in pulses {
        by_destination
            .entry(pulse.destination)
            .or_default()
            .push(pulse);
    }

    let mut next = Vec::new();
    let mut consumed = 0u64;

    for (pos, incoming) in by_destination {
        let Some(tile) = grid.get(pos) else {
            continue;
        };
        if tile.is_empty() || tile.health == 0 {
            continue;
        }

        let connections = tile.connections();
        let kind = tile.kind;

        let mut total: Power = 0;
        let mut sources: Vec<GridPos> = Vec::with_capacity(incoming.len());
        for pulse in &incoming {
            let Some(from) = pos.direction_to(pulse.source) else {
                continue;
            };
            if connections.is_open(from) {
                total = total.saturating_add(pulse.input_power);
                sources.push(pulse.source);
            }
        }

        if let TileKind::Generator { output } = kind {
            total = output;
        }
        if total == 0 {
            continue;
        }

        if let Some(tile) = grid.get_mut(pos) {
            match kind {
                TileKind::Generator { output } => tile.power = output,
                _ => tile.power = tile.power.saturating_add(total),
            }
        }

        if let TileKind::Sink { demand } = kind {
            consumed += total.min(demand) as u64;
            continue;
        }

        let exits: Vec<GridPos> = connections
            .open_sides()
            .filter_map(|dir| grid.neighbor(pos, dir))
            .filter(|n| !sources.contains(n))
            .collect();
        if exits.is_empty() {
            continue;
        }

        let share = total / exits.len() as Power;
        if share == 0 {
            continue;
        }
        next.extend(exits.into_iter().map(|exit| Pulse {
            destination: exit,
            input_power: share,
            source: pos,
        }));
    }

    (next, consumed)
}
