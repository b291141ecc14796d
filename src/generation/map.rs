//! Seeded board generation
//!
//! Layout, in draw order:
//! 1. fortified cells, avoiding the two corner safe zones
//! 2. blocked pillars at four symmetric points (overriding fortification)
//! 3. generators down the left edge, sinks down the right edge
//!
//! Every stage uses bounded retries. A stage that runs out of attempts
//! places fewer entities and the board is still returned.

use crate::core::config::SimulationConfig;
use crate::core::random::RandomSource;
use crate::core::types::{GridPos, Rotation};
use crate::generation::retry::{try_place, RetryBudget};
use crate::grid::{Grid, TileKind};

/// Build the starting board for a session
pub fn generate_map(config: &SimulationConfig, rng: &mut RandomSource) -> Grid {
    let mut grid = Grid::new(
        config.width,
        config.height,
        config.capacities,
        config.max_health,
    );

    place_fortified(&mut grid, config, rng);
    place_pillars(&mut grid);
    place_infrastructure(&mut grid, config, rng);

    tracing::debug!(
        "Generated {}x{} map: {} generators, {} sinks, {} fortified, {} blocked",
        grid.width,
        grid.height,
        grid.generators().len(),
        grid.sinks().len(),
        grid.count_where(|t| t.fortified),
        grid.count_where(|t| t.blocked),
    );

    grid
}

/// 2x2 blocks in the top-left and bottom-right corners
pub fn safe_zones(width: usize, height: usize) -> Vec<GridPos> {
    let far_col = width.saturating_sub(2);
    let far_row = height.saturating_sub(2);
    let mut zones = Vec::with_capacity(8);
    for (c0, r0) in [(0, 0), (far_col, far_row)] {
        for dc in 0..2 {
            for dr in 0..2 {
                let pos = GridPos::new(c0 + dc, r0 + dr);
                if pos.col < width && pos.row < height && !zones.contains(&pos) {
                    zones.push(pos);
                }
            }
        }
    }
    zones
}

/// Four pillars mirrored about both axes, 30% in from each edge
pub fn pillar_positions(width: usize, height: usize) -> Vec<GridPos> {
    let near_col = width * 3 / 10;
    let near_row = height * 3 / 10;
    let far_col = width.saturating_sub(1 + near_col);
    let far_row = height.saturating_sub(1 + near_row);

    let mut pillars = Vec::with_capacity(4);
    for row in [near_row, far_row] {
        for col in [near_col, far_col] {
            let pos = GridPos::new(col, row);
            if !pillars.contains(&pos) {
                pillars.push(pos);
            }
        }
    }
    pillars
}

fn place_fortified(grid: &mut Grid, config: &SimulationConfig, rng: &mut RandomSource) {
    let safe = safe_zones(grid.width, grid.height);
    let target = rng.range_inclusive(config.fortified_count.min, config.fortified_count.max);
    let mut budget = RetryBudget::new(config.fortified_attempts);
    let (width, height) = (grid.width, grid.height);

    for _ in 0..target {
        let picked = budget.attempt(
            || {
                let col = rng.below(width);
                let row = rng.below(height);
                GridPos::new(col, row)
            },
            |pos| {
                !safe.contains(pos) && grid.get(*pos).map(|t| !t.fortified).unwrap_or(false)
            },
        );
        match picked {
            Some(pos) => grid.mark_fortified(pos),
            None => break,
        }
    }
}

fn place_pillars(grid: &mut Grid) {
    for pos in pillar_positions(grid.width, grid.height) {
        grid.mark_blocked(pos);
    }
}

fn place_infrastructure(grid: &mut Grid, config: &SimulationConfig, rng: &mut RandomSource) {
    let generator_count = rng.range_inclusive(config.generator_count.min, config.generator_count.max);
    let sink_count = rng.range_inclusive(config.sink_count.min, config.sink_count.max);
    let right_edge = grid.width - 1;

    for _ in 0..generator_count {
        if let Some(pos) = pick_edge_cell(grid, 0, config.placement_attempts, rng) {
            let output = rng.range_inclusive(config.generator_output.min, config.generator_output.max);
            grid.place(pos, TileKind::Generator { output }, Rotation::NONE);
        } else {
            tracing::debug!("No free left-edge cell for a generator, skipping");
        }
    }

    for _ in 0..sink_count {
        if let Some(pos) = pick_edge_cell(grid, right_edge, config.placement_attempts, rng) {
            let demand = rng.range_inclusive(config.sink_demand.min, config.sink_demand.max);
            grid.place(pos, TileKind::Sink { demand }, Rotation::NONE);
        } else {
            tracing::debug!("No free right-edge cell for a sink, skipping");
        }
    }
}

/// Random row in `col` holding an unblocked Empty tile
fn pick_edge_cell(
    grid: &Grid,
    col: usize,
    attempts: u32,
    rng: &mut RandomSource,
) -> Option<GridPos> {
    let height = grid.height;
    try_place(
        attempts,
        || GridPos::new(col, rng.below(height)),
        |pos| {
            grid.get(*pos)
                .map(|t| t.is_empty() && !t.blocked)
                .unwrap_or(false)
        },
    )
}
