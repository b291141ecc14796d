//! Periodic generator relocation
//!
//! Every `relocation_interval` ticks one generator jumps to a random row on
//! the left edge, forcing the player to re-route. The target must be Empty
//! or Wire; a wire there is overwritten.

use crate::core::random::RandomSource;
use crate::core::types::GridPos;
use crate::generation::try_place;
use crate::grid::{Grid, TileKind};

/// Move one randomly chosen generator to column 0.
///
/// Returns `(from, to)` on success, `None` if there are no generators or
/// every attempt landed on an unsuitable cell.
pub fn relocate_random_generator(
    grid: &mut Grid,
    rng: &mut RandomSource,
    attempts: u32,
) -> Option<(GridPos, GridPos)> {
    if grid.generators().is_empty() {
        return None;
    }
    let index = rng.below(grid.generators().len());
    let height = grid.height;

    let target = try_place(
        attempts,
        || GridPos::new(0, rng.below(height)),
        |&pos| {
            grid.get(pos).map_or(false, |tile| {
                !tile.blocked && matches!(tile.kind, TileKind::Empty | TileKind::Wire(_))
            })
        },
    )?;

    let from = grid.relocate_generator(index, target)?;
    tracing::debug!("Generator relocated from {} to {}", from, target);
    Some((from, target))
}
