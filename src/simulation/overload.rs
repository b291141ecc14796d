//! Overload damage and burn-out
//!
//! After propagation, every player-built tile compares its load to its
//! capacity. Over capacity costs health each tick; health never regenerates.
//! A tile that reaches zero health is destroyed and its cell becomes Empty.
//! Generators and sinks are exempt.

use crate::core::types::GridPos;
use crate::grid::{Grid, Tile, TileState};

/// Result of checking one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverloadResult {
    /// Within capacity, state is Normal
    Stable,
    /// Over capacity and damaged, still standing
    Damaged { health: u8 },
    /// Health reached zero this tick
    BurnedOut,
}

/// Apply one tick of overload rules to a single tile.
///
/// Does not destroy the tile; the caller clears the cell on `BurnedOut`.
pub fn apply_overload(tile: &mut Tile, damage: u8) -> OverloadResult {
    if tile.power > tile.capacity {
        tile.state = TileState::Overloaded;
        tile.health = tile.health.saturating_sub(damage);
        if tile.health == 0 {
            tile.state = TileState::Broken;
            return OverloadResult::BurnedOut;
        }
        return OverloadResult::Damaged {
            health: tile.health,
        };
    }

    if tile.health > 0 {
        tile.state = TileState::Normal;
    }
    OverloadResult::Stable
}

/// A tile that changed condition during the overload pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverloadChange {
    pub pos: GridPos,
    pub result: OverloadResult,
}

/// Run the overload check over the board, destroying burned-out tiles
pub fn run_overload_pass(grid: &mut Grid, damage: u8) -> Vec<OverloadChange> {
    let mut changes = Vec::new();

    for pos in grid.positions().collect::<Vec<_>>() {
        let Some(tile) = grid.get_mut(pos) else {
            continue;
        };
        if !tile.kind.is_destructible() {
            continue;
        }

        let result = apply_overload(tile, damage);
        match result {
            OverloadResult::Stable => {}
            OverloadResult::Damaged { .. } => changes.push(OverloadChange { pos, result }),
            OverloadResult::BurnedOut => {
                tracing::debug!("Tile at {} burned out", pos);
                grid.destroy(pos);
                changes.push(OverloadChange { pos, result });
            }
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CapacityTable;
    use crate::core::types::Rotation;
    use crate::grid::{TileKind, WireShape};

    fn tile(kind: TileKind) -> Tile {
        Tile::build(kind, Rotation::NONE, false, &CapacityTable::default(), 100)
    }

    #[test]
    fn test_within_capacity_is_stable() {
        let mut wire = tile(TileKind::Wire(WireShape::Straight));
        wire.power = 15;
        assert_eq!(apply_overload(&mut wire, 10), OverloadResult::Stable);
        assert_eq!(wire.health, 100);
        assert_eq!(wire.state, TileState::Normal);
    }

    #[test]
    fn test_damage_does_not_regenerate() {
        let mut wire = tile(TileKind::Wire(WireShape::Straight));
        wire.power = 16;
        assert_eq!(
            apply_overload(&mut wire, 10),
            OverloadResult::Damaged { health: 90 }
        );
        assert_eq!(wire.state, TileState::Overloaded);

        wire.power = 0;
        assert_eq!(apply_overload(&mut wire, 10), OverloadResult::Stable);
        assert_eq!(wire.state, TileState::Normal);
        assert_eq!(wire.health, 90);
    }

    #[test]
    fn test_ten_ticks_burn_out() {
        let mut breaker = tile(TileKind::Breaker);
        for n in 1..10u8 {
            breaker.power = 60;
            assert_eq!(
                apply_overload(&mut breaker, 10),
                OverloadResult::Damaged {
                    health: 100 - 10 * n
                }
            );
        }
        breaker.power = 60;
        assert_eq!(apply_overload(&mut breaker, 10), OverloadResult::BurnedOut);
        assert_eq!(breaker.health, 0);
        assert_eq!(breaker.state, TileState::Broken);
    }

    #[test]
    fn test_pass_destroys_and_skips_infrastructure() {
        let mut grid = Grid::new(3, 1, CapacityTable::default(), 100);
        let gen = GridPos::new(0, 0);
        let wire = GridPos::new(1, 0);
        grid.place(gen, TileKind::Generator { output: 90 }, Rotation::NONE);
        grid.place(wire, TileKind::Wire(WireShape::Straight), Rotation::NONE);
        grid.get_mut(wire).unwrap().health = 10;
        grid.get_mut(wire).unwrap().power = 90;
        grid.get_mut(gen).unwrap().power = 90;

        let changes = run_overload_pass(&mut grid, 10);
        assert_eq!(
            changes,
            vec![OverloadChange {
                pos: wire,
                result: OverloadResult::BurnedOut
            }]
        );

        let burned = grid.get(wire).unwrap();
        assert!(burned.is_empty());
        assert_eq!(burned.power, 0);
        assert_eq!(burned.connections().as_array(), [false; 4]);

        let generator = grid.get(gen).unwrap();
        assert_eq!(generator.health, 100);
        assert_eq!(generator.state, TileState::Normal);
        assert_eq!(grid.generators(), &[gen]);
    }
}
