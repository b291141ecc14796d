//! The tile arena and its generator/sink registries

use serde::{Deserialize, Serialize};

use crate::core::config::CapacityTable;
use crate::core::types::{Direction, GridPos, Rotation};
use crate::grid::tile::{Tile, TileKind, TileState};

/// Dense 2D board addressed by `(col, row)`
///
/// Generator and sink positions are kept as indices into the arena so
/// propagation can seed without scanning every cell. All edits that touch
/// infrastructure go through `place`, `relocate_generator` and `destroy`,
/// which keep the registries in step with the tiles. Tiles are not mutable
/// from outside the crate:
///
/// ```compile_fail
/// use circuit_commander::core::config::CapacityTable;
/// use circuit_commander::core::types::GridPos;
/// use circuit_commander::grid::{Grid, TileKind};
///
/// let mut grid = Grid::new(2, 2, CapacityTable::default(), 100);
/// grid.get_mut(GridPos::new(0, 0)).unwrap().kind = TileKind::Generator { output: 10 };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    capacities: CapacityTable,
    max_health: u8,
    tiles: Vec<Tile>,
    generators: Vec<GridPos>,
    sinks: Vec<GridPos>,
}

impl Grid {
    pub fn new(width: usize, height: usize, capacities: CapacityTable, max_health: u8) -> Self {
        Self {
            width,
            height,
            capacities,
            max_health,
            tiles: vec![Tile::empty(&capacities, max_health); width * height],
            generators: Vec::new(),
            sinks: Vec::new(),
        }
    }

    #[inline]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.col < self.width && pos.row < self.height
    }

    #[inline]
    fn index(&self, pos: GridPos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.row * self.width + pos.col)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, pos: GridPos) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    /// Crate-only: outside callers go through `place`, `clear` and friends
    #[inline]
    pub(crate) fn get_mut(&mut self, pos: GridPos) -> Option<&mut Tile> {
        self.index(pos).map(move |i| &mut self.tiles[i])
    }

    /// Adjacent in-bounds cell in `dir`
    pub fn neighbor(&self, pos: GridPos, dir: Direction) -> Option<GridPos> {
        pos.step(dir).filter(|n| self.in_bounds(*n))
    }

    /// Every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = GridPos> {
        let width = self.width;
        (0..self.width * self.height).map(move |i| GridPos::new(i % width, i / width))
    }

    /// Read-only row view, top row first
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width.max(1))
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn generators(&self) -> &[GridPos] {
        &self.generators
    }

    pub fn sinks(&self) -> &[GridPos] {
        &self.sinks
    }

    pub fn capacities(&self) -> &CapacityTable {
        &self.capacities
    }

    pub fn max_health(&self) -> u8 {
        self.max_health
    }

    /// Put a fresh tile of `kind` at `pos`, registering infrastructure.
    ///
    /// Refuses out-of-bounds, blocked and infrastructure cells. The cell keeps
    /// its fortification, so the new tile's capacity reflects it.
    pub fn place(&mut self, pos: GridPos, kind: TileKind, rotation: Rotation) -> bool {
        let Some(existing) = self.get(pos) else {
            return false;
        };
        if !existing.is_buildable() {
            return false;
        }

        let tile = Tile::build(
            kind,
            rotation,
            existing.fortified,
            &self.capacities,
            self.max_health,
        );
        self.tiles[pos.row * self.width + pos.col] = tile;

        match kind {
            TileKind::Generator { .. } => self.generators.push(pos),
            TileKind::Sink { .. } => self.sinks.push(pos),
            _ => {}
        }
        true
    }

    /// Reset a non-infrastructure cell to Empty, keeping its cell flags
    pub fn clear(&mut self, pos: GridPos) -> bool {
        let (capacities, max_health) = (self.capacities, self.max_health);
        let Some(tile) = self.get_mut(pos) else {
            return false;
        };
        if tile.kind.is_infrastructure() {
            return false;
        }

        let fortified = tile.fortified;
        let blocked = tile.blocked;
        *tile = Tile::build(
            TileKind::Empty,
            Rotation::NONE,
            fortified,
            &capacities,
            max_health,
        );
        tile.blocked = blocked;
        true
    }

    /// Burn out the tile at `pos`: it becomes a broken Empty cell with its
    /// flags and capacity back to defaults and no registry entry.
    pub fn destroy(&mut self, pos: GridPos) {
        let (capacities, max_health) = (self.capacities, self.max_health);
        if let Some(tile) = self.get_mut(pos) {
            *tile = Tile::empty(&capacities, max_health);
            tile.health = 0;
            tile.state = TileState::Broken;
        }
        self.generators.retain(|&p| p != pos);
        self.sinks.retain(|&p| p != pos);
    }

    /// Move the generator registered at `index` to `to`, carrying its output.
    ///
    /// The target must hold Empty or Wire and not be blocked. Returns the old position.
    pub fn relocate_generator(&mut self, index: usize, to: GridPos) -> Option<GridPos> {
        let from = *self.generators.get(index)?;
        let output = match self.get(from)?.kind {
            TileKind::Generator { output } => output,
            _ => return None,
        };

        let target = self.get(to)?;
        if target.blocked || !matches!(target.kind, TileKind::Empty | TileKind::Wire(_)) {
            return None;
        }

        let (capacities, max_health) = (self.capacities, self.max_health);
        if let Some(old) = self.get_mut(from) {
            let fortified = old.fortified;
            *old = Tile::build(
                TileKind::Empty,
                Rotation::NONE,
                fortified,
                &capacities,
                max_health,
            );
        }
        if let Some(new) = self.get_mut(to) {
            let fortified = new.fortified;
            *new = Tile::build(
                TileKind::Generator { output },
                Rotation::NONE,
                fortified,
                &capacities,
                max_health,
            );
        }

        self.generators[index] = to;
        Some(from)
    }

    pub(crate) fn mark_fortified(&mut self, pos: GridPos) {
        let multiplier = self.capacities.fortified_multiplier;
        let base = self.capacities.wire;
        if let Some(tile) = self.get_mut(pos) {
            tile.fortified = true;
            tile.capacity = base.saturating_mul(multiplier);
        }
    }

    pub(crate) fn mark_blocked(&mut self, pos: GridPos) {
        let base = self.capacities.wire;
        if let Some(tile) = self.get_mut(pos) {
            tile.blocked = true;
            tile.fortified = false;
            tile.capacity = base;
        }
    }

    /// Zero every tile's power ahead of a propagation pass
    pub fn refresh(&mut self) {
        for tile in &mut self.tiles {
            tile.power = 0;
        }
    }

    pub fn count_where(&self, predicate: impl Fn(&Tile) -> bool) -> usize {
        self.tiles.iter().filter(|t| predicate(t)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::tile::WireShape;

    fn grid() -> Grid {
        Grid::new(6, 4, CapacityTable::default(), 100)
    }

    #[test]
    fn test_bounds() {
        let g = grid();
        assert!(g.get(GridPos::new(5, 3)).is_some());
        assert!(g.get(GridPos::new(6, 0)).is_none());
        assert!(g.get(GridPos::new(0, 4)).is_none());
        assert_eq!(g.neighbor(GridPos::new(5, 0), Direction::Right), None);
        assert_eq!(g.neighbor(GridPos::new(5, 0), Direction::Up), None);
        assert_eq!(
            g.neighbor(GridPos::new(5, 0), Direction::Left),
            Some(GridPos::new(4, 0))
        );
    }

    #[test]
    fn test_rows_view() {
        let g = grid();
        let rows: Vec<&[Tile]> = g.rows().collect();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.len() == 6));
    }

    #[test]
    fn test_place_registers_infrastructure() {
        let mut g = grid();
        assert!(g.place(GridPos::new(0, 1), TileKind::Generator { output: 10 }, Rotation::NONE));
        assert!(g.place(GridPos::new(5, 2), TileKind::Sink { demand: 5 }, Rotation::NONE));
        assert_eq!(g.generators(), &[GridPos::new(0, 1)]);
        assert_eq!(g.sinks(), &[GridPos::new(5, 2)]);

        // Infrastructure cannot be overwritten or cleared
        assert!(!g.place(
            GridPos::new(0, 1),
            TileKind::Wire(WireShape::Straight),
            Rotation::NONE
        ));
        assert!(!g.clear(GridPos::new(5, 2)));
    }

    #[test]
    fn test_blocked_cells_refuse_placement() {
        let mut g = grid();
        g.mark_blocked(GridPos::new(2, 2));
        assert!(!g.place(GridPos::new(2, 2), TileKind::Breaker, Rotation::NONE));
        assert!(!g.place(
            GridPos::new(2, 2),
            TileKind::Generator { output: 10 },
            Rotation::NONE
        ));
    }

    #[test]
    fn test_clear_keeps_fortification() {
        let mut g = grid();
        let pos = GridPos::new(3, 1);
        g.mark_fortified(pos);
        assert!(g.place(pos, TileKind::Breaker, Rotation::NONE));
        assert_eq!(g.get(pos).unwrap().capacity, 100);

        assert!(g.clear(pos));
        let tile = g.get(pos).unwrap();
        assert!(tile.is_empty());
        assert!(tile.fortified);
    }

    #[test]
    fn test_destroy_resets_cell() {
        let mut g = grid();
        let pos = GridPos::new(3, 1);
        g.mark_fortified(pos);
        g.place(pos, TileKind::Wire(WireShape::Cross), Rotation::NONE);
        g.destroy(pos);

        let tile = g.get(pos).unwrap();
        assert!(tile.is_empty());
        assert!(!tile.fortified);
        assert!(!tile.blocked);
        assert_eq!(tile.health, 0);
        assert_eq!(tile.power, 0);
        assert_eq!(tile.state, TileState::Broken);
        assert_eq!(tile.capacity, 15);
    }

    #[test]
    fn test_relocate_generator() {
        let mut g = grid();
        g.place(GridPos::new(0, 0), TileKind::Generator { output: 14 }, Rotation::NONE);
        g.place(GridPos::new(0, 3), TileKind::Wire(WireShape::Straight), Rotation::NONE);

        let from = g.relocate_generator(0, GridPos::new(0, 3));
        assert_eq!(from, Some(GridPos::new(0, 0)));
        assert!(g.get(GridPos::new(0, 0)).unwrap().is_empty());
        assert_eq!(
            g.get(GridPos::new(0, 3)).unwrap().kind,
            TileKind::Generator { output: 14 }
        );
        assert_eq!(g.generators(), &[GridPos::new(0, 3)]);
    }

    #[test]
    fn test_relocate_rejects_occupied_target() {
        let mut g = grid();
        g.place(GridPos::new(0, 0), TileKind::Generator { output: 14 }, Rotation::NONE);
        g.place(GridPos::new(0, 2), TileKind::Breaker, Rotation::NONE);
        assert_eq!(g.relocate_generator(0, GridPos::new(0, 2)), None);
        assert_eq!(g.relocate_generator(3, GridPos::new(0, 1)), None);
        assert_eq!(g.generators(), &[GridPos::new(0, 0)]);
    }

    #[test]
    fn test_refresh_zeroes_power() {
        let mut g = grid();
        let pos = GridPos::new(1, 1);
        g.place(pos, TileKind::Wire(WireShape::Corner), Rotation::new(2));
        g.get_mut(pos).unwrap().power = 40;
        g.refresh();
        let tile = g.get(pos).unwrap();
        assert_eq!(tile.power, 0);
        assert_eq!(tile.connections().as_array(), [false, false, true, true]);
    }

    #[test]
    fn test_placed_and_moved_tiles_report_live_connections() {
        let mut g = grid();
        let gen = GridPos::new(0, 1);
        let cross = GridPos::new(2, 1);
        g.place(gen, TileKind::Generator { output: 10 }, Rotation::NONE);
        g.place(cross, TileKind::Wire(WireShape::Cross), Rotation::NONE);
        assert_eq!(g.get(gen).unwrap().connections().as_array(), [true; 4]);
        assert_eq!(g.get(cross).unwrap().connections().as_array(), [true; 4]);

        g.relocate_generator(0, GridPos::new(0, 3));
        assert_eq!(g.get(GridPos::new(0, 3)).unwrap().connections().as_array(), [true; 4]);
        assert_eq!(g.get(gen).unwrap().connections().as_array(), [false; 4]);
    }
}
