//! Directional connectivity masks
//!
//! A mask records which of a tile's four sides carry power, in
//! [Up, Right, Down, Left] order. Masks are never stored as independent
//! state: `derive_connections` recomputes them from the tile on every read.

use serde::{Deserialize, Serialize};

use crate::core::types::{Direction, Rotation};
use crate::grid::tile::{Tile, TileKind, WireShape};

/// Four-bit open/closed pattern, bit `i` is `Direction::ALL[i]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Connections(u8);

impl Connections {
    pub const NONE: Connections = Connections(0);
    pub const ALL: Connections = Connections(0b1111);

    pub fn from_sides(sides: &[Direction]) -> Self {
        Self(sides.iter().fold(0, |mask, dir| mask | (1 << dir.index())))
    }

    pub fn is_open(&self, dir: Direction) -> bool {
        self.0 & (1 << dir.index()) != 0
    }

    pub fn open_count(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn open_sides(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|&dir| self.is_open(dir))
    }

    /// Shift every open side clockwise by the rotation
    pub fn rotated(&self, rotation: Rotation) -> Self {
        let r = rotation.quarter_turns() as u32;
        let mask = self.0 as u32;
        Self((((mask << r) | (mask >> (4 - r))) & 0b1111) as u8)
    }

    /// [Up, Right, Down, Left] as booleans
    pub fn as_array(&self) -> [bool; 4] {
        Direction::ALL.map(|dir| self.is_open(dir))
    }
}

impl WireShape {
    /// Unrotated mask of each wire shape
    pub fn base_connections(&self) -> Connections {
        match self {
            WireShape::Straight => Connections::from_sides(&[Direction::Right, Direction::Left]),
            WireShape::Corner => Connections::from_sides(&[Direction::Up, Direction::Right]),
            WireShape::TShape => Connections::from_sides(&[
                Direction::Right,
                Direction::Down,
                Direction::Left,
            ]),
            WireShape::Cross => Connections::ALL,
        }
    }
}

/// Connectivity of a tile from its kind, rotation, switch state and health
pub fn derive_connections(tile: &Tile) -> Connections {
    if tile.health == 0 {
        return Connections::NONE;
    }

    match tile.kind {
        TileKind::Empty => Connections::NONE,
        TileKind::Wire(shape) => shape.base_connections().rotated(tile.rotation),
        TileKind::Generator { .. } | TileKind::Sink { .. } => Connections::ALL,
        TileKind::Breaker => WireShape::Straight.base_connections().rotated(tile.rotation),
        TileKind::Switch { on: true } => {
            WireShape::Straight.base_connections().rotated(tile.rotation)
        }
        TileKind::Switch { on: false } => Connections::NONE,
    }
}
