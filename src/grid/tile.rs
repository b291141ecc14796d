//! Tile records and their type-specific variants

use serde::{Deserialize, Serialize};

use crate::core::config::CapacityTable;
use crate::core::types::{Power, Rotation};
use crate::grid::connections::{derive_connections, Connections};

/// Wire piece shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireShape {
    /// ─
    Straight,
    /// └
    Corner,
    /// ┬
    TShape,
    /// ┼
    Cross,
}

/// What occupies a cell, with the fields only that variant carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    Wire(WireShape),
    Generator { output: Power },
    Sink { demand: Power },
    Breaker,
    Switch { on: bool },
}

impl TileKind {
    /// Generators and sinks: never overwritten by edits, never overloaded
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, TileKind::Generator { .. } | TileKind::Sink { .. })
    }

    /// Player-built pieces that can burn out
    pub fn is_destructible(&self) -> bool {
        matches!(
            self,
            TileKind::Wire(_) | TileKind::Breaker | TileKind::Switch { .. }
        )
    }

    /// Kinds whose rotation changes their connectivity
    pub fn is_rotatable(&self) -> bool {
        self.is_destructible()
    }

    fn base_capacity(&self, capacities: &CapacityTable) -> u32 {
        match self {
            TileKind::Empty | TileKind::Wire(_) => capacities.wire,
            TileKind::Breaker => capacities.breaker,
            TileKind::Switch { .. } => capacities.switch,
            TileKind::Generator { .. } | TileKind::Sink { .. } => capacities.infrastructure,
        }
    }
}

/// Health-derived condition of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileState {
    #[default]
    Normal,
    Overloaded,
    Broken,
}

/// One cell of the board
///
/// The connectivity mask is not a field: `connections()` derives it from
/// kind, rotation and health on every read, and snapshots carry the
/// derived value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "TileRecord", from = "TileRecord")]
pub struct Tile {
    pub kind: TileKind,
    pub rotation: Rotation,
    /// Load routed into this tile during the current tick
    pub power: Power,
    pub capacity: u32,
    pub health: u8,
    pub state: TileState,
    pub fortified: bool,
    pub blocked: bool,
}

/// Serialized form of a tile, with its mask as of the snapshot
#[derive(Serialize, Deserialize)]
struct TileRecord {
    kind: TileKind,
    rotation: Rotation,
    power: Power,
    capacity: u32,
    health: u8,
    state: TileState,
    /// Ignored on load
    #[serde(default)]
    connections: Connections,
    fortified: bool,
    blocked: bool,
}

impl From<Tile> for TileRecord {
    fn from(tile: Tile) -> Self {
        Self {
            connections: tile.connections(),
            kind: tile.kind,
            rotation: tile.rotation,
            power: tile.power,
            capacity: tile.capacity,
            health: tile.health,
            state: tile.state,
            fortified: tile.fortified,
            blocked: tile.blocked,
        }
    }
}

impl From<TileRecord> for Tile {
    fn from(record: TileRecord) -> Self {
        Self {
            kind: record.kind,
            rotation: record.rotation,
            power: record.power,
            capacity: record.capacity,
            health: record.health,
            state: record.state,
            fortified: record.fortified,
            blocked: record.blocked,
        }
    }
}

impl Tile {
    /// Fresh tile of `kind` at full health on a cell with the given fortification
    pub fn build(
        kind: TileKind,
        rotation: Rotation,
        fortified: bool,
        capacities: &CapacityTable,
        max_health: u8,
    ) -> Self {
        let mut capacity = kind.base_capacity(capacities);
        if fortified {
            capacity = capacity.saturating_mul(capacities.fortified_multiplier);
        }

        Self {
            kind,
            rotation,
            power: 0,
            capacity,
            health: max_health,
            state: TileState::Normal,
            fortified,
            blocked: false,
        }
    }

    pub fn empty(capacities: &CapacityTable, max_health: u8) -> Self {
        Self::build(TileKind::Empty, Rotation::NONE, false, capacities, max_health)
    }

    pub fn is_empty(&self) -> bool {
        self.kind == TileKind::Empty
    }

    /// Open sides as of the tile's current fields
    pub fn connections(&self) -> Connections {
        derive_connections(self)
    }

    /// Generator output or sink demand
    pub fn value(&self) -> Option<Power> {
        match self.kind {
            TileKind::Generator { output } => Some(output),
            TileKind::Sink { demand } => Some(demand),
            _ => None,
        }
    }

    /// Placement is possible here at all (cell-level obstacles only)
    pub fn is_buildable(&self) -> bool {
        !self.blocked && !self.kind.is_infrastructure()
    }
}
