//! Validated board edits
//!
//! These functions apply one player edit to a grid or explain why not.
//! They never touch `connections`, `power` or `state` directly; the next
//! propagation pass derives those. Cooldown and session-over gating lives
//! in the session, which wraps every call here.

pub mod command;
pub mod cooldown;

pub use command::EditCommand;
pub use cooldown::ActionCooldown;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{GridPos, Rotation};
use crate::grid::{Grid, TileKind, WireShape};

/// Why an edit was refused. The grid is unchanged whenever one is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    #[error("Action on cooldown for another {remaining_ms}ms")]
    CoolingDown { remaining_ms: u64 },

    #[error("Position {0} is outside the board")]
    OutOfBounds(GridPos),

    #[error("Position {0} holds a generator or sink")]
    Infrastructure(GridPos),

    #[error("Position {0} is blocked")]
    Blocked(GridPos),

    #[error("Tile at {0} does not support this action")]
    NotApplicable(GridPos),

    #[error("Session is over")]
    SessionOver,
}

/// Non-wire pieces the player can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Component {
    Breaker,
    Switch,
}

impl Component {
    fn kind(self) -> TileKind {
        match self {
            Component::Breaker => TileKind::Breaker,
            // Switches are built closed
            Component::Switch => TileKind::Switch { on: true },
        }
    }
}

fn check_buildable(grid: &Grid, pos: GridPos) -> Result<(), EditError> {
    let tile = grid.get(pos).ok_or(EditError::OutOfBounds(pos))?;
    if tile.kind.is_infrastructure() {
        return Err(EditError::Infrastructure(pos));
    }
    if tile.blocked {
        return Err(EditError::Blocked(pos));
    }
    Ok(())
}

/// Overwrite `pos` with a fresh wire piece
pub fn place_wire(
    grid: &mut Grid,
    pos: GridPos,
    shape: WireShape,
    rotation: Rotation,
) -> Result<(), EditError> {
    check_buildable(grid, pos)?;
    grid.place(pos, TileKind::Wire(shape), rotation);
    Ok(())
}

/// Overwrite `pos` with a fresh breaker or switch
pub fn place_component(
    grid: &mut Grid,
    pos: GridPos,
    component: Component,
    rotation: Rotation,
) -> Result<(), EditError> {
    check_buildable(grid, pos)?;
    grid.place(pos, component.kind(), rotation);
    Ok(())
}

pub fn remove_tile(grid: &mut Grid, pos: GridPos) -> Result<(), EditError> {
    let tile = grid.get(pos).ok_or(EditError::OutOfBounds(pos))?;
    if tile.kind.is_infrastructure() {
        return Err(EditError::Infrastructure(pos));
    }
    grid.clear(pos);
    Ok(())
}

/// Turn a wire, breaker or switch one quarter clockwise
pub fn rotate_tile(grid: &mut Grid, pos: GridPos) -> Result<(), EditError> {
    let tile = grid.get_mut(pos).ok_or(EditError::OutOfBounds(pos))?;
    if !tile.kind.is_rotatable() {
        return Err(EditError::NotApplicable(pos));
    }
    tile.rotation = tile.rotation.turned();
    Ok(())
}

pub fn toggle_switch(grid: &mut Grid, pos: GridPos) -> Result<(), EditError> {
    let tile = grid.get_mut(pos).ok_or(EditError::OutOfBounds(pos))?;
    match tile.kind {
        TileKind::Switch { on } => {
            tile.kind = TileKind::Switch { on: !on };
            Ok(())
        }
        _ => Err(EditError::NotApplicable(pos)),
    }
}
