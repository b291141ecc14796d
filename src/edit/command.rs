//! Text edit commands
//!
//! One grammar shared by the interactive loop and scripted headless runs:
//!
//! ```text
//! wire <col> <row> <straight|corner|t|cross> [turns]
//! breaker <col> <row> [turns]
//! switch <col> <row> [turns]
//! rotate <col> <row>
//! toggle <col> <row>
//! remove <col> <row>
//! ```

use serde::{Deserialize, Serialize};

use crate::core::types::{GridPos, Rotation};
use crate::edit::Component;
use crate::grid::WireShape;

/// A parsed player edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditCommand {
    PlaceWire {
        pos: GridPos,
        shape: WireShape,
        rotation: Rotation,
    },
    PlaceComponent {
        pos: GridPos,
        component: Component,
        rotation: Rotation,
    },
    Remove { pos: GridPos },
    Rotate { pos: GridPos },
    Toggle { pos: GridPos },
}

impl EditCommand {
    /// Parse one command line. `None` if the line is not a well-formed edit.
    pub fn parse(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let (&verb, args) = parts.split_first()?;
        let pos = parse_pos(args)?;
        let rotation_at = |i: usize| match args.get(i) {
            Some(raw) => raw.parse::<u8>().ok().map(Rotation::new),
            None => Some(Rotation::NONE),
        };

        let command = match verb {
            "wire" => EditCommand::PlaceWire {
                pos,
                shape: parse_shape(args.get(2)?)?,
                rotation: rotation_at(3)?,
            },
            "breaker" => EditCommand::PlaceComponent {
                pos,
                component: Component::Breaker,
                rotation: rotation_at(2)?,
            },
            "switch" => EditCommand::PlaceComponent {
                pos,
                component: Component::Switch,
                rotation: rotation_at(2)?,
            },
            "remove" => EditCommand::Remove { pos },
            "rotate" => EditCommand::Rotate { pos },
            "toggle" => EditCommand::Toggle { pos },
            _ => return None,
        };
        Some(command)
    }

    pub fn pos(&self) -> GridPos {
        match *self {
            EditCommand::PlaceWire { pos, .. }
            | EditCommand::PlaceComponent { pos, .. }
            | EditCommand::Remove { pos }
            | EditCommand::Rotate { pos }
            | EditCommand::Toggle { pos } => pos,
        }
    }
}

fn parse_pos(args: &[&str]) -> Option<GridPos> {
    let col = args.first()?.parse().ok()?;
    let row = args.get(1)?.parse().ok()?;
    Some(GridPos::new(col, row))
}

fn parse_shape(raw: &str) -> Option<WireShape> {
    match raw {
        "straight" => Some(WireShape::Straight),
        "corner" => Some(WireShape::Corner),
        "t" | "tshape" => Some(WireShape::TShape),
        "cross" => Some(WireShape::Cross),
        _ => None,
    }
}
