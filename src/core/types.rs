//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Simulation tick counter
pub type Tick = u64;

/// Power carried by pulses and accumulated on tiles
pub type Power = u32;

/// Cell address on the board, `(col, row)` with row 0 at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub col: usize,
    pub row: usize,
}

impl GridPos {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Step one cell in `dir`, or None when that would leave the top/left edge.
    ///
    /// The far edges are checked by the grid, which knows its size.
    pub fn step(&self, dir: Direction) -> Option<GridPos> {
        match dir {
            Direction::Up => self.row.checked_sub(1).map(|row| GridPos::new(self.col, row)),
            Direction::Right => Some(GridPos::new(self.col + 1, self.row)),
            Direction::Down => Some(GridPos::new(self.col, self.row + 1)),
            Direction::Left => self.col.checked_sub(1).map(|col| GridPos::new(col, self.row)),
        }
    }

    /// Direction in which `other` lies, if it is one of the four adjacent cells
    pub fn direction_to(&self, other: GridPos) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&dir| self.step(dir) == Some(other))
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// The four sides of a tile, in connectivity-mask order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// Clockwise quarter-turn count, always in 0..4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Rotation(u8);

impl From<u8> for Rotation {
    fn from(quarter_turns: u8) -> Self {
        Rotation::new(quarter_turns)
    }
}

impl From<Rotation> for u8 {
    fn from(rotation: Rotation) -> Self {
        rotation.0
    }
}

impl Rotation {
    pub const NONE: Rotation = Rotation(0);

    pub fn new(quarter_turns: u8) -> Self {
        Self(quarter_turns % 4)
    }

    pub fn quarter_turns(&self) -> u8 {
        self.0
    }

    /// One more clockwise quarter turn
    pub fn turned(&self) -> Self {
        Self::new(self.0 + 1)
    }
}
