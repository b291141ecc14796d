//! Board model: tiles, connectivity and the grid arena

pub mod ascii;
pub mod board;
pub mod connections;
pub mod tile;

pub use ascii::render_ascii;
pub use board::Grid;
pub use connections::{derive_connections, Connections};
pub use tile::{Tile, TileKind, TileState, WireShape};
