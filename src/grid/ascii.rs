//! Plain-text board view for terminals and logs

use crate::grid::board::Grid;
use crate::grid::tile::{Tile, TileKind};

/// Single character for a tile
///
/// Wires and closed components draw their live connection pattern. Cell
/// flags show through on empty cells: `#` pillar, `+` fortified, `x` burned out.
pub fn glyph(tile: &Tile) -> char {
    match tile.kind {
        TileKind::Generator { .. } => 'G',
        TileKind::Sink { .. } => 'S',
        TileKind::Breaker => 'B',
        TileKind::Switch { on: false } => 'o',
        TileKind::Switch { on: true } => 'I',
        TileKind::Wire(_) => box_glyph(tile.connections().as_array()),
        TileKind::Empty if tile.blocked => '#',
        TileKind::Empty if tile.fortified => '+',
        TileKind::Empty if tile.health == 0 => 'x',
        TileKind::Empty => '.',
    }
}

fn box_glyph(open: [bool; 4]) -> char {
    match open {
        // [up, right, down, left]
        [false, true, false, true] => '─',
        [true, false, true, false] => '│',
        [true, true, false, false] => '└',
        [false, true, true, false] => '┌',
        [false, false, true, true] => '┐',
        [true, false, false, true] => '┘',
        [false, true, true, true] => '┬',
        [true, true, true, false] => '├',
        [true, false, true, true] => '┤',
        [true, true, false, true] => '┴',
        [true, true, true, true] => '┼',
        _ => '?',
    }
}

/// Board as one line per row, top row first
pub fn render_ascii(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.width + 1) * grid.height);
    for row in grid.rows() {
        out.extend(row.iter().map(glyph));
        out.push('\n');
    }
    out
}
