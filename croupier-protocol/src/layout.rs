//! Display RAM layout
//!
//! Each of the five character positions owns two RAM bytes. The low
//! nibble of a glyph goes to the even address and the high nibble to the
//! odd one. The board wires logical positions 3 and 4 to each other's
//! grid lines.

use crate::command::ADDRESS_BASE;
use heapless::Vec;

/// Character positions on the panel
pub const POSITIONS: usize = 5;

/// Map a logical (left-to-right) position to the grid it is wired to
pub fn physical_position(logical: usize) -> usize {
    match logical {
        3 => 4,
        4 => 3,
        other => other,
    }
}

/// Address-command / value pairs that draw `glyph` at a logical position
pub fn position_writes(logical: usize, glyph: u8) -> [(u8, u8); 2] {
    let base = ADDRESS_BASE + (physical_position(logical) as u8) * 2;
    [(base, glyph & 0x0F), (base + 1, glyph >> 4)]
}

/// Writes for a run of glyphs starting at `start`
///
/// Glyphs that would fall past the last position are dropped.
pub fn run_writes(start: usize, glyphs: &[u8]) -> Vec<(u8, u8), { POSITIONS * 2 }> {
    let mut writes = Vec::new();
    for (offset, &glyph) in glyphs.iter().enumerate() {
        let logical = start + offset;
        if logical >= POSITIONS {
            break;
        }
        for write in position_writes(logical, glyph) {
            // Capacity covers every position twice
            let _ = writes.push(write);
        }
    }
    writes
}
