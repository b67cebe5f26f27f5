//! Key-scan word decoding
//!
//! After the read-keys command the TM1639 clocks out 16 bits, LSB first.
//! The first byte lands in the high half of the word.

/// Keys wired into the scan matrix
pub const MATRIX_KEYS: usize = 5;

/// Bit of the scan word for each matrix key, in the order random, add,
/// sub, setting, launch
pub const KEY_SCAN_BITS: [u8; MATRIX_KEYS] = [11, 10, 15, 14, 3];

/// Bits clocked out per scan
pub const SCAN_BITS: u8 = 16;

/// Place the `index`-th sampled bit into the scan word
pub fn place_scan_bit(word: u16, index: u8, high: bool) -> u16 {
    if !high || index >= SCAN_BITS {
        return word;
    }
    let bit = if index < 8 { index + 8 } else { index - 8 };
    word | (1 << bit)
}

/// Pressed flags for each matrix key; a 0 bit means pressed
pub fn matrix_pressed(word: u16) -> [bool; MATRIX_KEYS] {
    KEY_SCAN_BITS.map(|bit| word & (1 << bit) == 0)
}
