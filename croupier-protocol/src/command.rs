//! Command bytes
//!
//! The first byte after STB falls selects what the rest of the
//! transaction means.

/// Data command: write display RAM, auto-increment address
pub const DATA_AUTO_INCREMENT: u8 = 0x40;
/// Data command: read key-scan data
pub const DATA_READ_KEYS: u8 = 0x42;
/// Data command: write display RAM, fixed address
pub const DATA_FIXED_ADDRESS: u8 = 0x44;

/// Address command base, ORed with the RAM address (0x00..=0x0F)
pub const ADDRESS_BASE: u8 = 0xC0;

/// Display control: display off
pub const DISPLAY_OFF: u8 = 0x80;
/// Display control: display on, ORed with brightness - 1
pub const DISPLAY_ON: u8 = 0x88;

/// Bytes of display RAM
pub const DISPLAY_RAM_SIZE: usize = 16;

/// Dimmest brightness step
pub const MIN_BRIGHTNESS: u8 = 1;
/// Brightest brightness step
pub const MAX_BRIGHTNESS: u8 = 8;

/// Clamp a brightness request into 1..=8
pub fn clamp_brightness(level: u8) -> u8 {
    level.clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS)
}

/// Build the display control byte
///
/// Brightness is kept in the low bits even when the display is off so
/// that switching back on restores the same level.
pub fn display_control(on: bool, brightness: u8) -> u8 {
    let pulse = clamp_brightness(brightness) - 1;
    if on {
        DISPLAY_ON | pulse
    } else {
        DISPLAY_OFF | pulse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_is_clamped() {
        assert_eq!(clamp_brightness(0), 1);
        assert_eq!(clamp_brightness(5), 5);
        assert_eq!(clamp_brightness(200), 8);
    }

    #[test]
    fn test_display_control() {
        assert_eq!(display_control(true, 1), 0x88);
        assert_eq!(display_control(true, 3), 0x8A);
        assert_eq!(display_control(true, 8), 0x8F);
        assert_eq!(display_control(true, 0), 0x88);
        assert_eq!(display_control(true, 99), 0x8F);
        assert_eq!(display_control(false, 1), 0x80);
        assert_eq!(display_control(false, 8), 0x87);
    }
}
