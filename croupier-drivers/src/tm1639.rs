//! TM1639 display/keypad driver
//!
//! Bit-banged over three GPIOs plus the board's panel power switch. Every
//! operation is infallible: the chip never acknowledges anything, so a
//! glitched byte is simply drawn wrong until the next refresh and a misread
//! key-scan word is left for the debouncer to reject.
//!
//! # Usage
//!
//! ```ignore
//! let mut panel = Tm1639::new(clk, dio, stb, power, delay, 5);
//! panel.init();
//!
//! // Every 10ms on the display task:
//! let frame = composer.compose(&intent);
//! if frame.dirty {
//!     panel.render(&frame);
//! }
//! let scan = panel.read_key_scan();
//! ```

use croupier_core::display::{Body, DisplayDescriptor, CELLS};
use croupier_hal::{FlexPin, OutputPin};
use croupier_protocol::command::{
    ADDRESS_BASE, DATA_AUTO_INCREMENT, DATA_FIXED_ADDRESS, DATA_READ_KEYS, DISPLAY_RAM_SIZE,
};
use croupier_protocol::keyscan::{place_scan_bit, SCAN_BITS};
use croupier_protocol::layout::run_writes;
use croupier_protocol::{clamp_brightness, digit_glyph, display_control, letter_glyph, marquee, DOT};
use embedded_hal::delay::DelayNs;

/// Busy-wait after each clock edge pair
pub const BIT_DELAY_US: u32 = 2;

/// TM1639 driver
pub struct Tm1639<CLK, DIO, STB, PWR, D> {
    clk: CLK,
    dio: DIO,
    stb: STB,
    /// Board-level panel supply; driving it high cuts power
    power: PWR,
    delay: D,
    brightness: u8,
    display_on: bool,
}

impl<CLK, DIO, STB, PWR, D> Tm1639<CLK, DIO, STB, PWR, D>
where
    CLK: OutputPin,
    DIO: FlexPin,
    STB: OutputPin,
    PWR: OutputPin,
    D: DelayNs,
{
    pub fn new(clk: CLK, dio: DIO, stb: STB, power: PWR, delay: D, brightness: u8) -> Self {
        Self {
            clk,
            dio,
            stb,
            power,
            delay,
            brightness: clamp_brightness(brightness),
            display_on: true,
        }
    }

    /// Idle the bus, power the panel and blank it
    pub fn init(&mut self) {
        self.set_controller_enabled(true);
        self.dio.set_as_output();
        self.stb.set_high();
        self.clk.set_high();
        self.delay.delay_us(BIT_DELAY_US);

        self.display_on = true;
        self.write_command(DATA_AUTO_INCREMENT);
        self.write_command(display_control(true, self.brightness));
        self.clear();
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Shift one byte out, LSB first; data is latched on the rising edge
    pub fn write_byte(&mut self, byte: u8) {
        let mut byte = byte;
        for _ in 0..8 {
            self.clk.set_low();
            self.dio.set_state(byte & 1 != 0);
            byte >>= 1;
            self.clk.set_high();
            self.delay.delay_us(BIT_DELAY_US);
        }
    }

    /// Send a single-byte command inside its own strobe window
    pub fn write_command(&mut self, cmd: u8) {
        self.stb.set_low();
        self.write_byte(cmd);
        self.stb.set_high();
    }

    /// Send an address command followed by one data byte
    pub fn write_data(&mut self, address: u8, value: u8) {
        self.stb.set_low();
        self.write_byte(address);
        self.write_byte(value);
        self.stb.set_high();
    }

    /// Zero all display RAM
    pub fn clear(&mut self) {
        self.write_command(DATA_AUTO_INCREMENT);
        self.stb.set_low();
        self.write_byte(ADDRESS_BASE);
        for _ in 0..DISPLAY_RAM_SIZE {
            self.write_byte(0x00);
        }
        self.stb.set_high();
    }

    /// Set the pulse width; out-of-range levels are clamped to 1..=8
    pub fn set_brightness(&mut self, level: u8) {
        self.brightness = clamp_brightness(level);
        self.write_command(display_control(self.display_on, self.brightness));
    }

    /// Switch the chip's LED outputs
    pub fn set_display_power(&mut self, on: bool) {
        self.display_on = on;
        self.write_command(display_control(on, self.brightness));
    }

    /// Switch the board supply to the panel
    ///
    /// The switch is active low.
    pub fn set_controller_enabled(&mut self, on: bool) {
        self.power.set_state(!on);
    }

    pub fn is_controller_enabled(&self) -> bool {
        self.power.is_set_low()
    }

    /// Draw digit values (0-9, 10 is blank) from cell `start`
    pub fn show_digits(&mut self, values: &[u8], dots: &[bool], start: usize, len: usize) {
        let mut glyphs = [0u8; CELLS];
        for (i, glyph) in glyphs.iter_mut().enumerate().take(len.min(values.len())) {
            *glyph = with_dot(digit_glyph(values[i]), dots, i);
        }
        self.write_glyphs(start, &glyphs[..len.min(values.len()).min(CELLS)]);
    }

    /// Draw ASCII text from cell `start`
    pub fn show_letters(&mut self, text: &[u8], dots: &[bool], start: usize, len: usize) {
        let mut glyphs = [0u8; CELLS];
        for (i, glyph) in glyphs.iter_mut().enumerate().take(len.min(text.len())) {
            *glyph = with_dot(letter_glyph(text[i]), dots, i);
        }
        self.write_glyphs(start, &glyphs[..len.min(text.len()).min(CELLS)]);
    }

    /// Draw text on cells `start..split` and digits on `split..end`
    pub fn show_mixed(
        &mut self,
        letters: &[u8],
        digits: &[u8],
        dots: &[bool],
        start: usize,
        split: usize,
        end: usize,
    ) {
        let end = end.min(CELLS);
        let mut glyphs = [0u8; CELLS];
        for cell in start..end {
            let i = cell - start;
            let glyph = if cell < split {
                letters.get(i).copied().map(letter_glyph)
            } else {
                digits.get(cell - split).copied().map(digit_glyph)
            };
            glyphs[i] = with_dot(glyph.unwrap_or(0), dots, i);
        }
        self.write_glyphs(start, &glyphs[..end.saturating_sub(start)]);
    }

    /// Draw one step of the marquee; the index is clamped, not wrapped
    pub fn show_marquee(&mut self, index: u8) {
        let frame = *marquee::frame(index);
        self.write_glyphs(0, &frame);
    }

    /// Read the 16-bit key-scan word
    ///
    /// The first byte clocked out lands in the high half. A cleared bit
    /// means the key on that line is down.
    pub fn read_key_scan(&mut self) -> u16 {
        self.stb.set_low();
        self.write_byte(DATA_READ_KEYS);
        self.dio.set_as_input();

        let mut word = 0;
        for index in 0..SCAN_BITS {
            self.clk.set_low();
            self.delay.delay_us(BIT_DELAY_US);
            word = place_scan_bit(word, index, self.dio.is_high());
            self.clk.set_high();
            self.delay.delay_us(BIT_DELAY_US);
        }

        self.dio.set_as_output();
        self.stb.set_high();
        word
    }

    /// Draw a composed frame
    pub fn render(&mut self, frame: &DisplayDescriptor) {
        match frame.body {
            Body::None => self.clear(),
            Body::Digits { values, start, len } => {
                self.show_digits(&values, &frame.dots, start as usize, len as usize)
            }
            Body::Letters { text, start, len } => {
                self.show_letters(&text, &frame.dots, start as usize, len as usize)
            }
            Body::LettersAndDigits {
                letters,
                digits,
                start,
                split,
                len,
            } => self.show_mixed(
                &letters,
                &digits,
                &frame.dots,
                start as usize,
                split as usize,
                len as usize,
            ),
            Body::Marquee { index, .. } => self.show_marquee(index),
        }
    }

    fn write_glyphs(&mut self, start: usize, glyphs: &[u8]) {
        self.write_command(DATA_FIXED_ADDRESS);
        for (address, value) in run_writes(start, glyphs) {
            self.write_data(address, value);
        }
        self.write_command(display_control(self.display_on, self.brightness));
    }
}

fn with_dot(glyph: u8, dots: &[bool], i: usize) -> u8 {
    if dots.get(i).copied().unwrap_or(false) {
        glyph | DOT
    } else {
        glyph
    }
}
