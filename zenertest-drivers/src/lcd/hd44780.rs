//! HD44780 character LCD, 4-bit parallel bus
//!
//! Write-only: R/W is tied low, so every command is followed by a fixed
//! execution delay instead of a busy-flag read.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use zenertest_core::traits::{DisplayError, DisplaySink};
use zenertest_core::ui::Glyph;

/// Function set: 4-bit bus, 2 lines, 5x8 font
pub const CMD_FUNCTION_SET: u8 = 0x28;
/// Entry mode: increment, no shift
pub const CMD_ENTRY_MODE: u8 = 0x06;
/// Display on, cursor off, blink off
pub const CMD_DISPLAY_ON: u8 = 0x0C;
/// Clear display
pub const CMD_CLEAR: u8 = 0x01;
/// Return home
pub const CMD_HOME: u8 = 0x02;
/// Set CGRAM address (OR with slot << 3)
pub const CMD_SET_CGRAM: u8 = 0x40;
/// Set DDRAM address, row 0
pub const CMD_SET_ROW0: u8 = 0x80;
/// Set DDRAM address, row 1
pub const CMD_SET_ROW1: u8 = 0xC0;

/// Visible columns
pub const LCD_COLS: u8 = 16;
/// Visible rows
pub const LCD_ROWS: u8 = 2;

/// Execution time of ordinary commands and data writes (µs)
const EXEC_US: u32 = 50;
/// Execution time of clear and home (µs)
const EXEC_SLOW_US: u32 = 2_000;

/// HD44780 driver
///
/// All six bus lines share one pin type, which is what most HALs hand out
/// for type-erased GPIO outputs.
pub struct Hd44780<P, D> {
    rs: P,
    en: P,
    /// D4..D7
    data: [P; 4],
    delay: D,
}

impl<P, D> Hd44780<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create the driver; call [`Hd44780::init`] before use
    pub fn new(rs: P, en: P, data: [P; 4], delay: D) -> Self {
        Self {
            rs,
            en,
            data,
            delay,
        }
    }

    /// Power-on initialisation by instruction
    ///
    /// Forces 8-bit mode three times, switches to 4-bit, then configures
    /// two lines, display on and left-to-right entry.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.delay.delay_ms(50);
        self.rs.set_low().map_err(|_| DisplayError::Bus)?;

        self.write_nibble(0x03)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x03)?;
        self.delay.delay_us(150);
        self.write_nibble(0x03)?;
        self.delay.delay_us(150);
        self.write_nibble(0x02)?;
        self.delay.delay_us(EXEC_US);

        self.command(CMD_FUNCTION_SET)?;
        self.command(CMD_DISPLAY_ON)?;
        self.command(CMD_CLEAR)?;
        self.command(CMD_ENTRY_MODE)
    }

    /// Store a glyph bitmap in its CGRAM slot
    ///
    /// Leaves the address counter in CGRAM; follow with a cursor move or
    /// clear before writing text.
    pub fn load_glyph(&mut self, glyph: Glyph) -> Result<(), DisplayError> {
        self.command(CMD_SET_CGRAM | ((glyph.slot() & 0x07) << 3))?;
        for row in glyph.bitmap() {
            self.data(row)?;
        }
        Ok(())
    }

    /// Store all eight glyphs and return the cursor home
    pub fn load_glyphs(&mut self) -> Result<(), DisplayError> {
        for glyph in Glyph::ALL {
            self.load_glyph(glyph)?;
        }
        self.home()
    }

    /// Move the cursor to the top-left without clearing
    pub fn home(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_HOME)
    }

    /// Send an instruction byte
    pub fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.write_byte(cmd, false)?;
        if cmd == CMD_CLEAR || cmd == CMD_HOME {
            self.delay.delay_us(EXEC_SLOW_US);
        }
        Ok(())
    }

    /// Send a data byte (character code or CGRAM row)
    pub fn data(&mut self, value: u8) -> Result<(), DisplayError> {
        self.write_byte(value, true)
    }

    /// Release the pins and delay
    pub fn release(self) -> (P, P, [P; 4], D) {
        (self.rs, self.en, self.data, self.delay)
    }

    fn write_byte(&mut self, value: u8, is_data: bool) -> Result<(), DisplayError> {
        self.rs
            .set_state(PinState::from(is_data))
            .map_err(|_| DisplayError::Bus)?;

        self.write_nibble(value >> 4)?;
        self.write_nibble(value & 0x0F)?;
        self.delay.delay_us(EXEC_US);
        Ok(())
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<(), DisplayError> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            pin.set_state(PinState::from(nibble & (1 << bit) != 0))
                .map_err(|_| DisplayError::Bus)?;
        }

        // Latched on the falling edge of E
        self.en.set_high().map_err(|_| DisplayError::Bus)?;
        self.delay.delay_us(1);
        self.en.set_low().map_err(|_| DisplayError::Bus)?;
        self.delay.delay_us(1);
        Ok(())
    }
}

impl<P, D> DisplaySink for Hd44780<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if col >= LCD_COLS || row >= LCD_ROWS {
            return Err(DisplayError::InvalidPosition);
        }
        let base = if row == 0 { CMD_SET_ROW0 } else { CMD_SET_ROW1 };
        self.command(base + col)
    }

    fn show_text(&mut self, text: &str, max_len: usize) -> Result<(), DisplayError> {
        for &byte in text.as_bytes().iter().take(max_len) {
            self.data(byte)?;
        }
        Ok(())
    }

    fn show_glyph(&mut self, glyph: Glyph) -> Result<(), DisplayError> {
        self.data(glyph.slot())
    }
}
