//! Display sink trait for the character LCD

use core::fmt;

use crate::ui::Glyph;

/// Errors that can occur while writing to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus write failed
    Bus,
    /// Cursor position outside the visible area
    InvalidPosition,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Bus => write!(f, "display bus error"),
            DisplayError::InvalidPosition => write!(f, "cursor out of range"),
        }
    }
}

/// Trait for the text display
///
/// The display is a dumb character device: the renderer decides what
/// goes where, the sink only places characters.
pub trait DisplaySink {
    /// Clear the screen and move the cursor home
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor
    ///
    /// - `col`: Column (0-15)
    /// - `row`: Row (0-1)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Write ASCII text at the cursor, at most `max_len` bytes
    fn show_text(&mut self, text: &str, max_len: usize) -> Result<(), DisplayError>;

    /// Write one custom glyph at the cursor
    fn show_glyph(&mut self, glyph: Glyph) -> Result<(), DisplayError>;

    /// Write the same glyph `count` times
    fn repeat_glyph(&mut self, glyph: Glyph, count: u8) -> Result<(), DisplayError> {
        for _ in 0..count {
            self.show_glyph(glyph)?;
        }
        Ok(())
    }
}
