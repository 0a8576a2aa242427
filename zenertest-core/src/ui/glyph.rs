//! Custom 5x8 glyphs
//!
//! Each glyph occupies one CGRAM slot of the character LCD. The bitmap is
//! eight row bytes, top to bottom, with the low five bits as pixels.

/// Symbols drawn on the probe diagram row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Glyph {
    /// Probe connection point
    Point = 0,
    /// Current arrow pointing right
    ArrowForward = 1,
    /// Zener bar, cathode on the right
    ZenerForward = 2,
    /// Diode bar, cathode on the right
    DiodeForward = 3,
    /// Current arrow pointing left
    ArrowReverse = 4,
    /// Zener bar, cathode on the left
    ZenerReverse = 5,
    /// Diode bar, cathode on the left
    DiodeReverse = 6,
    /// Horizontal lead
    Wire = 7,
}

impl Glyph {
    /// All glyphs in CGRAM slot order
    pub const ALL: [Glyph; 8] = [
        Glyph::Point,
        Glyph::ArrowForward,
        Glyph::ZenerForward,
        Glyph::DiodeForward,
        Glyph::ArrowReverse,
        Glyph::ZenerReverse,
        Glyph::DiodeReverse,
        Glyph::Wire,
    ];

    /// CGRAM slot, also the character code that prints the glyph
    pub const fn slot(self) -> u8 {
        self as u8
    }

    /// Row bitmap
    pub const fn bitmap(self) -> [u8; 8] {
        match self {
            Glyph::Point => [0x00, 0x1F, 0x11, 0x15, 0x15, 0x11, 0x1F, 0x00],
            Glyph::ArrowForward => [0x08, 0x0C, 0x0E, 0x1F, 0x1F, 0x0E, 0x0C, 0x08],
            Glyph::ZenerForward => [0x0C, 0x08, 0x08, 0x0B, 0x0B, 0x08, 0x08, 0x18],
            Glyph::DiodeForward => [0x08, 0x08, 0x08, 0x0B, 0x0B, 0x08, 0x08, 0x08],
            Glyph::ArrowReverse => [0x02, 0x06, 0x0E, 0x1F, 0x1F, 0x0E, 0x06, 0x02],
            Glyph::ZenerReverse => [0x03, 0x02, 0x02, 0x1A, 0x1A, 0x02, 0x02, 0x06],
            Glyph::DiodeReverse => [0x02, 0x02, 0x02, 0x1A, 0x1A, 0x02, 0x02, 0x02],
            Glyph::Wire => [0x00, 0x00, 0x00, 0x1F, 0x1F, 0x00, 0x00, 0x00],
        }
    }
}
