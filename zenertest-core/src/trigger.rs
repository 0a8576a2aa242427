//! Scan trigger edge detection
//!
//! The button is polled at a fixed cadence; a scan starts only on a
//! low-to-high transition, so holding the button does not repeat scans.

/// Rising edge detector over a polled digital level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeDetector {
    last_level: bool,
}

impl EdgeDetector {
    /// Create a detector seeded with the current level
    ///
    /// Seeding with the boot-time level keeps a button held during
    /// power-up from firing.
    pub const fn new(initial_level: bool) -> Self {
        Self {
            last_level: initial_level,
        }
    }

    /// Feed one polled level, returns true on a rising edge
    pub fn update(&mut self, level: bool) -> bool {
        let rising = level && !self.last_level;
        self.last_level = level;
        rising
    }

    /// Last observed level
    pub const fn level(&self) -> bool {
        self.last_level
    }
}
