//! Status LED matrix driver.
//!
//! Six LEDs share three GPIO wires in a matrix arrangement to cut down
//! panel wiring: each LED lights when exactly one wire pattern is
//! driven, so the driver strobes one LED per time slot. At the strobe
//! rate of the control loop the multiplexing is invisible to the eye.
//!
//! The indicator *mask* (one bit per LED, assignments in
//! [`crate::control::status`]) is expanded into an 18-bit *control
//! word*: three wire-level bits per LED slot.

use crate::drivers::hw_init;
use crate::pins;

const NUM_LEDS: usize = 6;

/// Wire bits that must be driven high to light each LED, indexed by LED
/// number. Determined by the matrix wiring on the panel board.
const ON_BIT_TABLE: [u8; NUM_LEDS] = [1, 2, 1, 4, 2, 4];

pub struct LedMatrix {
    mask: u8,
    control: u32,
    slot: u8,
}

impl LedMatrix {
    /// All LEDs dark.
    pub fn new() -> Self {
        Self {
            mask: 0,
            control: 0,
            slot: 0,
        }
    }

    /// Latch a new indicator mask. Takes effect as the strobe walks the
    /// slots; slots of unlit LEDs drive all wires low.
    pub fn set(&mut self, mask: u8) {
        self.mask = mask & 0x3f;
        self.control = 0;
        for led in 0..NUM_LEDS {
            if (self.mask >> led) & 1 != 0 {
                self.control |= u32::from(ON_BIT_TABLE[led]) << (led * 3);
            }
        }
    }

    /// Drive the wire levels for the next LED slot. Call once per tick.
    pub fn strobe(&mut self) {
        let levels = (self.control >> (u32::from(self.slot) * 3)) & 0x7;
        hw_init::gpio_write(pins::WHITE_WIRE_GPIO, levels & 1 != 0);
        hw_init::gpio_write(pins::BLACK_WIRE_GPIO, levels & 2 != 0);
        hw_init::gpio_write(pins::YELLOW_WIRE_GPIO, levels & 4 != 0);
        self.slot = (self.slot + 1) % NUM_LEDS as u8;
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    pub fn control_word(&self) -> u32 {
        self.control
    }
}

impl Default for LedMatrix {
    fn default() -> Self {
        Self::new()
    }
}
