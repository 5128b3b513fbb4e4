//! Status indicator encoding.
//!
//! The controller state is summarized into a 6-bit mask each tick and
//! handed to the status sink. Bit positions match the LED matrix wiring
//! order, so the mask is also the on-the-wire diagnostic format.

use super::band::TemperatureBand;
use super::mode::{ControlMode, ManualMode};

pub const HOT_BIT: u8 = 1 << 0;
pub const MAINS_BIT: u8 = 1 << 1;
pub const POWER_BIT: u8 = 1 << 2;
pub const HEARTBEAT_BIT: u8 = 1 << 3;
pub const BOOST_BIT: u8 = 1 << 4;
pub const COLD_BIT: u8 = 1 << 5;

/// Encode the current controller state into the indicator mask.
///
/// Power is always lit. The heartbeat bit is lit on phase 0 only, giving
/// a short blink per heartbeat cycle. In the automatic modes the hot and
/// cold bits show the temperature band; in the manual modes they instead
/// blink in counter-phase (hot on phase 1, cold on phase 2) so a glance
/// at the panel shows the override is active.
pub fn encode(current: ControlMode, band: TemperatureBand, manual: ManualMode, phase: u8) -> u8 {
    let mut mask = POWER_BIT;
    if phase == 0 {
        mask |= HEARTBEAT_BIT;
    }
    if matches!(current, ControlMode::On | ControlMode::Boost) {
        mask |= MAINS_BIT;
    }
    if current == ControlMode::Boost {
        mask |= BOOST_BIT;
    }
    if manual.is_manual() {
        if phase == 1 {
            mask |= HOT_BIT;
        }
        if phase == 2 {
            mask |= COLD_BIT;
        }
    } else {
        if band == TemperatureBand::Hot {
            mask |= HOT_BIT;
        }
        if band == TemperatureBand::Cold {
            mask |= COLD_BIT;
        }
    }
    mask
}
