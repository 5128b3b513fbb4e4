//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the relay and LED-matrix drivers and the ADC access, exposing
//! them through [`TemperatureSourcePort`], [`ActuatorPort`] and
//! [`StatusSinkPort`]. This is the only module handed to the controller
//! that touches actual hardware. On non-espidf targets the underlying
//! drivers use cfg-gated simulation stubs, so the same adapter runs in
//! host integration tests.

use crate::app::ports::{ActuatorPort, SensorChannel, StatusSinkPort, TemperatureSourcePort};
use crate::drivers::hw_init;
use crate::drivers::led_matrix::LedMatrix;
use crate::drivers::relays::RelayDriver;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    relays: RelayDriver,
    leds: LedMatrix,
}

impl HardwareAdapter {
    pub fn new() -> Self {
        Self {
            relays: RelayDriver::new(),
            leds: LedMatrix::new(),
        }
    }

    /// Last commanded relay state, for diagnostics.
    pub fn relay_state(&self) -> (bool, bool) {
        self.relays.state()
    }

    /// Last latched indicator mask, for diagnostics.
    pub fn indicator_mask(&self) -> u8 {
        self.leds.mask()
    }
}

impl Default for HardwareAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ── TemperatureSourcePort implementation ──────────────────────

impl TemperatureSourcePort for HardwareAdapter {
    fn read(&mut self, channel: SensorChannel) -> u16 {
        match channel {
            SensorChannel::Internal => hw_init::adc1_read(hw_init::ADC_CH_INTERNAL),
            SensorChannel::External => hw_init::adc1_read(hw_init::ADC_CH_EXTERNAL),
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_relays(&mut self, boost: bool, mains: bool) {
        self.relays.set(boost, mains);
    }
}

// ── StatusSinkPort implementation ─────────────────────────────

impl StatusSinkPort for HardwareAdapter {
    fn set_indicators(&mut self, mask: u8) {
        self.leds.set(mask);
        self.leds.strobe();
    }
}
