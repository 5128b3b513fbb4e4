//! Ventilation relay driver.
//!
//! Two mechanical relays: mains power to the fan unit, and the
//! boost-speed winding. The wiring guarantees boost does nothing
//! without mains, and the control core never commands boost alone;
//! this driver is a dumb actuator and writes whatever it is told.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO via hw_init helpers.
//! On host/test: writes land in the hw_init GPIO shadow register.

use crate::drivers::hw_init;
use crate::pins;

pub struct RelayDriver {
    boost: bool,
    mains: bool,
}

impl RelayDriver {
    /// Both relays released.
    pub fn new() -> Self {
        let driver = Self {
            boost: false,
            mains: false,
        };
        driver.apply();
        driver
    }

    /// Drive both relays. Idempotent; mechanical wear is limited by the
    /// dwell timer in the control core, not here.
    pub fn set(&mut self, boost: bool, mains: bool) {
        self.boost = boost;
        self.mains = mains;
        self.apply();
    }

    pub fn state(&self) -> (bool, bool) {
        (self.boost, self.mains)
    }

    fn apply(&self) {
        hw_init::gpio_write(pins::BOOST_RELAY_GPIO, self.boost);
        hw_init::gpio_write(pins::MAINS_RELAY_GPIO, self.mains);
    }
}

impl Default for RelayDriver {
    fn default() -> Self {
        Self::new()
    }
}
