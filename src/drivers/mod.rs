//! Actuator drivers and hardware initialisation.

pub mod hw_init;
pub mod led_matrix;
pub mod relays;
