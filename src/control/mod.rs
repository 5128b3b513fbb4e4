//! Pure control logic: temperature banding, mode decisions, and status
//! indicator encoding.
//!
//! Nothing in this module touches hardware or clocks. Every function is a
//! pure mapping from state to state, which is what makes the controller
//! service testable tick-by-tick on the host.

pub mod band;
pub mod mode;
pub mod status;

pub use band::{next_band, TemperatureBand};
pub use mode::{desired_mode, relay_outputs, ControlMode, ManualMode, RelayOutputs};
