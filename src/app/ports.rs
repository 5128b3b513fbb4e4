//! Port traits — the boundary between the control core and the outside
//! world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (ADC, relays, LED matrix, UDP reporter, WiFi link)
//! implement these traits. The [`Controller`](super::service::Controller)
//! consumes them via generics, so the decision core never touches
//! hardware directly and every test runs against in-memory mocks.
//!
//! All calls made from `tick()` must be non-blocking: the periodic loop
//! is level-scheduled, and a stalled port call delays every deadline in
//! the system by the same amount.

/// The two ADC channels the controller samples each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorChannel {
    /// MCU die temperature sensor.
    Internal,
    /// Thermistor on the intake air path.
    External,
}

/// Read-side port: one raw 12-bit sample per channel per tick.
pub trait TemperatureSourcePort {
    /// Raw ADC code in `0..=4095`.
    fn read(&mut self, channel: SensorChannel) -> u16;
}

/// Write-side port: the two ventilation relays.
///
/// Idempotent — the controller only calls this when the control mode
/// actually changes, but implementations must tolerate repeated writes
/// of the same state.
pub trait ActuatorPort {
    fn set_relays(&mut self, boost: bool, mains: bool);
}

/// Write-side port: the six status indicators, one call per tick.
///
/// Bit assignments are defined in [`crate::control::status`].
pub trait StatusSinkPort {
    fn set_indicators(&mut self, mask: u8);
}

/// Outbound status reports (fire-and-forget).
///
/// Invoked on the periodic report schedule, immediately after a relay
/// change, and immediately after an accepted manual command.
pub trait ReporterPort {
    fn send(&mut self, report: &str);
}

/// Network link state, polled once per tick to pick the heartbeat rate.
pub trait ConnectivityPort {
    fn is_connected(&self) -> bool;
}
